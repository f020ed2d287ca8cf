// kb-core/src/units.rs

use uom::si::f64::{Pressure as UomPressure, ThermodynamicTemperature as UomTemperature};

/// Sensor temperatures.
pub type Temperature = UomTemperature;
/// Bottle pressure, reported in several units at the CLI edge.
pub type Pressure = UomPressure;

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn in_degc(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

#[inline]
pub fn atm(v: f64) -> Pressure {
    use uom::si::pressure::atmosphere;
    Pressure::new::<atmosphere>(v)
}

#[inline]
pub fn in_bar(p: Pressure) -> f64 {
    use uom::si::pressure::bar;
    p.get::<bar>()
}

#[inline]
pub fn in_psi(p: Pressure) -> f64 {
    use uom::si::pressure::pound_force_per_square_inch;
    p.get::<pound_force_per_square_inch>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_round_trip() {
        assert!((in_degc(degc(25.0)) - 25.0).abs() < 1e-9);
        assert!((in_degc(degc(-4.5)) + 4.5).abs() < 1e-9);
    }

    #[test]
    fn pressure_conversions() {
        // 1 atm = 1.01325 bar ~ 14.696 psi
        assert!((in_bar(atm(1.0)) - 1.013_25).abs() < 1e-9);
        assert!((in_psi(atm(1.0)) - 14.696).abs() < 1e-3);
        assert!((in_bar(atm(2.5)) - 2.533_125).abs() < 1e-9);
    }
}
