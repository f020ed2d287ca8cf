mod config;
mod error;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use config::CliConfig;
use error::{CliError, CliResult};
use kb_core::{atm, ensure_finite, in_bar, in_degc, in_psi};
use kb_model::{
    BatchInputs, DEFAULT_TEMPERATURE_C, DEFAULT_TIMELINE_DAYS, DEFAULT_VOLUME_L,
    DEFAULT_WINDOW_DAYS, RiskLevel, Thresholds, calculate_sugar_needed, estimate_batch,
    estimate_co2, predict_co2_timeline, project_co2_window,
};
use kb_sensors::{ReadingSource, probe};
use kb_store::{
    AlertCadence, Batch, Bottling, JsonStore, Logbook, MeasurementInput, Settings,
    write_comparison_csv, write_measurements_csv,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "kombuflow")]
#[command(about = "Kombucha fermentation tracker - CO₂ and bottle pressure estimates", long_about = None)]
struct Cli {
    /// YAML config file (defaults to ./kombuflow.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data file, overriding the config
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate CO₂, completion and pressure for one set of conditions
    Estimate {
        /// Sugar in grams
        #[arg(long)]
        sugar: f64,
        /// Days of fermentation
        #[arg(long)]
        days: f64,
        /// Average temperature in °C
        #[arg(long, default_value_t = DEFAULT_TEMPERATURE_C)]
        temperature: f64,
        /// Batch volume in liters
        #[arg(long, default_value_t = DEFAULT_VOLUME_L)]
        volume: f64,
    },
    /// Estimate sealed-bottle pressure
    Pressure {
        #[arg(long)]
        sugar: f64,
        #[arg(long, default_value_t = DEFAULT_TEMPERATURE_C)]
        temperature: f64,
        #[arg(long)]
        days: f64,
    },
    /// Project CO₂ production day by day
    Timeline {
        #[arg(long)]
        sugar: f64,
        #[arg(long, default_value_t = DEFAULT_TEMPERATURE_C)]
        temperature: f64,
        #[arg(long, default_value_t = DEFAULT_VOLUME_L)]
        volume: f64,
        /// Number of days to project
        #[arg(long, default_value_t = DEFAULT_TIMELINE_DAYS)]
        days: u32,
        /// Start the projection at this day instead of day 0
        #[arg(long)]
        from: Option<u32>,
    },
    /// Sugar needed to reach a CO₂ target
    SugarNeeded {
        /// Target CO₂ in grams
        #[arg(long)]
        target: f64,
        #[arg(long)]
        days: f64,
        #[arg(long, default_value_t = DEFAULT_TEMPERATURE_C)]
        temperature: f64,
        #[arg(long, default_value_t = DEFAULT_VOLUME_L)]
        volume: f64,
    },
    /// Classify a pressure against the configured thresholds
    Classify {
        /// Pressure in atm
        pressure: f64,
    },
    /// Manage batches
    #[command(subcommand)]
    Batch(BatchCommands),
    /// Show batches at risk of over-carbonation
    Alerts,
    /// Show or change alert settings
    Settings {
        #[arg(long)]
        warning: Option<f64>,
        #[arg(long)]
        danger: Option<f64>,
        #[arg(long)]
        alerts: Option<CadenceArg>,
        #[arg(long)]
        show_alerts: Option<bool>,
    },
    /// Take one sensor reading
    Sense,
}

#[derive(Subcommand)]
enum BatchCommands {
    /// Start a new batch
    Add {
        name: String,
        #[arg(long)]
        tea: String,
        /// Sugar in grams
        #[arg(long)]
        sugar: f64,
        /// Volume in liters
        #[arg(long)]
        volume: f64,
        /// Brew day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// List batches
    List,
    /// Delete a batch
    Remove { name: String },
    /// Record a measurement; temperature is read from sensors when omitted
    Measure {
        name: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        temperature: Option<f64>,
        #[arg(long)]
        ph: Option<f64>,
        /// Carbonation description (secondary fermentation)
        #[arg(long)]
        carbonation: Option<String>,
    },
    /// Move a batch into bottles
    Bottle {
        name: String,
        #[arg(long)]
        bottle_type: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Priming sugar in g/L
        #[arg(long, default_value_t = 0.0)]
        added_sugar: f64,
        #[arg(long)]
        flavoring: Option<String>,
    },
    /// Show a batch, its latest estimate and the coming week's projection
    Show { name: String },
    /// Export a batch's measurements as CSV
    Export {
        name: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a summary of all batches as CSV
    Compare {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CadenceArg {
    Always,
    Daily,
    Never,
}

impl From<CadenceArg> for AlertCadence {
    fn from(arg: CadenceArg) -> Self {
        match arg {
            CadenceArg::Always => AlertCadence::Always,
            CadenceArg::Daily => AlertCadence::Daily,
            CadenceArg::Never => AlertCadence::Never,
        }
    }
}

struct Context {
    config: CliConfig,
    store: JsonStore,
}

impl Context {
    fn new(config: CliConfig, data_override: Option<PathBuf>) -> Self {
        let data_file = data_override.unwrap_or_else(|| config.data_file.clone());
        let store = JsonStore::new(data_file).with_default_settings(Settings {
            thresholds: config.thresholds,
            ..Settings::default()
        });
        Self { config, store }
    }

    fn load_logbook(&self) -> CliResult<Logbook> {
        Ok(self.store.load()?)
    }

    /// Settings for read-only commands. A broken data file is reported but not fatal.
    fn thresholds(&self) -> Thresholds {
        match self.store.load() {
            Ok(log) => log.settings().thresholds,
            Err(err) => {
                tracing::warn!(error = %err, "could not load settings, using configured thresholds");
                self.config.thresholds
            }
        }
    }

    fn save(&self, log: &Logbook) -> CliResult<()> {
        Ok(self.store.save(log.data())?)
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;
    let ctx = Context::new(config, cli.data.clone());

    match cli.command {
        Commands::Estimate {
            sugar,
            days,
            temperature,
            volume,
        } => cmd_estimate(&ctx, sugar, days, temperature, volume),
        Commands::Pressure {
            sugar,
            temperature,
            days,
        } => cmd_pressure(&ctx, sugar, temperature, days),
        Commands::Timeline {
            sugar,
            temperature,
            volume,
            days,
            from,
        } => cmd_timeline(sugar, temperature, volume, days, from),
        Commands::SugarNeeded {
            target,
            days,
            temperature,
            volume,
        } => cmd_sugar_needed(target, days, temperature, volume),
        Commands::Classify { pressure } => cmd_classify(&ctx, pressure),
        Commands::Batch(batch_cmd) => match batch_cmd {
            BatchCommands::Add {
                name,
                tea,
                sugar,
                volume,
                start,
            } => cmd_batch_add(&ctx, name, tea, sugar, volume, start),
            BatchCommands::List => cmd_batch_list(&ctx),
            BatchCommands::Remove { name } => cmd_batch_remove(&ctx, &name),
            BatchCommands::Measure {
                name,
                date,
                temperature,
                ph,
                carbonation,
            } => cmd_batch_measure(&ctx, &name, date, temperature, ph, carbonation),
            BatchCommands::Bottle {
                name,
                bottle_type,
                date,
                added_sugar,
                flavoring,
            } => cmd_batch_bottle(&ctx, &name, bottle_type, date, added_sugar, flavoring),
            BatchCommands::Show { name } => cmd_batch_show(&ctx, &name),
            BatchCommands::Export { name, output } => {
                cmd_batch_export(&ctx, &name, output.as_deref())
            }
            BatchCommands::Compare { output } => cmd_batch_compare(&ctx, output.as_deref()),
        },
        Commands::Alerts => cmd_alerts(&ctx),
        Commands::Settings {
            warning,
            danger,
            alerts,
            show_alerts,
        } => cmd_settings(&ctx, warning, danger, alerts, show_alerts),
        Commands::Sense => cmd_sense(&ctx),
    }
}

/// Sugar and volume are physical amounts; the engine would accept anything.
fn require_non_negative(value: f64, what: &str) -> CliResult<f64> {
    let value = ensure_finite(value, "input")?;
    if value < 0.0 {
        return Err(CliError::InvalidInput(format!(
            "{what} must be non-negative, got {value}"
        )));
    }
    Ok(value)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn risk_label(level: RiskLevel, thresholds: &Thresholds) -> String {
    match level {
        RiskLevel::Danger => format!("DANGER (≥ {} atm)", thresholds.danger_atm()),
        RiskLevel::Warning => format!("High (≥ {} atm)", thresholds.warning_atm()),
        RiskLevel::Safe => format!("Safe (< {} atm)", thresholds.warning_atm()),
    }
}

fn print_pressure(pressure_atm: f64) {
    let p = atm(pressure_atm);
    println!(
        "Pressure:        {:.2} atm ({:.2} bar, {:.1} psi)",
        pressure_atm,
        in_bar(p),
        in_psi(p)
    );
}

fn cmd_estimate(
    ctx: &Context,
    sugar: f64,
    days: f64,
    temperature: f64,
    volume: f64,
) -> CliResult<()> {
    let sugar = require_non_negative(sugar, "sugar")?;
    let volume = require_non_negative(volume, "volume")?;
    let thresholds = ctx.thresholds();
    let inputs = BatchInputs::new(sugar, days)
        .with_temperature(temperature)
        .with_volume(volume);
    let est = estimate_batch(&inputs);

    println!("CO₂ produced:    {:.2} g", est.co2_g);
    println!("Completion:      {:.1} %", est.completion_pct);
    print_pressure(est.pressure_atm);
    println!(
        "Risk:            {}",
        risk_label(est.risk(&thresholds), &thresholds)
    );
    Ok(())
}

fn cmd_pressure(ctx: &Context, sugar: f64, temperature: f64, days: f64) -> CliResult<()> {
    let thresholds = ctx.thresholds();
    let pressure = estimate_co2(sugar, temperature, days);
    print_pressure(pressure);
    println!(
        "Risk:            {}",
        risk_label(thresholds.classify(pressure), &thresholds)
    );
    Ok(())
}

fn cmd_timeline(
    sugar: f64,
    temperature: f64,
    volume: f64,
    days: u32,
    from: Option<u32>,
) -> CliResult<()> {
    let sugar = require_non_negative(sugar, "sugar")?;
    let volume = require_non_negative(volume, "volume")?;
    let points = match from {
        Some(start) => project_co2_window(sugar, temperature, volume, start, days),
        None => predict_co2_timeline(sugar, temperature, volume, days),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "day,co2_g")?;
    for p in points {
        writeln!(out, "{},{:.4}", p.day, p.co2_g)?;
    }
    Ok(())
}

fn cmd_sugar_needed(target: f64, days: f64, temperature: f64, volume: f64) -> CliResult<()> {
    let sugar = calculate_sugar_needed(target, days, temperature, volume)?;
    println!("Sugar needed:    {:.1} g", sugar);
    Ok(())
}

fn cmd_classify(ctx: &Context, pressure: f64) -> CliResult<()> {
    let pressure = ensure_finite(pressure, "pressure")?;
    let thresholds = ctx.thresholds();
    println!("{}", risk_label(thresholds.classify(pressure), &thresholds));
    Ok(())
}

fn cmd_batch_add(
    ctx: &Context,
    name: String,
    tea: String,
    sugar: f64,
    volume: f64,
    start: Option<NaiveDate>,
) -> CliResult<()> {
    let mut log = ctx.load_logbook()?;
    let batch = Batch::new(name, tea, sugar, volume, start.unwrap_or_else(today));
    let label = batch.name.clone();
    log.add_batch(batch)?;
    ctx.save(&log)?;
    println!("✓ Added batch '{}'", label);
    Ok(())
}

fn cmd_batch_list(ctx: &Context) -> CliResult<()> {
    let log = ctx.load_logbook()?;
    if log.batches().is_empty() {
        println!("No batches yet.");
        return Ok(());
    }

    let thresholds = log.settings().thresholds;
    println!(
        "{:<24} {:<10} {:>8} {:>7} {:<10} {:<10} {:>9}",
        "NAME", "TEA", "SUGAR g", "VOL L", "STARTED", "PHASE", "LAST atm"
    );
    for batch in log.batches() {
        let last = batch
            .latest_measurement()
            .map(|m| {
                let flag = match thresholds.classify(m.pressure_atm) {
                    RiskLevel::Danger => " !!",
                    RiskLevel::Warning => " !",
                    RiskLevel::Safe => "",
                };
                format!("{:.2}{}", m.pressure_atm, flag)
            })
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<10} {:>8.1} {:>7.2} {:<10} {:<10} {:>9}",
            batch.name, batch.tea_type, batch.sugar_g, batch.volume_l, batch.start_date, batch.phase, last
        );
    }
    Ok(())
}

fn cmd_batch_remove(ctx: &Context, name: &str) -> CliResult<()> {
    let mut log = ctx.load_logbook()?;
    let removed = log.remove_batch(name)?;
    ctx.save(&log)?;
    println!("✓ Removed batch '{}'", removed.name);
    Ok(())
}

fn cmd_batch_measure(
    ctx: &Context,
    name: &str,
    date: Option<NaiveDate>,
    temperature: Option<f64>,
    ph: Option<f64>,
    carbonation: Option<String>,
) -> CliResult<()> {
    let mut log = ctx.load_logbook()?;

    let (temperature_c, ph) = match temperature {
        Some(t) => (t, ph),
        None => {
            let mut source = probe(&ctx.config.sensors);
            let reading = source.read()?;
            println!(
                "Read {:.1} °C, pH {:.1} from {} sensors",
                in_degc(reading.temperature),
                reading.ph,
                reading.origin
            );
            (in_degc(reading.temperature), ph.or(Some(reading.ph)))
        }
    };

    let thresholds = log.settings().thresholds;
    let m = log
        .record_measurement(
            name,
            MeasurementInput {
                date: date.unwrap_or_else(today),
                temperature_c,
                ph,
                carbonation,
            },
        )?
        .clone();
    ctx.save(&log)?;

    println!("✓ Recorded measurement for '{}' ({})", name, m.phase);
    println!("CO₂ produced:    {:.2} g ({:.1} % of potential)", m.co2_g, m.completion_pct);
    print_pressure(m.pressure_atm);
    println!(
        "Risk:            {}",
        risk_label(thresholds.classify(m.pressure_atm), &thresholds)
    );
    Ok(())
}

fn cmd_batch_bottle(
    ctx: &Context,
    name: &str,
    bottle_type: String,
    date: Option<NaiveDate>,
    added_sugar: f64,
    flavoring: Option<String>,
) -> CliResult<()> {
    let mut log = ctx.load_logbook()?;
    log.move_to_secondary(
        name,
        Bottling {
            date: date.unwrap_or_else(today),
            bottle_type,
            added_sugar_g_per_l: added_sugar,
            flavoring,
        },
    )?;
    ctx.save(&log)?;
    println!("✓ '{}' moved to secondary fermentation", name);
    Ok(())
}

fn cmd_batch_show(ctx: &Context, name: &str) -> CliResult<()> {
    let log = ctx.load_logbook()?;
    let batch = log.find(name).ok_or_else(|| kb_store::StoreError::BatchNotFound {
        name: name.to_string(),
    })?;
    let thresholds = log.settings().thresholds;

    println!("Batch:           {}", batch.name);
    println!("Tea:             {}", batch.tea_type);
    println!("Sugar / volume:  {:.1} g in {:.2} L", batch.sugar_g, batch.volume_l);
    println!("Phase:           {} since {}", batch.phase, batch.phase_start());
    if let Some(b) = &batch.bottling {
        println!(
            "Bottled:         {} in {} ({} g/L added{})",
            b.date,
            b.bottle_type,
            b.added_sugar_g_per_l,
            b.flavoring
                .as_deref()
                .map(|f| format!(", {f}"))
                .unwrap_or_default()
        );
    }
    println!("Measurements:    {}", batch.measurements.len());

    let Some(latest) = batch.latest_measurement() else {
        return Ok(());
    };
    println!("Latest ({}):", latest.date);
    println!("  CO₂ produced:  {:.2} g ({:.1} %)", latest.co2_g, latest.completion_pct);
    println!("  Pressure:      {:.2} atm", latest.pressure_atm);
    println!(
        "  Risk:          {}",
        risk_label(thresholds.classify(latest.pressure_atm), &thresholds)
    );

    let days = batch.days_in_phase(today()).max(0);
    let start = u32::try_from(days).unwrap_or(u32::MAX);
    println!("Next {} days (at {:.1} °C):", DEFAULT_WINDOW_DAYS, latest.temperature_c);
    for p in project_co2_window(
        batch.sugar_g,
        latest.temperature_c,
        batch.volume_l,
        start,
        DEFAULT_WINDOW_DAYS,
    ) {
        println!("  day {:>3}: {:.2} g", p.day, p.co2_g);
    }
    Ok(())
}

fn with_output<F>(output: Option<&Path>, write: F) -> CliResult<()>
where
    F: FnOnce(&mut dyn Write) -> CliResult<()>,
{
    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            write(&mut file)?;
            println!("✓ Exported to {}", path.display());
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write(&mut lock)
        }
    }
}

fn cmd_batch_export(ctx: &Context, name: &str, output: Option<&Path>) -> CliResult<()> {
    let log = ctx.load_logbook()?;
    let batch = log.find(name).ok_or_else(|| kb_store::StoreError::BatchNotFound {
        name: name.to_string(),
    })?;
    with_output(output, |out| Ok(write_measurements_csv(batch, out)?))
}

fn cmd_batch_compare(ctx: &Context, output: Option<&Path>) -> CliResult<()> {
    let log = ctx.load_logbook()?;
    with_output(output, |out| Ok(write_comparison_csv(log.batches(), out)?))
}

fn cmd_alerts(ctx: &Context) -> CliResult<()> {
    let mut log = ctx.load_logbook()?;
    let before = log.settings().last_alert_check;
    let alerts = kb_store::check_alerts(&mut log, today());
    if log.settings().last_alert_check != before {
        ctx.save(&log)?;
    }

    if alerts.is_empty() {
        println!("✓ No batches at risk");
        return Ok(());
    }

    let thresholds = log.settings().thresholds;
    println!("⚠ {} batch(es) at risk of over-carbonation:", alerts.len());
    for alert in &alerts {
        println!(
            "  {:<24} {:>6.2} atm  {}",
            alert.name,
            alert.pressure_atm,
            risk_label(alert.level, &thresholds)
        );
    }
    Ok(())
}

fn cmd_settings(
    ctx: &Context,
    warning: Option<f64>,
    danger: Option<f64>,
    alerts: Option<CadenceArg>,
    show_alerts: Option<bool>,
) -> CliResult<()> {
    let mut log = ctx.load_logbook()?;
    let mut settings = log.settings().clone();
    let changed = warning.is_some() || danger.is_some() || alerts.is_some() || show_alerts.is_some();

    if warning.is_some() || danger.is_some() {
        let current = settings.thresholds;
        settings.thresholds = Thresholds::new(
            warning.unwrap_or(current.warning_atm()),
            danger.unwrap_or(current.danger_atm()),
        )?;
    }
    if let Some(cadence) = alerts {
        settings.alert_check = cadence.into();
    }
    if let Some(show) = show_alerts {
        settings.show_alerts = show;
    }

    if changed {
        log.update_settings(settings.clone());
        ctx.save(&log)?;
        println!("✓ Settings saved");
    }

    println!("Warning threshold: {} atm", settings.thresholds.warning_atm());
    println!("Danger threshold:  {} atm", settings.thresholds.danger_atm());
    println!("Alerts shown:      {}", settings.show_alerts);
    println!("Alert check:       {:?}", settings.alert_check);
    Ok(())
}

fn cmd_sense(ctx: &Context) -> CliResult<()> {
    let mut source = probe(&ctx.config.sensors);
    let reading = source.read()?;
    println!("Source:      {}", reading.origin);
    println!("Temperature: {:.1} °C", reading.temperature_c());
    println!("pH:          {:.1}", reading.ph);
    println!("CO₂:         {:.0} ppm", reading.co2_ppm);
    Ok(())
}
