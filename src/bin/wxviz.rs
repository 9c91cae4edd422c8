use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use weather_viz::config::{self, AppConfig};
use weather_viz::storage::{self, NumericPolicy};
use weather_viz::viz::{Dashboard, DashboardState, Event};
use weather_viz::{Series, stats, transform};

#[derive(Parser, Debug)]
#[command(
    name = "wxviz",
    version,
    about = "Chart daily city weather: temperature trends and monthly precipitation"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a weather CSV and render both charts (optionally export and print stats).
    Render(RenderArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Weather CSV with date, city, temperature and precipitation columns.
    #[arg(short, long)]
    input: PathBuf,
    /// City to chart (exact, case-sensitive). Overrides the config file.
    #[arg(short, long)]
    city: Option<String>,
    /// Directory for temperature.svg and precipitation.svg.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
    /// JSON layout/config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Hide a series: actual-temp, average-temp, actual-precip, historical-precip. Repeatable.
    #[arg(long, value_parser = parse_series)]
    hide: Vec<Series>,
    /// Show the temperature hover tooltip at this date (YYYY-MM-DD).
    #[arg(long)]
    hover_date: Option<String>,
    /// Turn unparseable numbers into NaN instead of failing.
    #[arg(long, default_value_t = false)]
    lenient: bool,
    /// Save monthly aggregates to file (format inferred by --format or extension).
    #[arg(long)]
    export: Option<PathBuf>,
    /// Export format (csv or json). If omitted, inferred from --export extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print summary statistics of the city's records to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn parse_series(s: &str) -> Result<Series, String> {
    Series::from_control_name(s).ok_or_else(|| {
        let names: Vec<&str> = Series::ALL.iter().map(|s| s.control_name()).collect();
        format!("unknown series {s:?}, expected one of: {}", names.join(", "))
    })
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut app = match &args.config {
        Some(path) => config::load_config(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(city) = args.city {
        app.city = city;
    }

    let policy = if args.lenient {
        NumericPolicy::Lenient
    } else {
        NumericPolicy::Strict
    };
    let records = storage::load_csv(&args.input, policy)
        .with_context(|| format!("loading {}", args.input.display()))?;

    let dashboard = Dashboard::build(&records, &app.city, app.chart)?;

    let mut state = DashboardState::default();
    for series in &args.hide {
        state = dashboard.handle(&state, Event::Toggle(*series, false));
    }
    if let Some(s) = args.hover_date.as_deref() {
        let date = storage::parse_date(s)
            .ok_or_else(|| anyhow::anyhow!("invalid --hover-date, expected YYYY-MM-DD"))?;
        state = dashboard.hover_date(&state, date);
    }

    dashboard.render_to_dir(&state, &args.out_dir)?;
    eprintln!(
        "Wrote {} charts to {}",
        dashboard.city(),
        args.out_dir.display()
    );

    if let Some(path) = args.export.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        let months = dashboard.precipitation().months();
        match fmt.as_str() {
            "csv" => storage::save_monthly_csv(months, path)?,
            "json" => storage::save_monthly_json(months, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} months to {}", months.len(), path.display());
    }

    if args.stats {
        let daily = transform::filter_city(&records, &app.city);
        for s in stats::field_summaries(&daily) {
            println!(
                "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
                app.city,
                s.field,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}
