use anyhow::Context;
use clap::{Args, ColorChoice, CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use is_terminal::IsTerminal;
use platecal::batch::{BatchError, BatchRunner};
use platecal::calculator::{ImageResult, Outcome};
use platecal::config::PlatecalConfig;
use platecal::detectors::SidecarDetector;
use platecal::engine::CalorieEngine;
use platecal::report::{ReportWriter, render_summary};
use serde_json::json;
use std::io::stdout;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;
const EXIT_INVALID_INPUT: i32 = 2;

#[derive(Parser)]
#[command(
    name = "platecal",
    about = "Estimate calories on food plate photos",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// Disable color
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every image in a directory and write calorie reports
    Analyze(AnalyzeArgs),
    /// List known foods and their nutritional constants
    Foods(FoodsArgs),
    /// Print the JSON schema of a per-image result
    Schema,
    /// Show or initialize the user configuration
    Config(ConfigArgs),
}

#[derive(Args, Clone)]
struct AnalyzeArgs {
    /// Directory containing plate images
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// Where to write `<image>_calories.txt` reports (defaults to DIR)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Where to look for `<image>.detections.json` files (defaults to DIR)
    #[arg(long, value_name = "DIR", conflicts_with = "no_detector")]
    detections_dir: Option<PathBuf>,

    /// Ignore detector output and infer foods from file names only
    #[arg(long)]
    no_detector: bool,

    /// Config file to use instead of the user config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Centimetres per pixel in the source images
    #[arg(long, value_name = "CM")]
    image_scale: Option<f64>,

    /// Output the run as JSON
    #[arg(long)]
    json: bool,

    /// Suppress per-image progress and the summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args, Clone)]
struct FoodsArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,

    /// Config file to use instead of the user config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct ConfigArgs {
    /// Write the default config to the user config directory
    #[arg(long)]
    init: bool,
}

fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Color for clap's own help and error output, decided before parsing.
fn clap_color() -> ColorChoice {
    let flagged = std::env::args_os()
        .skip(1)
        .take_while(|arg| arg != "--")
        .any(|arg| arg == "--no-color");
    if flagged || no_color_env() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn want_color(no_color: bool, config: &PlatecalConfig) -> bool {
    !no_color
        && !no_color_env()
        && config.output.color
        && stdout().is_terminal()
        && supports_color::on(supports_color::Stream::Stdout).is_some()
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<PlatecalConfig, i32> {
    match explicit {
        Some(path) => PlatecalConfig::load_from(path).map_err(|err| {
            eprintln!("Error: {err}");
            EXIT_INVALID_INPUT
        }),
        None => Ok(PlatecalConfig::load()),
    }
}

fn build_engine(args: &AnalyzeArgs, config: &PlatecalConfig) -> Result<CalorieEngine, i32> {
    let knowledge = config.knowledge_base().map_err(|err| {
        eprintln!("Error: {err}");
        EXIT_INVALID_INPUT
    })?;
    let engine = CalorieEngine::new(knowledge, config.engine_settings());
    if args.no_detector {
        return Ok(engine);
    }
    let detector = match &args.detections_dir {
        Some(dir) => SidecarDetector::in_dir(dir),
        None => SidecarDetector::new(),
    };
    Ok(engine.with_detector(detector))
}

fn prepare_output_dir(path: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("cannot create output directory {}", path.display()))
}

fn progress_line(result: &ImageResult, color: bool) -> String {
    match &result.outcome {
        Outcome::Success => {
            let line = format!(
                "{}: {} food(s), {:.1} kcal",
                result.image,
                result.food_count(),
                result.total_calories_kcal
            );
            if color { line.green().to_string() } else { line }
        }
        Outcome::SuccessEmpty => format!("{}: no foods detected", result.image),
        Outcome::Failure { reason } => {
            let line = format!("{}: {reason}", result.image);
            if color { line.red().to_string() } else { line }
        }
    }
}

fn run_analyze(args: AnalyzeArgs, no_color: bool) -> Result<(), i32> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(scale) = args.image_scale {
        config.estimation.image_scale_cm_per_px = scale;
    }
    if let Err(err) = config.validate() {
        eprintln!("Error: {err}");
        return Err(EXIT_INVALID_INPUT);
    }

    let engine = build_engine(&args, &config)?;
    let output_dir = args.output_dir.clone().unwrap_or_else(|| args.dir.clone());
    if args.dir.is_dir()
        && let Err(err) = prepare_output_dir(&output_dir)
    {
        eprintln!("Error: {err:#}");
        return Err(EXIT_FAILURE);
    }

    let color = want_color(no_color, &config);
    let show_progress = !args.quiet && !args.json;
    let mut results = Vec::new();
    let runner = BatchRunner::new(&engine, ReportWriter::new(&output_dir));
    let session = runner
        .run(&args.dir, |result| {
            if show_progress {
                println!("{}", progress_line(result, color));
            }
            if args.json {
                results.push(result.clone());
            }
        })
        .map_err(|err| {
            eprintln!("Error: {err}");
            match err {
                BatchError::DirectoryNotFound(_) | BatchError::NotADirectory(_) => {
                    EXIT_INVALID_INPUT
                }
                BatchError::Io { .. } => EXIT_FAILURE,
            }
        })?;

    if args.json {
        let out = json!({
            "summary": session.summary(),
            "images": results,
            "failures": session.failures(),
        });
        let rendered = serde_json::to_string_pretty(&out).map_err(|err| {
            eprintln!("Error: {err}");
            EXIT_FAILURE
        })?;
        println!("{rendered}");
    } else if !args.quiet {
        if session.summary().processed == 0 {
            println!("No supported images found in {}", args.dir.display());
        }
        println!();
        print!("{}", render_summary(&session.summary(), session.failures(), color));
    }
    Ok(())
}

fn run_foods(args: FoodsArgs) -> Result<(), i32> {
    let config = load_config(args.config.as_deref())?;
    let knowledge = config.knowledge_base().map_err(|err| {
        eprintln!("Error: {err}");
        EXIT_INVALID_INPUT
    })?;
    if args.json {
        let profiles: Vec<_> = knowledge.profiles().collect();
        let rendered = serde_json::to_string_pretty(&profiles).map_err(|_| EXIT_FAILURE)?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "{:<16} {:>10} {:>10} {:>12}",
        "food", "g/cm3", "height cm", "kcal/100g"
    );
    for profile in knowledge.profiles() {
        println!(
            "{:<16} {:>10.2} {:>10.1} {:>12.1}",
            profile.kind.name(),
            profile.density_g_per_cm3,
            profile.assumed_height_cm,
            profile.kcal_per_100g
        );
    }
    Ok(())
}

fn run_schema() -> Result<(), i32> {
    let schema = schemars::schema_for!(ImageResult);
    let rendered = serde_json::to_string_pretty(&schema).map_err(|_| EXIT_FAILURE)?;
    println!("{rendered}");
    Ok(())
}

fn run_config(args: ConfigArgs) -> Result<(), i32> {
    if args.init {
        let path = PlatecalConfig::default().save().map_err(|err| {
            eprintln!("Error: {err}");
            EXIT_FAILURE
        })?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    if let Some(path) = PlatecalConfig::config_file_path() {
        println!("# {}", path.display());
    }
    let rendered = toml::to_string_pretty(&PlatecalConfig::load()).map_err(|err| {
        eprintln!("Error: {err}");
        EXIT_FAILURE
    })?;
    print!("{rendered}");
    Ok(())
}

fn main() {
    init_logging();
    let matches = Cli::command().color(clap_color()).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let result = match cli.command {
        Some(Commands::Analyze(args)) => run_analyze(args, cli.no_color),
        Some(Commands::Foods(args)) => run_foods(args),
        Some(Commands::Schema) => run_schema(),
        Some(Commands::Config(args)) => run_config(args),
        None => Ok(()),
    };
    if let Err(code) = result {
        std::process::exit(code);
    }
}
