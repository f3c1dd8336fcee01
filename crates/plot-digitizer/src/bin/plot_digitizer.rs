use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use plot_digitizer::core::RgbImage;
use plot_digitizer::{
    digitize, export, io, AxisDetector, AxisDetectorParams, DigitizeError, DigitizeJob, Rect,
};

#[derive(Parser, Debug)]
#[command(
    name = "plot-digitizer",
    version,
    about = "Extract (X, Y) data from a plot image"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Per-target log levels, e.g. `warn,plot_digitizer_trace=debug`.
    /// Overrides `-v`.
    #[arg(long, global = true, value_name = "DIRECTIVES")]
    log: Option<String>,

    /// Emit tracing spans as JSON (requires the `tracing` feature).
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Locate axis lines and ticks and print them as JSON.
    DetectAxes {
        /// Input image.
        #[arg(long)]
        image: PathBuf,
        /// Region around the X axis, `x,y,w,h`.
        #[arg(long, value_parser = parse_rect)]
        roi_x: Rect,
        /// Region around the Y axis, `x,y,w,h`.
        #[arg(long, value_parser = parse_rect)]
        roi_y: Rect,
        /// Crop the image to this plot region first, `x,y,w,h`.
        #[arg(long, value_parser = parse_rect)]
        crop: Option<Rect>,
    },
    /// Run a full digitizing job and write the series as CSV.
    Run {
        /// Input image.
        #[arg(long)]
        image: PathBuf,
        /// Job description (JSON).
        #[arg(long)]
        job: PathBuf,
        /// CSV output path; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also write every intermediate result as JSON.
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let parts: Vec<i32> = s
        .split(',')
        .map(|p| p.trim().parse::<i32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid rect `{s}`: {e}"))?;
    match parts.as_slice() {
        &[x, y, w, h] => Ok(Rect::new(x, y, w, h)),
        _ => Err(format!("expected `x,y,w,h`, got `{s}`")),
    }
}

fn verbosity_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) -> Result<(), String> {
    let directives = cli
        .log
        .clone()
        .unwrap_or_else(|| verbosity_level(cli.verbose).to_string().to_lowercase());
    // A logger may already be installed when embedded; keep going.
    let _ = tracing_log::LogTracer::init();
    plot_digitizer::init_tracing(cli.json_log, Some(&directives));
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) -> Result<(), String> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(verbosity_level(cli.verbose));
    if let Some(directives) = &cli.log {
        builder.parse_filters(directives);
    }
    builder.try_init().map_err(|e| e.to_string())?;
    if cli.json_log {
        log::warn!("--json-log needs the `tracing` feature; using plain output");
    }
    Ok(())
}

fn load_plot(image: &Path, crop: Option<Rect>) -> Result<RgbImage, DigitizeError> {
    let img = io::load_rgb(image)?;
    match crop {
        Some(rect) => Ok(img.view()?.crop(rect)),
        None => Ok(img),
    }
}

fn run(cli: Cli) -> Result<(), DigitizeError> {
    match cli.command {
        Command::DetectAxes {
            image,
            roi_x,
            roi_y,
            crop,
        } => {
            let img = load_plot(&image, crop)?;
            let detection =
                AxisDetector::new(AxisDetectorParams::default()).detect(&img.view()?, roi_x, roi_y);
            println!("{}", serde_json::to_string_pretty(&detection)?);
        }
        Command::Run {
            image,
            job,
            out,
            report,
        } => {
            let job: DigitizeJob = serde_json::from_reader(File::open(&job)?)?;
            let img = load_plot(&image, job.crop)?;
            let result = digitize(&img.view()?, &job)?;
            if result.series.is_empty() {
                log::warn!("no curve points found");
            }
            match out {
                Some(path) => {
                    export::write_csv(BufWriter::new(File::create(&path)?), &result.series)?;
                    log::info!("wrote {} rows to {}", result.series.len(), path.display());
                }
                None => export::write_csv(std::io::stdout().lock(), &result.series)?,
            }
            if let Some(path) = report {
                serde_json::to_writer_pretty(BufWriter::new(File::create(&path)?), &result)?;
                log::info!("wrote report to {}", path.display());
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli) {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
