//! Command-line front end for the impasto processing engine.
//!
//! Single-shot operations (`filter`, `histogram`) call the pure pixel
//! functions directly. The `previews` command renders every filter through
//! the cached engine, and `list` talks to the image library service.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use impasto_engine::{LibraryClient, ProcessingEngine, TaskGateway};
use impasto_filters::{Channel, FilterKind, RgbaImage};
use impasto_service::{DEFAULT_BASE_URL, HttpImageService};

#[derive(Parser)]
#[command(name = "impasto-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a filter to an image file.
    Filter {
        /// Input image path.
        input: PathBuf,
        /// Filter to apply: oil-painting, grayscale, dramatic, or warm.
        #[arg(long)]
        filter: FilterKind,
        /// Output path; defaults to the input name with a filter suffix.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a channel histogram summary, or the full buckets as JSON.
    Histogram {
        /// Input image path.
        input: PathBuf,
        /// Channel to count: red, green, or blue.
        #[arg(long, default_value = "red")]
        channel: Channel,
        /// Print all 256 bucket counts as a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// Render previews of every filter into a directory.
    Previews {
        /// Input image path.
        input: PathBuf,
        /// Directory the previews are written to.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// List the records stored in the image library service.
    List {
        /// Base URL of the service API.
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Filter {
            input,
            filter,
            output,
        } => run_filter(&input, filter, output),
        Command::Histogram {
            input,
            channel,
            json,
        } => run_histogram(&input, channel, json),
        Command::Previews { input, out_dir } => run_previews(&input, &out_dir),
        Command::List { base_url } => run_list(base_url),
    }
}

fn load_rgba(path: &Path) -> Result<RgbaImage, Box<dyn Error>> {
    Ok(image::open(path)?.to_rgba8())
}

fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("image")
}

fn run_filter(
    input: &Path,
    filter: FilterKind,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let image = load_rgba(input)?;
    let filtered = impasto_filters::apply(&image, filter);
    let output = output.unwrap_or_else(|| {
        input.with_file_name(format!("{}-{}.png", file_stem(input), filter.slug()))
    });
    filtered.save(&output)?;
    println!("{}", output.display());
    Ok(())
}

fn run_histogram(input: &Path, channel: Channel, json: bool) -> Result<(), Box<dyn Error>> {
    let image = load_rgba(input)?;
    let histogram = impasto_filters::channel_histogram(&image, channel);
    if json {
        println!("{}", serde_json::to_string(&histogram.buckets()[..])?);
    } else {
        let occupied = histogram.buckets().iter().filter(|&&count| count > 0).count();
        println!(
            "{channel}: {} pixels, peak bucket {}, {occupied}/256 buckets occupied",
            histogram.total(),
            histogram.peak(),
        );
    }
    Ok(())
}

fn run_previews(input: &Path, out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let image = Arc::new(load_rgba(input)?);
    std::fs::create_dir_all(out_dir)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let engine = ProcessingEngine::new(TaskGateway::new(runtime.handle().clone()));

    // Submit all four before waiting so the pool works them in parallel.
    let tickets: Vec<_> = FilterKind::ALL
        .iter()
        .map(|&kind| (kind, engine.apply_filter(&image, kind)))
        .collect();
    for (kind, ticket) in tickets {
        let filtered = ticket.blocking_wait()?;
        let path = out_dir.join(format!("{}-{}.png", file_stem(input), kind.slug()));
        filtered.save(&path)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn run_list(base_url: String) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let client = LibraryClient::new(
        TaskGateway::new(runtime.handle().clone()),
        Arc::new(HttpImageService::new(base_url)),
    );
    let records = client.fetch_images().blocking_wait()?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
