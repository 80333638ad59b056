//! ocrlayout CLI - layout-preserving text from OCR output

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use ocrlayout::ingest::{self, ReadResult};
use ocrlayout::{LayoutOptions, OcrLayout, Page, PageSelection, Quad, RowAnchor};

#[derive(Parser)]
#[command(name = "ocrlayout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild plain text layout from OCR fragments", long_about = None)]
struct Cli {
    /// Input JSON file (page list, or a read response with --read-result)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct LayoutArgs {
    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// Treat the input as a line-level OCR read response
    #[arg(long, global = true)]
    read_result: bool,

    /// Page boundary polygons (document-analysis block list) for --read-result
    #[arg(long, value_name = "FILE", global = true, requires = "read_result")]
    boundaries: Option<PathBuf>,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long, global = true)]
    pages: Option<String>,

    /// Seed for reproducible clustering
    #[arg(long, env = "OCRLAYOUT_SEED", global = true)]
    seed: Option<u64>,

    /// Anchor rows to their first fragment instead of the previous one
    #[arg(long, global = true)]
    row_start: bool,

    /// Mark failed pages instead of aborting
    #[arg(long, global = true)]
    lenient: bool,

    /// Reconstruct pages one at a time
    #[arg(long, global = true)]
    sequential: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct the document text
    Text {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show page and fragment counts
    Info {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Text { input }) => cmd_text(&input, &cli.layout),
        Some(Commands::Info { input }) => cmd_info(&input, &cli.layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_text(&input, &cli.layout)
            } else {
                println!("{}", "Usage: ocrlayout <FILE> [OPTIONS]".yellow());
                println!("       ocrlayout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_pages(input: &Path, args: &LayoutArgs) -> Result<Vec<Page>, Box<dyn std::error::Error>> {
    if !args.read_result {
        return Ok(ingest::read_pages_file(input)?);
    }

    let response = ReadResult::from_json(&fs::read_to_string(input)?)?;
    let boundaries: BTreeMap<u32, Quad> = match &args.boundaries {
        Some(path) => ingest::read_boundaries_json(&fs::read_to_string(path)?)?,
        None => BTreeMap::new(),
    };
    log::debug!(
        "read response with {} pages, {} boundaries",
        response.read_results.len(),
        boundaries.len()
    );
    Ok(response.into_pages(&boundaries)?)
}

fn layout_options(args: &LayoutArgs) -> Result<LayoutOptions, Box<dyn std::error::Error>> {
    let mut options = LayoutOptions::new().with_parallel(!args.sequential);

    if let Some(pages) = &args.pages {
        options = options.with_pages(PageSelection::parse(pages)?);
    }
    if let Some(seed) = args.seed {
        options = options.with_seed(seed);
    }
    if args.row_start {
        options = options.with_row_anchor(RowAnchor::RowStart);
    }
    if args.lenient {
        options = options.lenient();
    }

    Ok(options)
}

fn cmd_text(input: &Path, args: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let pages = load_pages(input, args)?;
    let text = OcrLayout::new()
        .with_options(layout_options(args)?)
        .reconstruct_document(&pages)?;

    if let Some(path) = &args.output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_info(input: &Path, args: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let pages = load_pages(input, args)?;
    let fragments: usize = pages.iter().map(Page::fragment_count).sum();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "=".repeat(40));
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), pages.len());
    println!("{}: {}", "Fragments".bold(), fragments);
    println!();

    for page in &pages {
        let status = if page.is_empty() {
            "empty".yellow()
        } else {
            "text".green()
        };
        println!(
            "  page {:>4}: {:>5} fragments ({})",
            page.number,
            page.fragment_count(),
            status
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "ocrlayout".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Layout-preserving text reconstruction for OCR output");
}
