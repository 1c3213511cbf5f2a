//! untable CLI - HTML table scraping and round-wise results dashboard

mod dash;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untable::{ExportOptions, RoundData, ScrapeOutcome, Untable};

/// Round-wise assembly results page this tool was built around.
const DEFAULT_URL: &str = "https://results.eci.gov.in/AcResultGenDecNew2023/RoundwiseS2961.htm?ac=61";

/// Base filename for generated CSV/XLSX files.
const DEFAULT_BASE: &str = "eci_election_results";

#[derive(Parser)]
#[command(name = "untable")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract HTML tables to CSV and XLSX", long_about = None)]
struct Cli {
    /// Target URL (defaults to the built-in results page)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Base filename for output files
    #[arg(short, long, value_name = "BASE")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a results page and write every table to CSV and XLSX
    Scrape {
        /// Target URL
        #[arg(value_name = "URL", default_value = DEFAULT_URL)]
        url: String,

        /// Base filename for output files
        #[arg(short, long, value_name = "BASE", default_value = DEFAULT_BASE)]
        output: PathBuf,

        /// Skip the browser fallback and use the HTTP session only
        #[arg(long)]
        no_browser: bool,

        /// Request timeout in seconds
        #[arg(long, default_value = "15")]
        timeout: u64,
    },

    /// Extract tables from a local HTML file and write CSV and XLSX
    Extract {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Base filename for output files
        #[arg(short, long, value_name = "BASE", default_value = DEFAULT_BASE)]
        output: PathBuf,
    },

    /// Show what would be extracted from a local HTML file
    Info {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Browse a round-wise results CSV in a terminal dashboard
    Dash {
        /// Rounds CSV with Round, Candidate, Party, Total, Current Round
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
        Some(Commands::Scrape {
            url,
            output,
            no_browser,
            timeout,
        }) => cmd_scrape(&url, &output, no_browser, timeout),
        Some(Commands::Extract { input, output }) => cmd_extract(&input, &output),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Dash { input }) => cmd_dash(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Bare invocation: the original hardcoded pipeline.
            let url = cli.url.unwrap_or_else(|| DEFAULT_URL.to_string());
            let output = cli.output.unwrap_or_else(|| PathBuf::from(DEFAULT_BASE));
            cmd_scrape(&url, &output, false, 15)
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_scrape(
    url: &str,
    output: &Path,
    no_browser: bool,
    timeout: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "untable scraper".cyan().bold());
    println!("{}", "─".repeat(50).dimmed());
    println!("{}: {}", "Target".bold(), url);

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Fetching and extracting tables...");
    let mut pipeline = Untable::new().with_timeout(Duration::from_secs(timeout));
    if no_browser {
        pipeline = pipeline.session_only();
    }
    let outcome = pipeline.scrape(url)?;
    pb.inc(1);

    pb.set_message("Writing output files...");
    let report = untable::write_all(&outcome.tables, &ExportOptions::new(output));
    pb.inc(1);
    pb.finish_with_message("Done!");

    print_summary(&outcome);
    print_report(&report);

    if report.is_complete() {
        println!("\n{}", "Scrape finished successfully".green().bold());
    } else {
        println!("\n{}", "Scrape finished with write failures".yellow().bold());
    }
    Ok(())
}

fn cmd_extract(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = Untable::new().extract_file(input)?;
    if outcome.tables.is_empty() {
        println!("{}", "No tables found in the document".yellow());
        return Ok(());
    }

    let report = untable::write_all(&outcome.tables, &ExportOptions::new(output));
    print_summary(&outcome);
    print_report(&report);
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = Untable::new().extract_file(input)?;
    print_summary(&outcome);
    Ok(())
}

fn cmd_dash(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = RoundData::load(input)?;
    dash::run(data)
}

fn cmd_version() {
    println!("{} {}", "untable".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML table extraction to CSV and XLSX");
}

/// Human-readable summary of a scrape: table count, per-table shape,
/// headers, and a few sample rows.
fn print_summary(outcome: &ScrapeOutcome) {
    println!();
    println!("{}", "Data Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Source".bold(), outcome.capture.source);
    println!("{}: {}", "Fetched via".bold(), outcome.capture.method);
    println!("{}: {}", "Tables".bold(), outcome.table_count());

    for table in &outcome.tables {
        println!();
        println!("{}", format!("Table {}", table.source_index).green().bold());
        println!("  Rows: {}", table.row_count());
        println!("  Columns: {}", table.column_count());
        if table.has_header() {
            println!("  Headers: {}", preview_cells(&table.headers));
        }
        for row in table.sample(3) {
            println!("  {} {}", "│".dimmed(), preview_cells(row));
        }
    }
}

/// First few cells of a row, elided when longer.
fn preview_cells(cells: &[String]) -> String {
    const SHOWN: usize = 5;
    let mut preview = cells
        .iter()
        .take(SHOWN)
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(" | ");
    if cells.len() > SHOWN {
        preview.push_str(" | ...");
    }
    preview
}

fn print_report(report: &untable::ExportReport) {
    if !report.csv_files.is_empty() || report.workbook.is_some() {
        println!("\n{}", "Output files:".green().bold());
        for path in &report.csv_files {
            println!("  {} {}", "├─".dimmed(), path.display());
        }
        if let Some(ref path) = report.workbook {
            println!("  {} {}", "└─".dimmed(), path.display());
        }
    }
    for failure in &report.failures {
        eprintln!("{}: {}", "Write failed".red().bold(), failure);
    }
}
