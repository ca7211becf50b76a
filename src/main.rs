use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ballot_measures::{charts, export, join, logger, pipeline, utils, HttpFetcher, ScrapeConfig};

#[derive(Parser)]
#[command(name = "ballot-measures")]
#[command(about = "Ballotpedia ballot measure scraper and chart generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the configured years, join the tables and render charts
    Run {
        /// First election year to scrape
        #[arg(long, default_value_t = pipeline::DEFAULT_FROM_YEAR)]
        from_year: u32,
        /// Last election year to scrape (inclusive)
        #[arg(long, default_value_t = pipeline::DEFAULT_TO_YEAR)]
        to_year: u32,
        /// Site root the yearly pages hang off
        #[arg(long, default_value = pipeline::DEFAULT_BASE_URL)]
        base_url: String,
        /// Directory for the rendered SVG charts
        #[arg(long, default_value = "charts")]
        charts_dir: PathBuf,
        /// Also write the raw and joined tables as CSV into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
        /// Quiet mode - suppress the run summary
        #[arg(short, long)]
        quiet: bool,
    },
    /// Clean generated files (charts/ and data/ directories)
    Clean {
        /// Directory holding the rendered charts
        #[arg(long, default_value = "charts")]
        charts_dir: PathBuf,
        /// Directory holding the CSV exports
        #[arg(long, default_value = "data")]
        export_dir: PathBuf,
    },
}

fn run(
    from_year: u32,
    to_year: u32,
    base_url: String,
    charts_dir: &Path,
    export_dir: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let config = ScrapeConfig {
        base_url,
        from_year,
        to_year,
    };
    let fetcher = HttpFetcher::new().context("build HTTP client")?;

    let raw = pipeline::scrape_all(&fetcher, &config)?;
    let records = join::analyze(&raw)?;
    if !quiet {
        println!(
            "Joined {} measures for {}-{} ({} readability rows, {} contribution rows)",
            records.len(),
            config.from_year,
            config.to_year,
            raw.readability.len(),
            raw.contributions.len()
        );
    }

    let written = charts::render_all(&records, charts_dir)?;
    if let Some(dir) = export_dir {
        let exported = export::write_tables(&raw, &records, dir)?;
        if !quiet {
            for path in &exported {
                println!("  wrote {}", utils::osc8_file_link(path, &path.display().to_string()));
            }
        }
    }
    if !quiet {
        for path in &written {
            println!("  wrote {}", utils::osc8_file_link(path, &path.display().to_string()));
        }
        println!("Done!");
    }
    Ok(())
}

fn run_clean(charts_dir: &Path, export_dir: &Path) -> Result<()> {
    println!("Cleaning generated files...");
    for dir in [charts_dir, export_dir] {
        if dir.exists() {
            fs::remove_dir_all(dir).with_context(|| format!("remove {}", dir.display()))?;
            println!("  Removed {}/", dir.display());
        }
    }
    println!("Clean complete!");
    Ok(())
}

fn main() -> Result<()> {
    logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            from_year,
            to_year,
            base_url,
            charts_dir,
            export_dir,
            quiet,
        } => run(
            from_year,
            to_year,
            base_url,
            &charts_dir,
            export_dir.as_deref(),
            quiet,
        ),
        Commands::Clean {
            charts_dir,
            export_dir,
        } => run_clean(&charts_dir, &export_dir),
    }
}
