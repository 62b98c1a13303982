use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use labelscan_core::{
    recognizer_from_env, CatalogClient, Language, RateLimitedClient, Resolution, ScanConfig,
    ScanSession, SessionState,
};

#[derive(Parser)]
#[command(name = "labelscan")]
#[command(about = "Flag additives in food products by barcode, name, or label photo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a product by barcode or name and flag additives
    Lookup {
        /// Barcode or product name; a trailing "in <country>" biases results
        query: String,
        /// Preferred ingredient language (en, fr, de)
        #[arg(long, default_value = "en")]
        language: String,
        /// Prefer products sold in this country
        #[arg(long)]
        country: Option<String>,
        /// Pick search candidate N (1-based) instead of prompting
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Recognize a label photo and flag additives
    Scan {
        /// Path to the label image
        image: PathBuf,
        /// Recognition language (en, fr, de)
        #[arg(long, default_value = "en")]
        language: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lookup {
            query,
            language,
            country,
            pick,
        } => {
            let language = parse_language(&language)?;
            lookup(&query, language, country, pick).await?;
        }
        Commands::Scan { image, language } => {
            let language = parse_language(&language)?;
            scan(&image, language).await?;
        }
    }

    Ok(())
}

fn parse_language(raw: &str) -> Result<Language> {
    raw.parse::<Language>().map_err(anyhow::Error::msg)
}

async fn lookup(
    query: &str,
    language: Language,
    country: Option<String>,
    pick: Option<usize>,
) -> Result<()> {
    let config = ScanConfig::from_env();
    let http = Arc::new(RateLimitedClient::new().context("Failed to build HTTP client")?);
    let catalog = CatalogClient::new(http, &config);

    let mut session = ScanSession::new(catalog, config);
    session.set_language(language);
    session.set_country(country);

    println!("Looking up \"{}\"...", query.trim());
    session.submit(query).await;

    if let SessionState::AwaitingSelection(candidates) = session.state() {
        for (i, candidate) in candidates.iter().enumerate() {
            let name = if candidate.name.is_empty() {
                "(unnamed product)"
            } else {
                &candidate.name
            };
            if candidate.countries.is_empty() {
                println!("{}. {} [{}]", i + 1, name, candidate.code);
            } else {
                println!(
                    "{}. {} [{}] - {}",
                    i + 1,
                    name,
                    candidate.code,
                    candidate.countries
                );
            }
        }

        let choice = match pick {
            Some(n) => n,
            None => prompt_for_choice(candidates.len())?,
        };
        if choice == 0 || choice > candidates.len() {
            bail!("Selection out of range: {}", choice);
        }

        session.select(choice - 1).await;
    }

    render_final_state(session.state());
    Ok(())
}

async fn scan(image: &PathBuf, language: Language) -> Result<()> {
    let bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("Failed to read {}", image.display()))?;

    let recognizer = recognizer_from_env()?;
    tracing::debug!(engine = recognizer.engine_name(), "recognizing label");

    let text = recognizer.recognize(&bytes, language).await?;
    let config = ScanConfig::from_env();
    let warnings = labelscan_core::find_warnings(&text, &config.keywords);

    println!("Ingredients:");
    println!("{}", text.trim());
    render_warnings(&warnings);
    Ok(())
}

fn prompt_for_choice(count: usize) -> Result<usize> {
    print!("Select a product [1-{}]: ", count);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read selection")?;

    line.trim()
        .parse::<usize>()
        .with_context(|| format!("Not a number: {}", line.trim()))
}

fn render_final_state(state: &SessionState) {
    match state {
        SessionState::Resolved(resolution) => render_resolution(resolution),
        SessionState::NotFound => println!("No ingredient info found for this product."),
        SessionState::Failed(detail) => {
            tracing::error!(detail = %detail, "resolution failed");
            println!("Product not found or API error.");
        }
        // Loading can't outlive submit/select; Idle means blank input.
        other => tracing::debug!(?other, "nothing to display"),
    }
}

fn render_resolution(resolution: &Resolution) {
    if !resolution.name.is_empty() {
        println!("{} [{}]", resolution.name, resolution.code);
    }
    println!("Ingredients:");
    println!("{}", resolution.ingredient_text);
    render_warnings(
        &resolution
            .warnings
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
    );
}

fn render_warnings(warnings: &[&str]) {
    println!("Warnings:");
    if warnings.is_empty() {
        println!("  (none)");
    } else {
        for warning in warnings {
            println!("  ⚠ {}", warning);
        }
    }
}
