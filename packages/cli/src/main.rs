#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line toolchain for the e-waste bin recommender.
//!
//! Builds the artifacts the server loads at startup (the bin registry and
//! the text model), runs one-off lookups against them, and starts the API
//! server.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use ewaste_bins::{BinRegistry, DEFAULT_REGISTRY_PATH, artifact, dataset};
use ewaste_classifier::naive_bayes::NaiveBayesModel;
use ewaste_classifier::train::{self, DEFAULT_ALPHA};
use ewaste_classifier::{DEFAULT_MODEL_PATH, WasteClassifier};
use ewaste_server::{ServerConfig, run_server};

#[derive(Parser)]
#[command(name = "ewaste_cli", about = "E-waste bin recommender toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the bin registry artifact from a CSV dataset
    BuildRegistry {
        /// CSV with `bin_id,address,latitude,longitude,category` columns
        #[arg(long)]
        input: PathBuf,
        /// Where to write the registry artifact
        #[arg(long, default_value = DEFAULT_REGISTRY_PATH)]
        output: PathBuf,
    },
    /// Train the text classifier from a labelled CSV
    TrainClassifier {
        /// CSV with `text,label` columns
        #[arg(long)]
        input: PathBuf,
        /// Where to write the model
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        output: PathBuf,
        /// Additive smoothing
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,
    },
    /// Find the nearest bin for a category and print it as JSON
    Nearest {
        /// Waste category
        #[arg(long)]
        category: String,
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Registry artifact to query
        #[arg(long, default_value = DEFAULT_REGISTRY_PATH)]
        registry: PathBuf,
    },
    /// Classify a waste description and print the result as JSON
    Classify {
        /// Free-text description
        #[arg(long)]
        text: String,
        /// Text model to use
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
    },
    /// Start the API server (configured through environment variables)
    Serve,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildRegistry { input, output } => build_registry(&input, &output)?,
        Commands::TrainClassifier {
            input,
            output,
            alpha,
        } => train_classifier(&input, &output, alpha)?,
        Commands::Nearest {
            category,
            lat,
            lng,
            registry,
        } => {
            let registry = BinRegistry::load(&registry);
            let result = registry.find_nearest_bin(&category, lat, lng);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Classify { text, model } => {
            let classifier = WasteClassifier::load(&model);
            println!("{}", serde_json::to_string_pretty(&classifier.classify(&text))?);
        }
        Commands::Serve => {
            actix_web::rt::System::new().block_on(run_server(ServerConfig::from_env()))?;
        }
    }

    Ok(())
}

/// Reads the bin dataset, validates it, and writes the registry artifact.
fn build_registry(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let records = dataset::read_csv(input)?;
    let registry = BinRegistry::from_records(records)?;

    for category in registry.categories() {
        let count = registry.get(category).map_or(0, ewaste_bins::BinIndex::len);
        log::info!("{category}: {count} bins");
    }

    artifact::write(output, &registry.to_artifact())?;
    log::info!(
        "Wrote {} bins across {} categories to {}",
        registry.bin_count(),
        registry.len(),
        output.display()
    );
    Ok(())
}

/// Trains the naive Bayes text model and writes it as JSON.
fn train_classifier(
    input: &Path,
    output: &Path,
    alpha: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let examples = train::read_labeled_csv(input)?;
    let model: NaiveBayesModel = train::train(&examples, alpha)?;
    model.save(output)?;
    log::info!("Text model written to {}", output.display());
    Ok(())
}
