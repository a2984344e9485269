// SPDX-License-Identifier: MIT

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use text2bpmn::nlp::annotator::{Annotator, RemoteAnnotator, StaticAnnotator};
use text2bpmn::nlp::inflect::EnglishInflector;
use text2bpmn::nlp::spacy::SpacyDoc;
use text2bpmn::process::extractor::{Engine, ProcessExtractor};
use text2bpmn::process::markers::MarkerTables;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract process elements from a description
    Extract {
        /// The process description
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the description from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Use a pre-computed spaCy JSON annotation instead of the annotation service
        #[arg(short, long)]
        annotation: Option<PathBuf>,

        /// Marker tables YAML (defaults to $MARKERS_FILE or the built-in tables)
        #[arg(short, long)]
        markers: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the classified trigger list of an annotated document
    Triggers {
        /// spaCy JSON annotation
        #[arg(short, long)]
        annotation: PathBuf,

        /// Marker tables YAML
        #[arg(short, long)]
        markers: Option<PathBuf>,
    },
    /// Run the HTTP service
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Directory with the web frontend
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Marker tables YAML
        #[arg(short, long)]
        markers: Option<PathBuf>,
    },
}

fn load_markers(path: Option<PathBuf>) -> anyhow::Result<MarkerTables> {
    let path = path.or_else(|| std::env::var("MARKERS_FILE").ok().map(PathBuf::from));
    match path {
        Some(path) => {
            log::info!("Loading marker tables from {}", path.display());
            MarkerTables::load(&path)
                .with_context(|| format!("Failed to load marker tables from {}", path.display()))
        }
        None => Ok(MarkerTables::default()),
    }
}

fn load_annotation(path: &Path) -> anyhow::Result<SpacyDoc> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    SpacyDoc::from_json(&content).with_context(|| format!("Invalid annotation in {}", path.display()))
}

fn engine(markers: Option<PathBuf>) -> anyhow::Result<Engine> {
    Ok(Engine::new(
        load_markers(markers)?,
        Arc::new(EnglishInflector::new()),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Extract {
            text,
            file,
            annotation,
            markers,
            pretty,
        } => {
            let text = match (text, file) {
                (Some(text), _) => Some(text),
                (None, Some(file)) => Some(
                    std::fs::read_to_string(&file)
                        .with_context(|| format!("Failed to read {}", file.display()))?,
                ),
                (None, None) => None,
            };

            let (annotator, text): (Arc<dyn Annotator>, String) = match annotation {
                Some(path) => {
                    let spacy = load_annotation(&path)?;
                    let text = text.unwrap_or_else(|| spacy.text.clone());
                    (Arc::new(StaticAnnotator::new(spacy.into_document()?)), text)
                }
                None => match text {
                    Some(text) => (Arc::new(RemoteAnnotator::from_env()?), text),
                    None => bail!("Provide --text, --file or --annotation"),
                },
            };

            let extractor = ProcessExtractor::new(annotator, engine(markers)?);
            let elements = extractor.try_extract_process(&text).await?;
            log::info!("Extracted {} elements", elements.len());

            let output = if pretty {
                serde_json::to_string_pretty(&elements)?
            } else {
                serde_json::to_string(&elements)?
            };
            println!("{}", output);
        }
        Commands::Triggers {
            annotation,
            markers,
        } => {
            let doc = load_annotation(&annotation)?.into_document()?;
            let triggers = engine(markers)?.classify(&doc);

            for trigger in triggers {
                let token = doc.token(trigger.verb);
                println!(
                    "{:<24} {:>4}  {}{}",
                    trigger.category.to_string(),
                    trigger.verb,
                    token.text,
                    if trigger.implicit { " (implicit)" } else { "" }
                );
            }
        }
        Commands::Serve {
            port,
            static_dir,
            markers,
        } => {
            let annotator = RemoteAnnotator::from_env()?;
            log::info!("Using annotation service at {}", annotator.url());

            let extractor = ProcessExtractor::new(Arc::new(annotator), engine(markers)?);
            text2bpmn::server::serve(port, Arc::new(extractor), static_dir)
                .await
                .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;
        }
    }

    Ok(())
}
