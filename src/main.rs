//! Main module for the recipe chatbot CLI (`recipes`).
//!
//! Parses the command line, loads `config.yaml`, and dispatches to one of the
//! subcommands.
//!
//! # Examples
//!
//! Writing the default configuration:
//!
//! ```sh
//! recipes init
//! ```
//!
//! Building the index once the data files are in place, then chatting:
//!
//! ```sh
//! recipes build-index
//! recipes chat --html transcript.html
//! recipes ask "garlic pasta" -k 5
//! ```

use awful_recipes::{
    commands::{Cli, Commands},
    config::{self, RecipeConfig},
    config_dir,
    corpus::CorpusStore,
    dialogue::{ConversationState, DialogueEngine, UserInput},
    encoder::Encoder,
    index::RecipeIndex,
    pretty, render,
};
use clap::Parser;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use std::{
    error::Error,
    fs,
    io::{self, Write},
    path::Path,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

static TRACING: OnceCell<()> = OnceCell::new();

const CHAT_TITLE: &str = "Recipe Chatbot 🍝";

fn main() -> Result<(), Box<dyn Error>> {
    TRACING.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(io::stderr)
            .init();
    });
    run()
}

/// Parses the command line, loads configuration, and executes the subcommand.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the subcommand fails
/// during startup (missing data files, misaligned index, unavailable model).
fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config_dir()?.join("config.yaml"),
    };

    if let Commands::Init = cli.command {
        debug!("Initializing configuration");
        return init(&config_path);
    }

    debug!("Loading config from: {}", config_path.display());
    let recipe_config = config::load_config(
        config_path
            .to_str()
            .ok_or("config path is not valid UTF-8")?,
    )?;
    debug!("Config loaded: {:?}", recipe_config);

    match cli.command {
        Commands::Chat { html } => chat(&recipe_config, html.as_deref()),
        Commands::Ask { query, k } => ask(&recipe_config, &query, k),
        Commands::BuildIndex => build_index(&recipe_config),
        Commands::Init => Ok(()),
    }
}

/// Writes a default `config.yaml` next to a `data/` directory for the recipe files.
///
/// An existing config is left untouched.
fn init(config_path: &Path) -> Result<(), Box<dyn Error>> {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    let base = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let data_dir = base.join("data");
    info!("Creating data directory: {}", data_dir.display());
    fs::create_dir_all(&data_dir)?;

    info!("Creating config file: {}", config_path.display());
    let config = RecipeConfig::with_data_dir(&data_dir);
    fs::write(config_path, serde_yaml::to_string(&config)?)?;

    println!("Wrote {}", config_path.display());
    println!(
        "Place recipes.json and corpus.json in {}, then run `recipes build-index`.",
        data_dir.display()
    );
    Ok(())
}

/// Interactive session: one line in, the new transcript messages out.
fn chat(config: &RecipeConfig, html: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let retriever = awful_recipes::open_retriever(config)?;
    let engine = DialogueEngine::new(retriever).with_top_k(config.dialogue_top_k);

    pretty::print_banner(CHAT_TITLE, config.recipe_of_the_day.as_ref())?;
    let mut state = ConversationState::new();
    pretty::print_blocks(&render::render(&state.transcript))?;
    let mut shown = state.transcript.len();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        let input = match line.trim() {
            "exit" => break,
            "/ingredients" => UserInput::CheckIngredients,
            "/steps" => UserInput::CheckCookingSteps,
            _ => UserInput::from(line),
        };

        match engine.submit(&state, &input) {
            Ok(next) => {
                state = next;
                pretty::print_blocks(&render::render(&state.transcript[shown..]))?;
                shown = state.transcript.len();
            }
            Err(err) => eprintln!("Something went wrong: {err}"),
        }
    }

    if let Some(path) = html {
        fs::write(path, render::render_page(CHAT_TITLE, &state.transcript))?;
        println!("Transcript written to {}", path.display());
    }
    Ok(())
}

/// Prints the closest recipe titles with their squared distances.
fn ask(config: &RecipeConfig, query: &str, k: Option<usize>) -> Result<(), Box<dyn Error>> {
    let retriever = awful_recipes::open_retriever(config)?;
    let k = k.unwrap_or(config.search_top_k);
    let matches = retriever.find_scored(query, k)?;

    if matches.is_empty() {
        println!("No recipe within distance {}.", retriever.threshold());
        return Ok(());
    }
    for (rank, scored) in matches.iter().enumerate() {
        println!(
            "{}. {} (distance {:.4})",
            rank + 1,
            scored.recipe.title,
            scored.distance
        );
    }
    Ok(())
}

/// Embeds every corpus text and writes the index plus its manifest.
fn build_index(config: &RecipeConfig) -> Result<(), Box<dyn Error>> {
    let corpus = CorpusStore::load(&config.recipes_path, &config.corpus_path)?;
    let encoder = awful_recipes::load_encoder(config)?;
    info!(
        "Encoding {} corpus texts with {}",
        corpus.len(),
        config.model_id
    );

    let bar = ProgressBar::new(corpus.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}",
    )?);
    let vectors = corpus
        .corpus_text()
        .par_iter()
        .progress_with(bar.clone())
        .map(|text| encoder.encode(text))
        .collect::<awful_recipes::error::Result<Vec<_>>>()?;
    bar.finish_with_message("encoded");

    let mut index = RecipeIndex::build(config.index_kind, encoder.dimension(), vectors)?;
    if let Some(parent) = config.index_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let manifest = index.save(&config.index_path, &corpus, &config.model_id)?;

    println!(
        "Wrote {:?} index of {} vectors (dimension {}) to {}",
        manifest.kind,
        manifest.count,
        manifest.dimension,
        config.index_path.display()
    );
    Ok(())
}
