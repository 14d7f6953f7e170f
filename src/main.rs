//! Triez - Main entrypoint.
//!
//! Loads a word list into a trie and runs lookups, prefix and suffix
//! enumeration, and fuzzy correction queries against it. Also validates and
//! generates configuration files.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use triez_lib::config::{LogConfig, TriezConfig};
use triez_lib::data_structures::trie::{Trie, TrieStats};
use triez_lib::error::{
    get_error_reporting, set_error_reporter, ErrorContext, TracingErrorReporter, TriezError,
    TriezResult,
};

/// Command line arguments for triez.
#[derive(Parser, Debug)]
#[clap(name = "triez", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Load a word list and query it
    Query {
        /// Word list, one key per line
        #[clap(short, long, value_parser)]
        words: PathBuf,

        /// Look up this exact key
        #[clap(long)]
        get: Option<String>,

        /// List stored keys that are prefixes of this key
        #[clap(long)]
        prefixes: Option<String>,

        /// List stored keys starting with this prefix
        #[clap(long)]
        suffixes: Option<String>,

        /// List stored keys close to this key
        #[clap(long)]
        correct: Option<String>,

        /// Maximum edit distance for --correct
        #[clap(short, long)]
        distance: Option<usize>,

        /// Maximum number of prefix or suffix results
        #[clap(short, long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Results of one `query` invocation.
#[derive(Debug, Default, Serialize)]
struct QueryReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Option<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prefixes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suffixes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    corrections: Option<Vec<String>>,
    stats: Option<TrieStats>,
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> TriezResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_file(true);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| TriezError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Builds a trie from a word list; each word maps to its line number.
fn load_words(path: &Path, config: &TriezConfig) -> TriezResult<Trie<usize>> {
    let contents = std::fs::read_to_string(path)?;
    let mut trie = Trie::with_config(config.trie.to_trie_config());
    let words = contents
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, word)| !word.is_empty())
        .map(|(line, word)| (word, line + 1));
    let inserted = trie.add_all(words)?;
    info!(
        path = %path.display(),
        inserted,
        nodes = trie.node_count(),
        "word list loaded"
    );
    Ok(trie)
}

#[allow(clippy::too_many_arguments)]
fn run_query(
    config: &TriezConfig,
    words: &Path,
    get: Option<String>,
    prefixes: Option<String>,
    suffixes: Option<String>,
    correct: Option<String>,
    distance: Option<usize>,
    limit: Option<usize>,
    json: bool,
) -> TriezResult<()> {
    let trie = load_words(words, config)?;
    let limit = limit.or(config.query.result_limit);

    let mut report = QueryReport {
        stats: Some(trie.stats()),
        ..QueryReport::default()
    };
    if let Some(key) = get {
        report.value = Some(trie.get(key.as_str())?.map(|line| *line));
    }
    if let Some(key) = prefixes {
        report.prefixes = Some(trie.prefixes(key.as_str(), limit)?);
    }
    if let Some(prefix) = suffixes {
        report.suffixes = Some(trie.suffixes(prefix.as_str(), limit)?);
    }
    if let Some(key) = correct {
        let max_distance = distance.unwrap_or(config.query.max_distance);
        let mut found: Vec<String> = trie
            .corrections(key.as_str(), Some(max_distance))?
            .into_iter()
            .collect();
        found.sort();
        report.corrections = Some(found);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(value) = report.value {
        match value {
            Some(line) => println!("found at line {line}"),
            None => println!("not found"),
        }
    }
    for (title, keys) in [
        ("prefixes", &report.prefixes),
        ("suffixes", &report.suffixes),
        ("corrections", &report.corrections),
    ] {
        if let Some(keys) = keys {
            println!("{title} ({}):", keys.len());
            for key in keys {
                println!("  {key}");
            }
        }
    }
    Ok(())
}

fn gen_config(output: &Path) -> TriezResult<()> {
    info!("Generating default configuration");
    let default_config = TriezConfig::default();

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&default_config)
        .map_err(|e| TriezError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!("Default configuration written to {:?}", output);
    Ok(())
}

/// Main entry point for the application.
fn main() {
    let args = <Args as clap::Parser>::parse();

    let loaded = triez_lib::init(args.config.as_deref());
    let log = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    if let Err(e) = init_logging(&log) {
        eprintln!("{e}");
        process::exit(1);
    }
    set_error_reporter(Arc::new(TracingErrorReporter));
    info!(version = triez_lib::VERSION, "triez starting");

    let result = match args.command {
        Command::GenConfig { output } => gen_config(&output),
        Command::Validate => loaded
            .map(|_| info!("Configuration validated successfully")),
        Command::Query {
            words,
            get,
            prefixes,
            suffixes,
            correct,
            distance,
            limit,
            json,
        } => loaded.and_then(|config| {
            run_query(
                &config, &words, get, prefixes, suffixes, correct, distance, limit, json,
            )
        }),
    };

    if let Err(e) = result {
        get_error_reporting().report(ErrorContext::new(e, "triez"));
        process::exit(1);
    }
}
