use std::path::PathBuf;
use std::sync::Once;

use anyhow::Result;
use clap::{Parser, Subcommand};
use liushu_engine::{DictItem, Dictionary};
use serde::Serialize;

/// liushu dictionary tool: build and view dictionaries.
#[derive(Parser, Debug)]
#[command(name = "liushu-dict", version)]
#[command(about = "liushu dictionary tool: build and view dictionaries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a binary dictionary from TSV or JSON.
    ///
    /// Supports two input formats:
    /// - `tsv`: text\tcode\tweight\tcomment rows, `#` starts a comment
    /// - `json`: array of {text, code, weight, comment}
    ///
    /// Format is auto-detected from the file extension (.json is JSON, anything
    /// else TSV), or can be given with --format.
    Build {
        /// Input dictionary file (TSV or JSON)
        input: PathBuf,

        /// Output binary dictionary file
        #[arg(short, long, default_value = "dict.bin")]
        output: PathBuf,

        /// Input format: tsv or json (auto-detected from extension if omitted)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Search or dump dictionaries.
    ///
    /// Several dictionaries are merged in the given order; earlier ones win
    /// on duplicate words.
    View {
        /// Dictionary files to load (binary, JSON or TSV, auto-detected)
        #[arg(required = true)]
        dicts: Vec<PathBuf>,

        /// Code to search (prefix search, like the input engine)
        #[arg(short, long)]
        query: Option<String>,

        /// Search by word text instead of code
        #[arg(short, long)]
        text: bool,

        /// Only words whose code equals the query
        #[arg(short, long)]
        exact: bool,

        /// Show all entries (dump entire dictionary)
        #[arg(short, long)]
        all: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

static INIT_LOGGING: Once = Once::new();

fn init_logging() {
    INIT_LOGGING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    });
}

// --- build subcommand ---

fn run_build(input: PathBuf, output: PathBuf, format: Option<String>) -> Result<()> {
    let format =
        format
            .as_deref()
            .unwrap_or_else(|| match input.extension().and_then(|e| e.to_str()) {
                Some("json") => "json",
                _ => "tsv",
            });

    eprintln!("Building dictionary from {:?} (format: {})...", input, format);

    let dict = match format {
        "json" => Dictionary::build_from_json(&input)?,
        "tsv" => Dictionary::build_from_tsv(&input)?,
        other => anyhow::bail!("Unknown format: {}. Use 'tsv' or 'json'.", other),
    };

    eprintln!(
        "Saving {} words under {} codes to {:?}...",
        dict.word_count(),
        dict.len(),
        output
    );
    dict.save(&output)?;

    eprintln!("Done.");
    Ok(())
}

// --- view subcommand ---

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    mode: &'static str,
    results: &'a [DictItem],
    count: usize,
}

#[derive(Clone, Copy)]
enum SearchMode {
    Prefix,
    Exact,
    Text,
}

impl SearchMode {
    fn name(self) -> &'static str {
        match self {
            SearchMode::Prefix => "prefix",
            SearchMode::Exact => "exact",
            SearchMode::Text => "text",
        }
    }
}

fn run_view(
    dicts: Vec<PathBuf>,
    query: Option<String>,
    text: bool,
    exact: bool,
    all: bool,
    json: bool,
) -> Result<()> {
    eprintln!("Loading dictionaries...");
    let mut loaded = Vec::new();
    for path in &dicts {
        eprintln!("  Loading {:?}...", path);
        loaded.push(Dictionary::load_auto(path)?);
    }

    let Some(dict) = Dictionary::merge(loaded)? else {
        anyhow::bail!("no dictionary loaded");
    };
    eprintln!("Dictionary loaded: {:?}", dict);

    if all {
        let mut stdout = std::io::stdout().lock();
        let count = dict.dump_all(&mut stdout)?;
        eprintln!("({} entries total)", count);
        return Ok(());
    }

    let Some(query) = &query else {
        eprintln!("Nothing to do: pass --query or --all.");
        return Ok(());
    };

    let mode = if text {
        SearchMode::Text
    } else if exact {
        SearchMode::Exact
    } else {
        SearchMode::Prefix
    };
    let results = match mode {
        SearchMode::Prefix => dict.search(query),
        SearchMode::Exact => dict.exact_match(query),
        SearchMode::Text => dict.search_by_text(query),
    };

    if json {
        let response = SearchResponse {
            query,
            mode: mode.name(),
            results: &results,
            count: results.len(),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if results.is_empty() {
        eprintln!("No entries found for \"{}\" ({})", query, mode.name());
        return Ok(());
    }
    for item in &results {
        println!(
            "{}\t{}\t{}\t{}",
            item.text,
            item.code,
            item.weight,
            item.comment.as_deref().unwrap_or("")
        );
    }
    eprintln!("({} results)", results.len());
    Ok(())
}

// --- main ---

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            format,
        } => run_build(input, output, format),
        Commands::View {
            dicts,
            query,
            text,
            exact,
            all,
            json,
        } => run_view(dicts, query, text, exact, all, json),
    }
}
