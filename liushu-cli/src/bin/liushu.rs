use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use liushu_engine::Dictionary;
use liushu_im::config::Settings;
use liushu_im::{BufferHost, CompositionEngine, EngineConfig, KeyEvent, Matcher, MatcherManager};
use tracing::info;

/// liushu: compile formulas and try the input engine from a terminal.
#[derive(Parser, Debug)]
#[command(name = "liushu", version)]
#[command(about = "liushu input method: deploy formulas and try them in a terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile every configured formula into the target directory.
    Deploy,

    /// Search interactively. `*use <id>` switches formula, `*quit` exits.
    Repl {
        /// Search this dictionary (binary, JSON or TSV) instead of the deployed formulas
        #[arg(short, long)]
        dict: Option<PathBuf>,
    },

    /// Feed key sequences to the composition engine, one line at a time.
    ///
    /// Letters type, `,` `.` and `_` send comma, period and space, digits 1-9
    /// pick a candidate on the current page, and `<enter>`, `<bs>`, `<shift>`
    /// and `<ascii>` send the named key.
    Compose {
        /// Search this dictionary (binary, JSON or TSV) instead of the deployed formulas
        #[arg(short, long)]
        dict: Option<PathBuf>,
    },
}

const REPL_RESULTS: usize = 8;

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

// --- deploy subcommand ---

fn run_deploy() -> Result<()> {
    let settings = Settings::load()?;
    let source_dir = Settings::formula_dir().context("could not determine config directory")?;
    let target_dir = Settings::target_dir().context("could not determine data directory")?;

    if settings.formulas.is_empty() {
        eprintln!("No formulas configured.");
        return Ok(());
    }

    for formula in &settings.formulas {
        eprintln!("Compiling {} ({})...", formula.display_name(), formula.id);
        let out = formula
            .compile(&source_dir, &target_dir)
            .with_context(|| format!("failed to compile formula {}", formula.id))?;
        info!("formula {} compiled to {:?}", formula.id, out);
        eprintln!("  -> {:?}", out);
    }

    eprintln!("Done.");
    Ok(())
}

/// Load the matchers for `repl` and `compose`
fn load_matchers(settings: &Settings, dict: Option<&Path>) -> Result<MatcherManager> {
    let Some(path) = dict else {
        let target_dir = Settings::target_dir().context("could not determine data directory")?;
        let manager = MatcherManager::from_settings(settings, &target_dir);
        if manager.is_empty() {
            eprintln!("No compiled formulas found; run `liushu deploy` first.");
        }
        return Ok(manager);
    };

    eprintln!("Loading {:?}...", path);
    let dict = Dictionary::load_auto(path)?;
    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dict")
        .to_string();
    let mut manager = MatcherManager::new();
    manager.add(id, Box::new(dict));
    Ok(manager)
}

// --- repl subcommand ---

fn run_repl(dict: Option<PathBuf>) -> Result<()> {
    let settings = Settings::load()?;
    let mut matchers = load_matchers(&settings, dict.as_deref())?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("liushu> ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let input = line?;
        let input = input.trim();

        if input == "*quit" {
            break;
        }
        if let Some(id) = input.strip_prefix("*use") {
            let id = id.trim();
            if matchers.set_active(id) {
                println!("using {}", id);
            } else {
                println!("error: formula {} is not loaded", id);
            }
            continue;
        }

        for (i, candidate) in matchers.search(input).iter().take(REPL_RESULTS).enumerate() {
            println!(
                "{}. {}\t{}\t{}",
                i + 1,
                candidate.text,
                candidate.code,
                candidate.weight
            );
        }
    }
    Ok(())
}

// --- compose subcommand ---

/// One step of a `compose` line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Key(KeyEvent),
    /// 1-based candidate on the current page
    Select(usize),
}

fn parse_steps(line: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        let step = match c {
            '<' => {
                let name: String = chars.by_ref().take_while(|&c| c != '>').collect();
                match name.as_str() {
                    "enter" => Step::Key(KeyEvent::Enter),
                    "bs" => Step::Key(KeyEvent::Delete),
                    "shift" => Step::Key(KeyEvent::Shift),
                    "ascii" => Step::Key(KeyEvent::AsciiModeSwitch),
                    other => anyhow::bail!("unknown key <{}>", other),
                }
            }
            ',' => Step::Key(KeyEvent::Comma),
            '.' => Step::Key(KeyEvent::Period),
            '_' => Step::Key(KeyEvent::Space),
            '1'..='9' => Step::Select(c as usize - '0' as usize),
            c if c.is_ascii_alphabetic() => Step::Key(KeyEvent::Alpha(c)),
            c if c.is_whitespace() => continue,
            c => Step::Key(KeyEvent::RawText(c.to_string())),
        };
        steps.push(step);
    }
    Ok(steps)
}

fn run_compose(dict: Option<PathBuf>) -> Result<()> {
    let settings = Settings::load()?;
    let matchers = load_matchers(&settings, dict.as_deref())?;
    let mut engine =
        CompositionEngine::with_config(matchers, BufferHost::new(), EngineConfig::from(&settings));

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let steps = match parse_steps(&line?) {
            Ok(steps) => steps,
            Err(e) => {
                println!("error: {}", e);
                continue;
            }
        };

        for step in steps {
            match step {
                Step::Key(event) => engine.handle_key(&event),
                Step::Select(n) => {
                    if !engine.select_on_page(n) {
                        println!("error: no candidate {}", n);
                    }
                }
            }
        }

        println!("input:     {}", engine.display_input());
        let page = engine
            .candidates()
            .page_candidates()
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}.{}", i + 1, c.text))
            .collect::<Vec<_>>()
            .join(" ");
        println!("candidates: {}", page);
        println!("committed: {}", engine.host_mut().take());
    }
    Ok(())
}

// --- main ---

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy => run_deploy(),
        Commands::Repl { dict } => run_repl(dict),
        Commands::Compose { dict } => run_compose(dict),
    }
}
