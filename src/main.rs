use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt};

use lsi_search::config::{CountMode, DEFAULT_NUM_TOPICS, IndexTerms, LsiConfig, SvdSolver};
use lsi_search::document::{FileSource, find_files};
use lsi_search::{Error, SearchConfig, SearchOutcome, Session};

#[derive(Parser)]
#[command(name = "lsi-search")]
#[command(about = "Index a directory and rank its files against a query with LSI")]
#[command(long_about = None)]
struct Cli {
    /// Directory to index; without it the tool prompts interactively
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Query for a one-shot run with --dir
    #[arg(long, requires = "dir")]
    query: Option<String>,
    /// Number of latent topics (clamped to the corpus size)
    #[arg(long, default_value_t = DEFAULT_NUM_TOPICS)]
    topics: usize,
    #[arg(long, value_enum, default_value_t = Solver::Dense)]
    solver: Solver,
    /// Index raw tokens or their stems
    #[arg(long, value_enum, default_value_t = Terms::Tokens)]
    terms: Terms,
    /// How per-file word counts are reported
    #[arg(long, value_enum, default_value_t = Count::WholeWord)]
    count: Count,
    /// Do not divide topic vectors by the singular values
    #[arg(long, default_value_t = false)]
    unscaled: bool,
    /// Print search results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Skip the per-file word counts and texts
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Solver {
    Dense,
    Lanczos,
}

#[derive(Clone, Copy, ValueEnum)]
enum Terms {
    Tokens,
    Stems,
}

#[derive(Clone, Copy, ValueEnum)]
enum Count {
    WholeWord,
    Substring,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            lsi: LsiConfig {
                num_topics: self.topics,
                solver: match self.solver {
                    Solver::Dense => SvdSolver::Dense,
                    Solver::Lanczos => SvdSolver::Lanczos,
                },
                scaled: !self.unscaled,
            },
            terms: match self.terms {
                Terms::Tokens => IndexTerms::Tokens,
                Terms::Stems => IndexTerms::Stems,
            },
            count_mode: match self.count {
                Count::WholeWord => CountMode::WholeWord,
                Count::Substring => CountMode::Substring,
            },
        }
    }
}

const RULE: &str = "-------------------------------------------------------------";

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();
    let mut session = Session::new(cli.search_config());

    if let Some(dir) = cli.dir.clone() {
        if !load_directory(&mut session, &dir, &cli) {
            return Ok(());
        }
        let query = match cli.query.clone() {
            Some(q) => q,
            None => match prompt("Enter search keywords: ")? {
                Some(q) => q,
                None => return Ok(()),
            },
        };
        return run_query(&session, &query, &cli);
    }

    loop {
        let Some(dir) = prompt("Enter a directory to search, or 'exit' to quit: ")? else {
            break;
        };
        if dir.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }
        if !load_directory(&mut session, Path::new(&dir), &cli) {
            continue;
        }
        let Some(query) = prompt("Enter search keywords: ")? else {
            break;
        };
        if let Err(e) = run_query(&session, &query, &cli) {
            eprintln!("Search failed: {e:#}");
        }
    }
    Ok(())
}

fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Reads every file below `dir` into the session. Returns false when the
/// directory holds no files.
fn load_directory(session: &mut Session, dir: &Path, cli: &Cli) -> bool {
    let files = find_files(dir);
    if files.is_empty() {
        println!("No files found in directory.");
        return false;
    }

    let report = session.ingest(&files, &FileSource);
    for failure in &report.failed {
        eprintln!("{failure}");
    }
    if !cli.quiet {
        for path in &report.added {
            if let Some(doc) = session.documents().iter().find(|d| &d.path == path) {
                println!("\nFile: {}", doc.path.display());
                println!("Word counts before stemming:");
                for (word, count) in &doc.word_counts {
                    println!("{word}: {count}");
                }
                println!("\nText before stemming:");
                println!("{}", doc.original_text());
                println!("\nText after stemming:");
                println!("{}", doc.stemmed_text());
                println!("{RULE}");
            }
        }
    }
    true
}

fn run_query(session: &Session, query: &str, cli: &Cli) -> Result<()> {
    let outcome = match session.search(query) {
        Ok(outcome) => outcome,
        Err(Error::EmptyCorpus) => {
            println!("No documents could be read.");
            return Ok(());
        }
        Err(e @ Error::DegenerateCorpus { .. }) => {
            println!("Nothing to index: {e}");
            return Ok(());
        }
        Err(e) => return Err(e).context("LSI search failed"),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome) {
    println!("\nScores for each document (LSI):");
    for (path, score) in &outcome.ranked {
        println!("{}: Score - {score}", path.display());
    }

    if outcome.relevant.is_empty() {
        println!("Keyword not found (LSI).");
    } else {
        println!("\nKeyword found in files (LSI):");
        for (position, path) in &outcome.relevant {
            println!("{position}. {}", path.display());
        }
    }
}
