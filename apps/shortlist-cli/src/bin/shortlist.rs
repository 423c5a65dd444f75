use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use shortlist_core::config::{resolve_with_base, Config};
use shortlist_rag::{QueryOutcome, Session};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shortlist",
    about = "Ask questions about a portfolio dataset and draft recruiter emails"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the index, answer one question and draft an email.
    Ask {
        dataset: String,
        question: String,
        /// Number of chunks to retrieve (overrides retrieval.k).
        #[arg(long)]
        k: Option<usize>,
        #[arg(long)]
        no_email: bool,
    },
    /// Build the index once, then answer one question per line of stdin.
    Chat {
        dataset: String,
        #[arg(long)]
        k: Option<usize>,
        #[arg(long)]
        no_email: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let mut settings = config.settings()?;
    let cwd = std::env::current_dir().context("failed to read current directory")?;

    match cli.command {
        Command::Ask { dataset, question, k, no_email } => {
            if let Some(k) = k {
                settings.retrieval.k = k;
            }
            let dataset = resolve_with_base(&cwd, &dataset);
            let mut session = Session::from_settings(settings)?;
            build(&mut session, &dataset)?;
            answer(&session, &question, no_email)?;
        }
        Command::Chat { dataset, k, no_email } => {
            if let Some(k) = k {
                settings.retrieval.k = k;
            }
            let dataset = resolve_with_base(&cwd, &dataset);
            let mut session = Session::from_settings(settings)?;
            build(&mut session, &dataset)?;
            chat(&mut session, &dataset, no_email)?;
        }
    }
    Ok(())
}

/// `RUST_LOG` when set, `info` otherwise.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn build(session: &mut Session, dataset: &Path) -> anyhow::Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Building vector store from {}", dataset.display()));
    pb.enable_steady_tick(Duration::from_millis(100));
    match session.build_from_path(dataset) {
        Ok(report) => {
            pb.finish_and_clear();
            info!(dataset = %dataset.display(), chunks = report.chunks, "vector store built");
            println!(
                "✅ Vector store ready: {} portfolios, {} chunks ({:.2}s)",
                report.rows,
                report.chunks,
                report.elapsed.as_secs_f64()
            );
            Ok(())
        }
        Err(e) => {
            pb.finish_and_clear();
            Err(e).with_context(|| {
                format!("failed to build vector store from {}", dataset.display())
            })
        }
    }
}

fn answer(session: &Session, question: &str, no_email: bool) -> anyhow::Result<()> {
    if no_email {
        let result = session.answer(question)?;
        println!("Answer: {}", result.answer);
        println!("Response Time: {:.2} seconds", result.elapsed_seconds());
        return Ok(());
    }
    let outcome = session.run(question)?;
    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &QueryOutcome) {
    println!("Answer: {}", outcome.result.answer);
    println!("Response Time: {:.2} seconds", outcome.result.elapsed_seconds());
    match &outcome.email {
        Ok(draft) => {
            println!("\nGenerated Email:\n----------------");
            println!("{}", draft.email_body);
        }
        Err(e) => {
            warn!(error = %e, "email drafting failed");
            eprintln!("⚠️  Email could not be drafted: {}", e);
        }
    }
}

fn chat(session: &mut Session, dataset: &Path, no_email: bool) -> anyhow::Result<()> {
    println!("💡 Ask about the portfolios (`:rebuild` reloads the dataset, Ctrl-D quits)");
    let stdin = io::stdin();
    let mut out = io::stdout();
    write!(out, "> ")?;
    out.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let question = line.trim();
        if question == ":rebuild" {
            info!(dataset = %dataset.display(), "rebuilding vector store");
            if let Err(e) = build(session, dataset) {
                eprintln!("❌ {:#}", e);
            }
        } else if !question.is_empty() {
            if let Err(e) = answer(session, question, no_email) {
                eprintln!("❌ {:#}", e);
            }
        }
        write!(out, "\n> ")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_defaults_to_info() {
        std::env::remove_var("RUST_LOG");
        assert_eq!(log_filter().to_string(), "info");
    }

    #[test]
    fn relative_dataset_resolves_against_cwd() {
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_with_base(cwd, "data/portfolios.csv"),
            Path::new("/work/data/portfolios.csv")
        );
        assert_eq!(resolve_with_base(cwd, "/srv/p.csv"), Path::new("/srv/p.csv"));
    }
}
