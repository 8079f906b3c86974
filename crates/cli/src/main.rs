// ABOUTME: CLI for checking and rewriting RSS 2.0 documents with rsskit-feed.
// ABOUTME: Reads files or stdin, reports validation results as JSON, and converts RSS dates.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rsskit_feed::{
    compose_rss_date, parse_feed_bytes, parse_rss_date, validate, write_feed_xml_pretty, FeedError,
};
use serde_json::{json, Value};

/// Validate and normalize RSS 2.0 feeds.
#[derive(Parser, Debug)]
#[command(name = "rsskit")]
#[command(about = "Validate RSS 2.0 documents and convert RSS dates", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check one or more documents against the RSS 2.0 rules and print a JSON report.
    Validate {
        /// Local file paths. Use "-" to read one document from stdin.
        #[arg(required = true)]
        targets: Vec<String>,

        /// Output compact JSON instead of pretty.
        #[arg(long, default_value_t = false)]
        compact: bool,
    },

    /// Re-emit a document as indented XML with empty optional elements removed.
    Fmt {
        /// Local file path, or "-" for stdin.
        target: String,

        /// Refuse to print documents that fail validation.
        #[arg(long, default_value_t = false)]
        check_valid: bool,
    },

    /// Work with RSS date strings.
    #[command(subcommand)]
    Date(DateCommand),
}

#[derive(Subcommand, Debug)]
enum DateCommand {
    /// Parse an RSS date and print it as RFC 3339 and in canonical RSS form.
    Parse { value: String },

    /// Print the current time as an RSS date.
    Now,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns Ok(false) when the command ran but found invalid input.
fn run(command: Command) -> Result<bool> {
    match command {
        Command::Validate { targets, compact } => {
            let results: Vec<Value> = targets.iter().map(|t| check_target(t)).collect();
            let valid = results
                .iter()
                .filter(|r| r.get("ok").and_then(Value::as_bool) == Some(true))
                .count();

            // Single target => emit its result object; otherwise an envelope with counts.
            let output = if results.len() == 1 {
                results[0].clone()
            } else {
                json!({
                    "results": results,
                    "total": results.len(),
                    "valid": valid,
                    "invalid": results.len() - valid
                })
            };

            if compact {
                println!("{}", serde_json::to_string(&output)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            Ok(valid == results.len())
        }
        Command::Fmt {
            target,
            check_valid,
        } => {
            let bytes = load_bytes(&target)?;
            let feed = parse_feed_bytes(&bytes).with_context(|| format!("reading {target}"))?;
            if check_valid {
                validate(&feed)
                    .map_err(FeedError::from)
                    .with_context(|| format!("checking {target}"))?;
            }
            println!("{}", write_feed_xml_pretty(&feed)?);
            Ok(true)
        }
        Command::Date(DateCommand::Parse { value }) => {
            let date = parse_rss_date(&value)?;
            println!("{}", date.datetime().to_rfc3339());
            println!("{}", date);
            Ok(true)
        }
        Command::Date(DateCommand::Now) => {
            println!("{}", compose_rss_date(Utc::now()));
            Ok(true)
        }
    }
}

fn check_target(target: &str) -> Value {
    let outcome = load_bytes(target).and_then(|bytes| {
        let feed = parse_feed_bytes(&bytes)?;
        validate(&feed).map_err(FeedError::from)?;
        Ok(feed)
    });

    match outcome {
        Ok(feed) => {
            tracing::debug!(path = target, items = feed.items.len(), "feed is valid");
            json!({
                "target": target,
                "ok": true,
                "title": feed.title,
                "items": feed.items.len(),
                "error": null
            })
        }
        Err(err) => json!({
            "target": target,
            "ok": false,
            "title": null,
            "items": null,
            "error": format!("{:#}", err)
        }),
    }
}

fn load_bytes(target: &str) -> Result<Vec<u8>> {
    if target == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read(path)?)
}
