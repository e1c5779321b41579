//! # haberler
//!
//! Terminal front end for the `haberler_plus` library: pick a news source and
//! a category, get a list of headlines with links.
//!
//! ## Usage
//!
//! ```sh
//! haberler                      # interactive menus
//! haberler -s 6 -c 1            # CNN Türk, first category
//! RUST_LOG=debug haberler -l    # list everything, with diagnostics on stderr
//! ```

use clap::Parser;
use haberler_plus::outputs::{json, terminal};
use haberler_plus::{CategoryIndex, Registry};
use std::error::Error;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

/// Print `prompt` and read one integer from stdin.
fn prompt_number(prompt: &str) -> Result<i64, Box<dyn Error>> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let n = line
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("please enter a valid number, got {:?}", line.trim()))?;
    Ok(n)
}

fn list_all(registry: &Registry) -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout().lock();
    for (i, name) in registry.list_providers().into_iter().enumerate() {
        let number = i as i64 + 1;
        terminal::write_menu(&mut out, &format!("{number}. {name}"), registry.categories(number)?)?;
        writeln!(out)?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let registry = Registry::with_builtin_sources()?;
    if args.list {
        return list_all(&registry);
    }

    let source_number = match args.source {
        Some(n) => n,
        None => {
            terminal::write_menu(&mut io::stdout().lock(), "News sources:", &registry.list_providers())?;
            prompt_number("Enter a source number: ")?
        }
    };
    let source = registry.source(source_number)?;
    let categories = source.categories();

    let category = match args.category {
        Some(raw) if args.zero_based => CategoryIndex::from_legacy(raw, categories.len()),
        Some(n) => CategoryIndex::number(n),
        None => {
            terminal::write_menu(
                &mut io::stdout().lock(),
                &format!("{} categories:", source.name()),
                categories,
            )?;
            CategoryIndex::number(prompt_number("Enter a category number: ")?)
        }
    };

    info!(source = source.name(), %category, "Fetching news");
    let items = source.fetch_news(category).await?;

    let mut out = io::stdout().lock();
    if args.json {
        json::write_items(&mut out, &items)?;
    } else {
        let label = category
            .position(categories.len())
            .map(|i| categories[i].as_str())
            .unwrap_or("?");
        terminal::write_items(&mut out, source.name(), label, &items)?;
    }
    Ok(())
}
