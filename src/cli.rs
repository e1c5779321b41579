//! Command-line interface definitions.
//!
//! Without `--source`/`--category` the binary asks for both interactively.

use clap::Parser;

/// Read news headlines from Turkish news outlets.
///
/// # Examples
///
/// ```sh
/// # Pick a source and category from menus
/// haberler
///
/// # NTV, second category, as JSON
/// haberler --source 7 --category 2 --json
///
/// # Show every source with its categories
/// haberler --list
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Source number as shown by --list
    #[arg(short, long)]
    pub source: Option<i64>,

    /// Category number as shown by --list
    #[arg(short, long, allow_negative_numbers = true)]
    pub category: Option<i64>,

    /// Read --category the old way: values inside [0, N) are 0-based
    #[arg(long, requires = "category")]
    pub zero_based: bool,

    /// Print items as a JSON array
    #[arg(short, long)]
    pub json: bool,

    /// List sources and their categories, then exit
    #[arg(short, long, conflicts_with_all = ["source", "category"])]
    pub list: bool,
}
