//! JSON output.
//!
//! ```text
//! [
//!   { "title": "…", "url": "https://…" }
//! ]
//! ```

use crate::models::NewsItem;
use std::error::Error;
use std::io::Write;
use tracing::{debug, instrument};

/// Write `items` as a pretty-printed JSON array followed by a newline.
///
/// An empty result is written as `[]`, never omitted.
#[instrument(level = "debug", skip_all, fields(count = items.len()))]
pub fn write_items<W: Write>(out: &mut W, items: &[NewsItem]) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut *out, items)?;
    writeln!(out)?;
    debug!("Wrote JSON items");
    Ok(())
}
