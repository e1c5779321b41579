//! Rendering fetched headlines for the user.
//!
//! # Submodules
//!
//! - [`terminal`]: plain `title: url` lines under a source/category header
//! - [`json`]: the item list as a JSON array for piping into other tools
//!
//! Both write to any [`std::io::Write`], so the CLI passes a locked stdout
//! and tests pass a `Vec<u8>`.

pub mod json;
pub mod terminal;
