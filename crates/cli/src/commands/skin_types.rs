//! Show how skin-type input will be stored.
//!
//! ```bash
//! dewdrop skin-types "Oily, Dry" UNKNOWN sensitive
//! dewdrop skin-types --all "Oily, Mature"
//! ```

use std::collections::BTreeSet;
use std::io::{self, Write};

use dewdrop_core::skin_type::{normalize, validate_and_normalize};

use super::{OutputFormat, write_json};
use crate::error::Result;

/// Normalize the input. With `all`, tags outside the canonical set are kept.
pub fn run(input: &[String], all: bool, format: OutputFormat) -> Result<()> {
    let tags = tags(input, all);
    let mut out = io::stdout().lock();
    write_tags(&mut out, &tags, format)
}

fn tags(input: &[String], all: bool) -> BTreeSet<String> {
    if all {
        normalize(input)
    } else {
        validate_and_normalize(input)
            .into_iter()
            .map(|t| t.as_str().to_string())
            .collect()
    }
}

fn write_tags(out: &mut impl Write, tags: &BTreeSet<String>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, tags),
        OutputFormat::Table if tags.is_empty() => {
            writeln!(out, "(none)")?;
            Ok(())
        }
        OutputFormat::Table => {
            for tag in tags {
                writeln!(out, "{tag}")?;
            }
            Ok(())
        }
    }
}
