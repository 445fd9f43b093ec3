// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text transforms applied to ticket and comment bodies while copying.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::maps::NumberMap;

/// Replacement for references to tickets outside the migration.
pub const NOT_COPIED: &str = "#not-copied";

const CHANGE_HEADER: &str = "*Emulated Ticket Change*";
const FIELD_LABEL: &str = "\n*Field:*";
const FROM_LABEL: &str = "\n_From:_";
const TO_LABEL: &str = "\n_To:_";

const HEADER_MARKER: &str = "---";
const FIELD_MARKER: &str = "\n- -";
const VALUE_MARKER: &str = "\n  -";

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"#(\d+)") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});

/// Rewrites every `#<number>` reference through the number map.
///
/// Numbers without a mapping become [`NOT_COPIED`] so a copied ticket never
/// points at an unrelated ticket in the destination.
pub fn rewrite_references(text: &str, numbers: &NumberMap) -> String {
    REFERENCE_RE
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<u64>()
                .ok()
                .and_then(|n| numbers.get(n))
                .map(|n| format!("#{n}"))
                .unwrap_or_else(|| NOT_COPIED.to_string())
        })
        .into_owned()
}

/// Turns system changelog markup into a readable Field / From / To narrative.
///
/// The leading `---` becomes a header, each `- -` field line a `Field:`
/// label, and the two-space-indented value lines that follow are labelled
/// `From:` and `To:` in pairs, left to right.
pub fn prettify_changes(changes: &str) -> String {
    let mut text = changes
        .replacen(HEADER_MARKER, CHANGE_HEADER, 1)
        .replace(FIELD_MARKER, FIELD_LABEL);

    while text.contains(VALUE_MARKER) {
        text = text.replacen(VALUE_MARKER, FROM_LABEL, 1);
        text = text.replacen(VALUE_MARKER, TO_LABEL, 1);
    }
    text
}

#[cfg(test)]
#[path = "rewrite_tests.rs"]
mod tests;
