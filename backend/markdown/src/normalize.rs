//! Response text normalization.
//!
//! Cleans the accumulated raw stream into render-ready markdown. The passes
//! run in a fixed order; later passes assume the earlier cleanup already
//! happened. Safe to re-run on a growing prefix of the final text.

use std::sync::LazyLock;

use regex::Regex;

// Consecutive quoted chunks: `"word1" "word2"` → `word1 word2`.
static QUOTE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""\s*""#).unwrap());

static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {3,}").unwrap());

static NUMBERED_AFTER_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(\d+)\.\s+").unwrap());
static NUMBERED_AT_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\.\s+").unwrap());

static BULLET_AFTER_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n-\s+").unwrap());
static BULLET_AT_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-\s+").unwrap());

// A short label alone on a line, e.g. `Current Conditions:`.
static SECTION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n([A-Za-z][A-Za-z\s]{2,30}):\s*\n").unwrap());

static NEWLINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static THINKING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<thinking>.*?</thinking>").unwrap());

/// Clean accumulated response text for display.
///
/// Pure and total: any input, including an empty or mid-stream partial
/// buffer, produces a result without panicking. Transient artifacts on
/// incomplete markup self-correct once more text arrives.
pub fn normalize(text: &str, show_thinking: bool) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Join chunks that arrived separately quoted, then drop one outer quote
    // from each end.
    let mut out = QUOTE_RUN.replace_all(text, "").into_owned();
    if let Some(rest) = out.strip_prefix('"') {
        out = rest.to_string();
    }
    if let Some(rest) = out.strip_suffix('"') {
        out = rest.to_string();
    }

    // The upstream may deliver escaped-string content rather than raw
    // control characters.
    let out = out.replace("\\n", "\n").replace("\\t", "\t");

    let out = MULTI_SPACE.replace_all(&out, " ");

    // Unpad line breaks.
    let out = out.replace(" \n ", "\n").replace("\n ", "\n").replace(" \n", "\n");

    // One space after list markers.
    let out = NUMBERED_AFTER_NEWLINE.replace_all(&out, "\n${1}. ");
    let out = NUMBERED_AT_START.replace(&out, "${1}. ");
    let out = BULLET_AFTER_NEWLINE.replace_all(&out, "\n- ");
    let out = BULLET_AT_START.replace(&out, "- ");

    // Promote bare section labels to bold headings.
    let out = SECTION_LABEL.replace_all(&out, "\n**${1}:**\n\n");

    let mut out = NEWLINE_RUN.replace_all(&out, "\n\n").into_owned();

    if !show_thinking {
        out = THINKING.replace_all(&out, "").into_owned();
    }

    out.trim().to_string()
}
