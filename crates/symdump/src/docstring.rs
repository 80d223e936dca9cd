//! Doc-comment cleanup.

use std::sync::LazyLock;

use fancy_regex::Regex;
use itertools::Itertools;

/// Leading `*` gutter of each doc-comment line, with the whitespace around it.
static GUTTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\*[ \t]*").expect("gutter pattern is valid"));

/// Strips the `/**` and `*/` delimiters and the `*` gutter from a doc-comment.
#[must_use]
pub fn strip_comment(raw: &str) -> String {
    let body = raw.trim();
    let body = body.strip_prefix("/**").unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);
    GUTTER.replace_all(body, "").trim().to_owned()
}

/// The first paragraph of a doc-comment on a single line.
///
/// Stops at the first blank line or `@tag` line. Returns `None` if nothing precedes them.
#[must_use]
pub fn summary(raw: &str) -> Option<String> {
    let text = strip_comment(raw);
    let summary = text
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty() && !line.starts_with('@'))
        .join(" ");
    (!summary.is_empty()).then_some(summary)
}
