//! Cited-reference normalization.
//!
//! Turns a free-text WoS citation string into the canonical node identity
//! `"<AUTHOR>, <YEAR>, <SOURCE>"`. The function is a documented heuristic:
//! ambiguous input degrades to `UNKNOWN_YEAR` / `UNKNOWN_SOURCE` rather
//! than failing, so borderline citations still contribute nodes. Distinct
//! raw strings that normalize identically merge into one node — that is
//! the identity-collision policy, not an accident.
//!
//! # Precedence rules
//!
//! 1. The year is searched across the *whole* string before any comma
//!    split, so `[Anonymous], INT J BEHAV NUTR PHY, 2004` still finds its
//!    year.
//! 2. The author is the first comma segment, uppercased, periods stripped,
//!    whitespace collapsed. Initials are preserved (`DAVIS F D` stays
//!    `DAVIS F D`). The `[Anonymous]` marker maps to `ANONYMOUS`.
//! 3. The source is the join of the remaining segments (skipping the
//!    second when it is exactly the year), truncated at the first
//!    `, V…` / `, P…` / `, DOI…` / `, HTTP…` / `, WWW…` marker — volume,
//!    page, and identifier metadata are not part of source identity.
//! 4. A string whose author segment comes out empty is rejected and
//!    contributes no node.

use std::sync::LazyLock;

use regex::Regex;

/// Fallback year when no plausible 4-digit year appears anywhere.
pub const UNKNOWN_YEAR: &str = "UNKNOWN_YEAR";
/// Fallback source when the source segment is absent, empty, or equals the year.
pub const UNKNOWN_SOURCE: &str = "UNKNOWN_SOURCE";
/// Canonical author for `[Anonymous]` citations.
pub const ANONYMOUS: &str = "ANONYMOUS";

/// Plausible publication year: 1800s, 1900s, or 2000s, as a whole word.
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(1[89]\d{2}|20\d{2})\b").expect("year pattern is valid"));

/// Start of volume/page/identifier metadata inside the source text.
///
/// The volume and page markers usually arrive fused with their number
/// (`V13`, `P319`), so the letter may carry trailing digits; the trailing
/// boundary keeps `Proceedings` or `Vienna` from being mistaken for
/// markers.
static SOURCE_CUTOFF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",\s+(?:V\d*|P\d*|DOI|HTTP|WWW)\b").expect("cutoff pattern is valid")
});

/// Runs of whitespace, collapsed to a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Normalize one raw cited-reference string into its canonical identity.
///
/// Returns `None` when no author token can be extracted; such strings
/// contribute no graph node.
#[must_use]
pub fn normalize_cited_ref(raw: &str) -> Option<String> {
    let raw = raw.trim();

    // 1. Year first, searched anywhere — independent of comma position.
    let year = YEAR_RE
        .find(raw)
        .map_or(UNKNOWN_YEAR, |m| m.as_str())
        .to_string();

    // 2. Comma segments. `split` always yields at least one segment, so
    //    the empty-input case surfaces as an empty author below.
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();

    let raw_author = parts[0].to_uppercase();
    let author = if raw_author.starts_with("[ANONYMOUS]") {
        ANONYMOUS.to_string()
    } else {
        let stripped = raw_author.replace('.', "");
        WHITESPACE_RE
            .replace_all(stripped.trim(), " ")
            .into_owned()
    };

    // 3. Source: remaining segments, skipping the year when it sits in
    //    second position, truncated at the metadata cutoff.
    let mut source = UNKNOWN_SOURCE.to_string();
    if parts.len() > 1 {
        let start = if parts[1] == year { 2 } else { 1 };
        let candidate = parts[start.min(parts.len())..].join(", ").to_uppercase();
        if !candidate.is_empty() {
            let cleaned = SOURCE_CUTOFF_RE
                .splitn(&candidate, 2)
                .next()
                .unwrap_or("")
                .trim()
                .trim_matches(&[',', ' '][..]);
            if !cleaned.is_empty() && cleaned != year {
                source = WHITESPACE_RE.replace_all(cleaned, " ").into_owned();
            }
        }
    }

    // 4. No author token — reject rather than fabricate a node key.
    if author.is_empty() {
        return None;
    }
    Some(format!("{author}, {year}, {source}"))
}

/// Extract the year column from a canonical identity, when it is numeric.
///
/// Identities always carry a middle segment, but it may be the
/// [`UNKNOWN_YEAR`] sentinel; only all-digit years are returned.
#[must_use]
pub fn identity_year(identity: &str) -> Option<&str> {
    identity
        .split(", ")
        .nth(1)
        .filter(|y| !y.is_empty() && y.chars().all(|c| c.is_ascii_digit()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
