//! Version decomposition and reconstruction
//!
//! A free-form version token ("5.6.3b", "Windows XP 6.3", "6_5_4") is split
//! into structured major/minor/patch/alias components, and components can be
//! recombined into a canonical string. The two directions are deliberately
//! not symmetric: reconstruction normalizes separators and drops textual
//! decoration, so `complete → components → complete` is not a strict
//! round-trip.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Alias words that never count as an alias (pre-release markers).
const NOT_ALLOWED_ALIAS: [&str; 7] = ["a", "alpha", "prealpha", "b", "beta", "prebeta", "rc"];

/// First maximal numeric run: digits, optionally continued by `.`/`_`
/// separators and more digits.
static NUMERIC_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:[._]*\d*)*").expect("Failed to compile numeric run pattern")
});

/// Structured components of a version token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionParts {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub alias: Option<String>,
}

/// Split a version token into major/minor/patch/alias.
///
/// The first maximal numeric run provides the components, split on `.`/`_`;
/// positions beyond patch are ignored and empty positions stay `None`.
/// Everything outside numeric runs is trimmed and, unless it is a
/// pre-release marker like `b` or `alpha`, becomes the alias.
pub fn decompose(complete: &str) -> VersionParts {
    let mut parts = VersionParts::default();

    if let Some(run) = NUMERIC_RUN.find(complete) {
        let tokens: Vec<&str> = run.as_str().split(['.', '_']).collect();

        parts.major = tokens
            .first()
            .filter(|t| !t.is_empty())
            .and_then(|t| t.parse().ok());
        parts.minor = tokens
            .get(1)
            .filter(|t| !t.is_empty())
            .and_then(|t| t.parse().ok());
        parts.patch = tokens
            .get(2)
            .filter(|t| !t.is_empty())
            .and_then(|t| t.parse().ok());
    }

    for fragment in NUMERIC_RUN.split(complete) {
        let fragment = fragment.trim();

        if fragment.is_empty() {
            continue;
        }

        if NOT_ALLOWED_ALIAS
            .iter()
            .any(|word| fragment.eq_ignore_ascii_case(word))
        {
            continue;
        }

        // last surviving fragment wins; kept bug-compatible with the
        // observable output of existing deployments
        parts.alias = Some(fragment.to_string());
    }

    parts
}

/// Build the canonical string for a set of components.
///
/// Returns `None` when major and alias are both absent, in which case the
/// caller keeps whatever `complete` it already has. The output format is
/// `major[.minor][.patch]`, prefixed with `"{alias} - "` when an alias is
/// present.
pub fn reconstruct(
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    alias: Option<&str>,
) -> Option<String> {
    if major.is_none() && alias.is_none() {
        return None;
    }

    let mut version = major.map(|m| m.to_string()).unwrap_or_default();

    if let Some(minor) = minor {
        version.push('.');
        version.push_str(&minor.to_string());
    }

    if let Some(patch) = patch {
        version.push('.');
        version.push_str(&patch.to_string());
    }

    match alias {
        Some(alias) => Some(format!("{alias} - {version}")),
        None => Some(version),
    }
}

/// Whether a raw token carries no version signal at all: nothing left after
/// stripping `0`, `.` and `_` (so `"0.0"` and `"0_0"` count as absent, but
/// `"10"` does not).
fn is_zero_only(complete: &str) -> bool {
    complete.chars().all(|c| matches!(c, '0' | '.' | '_'))
}

/// Semantic version decomposition of one detected component.
///
/// Mutated by provider adapters during hydration, read-only afterwards.
/// Setting `complete` decomposes it into components; setting a component
/// recomputes `complete` from the structured fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Version {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    alias: Option<String>,
    complete: Option<String>,
}

impl Version {
    pub fn major(&self) -> Option<u64> {
        self.major
    }

    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn complete(&self) -> Option<&str> {
        self.complete.as_deref()
    }

    pub fn set_major(&mut self, major: Option<u64>) {
        self.major = major;
        self.hydrate_complete();
    }

    pub fn set_minor(&mut self, minor: Option<u64>) {
        self.minor = minor;
        self.hydrate_complete();
    }

    pub fn set_patch(&mut self, patch: Option<u64>) {
        self.patch = patch;
        self.hydrate_complete();
    }

    pub fn set_alias(&mut self, alias: Option<String>) {
        self.alias = alias;
        self.hydrate_complete();
    }

    /// Set from a raw version token.
    ///
    /// A token that is empty or zero-only (`"0.0"`, `"0_0"`) is treated as
    /// "no version": everything becomes `None`.
    pub fn set_complete(&mut self, complete: Option<&str>) {
        let complete = complete.filter(|c| !is_zero_only(c));

        let parts = complete.map(decompose).unwrap_or_default();

        self.major = parts.major;
        self.minor = parts.minor;
        self.patch = parts.patch;
        self.alias = parts.alias;

        // keep the source token, not the normalized reconstruction
        self.complete = complete.map(str::to_string);
    }

    fn hydrate_complete(&mut self) {
        if let Some(complete) = reconstruct(self.major, self.minor, self.patch, self.alias.as_deref())
        {
            self.complete = Some(complete);
        }
    }
}
