//! Placeholder filtering for raw backend values
//!
//! Every backend has its own sentinel strings for "nothing detected":
//! `"unknown"`, `"UNK"`, `"Generic Bot"`, `"misc"` and so on. Each provider
//! owns a [`PlaceholderFilter`] describing its sentinels, so the distinction
//! between "field not detected" and "field detected as placeholder" is made
//! per provider, not globally.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

/// Field group a placeholder pattern can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Browser,
    RenderingEngine,
    OperatingSystem,
    Device,
    Bot,
}

/// Field within a group a placeholder pattern can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Version,
    Type,
    Model,
    Brand,
}

/// Scope of a placeholder pattern list: one concrete field of one group.
pub type Scope = (Group, Field);

/// Per-provider table of placeholder patterns.
///
/// Patterns are compiled case-insensitively and should anchor themselves
/// (`^unknown$`): a value is only a placeholder when the pattern matches it,
/// so `"unknown something"` passes a `^unknown$` rule.
///
/// The `general` list applies to every field; scoped lists apply only to the
/// `(group, field)` they are registered for.
#[derive(Debug, Default)]
pub struct PlaceholderFilter {
    general: Vec<Regex>,
    scoped: HashMap<Scope, Vec<Regex>>,
}

impl PlaceholderFilter {
    pub fn builder() -> PlaceholderFilterBuilder {
        PlaceholderFilterBuilder::default()
    }

    /// Whether a raw backend value is a genuine signal.
    ///
    /// A value is real iff it is present, non-empty, matches no general
    /// pattern, and matches no pattern scoped to `scope` (when given).
    pub fn is_real(&self, value: Option<&str>, scope: Option<Scope>) -> bool {
        let Some(value) = value else {
            return false;
        };
        if value.is_empty() {
            return false;
        }

        if self.general.iter().any(|re| re.is_match(value)) {
            return false;
        }

        if let Some(scope) = scope
            && let Some(patterns) = self.scoped.get(&scope)
            && patterns.iter().any(|re| re.is_match(value))
        {
            return false;
        }

        true
    }

    /// Returns the value unchanged when it is real, `None` otherwise.
    ///
    /// The `None` becomes the canonical "field not detected" signal in the
    /// result model.
    pub fn real<'a>(&self, value: Option<&'a str>, scope: Option<Scope>) -> Option<&'a str> {
        if self.is_real(value, scope) { value } else { None }
    }
}

/// Builder collecting pattern sources before compilation.
#[derive(Debug, Default)]
pub struct PlaceholderFilterBuilder {
    general: Vec<String>,
    scoped: Vec<(Scope, Vec<String>)>,
}

impl PlaceholderFilterBuilder {
    /// Add patterns that apply to every field of every group.
    pub fn general(mut self, patterns: &[&str]) -> Self {
        self.general.extend(patterns.iter().map(|p| p.to_string()));
        self
    }

    /// Add patterns that apply only to one `(group, field)`.
    pub fn scoped(mut self, group: Group, field: Field, patterns: &[&str]) -> Self {
        self.scoped.push((
            (group, field),
            patterns.iter().map(|p| p.to_string()).collect(),
        ));
        self
    }

    pub fn build(self) -> Result<PlaceholderFilter, regex::Error> {
        let compile = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();

        let mut filter = PlaceholderFilter {
            general: Vec::with_capacity(self.general.len()),
            scoped: HashMap::new(),
        };

        for pattern in &self.general {
            filter.general.push(compile(pattern)?);
        }

        for (scope, patterns) in &self.scoped {
            let compiled = patterns
                .iter()
                .map(|p| compile(p))
                .collect::<Result<Vec<_>, _>>()?;
            filter.scoped.entry(*scope).or_default().extend(compiled);
        }

        Ok(filter)
    }
}
