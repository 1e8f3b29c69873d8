//! The fixed set of monitors this tool seeds.
//!
//! Each entry points at an endpoint of the mock target service mounted under
//! the configured base URL. The table is compiled in; changing it means
//! changing this file. Order only decides processing and report order.

use crate::error::SeedError;
use crate::types::MonitorDefinition;
use std::collections::HashSet;

const BUILTIN: &[MonitorDefinition] = &[
    MonitorDefinition::new(
        "Always Up",
        "/always-up",
        "Returns 200 on every request.",
    ),
    MonitorDefinition::new(
        "Always Down",
        "/always-down",
        "Returns 503 on every request.",
    ),
    MonitorDefinition::new(
        "Flapping",
        "/flapping",
        "Alternates between 200 and 500 on successive requests.",
    ),
    MonitorDefinition::new(
        "Random Failure",
        "/random-failure",
        "Fails roughly one request in five with a 500.",
    ),
    MonitorDefinition::new(
        "Slow Response",
        "/slow",
        "Sleeps 10 seconds before answering 200; exceeds the short timeout.",
    )
    .with_timeout(5),
    MonitorDefinition::new(
        "Very Slow Response",
        "/very-slow",
        "Sleeps 30 seconds before answering 200.",
    )
    .with_timeout(40),
    MonitorDefinition::new(
        "Keyword Present",
        "/keyword/present",
        "Body contains the keyword the monitor looks for.",
    )
    .with_keyword("healthy"),
    MonitorDefinition::new(
        "Keyword Missing",
        "/keyword/missing",
        "Answers 200 but the body never contains the keyword.",
    )
    .with_keyword("healthy"),
    MonitorDefinition::new(
        "Redirect Chain",
        "/redirect/3",
        "Three 302 hops before a final 200.",
    ),
    MonitorDefinition::new(
        "Redirect Loop",
        "/redirect/loop",
        "Redirects to itself until the client gives up.",
    ),
    MonitorDefinition::new(
        "Not Found",
        "/status/404",
        "Returns 404; outside the accepted status range.",
    ),
    MonitorDefinition::new(
        "Server Error",
        "/status/500",
        "Returns 500 on every request.",
    ),
    MonitorDefinition::new(
        "Connection Drop",
        "/drop",
        "Closes the socket without sending a response.",
    ),
    MonitorDefinition::new(
        "Large Body",
        "/large-body",
        "Streams a 5 MiB body with a 200.",
    ),
];

/// An ordered, read-only list of definitions.
#[derive(Debug, Clone, Copy)]
pub struct Catalogue<'a> {
    definitions: &'a [MonitorDefinition],
}

impl Catalogue<'static> {
    pub fn builtin() -> Self {
        Self::new(BUILTIN)
    }
}

impl<'a> Catalogue<'a> {
    pub fn new(definitions: &'a [MonitorDefinition]) -> Self {
        Self { definitions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a MonitorDefinition> + 'a {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Rejects duplicate names or paths and paths that don't start with `/`.
    /// A duplicate path would map two definitions onto one URL, leaving the
    /// later one permanently skipped.
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut names = HashSet::new();
        let mut paths = HashSet::new();

        for def in self.definitions {
            if !def.path.starts_with('/') {
                return Err(SeedError::InvalidCatalogue(format!(
                    "path '{}' of '{}' must start with '/'",
                    def.path, def.name
                )));
            }
            if !names.insert(def.name) {
                return Err(SeedError::InvalidCatalogue(format!(
                    "duplicate name '{}'",
                    def.name
                )));
            }
            if !paths.insert(def.path) {
                return Err(SeedError::InvalidCatalogue(format!(
                    "duplicate path '{}' (second use by '{}')",
                    def.path, def.name
                )));
            }
        }
        Ok(())
    }
}
