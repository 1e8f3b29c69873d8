use std::path::PathBuf;
use thiserror::Error;

/// Failures a caller may want to tell apart. Plain storage errors travel as
/// `anyhow::Error` with context naming the step.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("monitor database not found at {}", .path.display())]
    MissingDatabase { path: PathBuf },

    #[error("invalid monitor catalogue: {0}")]
    InvalidCatalogue(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A definition failed mid-run. Rows inserted before it stay committed.
    #[error(
        "seeding stopped at '{definition}' after inserting {} monitor(s): {}",
        .inserted.len(),
        name_list(.inserted)
    )]
    Interrupted {
        definition: String,
        inserted: Vec<String>,
        #[source]
        source: anyhow::Error,
    },
}

fn name_list(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
