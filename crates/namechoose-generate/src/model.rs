use serde::{Deserialize, Serialize};

use namechoose_core::Gender;

/// Options for a generation batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Nationality identifier; `None` draws a nationality per name.
    pub nationality: Option<String>,
    /// Gender of every name; `None` draws one per name.
    pub gender: Option<Gender>,
    /// Number of names to produce (at least 1).
    pub count: usize,
    /// Seed for the random source; `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            nationality: None,
            gender: None,
            count: 1,
            seed: None,
        }
    }
}
