use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::gender::Gender;

/// Position a component occupies in a composed name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SlotLabel {
    /// Personal or given name.
    Given,
    /// Additional name from a separate pool.
    Additional,
    /// Derived from the father's given name.
    Patronym,
    /// Derived from the mother's given name.
    Matronym,
    /// Inherited family name.
    Family,
    /// Family name inherited from the father.
    Patriname,
    /// Family name inherited from the mother.
    Matriname,
}

impl SlotLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::Additional => "additional",
            Self::Patronym => "patronym",
            Self::Matronym => "matronym",
            Self::Family => "family",
            Self::Patriname => "patriname",
            Self::Matriname => "matriname",
        }
    }

    /// True for slots holding an inherited surname.
    pub fn is_family(self) -> bool {
        matches!(self, Self::Family | Self::Patriname | Self::Matriname)
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chosen or derived component of a generated name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameComponent {
    pub slot: SlotLabel,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub romanisation: Option<String>,
}

/// A generated name; immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedName {
    nationality: String,
    gender: Gender,
    format: usize,
    components: Vec<NameComponent>,
    full: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    romanised: Option<String>,
}

impl GeneratedName {
    pub fn new(
        nationality: impl Into<String>,
        gender: Gender,
        format: usize,
        components: Vec<NameComponent>,
        full: String,
        romanised: Option<String>,
    ) -> Self {
        Self {
            nationality: nationality.into(),
            gender,
            format,
            components,
            full,
            romanised,
        }
    }

    /// Canonical name of the nationality the name was composed for.
    pub fn nationality(&self) -> &str {
        &self.nationality
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Index of the rule format that produced this name.
    pub fn format(&self) -> usize {
        self.format
    }

    pub fn components(&self) -> &[NameComponent] {
        &self.components
    }

    /// First component occupying `slot`.
    pub fn component(&self, slot: SlotLabel) -> Option<&NameComponent> {
        self.components.iter().find(|component| component.slot == slot)
    }

    pub fn full(&self) -> &str {
        &self.full
    }

    pub fn romanised(&self) -> Option<&str> {
        self.romanised.as_deref()
    }
}

impl fmt::Display for GeneratedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)?;
        if let Some(romanised) = &self.romanised {
            write!(f, " ({romanised})")?;
        }
        Ok(())
    }
}
