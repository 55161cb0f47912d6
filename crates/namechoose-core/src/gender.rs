use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Gender of a generated name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Masculine,
    Feminine,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Masculine, Gender::Feminine];

    /// Parse user input: `m`, `f`, `masculine`, `feminine`, `male`, `female`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "m" | "masculine" | "male" => Some(Self::Masculine),
            "f" | "feminine" | "female" => Some(Self::Feminine),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Masculine => "masculine",
            Self::Feminine => "feminine",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Masculine => Self::Feminine,
            Self::Feminine => Self::Masculine,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender applicability of a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenderTag {
    Masculine,
    Feminine,
    /// Usable for either gender.
    #[default]
    Neuter,
}

impl GenderTag {
    /// Parse the single-letter marker used by the data files.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "M" | "m" => Some(Self::Masculine),
            "F" | "f" => Some(Self::Feminine),
            "N" | "n" | "" => Some(Self::Neuter),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Masculine => "M",
            Self::Feminine => "F",
            Self::Neuter => "N",
        }
    }

    pub fn applies_to(self, gender: Gender) -> bool {
        match self {
            Self::Neuter => true,
            Self::Masculine => gender == Gender::Masculine,
            Self::Feminine => gender == Gender::Feminine,
        }
    }

    /// The specific gender of a gendered tag.
    pub fn gender(self) -> Option<Gender> {
        match self {
            Self::Masculine => Some(Gender::Masculine),
            Self::Feminine => Some(Gender::Feminine),
            Self::Neuter => None,
        }
    }
}

impl From<Gender> for GenderTag {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Masculine => Self::Masculine,
            Gender::Feminine => Self::Feminine,
        }
    }
}

impl fmt::Display for GenderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_spellings() {
        assert_eq!(Gender::parse("M"), Some(Gender::Masculine));
        assert_eq!(Gender::parse(" female "), Some(Gender::Feminine));
        assert_eq!(Gender::parse("x"), None);
    }

    #[test]
    fn neuter_applies_to_both() {
        for gender in Gender::ALL {
            assert!(GenderTag::Neuter.applies_to(gender));
        }
        assert!(!GenderTag::Feminine.applies_to(Gender::Masculine));
        assert_eq!(GenderTag::parse("q"), None);
    }
}
