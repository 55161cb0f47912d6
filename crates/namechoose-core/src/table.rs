use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{NameError, Result};
use crate::gender::{Gender, GenderTag};

/// Name category a table partitions its entries by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Personal (given) names.
    Personal,
    /// Additional names drawn from a separate pool (middle names, cognomina).
    Additional,
    /// Inherited family names.
    Family,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Personal, Category::Additional, Category::Family];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Additional => "additional",
            Self::Family => "family",
        }
    }

    /// File name of the category's table inside a nationality directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Personal => "personal.csv",
            Self::Additional => "additional.csv",
            Self::Family => "family.csv",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single candidate value for a name component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub name: String,
    /// Latin transcription when `name` is written in another script.
    pub romanisation: Option<String>,
    pub gender: GenderTag,
    /// Relative selection weight; absent means weight 1.
    pub weight: Option<u32>,
    /// Form that patronymic/matronymic suffixes attach to.
    pub stem: Option<String>,
    /// Opposite-gender spelling of a family name.
    pub counterpart: Option<String>,
}

impl NameEntry {
    pub fn new(name: impl Into<String>, gender: GenderTag) -> Self {
        Self {
            name: name.into(),
            romanisation: None,
            gender,
            weight: None,
            stem: None,
            counterpart: None,
        }
    }

    pub fn with_romanisation(mut self, value: impl Into<String>) -> Self {
        self.romanisation = Some(value.into());
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = Some(stem.into());
        self
    }

    pub fn with_counterpart(mut self, counterpart: impl Into<String>) -> Self {
        self.counterpart = Some(counterpart.into());
        self
    }

    pub fn effective_weight(&self) -> u32 {
        self.weight.unwrap_or(1)
    }
}

/// Immutable per-nationality collection of candidate names.
#[derive(Debug, Clone)]
pub struct NameTable {
    nationality: String,
    categories: BTreeMap<Category, Vec<NameEntry>>,
}

impl NameTable {
    /// Build a table, rejecting declared categories with zero entries.
    pub fn new(
        nationality: impl Into<String>,
        categories: BTreeMap<Category, Vec<NameEntry>>,
    ) -> Result<Self> {
        let nationality = nationality.into();
        for (category, entries) in &categories {
            if entries.is_empty() {
                return Err(NameError::data(
                    format!("{nationality}/{}", category.file_name()),
                    format!("category '{category}' is declared but has no entries"),
                ));
            }
            if let Some(entry) = entries.iter().find(|entry| entry.weight == Some(0)) {
                return Err(NameError::data(
                    format!("{nationality}/{}", category.file_name()),
                    format!("entry '{}' has weight 0", entry.name),
                ));
            }
        }

        Ok(Self {
            nationality,
            categories,
        })
    }

    pub fn nationality(&self) -> &str {
        &self.nationality
    }

    pub fn declares(&self, category: Category) -> bool {
        self.categories.contains_key(&category)
    }

    /// Declared categories in stable order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }

    /// Every entry of a category regardless of gender.
    pub fn entries(&self, category: Category) -> Result<&[NameEntry]> {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .ok_or_else(|| NameError::CategoryNotFound {
                nationality: self.nationality.clone(),
                category,
            })
    }

    /// Entries of a category applicable to `gender`, in table order.
    pub fn lookup(&self, category: Category, gender: Gender) -> Result<Vec<&NameEntry>> {
        let entries = self.entries(category)?;
        Ok(entries
            .iter()
            .filter(|entry| entry.gender.applies_to(gender))
            .collect())
    }

    /// True when any entry in the category declares an explicit weight.
    pub fn is_weighted(&self, category: Category) -> bool {
        self.categories
            .get(&category)
            .is_some_and(|entries| entries.iter().any(|entry| entry.weight.is_some()))
    }
}
