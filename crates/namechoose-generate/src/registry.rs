use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use namechoose_core::{NameError, NameTable, Result};
use namechoose_rules::{NationalityFile, NationalityRule, ValidationIssue, validate};

use crate::assets::{DataLoader, LoadedNationality};

/// A registered nationality: its identifiers, rule and name table.
#[derive(Debug, Clone)]
pub struct NationalityDescriptor {
    file: NationalityFile,
    table: NameTable,
}

impl NationalityDescriptor {
    pub fn new(file: NationalityFile, table: NameTable) -> Self {
        Self { file, table }
    }

    /// Canonical name (ex.: "Russian").
    pub fn name(&self) -> &str {
        &self.file.name
    }

    pub fn alpha2(&self) -> &str {
        &self.file.alpha2
    }

    pub fn alpha3(&self) -> &[String] {
        &self.file.alpha3
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.file.identifiers()
    }

    pub fn rule(&self) -> &NationalityRule {
        &self.file.rule
    }

    pub fn table(&self) -> &NameTable {
        &self.table
    }
}

impl From<LoadedNationality> for NationalityDescriptor {
    fn from(loaded: LoadedNationality) -> Self {
        Self::new(loaded.file, loaded.table)
    }
}

/// Immutable set of nationalities, resolvable by any identifier.
#[derive(Debug, Clone)]
pub struct NationalityRegistry {
    descriptors: Vec<NationalityDescriptor>,
    index: HashMap<String, usize>,
}

impl NationalityRegistry {
    /// Load every nationality directory under `root`.
    pub fn load(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(NameError::data(
                root.display().to_string(),
                "data directory not found",
            ));
        }

        let loader = DataLoader::new(root.to_path_buf())?;
        let mut descriptors = Vec::new();
        for dir in loader.nationality_dirs()? {
            descriptors.push(NationalityDescriptor::from(loader.load_dir(&dir)?));
        }
        if descriptors.is_empty() {
            return Err(NameError::data(
                root.display().to_string(),
                "no nationalities found",
            ));
        }

        let registry = Self::from_descriptors(descriptors)?;
        info!(
            root = %root.display(),
            nationalities = registry.len(),
            "nationality registry loaded"
        );
        Ok(registry)
    }

    /// Build a registry, rejecting identifiers shared by two nationalities.
    pub fn from_descriptors(mut descriptors: Vec<NationalityDescriptor>) -> Result<Self> {
        descriptors.sort_by(|left, right| left.name().cmp(right.name()));

        let mut index = HashMap::new();
        for (position, descriptor) in descriptors.iter().enumerate() {
            for identifier in descriptor.identifiers() {
                let key = identifier.to_lowercase();
                if let Some(previous) = index.insert(key, position)
                    && previous != position
                {
                    return Err(NameError::data(
                        descriptor.name(),
                        format!(
                            "identifier '{identifier}' is also used by {}",
                            descriptors[previous].name()
                        ),
                    ));
                }
            }
        }

        Ok(Self { descriptors, index })
    }

    /// Resolve a canonical name or ISO code, case-insensitively.
    pub fn resolve(&self, identifier: &str) -> Result<&NationalityDescriptor> {
        self.index
            .get(&identifier.trim().to_lowercase())
            .map(|&position| &self.descriptors[position])
            .ok_or_else(|| NameError::UnknownNationality(identifier.to_string()))
    }

    /// Every nationality, ordered by canonical name.
    pub fn list_all(&self) -> &[NationalityDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Consistency issues of one nationality; never fails.
    pub fn validate(&self, descriptor: &NationalityDescriptor) -> Vec<ValidationIssue> {
        let issues = validate(descriptor.rule(), descriptor.table()).into_issues();
        for issue in &issues {
            warn!(
                nationality = %descriptor.name(),
                severity = %issue.severity,
                code = %issue.code,
                "{}",
                issue.message
            );
        }
        issues
    }

    /// Issues of every nationality, paired with its canonical name.
    pub fn validate_all(&self) -> Vec<(&str, Vec<ValidationIssue>)> {
        self.descriptors
            .iter()
            .map(|descriptor| (descriptor.name(), self.validate(descriptor)))
            .collect()
    }
}
