use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use namechoose_core::{Category, GenderTag, NameEntry, NameError, NameTable, Result};
use namechoose_rules::{NationalityFile, nationality_json_schema, validate_nationality_json};

/// File holding the identifiers and rule of a nationality.
pub const NATIONALITY_FILE: &str = "nationality.json";

/// One row of a name table.
#[derive(Debug, Deserialize)]
struct EntryRecord {
    name: String,
    #[serde(default)]
    romanisation: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    weight: Option<u32>,
    #[serde(default)]
    stem: Option<String>,
    #[serde(default)]
    counterpart: Option<String>,
}

/// A nationality as read from its data directory.
#[derive(Debug, Clone)]
pub struct LoadedNationality {
    pub file: NationalityFile,
    pub table: NameTable,
}

/// Reads nationality directories from a data root.
#[derive(Debug)]
pub struct DataLoader {
    root: PathBuf,
    schema: Value,
}

impl DataLoader {
    pub fn new(root: PathBuf) -> Result<Self> {
        let schema = serde_json::to_value(nationality_json_schema())
            .map_err(|err| NameError::data("nationality schema", err.to_string()))?;
        Ok(Self { root, schema })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directories under the root that hold a `nationality.json`, sorted.
    pub fn nationality_dirs(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.root).map_err(|err| {
            NameError::data(
                self.root.display().to_string(),
                format!("failed to read data directory: {err}"),
            )
        })?;

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|err| NameError::data(self.root.display().to_string(), err.to_string()))?;
            let path = entry.path();
            if path.is_dir() && path.join(NATIONALITY_FILE).is_file() {
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    /// Load the nationality answering to `identifier` (canonical name or ISO
    /// code, case-insensitive), whatever its directory is called.
    pub fn load(&self, identifier: &str) -> Result<LoadedNationality> {
        let wanted = identifier.trim().to_lowercase();
        for dir in self.nationality_dirs()? {
            let file = self.read_nationality_file(&dir.join(NATIONALITY_FILE))?;
            if file.identifiers().any(|id| id.to_lowercase() == wanted) {
                return load_tables(&dir, file);
            }
        }
        Err(NameError::UnknownNationality(identifier.to_string()))
    }

    pub fn load_dir(&self, dir: &Path) -> Result<LoadedNationality> {
        let file = self.read_nationality_file(&dir.join(NATIONALITY_FILE))?;
        load_tables(dir, file)
    }

    fn read_nationality_file(&self, path: &Path) -> Result<NationalityFile> {
        let origin = path.display().to_string();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(NameError::data(origin, "file not found"));
            }
            Err(err) => return Err(NameError::data(origin, format!("failed to read: {err}"))),
        };

        let document: Value = serde_json::from_str(&contents)
            .map_err(|err| NameError::data(origin.clone(), format!("invalid json: {err}")))?;

        let structural = validate_nationality_json(&document, &self.schema)
            .map_err(|err| NameError::data(origin.clone(), err.to_string()))?;
        if !structural.is_ok() {
            let details: Vec<String> = structural
                .errors()
                .map(|issue| format!("{}: {}", issue.path, issue.message))
                .collect();
            return Err(NameError::data(origin, details.join("; ")));
        }

        serde_json::from_value(document).map_err(|err| NameError::data(origin, err.to_string()))
    }
}

fn load_tables(dir: &Path, file: NationalityFile) -> Result<LoadedNationality> {
    let mut categories = BTreeMap::new();
    for category in Category::ALL {
        let path = dir.join(category.file_name());
        if path.is_file() {
            categories.insert(category, read_entries(&path)?);
        }
    }
    if categories.is_empty() {
        return Err(NameError::data(
            dir.display().to_string(),
            "no name tables found",
        ));
    }

    debug!(
        nationality = %file.name,
        categories = categories.len(),
        "nationality data read"
    );

    let table = NameTable::new(file.name.clone(), categories)?;
    Ok(LoadedNationality { file, table })
}

fn read_entries(path: &Path) -> Result<Vec<NameEntry>> {
    let origin = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|err| NameError::data(origin.clone(), err.to_string()))?;

    let mut entries = Vec::new();
    for (index, record) in reader.deserialize::<EntryRecord>().enumerate() {
        let line = index + 2;
        let record =
            record.map_err(|err| NameError::data(format!("{origin}:{line}"), err.to_string()))?;
        entries.push(entry_from_record(record).map_err(|message| {
            NameError::data(format!("{origin}:{line}"), message)
        })?);
    }

    Ok(entries)
}

fn entry_from_record(record: EntryRecord) -> std::result::Result<NameEntry, String> {
    if record.name.is_empty() {
        return Err("empty name".to_string());
    }
    let marker = record.gender.unwrap_or_default();
    let gender =
        GenderTag::parse(&marker).ok_or_else(|| format!("unknown gender '{marker}'"))?;

    Ok(NameEntry {
        name: record.name,
        romanisation: record.romanisation.filter(|value| !value.is_empty()),
        gender,
        weight: record.weight,
        stem: record.stem.filter(|value| !value.is_empty()),
        counterpart: record.counterpart.filter(|value| !value.is_empty()),
    })
}

/// Data bundled with this crate.
pub fn default_data_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("names")
}
