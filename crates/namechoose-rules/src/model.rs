use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use namechoose_core::{Category, Gender, SlotLabel};

/// Contents of a `nationality.json` file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NationalityFile {
    /// Canonical English name (ex.: Russian).
    pub name: String,
    /// ISO 639-1 two-letter code.
    pub alpha2: String,
    /// ISO 639-2/639-3 three-letter codes (bibliographic and terminologic).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alpha3: Vec<String>,
    /// Naming convention of the nationality.
    pub rule: NationalityRule,
}

impl NationalityFile {
    /// Every identifier the nationality answers to, canonical name first.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(std::iter::once(self.alpha2.as_str()))
            .chain(self.alpha3.iter().map(String::as_str))
    }
}

/// How names of one nationality are composed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NationalityRule {
    /// Alternative layouts; one is drawn per generated name.
    pub formats: Vec<NameFormat>,
    /// How chosen components are joined.
    #[serde(default)]
    pub join: JoinSpec,
    /// Named derivations referenced by slots (ex.: "patronym").
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub derivations: BTreeMap<String, Derivation>,
    /// Standard the table's romanisations are checked against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<Transliteration>,
}

impl NationalityRule {
    pub fn derivation(&self, name: &str) -> Option<&Derivation> {
        self.derivations.get(name)
    }

    /// All slots across every format.
    pub fn slots(&self) -> impl Iterator<Item = &ComponentSlot> {
        self.formats.iter().flat_map(|format| format.slots.iter())
    }
}

/// An ordered sequence of slots with a selection weight.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NameFormat {
    /// Relative weight of this format among the rule's formats.
    #[serde(default = "default_weight")]
    pub weight: u32,
    pub slots: Vec<ComponentSlot>,
}

/// One position in a composed name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ComponentSlot {
    pub label: SlotLabel,
    /// Table category to draw from; defaults from the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Probability the slot is present (1.0 = required).
    #[serde(default = "default_inclusion")]
    pub inclusion: f64,
    /// Whether candidates are filtered by the requested gender.
    #[serde(default = "default_true")]
    pub gendered: bool,
    /// Derivation applied to a parent's given name instead of a lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derive: Option<String>,
}

impl ComponentSlot {
    pub fn new(label: SlotLabel) -> Self {
        Self {
            label,
            category: None,
            inclusion: 1.0,
            gendered: true,
            derive: None,
        }
    }

    pub fn derived(label: SlotLabel, derivation: impl Into<String>) -> Self {
        Self {
            derive: Some(derivation.into()),
            ..Self::new(label)
        }
    }

    pub fn optional(mut self, inclusion: f64) -> Self {
        self.inclusion = inclusion;
        self
    }

    /// Category looked up for this slot (the parent's category when derived).
    pub fn category(&self) -> Category {
        self.category.unwrap_or(match self.label {
            SlotLabel::Given | SlotLabel::Patronym | SlotLabel::Matronym => Category::Personal,
            SlotLabel::Additional => Category::Additional,
            SlotLabel::Family | SlotLabel::Patriname | SlotLabel::Matriname => Category::Family,
        })
    }

    pub fn is_required(&self) -> bool {
        self.inclusion >= 1.0
    }
}

/// Join policy for the final string.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JoinSpec {
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Separator for the romanised form; defaults to a single space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romanised_separator: Option<String>,
    #[serde(default)]
    pub capitalization: Capitalization,
}

impl Default for JoinSpec {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            romanised_separator: None,
            capitalization: Capitalization::default(),
        }
    }
}

impl JoinSpec {
    pub fn romanised_separator(&self) -> &str {
        self.romanised_separator.as_deref().unwrap_or(" ")
    }
}

/// Capitalization applied to each component before joining.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capitalization {
    /// Keep table spelling.
    #[default]
    AsIs,
    /// Upper-case the first letter of every word and hyphenated part.
    Title,
    /// Upper-case surname slots entirely.
    UpperFamily,
}

/// A gendered derivation from a parent's given name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Derivation {
    /// Gender of the parent whose given name is the base.
    pub parent: Gender,
    /// Only entries carrying a `stem` are eligible.
    #[serde(default)]
    pub requires_stem: bool,
    /// Reuse the parent already drawn for this derivation in the same name.
    #[serde(default = "default_true")]
    pub reuse_base: bool,
    /// Ordered suffix rules; the first matching ending wins.
    pub suffixes: Vec<SuffixRule>,
}

/// Replace the end of a base name with a gendered suffix.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SuffixRule {
    /// Ending the base must have; empty matches every base.
    #[serde(default)]
    pub ending: String,
    /// Characters removed from the base before appending.
    #[serde(default)]
    pub strip: usize,
    pub masculine: String,
    pub feminine: String,
}

impl SuffixRule {
    pub fn suffix_for(&self, gender: Gender) -> &str {
        match gender {
            Gender::Masculine => &self.masculine,
            Gender::Feminine => &self.feminine,
        }
    }
}

/// Ordered character rules mapping a native script to Latin.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Transliteration {
    /// Name of the standard (ex.: "BGN/PCGN").
    pub standard: String,
    /// Compare case-sensitively; only meaningful for bicameral scripts.
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
    /// Tried in order at each position; the first match wins.
    pub rules: Vec<TransliterationRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TransliterationRule {
    pub from: String,
    pub to: String,
    /// Only applies at the start of a word.
    #[serde(default)]
    pub initial: bool,
}

fn default_weight() -> u32 {
    1
}

fn default_inclusion() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_separator() -> String {
    " ".to_string()
}
