//! Declarative naming-convention rules for namechoose.
//!
//! A `nationality.json` file carries the identifiers of one nationality and
//! its `NationalityRule`: the alternative name formats, the join policy and
//! the gendered derivations (patronyms, matronyms). This crate owns the rule
//! model, its JSON Schema, the pure derivation and transliteration
//! transforms, and the checks that pair a rule with its name table.

pub mod derive;
pub mod errors;
pub mod model;
pub mod schema;
pub mod translit;
pub mod validate;

pub use derive::{derive_name, is_eligible};
pub use errors::{IssueSeverity, RuleError, ValidationIssue, ValidationReport};
pub use model::{
    Capitalization, ComponentSlot, Derivation, JoinSpec, NameFormat, NationalityFile,
    NationalityRule, SuffixRule, Transliteration, TransliterationRule,
};
pub use schema::nationality_json_schema;
pub use validate::{validate, validate_nationality_json, validate_rule, validate_rule_against_table};
