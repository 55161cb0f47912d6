//! Pure patronym/matronym transforms.

use namechoose_core::{Gender, NameEntry};

use crate::model::{Derivation, SuffixRule};

/// True when `entry` can serve as the parent name for `derivation`.
pub fn is_eligible(derivation: &Derivation, entry: &NameEntry) -> bool {
    entry.gender.applies_to(derivation.parent) && matching_rule(derivation, entry).is_some()
}

/// Derive the child's component from a parent's entry.
///
/// Returns `None` when the entry is not eligible. The result depends only on
/// the inputs, so deriving twice from the same entry yields the same string.
pub fn derive_name(derivation: &Derivation, entry: &NameEntry, gender: Gender) -> Option<String> {
    let (base, rule) = matching_rule(derivation, entry)?;
    let kept = base.chars().count().checked_sub(rule.strip)?;
    let mut derived: String = base.chars().take(kept).collect();
    derived.push_str(rule.suffix_for(gender));
    Some(derived)
}

fn matching_rule<'a>(
    derivation: &'a Derivation,
    entry: &'a NameEntry,
) -> Option<(&'a str, &'a SuffixRule)> {
    let base = match (&entry.stem, derivation.requires_stem) {
        (Some(stem), _) => stem.as_str(),
        (None, false) => entry.name.as_str(),
        (None, true) => return None,
    };
    let lowered = base.to_lowercase();
    derivation
        .suffixes
        .iter()
        .find(|rule| {
            lowered.ends_with(&rule.ending.to_lowercase()) && rule.strip <= base.chars().count()
        })
        .map(|rule| (base, rule))
}
