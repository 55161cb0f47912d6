use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use jsonschema::JSONSchema;
use serde_json::Value;
use unicode_script::{Script, UnicodeScript};

use namechoose_core::{Category, Gender, GenderTag, NameEntry, NameTable};

use crate::derive::is_eligible;
use crate::errors::{IssueSeverity, RuleError, ValidationIssue, ValidationReport};
use crate::model::NationalityRule;

/// Validate a `nationality.json` document against its JSON Schema.
pub fn validate_nationality_json(
    document: &Value,
    schema: &Value,
) -> Result<ValidationReport, RuleError> {
    let compiled =
        JSONSchema::compile(schema).map_err(|err| RuleError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(document) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    Ok(report)
}

/// Checks that need only the rule.
pub fn validate_rule(rule: &NationalityRule) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_formats(rule, &mut report);
    validate_derivations(rule, &mut report);
    report
}

/// Checks that pair the rule with the nationality's table.
pub fn validate_rule_against_table(rule: &NationalityRule, table: &NameTable) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_slot_categories(rule, table, &mut report);
    validate_derivation_bases(rule, table, &mut report);
    validate_unused_categories(rule, table, &mut report);
    validate_duplicates(table, &mut report);
    validate_counterparts(table, &mut report);
    validate_scripts(table, &mut report);
    validate_romanisations(rule, table, &mut report);
    report
}

/// Every check, in reporting order. Issues are returned, never raised.
pub fn validate(rule: &NationalityRule, table: &NameTable) -> ValidationReport {
    let mut report = validate_rule(rule);
    report.merge(validate_rule_against_table(rule, table));
    report
}

fn validate_formats(rule: &NationalityRule, report: &mut ValidationReport) {
    if rule.formats.is_empty() {
        report.push(
            ValidationIssue::error("empty_rule", "/rule/formats", "rule declares no formats")
                .with_hint("add at least one format"),
        );
        return;
    }

    for (fi, format) in rule.formats.iter().enumerate() {
        let base_path = format!("/rule/formats/{fi}");
        if format.weight == 0 {
            report.push(
                ValidationIssue::error(
                    "invalid_weight",
                    format!("{base_path}/weight"),
                    "format weight must be greater than zero",
                )
                .with_hint("remove the format or set a positive weight"),
            );
        }
        if format.slots.is_empty() {
            report.push(ValidationIssue::error(
                "empty_format",
                format!("{base_path}/slots"),
                "format declares no slots",
            ));
        }
        for (si, slot) in format.slots.iter().enumerate() {
            if !(0.0..=1.0).contains(&slot.inclusion) {
                report.push(ValidationIssue::error(
                    "invalid_inclusion",
                    format!("{base_path}/slots/{si}/inclusion"),
                    format!(
                        "inclusion probability {} is outside [0, 1]",
                        slot.inclusion
                    ),
                ));
            }
        }
    }
}

fn validate_derivations(rule: &NationalityRule, report: &mut ValidationReport) {
    for (fi, format) in rule.formats.iter().enumerate() {
        for (si, slot) in format.slots.iter().enumerate() {
            if let Some(name) = &slot.derive
                && rule.derivation(name).is_none()
            {
                report.push(
                    ValidationIssue::error(
                        "unknown_derivation",
                        format!("/rule/formats/{fi}/slots/{si}/derive"),
                        format!("derivation '{name}' is not defined"),
                    )
                    .with_hint("declare it under rule.derivations"),
                );
            }
        }
    }

    for (name, derivation) in &rule.derivations {
        if derivation.suffixes.is_empty() {
            report.push(ValidationIssue::error(
                "empty_suffix_rules",
                format!("/rule/derivations/{name}/suffixes"),
                format!("derivation '{name}' has no suffix rules"),
            ));
        }
    }
}

fn validate_slot_categories(
    rule: &NationalityRule,
    table: &NameTable,
    report: &mut ValidationReport,
) {
    let mut missing = BTreeSet::new();
    let mut empty = BTreeSet::new();

    for (fi, format) in rule.formats.iter().enumerate() {
        for (si, slot) in format.slots.iter().enumerate() {
            let category = slot.category();
            let path = format!("/rule/formats/{fi}/slots/{si}");
            if !table.declares(category) {
                if missing.insert(category) {
                    report.push(
                        ValidationIssue::error(
                            "missing_category",
                            path,
                            format!(
                                "{} names are used by the rule but {} is missing",
                                table.nationality(),
                                category.file_name()
                            ),
                        )
                        .with_hint(format!("add {}", category.file_name())),
                    );
                }
                continue;
            }
            if slot.derive.is_some() || !slot.gendered || !slot.is_required() {
                continue;
            }
            for gender in Gender::ALL {
                let has_entries = table
                    .lookup(category, gender)
                    .is_ok_and(|entries| !entries.is_empty());
                if !has_entries && empty.insert((category, gender)) {
                    report.push(ValidationIssue::error(
                        "empty_for_gender",
                        path.clone(),
                        format!(
                            "no {gender} {} {category} names",
                            table.nationality()
                        ),
                    ));
                }
            }
        }
    }
}

fn validate_derivation_bases(
    rule: &NationalityRule,
    table: &NameTable,
    report: &mut ValidationReport,
) {
    let mut checked = HashSet::new();

    for slot in rule.slots() {
        let Some(name) = &slot.derive else {
            continue;
        };
        let Some(derivation) = rule.derivation(name) else {
            continue;
        };
        let category = slot.category();
        if !checked.insert((name.as_str(), category)) {
            continue;
        }
        let Ok(entries) = table.entries(category) else {
            continue;
        };
        if !entries.iter().any(|entry| is_eligible(derivation, entry)) {
            report.push(
                ValidationIssue::error(
                    "no_eligible_base",
                    format!("/rule/derivations/{name}"),
                    format!(
                        "no {} {category} name can serve as the {} parent for '{name}'",
                        table.nationality(),
                        derivation.parent
                    ),
                )
                .with_hint(if derivation.requires_stem {
                    "add a stem to the parent names"
                } else {
                    "add a suffix rule matching the parent names"
                }),
            );
        }
    }
}

fn validate_unused_categories(
    rule: &NationalityRule,
    table: &NameTable,
    report: &mut ValidationReport,
) {
    let used: BTreeSet<Category> = rule.slots().map(|slot| slot.category()).collect();
    for category in table.categories() {
        if !used.contains(&category) {
            let count = table.entries(category).map(<[_]>::len).unwrap_or(0);
            report.push(ValidationIssue::warning(
                "unused_category",
                format!("{}/{}", table.nationality(), category.file_name()),
                format!(
                    "found {count} {} {category} names that no format uses",
                    table.nationality()
                ),
            ));
        }
    }
}

fn validate_duplicates(table: &NameTable, report: &mut ValidationReport) {
    for category in table.categories() {
        let Ok(entries) = table.entries(category) else {
            continue;
        };
        let path = format!("{}/{}", table.nationality(), category.file_name());
        let mut first: HashMap<&str, &NameEntry> = HashMap::new();
        let mut reported = HashSet::new();

        for entry in entries {
            let Some(&earlier) = first.get(entry.name.as_str()) else {
                first.insert(entry.name.as_str(), entry);
                continue;
            };
            let key = (
                entry.name.as_str(),
                entry.gender,
                entry.romanisation.as_deref(),
                entry.counterpart.as_deref(),
            );
            if !reported.insert(key) {
                continue;
            }

            let differences = entry_differences(earlier, entry);
            if differences.is_empty() {
                let romanised = entry
                    .romanisation
                    .as_deref()
                    .map(|value| format!(" ('{value}')"))
                    .unwrap_or_default();
                report.push(ValidationIssue::warning(
                    "duplicate_entry",
                    path.clone(),
                    format!(
                        "{} name '{}'{romanised} has multiple entries",
                        table.nationality(),
                        entry.name
                    ),
                ));
            } else {
                report.push(ValidationIssue::warning(
                    "similar_entry",
                    path.clone(),
                    format!(
                        "{} name '{}' has multiple similar entries ({})",
                        table.nationality(),
                        entry.name,
                        differences.join(", ")
                    ),
                ));
            }
        }
    }
}

fn entry_differences(left: &NameEntry, right: &NameEntry) -> Vec<String> {
    let shown = |value: Option<&str>| value.unwrap_or("").to_string();
    let mut differences = Vec::new();
    if left.romanisation != right.romanisation {
        differences.push(format!(
            "romanised as '{}' vs. '{}'",
            shown(left.romanisation.as_deref()),
            shown(right.romanisation.as_deref())
        ));
    }
    if left.gender != right.gender {
        differences.push(format!("gender '{}' vs. '{}'", left.gender, right.gender));
    }
    if left.counterpart != right.counterpart {
        differences.push(format!(
            "counterpart '{}' vs. '{}'",
            shown(left.counterpart.as_deref()),
            shown(right.counterpart.as_deref())
        ));
    }
    differences
}

fn validate_counterparts(table: &NameTable, report: &mut ValidationReport) {
    let Ok(entries) = table.entries(Category::Family) else {
        return;
    };
    let path = format!("{}/{}", table.nationality(), Category::Family.file_name());

    let mut by_name: BTreeMap<&str, Vec<_>> = BTreeMap::new();
    for entry in entries {
        by_name.entry(entry.name.as_str()).or_default().push(entry);
    }

    for entry in entries {
        let Some(counterpart) = &entry.counterpart else {
            continue;
        };
        let Some(gender) = entry.gender.gender() else {
            report.push(ValidationIssue::error(
                "counterpart_ungendered",
                path.clone(),
                format!(
                    "ungendered name '{}' has a counterpart ('{counterpart}')",
                    entry.name
                ),
            ));
            continue;
        };
        let Some(candidates) = by_name.get(counterpart.as_str()) else {
            report.push(ValidationIssue::error(
                "counterpart_missing",
                path.clone(),
                format!(
                    "counterpart '{counterpart}' of '{}' is not in the table",
                    entry.name
                ),
            ));
            continue;
        };
        let opposite = GenderTag::from(gender.opposite());
        let Some(partner) = candidates.iter().find(|other| other.gender == opposite) else {
            report.push(ValidationIssue::error(
                "counterpart_gender",
                path.clone(),
                format!(
                    "counterpart '{counterpart}' of {gender} name '{}' is not {}",
                    entry.name,
                    gender.opposite()
                ),
            ));
            continue;
        };
        if partner.counterpart.as_deref() != Some(entry.name.as_str()) {
            let (masculine, feminine) = match gender {
                Gender::Masculine => (entry.name.as_str(), counterpart.as_str()),
                Gender::Feminine => (counterpart.as_str(), entry.name.as_str()),
            };
            report.push(ValidationIssue::error(
                "counterpart_mismatch",
                path.clone(),
                format!("mismatched surnames (masculine '{masculine}', feminine '{feminine}')"),
            ));
        }
    }
}

/// Letters of one name must share a script; Common and Inherited marks
/// (spaces, hyphens, combining accents) go with any.
fn validate_scripts(table: &NameTable, report: &mut ValidationReport) {
    for category in table.categories() {
        let Ok(entries) = table.entries(category) else {
            continue;
        };
        let path = format!("{}/{}", table.nationality(), category.file_name());
        let values = entries.iter().flat_map(|entry| {
            std::iter::once(entry.name.as_str()).chain(entry.romanisation.as_deref())
        });
        for value in values {
            if let Some((first, second)) = mixed_scripts(value) {
                report.push(
                    ValidationIssue::error(
                        "mixed_script",
                        path.clone(),
                        format!(
                            "'{value}' mixes {} and {} (at least)",
                            first.full_name(),
                            second.full_name()
                        ),
                    )
                    .with_hint("look for a look-alike letter from another script"),
                );
            }
        }
    }
}

fn mixed_scripts(value: &str) -> Option<(Script, Script)> {
    let mut found = None;
    for ch in value.chars() {
        let script = ch.script();
        if matches!(script, Script::Common | Script::Inherited | Script::Unknown) {
            continue;
        }
        match found {
            None => found = Some(script),
            Some(first) if first != script => return Some((first, script)),
            Some(_) => {}
        }
    }
    None
}

fn validate_romanisations(
    rule: &NationalityRule,
    table: &NameTable,
    report: &mut ValidationReport,
) {
    let Some(transliteration) = &rule.transliteration else {
        return;
    };
    let used: BTreeSet<Category> = rule.slots().map(|slot| slot.category()).collect();

    for category in used {
        let Ok(entries) = table.entries(category) else {
            continue;
        };
        let path = format!("{}/{}", table.nationality(), category.file_name());
        for entry in entries {
            let Some(romanised) = &entry.romanisation else {
                continue;
            };
            if !transliteration.accepts(&entry.name, romanised) {
                report.push(ValidationIssue::warning(
                    "romanisation_mismatch",
                    path.clone(),
                    format!(
                        "{} name '{}' is romanised as '{romanised}', expected '{}' ({})",
                        table.nationality(),
                        entry.name,
                        transliteration.apply(&entry.name),
                        transliteration.standard
                    ),
                ));
            }
        }
    }
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
