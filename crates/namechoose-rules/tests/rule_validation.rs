use std::collections::BTreeMap;

use serde_json::json;

use namechoose_core::{Category, GenderTag, NameEntry, NameTable};
use namechoose_rules::{
    NationalityFile, nationality_json_schema, validate, validate_nationality_json, validate_rule,
};

fn russian_document() -> serde_json::Value {
    json!({
        "name": "Russian",
        "alpha2": "ru",
        "alpha3": ["rus"],
        "rule": {
            "formats": [
                {
                    "slots": [
                        { "label": "given" },
                        { "label": "patronym", "derive": "patronym" },
                        { "label": "family" }
                    ]
                }
            ],
            "derivations": {
                "patronym": {
                    "parent": "masculine",
                    "suffixes": [
                        { "ending": "i", "strip": 1, "masculine": "evich", "feminine": "evna" },
                        { "masculine": "ovich", "feminine": "ovna" }
                    ]
                }
            }
        }
    })
}

fn table(entries: Vec<(Category, NameEntry)>) -> NameTable {
    let mut categories: BTreeMap<Category, Vec<NameEntry>> = BTreeMap::new();
    for (category, entry) in entries {
        categories.entry(category).or_default().push(entry);
    }
    NameTable::new("Russian", categories).expect("valid table")
}

fn codes(report: &namechoose_rules::ValidationReport) -> Vec<&str> {
    report.issues.iter().map(|issue| issue.code.as_str()).collect()
}

#[test]
fn well_formed_document_passes_schema() {
    let schema = serde_json::to_value(nationality_json_schema()).expect("schema json");
    let report = validate_nationality_json(&russian_document(), &schema).expect("compile schema");
    assert!(report.is_ok(), "unexpected issues: {:?}", report.issues);
}

#[test]
fn missing_rule_is_a_schema_violation() {
    let schema = serde_json::to_value(nationality_json_schema()).expect("schema json");
    let document = json!({ "name": "Klingon", "alpha2": "tl" });
    let report = validate_nationality_json(&document, &schema).expect("compile schema");
    assert!(!report.is_ok());
    assert_eq!(codes(&report), vec!["schema_violation"]);
}

#[test]
fn complete_table_has_no_issues() {
    let file: NationalityFile = serde_json::from_value(russian_document()).expect("parse");
    let table = table(vec![
        (Category::Personal, NameEntry::new("Ivan", GenderTag::Masculine)),
        (Category::Personal, NameEntry::new("Olga", GenderTag::Feminine)),
        (
            Category::Family,
            NameEntry::new("Sidorov", GenderTag::Masculine).with_counterpart("Sidorova"),
        ),
        (
            Category::Family,
            NameEntry::new("Sidorova", GenderTag::Feminine).with_counterpart("Sidorov"),
        ),
    ]);

    let report = validate(&file.rule, &table);
    assert!(report.issues.is_empty(), "unexpected issues: {:?}", report.issues);
}

#[test]
fn reports_structural_defects_in_order() {
    let mut document = russian_document();
    document["rule"]["formats"][0]["slots"][0]["inclusion"] = json!(1.5);
    document["rule"]["formats"][0]["slots"][1]["derive"] = json!("matronym");
    let file: NationalityFile = serde_json::from_value(document).expect("parse");

    let report = validate_rule(&file.rule);
    assert_eq!(codes(&report), vec!["invalid_inclusion", "unknown_derivation"]);
}

#[test]
fn reports_table_gaps_and_counterpart_errors() {
    let file: NationalityFile = serde_json::from_value(russian_document()).expect("parse");
    let table = table(vec![
        (Category::Personal, NameEntry::new("Olga", GenderTag::Feminine)),
        (Category::Personal, NameEntry::new("Olga", GenderTag::Feminine)),
        (
            Category::Family,
            NameEntry::new("Sidorov", GenderTag::Masculine).with_counterpart("Sidorova"),
        ),
        (
            Category::Family,
            NameEntry::new("Sidorova", GenderTag::Feminine).with_counterpart("Petrov"),
        ),
        (Category::Additional, NameEntry::new("Ilyich", GenderTag::Neuter)),
    ]);

    let report = validate(&file.rule, &table);
    assert_eq!(
        codes(&report),
        vec![
            "empty_for_gender",
            "no_eligible_base",
            "unused_category",
            "duplicate_entry",
            "counterpart_mismatch",
            "counterpart_missing",
        ]
    );
    assert!(!report.is_ok());
    assert_eq!(report.warnings().count(), 2);
}

#[test]
fn optional_slot_may_lack_a_gender() {
    let mut document = russian_document();
    document["rule"]["formats"][0]["slots"] = json!([
        { "label": "given" },
        { "label": "additional", "inclusion": 0.2 }
    ]);
    let file: NationalityFile = serde_json::from_value(document).expect("parse");
    let table = table(vec![
        (Category::Personal, NameEntry::new("Ivan", GenderTag::Masculine)),
        (Category::Personal, NameEntry::new("Olga", GenderTag::Feminine)),
        (Category::Additional, NameEntry::new("Ilya", GenderTag::Masculine)),
    ]);

    let report = validate(&file.rule, &table);
    assert!(report.issues.is_empty(), "unexpected issues: {:?}", report.issues);
}

#[test]
fn same_name_with_other_fields_is_a_similar_entry() {
    let file: NationalityFile = serde_json::from_value(russian_document()).expect("parse");
    let table = table(vec![
        (Category::Personal, NameEntry::new("Ivan", GenderTag::Masculine)),
        (Category::Personal, NameEntry::new("Sasha", GenderTag::Masculine)),
        (Category::Personal, NameEntry::new("Sasha", GenderTag::Feminine)),
        (Category::Personal, NameEntry::new("Sasha", GenderTag::Feminine)),
        (Category::Family, NameEntry::new("Sidorov", GenderTag::Neuter)),
    ]);

    let report = validate(&file.rule, &table);
    assert_eq!(codes(&report), vec!["similar_entry"]);
    assert!(
        report.issues[0].message.contains("gender 'M' vs. 'F'"),
        "{}",
        report.issues[0].message
    );
}

#[test]
fn look_alike_letters_from_another_script_are_errors() {
    let file: NationalityFile = serde_json::from_value(russian_document()).expect("parse");
    let table = table(vec![
        // Cyrillic "а" inside a Latin name.
        (Category::Personal, NameEntry::new("Iv\u{0430}n", GenderTag::Masculine)),
        (Category::Personal, NameEntry::new("Olga", GenderTag::Feminine)),
        (Category::Family, NameEntry::new("Sidorov-Lé", GenderTag::Neuter)),
    ]);

    let report = validate(&file.rule, &table);
    assert_eq!(codes(&report), vec!["mixed_script"]);
    assert!(report.issues[0].message.contains("Latin"));
    assert!(report.issues[0].message.contains("Cyrillic"));
}

#[test]
fn romanisations_are_checked_against_the_declared_standard() {
    let document = json!({
        "name": "Armenian",
        "alpha2": "hy",
        "rule": {
            "formats": [ { "slots": [ { "label": "given" } ] } ],
            "transliteration": {
                "standard": "test",
                "rules": [
                    { "from": "Ա", "to": "A" },
                    { "from": "ր", "to": "r" },
                    { "from": "ա", "to": "a" },
                    { "from": "մ", "to": "m" },
                    { "from": "ն", "to": "n" },
                    { "from": "ի", "to": "i" }
                ]
            }
        }
    });
    let file: NationalityFile = serde_json::from_value(document).expect("parse");
    let mut categories = BTreeMap::new();
    categories.insert(
        Category::Personal,
        vec![
            NameEntry::new("Արամ", GenderTag::Masculine).with_romanisation("Aram"),
            NameEntry::new("Անի", GenderTag::Feminine).with_romanisation("Anny"),
        ],
    );
    let table = NameTable::new("Armenian", categories).expect("table");

    let report = validate(&file.rule, &table);
    assert_eq!(codes(&report), vec!["romanisation_mismatch"]);
    assert!(report.is_ok());
    assert!(
        report.issues[0].message.contains("expected 'Ani'"),
        "{}",
        report.issues[0].message
    );
}
