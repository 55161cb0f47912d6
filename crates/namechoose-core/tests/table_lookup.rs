use std::collections::BTreeMap;

use namechoose_core::{Category, Gender, GenderTag, NameEntry, NameError, NameTable};

fn russian_table() -> NameTable {
    let mut categories = BTreeMap::new();
    categories.insert(
        Category::Personal,
        vec![
            NameEntry::new("Ivan", GenderTag::Masculine),
            NameEntry::new("Olga", GenderTag::Feminine),
            NameEntry::new("Sasha", GenderTag::Neuter),
        ],
    );
    categories.insert(
        Category::Family,
        vec![
            NameEntry::new("Sidorov", GenderTag::Masculine).with_counterpart("Sidorova"),
            NameEntry::new("Sidorova", GenderTag::Feminine).with_counterpart("Sidorov"),
        ],
    );
    NameTable::new("Russian", categories).expect("valid table")
}

#[test]
fn lookup_filters_by_gender_and_keeps_neuter() {
    let table = russian_table();

    let masculine: Vec<&str> = table
        .lookup(Category::Personal, Gender::Masculine)
        .expect("personal declared")
        .into_iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(masculine, vec!["Ivan", "Sasha"]);

    let feminine: Vec<&str> = table
        .lookup(Category::Family, Gender::Feminine)
        .expect("family declared")
        .into_iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(feminine, vec!["Sidorova"]);
}

#[test]
fn lookup_of_undeclared_category_fails() {
    let table = russian_table();
    let result = table.lookup(Category::Additional, Gender::Feminine);
    assert!(matches!(
        result,
        Err(NameError::CategoryNotFound {
            category: Category::Additional,
            ..
        })
    ));
}

#[test]
fn declared_category_must_have_entries() {
    let mut categories = BTreeMap::new();
    categories.insert(Category::Personal, Vec::new());
    let result = NameTable::new("Latvian", categories);
    assert!(matches!(result, Err(NameError::Data { .. })));
}

#[test]
fn weighted_only_when_an_entry_declares_weight() {
    let mut categories = BTreeMap::new();
    categories.insert(
        Category::Personal,
        vec![
            NameEntry::new("Anna", GenderTag::Feminine).with_weight(3),
            NameEntry::new("Eva", GenderTag::Feminine),
        ],
    );
    categories.insert(
        Category::Family,
        vec![NameEntry::new("Nagy", GenderTag::Neuter)],
    );
    let table = NameTable::new("Hungarian", categories).expect("valid table");
    assert!(table.is_weighted(Category::Personal));
    assert!(!table.is_weighted(Category::Family));
}
