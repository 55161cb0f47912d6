use std::collections::BTreeMap;
use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

use namechoose_core::{Category, Gender, GenderTag, NameEntry, NameError, NameTable};
use namechoose_generate::{
    GenerateOptions, GenerationEngine, NationalityDescriptor, NationalityRegistry,
    default_data_root,
};
use namechoose_rules::NationalityFile;

fn bundled() -> NationalityRegistry {
    NationalityRegistry::load(&default_data_root()).expect("load bundled data")
}

fn options(nationality: Option<&str>, gender: Option<Gender>, count: usize) -> GenerateOptions {
    GenerateOptions {
        nationality: nationality.map(str::to_string),
        gender,
        count,
        seed: Some(1234),
    }
}

#[test]
fn generate_yields_exactly_count_names() {
    let registry = bundled();
    let engine = GenerationEngine::new(&registry);

    let names: Vec<_> = engine
        .generate(&options(Some("Spanish"), Some(Gender::Feminine), 25))
        .expect("start batch")
        .collect::<Result<_, _>>()
        .expect("generate");

    assert_eq!(names.len(), 25);
    for name in &names {
        assert_eq!(name.nationality(), "Spanish");
        assert_eq!(name.gender(), Gender::Feminine);
        assert_eq!(name.components().len(), 3);
    }
}

#[test]
fn fixed_seed_reproduces_the_sequence() {
    let registry = bundled();
    let engine = GenerationEngine::new(&registry);
    let batch = options(None, None, 40);

    let first: Vec<String> = engine
        .generate(&batch)
        .expect("start batch")
        .map(|name| name.expect("generate").to_string())
        .collect();
    let second: Vec<String> = engine
        .generate(&batch)
        .expect("start batch")
        .map(|name| name.expect("generate").to_string())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn batch_reports_its_seed() {
    let registry = bundled();
    let engine = GenerationEngine::new(&registry);

    let names = engine.generate(&options(Some("da"), None, 1)).expect("start batch");
    assert_eq!(names.seed(), Some(1234));

    let unseeded = GenerateOptions {
        count: 1,
        ..GenerateOptions::default()
    };
    let names = engine.generate(&unseeded).expect("start batch");
    assert!(names.seed().is_some());
}

#[test]
fn missing_nationality_draws_one_per_name() {
    let registry = bundled();
    let engine = GenerationEngine::new(&registry);

    let nationalities: HashSet<String> = engine
        .generate(&options(None, None, 200))
        .expect("start batch")
        .map(|name| name.expect("generate").nationality().to_string())
        .collect();

    assert!(nationalities.len() > 5, "{nationalities:?}");
}

#[test]
fn zero_count_is_an_invalid_argument() {
    let registry = bundled();
    let engine = GenerationEngine::new(&registry);

    let err = engine
        .generate(&options(Some("Russian"), None, 0))
        .expect_err("count 0 must fail");
    assert!(matches!(err, NameError::InvalidArgument(_)));
}

#[test]
fn unknown_nationality_fails_before_any_name() {
    let registry = bundled();
    let engine = GenerationEngine::new(&registry);

    let err = engine
        .generate(&options(Some("Klingon"), None, 3))
        .expect_err("Klingon must fail");
    assert!(matches!(err, NameError::UnknownNationality(_)));
}

fn feminine_only_registry() -> NationalityRegistry {
    let file: NationalityFile = serde_json::from_value(json!({
        "name": "Testish",
        "alpha2": "tt",
        "rule": { "formats": [ { "slots": [ { "label": "given" } ] } ] }
    }))
    .expect("parse nationality");

    let mut categories = BTreeMap::new();
    categories.insert(
        Category::Personal,
        vec![NameEntry::new("Maja", GenderTag::Feminine)],
    );
    let table = NameTable::new("Testish", categories).expect("table");

    NationalityRegistry::from_descriptors(vec![NationalityDescriptor::new(file, table)])
        .expect("registry")
}

#[test]
fn first_failure_ends_the_batch() {
    let registry = feminine_only_registry();
    let engine = GenerationEngine::new(&registry);

    let mut names = engine
        .generate_with_rng(
            Some("tt"),
            Some(Gender::Masculine),
            3,
            ChaCha8Rng::seed_from_u64(0),
        )
        .expect("start batch");

    let first = names.next().expect("one result");
    assert!(matches!(first, Err(NameError::Composition(_))));
    assert!(names.next().is_none());
    assert_eq!(names.produced(), 0);
}

#[test]
fn successful_names_precede_the_failure() {
    let registry = feminine_only_registry();
    let engine = GenerationEngine::new(&registry);

    let results: Vec<_> = engine
        .generate_with_rng(Some("Testish"), None, 50, ChaCha8Rng::seed_from_u64(17))
        .expect("start batch")
        .collect();

    let failures = results.iter().filter(|result| result.is_err()).count();
    assert!(failures <= 1);
    if failures == 1 {
        assert!(results.last().is_some_and(|result| result.is_err()));
    } else {
        assert_eq!(results.len(), 50);
    }
    assert!(results
        .iter()
        .filter_map(|result| result.as_ref().ok())
        .all(|name| name.full() == "Maja"));
}

#[test]
fn duplicate_identifiers_are_rejected() {
    let file = |name: &str, alpha2: &str| -> NationalityFile {
        serde_json::from_value(json!({
            "name": name,
            "alpha2": alpha2,
            "rule": { "formats": [ { "slots": [ { "label": "given" } ] } ] }
        }))
        .expect("parse nationality")
    };
    let table = |name: &str| {
        let mut categories = BTreeMap::new();
        categories.insert(
            Category::Personal,
            vec![NameEntry::new("Alex", GenderTag::Neuter)],
        );
        NameTable::new(name, categories).expect("table")
    };

    let err = NationalityRegistry::from_descriptors(vec![
        NationalityDescriptor::new(file("Alpha", "xx"), table("Alpha")),
        NationalityDescriptor::new(file("Beta", "XX"), table("Beta")),
    ])
    .expect_err("shared identifier");
    assert!(matches!(err, NameError::Data { .. }));
}
