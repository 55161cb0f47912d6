use std::collections::HashMap;

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::IndexedRandom;
use tracing::debug;

use namechoose_core::{
    Category, Gender, GeneratedName, NameComponent, NameEntry, NameError, NameTable, Result,
};
use namechoose_rules::{Capitalization, ComponentSlot, NationalityRule, derive_name, is_eligible};

use crate::registry::NationalityDescriptor;

/// Compose one name for `descriptor`.
///
/// A missing `gender` is drawn uniformly. Every random decision comes from
/// `rng`, so a seeded source gives a reproducible name.
pub fn compose<R: Rng + ?Sized>(
    descriptor: &NationalityDescriptor,
    gender: Option<Gender>,
    rng: &mut R,
) -> Result<GeneratedName> {
    let gender = gender.unwrap_or_else(|| random_gender(rng));
    let rule = descriptor.rule();
    let table = descriptor.table();

    let format_index = pick_format(descriptor.name(), rule, rng)?;
    let format = &rule.formats[format_index];

    let mut pass = Pass::default();
    let mut components = Vec::with_capacity(format.slots.len());
    for slot in &format.slots {
        if !include_slot(slot, rng) {
            continue;
        }
        let component = match &slot.derive {
            Some(derivation) => {
                compose_derived(rule, table, slot, derivation, gender, &mut pass, rng)?
            }
            None => compose_plain(table, slot, gender, &mut pass, rng)?,
        };
        components.push(capitalize(component, rule.join.capitalization));
    }

    let full = components
        .iter()
        .map(|component| component.value.as_str())
        .collect::<Vec<_>>()
        .join(&rule.join.separator);
    let romanised = components
        .iter()
        .any(|component| component.romanisation.is_some())
        .then(|| {
            components
                .iter()
                .map(|component| {
                    component
                        .romanisation
                        .as_deref()
                        .unwrap_or(component.value.as_str())
                })
                .collect::<Vec<_>>()
                .join(rule.join.romanised_separator())
        });

    debug!(
        nationality = %descriptor.name(),
        %gender,
        format = format_index,
        name = %full,
        "name composed"
    );

    Ok(GeneratedName::new(
        descriptor.name(),
        gender,
        format_index,
        components,
        full,
        romanised,
    ))
}

fn random_gender<R: Rng + ?Sized>(rng: &mut R) -> Gender {
    if rng.random_bool(0.5) {
        Gender::Masculine
    } else {
        Gender::Feminine
    }
}

/// State shared by the slots of a single composition pass.
#[derive(Default)]
struct Pass<'t> {
    used: HashMap<Category, Vec<&'t str>>,
    parents: HashMap<String, &'t NameEntry>,
}

impl<'t> Pass<'t> {
    fn is_used(&self, category: Category, value: &str) -> bool {
        self.used
            .get(&category)
            .is_some_and(|values| values.iter().any(|used| *used == value))
    }

    fn mark_used(&mut self, category: Category, value: &'t str) {
        self.used.entry(category).or_default().push(value);
    }
}

fn pick_format<R: Rng + ?Sized>(
    nationality: &str,
    rule: &NationalityRule,
    rng: &mut R,
) -> Result<usize> {
    if rule.formats.is_empty() {
        return Err(NameError::Composition(format!(
            "{nationality} rule declares no formats"
        )));
    }
    let weights = WeightedIndex::new(rule.formats.iter().map(|format| format.weight))
        .map_err(|err| NameError::Composition(format!("{nationality} format weights: {err}")))?;
    Ok(weights.sample(rng))
}

fn include_slot<R: Rng + ?Sized>(slot: &ComponentSlot, rng: &mut R) -> bool {
    if slot.is_required() {
        return true;
    }
    if slot.inclusion.is_nan() || slot.inclusion <= 0.0 {
        return false;
    }
    rng.random_bool(slot.inclusion)
}

fn compose_plain<'t, R: Rng + ?Sized>(
    table: &'t NameTable,
    slot: &ComponentSlot,
    gender: Gender,
    pass: &mut Pass<'t>,
    rng: &mut R,
) -> Result<NameComponent> {
    let category = slot.category();
    let candidates: Vec<&NameEntry> = if slot.gendered {
        table.lookup(category, gender)?
    } else {
        table.entries(category)?.iter().collect()
    };
    if candidates.is_empty() {
        return Err(NameError::Composition(format!(
            "no {gender} {} {category} names for slot '{}'",
            table.nationality(),
            slot.label
        )));
    }

    let fresh: Vec<&NameEntry> = candidates
        .iter()
        .copied()
        .filter(|entry| !pass.is_used(category, &entry.name))
        .collect();
    let candidates = if fresh.is_empty() { candidates } else { fresh };

    let entry = pick_entry(table, category, &candidates, rng)?;
    pass.mark_used(category, &entry.name);

    Ok(NameComponent {
        slot: slot.label,
        value: entry.name.clone(),
        romanisation: entry.romanisation.clone(),
    })
}

fn compose_derived<'t, R: Rng + ?Sized>(
    rule: &NationalityRule,
    table: &'t NameTable,
    slot: &ComponentSlot,
    derivation_name: &str,
    gender: Gender,
    pass: &mut Pass<'t>,
    rng: &mut R,
) -> Result<NameComponent> {
    let derivation = rule.derivation(derivation_name).ok_or_else(|| {
        NameError::Composition(format!(
            "{} slot '{}' uses undefined derivation '{derivation_name}'",
            table.nationality(),
            slot.label
        ))
    })?;
    let category = slot.category();

    let cached = derivation
        .reuse_base
        .then(|| pass.parents.get(derivation_name).copied())
        .flatten();
    let parent = match cached {
        Some(parent) => parent,
        None => {
            let candidates: Vec<&NameEntry> = table
                .lookup(category, derivation.parent)?
                .into_iter()
                .filter(|entry| is_eligible(derivation, entry))
                .collect();
            if candidates.is_empty() {
                return Err(NameError::Composition(format!(
                    "no {} {category} name can serve as the {} parent for '{derivation_name}'",
                    table.nationality(),
                    derivation.parent
                )));
            }
            let parent = pick_entry(table, category, &candidates, rng)?;
            pass.parents.insert(derivation_name.to_string(), parent);
            parent
        }
    };

    let value = derive_name(derivation, parent, gender).ok_or_else(|| {
        NameError::Composition(format!(
            "derivation '{derivation_name}' does not apply to '{}'",
            parent.name
        ))
    })?;

    Ok(NameComponent {
        slot: slot.label,
        value,
        romanisation: None,
    })
}

fn pick_entry<'t, R: Rng + ?Sized>(
    table: &NameTable,
    category: Category,
    candidates: &[&'t NameEntry],
    rng: &mut R,
) -> Result<&'t NameEntry> {
    let picked = if table.is_weighted(category) {
        candidates
            .choose_weighted(rng, |entry| entry.effective_weight())
            .map_err(|err| {
                NameError::Composition(format!(
                    "{} {category} weights: {err}",
                    table.nationality()
                ))
            })?
    } else {
        candidates.choose(rng).ok_or_else(|| {
            NameError::Composition(format!(
                "no {} {category} names to choose from",
                table.nationality()
            ))
        })?
    };
    Ok(*picked)
}

fn capitalize(mut component: NameComponent, policy: Capitalization) -> NameComponent {
    let family = component.slot.is_family();
    let apply = |value: &str| match policy {
        Capitalization::AsIs => value.to_string(),
        Capitalization::Title => title_case(value),
        Capitalization::UpperFamily if family => value.to_uppercase(),
        Capitalization::UpperFamily => value.to_string(),
    };
    let value = apply(&component.value);
    let romanisation = component.romanisation.as_deref().map(apply);
    component.value = value;
    component.romanisation = romanisation;
    component
}

/// Upper-case the first letter of every word and hyphenated part.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_start = true;
    for ch in value.chars() {
        if at_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_start = ch.is_whitespace() || ch == '-';
    }
    out
}

#[cfg(test)]
mod tests {
    use namechoose_core::SlotLabel;

    use super::*;

    fn component(slot: SlotLabel, value: &str) -> NameComponent {
        NameComponent {
            slot,
            value: value.to_string(),
            romanisation: None,
        }
    }

    #[test]
    fn title_case_handles_words_and_hyphens() {
        assert_eq!(title_case("anna-lena de la cruz"), "Anna-Lena De La Cruz");
        assert_eq!(title_case("óli"), "Óli");
        assert_eq!(title_case("McDonald"), "McDonald");
    }

    #[test]
    fn upper_family_only_touches_surnames() {
        let given = capitalize(component(SlotLabel::Given, "Ferenc"), Capitalization::UpperFamily);
        let family = capitalize(component(SlotLabel::Family, "Kovács"), Capitalization::UpperFamily);
        assert_eq!(given.value, "Ferenc");
        assert_eq!(family.value, "KOVÁCS");
    }

    #[test]
    fn romanisation_follows_the_policy() {
        let mut native = component(SlotLabel::Family, "王");
        native.romanisation = Some("wang".to_string());
        let capitalized = capitalize(native, Capitalization::Title);
        assert_eq!(capitalized.value, "王");
        assert_eq!(capitalized.romanisation.as_deref(), Some("Wang"));
    }
}
