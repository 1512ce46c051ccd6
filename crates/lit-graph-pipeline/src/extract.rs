//! Entity classification from extractor output.
//!
//! The extractor reports raw surface names with coarse labels; this module
//! turns them into typed graph entities. The person-to-android
//! reclassification encodes domain semantics and lives here, not in the
//! extractor: a passage that speaks of androids is taken to be about
//! androids, so every person in it is reclassified.

use lit_graph_core::iri::Namespace;
use lit_graph_core::traits::ExtractedEntities;
use lit_graph_core::types::{Entity, EntityKind};

/// Tokens whose presence anywhere in the passage reclassifies persons as
/// androids. Checked as case-insensitive substrings.
const ANDROID_MARKERS: [&str; 2] = ["android", "replicant"];

/// Whether the passage triggers person-to-android reclassification.
///
/// The check is passage-wide: two different people in the same passage are
/// reclassified together. That granularity is a known limitation of the
/// heuristic, kept deliberately.
pub fn mentions_androids(passage_text: &str) -> bool {
    let lower = passage_text.to_lowercase();
    ANDROID_MARKERS.iter().any(|m| lower.contains(m))
}

/// Classify extracted entities into typed graph entities.
///
/// Pure function of extractor output and passage text, so entity kinds can
/// always be re-derived from the stored passage.
pub fn classify_entities(
    ns: &Namespace,
    extracted: &ExtractedEntities,
    passage_text: &str,
) -> Vec<Entity> {
    let person_kind = if mentions_androids(passage_text) {
        EntityKind::Android
    } else {
        EntityKind::Human
    };

    let mut entities = Vec::new();
    for name in &extracted.people {
        entities.push(Entity::new(ns.iri(name), name.clone(), person_kind));
    }
    for name in &extracted.animals {
        entities.push(Entity::new(ns.iri(name), name.clone(), EntityKind::Animal));
    }
    for name in &extracted.locations {
        entities.push(Entity::new(ns.iri(name), name.clone(), EntityKind::Location));
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn extracted(people: &[&str], animals: &[&str], locations: &[&str]) -> ExtractedEntities {
        ExtractedEntities {
            candidate_phrases: BTreeSet::new(),
            people: people.iter().map(|s| s.to_string()).collect(),
            animals: animals.iter().map(|s| s.to_string()).collect(),
            locations: locations.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn persons_stay_human_without_markers() {
        let ns = Namespace::default();
        let entities = classify_entities(&ns, &extracted(&["Deckard"], &[], &[]), "Deckard slept.");
        assert_eq!(entities[0].kind, EntityKind::Human);
    }

    #[test]
    fn android_marker_reclassifies_persons() {
        let ns = Namespace::default();
        let entities = classify_entities(
            &ns,
            &extracted(&["Rachael"], &[], &[]),
            "Rachael was an ANDROID.",
        );
        assert_eq!(entities[0].kind, EntityKind::Android);
    }

    #[test]
    fn replicant_marker_also_reclassifies() {
        assert!(mentions_androids("the Replicant question"));
    }

    #[test]
    fn reclassification_is_passage_wide() {
        let ns = Namespace::default();
        let entities = classify_entities(
            &ns,
            &extracted(&["Rachael", "Deckard"], &[], &[]),
            "Rachael the android met Deckard.",
        );
        assert!(entities.iter().all(|e| e.kind == EntityKind::Android));
    }

    #[test]
    fn animals_and_locations_keep_their_kinds() {
        let ns = Namespace::default();
        let entities = classify_entities(
            &ns,
            &extracted(&[], &["toad"], &["San Francisco"]),
            "A toad in San Francisco, near the androids.",
        );
        assert_eq!(entities[0].kind, EntityKind::Animal);
        assert_eq!(entities[1].kind, EntityKind::Location);
    }
}
