//! Derived analytics over the graph.
//!
//! These are the standard tables built on top of raw pattern matches:
//! character-to-concept interaction counts (from either storage
//! representation), top-N interactions per character, concept mention
//! comparisons across graphs, and the character correlation matrix.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use lit_graph_core::iri::Iri;
use lit_graph_core::types::{Term, Vocab};
use lit_graph_store::TripleStore;

/// One `(character, relation, concept)` interaction with its count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRow {
    pub character: String,
    pub relation: String,
    pub concept: String,
    pub count: u64,
}

/// Count character-to-concept interactions.
///
/// Reads both storage representations: bare triples carrying an
/// interaction predicate (weighted by insertion count) and typed mention
/// records (one observation per record). Rows come back in
/// first-appearance order.
pub fn interaction_counts(store: &TripleStore, vocab: &Vocab) -> Vec<InteractionRow> {
    let mut order: Vec<(String, String, String)> = Vec::new();
    let mut counts: HashMap<(String, String, String), u64> = HashMap::new();
    let mut bump = |key: (String, String, String), by: u64| {
        match counts.get_mut(&key) {
            Some(count) => *count += by,
            None => {
                counts.insert(key.clone(), by);
                order.push(key);
            }
        }
    };

    // Bare triples.
    for triple in store.iter() {
        if !vocab
            .interaction_predicates()
            .iter()
            .any(|p| **p == triple.predicate)
        {
            continue;
        }
        let (Term::Iri(subject), Term::Iri(object)) = (&triple.subject, &triple.object) else {
            continue;
        };
        bump(
            (
                subject.local_name().to_string(),
                triple.predicate.local_name().to_string(),
                object.display_name(),
            ),
            store.count(triple),
        );
    }

    // Mention records: anchor -> (subject, predicate, object) arcs.
    for record in collect_mentions(store, vocab) {
        let (subject, predicate, object) = record;
        if !vocab
            .interaction_predicates()
            .iter()
            .any(|p| **p == predicate)
        {
            continue;
        }
        bump(
            (
                subject.local_name().to_string(),
                predicate.local_name().to_string(),
                object.display_name(),
            ),
            1,
        );
    }

    order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            let (character, relation, concept) = key;
            InteractionRow {
                character,
                relation,
                concept,
                count,
            }
        })
        .collect()
}

/// Resolve every typed mention record into its `(subject, predicate,
/// object)` arcs.
fn collect_mentions(store: &TripleStore, vocab: &Vocab) -> Vec<(Iri, Iri, Iri)> {
    #[derive(Default)]
    struct Arcs {
        subject: Option<Iri>,
        predicate: Option<Iri>,
        object: Option<Iri>,
        typed: bool,
    }

    let mut anchors: Vec<String> = Vec::new();
    let mut arcs: HashMap<String, Arcs> = HashMap::new();
    for triple in store.iter() {
        let Term::Blank(label) = &triple.subject else {
            continue;
        };
        let entry = match arcs.entry(label.clone()) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                anchors.push(label.clone());
                vacant.insert(Arcs::default())
            }
        };
        if triple.predicate == vocab.rdf_type && triple.object == Term::Iri(vocab.mention_class.clone()) {
            entry.typed = true;
        } else if let Term::Iri(value) = &triple.object {
            if triple.predicate == vocab.mention_subject {
                entry.subject = Some(value.clone());
            } else if triple.predicate == vocab.mention_predicate {
                entry.predicate = Some(value.clone());
            } else if triple.predicate == vocab.mention_object {
                entry.object = Some(value.clone());
            }
        }
    }

    anchors
        .into_iter()
        .filter_map(|label| {
            let entry = arcs.remove(&label)?;
            if !entry.typed {
                return None;
            }
            Some((entry.subject?, entry.predicate?, entry.object?))
        })
        .collect()
}

/// Fold character name variants into their canonical names.
///
/// `aliases` maps a canonical name to the variants that should count as
/// it, e.g. `Deckard -> [Rick_Deckard, Rick]`. Counts merge; row order is
/// kept by first appearance of the canonical name.
pub fn fold_aliases(
    rows: &[InteractionRow],
    aliases: &BTreeMap<String, Vec<String>>,
) -> Vec<InteractionRow> {
    let mut canonical_of: HashMap<&str, &str> = HashMap::new();
    for (canonical, variants) in aliases {
        for variant in variants {
            canonical_of.insert(variant, canonical);
        }
    }

    let mut order: Vec<(String, String, String)> = Vec::new();
    let mut counts: HashMap<(String, String, String), u64> = HashMap::new();
    for row in rows {
        let character = canonical_of
            .get(row.character.as_str())
            .map(|c| c.to_string())
            .unwrap_or_else(|| row.character.clone());
        let key = (character, row.relation.clone(), row.concept.clone());
        match counts.get_mut(&key) {
            Some(count) => *count += row.count,
            None => {
                counts.insert(key.clone(), row.count);
                order.push(key);
            }
        }
    }

    order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            let (character, relation, concept) = key;
            InteractionRow {
                character,
                relation,
                concept,
                count,
            }
        })
        .collect()
}

/// Keep each character's N highest-count interactions.
///
/// Within a character, rows sort by count descending with ties broken by
/// relation then concept, so the selection is deterministic. Characters
/// keep their first-appearance order.
pub fn top_interactions(rows: &[InteractionRow], n: usize) -> Vec<InteractionRow> {
    let mut characters: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&InteractionRow>> = HashMap::new();
    for row in rows {
        match grouped.entry(row.character.as_str()) {
            Entry::Occupied(occupied) => occupied.into_mut().push(row),
            Entry::Vacant(vacant) => {
                characters.push(&row.character);
                vacant.insert(vec![row]);
            }
        }
    }

    let mut result = Vec::new();
    for character in characters {
        let mut group = grouped.remove(character).unwrap_or_default();
        group.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.relation.cmp(&b.relation))
                .then_with(|| a.concept.cmp(&b.concept))
        });
        result.extend(group.into_iter().take(n).cloned());
    }
    result
}

/// Count concept mentions (`isMentionedIn` facts, weighted by insertion
/// count), ordered by count descending with lexical tie-break.
pub fn concept_mention_counts(store: &TripleStore, vocab: &Vocab) -> Vec<(String, u64)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for triple in store.with_predicate(&vocab.is_mentioned_in) {
        let Term::Iri(concept) = &triple.subject else {
            continue;
        };
        let name = concept.display_name();
        match counts.get_mut(&name) {
            Some(count) => *count += store.count(triple),
            None => {
                counts.insert(name.clone(), store.count(triple));
                order.push(name);
            }
        }
    }

    let mut rows: Vec<(String, u64)> = order
        .into_iter()
        .map(|name| {
            let count = counts[&name];
            (name, count)
        })
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

/// One concept's mention counts across the two graphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionComparisonRow {
    pub concept: String,
    pub criticism_mentions: u64,
    pub novel_mentions: u64,
}

/// Merge per-graph mention counts into one comparison table, missing
/// combinations filled with zero, ordered by criticism mentions
/// descending.
pub fn mention_comparison(
    criticism: &[(String, u64)],
    novel: &[(String, u64)],
) -> Vec<MentionComparisonRow> {
    let criticism_map: HashMap<&str, u64> =
        criticism.iter().map(|(c, n)| (c.as_str(), *n)).collect();
    let novel_map: HashMap<&str, u64> = novel.iter().map(|(c, n)| (c.as_str(), *n)).collect();

    let mut concepts: Vec<&str> = Vec::new();
    for (concept, _) in criticism.iter().chain(novel.iter()) {
        if !concepts.contains(&concept.as_str()) {
            concepts.push(concept);
        }
    }

    let mut rows: Vec<MentionComparisonRow> = concepts
        .into_iter()
        .map(|concept| MentionComparisonRow {
            concept: concept.to_string(),
            criticism_mentions: criticism_map.get(concept).copied().unwrap_or(0),
            novel_mentions: novel_map.get(concept).copied().unwrap_or(0),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.criticism_mentions
            .cmp(&a.criticism_mentions)
            .then_with(|| a.concept.cmp(&b.concept))
    });
    rows
}

/// Pairwise Pearson correlation between characters' concept-count vectors.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub characters: Vec<String>,
    /// `values[i][j]` is the correlation between characters `i` and `j`.
    /// A character whose count vector has zero variance yields NaN against
    /// everyone, including itself.
    pub values: Vec<Vec<f64>>,
}

/// Build the character correlation matrix from interaction rows.
///
/// Counts are summed per `(character, concept)` across relations into a
/// character-by-concept matrix (missing combinations are zero), then each
/// pair of character rows is correlated.
pub fn correlation_matrix(rows: &[InteractionRow]) -> CorrelationMatrix {
    let mut characters: Vec<String> = Vec::new();
    let mut concepts: Vec<String> = Vec::new();
    for row in rows {
        if !characters.contains(&row.character) {
            characters.push(row.character.clone());
        }
        if !concepts.contains(&row.concept) {
            concepts.push(row.concept.clone());
        }
    }

    let mut matrix = vec![vec![0.0f64; concepts.len()]; characters.len()];
    for row in rows {
        let i = characters.iter().position(|c| *c == row.character);
        let j = concepts.iter().position(|c| *c == row.concept);
        if let (Some(i), Some(j)) = (i, j) {
            matrix[i][j] += row.count as f64;
        }
    }

    let n = characters.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&matrix[i], &matrix[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { characters, values }
}

/// Pearson correlation coefficient; NaN when either vector has zero
/// variance (including length < 2).
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean = |v: &[f64]| v.iter().take(n).sum::<f64>() / n as f64;
    let (ma, mb) = (mean(a), mean(b));

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for k in 0..n {
        let da = a[k] - ma;
        let db = b[k] - mb;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }
    (cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0)
}
