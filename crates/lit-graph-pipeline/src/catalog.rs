//! The concept catalog.
//!
//! A catalog is the fixed or corpus-derived set of canonical concepts the
//! resolver matches against. Each entry carries the texts that represent
//! the concept for embedding purposes: a hand-authored definition for the
//! fixed variant, or the associated criticism snippets for the
//! corpus-derived variant. The catalog is loaded once at pipeline start and
//! immutable for the rest of the run.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use lit_graph_core::iri::{Iri, Namespace};
use lit_graph_core::types::{Concept, Term, Vocab};
use lit_graph_store::TripleStore;

use crate::error::{PipelineError, PipelineResult};

/// One catalog concept plus the texts that represent it.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub concept: Concept,
    /// Texts embedded to represent this concept. Never empty.
    pub texts: Vec<String>,
}

/// The set of canonical concepts for a run.
#[derive(Debug, Clone, Default)]
pub struct ConceptCatalog {
    entries: Vec<CatalogEntry>,
    by_iri: HashMap<Iri, usize>,
}

/// Shape of a catalog TOML file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    concepts: Vec<CatalogFileConcept>,
}

#[derive(Debug, Deserialize)]
struct CatalogFileConcept {
    label: String,
    definition: String,
    #[serde(default)]
    aliases: Vec<String>,
}

impl ConceptCatalog {
    /// Build a fixed catalog from `(label, definition)` pairs.
    ///
    /// Labels canonicalizing to the same identifier are merged into one
    /// concept; a concept is only ever created once per identifier.
    pub fn from_definitions<I, L, D>(ns: &Namespace, definitions: I) -> Self
    where
        I: IntoIterator<Item = (L, D)>,
        L: Into<String>,
        D: Into<String>,
    {
        let mut catalog = ConceptCatalog::default();
        for (label, definition) in definitions {
            let label = label.into();
            let definition = definition.into();
            catalog.add(ns.iri(&label), label, definition);
        }
        catalog
    }

    /// Load a fixed catalog from a TOML file.
    ///
    /// An unreadable or malformed file is fatal. A well-formed file with
    /// zero concepts is accepted with a warning; every resolution will then
    /// come back empty.
    pub fn load_toml(ns: &Namespace, path: &Path) -> PipelineResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PipelineError::CatalogLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let file: CatalogFile = toml::from_str(&content).map_err(|e| PipelineError::CatalogLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut catalog = ConceptCatalog::default();
        for c in file.concepts {
            let iri = ns.iri(&c.label);
            let idx = catalog.add(iri, c.label, c.definition);
            catalog.entries[idx].concept.aliases = c.aliases;
        }
        if catalog.is_empty() {
            warn!(path = %path.display(), "concept catalog is empty; resolution is disabled");
        } else {
            info!(path = %path.display(), concepts = catalog.len(), "loaded concept catalog");
        }
        Ok(catalog)
    }

    /// Derive a catalog from a criticism graph.
    ///
    /// Collects `(concept, text)` pairs from triples whose predicate is one
    /// of the association predicates (`hasCriticism`, `hasDefinition`,
    /// `hasReference`, `hasExample`), aggregating every snippet under its
    /// concept. Concepts with no text are not created.
    pub fn from_criticism_graph(store: &TripleStore, vocab: &Vocab) -> Self {
        let mut catalog = ConceptCatalog::default();
        for triple in store.iter() {
            if !vocab
                .association_predicates()
                .iter()
                .any(|p| **p == triple.predicate)
            {
                continue;
            }
            let concept_iri = match triple.subject.as_iri() {
                Some(iri) => iri.clone(),
                None => continue,
            };
            let snippet = match &triple.object {
                Term::Literal(lit) => lit.lexical_form(),
                Term::Iri(iri) => iri.display_name(),
                Term::Blank(_) => continue,
            };

            match catalog.by_iri.get(&concept_iri) {
                Some(&idx) => catalog.entries[idx].texts.push(snippet),
                None => {
                    // The first snippet doubles as the working definition.
                    let label = concept_iri.display_name();
                    catalog.add(concept_iri, label, snippet);
                }
            }
        }
        if catalog.is_empty() {
            warn!("criticism graph yielded no concept associations");
        } else {
            info!(concepts = catalog.len(), "derived concept catalog from criticism graph");
        }
        catalog
    }

    fn add(&mut self, iri: Iri, label: String, definition: String) -> usize {
        if let Some(&idx) = self.by_iri.get(&iri) {
            // Already created for this identifier; keep the first definition.
            return idx;
        }
        let idx = self.entries.len();
        self.by_iri.insert(iri.clone(), idx);
        self.entries.push(CatalogEntry {
            concept: Concept::new(iri, label, definition.clone()),
            texts: vec![definition],
        });
        idx
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn get(&self, iri: &Iri) -> Option<&CatalogEntry> {
        self.by_iri.get(iri).map(|&idx| &self.entries[idx])
    }
}
