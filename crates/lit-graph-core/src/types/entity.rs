//! Extracted graph entities.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::iri::Iri;

/// Type tag for an extracted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Human,
    Android,
    Animal,
    Location,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Human => "human",
            EntityKind::Android => "android",
            EntityKind::Animal => "animal",
            EntityKind::Location => "location",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A graph node for a character, android, animal, or location.
///
/// The kind is derived deterministically from the extractor label plus
/// lexical cues in the source passage, so it can always be re-derived from
/// the stored passage text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub iri: Iri,
    pub name: String,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(iri: Iri, name: impl Into<String>, kind: EntityKind) -> Self {
        Entity {
            iri,
            name: name.into(),
            kind,
        }
    }
}
