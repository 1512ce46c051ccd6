//! Core domain types for the knowledge graph.

mod concept;
mod entity;
mod passage;
mod term;
mod vocab;

pub use concept::Concept;
pub use entity::{Entity, EntityKind};
pub use passage::Passage;
pub use term::{Literal, Term, Triple};
pub use vocab::Vocab;
