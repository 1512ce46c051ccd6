//! Core domain types for the lit-graph system.
//!
//! lit-graph turns narrative and critical-essay text into a typed knowledge
//! graph of entities, concepts, and relationships. This crate defines:
//!
//! - Domain types (`Concept`, `Entity`, `Passage`, `Term`, `Triple`) and the
//!   predicate vocabulary
//! - IRI canonicalization (one function, deterministic, idempotent)
//! - Cosine similarity over embedding vectors
//! - Collaborator traits for the external models the pipeline consumes
//!   (`EmbeddingProvider`, `RelevanceClassifier`, `EntityExtractor`)
//! - Error types and the [`CoreResult`] alias
//! - Configuration loading and validation
//!
//! # Example
//!
//! ```
//! use lit_graph_core::iri::{canonicalize, Namespace};
//!
//! let ns = Namespace::default();
//! let iri = ns.iri("Posthuman Ethics");
//! assert_eq!(iri.as_str(), "http://example.org/posthuman#Posthuman_Ethics");
//! assert_eq!(canonicalize("Posthuman Ethics"), "Posthuman_Ethics");
//! ```

pub mod config;
pub mod error;
pub mod iri;
pub mod similarity;
pub mod stubs;
pub mod traits;
pub mod types;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use iri::{canonicalize, Iri, Namespace};
pub use types::{Concept, Entity, EntityKind, Literal, Passage, Term, Triple, Vocab};
