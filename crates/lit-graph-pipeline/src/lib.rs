//! Text-to-knowledge-graph extraction pipeline.
//!
//! Per input passage: a relevance classifier gates processing, the entity
//! extractor and concept resolver produce candidate concepts and entities,
//! the relationship classifier assigns predicates, and triples are appended
//! to the caller's [`TripleStore`](lit_graph_store::TripleStore). A second
//! driver builds the criticism-side graph from whole documents, inferring
//! concept-to-concept relationships.
//!
//! All model collaborators are explicit capability objects passed in at
//! construction; the pipeline holds no global state.

pub mod catalog;
pub mod criticism;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod providers;
pub mod relation;
pub mod resolver;
pub mod text;

pub use catalog::ConceptCatalog;
pub use criticism::CriticismDocument;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{GraphPipeline, Providers, RunSummary};
pub use resolver::{ConceptResolver, ResolvedConcept};
