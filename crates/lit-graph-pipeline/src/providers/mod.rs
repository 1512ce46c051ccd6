//! Concrete collaborator implementations.
//!
//! The embedding model and relevance classifier live in an external
//! inference service reached over HTTP; entity extraction runs locally
//! against configured name lexicons.

mod http;
mod lexicon;

pub use http::InferenceClient;
pub use lexicon::LexiconEntityExtractor;
