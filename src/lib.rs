//! Event-source normalization for AWS Lambda functions.
//!
//! Gateway proxy requests, queue deliveries and change-stream records are
//! rewritten into one flat parameter mapping so business functions can treat
//! every invocation the same way. The caller picks the decoder through an
//! [`EntryPoint`]; anything the decoder does not recognize is passed through.

pub mod config;
pub mod decoders;
pub mod format;
pub mod handler;
pub mod http;
pub mod models;
pub mod normalizer;
pub mod parsers;
pub mod schema;
pub mod utils;

pub use config::{NormalizerConfig, RecordPolicy};
pub use models::{EntryPoint, EventSource, NormalizeError};
pub use normalizer::{EventNormalizer, SourceClassifier};
