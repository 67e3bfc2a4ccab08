//! Package registry adapters.

mod http;

pub use http::{DEFAULT_REGISTRY_URL, DEFAULT_SEARCH_SIZE, HttpRegistry};
