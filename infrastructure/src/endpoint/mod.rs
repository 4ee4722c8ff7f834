//! Graph endpoint adapters.

pub mod http;

pub use http::HttpSparqlEndpoint;
