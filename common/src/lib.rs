//! Shared building blocks for `ipfinder`: run configuration, target input,
//! domain normalization and the HTTP client factory.

pub mod config;
pub mod domain;
pub mod http;
pub mod target;
