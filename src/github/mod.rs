//! Repository lookup against the GitHub REST API.

pub mod client;
pub mod model;

pub use client::{GithubClient, RepositoryLookup};
pub use model::{ProviderError, RepositoryMetadata};
