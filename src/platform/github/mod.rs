mod client;
pub mod mapper;

pub use client::{merged_query, open_query, GitHubPlatform};
