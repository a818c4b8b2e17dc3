//! HTTP plumbing shared by the API adapters.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
