//! Pinecone REST adapter.
//!
//! The control plane (`api.pinecone.io`) lists, creates, describes and deletes
//! indexes. Each index is served from its own data-plane host, returned by
//! `describe_index`, which handles upsert, query and stats.

pub mod client;
pub mod types;

pub use client::{PineconeIndex, PineconeProvider};

/// Pinecone API version header value these wire types follow.
pub const API_VERSION: &str = "2024-07";

/// Largest upsert batch sent in a single request.
pub const MAX_UPSERT_BATCH: usize = 100;
