pub mod corpus;
pub mod embed;
pub mod ensure_index;
pub mod ingest;
pub mod search;
pub mod wait;
