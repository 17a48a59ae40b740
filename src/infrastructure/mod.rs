pub mod embeddings;
pub mod pinecone;
pub mod sqlite;
