pub mod hashing;
pub mod huggingface;
#[cfg(feature = "fastembed")]
pub mod local;
