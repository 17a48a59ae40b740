pub mod migrations;
pub mod vector_index;
