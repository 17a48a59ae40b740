pub mod index;
pub mod metric;
pub mod poll_policy;
