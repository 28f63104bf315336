//! Group configuration documents.

mod group;

pub use group::{load_groups, Group, Subject};
