//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MySQL-backed repositories using Diesel ORM
//! - **push**: reqwest-backed push provider client
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
pub mod push;
