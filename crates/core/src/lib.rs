//! Pure domain logic for the legacy file migration: identifier aliases,
//! stored-name rules, and the report model shared by both stages.

pub mod error;
pub mod naming;
pub mod report;
pub mod types;
