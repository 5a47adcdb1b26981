//! Domains module containing business logic.
//!
//! The server has a single domain: the Energinet tools.

pub mod tools;
