//! Shared helpers for account integration suites.

pub mod doubles;
