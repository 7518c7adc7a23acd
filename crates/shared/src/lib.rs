//! Shared utilities and common types for the Event Pilot backend.
//!
//! This crate provides functionality used across the other crates:
//! - Bearer token verification (and signing, for tooling and tests)
//! - Opaque keyset pagination cursors
//! - Common validation logic

pub mod jwt;
pub mod pagination;
pub mod validation;
