//! # iv-core
//!
//! Core types and error types for Intervue.
//!
//! This crate provides the foundational types shared across all Intervue crates:
//! - Entity structs for every shape exchanged with the interview backend
//! - Status enums, including the derived access-token status
//! - Client-side navigation targets reported after auth or session failures
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod routes;
