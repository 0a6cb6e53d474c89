//! Core types shared across logihash facilities
//!
//! This crate provides foundational definitions used by both error handling
//! and logging facilities:
//!
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
