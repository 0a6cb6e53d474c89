//! logihash core - salted structural hashing over object graphs
//!
//! This crate computes stable 32-bit logical hashes over a selected subset of
//! an object's properties, including:
//! - A grow-only, thread-safe registry of non-zero random salts
//! - Include/exclude property selection across a type's ancestry
//! - A recursive, cycle-safe hash engine over `LogicalHash` nodes
//! - Per-instance change detection with per-type callbacks
//! - Hash-derived logical equality
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use logihash_core::{HashEngine, LogicalHash, LogicalType, TypeDecl, Value};
//!
//! struct Point {
//!     ty: Arc<LogicalType>,
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl LogicalHash for Point {
//!     fn logical_type(&self) -> &LogicalType {
//!         &self.ty
//!     }
//!
//!     fn read_property(&self, name: &str, sink: &mut dyn FnMut(Value<'_>)) {
//!         match name {
//!             "x" => sink(Value::scalar(&self.x)),
//!             "y" => sink(Value::scalar(&self.y)),
//!             _ => {}
//!         }
//!     }
//! }
//!
//! let engine = HashEngine::new()?;
//! let ty = engine.register(LogicalType::builder(TypeDecl::new("Point", ["x", "y"])))?;
//! let a = Point { ty: ty.clone(), x: 3, y: 4 };
//! let b = Point { ty, x: 3, y: 4 };
//! assert!(engine.equals(&a, Value::node(&b))?);
//! # Ok::<(), logihash_core::LogiHashError>(())
//! ```

pub mod config;
pub mod engine;
pub mod errors;
pub mod logging_facility;
pub mod logical_type;
pub mod node;
pub mod notifier;
pub mod salts;
pub mod scalar;
pub mod selection;

#[doc(hidden)]
pub use logihash_core_types as core_types;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::HashEngine;
pub use errors::{ExError, ExErrorKind, LogiHashError, Result};
pub use logical_type::{LogicalType, LogicalTypeBuilder};
pub use node::{LastHashRecord, LogicalHash, NodeIdentity, Value};
pub use notifier::ChangeCallback;
pub use salts::{SaltRegistry, SaltTable, DEFAULT_SALT_CAPACITY};
pub use scalar::ScalarHash;
pub use selection::{Selection, SelectionConfig, TypeDecl};
