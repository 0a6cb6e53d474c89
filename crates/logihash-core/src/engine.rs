//! Hash computation engine.
//!
//! ## Algorithm
//!
//! For a node with selected properties `p0..pn`:
//!
//! ```text
//! hash(node) = (S0 * h(p0)) ^ (S1 * h(p1)) ^ ... ^ (Sn * h(pn))
//! ```
//!
//! where `Si` is the salt at position `i`, multiplication wraps at 32 bits,
//! and `h` is the scalar digest for leaf values or the recursive digest for
//! nested nodes. Null values, and nodes already entered during the current
//! computation, contribute `0`. If every contribution is `0` the result is
//! the type-name digest instead.
//!
//! Each top-level call tracks the identities it has entered, so shared and
//! cyclic references terminate: a node reachable twice is counted on the
//! first path only. Transient nodes are tracked only while their subtree is
//! being hashed, since their identity does not outlive the read that
//! produced them.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::errors::{LogiHashError, Result};
use crate::logical_type::{LogicalType, LogicalTypeBuilder};
use crate::node::{LogicalHash, NodeIdentity, Value};
use crate::notifier;
use crate::salts::{SaltRegistry, SaltTable};
use crate::{log_op_end, log_op_error, log_op_start};

/// Computes logical hashes against a shared salt registry.
///
/// Cloning an engine shares its registry, so clones agree on every digest.
#[derive(Debug, Clone)]
pub struct HashEngine {
    salts: Arc<SaltRegistry>,
}

impl HashEngine {
    /// Engine with a freshly drawn pool of the default size.
    ///
    /// # Errors
    ///
    /// Returns `RandomSourceUnavailable` if the system CSPRNG fails.
    pub fn new() -> Result<Self> {
        Self::from_config(&EngineConfig::default())
    }

    /// # Errors
    ///
    /// As `EngineConfig::build_registry`.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::with_registry(Arc::new(config.build_registry()?)))
    }

    pub fn with_registry(salts: Arc<SaltRegistry>) -> Self {
        Self { salts }
    }

    pub fn salts(&self) -> &Arc<SaltRegistry> {
        &self.salts
    }

    /// Build a type and reserve salts for its selection.
    ///
    /// # Errors
    ///
    /// - `InvalidTypeName` / `ConflictingSelection` from the builder
    /// - `RandomSourceUnavailable` if the pool must grow and drawing fails
    pub fn register(&self, builder: LogicalTypeBuilder) -> Result<Arc<LogicalType>> {
        let started = Instant::now();
        let type_name = builder.type_name().to_string();
        log_op_start!("register_type", type_name = type_name.as_str());

        let registered = builder.build().and_then(|ty| {
            self.salts.ensure(ty.properties().len())?;
            Ok(Arc::new(ty))
        });

        let duration_ms = started.elapsed().as_millis() as u64;
        match &registered {
            Ok(ty) => {
                log_op_end!(
                    "register_type",
                    duration_ms = duration_ms,
                    type_name = type_name.as_str(),
                    selection_len = ty.properties().len() as u64
                );
            }
            Err(err) => {
                log_op_error!(
                    "register_type",
                    err.clone(),
                    duration_ms = duration_ms,
                    type_name = type_name.as_str()
                );
            }
        }
        registered
    }

    /// Logical hash of `node`.
    ///
    /// Runs change detection for `node` itself after the digest is known;
    /// nested nodes are hashed without touching their records.
    ///
    /// # Errors
    ///
    /// Returns `RandomSourceUnavailable` if a type needs more salts than the
    /// pool holds and drawing fresh ones fails.
    pub fn compute_hash(&self, node: &dyn LogicalHash) -> Result<i32> {
        let mut walk = Walk::new(&self.salts);
        let hash = walk.enter(node)?;
        let notified = notifier::observe(node, hash);

        tracing::trace!(
            component = module_path!(),
            op = "compute_hash",
            type_name = node.logical_type().name(),
            hash,
            visited = walk.visited.len() as u64,
            notified,
        );
        Ok(hash)
    }

    /// Logical equality: `other` must expose the capability and hash the same.
    ///
    /// This is digest equality, so distinct values whose digests collide
    /// compare equal.
    ///
    /// # Errors
    ///
    /// As `compute_hash`.
    pub fn equals(&self, node: &dyn LogicalHash, other: Value<'_>) -> Result<bool> {
        match other.as_node() {
            Some(other) => Ok(self.compute_hash(other)? == self.compute_hash(node)?),
            None => Ok(false),
        }
    }

    /// Properties of `ty` in salt-position order
    pub fn selected_properties<'t>(&self, ty: &'t LogicalType) -> &'t [String] {
        ty.properties()
    }
}

/// State of one top-level computation.
struct Walk<'e> {
    registry: &'e SaltRegistry,
    table: SaltTable,
    visited: HashSet<NodeIdentity>,
}

impl<'e> Walk<'e> {
    fn new(registry: &'e SaltRegistry) -> Self {
        Self {
            registry,
            table: registry.snapshot(),
            visited: HashSet::new(),
        }
    }

    fn cover(&mut self, positions: usize) -> Result<()> {
        if self.table.len() < positions {
            self.table = self.registry.reserve(positions)?;
        }
        Ok(())
    }

    fn salt_at(&self, position: usize) -> Result<i32> {
        self.table
            .get(position)
            .ok_or(LogiHashError::SaltIndexOutOfRange {
                index: position,
                len: self.table.len(),
            })
    }

    fn enter(&mut self, node: &dyn LogicalHash) -> Result<i32> {
        self.visited.insert(node.identity());

        let ty = node.logical_type();
        let properties = ty.properties();
        self.cover(properties.len())?;

        let mut acc = 0i32;
        for (position, name) in properties.iter().enumerate() {
            let salt = self.salt_at(position)?;
            let mut contribution = Ok(0);
            node.read_property(name, &mut |value: Value<'_>| {
                contribution = self.contribution(salt, value);
            });
            acc ^= contribution?;
        }

        Ok(if acc == 0 { ty.fallback_hash() } else { acc })
    }

    fn contribution(&mut self, salt: i32, value: Value<'_>) -> Result<i32> {
        match value {
            Value::Null => Ok(0),
            Value::Scalar(hash) => Ok(salt.wrapping_mul(hash)),
            Value::Node(child) => self.nested(salt, child, false),
            Value::Transient(child) => self.nested(salt, child, true),
        }
    }

    fn nested(&mut self, salt: i32, child: &dyn LogicalHash, transient: bool) -> Result<i32> {
        let identity = child.identity();
        if self.visited.contains(&identity) {
            return Ok(0);
        }
        let hash = self.enter(child);
        if transient {
            self.visited.remove(&identity);
        }
        Ok(salt.wrapping_mul(hash?))
    }
}
