//! The logical hash capability.
//!
//! A type takes part in logical hashing by implementing [`LogicalHash`]:
//! it names its [`LogicalType`] and hands out property values by name.
//! Values are either null, a leaf digest, or another node, in which case the
//! engine recurses into it.
//!
//! Property values are passed to a sink rather than returned, so
//! implementations can lend out values that live behind a `RefCell` borrow
//! or are built on the fly.
//!
//! A node that outlives the computation (owned by the instance, or reached
//! through an `Rc` or a borrow of one) is handed out with [`Value::node`].
//! The engine remembers its identity for the rest of the top-level call, so
//! a node reachable twice is counted once. A node that is built inside
//! `read_property`, or copied out of a guard that is dropped when the sink
//! returns, must be handed out with [`Value::transient`]: its address can be
//! reused by the next temporary, so the engine forgets it once its subtree
//! is hashed.
//!
//! ```
//! use std::sync::Arc;
//! use logihash_core::{LogicalHash, LogicalType, TypeDecl, Value};
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
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use crate::logical_type::LogicalType;
use crate::scalar::ScalarHash;

/// Reference identity of a node within one hash computation.
///
/// The default identity is the node's address paired with its concrete
/// type, so a node and a differently-typed node stored at the same address
/// (a struct and its first field) stay distinct. Graphs built from handles
/// rather than references can assign explicit ids instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeIdentity {
    Address {
        addr: usize,
        type_name: &'static str,
    },
    Assigned(u64),
}

impl NodeIdentity {
    pub fn of<T: ?Sized>(node: &T) -> Self {
        NodeIdentity::Address {
            addr: (node as *const T).cast::<()>() as usize,
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn assigned(id: u64) -> Self {
        NodeIdentity::Assigned(id)
    }
}

/// A property value as seen by the engine.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Null,
    /// Digest of a leaf value without the logical hash capability
    Scalar(i32),
    /// Node that stays alive for the whole computation
    Node(&'a dyn LogicalHash),
    /// Node that only lives until the sink returns
    Transient(&'a dyn LogicalHash),
}

impl<'a> Value<'a> {
    pub fn scalar<T: ScalarHash + ?Sized>(value: &T) -> Self {
        Value::Scalar(value.scalar_hash())
    }

    pub fn optional_scalar<T: ScalarHash>(value: Option<&T>) -> Self {
        value.map_or(Value::Null, Value::scalar)
    }

    pub fn node(node: &'a dyn LogicalHash) -> Self {
        Value::Node(node)
    }

    pub fn transient(node: &'a dyn LogicalHash) -> Self {
        Value::Transient(node)
    }

    pub fn optional_node<N: LogicalHash>(node: Option<&'a N>) -> Self {
        match node {
            Some(n) => Value::Node(n),
            None => Value::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The node, if this value exposes the logical hash capability
    pub fn as_node(&self) -> Option<&'a dyn LogicalHash> {
        match *self {
            Value::Node(node) | Value::Transient(node) => Some(node),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Scalar(h) => f.debug_tuple("Scalar").field(h).finish(),
            Value::Node(n) => f
                .debug_tuple("Node")
                .field(&n.logical_type().name())
                .finish(),
            Value::Transient(n) => f
                .debug_tuple("Transient")
                .field(&n.logical_type().name())
                .finish(),
        }
    }
}

/// Most recently computed digest of one instance.
///
/// Starts unset. Only the engine writes it, once per top-level computation
/// on the owning instance. It is not synchronized: an instance shared
/// between threads needs the same external locking as any other mutation.
#[derive(Debug, Clone, Default)]
pub struct LastHashRecord(Cell<Option<i32>>);

impl LastHashRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<i32> {
        self.0.get()
    }

    pub(crate) fn set(&self, hash: i32) {
        self.0.set(Some(hash));
    }
}

/// Capability of an object to take part in logical hashing.
pub trait LogicalHash {
    /// Registered metadata for this object's type
    fn logical_type(&self) -> &LogicalType;

    /// Pass the value of `name` to `sink`.
    ///
    /// Not calling `sink` reads as null.
    fn read_property(&self, name: &str, sink: &mut dyn FnMut(Value<'_>));

    /// Per-instance record used for change detection; `None` opts out
    fn last_hash(&self) -> Option<&LastHashRecord> {
        None
    }

    fn identity(&self) -> NodeIdentity {
        NodeIdentity::of(self)
    }
}

macro_rules! forward_logical_hash {
    ($($ptr:ident),*) => {
        $(impl<T: LogicalHash + ?Sized> LogicalHash for $ptr<T> {
            fn logical_type(&self) -> &LogicalType {
                (**self).logical_type()
            }

            fn read_property(&self, name: &str, sink: &mut dyn FnMut(Value<'_>)) {
                (**self).read_property(name, sink)
            }

            fn last_hash(&self) -> Option<&LastHashRecord> {
                (**self).last_hash()
            }

            fn identity(&self) -> NodeIdentity {
                (**self).identity()
            }
        })*
    };
}

forward_logical_hash!(Box, Rc, Arc);

impl<T: LogicalHash + ?Sized> LogicalHash for &T {
    fn logical_type(&self) -> &LogicalType {
        (**self).logical_type()
    }

    fn read_property(&self, name: &str, sink: &mut dyn FnMut(Value<'_>)) {
        (**self).read_property(name, sink)
    }

    fn last_hash(&self) -> Option<&LastHashRecord> {
        (**self).last_hash()
    }

    fn identity(&self) -> NodeIdentity {
        (**self).identity()
    }
}
