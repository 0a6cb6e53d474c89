//! Change notification.
//!
//! After a top-level computation the engine compares the new digest with
//! the instance's `LastHashRecord`. When the type has a callback, the record
//! is already set, and the digest moved, the callback runs once with the old
//! and new values, and only then is the record updated.
//!
//! Nodes reached through recursion are not checked: their records and
//! callbacks are left alone while another object's digest is computed.

use logihash_core_types::schema::EVENT_HASH_CHANGED;

use crate::node::LogicalHash;

/// Handler invoked when an instance's digest changes between computations.
///
/// Registered per type and shared by all of its instances.
pub trait ChangeCallback: Send + Sync {
    fn hash_changed(&self, subject: &dyn LogicalHash, old_hash: i32, new_hash: i32);
}

impl<F> ChangeCallback for F
where
    F: Fn(&dyn LogicalHash, i32, i32) + Send + Sync,
{
    fn hash_changed(&self, subject: &dyn LogicalHash, old_hash: i32, new_hash: i32) {
        self(subject, old_hash, new_hash)
    }
}

/// Run change detection for `subject` and record `new_hash`.
///
/// Returns whether the type's callback was invoked.
pub(crate) fn observe(subject: &dyn LogicalHash, new_hash: i32) -> bool {
    let Some(record) = subject.last_hash() else {
        return false;
    };
    let ty = subject.logical_type();

    let notified = match (ty.change_callback(), record.get()) {
        (Some(callback), Some(old_hash)) if old_hash != new_hash => {
            tracing::debug!(
                component = module_path!(),
                op = "compute_hash",
                event = EVENT_HASH_CHANGED,
                type_name = ty.name(),
                old_hash,
                new_hash,
            );
            callback.hash_changed(subject, old_hash, new_hash);
            true
        }
        _ => false,
    };

    record.set(new_hash);
    notified
}
