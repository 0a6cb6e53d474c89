//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Hashing subject
pub const FIELD_TYPE_NAME: &str = "type_name";

// Hash values
pub const FIELD_HASH: &str = "hash";
pub const FIELD_OLD_HASH: &str = "old_hash";
pub const FIELD_NEW_HASH: &str = "new_hash";

// Collection sizes
pub const FIELD_SELECTION_LEN: &str = "selection_len";
pub const FIELD_POOL_LEN: &str = "pool_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_SALTS_GROWN: &str = "salts_grown";
pub const EVENT_HASH_CHANGED: &str = "hash_changed";
