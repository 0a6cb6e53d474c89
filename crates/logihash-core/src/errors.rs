use thiserror::Error;

/// Result type alias using LogiHashError
pub type Result<T> = std::result::Result<T, LogiHashError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    ConflictingSelection,

    // Salt pool
    SaltIndexOutOfRange,
    ZeroSalt,
    RandomSource,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::ConflictingSelection => "ERR_CONFLICTING_SELECTION",
            ExErrorKind::SaltIndexOutOfRange => "ERR_SALT_INDEX_OUT_OF_RANGE",
            ExErrorKind::ZeroSalt => "ERR_ZERO_SALT",
            ExErrorKind::RandomSource => "ERR_RANDOM_SOURCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and the hashing
/// context (type name, salt position) the error was raised in.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    position: Option<usize>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            position: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add type name context
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add salt position context
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the type name context, if any
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Get the salt position context, if any
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        if let Some(position) = self.position {
            write!(f, " (position: {})", position)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for logical hashing operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LogiHashError {
    // ===== Configuration Errors =====
    /// A single declaration site supplied both an include and an exclude list
    #[error(
        "Conflicting selection for type {type_name}: includes {includes:?} and excludes {excludes:?} declared together"
    )]
    ConflictingSelection {
        type_name: String,
        includes: Vec<String>,
        excludes: Vec<String>,
    },

    /// Type name is empty or whitespace-only
    #[error("Invalid type name: {reason}")]
    InvalidTypeName { reason: String },

    // ===== Salt Pool Errors =====
    /// Salt requested beyond the current pool (caller must ensure first)
    #[error("Salt index {index} is beyond the pool of {len} salts")]
    SaltIndexOutOfRange { index: usize, len: usize },

    /// A pinned salt table contains a zero entry
    #[error("Salt at position {position} is zero")]
    ZeroSalt { position: usize },

    /// The system random source failed to produce bytes
    #[error("Secure random source unavailable")]
    RandomSourceUnavailable,

    // ===== Integration Errors =====
    /// Filesystem failure (config loading)
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Serialization or parse failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from LogiHashError to ExError
impl From<LogiHashError> for ExError {
    fn from(err: LogiHashError) -> Self {
        let message = err.to_string();
        match err {
            LogiHashError::ConflictingSelection { type_name, .. } => {
                ExError::new(ExErrorKind::ConflictingSelection)
                    .with_op("register_type")
                    .with_type_name(type_name)
                    .with_message(message)
            }

            LogiHashError::InvalidTypeName { .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("register_type")
                .with_message(message),

            LogiHashError::SaltIndexOutOfRange { index, .. } => {
                ExError::new(ExErrorKind::SaltIndexOutOfRange)
                    .with_op("get_salt")
                    .with_position(index)
                    .with_message(message)
            }

            LogiHashError::ZeroSalt { position } => ExError::new(ExErrorKind::ZeroSalt)
                .with_op("seed_salts")
                .with_position(position)
                .with_message(message),

            LogiHashError::RandomSourceUnavailable => ExError::new(ExErrorKind::RandomSource)
                .with_op("generate_salts")
                .with_message(message),

            LogiHashError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(message),

            LogiHashError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to LogiHashError
impl From<serde_json::Error> for LogiHashError {
    fn from(err: serde_json::Error) -> Self {
        LogiHashError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from toml::de::Error to LogiHashError
impl From<toml::de::Error> for LogiHashError {
    fn from(err: toml::de::Error) -> Self {
        LogiHashError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from toml::ser::Error to LogiHashError
impl From<toml::ser::Error> for LogiHashError {
    fn from(err: toml::ser::Error) -> Self {
        LogiHashError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from std::io::Error to LogiHashError
impl From<std::io::Error> for LogiHashError {
    fn from(err: std::io::Error) -> Self {
        LogiHashError::Io {
            message: err.to_string(),
        }
    }
}
