//! Salt registry.
//!
//! An append-only pool of non-zero 32-bit salts indexed by property
//! position. Salts are drawn from the system's secure random source and the
//! pool only ever grows: once a position has a salt, that salt never changes,
//! so digests computed before a growth stay valid after it.
//!
//! The pool is published as an immutable snapshot behind a lock. Readers
//! clone the snapshot (`SaltTable`) and never block on each other; growth
//! builds a longer snapshot under the write lock and swaps it in.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use ring::rand::{SecureRandom, SystemRandom};

use crate::errors::{LogiHashError, Result};
use logihash_core_types::schema::EVENT_SALTS_GROWN;

/// Pool size used when nothing else is configured.
pub const DEFAULT_SALT_CAPACITY: usize = 128;

/// Source of candidate salt values.
///
/// Implementations may return zero; the registry redraws in that case.
pub trait RandomSource: Send + Sync {
    /// Draw one candidate salt
    ///
    /// # Errors
    ///
    /// Returns `RandomSourceUnavailable` if the source cannot produce bytes.
    fn draw(&self) -> Result<i32>;
}

/// `RandomSource` backed by the operating system CSPRNG.
#[derive(Debug)]
pub struct SystemRandomSource {
    rng: SystemRandom,
}

impl SystemRandomSource {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandomSource {
    fn draw(&self) -> Result<i32> {
        let mut bytes = [0u8; 4];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| LogiHashError::RandomSourceUnavailable)?;
        Ok(i32::from_le_bytes(bytes))
    }
}

/// Draw `count` non-zero salts from `source`.
///
/// # Errors
///
/// Propagates `RandomSourceUnavailable` from the source.
pub fn generate_salts(source: &dyn RandomSource, count: usize) -> Result<Vec<i32>> {
    let mut salts = Vec::with_capacity(count);
    while salts.len() < count {
        let candidate = source.draw()?;
        if candidate != 0 {
            salts.push(candidate);
        }
    }
    Ok(salts)
}

/// Immutable view of the salt pool at one point in time.
#[derive(Clone, PartialEq, Eq)]
pub struct SaltTable(Arc<[i32]>);

impl SaltTable {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Salt at `position`, if the snapshot covers it
    pub fn get(&self, position: usize) -> Option<i32> {
        self.0.get(position).copied()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }
}

impl fmt::Debug for SaltTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltTable").field("len", &self.len()).finish()
    }
}

/// Thread-safe, grow-only pool of salts.
pub struct SaltRegistry {
    pool: RwLock<SaltTable>,
    source: Box<dyn RandomSource>,
}

impl SaltRegistry {
    /// Create a registry holding `initial` freshly drawn salts.
    ///
    /// # Errors
    ///
    /// Returns `RandomSourceUnavailable` if the system CSPRNG fails.
    pub fn new(initial: usize) -> Result<Self> {
        Self::with_source(initial, Box::new(SystemRandomSource::new()))
    }

    /// Create a registry drawing from a caller-supplied source.
    ///
    /// # Errors
    ///
    /// Propagates failures of `source`.
    pub fn with_source(initial: usize, source: Box<dyn RandomSource>) -> Result<Self> {
        let salts = generate_salts(source.as_ref(), initial)?;
        Ok(Self {
            pool: RwLock::new(SaltTable(salts.into())),
            source,
        })
    }

    /// Create a registry seeded with a pinned salt table.
    ///
    /// Positions beyond the pinned table are drawn from the system CSPRNG
    /// when the pool grows.
    ///
    /// # Errors
    ///
    /// Returns `ZeroSalt` naming the first zero entry.
    pub fn from_salts(salts: Vec<i32>) -> Result<Self> {
        if let Some(position) = salts.iter().position(|s| *s == 0) {
            return Err(LogiHashError::ZeroSalt { position });
        }
        Ok(Self {
            pool: RwLock::new(SaltTable(salts.into())),
            source: Box::new(SystemRandomSource::new()),
        })
    }

    /// Current pool size
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current pool contents
    pub fn snapshot(&self) -> SaltTable {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Salt at `position`.
    ///
    /// # Errors
    ///
    /// Returns `SaltIndexOutOfRange` if the pool has not been grown to cover
    /// `position`; call `ensure` first.
    pub fn get(&self, position: usize) -> Result<i32> {
        let table = self.snapshot();
        table
            .get(position)
            .ok_or(LogiHashError::SaltIndexOutOfRange {
                index: position,
                len: table.len(),
            })
    }

    /// Guarantee at least `count` salts exist.
    ///
    /// Returns `true` if this call grew the pool. Concurrent callers asking
    /// for the same size grow it once; the others observe the grown pool and
    /// return `false`.
    ///
    /// # Errors
    ///
    /// Returns `RandomSourceUnavailable` if drawing fresh salts fails. The
    /// pool is left unchanged in that case.
    pub fn ensure(&self, count: usize) -> Result<bool> {
        if self.len() >= count {
            return Ok(false);
        }

        let started = Instant::now();
        let mut pool = self.pool.write().unwrap_or_else(PoisonError::into_inner);
        let current = pool.len();
        if current >= count {
            return Ok(false);
        }

        let fresh = generate_salts(self.source.as_ref(), count - current)?;
        let mut grown = Vec::with_capacity(count);
        grown.extend_from_slice(pool.as_slice());
        grown.extend(fresh);
        *pool = SaltTable(grown.into());

        tracing::info!(
            component = module_path!(),
            op = "ensure_salts",
            event = EVENT_SALTS_GROWN,
            pool_len = count as u64,
            grown_by = (count - current) as u64,
            duration_ms = started.elapsed().as_millis() as u64,
        );
        Ok(true)
    }

    /// `ensure(count)` followed by a snapshot covering at least `count`
    /// positions.
    ///
    /// # Errors
    ///
    /// Same as `ensure`.
    pub fn reserve(&self, count: usize) -> Result<SaltTable> {
        self.ensure(count)?;
        Ok(self.snapshot())
    }
}

impl fmt::Debug for SaltRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltRegistry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
