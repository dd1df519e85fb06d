//! Sharded string interner.
//!
//! Strings are leaked on first intern, so lookups hand out `&'static str`
//! and a `Name` stays valid for the life of the process.

use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::Name;

/// Identifiers every session needs before the first file is loaded.
const PREDECLARED: &[&str] = &[
    // Builtin types
    "int",
    "bool",
    "string",
    // Builtin values and functions
    "true",
    "false",
    "nil",
    "println",
    "print",
    "len",
    // Conventional names
    "main",
    "init",
    "_",
    ".",
];

/// Error raised when a shard runs out of index space.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    #[error("interner shard {shard} is full ({count} strings, max {max})", max = Name::MAX_LOCAL)]
    ShardOverflow { shard: usize, count: usize },
}

struct Shard {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Shard {
    fn new() -> Self {
        Shard {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        }
    }
}

/// Interner for identifiers and string literals.
///
/// Each shard sits behind its own `RwLock`; the fast path (already interned)
/// only takes a read lock.
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::NUM_SHARDS],
    count: AtomicUsize,
}

impl StringInterner {
    /// Create an interner with the empty string and the predeclared
    /// identifiers already present.
    pub fn new() -> Self {
        let shards = std::array::from_fn(|_| RwLock::new(Shard::new()));
        let interner = StringInterner {
            shards,
            count: AtomicUsize::new(0),
        };
        // "" must land on Name::EMPTY: shard 0, index 0.
        {
            let mut shard = interner.shards[0].write();
            shard.map.insert("", 0);
            shard.strings.push("");
            interner.count.store(1, Ordering::Relaxed);
        }
        for ident in PREDECLARED {
            interner.intern(ident);
        }
        interner
    }

    fn shard_of(s: &str) -> usize {
        if s.is_empty() {
            return 0;
        }
        let mut hasher = FxBuildHasher.build_hasher();
        s.hash(&mut hasher);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "reduced modulo NUM_SHARDS right after"
        )]
        let bucket = hasher.finish() as usize;
        bucket % Name::NUM_SHARDS
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "shard index is below NUM_SHARDS"
    )]
    fn shard_tag(shard_idx: usize) -> u32 {
        shard_idx as u32
    }

    /// Intern `s`, reporting shard exhaustion instead of panicking.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let shard_idx = Self::shard_of(s);
        let shard_tag = Self::shard_tag(shard_idx);
        let lock = &self.shards[shard_idx];

        if let Some(&local) = lock.read().map.get(s) {
            return Ok(Name::new(shard_tag, local));
        }

        let mut shard = lock.write();
        if let Some(&local) = shard.map.get(s) {
            return Ok(Name::new(shard_tag, local));
        }
        let local = u32::try_from(shard.strings.len())
            .ok()
            .filter(|&local| local <= Name::MAX_LOCAL)
            .ok_or(InternError::ShardOverflow {
                shard: shard_idx,
                count: shard.strings.len(),
            })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        shard.strings.push(leaked);
        shard.map.insert(leaked, local);
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(Name::new(shard_tag, local))
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// Panics if a shard overflows; use `try_intern` to handle that case.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up an already-interned name without inserting it.
    pub fn get(&self, s: &str) -> Option<Name> {
        let shard_idx = Self::shard_of(s);
        let local = *self.shards[shard_idx].read().map.get(s)?;
        Some(Name::new(Self::shard_tag(shard_idx), local))
    }

    /// The string behind `name`.
    ///
    /// # Panics
    /// Panics if `name` was produced by a different interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.shards[name.shard()].read().strings[name.local()]
    }

    /// Number of interned strings, the empty string included.
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// True when only the empty string is present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read access to interned names without naming the concrete interner.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

/// Reference-counted interner handle for components that outlive the
/// session that created them.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &StringInterner {
        &self.0
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}
