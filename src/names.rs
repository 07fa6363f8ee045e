//! Unique class and keyframe animation names.
//!
//! Every issued name is recorded in a [`NameRegistry`]. Registries only grow:
//! once a name has been issued it stays reserved for the lifetime of the
//! compiler that owns it.
//!
//! Names are claimed through a [`Reservation`], which stages names for one
//! batch and only commits them to the registry when the batch succeeds. A
//! batch that fails part way through leaves the registry untouched.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

/// Length of the random suffix appended to obfuscated names.
pub const SUFFIX_LENGTH: usize = 5;

/// The kind of name being generated. Each kind has its own registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Class,
    Animation,
}

impl NameKind {
    /// Human-readable label used in conflict errors.
    pub fn label(self) -> &'static str {
        match self {
            NameKind::Class => "class",
            NameKind::Animation => "keyframe animation",
        }
    }
}

/// Set of names already issued for one [`NameKind`].
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: HashSet<String>,
}

impl NameRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `name` has been issued.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Records `name` as issued. Returns false if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Starts staging names for one batch.
    pub fn reserve(&mut self, kind: NameKind) -> Reservation<'_> {
        Reservation {
            registry: self,
            kind,
            staged: Vec::new(),
        }
    }
}

/// Source of random name suffixes.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    rng: StdRng,
}

impl NameGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a deterministic generator, for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns `length` random lowercase ASCII letters.
    pub fn random_suffix(&mut self, length: usize) -> String {
        (0..length)
            .map(|_| char::from(self.rng.random_range(b'a'..=b'z')))
            .collect()
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Names staged for a single batch, committed on success.
///
/// Dropping a reservation without calling [`Reservation::commit`] discards
/// every staged name.
#[derive(Debug)]
pub struct Reservation<'a> {
    registry: &'a mut NameRegistry,
    kind: NameKind,
    staged: Vec<String>,
}

impl Reservation<'_> {
    fn is_taken(&self, name: &str) -> bool {
        self.registry.contains(name) || self.staged.iter().any(|s| s == name)
    }

    /// Produces a unique name for `base`.
    ///
    /// With `obfuscate`, appends `_` and a random lowercase suffix, retrying
    /// until the candidate is unused. Without it, returns `base` unchanged or
    /// fails with [`Error::NameConflict`] if `base` is taken.
    pub fn unique_name(
        &mut self,
        base: &str,
        obfuscate: bool,
        generator: &mut NameGenerator,
    ) -> Result<String> {
        let name = if obfuscate {
            loop {
                let candidate = format!("{}_{}", base, generator.random_suffix(SUFFIX_LENGTH));
                if !self.is_taken(&candidate) {
                    break candidate;
                }
                log::trace!("{} name {} collided, retrying", self.kind.label(), candidate);
            }
        } else if self.is_taken(base) {
            return Err(Error::NameConflict {
                kind: self.kind.label(),
                name: base.to_string(),
            });
        } else {
            base.to_string()
        };

        self.staged.push(name.clone());
        Ok(name)
    }

    /// Commits all staged names to the registry.
    pub fn commit(self) {
        for name in self.staged {
            self.registry.insert(name);
        }
    }
}
