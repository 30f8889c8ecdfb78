//! Whether staleness diagnostics are emitted.
//!
//! Each specialization has its own tri-state flag. An unset flag defers to a
//! single fallback flag shared by all specializations, and an unset fallback
//! means "off". Flags are never inherited between specializations: setting
//! the flag of `SubArray` has no effect on `SubString`.
//!
//! [`VerbosityRegistry`] holds the flags. The free functions in this module
//! operate on one process-wide registry.

use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::specialization::Specialization;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Verbosity {
    /// Defer to the fallback.
    #[default]
    Unset,
    Enabled,
    Disabled,
}

impl Verbosity {
    pub fn is_set(self) -> bool {
        self != Verbosity::Unset
    }
}

impl From<bool> for Verbosity {
    fn from(enabled: bool) -> Self {
        if enabled {
            Verbosity::Enabled
        } else {
            Verbosity::Disabled
        }
    }
}

impl From<Option<bool>> for Verbosity {
    fn from(flag: Option<bool>) -> Self {
        flag.map_or(Verbosity::Unset, Verbosity::from)
    }
}

/// Identity of a specialization type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecId {
    type_id: TypeId,
    name: &'static str,
}

impl SpecId {
    pub fn of<S: Specialization>() -> Self {
        SpecId {
            type_id: TypeId::of::<S>(),
            name: S::NAME,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct VerbosityRegistry {
    flags: HashMap<SpecId, Verbosity>,
    fallback: Verbosity,
}

impl VerbosityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, spec: SpecId) -> Verbosity {
        self.flags.get(&spec).copied().unwrap_or_default()
    }

    /// Set the flag of `spec`, returning the previous one.
    pub fn set(&mut self, spec: SpecId, value: Verbosity) -> Verbosity {
        let previous = if value.is_set() {
            self.flags.insert(spec, value)
        } else {
            self.flags.remove(&spec)
        };
        previous.unwrap_or_default()
    }

    pub fn fallback(&self) -> Verbosity {
        self.fallback
    }

    /// Set the fallback flag, returning the previous one.
    pub fn set_fallback(&mut self, value: Verbosity) -> Verbosity {
        core::mem::replace(&mut self.fallback, value)
    }

    /// Whether diagnostics for `spec` are on.
    pub fn resolve(&self, spec: SpecId) -> bool {
        match self.get(spec) {
            Verbosity::Enabled => true,
            Verbosity::Disabled => false,
            Verbosity::Unset => self.fallback == Verbosity::Enabled,
        }
    }
}

// ============================================================================
// Process-wide registry
// ============================================================================

static REGISTRY: Lazy<RwLock<VerbosityRegistry>> =
    Lazy::new(|| RwLock::new(VerbosityRegistry::new()));

// Writers replace whole flags, so a poisoned registry is still consistent.
fn registry() -> RwLockReadGuard<'static, VerbosityRegistry> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

fn registry_mut() -> RwLockWriteGuard<'static, VerbosityRegistry> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

pub fn get_verbosity<S: Specialization>() -> Verbosity {
    registry().get(SpecId::of::<S>())
}

pub fn set_verbosity<S: Specialization>(value: impl Into<Verbosity>) -> Verbosity {
    let value = value.into();
    debug!(specialization = S::NAME, ?value, "set verbosity");
    registry_mut().set(SpecId::of::<S>(), value)
}

pub fn fallback_verbosity() -> Verbosity {
    registry().fallback()
}

pub fn set_fallback_verbosity(value: impl Into<Verbosity>) -> Verbosity {
    let value = value.into();
    debug!(?value, "set fallback verbosity");
    registry_mut().set_fallback(value)
}

/// Whether staleness diagnostics for `S` are currently on.
pub fn is_verbose<S: Specialization>() -> bool {
    registry().resolve(SpecId::of::<S>())
}
