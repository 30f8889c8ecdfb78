use core::marker::PhantomData;

use crate::specialization::Specialization;

/// Destructive in every specialization.
pub const BASE_DESTRUCTIVE: &[&str] = &[
    "[]=",
    "<<",
    "clear",
    "concat",
    "force_encoding",
    "insert",
    "prepend",
    "replace",
];

/// Classifies operation names as destructive for the specialization `S`.
///
/// An operation is destructive when its name ends with
/// [`Specialization::MUTATION_SUFFIX`] (and is more than just the suffix),
/// or is one of [`BASE_DESTRUCTIVE`], or is one of `S`'s own
/// [`Specialization::DESTRUCTIVE`] names.
pub struct DestructiveGuard<S: Specialization> {
    _spec: PhantomData<fn() -> S>,
}

impl<S: Specialization> DestructiveGuard<S> {
    pub fn of() -> Self {
        DestructiveGuard { _spec: PhantomData }
    }

    pub fn is_destructive(&self, op: &str) -> bool {
        // A bare suffix (`!`) is negation, not a mutating variant.
        (op.len() > S::MUTATION_SUFFIX.len() && op.ends_with(S::MUTATION_SUFFIX))
            || BASE_DESTRUCTIVE.contains(&op)
            || S::DESTRUCTIVE.contains(&op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specialization::{SubArray, SubObject, SubString};

    enum Tilde {}

    impl Specialization for Tilde {
        const NAME: &'static str = "Tilde";
        const PROJECTION: &'static str = "itself";
        const MUTATION_SUFFIX: &'static str = "~";
        const DESTRUCTIVE: &'static [&'static str] = &["frob"];
    }

    #[test]
    fn test_suffix_and_base_set() {
        let guard = DestructiveGuard::<SubString>::of();
        assert!(guard.is_destructive("upcase!"));
        assert!(guard.is_destructive("<<"));
        assert!(guard.is_destructive("force_encoding"));
        assert!(!guard.is_destructive("upcase"));
        assert!(!guard.is_destructive("=="));
        assert!(!guard.is_destructive("!="));
        assert!(!guard.is_destructive("!"));
    }

    #[test]
    fn test_extras_are_per_specialization() {
        assert!(DestructiveGuard::<SubArray>::of().is_destructive("push"));
        assert!(DestructiveGuard::<SubArray>::of().is_destructive("keep_if"));
        assert!(!DestructiveGuard::<SubObject>::of().is_destructive("push"));
        assert!(!DestructiveGuard::<SubString>::of().is_destructive("pop"));
        assert!(!DestructiveGuard::<SubArray>::of().is_destructive("frob"));
    }

    #[test]
    fn test_custom_suffix() {
        let guard = DestructiveGuard::<Tilde>::of();
        assert!(guard.is_destructive("sort~"));
        assert!(guard.is_destructive("frob"));
        assert!(guard.is_destructive("clear"));
        assert!(!guard.is_destructive("sort!"));
    }
}
