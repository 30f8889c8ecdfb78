//! Content digests of values.
//!
//! A digest is a fingerprint of a value's structure and contents. Two equal
//! values always share a digest within one process; digests are not stable
//! across processes and must never be persisted.

use core::hash::BuildHasher;

use hashbrown::DefaultHashBuilder;
use once_cell::sync::Lazy;

use crate::dynamic::Value;

/// Content digest of a value.
pub type Digest = u64;

// One hasher state for the whole process so digests stay comparable.
static DIGEST_STATE: Lazy<DefaultHashBuilder> = Lazy::new(DefaultHashBuilder::default);

/// Compute the content digest of `value`.
pub fn digest(value: &Value) -> Digest {
    DIGEST_STATE.hash_one(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn equal_values_share_a_digest() {
        let a = Value::from(vec![2, 4, 6]);
        let b = Value::from(vec![2, 4, 6]);
        assert_eq!(digest(&a), digest(&b));
    }

    #[test]
    fn mutation_changes_the_digest() {
        let mut v = Value::from(vec![2, 4, 6]);
        let before = digest(&v);
        v.as_array_mut().unwrap().push(Value::Int(8));
        assert_ne!(digest(&v), before);

        v.as_array_mut().unwrap().pop();
        assert_eq!(digest(&v), before);
    }

    #[test]
    fn signed_zero_digests_alike() {
        assert_eq!(digest(&Value::Float(0.0)), digest(&Value::Float(-0.0)));
    }
}
