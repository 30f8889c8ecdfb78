//! Detection of sources changed behind a view's back.
//!
//! A view remembers the digest of its source at construction. Every access
//! that reads the source recomputes the digest, and on a mismatch a warning
//! is emitted (when verbosity allows). The view keeps working either way and
//! the remembered digest is never refreshed, so reverting the source silences
//! the warning again.

use alloc::string::String;
use core::fmt;
use core::ops::Deref;

use subview_values::Value;
use tracing::warn;

use super::SubView;
use crate::specialization::Specialization;
use crate::verbosity;

const SLICE_PREVIEW_LIMIT: usize = 64;
const SLICE_PREVIEW_KEEP: usize = 60;

/// Shorten a rendered slice for a diagnostic.
pub(super) fn preview(rendered: String) -> String {
    if rendered.chars().count() <= SLICE_PREVIEW_LIMIT {
        return rendered;
    }
    let mut short: String = rendered.chars().take(SLICE_PREVIEW_KEEP).collect();
    short.push_str("...");
    short
}

/// An immutable copy of a source or slice, taken at one point in time.
#[derive(Clone, PartialEq)]
pub struct Snapshot(pub(super) Value);

impl Snapshot {
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Deref for Snapshot {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.0
    }
}

impl PartialEq<Value> for Snapshot {
    fn eq(&self, other: &Value) -> bool {
        self.0 == *other
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<S: Specialization, A> SubView<S, A> {
    /// Whether the source differs from when the view was created.
    pub fn is_stale(&self) -> bool {
        self.source.digest() != self.digest
    }

    /// Warn if the source has changed since the view was created.
    ///
    /// Never fails and never changes the view.
    pub fn check_stale(&self) {
        if !verbosity::is_verbose::<S>() || !self.is_stale() {
            return;
        }
        let slice = preview(self.render_slice());
        warn!(
            target: "subview::stale",
            specialization = S::NAME,
            offset = ?self.offset,
            length = ?self.length,
            slice = %slice,
            "source has destructively changed: {}[{:?},{:?}]{}",
            S::NAME,
            self.offset,
            self.length,
            slice
        );
    }

    /// A copy of the whole source as it is now.
    pub fn source_snapshot(&self) -> Snapshot {
        self.check_stale();
        Snapshot(self.source.snapshot())
    }

    /// Inspect form of the raw (unprojected) slice.
    pub(super) fn render_slice(&self) -> String {
        match self.source.extract_range(&self.offset, &self.length) {
            Ok(slice) => slice.inspect(),
            Err(err) => alloc::format!("#<{err}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preview_keeps_short_slices() {
        let exact: String = "x".repeat(64);
        assert_eq!(preview(exact.clone()), exact);
    }

    #[test]
    fn test_preview_truncates_long_slices() {
        let long: String = "é".repeat(65);
        let short = preview(long);
        assert_eq!(short.chars().count(), 63);
        assert!(short.ends_with("é..."));
    }
}
