//! View specializations.
//!
//! A specialization fixes, at compile time, what a view projects its slice
//! into and which operation names count as destructive for it. The three
//! shipped ones are uninhabited marker types; they only exist to be named in
//! `SubView<S>`.

/// Compile-time configuration of a view type.
///
/// # Example
///
/// ```
/// use subview_core::Specialization;
///
/// enum SubList {}
///
/// impl Specialization for SubList {
///     const NAME: &'static str = "SubList";
///     const PROJECTION: &'static str = "to_a";
///     const DESTRUCTIVE: &'static [&'static str] = &["push", "pop"];
/// }
/// ```
pub trait Specialization: 'static {
    /// Name used in diagnostics, error messages and `inspect`.
    const NAME: &'static str;

    /// Operation that turns the raw slice into the value operations run on.
    const PROJECTION: &'static str;

    /// Operation names ending with this are destructive.
    const MUTATION_SUFFIX: &'static str = "!";

    /// Destructive names on top of the base set shared by every view.
    const DESTRUCTIVE: &'static [&'static str] = &[];
}

/// View over any slice, projected as itself.
#[derive(Debug)]
pub enum SubObject {}

impl Specialization for SubObject {
    const NAME: &'static str = "SubObject";
    const PROJECTION: &'static str = "itself";
}

/// View over an array slice.
#[derive(Debug)]
pub enum SubArray {}

impl Specialization for SubArray {
    const NAME: &'static str = "SubArray";
    const PROJECTION: &'static str = "to_ary";
    const DESTRUCTIVE: &'static [&'static str] = &[
        "append",
        "delete",
        "delete_at",
        "delete_if",
        "fill",
        "keep_if",
        "push",
        "pop",
        "shift",
        "unshift",
    ];
}

/// View over a string slice.
#[derive(Debug)]
pub enum SubString {}

impl Specialization for SubString {
    const NAME: &'static str = "SubString";
    const PROJECTION: &'static str = "to_str";
}
