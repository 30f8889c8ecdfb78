//! Public API surface.
//!
//! Everything a caller needs to create and use views:
//!
//! ```
//! use subview_core::api::{ConstructionErrorKind, SubString, SubView, shared};
//!
//! let src = shared(vec![1, 2, 3]);
//! let err = SubView::<SubString>::new(src, 0, 1).unwrap_err();
//! assert_eq!(err.kind(), ConstructionErrorKind::WrongSourceType);
//! assert_eq!(err.to_string(), "wrong source class Array for this class SubString");
//! ```

pub mod error;

pub use crate::source::{SharedValue, Source, shared};
pub use crate::specialization::{Specialization, SubArray, SubObject, SubString};
pub use crate::verbosity::{
    SpecId, Verbosity, VerbosityRegistry, fallback_verbosity, get_verbosity, is_verbose,
    set_fallback_verbosity, set_verbosity,
};
pub use crate::view::{BASE_DESTRUCTIVE, DestructiveGuard, Snapshot, SubView};
pub use error::{ConstructionError, ConstructionErrorKind, ExtractError, InvokeError, OpError};
