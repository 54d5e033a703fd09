#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Nebula Util
//!
//! General-purpose value utilities shared by Nebula client crates.
//!
//! ## Key Components
//!
//! - **Read-only views**: [`ReadOnlyView`] projects a [`Shared`] map live while
//!   rejecting every mutation with [`UtilError::Unsupported`]
//! - **Guards**: [`require_non_null`] and [`require_non_empty`] fail fast on
//!   missing arguments
//! - **Enum string values**: [`string_enum!`] declares per-member string
//!   values, resolved through the process-wide [`StringValueCache`]
//! - **Text conversion**: [`convert_to_string`] renders values, options and
//!   declared enums as wire text
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use nebula_util::{AsReadOnly, convert_to_string, require_non_null, share, string_enum};
//!
//! string_enum! {
//!     #[derive(Debug, Clone, Copy)]
//!     pub enum Order {
//!         Ascending => "asc",
//!         Descending => "desc",
//!     }
//! }
//!
//! let params = share(HashMap::new());
//! params.write().insert("order", convert_to_string(&Order::Descending)?.unwrap_or_default());
//!
//! let view = params.as_read_only();
//! assert_eq!(*view.get("order")?, "desc");
//! assert!(view.clear().is_err());
//!
//! let key = require_non_null(Some("order"), "key")?;
//! assert!(view.contains_key(key));
//! # Ok::<(), nebula_util::UtilError>(())
//! ```

pub mod constants;
pub mod convert;
pub mod guard;
pub mod read_only;
pub mod string_value;

// Re-export main types for convenience
pub use constants::*;
pub use convert::{ToApiString, convert_to_string};
pub use guard::{Nullable, OptionExt, require_non_empty, require_non_null};
pub use read_only::{
    AsReadOnly, KeyIter, Keys, MapLookup, MapRead, ReadOnlyGuard, ReadOnlyView, Shared, ValueIter,
    Values, share,
};
pub use string_value::{
    CacheStats, DeclaredEnum, EnumMember, StringValueCache, StringValueExt,
    string_value_of_ordinal,
};

// Re-export common error types
pub use error::*;

mod error;

/// Result type used throughout Nebula utilities
pub type Result<T> = std::result::Result<T, error::UtilError>;

/// Common prelude for Nebula crates
pub mod prelude {
    pub use super::{
        AsReadOnly, DeclaredEnum, OptionExt, ReadOnlyView, Result, Shared, StringValueExt,
        ToApiString, UtilError, convert_to_string, require_non_null,
    };
}
