//! Declared string values for enum members
//!
//! An enum declared through [`string_enum!`](crate::string_enum) carries a
//! static table of its members. Each member may declare a string value that
//! replaces its name wherever the enum is rendered as text (query parameters,
//! headers, request bodies).
//!
//! Lookups go through a [`StringValueCache`], keyed by enum type and ordinal.
//! The first lookup of a member inspects the declared table; later lookups of
//! the same member are served from the cache.
//!
//! ```rust
//! use nebula_util::{StringValueExt, string_enum};
//!
//! string_enum! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     pub enum Projection {
//!         Basic => "basic",
//!         Full => "full",
//!         Legacy,
//!     }
//! }
//!
//! assert_eq!(Projection::Full.string_value().unwrap(), "full");
//! assert!(Projection::Legacy.string_value().unwrap_err().is_not_found());
//! ```

use std::any::TypeId;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::error::UtilError;

/// One declared member of an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumMember {
    /// Member name as written in the declaration.
    pub name: &'static str,
    /// Discriminant of the member.
    pub ordinal: i64,
    /// Declared string value, if any.
    pub string_value: Option<&'static str>,
}

/// An enum with a static table of declared members.
///
/// Implemented by [`string_enum!`](crate::string_enum); implementing it by
/// hand requires `MEMBERS` to list every variant exactly once.
pub trait DeclaredEnum: Sized + 'static {
    /// Name of the enum type.
    const TYPE_NAME: &'static str;

    /// All declared members in declaration order.
    const MEMBERS: &'static [EnumMember];

    /// Discriminant of this value.
    fn ordinal(&self) -> i64;
}

/// Hit and inspection counters of a [`StringValueCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cached members.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that inspected a member table.
    pub inspections: u64,
}

static GLOBAL_CACHE: LazyLock<StringValueCache> = LazyLock::new(StringValueCache::new);

/// Concurrent cache of resolved enum members.
///
/// Entries are never evicted: the set of declared members is finite and
/// fixed for the life of the process. Concurrent first lookups of the same
/// member may each inspect the table; they resolve to the same entry.
#[derive(Debug, Default)]
pub struct StringValueCache {
    entries: DashMap<(TypeId, i64), &'static EnumMember>,
    hits: AtomicU64,
    inspections: AtomicU64,
}

impl StringValueCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`StringValueExt`] and
    /// [`ToApiString`](crate::ToApiString).
    pub fn global() -> &'static Self {
        &GLOBAL_CACHE
    }

    /// Resolve the declared member of `E` with discriminant `ordinal`.
    ///
    /// Fails with [`UtilError::InvalidArgument`] when `E` declares no such
    /// member.
    pub fn member<E: DeclaredEnum>(&self, ordinal: i64) -> Result<&'static EnumMember, UtilError> {
        let key = (TypeId::of::<E>(), ordinal);
        if let Some(entry) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(*entry.value());
        }

        let member = self.inspect::<E>(ordinal)?;
        Ok(*self.entries.entry(key).or_insert(member))
    }

    fn inspect<E: DeclaredEnum>(&self, ordinal: i64) -> Result<&'static EnumMember, UtilError> {
        self.inspections.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(
            enum_type = E::TYPE_NAME,
            ordinal,
            "inspecting declared enum members"
        );
        E::MEMBERS
            .iter()
            .find(|member| member.ordinal == ordinal)
            .ok_or_else(|| {
                UtilError::invalid_argument(
                    "ordinal",
                    format!("{ordinal} is not a declared member of {}", E::TYPE_NAME),
                )
            })
    }

    /// Declared string value of `value`.
    ///
    /// Fails with [`UtilError::NotFound`] when the member declares none.
    pub fn string_value<E: DeclaredEnum>(&self, value: &E) -> Result<&'static str, UtilError> {
        self.string_value_of_ordinal::<E>(value.ordinal())
    }

    /// Declared string value of the member of `E` with discriminant `ordinal`.
    pub fn string_value_of_ordinal<E: DeclaredEnum>(
        &self,
        ordinal: i64,
    ) -> Result<&'static str, UtilError> {
        let member = self.member::<E>(ordinal)?;
        member.string_value.ok_or(UtilError::NotFound {
            type_name: E::TYPE_NAME,
            member: member.name,
        })
    }

    /// Number of cached members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            inspections: self.inspections.load(Ordering::Relaxed),
        }
    }
}

/// Declared string value of the member of `E` with discriminant `ordinal`,
/// resolved through the global cache.
///
/// This is how an integer that was never checked against `E` gets looked up.
pub fn string_value_of_ordinal<E: DeclaredEnum>(ordinal: i64) -> Result<&'static str, UtilError> {
    StringValueCache::global().string_value_of_ordinal::<E>(ordinal)
}

/// String value lookups on declared enums, through the global cache.
pub trait StringValueExt: DeclaredEnum {
    /// Declared member this value resolves to.
    fn member(&self) -> Result<&'static EnumMember, UtilError> {
        StringValueCache::global().member::<Self>(self.ordinal())
    }

    /// Declared string value, or [`UtilError::NotFound`].
    fn string_value(&self) -> Result<&'static str, UtilError> {
        StringValueCache::global().string_value(self)
    }
}

impl<E: DeclaredEnum> StringValueExt for E {}

/// Declare an enum together with its member table.
///
/// Each variant may carry an explicit discriminant and a string value
/// (`Variant = 3 => "three"`). The macro implements
/// [`DeclaredEnum`](crate::DeclaredEnum), `TryFrom<i64>` and
/// [`ToApiString`](crate::ToApiString) for the enum.
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $discriminant:expr)? $(=> $string_value:literal)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(= $discriminant)?,
            )+
        }

        impl $crate::DeclaredEnum for $name {
            const TYPE_NAME: &'static str = ::core::stringify!($name);

            const MEMBERS: &'static [$crate::EnumMember] = &[
                $(
                    $crate::EnumMember {
                        name: ::core::stringify!($variant),
                        ordinal: $name::$variant as i64,
                        string_value: $crate::__declared_string_value!($($string_value)?),
                    },
                )+
            ];

            fn ordinal(&self) -> i64 {
                match self {
                    $( Self::$variant => Self::$variant as i64, )+
                }
            }
        }

        impl ::core::convert::TryFrom<i64> for $name {
            type Error = $crate::UtilError;

            fn try_from(ordinal: i64) -> ::core::result::Result<Self, Self::Error> {
                $(
                    if ordinal == $name::$variant as i64 {
                        return ::core::result::Result::Ok($name::$variant);
                    }
                )+
                ::core::result::Result::Err($crate::UtilError::invalid_argument(
                    "ordinal",
                    ::std::format!(
                        "{} is not a declared member of {}",
                        ordinal,
                        ::core::stringify!($name)
                    ),
                ))
            }
        }

        impl $crate::ToApiString for $name {
            fn to_api_string(&self) -> $crate::Result<::core::option::Option<::std::string::String>> {
                $crate::convert::enum_to_api_string(self)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __declared_string_value {
    () => {
        ::core::option::Option::None
    };
    ($value:literal) => {
        ::core::option::Option::Some($value)
    };
}
