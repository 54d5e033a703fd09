//! Argument guards
//!
//! Uniform "fail fast on missing input" checks. A guard either hands back the
//! present value or fails with [`UtilError::InvalidArgument`] naming the
//! argument.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::error::UtilError;

/// A value that may be absent.
///
/// `Option<T>` is the only truly nullable type. References, owned values,
/// std collections and smart pointers are always present, so guarding them
/// always succeeds.
pub trait Nullable {
    /// The value left once absence has been ruled out.
    type Value;

    /// Returns the present value, or `None` when absent.
    fn into_present(self) -> Option<Self::Value>;
}

impl<T> Nullable for Option<T> {
    type Value = T;

    #[inline]
    fn into_present(self) -> Option<T> {
        self
    }
}

macro_rules! impl_always_present {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Nullable for $ty {
                type Value = $ty;

                #[inline]
                fn into_present(self) -> Option<$ty> {
                    Some(self)
                }
            }
        )*
    };
}

impl_always_present!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
);

impl<'a, T: ?Sized> Nullable for &'a T {
    type Value = &'a T;

    #[inline]
    fn into_present(self) -> Option<&'a T> {
        Some(self)
    }
}

macro_rules! impl_always_present_generic {
    ($($ty:ident<$($param:ident),+>),* $(,)?) => {
        $(
            impl<$($param),+> Nullable for $ty<$($param),+> {
                type Value = Self;

                #[inline]
                fn into_present(self) -> Option<Self> {
                    Some(self)
                }
            }
        )*
    };
}

impl_always_present_generic!(
    Vec<T>,
    VecDeque<T>,
    HashSet<T, S>,
    BTreeSet<T>,
    HashMap<K, V, S>,
    BTreeMap<K, V>,
);

impl<T: ?Sized> Nullable for Box<T> {
    type Value = Self;

    #[inline]
    fn into_present(self) -> Option<Self> {
        Some(self)
    }
}

impl<T: ?Sized> Nullable for Arc<T> {
    type Value = Self;

    #[inline]
    fn into_present(self) -> Option<Self> {
        Some(self)
    }
}

impl<T: ?Sized> Nullable for Rc<T> {
    type Value = Self;

    #[inline]
    fn into_present(self) -> Option<Self> {
        Some(self)
    }
}

/// Fails with [`UtilError::InvalidArgument`] when `value` is absent.
///
/// ```
/// use nebula_util::require_non_null;
///
/// let name: Option<&str> = Some("value");
/// assert_eq!(require_non_null(name, "name").unwrap(), "value");
///
/// let missing: Option<&str> = None;
/// assert!(require_non_null(missing, "missing").is_err());
///
/// // Non-nullable values always pass.
/// assert_eq!(require_non_null(7_u32, "count").unwrap(), 7);
/// ```
#[inline]
pub fn require_non_null<N: Nullable>(
    value: N,
    name: impl Into<Cow<'static, str>>,
) -> Result<N::Value, UtilError> {
    value
        .into_present()
        .ok_or_else(|| UtilError::null_argument(name))
}

/// Fails with [`UtilError::InvalidArgument`] when `value` is absent or empty.
pub fn require_non_empty<'a>(
    value: Option<&'a str>,
    name: impl Into<Cow<'static, str>>,
) -> Result<&'a str, UtilError> {
    match value {
        None => Err(UtilError::null_argument(name)),
        Some("") => Err(UtilError::invalid_argument(name, "value cannot be empty")),
        Some(s) => Ok(s),
    }
}

/// Method-call form of [`require_non_null`] for options.
pub trait OptionExt<T> {
    /// Returns the contained value or an invalid argument error named `name`.
    fn require(self, name: impl Into<Cow<'static, str>>) -> Result<T, UtilError>;
}

impl<T> OptionExt<T> for Option<T> {
    #[inline]
    fn require(self, name: impl Into<Cow<'static, str>>) -> Result<T, UtilError> {
        require_non_null(self, name)
    }
}
