//! Value to text conversion
//!
//! [`convert_to_string`] renders a value the way it is sent over the wire:
//!
//! - absent values (`None`) become `None`;
//! - declared enums use their declared string value, falling back to the
//!   member name;
//! - everything else uses its ordinary `Display` output.
//!
//! ```rust
//! use nebula_util::convert_to_string;
//!
//! assert_eq!(convert_to_string(&123).unwrap().as_deref(), Some("123"));
//! assert_eq!(convert_to_string(&Some(123)).unwrap().as_deref(), Some("123"));
//! assert_eq!(convert_to_string(&None::<i32>).unwrap(), None);
//! ```

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::UtilError;
use crate::string_value::{DeclaredEnum, StringValueExt};

/// Types that have a textual wire representation.
///
/// Enums declared with [`string_enum!`](crate::string_enum) implement this
/// automatically. Other `Display` types can opt in with
/// [`display_to_api_string!`](crate::display_to_api_string).
pub trait ToApiString {
    /// Text for this value, or `None` when the value is absent.
    fn to_api_string(&self) -> Result<Option<String>, UtilError>;
}

/// Convert `value` to its textual wire representation.
pub fn convert_to_string<T: ToApiString + ?Sized>(value: &T) -> Result<Option<String>, UtilError> {
    value.to_api_string()
}

/// Text of a declared enum value.
///
/// A member without a declared string value renders as its name; any other
/// lookup failure is returned.
pub fn enum_to_api_string<E: DeclaredEnum>(value: &E) -> Result<Option<String>, UtilError> {
    match value.string_value() {
        Ok(text) => Ok(Some(text.to_owned())),
        Err(UtilError::NotFound { member, .. }) => Ok(Some(member.to_owned())),
        Err(err) => Err(err),
    }
}

/// Implement [`ToApiString`](crate::ToApiString) through `Display`.
///
/// ```rust
/// use std::fmt;
/// use nebula_util::{convert_to_string, display_to_api_string};
///
/// struct Point(i32, i32);
///
/// impl fmt::Display for Point {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{},{}", self.0, self.1)
///     }
/// }
///
/// display_to_api_string!(Point);
///
/// assert_eq!(convert_to_string(&Point(1, 2)).unwrap().as_deref(), Some("1,2"));
/// ```
#[macro_export]
macro_rules! display_to_api_string {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::ToApiString for $ty {
                fn to_api_string(&self) -> $crate::Result<::core::option::Option<::std::string::String>> {
                    ::core::result::Result::Ok(::core::option::Option::Some(
                        ::std::string::ToString::to_string(self),
                    ))
                }
            }
        )+
    };
}

display_to_api_string!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str,
    String,
);

impl ToApiString for Cow<'_, str> {
    fn to_api_string(&self) -> Result<Option<String>, UtilError> {
        Ok(Some(self.clone().into_owned()))
    }
}

impl<T: ToApiString> ToApiString for Option<T> {
    fn to_api_string(&self) -> Result<Option<String>, UtilError> {
        match self {
            Some(value) => value.to_api_string(),
            None => Ok(None),
        }
    }
}

impl<T: ToApiString + ?Sized> ToApiString for &T {
    fn to_api_string(&self) -> Result<Option<String>, UtilError> {
        (**self).to_api_string()
    }
}

impl<T: ToApiString + ?Sized> ToApiString for Box<T> {
    fn to_api_string(&self) -> Result<Option<String>, UtilError> {
        (**self).to_api_string()
    }
}

impl<T: ToApiString + ?Sized> ToApiString for Arc<T> {
    fn to_api_string(&self) -> Result<Option<String>, UtilError> {
        (**self).to_api_string()
    }
}

impl<T: ToApiString + ?Sized> ToApiString for Rc<T> {
    fn to_api_string(&self) -> Result<Option<String>, UtilError> {
        (**self).to_api_string()
    }
}
