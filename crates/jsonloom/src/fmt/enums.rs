//! The enumeration formatter.
//!
//! Closed sets of named values travel as JSON strings of their member names,
//! which stays stable across discriminant reassignments. Both dispatch
//! directions are exhaustive `match`es generated at declaration time by
//! [`json_enum!`](crate::json_enum); there is no per-element reflection and
//! nothing to construct or cache at runtime.

use core::marker::PhantomData;

use crate::error::{ErrorKind, JsonError};
use crate::fmt::{Formatter, Resolver};
use crate::reader::JsonReader;
use crate::text::TextUnit;
use crate::writer::JsonWriter;

/// Name-table contract for enumerations.
///
/// Implemented by [`json_enum!`](crate::json_enum); can be implemented by
/// hand for types whose declared set is narrower than their representation,
/// in which case [`JsonEnum::name`] returning `None` surfaces as
/// [`ErrorKind::InvalidEnumValue`].
pub trait JsonEnum: Copy + Send + Sync + 'static {
    /// The underlying integer value, for diagnostics.
    fn discriminant(self) -> i64;

    /// Textual name of a declared member; `None` outside the declared set.
    fn name(self) -> Option<&'static str>;

    /// Inverse of [`JsonEnum::name`].
    fn from_name(name: &str) -> Option<Self>;
}

/// Formatter for [`JsonEnum`] types.
#[derive(Debug)]
pub struct EnumFormatter<T, S, R>(PhantomData<fn() -> (T, S, R)>);

impl<T, S, R> EnumFormatter<T, S, R> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T, S, R> Formatter<S> for EnumFormatter<T, S, R>
where
    T: JsonEnum,
    S: TextUnit,
    R: Resolver,
{
    type Value = T;

    fn write(
        &self,
        writer: &mut JsonWriter<'_, S>,
        value: &T,
        _nesting: u32,
    ) -> Result<(), JsonError> {
        match value.name() {
            Some(name) => {
                writer.write_string(name);
                Ok(())
            }
            None => Err(JsonError::new(
                ErrorKind::InvalidEnumValue(value.discriminant()),
                writer.pos(),
            )),
        }
    }

    fn read(&self, reader: &mut JsonReader<'_, S>) -> Result<T, JsonError> {
        let at = reader.offset();
        let name = reader.read_string()?;
        match T::from_name(&name) {
            Some(member) => Ok(member),
            None => Err(JsonError::new(ErrorKind::InvalidEnumName(name), at)),
        }
    }
}

/// Declare a fieldless enumeration together with its JSON formatter.
///
/// The macro expands to the enum itself (with the given integer repr and
/// explicit discriminants), a [`JsonEnum`] impl whose dispatchers are plain
/// `match`es, and formatter resolution for both encodings under every
/// resolver.
///
/// ```
/// jsonloom::json_enum! {
///     /// Traffic-light phases.
///     pub enum Phase: u8 {
///         Red = 0,
///         Amber = 1,
///         Green = 2,
///     }
/// }
///
/// let json = jsonloom::utf8::to_string(&Phase::Amber).unwrap();
/// assert_eq!(json, "\"Amber\"");
/// ```
#[macro_export]
macro_rules! json_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ty {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr($repr)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $crate::fmt::JsonEnum for $name {
            fn discriminant(self) -> i64 {
                self as $repr as i64
            }

            fn name(self) -> ::core::option::Option<&'static str> {
                match self {
                    $(Self::$variant => ::core::option::Option::Some(stringify!($variant))),+
                }
            }

            fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    $(stringify!($variant) => ::core::option::Option::Some(Self::$variant),)+
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl<S, R> $crate::fmt::JsonFormat<S, R> for $name
        where
            S: $crate::TextUnit,
            R: $crate::fmt::Resolver,
        {
            type Fmt = $crate::fmt::EnumFormatter<Self, S, R>;
            const FORMATTER: &'static Self::Fmt = &$crate::fmt::EnumFormatter::new();
        }
    };
}
