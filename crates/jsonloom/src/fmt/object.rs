//! The user-aggregate formatter.
//!
//! Aggregates are declared with [`json_object!`](crate::json_object), which
//! generates the member table both dispatch directions run over. Member
//! emission consults the resolver: under an exclude-nulls policy an absent
//! member is skipped entirely rather than written as `null`. Unknown members
//! in the input are skipped; members missing from the input default.

use core::marker::PhantomData;

use crate::error::JsonError;
use crate::fmt::{Formatter, Resolver};
use crate::reader::JsonReader;
use crate::text::TextUnit;
use crate::writer::JsonWriter;

/// Member-table contract for aggregates, implemented by
/// [`json_object!`](crate::json_object).
pub trait JsonObject<S: TextUnit, R: Resolver>: Sized {
    /// Emit the members between the braces. The caller has already written
    /// `{` and will write `}`.
    fn write_members(
        &self,
        writer: &mut JsonWriter<'_, S>,
        nesting: u32,
    ) -> Result<(), JsonError>;

    /// Consume the members between the braces. The caller has already
    /// consumed `{`.
    fn read_members(reader: &mut JsonReader<'_, S>) -> Result<Self, JsonError>;
}

/// Formatter for [`JsonObject`] types.
#[derive(Debug)]
pub struct ObjectFormatter<T, S, R>(PhantomData<fn() -> (T, S, R)>);

impl<T, S, R> ObjectFormatter<T, S, R> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T, S, R> Formatter<S> for ObjectFormatter<T, S, R>
where
    T: JsonObject<S, R> + Send + Sync + 'static,
    S: TextUnit,
    R: Resolver,
{
    type Value = T;

    fn write(
        &self,
        writer: &mut JsonWriter<'_, S>,
        value: &T,
        nesting: u32,
    ) -> Result<(), JsonError> {
        writer.write_begin_object();
        value.write_members(writer, nesting)?;
        writer.write_end_object();
        Ok(())
    }

    fn read(&self, reader: &mut JsonReader<'_, S>) -> Result<T, JsonError> {
        reader.read_begin_object()?;
        T::read_members(reader)
    }
}

/// Declare a struct together with its JSON formatter.
///
/// Members are written in declaration order under their declared names
/// (original case). Every member type must itself resolve a formatter and
/// implement `Default` (members absent from the input default). Prefix the
/// declaration with `@recursive` when the type can transitively contain
/// itself, so serialization depth is accounted and bounded.
///
/// ```
/// jsonloom::json_object! {
///     /// A 2-D point.
///     pub struct Point {
///         pub x: f64,
///         pub y: f64,
///     }
/// }
///
/// let json = jsonloom::utf8::to_string(&Point { x: 1.0, y: -2.5 }).unwrap();
/// assert_eq!(json, "{\"x\":1.0,\"y\":-2.5}");
/// ```
#[macro_export]
macro_rules! json_object {
    (
        @recursive
        $($rest:tt)*
    ) => {
        $crate::json_object!(@declare [true] $($rest)*);
    };
    (
        @declare [$recursive:expr]
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($(#[$fmeta:meta])* $fvis:vis $field:ident : $fty:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis struct $name {
            $($(#[$fmeta])* $fvis $field: $fty),+
        }

        impl<S, R> $crate::fmt::JsonObject<S, R> for $name
        where
            S: $crate::TextUnit,
            R: $crate::fmt::Resolver,
        {
            fn write_members(
                &self,
                writer: &mut $crate::JsonWriter<'_, S>,
                nesting: u32,
            ) -> ::core::result::Result<(), $crate::JsonError> {
                let mut wrote_any = false;
                $(
                    if !(R::EXCLUDE_NULLS
                        && <$fty as $crate::fmt::JsonFormat<S, R>>::is_absent(&self.$field))
                    {
                        if wrote_any {
                            writer.write_value_separator();
                        }
                        wrote_any = true;
                        writer.write_property_name(stringify!($field));
                        $crate::fmt::Formatter::write(
                            <$fty as $crate::fmt::JsonFormat<S, R>>::FORMATTER,
                            writer,
                            &self.$field,
                            nesting,
                        )?;
                    }
                )+
                let _ = wrote_any;
                ::core::result::Result::Ok(())
            }

            fn read_members(
                reader: &mut $crate::JsonReader<'_, S>,
            ) -> ::core::result::Result<Self, $crate::JsonError> {
                $(let mut $field: ::core::option::Option<$fty> =
                    ::core::option::Option::None;)+
                let mut __jsonloom_members = 0usize;
                while reader.read_end_object_or_value_separator(&mut __jsonloom_members)? {
                    let __jsonloom_name = reader.read_property_name()?;
                    match __jsonloom_name.as_str() {
                        $(
                            stringify!($field) => {
                                $field = ::core::option::Option::Some(
                                    $crate::fmt::Formatter::read(
                                        <$fty as $crate::fmt::JsonFormat<S, R>>::FORMATTER,
                                        reader,
                                    )?,
                                );
                            }
                        )+
                        _ => reader.skip_value()?,
                    }
                }
                ::core::result::Result::Ok(Self {
                    $($field: $field.unwrap_or_default()),+
                })
            }
        }

        impl<S, R> $crate::fmt::JsonFormat<S, R> for $name
        where
            S: $crate::TextUnit,
            R: $crate::fmt::Resolver,
        {
            type Fmt = $crate::fmt::ObjectFormatter<Self, S, R>;
            const FORMATTER: &'static Self::Fmt = &$crate::fmt::ObjectFormatter::new();
            const RECURSION_CANDIDATE: bool = $recursive;
        }
    };
    (
        $($rest:tt)*
    ) => {
        $crate::json_object!(@declare [false] $($rest)*);
    };
}
