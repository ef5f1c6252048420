//! The optional-value formatter.

use core::marker::PhantomData;

use crate::error::JsonError;
use crate::fmt::{Formatter, JsonFormat, Resolver};
use crate::reader::JsonReader;
use crate::text::TextUnit;
use crate::writer::JsonWriter;

/// Formatter for `Option<T>`: absent writes the `null` literal, present
/// delegates to the inner formatter with the same nesting (the wrapper is
/// not a recursion candidate in itself; the inner type carries that bit).
#[derive(Debug)]
pub struct NullableFormatter<T, S, R>(PhantomData<fn() -> (T, S, R)>);

impl<T, S, R> NullableFormatter<T, S, R> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T, S, R> Formatter<S> for NullableFormatter<T, S, R>
where
    T: JsonFormat<S, R>,
    S: TextUnit,
    R: Resolver,
{
    type Value = Option<T>;

    fn write(
        &self,
        writer: &mut JsonWriter<'_, S>,
        value: &Option<T>,
        nesting: u32,
    ) -> Result<(), JsonError> {
        match value {
            None => {
                writer.write_null();
                Ok(())
            }
            Some(inner) => T::FORMATTER.write(writer, inner, nesting),
        }
    }

    fn read(&self, reader: &mut JsonReader<'_, S>) -> Result<Option<T>, JsonError> {
        if reader.read_is_null()? {
            Ok(None)
        } else {
            T::FORMATTER.read(reader).map(Some)
        }
    }
}

impl<T, S, R> JsonFormat<S, R> for Option<T>
where
    T: JsonFormat<S, R>,
    S: TextUnit,
    R: Resolver,
{
    type Fmt = NullableFormatter<T, S, R>;
    const FORMATTER: &'static Self::Fmt = &NullableFormatter::new();
    const RECURSION_CANDIDATE: bool = T::RECURSION_CANDIDATE;

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}
