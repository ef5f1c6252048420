//! The homogeneous sequence formatter.

use core::marker::PhantomData;

use crate::error::{ErrorKind, JsonError};
use crate::fmt::{Formatter, JsonFormat, Resolver};
use crate::pool;
use crate::reader::JsonReader;
use crate::text::TextUnit;
use crate::writer::JsonWriter;

/// Initial scratch capacity rented while decoding.
const INITIAL_SCRATCH: usize = 4;

/// Formatter for `Vec<T>`.
///
/// Serialization advances the nesting counter once per array when the
/// element type is a recursion candidate; deserialization builds into a
/// pooled scratch buffer that is returned on every exit path and doubles
/// through the pool when full.
#[derive(Debug)]
pub struct ArrayFormatter<T, S, R>(PhantomData<fn() -> (T, S, R)>);

impl<T, S, R> ArrayFormatter<T, S, R> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T, S, R> Formatter<S> for ArrayFormatter<T, S, R>
where
    T: JsonFormat<S, R>,
    S: TextUnit,
    R: Resolver,
{
    type Value = Vec<T>;

    fn write(
        &self,
        writer: &mut JsonWriter<'_, S>,
        value: &Vec<T>,
        nesting: u32,
    ) -> Result<(), JsonError> {
        let next = if T::RECURSION_CANDIDATE {
            if nesting >= R::MAX_NESTING {
                return Err(JsonError::new(
                    ErrorKind::NestingExceeded(R::MAX_NESTING),
                    writer.pos(),
                ));
            }
            nesting + 1
        } else {
            nesting
        };
        writer.write_begin_array();
        for (i, element) in value.iter().enumerate() {
            if i > 0 {
                writer.write_value_separator();
            }
            T::FORMATTER.write(writer, element, next)?;
        }
        writer.write_end_array();
        Ok(())
    }

    fn read(&self, reader: &mut JsonReader<'_, S>) -> Result<Vec<T>, JsonError> {
        reader.read_begin_array()?;
        let mut scratch = pool::rent::<T>(INITIAL_SCRATCH);
        let mut count = 0usize;
        while reader.read_end_array_or_value_separator(&mut count)? {
            if scratch.is_full() {
                scratch.grow();
            }
            scratch.push(T::FORMATTER.read(reader)?);
        }
        if count == 0 {
            // The canonical empty sequence allocates nothing.
            Ok(Vec::new())
        } else {
            Ok(scratch.take_all())
        }
    }
}

impl<T, S, R> JsonFormat<S, R> for Vec<T>
where
    T: JsonFormat<S, R>,
    S: TextUnit,
    R: Resolver,
{
    type Fmt = ArrayFormatter<T, S, R>;
    const FORMATTER: &'static Self::Fmt = &ArrayFormatter::new();
    const RECURSION_CANDIDATE: bool = T::RECURSION_CANDIDATE;
}
