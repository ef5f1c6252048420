//! The formatter dispatch and composition engine.
//!
//! A *formatter* is a stateless encoder/decoder pair specialized for one
//! value type over one symbol encoding under one resolver policy. Resolution
//! is monomorphization: [`JsonFormat::FORMATTER`] is a promoted `&'static`
//! reference to a zero-sized formatter, so each `(T, S, R)` instantiation
//! *is* the canonical singleton and construction cannot race.
//!
//! Composite formatters ([`ArrayFormatter`], [`NullableFormatter`],
//! [`EnumFormatter`], [`ObjectFormatter`]) obtain their children through the
//! same resolution and recurse over value structure, carrying a nesting
//! counter that only recursion-candidate edges advance.

mod array;
mod enums;
mod nullable;
mod object;
mod primitives;

pub use array::ArrayFormatter;
pub use enums::{EnumFormatter, JsonEnum};
pub use nullable::NullableFormatter;
pub use object::{JsonObject, ObjectFormatter};
pub use primitives::{
    BoolFormatter, F32Formatter, F64Formatter, I8Formatter, I16Formatter, I32Formatter,
    I64Formatter, StringFormatter, U8Formatter, U16Formatter, U32Formatter, U64Formatter,
};

use crate::error::JsonError;
use crate::reader::JsonReader;
use crate::text::TextUnit;
use crate::writer::JsonWriter;

/// Policy identity threaded through formatter resolution as a type-level
/// parameter.
///
/// Defining a resolver type selects a whole family of formatters; the
/// canonical [`Standard`] resolver omits absent aggregate members and keeps
/// member names in their declared case.
pub trait Resolver: Copy + Send + Sync + 'static {
    /// Skip aggregate members whose value is absent instead of writing
    /// `null`.
    const EXCLUDE_NULLS: bool;
    /// Maximum recursion-candidate nesting tolerated while serializing.
    const MAX_NESTING: u32 = 256;
    /// Maximum structural depth tolerated while deserializing.
    const MAX_READ_DEPTH: u32 = 1024;
}

/// The default resolver: exclude-nulls, original-case member names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Standard;

impl Resolver for Standard {
    const EXCLUDE_NULLS: bool = true;
}

/// One specialized encoder/decoder pair.
///
/// Formatters are stateless and reentrant: both operations work entirely
/// through the reader/writer handed in, and neither may be retained past the
/// call (the borrow checker enforces it).
pub trait Formatter<S: TextUnit> {
    type Value;

    /// Emit the JSON representation of `value`.
    ///
    /// `nesting` counts recursion-candidate edges crossed so far; composite
    /// formatters advance it and fail with
    /// [`ErrorKind::NestingExceeded`](crate::ErrorKind::NestingExceeded)
    /// when the resolver bound is crossed.
    fn write(
        &self,
        writer: &mut JsonWriter<'_, S>,
        value: &Self::Value,
        nesting: u32,
    ) -> Result<(), JsonError>;

    /// Consume one JSON value starting at the reader cursor.
    fn read(&self, reader: &mut JsonReader<'_, S>) -> Result<Self::Value, JsonError>;
}

/// Formatter resolution: the static registry mapping a value type to its
/// canonical formatter for symbol `S` under resolver `R`.
pub trait JsonFormat<S: TextUnit, R: Resolver = Standard>:
    Sized + Send + Sync + 'static
{
    type Fmt: Formatter<S, Value = Self> + Send + Sync + 'static;

    /// The singleton formatter for the `(Self, S, R)` triple.
    const FORMATTER: &'static Self::Fmt;

    /// Whether values of this type may transitively contain further values
    /// of it. Consulted by composites before advancing the nesting counter.
    const RECURSION_CANDIDATE: bool = false;

    /// Whether this particular value is the absent sentinel. Aggregate
    /// formatters consult this to apply [`Resolver::EXCLUDE_NULLS`].
    fn is_absent(&self) -> bool {
        false
    }
}
