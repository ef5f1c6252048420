//! Formatters for the built-in scalar types.

use core::marker::PhantomData;

use crate::error::JsonError;
use crate::fmt::{Formatter, JsonFormat, Resolver};
use crate::reader::JsonReader;
use crate::text::TextUnit;
use crate::writer::JsonWriter;

macro_rules! scalar_formatter {
    ($(#[$meta:meta])* $fmt:ident, $ty:ty, $read:ident, $write:ident via $wide:ty) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $fmt<S, R>(PhantomData<fn() -> (S, R)>);

        impl<S, R> $fmt<S, R> {
            #[must_use]
            pub const fn new() -> Self {
                Self(PhantomData)
            }
        }

        impl<S: TextUnit, R: Resolver> Formatter<S> for $fmt<S, R> {
            type Value = $ty;

            fn write(
                &self,
                writer: &mut JsonWriter<'_, S>,
                value: &$ty,
                _nesting: u32,
            ) -> Result<(), JsonError> {
                writer.$write(*value as $wide);
                Ok(())
            }

            fn read(&self, reader: &mut JsonReader<'_, S>) -> Result<$ty, JsonError> {
                reader.$read()
            }
        }

        impl<S: TextUnit, R: Resolver> JsonFormat<S, R> for $ty {
            type Fmt = $fmt<S, R>;
            const FORMATTER: &'static Self::Fmt = &$fmt::new();
        }
    };
}

scalar_formatter!(I8Formatter, i8, read_i8, write_i64 via i64);
scalar_formatter!(I16Formatter, i16, read_i16, write_i64 via i64);
scalar_formatter!(I32Formatter, i32, read_i32, write_i64 via i64);
scalar_formatter!(I64Formatter, i64, read_i64, write_i64 via i64);
scalar_formatter!(U8Formatter, u8, read_u8, write_u64 via u64);
scalar_formatter!(U16Formatter, u16, read_u16, write_u64 via u64);
scalar_formatter!(U32Formatter, u32, read_u32, write_u64 via u64);
scalar_formatter!(U64Formatter, u64, read_u64, write_u64 via u64);
scalar_formatter!(F32Formatter, f32, read_f32, write_f32 via f32);
scalar_formatter!(F64Formatter, f64, read_f64, write_f64 via f64);

#[derive(Debug)]
pub struct BoolFormatter<S, R>(PhantomData<fn() -> (S, R)>);

impl<S, R> BoolFormatter<S, R> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<S: TextUnit, R: Resolver> Formatter<S> for BoolFormatter<S, R> {
    type Value = bool;

    fn write(
        &self,
        writer: &mut JsonWriter<'_, S>,
        value: &bool,
        _nesting: u32,
    ) -> Result<(), JsonError> {
        writer.write_bool(*value);
        Ok(())
    }

    fn read(&self, reader: &mut JsonReader<'_, S>) -> Result<bool, JsonError> {
        reader.read_bool()
    }
}

impl<S: TextUnit, R: Resolver> JsonFormat<S, R> for bool {
    type Fmt = BoolFormatter<S, R>;
    const FORMATTER: &'static Self::Fmt = &BoolFormatter::new();
}

#[derive(Debug)]
pub struct StringFormatter<S, R>(PhantomData<fn() -> (S, R)>);

impl<S, R> StringFormatter<S, R> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<S: TextUnit, R: Resolver> Formatter<S> for StringFormatter<S, R> {
    type Value = String;

    fn write(
        &self,
        writer: &mut JsonWriter<'_, S>,
        value: &String,
        _nesting: u32,
    ) -> Result<(), JsonError> {
        writer.write_string(value);
        Ok(())
    }

    fn read(&self, reader: &mut JsonReader<'_, S>) -> Result<String, JsonError> {
        reader.read_string()
    }
}

impl<S: TextUnit, R: Resolver> JsonFormat<S, R> for String {
    type Fmt = StringFormatter<S, R>;
    const FORMATTER: &'static Self::Fmt = &StringFormatter::new();
}
