//! The UTF-16 session façade.
//!
//! The same surfaces as [`crate::utf8`], over 16-bit code units. The view
//! surfaces work on `&[u16]` directly; the async surfaces frame the units as
//! little-endian byte pairs (no BOM) so they compose with ordinary byte
//! streams.
//!
//! # Examples
//!
//! ```
//! let units = jsonloom::utf16::to_units(&vec![1i64, 2, 3]).unwrap();
//! assert_eq!(units, "[1,2,3]".encode_utf16().collect::<Vec<u16>>());
//! ```

use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::sync::CancellationToken;

use crate::error::{ErrorKind, JsonError};
use crate::fmt::{JsonFormat, Resolver, Standard};
use crate::pool;
use crate::session;

/// Serialize `value` to UTF-16 code units.
pub fn to_units<T>(value: &T) -> Result<Vec<u16>, JsonError>
where
    T: JsonFormat<u16>,
{
    to_units_with::<T, Standard>(value)
}

/// [`to_units`] under a chosen resolver.
pub fn to_units_with<T, R>(value: &T) -> Result<Vec<u16>, JsonError>
where
    T: JsonFormat<u16, R>,
    R: Resolver,
{
    session::write_to_vec::<T, u16, R>(value)
}

/// Serialize `value` to a JSON `String` by way of UTF-16 units.
pub fn to_string<T>(value: &T) -> Result<String, JsonError>
where
    T: JsonFormat<u16>,
{
    to_string_with::<T, Standard>(value)
}

/// [`to_string`] under a chosen resolver.
pub fn to_string_with<T, R>(value: &T) -> Result<String, JsonError>
where
    T: JsonFormat<u16, R>,
    R: Resolver,
{
    let units = to_units_with::<T, R>(value)?;
    // The writer never splits a surrogate pair.
    String::from_utf16(&units).map_err(|_| JsonError::new(ErrorKind::InvalidText, 0))
}

/// Deserialize a `T` from a fully-available code-unit view. This is the
/// zero-copy fast path.
pub fn from_units<T>(input: &[u16]) -> Result<T, JsonError>
where
    T: JsonFormat<u16>,
{
    from_units_with::<T, Standard>(input)
}

/// [`from_units`] under a chosen resolver.
pub fn from_units_with<T, R>(input: &[u16]) -> Result<T, JsonError>
where
    T: JsonFormat<u16, R>,
    R: Resolver,
{
    session::read_from_view::<T, u16, R>(input)
}

/// Deserialize a `T` from JSON text, transcoding through a pooled unit
/// buffer sized by the sticky hint.
pub fn from_str<T>(input: &str) -> Result<T, JsonError>
where
    T: JsonFormat<u16>,
{
    let mut scratch = pool::rent::<u16>(session::read_presize::<T, u16, Standard>());
    scratch.vec_mut().extend(input.encode_utf16());
    session::read_from_view::<T, u16, Standard>(scratch.as_slice())
}

/// Serialize `value` and hand the units to an async sink as little-endian
/// byte pairs.
pub async fn to_writer<T, W>(
    value: &T,
    sink: &mut W,
    cancel: &CancellationToken,
) -> Result<(), JsonError>
where
    T: JsonFormat<u16>,
    W: AsyncWrite + Unpin,
{
    if cancel.is_cancelled() {
        return Err(session::cancelled_at(0));
    }
    let mut scratch = pool::rent::<u16>(session::write_presize::<T, u16, Standard>());
    session::write_into::<T, u16, Standard>(value, scratch.vec_mut())?;
    let mut staged = pool::rent::<u8>(scratch.as_slice().len() * 2);
    {
        let bytes = staged.vec_mut();
        for &unit in scratch.as_slice() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
    }
    session::flush_to_sink(sink, staged.as_slice(), cancel).await
}

/// Read an async byte source delivering little-endian UTF-16 to its end and
/// deserialize the assembled view. An odd byte count is an
/// [`ErrorKind::UnexpectedEnd`].
pub async fn from_reader<T, Src>(
    source: &mut Src,
    cancel: &CancellationToken,
) -> Result<T, JsonError>
where
    T: JsonFormat<u16>,
    Src: AsyncRead + Unpin,
{
    let hint = session::read_presize::<T, u16, Standard>() * 2;
    let (bytes, filled) = session::fill_from_source(source, cancel, hint).await?;
    if filled % 2 != 0 {
        return Err(JsonError::new(ErrorKind::UnexpectedEnd, filled / 2));
    }
    let mut units = pool::rent::<u16>(filled / 2);
    units.vec_mut().extend(
        bytes.as_slice()[..filled]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
    );
    session::read_from_view::<T, u16, Standard>(units.as_slice())
}
