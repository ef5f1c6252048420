//! The UTF-8 session façade.
//!
//! Entry points that drive one full serialize or deserialize operation over
//! byte symbols: materializing surfaces, zero-copy view surfaces and async
//! byte-stream surfaces. The `_with` variants select a non-default
//! [`Resolver`](crate::fmt::Resolver).
//!
//! # Examples
//!
//! ```
//! let json = jsonloom::utf8::to_string(&vec![1i64, 2, 3]).unwrap();
//! assert_eq!(json, "[1,2,3]");
//!
//! let back: Vec<i64> = jsonloom::utf8::from_str("[1,2,3]").unwrap();
//! assert_eq!(back, vec![1, 2, 3]);
//! ```

use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::sync::CancellationToken;

use crate::error::{ErrorKind, JsonError};
use crate::fmt::{JsonFormat, Resolver, Standard};
use crate::pool;
use crate::session;

/// Serialize `value` to UTF-8 JSON bytes.
pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>, JsonError>
where
    T: JsonFormat<u8>,
{
    to_bytes_with::<T, Standard>(value)
}

/// [`to_bytes`] under a chosen resolver.
pub fn to_bytes_with<T, R>(value: &T) -> Result<Vec<u8>, JsonError>
where
    T: JsonFormat<u8, R>,
    R: Resolver,
{
    session::write_to_vec::<T, u8, R>(value)
}

/// Serialize `value` to a JSON `String`.
pub fn to_string<T>(value: &T) -> Result<String, JsonError>
where
    T: JsonFormat<u8>,
{
    to_string_with::<T, Standard>(value)
}

/// [`to_string`] under a chosen resolver.
pub fn to_string_with<T, R>(value: &T) -> Result<String, JsonError>
where
    T: JsonFormat<u8, R>,
    R: Resolver,
{
    let bytes = to_bytes_with::<T, R>(value)?;
    // The writer only emits well-formed UTF-8; a failure here means the
    // input `String` values themselves were not, which `String` rules out.
    String::from_utf8(bytes)
        .map_err(|e| JsonError::new(ErrorKind::InvalidText, e.utf8_error().valid_up_to()))
}

/// Deserialize a `T` from a fully-available byte view. This is the
/// zero-copy fast path: no staging buffer is allocated.
pub fn from_slice<T>(input: &[u8]) -> Result<T, JsonError>
where
    T: JsonFormat<u8>,
{
    from_slice_with::<T, Standard>(input)
}

/// [`from_slice`] under a chosen resolver.
pub fn from_slice_with<T, R>(input: &[u8]) -> Result<T, JsonError>
where
    T: JsonFormat<u8, R>,
    R: Resolver,
{
    session::read_from_view::<T, u8, R>(input)
}

/// Deserialize a `T` from JSON text.
pub fn from_str<T>(input: &str) -> Result<T, JsonError>
where
    T: JsonFormat<u8>,
{
    from_slice::<T>(input.as_bytes())
}

/// Serialize `value` and hand the bytes to an async sink.
///
/// The staging buffer comes from the shared pool and returns to it once the
/// sink has accepted the bytes. Cancellation is observed only at the sink
/// boundary; a token cancelled on entry returns before anything is rented.
pub async fn to_writer<T, W>(
    value: &T,
    sink: &mut W,
    cancel: &CancellationToken,
) -> Result<(), JsonError>
where
    T: JsonFormat<u8>,
    W: AsyncWrite + Unpin,
{
    if cancel.is_cancelled() {
        return Err(session::cancelled_at(0));
    }
    let mut scratch = pool::rent::<u8>(session::write_presize::<T, u8, Standard>());
    session::write_into::<T, u8, Standard>(value, scratch.vec_mut())?;
    session::flush_to_sink(sink, scratch.as_slice(), cancel).await
}

/// Read an async byte source to its end and deserialize the assembled view.
///
/// The fill buffer is rented at the sticky size hint and doubled through the
/// pool as chunks arrive; the synchronous engine then runs over the filled
/// region exactly as [`from_slice`] would.
pub async fn from_reader<T, Src>(
    source: &mut Src,
    cancel: &CancellationToken,
) -> Result<T, JsonError>
where
    T: JsonFormat<u8>,
    Src: AsyncRead + Unpin,
{
    let hint = session::read_presize::<T, u8, Standard>();
    let (scratch, filled) = session::fill_from_source(source, cancel, hint).await?;
    session::read_from_view::<T, u8, Standard>(&scratch.as_slice()[..filled])
}
