//! Shared session drivers.
//!
//! One serialize or deserialize invocation is a *session*: pre-size the
//! buffer from the sticky hint, drive the top-level formatter exactly once
//! over a fully-available view, then feed the observed symbol count back
//! into the hint. The per-encoding façades ([`crate::utf8`],
//! [`crate::utf16`]) build on these and add materialization.
//!
//! The async plumbing shared by both façades also lives here: chunked
//! assembly of the input view and the buffer flush, the only two points
//! where the codec suspends or observes cancellation. The formatter engine
//! itself never does either.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::{ErrorKind, JsonError};
use crate::fmt::{Formatter, JsonFormat, Resolver};
use crate::hints::{self, Dir};
use crate::pool::{self, Scratch};
use crate::reader::JsonReader;
use crate::text::TextUnit;
use crate::writer::JsonWriter;

/// Serialize into a fresh buffer pre-sized by the sticky hint; the buffer is
/// transferred to the caller.
pub(crate) fn write_to_vec<T, S, R>(value: &T) -> Result<Vec<S>, JsonError>
where
    T: JsonFormat<S, R>,
    S: TextUnit,
    R: Resolver,
{
    let mut buf = Vec::with_capacity(hints::presize::<(T, S, R)>(Dir::Write));
    write_into::<T, S, R>(value, &mut buf)?;
    Ok(buf)
}

/// Serialize appending to a caller-owned buffer (the async surfaces pass a
/// pooled one).
pub(crate) fn write_into<T, S, R>(value: &T, buf: &mut Vec<S>) -> Result<(), JsonError>
where
    T: JsonFormat<S, R>,
    S: TextUnit,
    R: Resolver,
{
    let mut writer = JsonWriter::new(buf);
    T::FORMATTER.write(&mut writer, value, 0)?;
    let produced = writer.pos();
    hints::observe::<(T, S, R)>(Dir::Write, produced);
    Ok(())
}

/// Deserialize from a fully-available view and remember its length as the
/// next pre-size hint.
pub(crate) fn read_from_view<T, S, R>(view: &[S]) -> Result<T, JsonError>
where
    T: JsonFormat<S, R>,
    S: TextUnit,
    R: Resolver,
{
    let mut reader = JsonReader::with_max_depth(view, R::MAX_READ_DEPTH);
    let value = T::FORMATTER.read(&mut reader)?;
    hints::observe::<(T, S, R)>(Dir::Read, view.len());
    Ok(value)
}

/// The pre-size a deserialize session of this triple would use; async
/// surfaces rent their fill buffers at this size.
pub(crate) fn read_presize<T, S, R>() -> usize
where
    T: JsonFormat<S, R>,
    S: TextUnit,
    R: Resolver,
{
    hints::presize::<(T, S, R)>(Dir::Read)
}

/// Serialize pre-size, for the async surfaces' pooled staging buffers.
pub(crate) fn write_presize<T, S, R>() -> usize
where
    T: JsonFormat<S, R>,
    S: TextUnit,
    R: Resolver,
{
    hints::presize::<(T, S, R)>(Dir::Write)
}

/// Smallest rental for chunked reads; sticky hints below this would make
/// the first chunks degenerate.
const MIN_FILL: usize = 64;

pub(crate) fn cancelled_at(offset: usize) -> JsonError {
    JsonError::new(ErrorKind::Cancelled, offset)
}

/// Assemble the whole input from an async byte source into a pooled buffer:
/// rent at the sticky hint, read chunks, double the rental through the pool
/// when full. Returns the lease and the filled length.
///
/// Cancellation is observed only here, at the read boundaries; a token
/// already cancelled on entry returns before renting.
pub(crate) async fn fill_from_source<Src>(
    source: &mut Src,
    cancel: &CancellationToken,
    hint: usize,
) -> Result<(Scratch<u8>, usize), JsonError>
where
    Src: AsyncRead + Unpin,
{
    if cancel.is_cancelled() {
        return Err(cancelled_at(0));
    }
    let mut scratch = pool::rent::<u8>(hint.max(MIN_FILL));
    let mut filled = 0usize;
    loop {
        if scratch.vec_mut().capacity() == filled {
            scratch.grow();
        }
        let n = {
            let buf = scratch.vec_mut();
            let cap = buf.capacity();
            buf.resize(cap, 0);
            tokio::select! {
                () = cancel.cancelled() => return Err(cancelled_at(filled)),
                read = source.read(&mut buf[filled..]) => {
                    read.map_err(|e| JsonError::new(ErrorKind::Io(e.to_string()), filled))?
                }
            }
        };
        filled += n;
        scratch.vec_mut().truncate(filled);
        if n == 0 {
            break;
        }
    }
    trace!(bytes = filled, "assembled input view from async source");
    Ok((scratch, filled))
}

/// Write a completed buffer to an async byte sink and flush it, observing
/// cancellation only at that boundary.
pub(crate) async fn flush_to_sink<W>(
    sink: &mut W,
    buf: &[u8],
    cancel: &CancellationToken,
) -> Result<(), JsonError>
where
    W: AsyncWrite + Unpin,
{
    trace!(bytes = buf.len(), "handing serialized buffer to sink");
    let io = async {
        sink.write_all(buf).await?;
        sink.flush().await
    };
    tokio::select! {
        () = cancel.cancelled() => Err(cancelled_at(buf.len())),
        result = io => result.map_err(|e| JsonError::new(ErrorKind::Io(e.to_string()), buf.len())),
    }
}
