//! Incremental decoding of newline-delimited response bodies.
//!
//! Streaming endpoints hold one long-lived connection open and emit one
//! record per line. Chunks arriving from the transport carry no framing:
//! a chunk may contain zero, one, or many line terminators, and a line
//! may span any number of chunks. [`LineStream`] re-frames the chunk
//! stream into complete lines, buffering the partial tail between polls.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures_util::Stream;
use ludonet_transport::TransportError;

use crate::{FormatHandler, WireError};

/// A lazy stream of decoded records over a fallible chunk stream.
///
/// Each poll either cuts the next complete line out of the buffer or
/// pulls another chunk from the transport — the consumer's iteration is
/// what drives the receive. An empty line decodes to the handler's
/// keep-alive sentinel. A trailing line without a terminator is decoded
/// when the connection closes.
///
/// Malformed-line policy: a line that fails to decode is yielded as an
/// `Err` item and the stream terminates. Once a line is undecodable the
/// framing is suspect, and this layer never hands out values it cannot
/// vouch for. Dropping the stream before exhaustion drops the chunk
/// stream, which releases the underlying connection.
#[derive(Debug)]
pub struct LineStream<F, S> {
    format: F,
    chunks: S,
    buf: BytesMut,
    done: bool,
}

impl<F, S> LineStream<F, S> {
    /// Wraps a chunk stream with a line decoder for the given format.
    pub fn new(format: F, chunks: S) -> Self {
        Self {
            format,
            chunks,
            buf: BytesMut::new(),
            done: false,
        }
    }
}

/// Cuts the first complete line out of `buf`, terminator excluded.
/// Returns `None` while no full line is buffered.
fn split_line(buf: &mut BytesMut) -> Option<Bytes> {
    let pos = buf.iter().position(|&b| b == b'\n')?;
    let mut line = buf.split_to(pos + 1);
    line.truncate(pos);
    trim_carriage_return(&mut line);
    Some(line.freeze())
}

fn trim_carriage_return(line: &mut BytesMut) {
    if line.last() == Some(&b'\r') {
        line.truncate(line.len() - 1);
    }
}

impl<F, S> Stream for LineStream<F, S>
where
    F: FormatHandler + Unpin,
    S: Stream<Item = Result<Bytes, TransportError>> + Unpin,
{
    type Item = Result<F::Output, WireError>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        loop {
            if let Some(line) = split_line(&mut this.buf) {
                let item = decode_line(&this.format, &line);
                if item.is_err() {
                    this.done = true;
                    this.buf.clear();
                }
                return Poll::Ready(Some(item));
            }

            match Pin::new(&mut this.chunks).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    this.buf.extend_from_slice(&chunk);
                }
                Poll::Ready(Some(Err(e))) => {
                    this.done = true;
                    this.buf.clear();
                    return Poll::Ready(Some(Err(e.into())));
                }
                Poll::Ready(None) => {
                    this.done = true;
                    if this.buf.is_empty() {
                        return Poll::Ready(None);
                    }
                    // Connection closed mid-line: decode the tail.
                    let mut tail = std::mem::take(&mut this.buf);
                    trim_carriage_return(&mut tail);
                    return Poll::Ready(Some(decode_line(
                        &this.format,
                        &tail,
                    )));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

fn decode_line<F: FormatHandler>(
    format: &F,
    line: &[u8],
) -> Result<F::Output, WireError> {
    if line.is_empty() {
        tracing::trace!("keep-alive line");
        return Ok(format.empty_line());
    }
    tracing::trace!(len = line.len(), "decoding line");
    format.decode_line(line)
}
