use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio_util::codec::Decoder;
use tracing::{debug, error, trace, warn};

use crate::codec::{ReasonPhrase, RequestDecoder};
use crate::connection::message_writer::MessageWriter;
use crate::ensure;
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, Request, Response, SendError};

/// Size of the single read buffer used by [`ReadMode::SingleRead`] by default
pub const DEFAULT_READ_CAPACITY: usize = 4 * 1024;

/// Upper bound used by [`ReadMode::content_length`]
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// How the bytes of a request are collected from the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// One read call of at most `capacity` bytes; whatever arrived is the whole request.
    ///
    /// Anything beyond `capacity`, or anything the peer had not sent yet when the read
    /// returned, is not part of the request. Oversized requests are truncated, not
    /// rejected.
    SingleRead { capacity: usize },

    /// Read until the header section is complete and `Content-Length` body bytes have
    /// arrived, or the peer stops sending. Requests larger than `max_message_size` are
    /// answered with `413`.
    ContentLength { max_message_size: usize },
}

impl Default for ReadMode {
    fn default() -> Self {
        ReadMode::SingleRead { capacity: DEFAULT_READ_CAPACITY }
    }
}

impl ReadMode {
    pub fn content_length() -> Self {
        ReadMode::ContentLength { max_message_size: DEFAULT_MAX_MESSAGE_SIZE }
    }
}

/// One accepted connection, from the first read until the stream is closed.
///
/// A connection serves exactly one request:
///
/// 1. read the request bytes according to the [`ReadMode`]
/// 2. parse them with [`RequestDecoder`]; this never fails
/// 3. hand the request to the [`Handler`]
/// 4. serialize the response, write it, shut the write direction down
///
/// Handler panics are not caught here; they end the task running the connection.
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    reader: R,
    writer: MessageWriter<W>,
    decoder: RequestDecoder,
    read_mode: ReadMode,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer: MessageWriter::with_capacity(writer, DEFAULT_READ_CAPACITY),
            decoder: RequestDecoder::new(),
            read_mode: ReadMode::default(),
        }
    }

    pub fn with_read_mode(mut self, read_mode: ReadMode) -> Self {
        self.read_mode = read_mode;
        self
    }

    pub fn with_reason_phrase(mut self, reason_phrase: ReasonPhrase) -> Self {
        self.writer.set_reason_phrase(reason_phrase);
        self
    }

    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        let request = match self.read_request().await {
            Ok(request) => request,

            Err(e @ ParseError::TooLargeMessage { .. }) => {
                warn!(cause = %e, "rejecting request");
                let response = handler.reject(413, "Payload Too Large");
                self.send_response(response).await?;
                return Err(e.into());
            }

            Err(e) => {
                error!("can't receive request, cause {}", e);
                return Err(e.into());
            }
        };

        debug!(method = request.method(), path = request.path(), "received request");

        let response = handler.call(request).await;

        trace!(status = response.status(), body_size = response.body().len(), "sending response");
        self.send_response(response).await?;

        Ok(())
    }

    async fn read_request(&mut self) -> Result<Request, ParseError> {
        let mut buf = match self.read_mode {
            ReadMode::SingleRead { capacity } => self.read_once(capacity).await?,
            ReadMode::ContentLength { max_message_size } => self.read_framed(max_message_size).await?,
        };

        // nothing received at all still counts as a (malformed) request
        Ok(self.decoder.decode(&mut buf)?.unwrap_or_default())
    }

    async fn read_once(&mut self, capacity: usize) -> Result<BytesMut, ParseError> {
        let mut buf = BytesMut::zeroed(capacity);
        let read = self.reader.read(&mut buf[..]).await?;
        buf.truncate(read);

        if capacity > 0 && read == capacity {
            warn!(capacity, "request filled the read buffer, anything after it is dropped");
        }

        Ok(buf)
    }

    async fn read_framed(&mut self, max_message_size: usize) -> Result<BytesMut, ParseError> {
        let mut buf = BytesMut::with_capacity(DEFAULT_READ_CAPACITY.min(max_message_size));

        loop {
            match expected_message_size(&buf) {
                Some(expected) => {
                    ensure!(expected <= max_message_size, ParseError::too_large_message(expected, max_message_size));
                    if buf.len() >= expected {
                        buf.truncate(expected);
                        return Ok(buf);
                    }
                }
                None => {
                    ensure!(buf.len() <= max_message_size, ParseError::too_large_message(buf.len(), max_message_size));
                }
            }

            if self.reader.read_buf(&mut buf).await? == 0 {
                debug!(received = buf.len(), "peer stopped sending before the message was complete");
                return Ok(buf);
            }
        }
    }

    async fn send_response(&mut self, response: Response) -> Result<(), SendError> {
        self.writer.write(response)?;
        self.writer.flush().await?;
        self.writer.shutdown().await
    }
}

/// Returns the size of the whole message once its header section is complete.
///
/// The size is the header section plus the `Content-Length` value, or just the header
/// section when there is no usable `Content-Length`.
fn expected_message_size(buf: &[u8]) -> Option<usize> {
    let header_end = find_header_end(buf)?;

    let content_length = buf[..header_end]
        .split(|b| *b == b'\n')
        .skip(1)
        .filter_map(|line| {
            let line = std::str::from_utf8(line).ok()?;
            let (name, value) = line.split_once(':')?;
            if !name.trim().eq_ignore_ascii_case("content-length") {
                return None;
            }
            value.trim().parse::<usize>().ok()
        })
        .last()
        .unwrap_or(0);

    Some(header_end.saturating_add(content_length))
}

/// Position right after the empty line that ends the header section.
fn find_header_end(buf: &[u8]) -> Option<usize> {
    let mut line_start = 0;
    for (index, b) in buf.iter().enumerate() {
        if *b != b'\n' {
            continue;
        }

        let line = &buf[line_start..index];
        if line_start > 0 && (line.is_empty() || line == b"\r") {
            return Some(index + 1);
        }
        line_start = index + 1;
    }
    None
}
