//! Byte-stream handle for a successful fetch.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};

/// A live response body from the remote origin.
///
/// Yields `Result<Bytes, reqwest::Error>` chunks; errors raised while the
/// caller consumes the stream (a mid-transfer connection drop, say) should
/// be routed through the gateway's stream-error classifier.
pub struct RemoteStream {
    status: StatusCode,
    content_type: Option<String>,
    content_length: Option<u64>,
    body: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
}

impl RemoteStream {
    pub(crate) fn new(response: Response) -> Self {
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let content_length = response.content_length();

        Self {
            status,
            content_type,
            content_length,
            body: Box::pin(response.bytes_stream()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Drain the stream into memory. Convenience for small bodies; large
    /// transfers should consume the stream chunk by chunk.
    pub async fn collect(mut self) -> Result<Vec<u8>, reqwest::Error> {
        let mut buf = match self.content_length {
            Some(n) => Vec::with_capacity(n as usize),
            None => Vec::new(),
        };
        while let Some(chunk) = self.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf)
    }
}

impl Stream for RemoteStream {
    type Item = Result<Bytes, reqwest::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.body.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for RemoteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStream")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
