//! Content channels
//!
//! A [`ContentChannel`] is the write side of one body stream (a response
//! body, or a request body a handler asked to read). The matching
//! [`BodyReceiver`] is held by whoever consumes the body.
//!
//! Every channel delivers exactly one terminal event: [`ChannelEvent::Close`]
//! or [`ChannelEvent::Failed`]. All channel methods take `&mut self`, so a
//! channel has a single writer at any time; it can be moved into another task
//! to finish the body later.
//!
//! A channel whose receiver is gone (the request was cancelled, e.g. by a host
//! timeout) is closed as well: the next write or close fails and
//! [`ContentChannel::is_closed`] reports `true`.

use anyhow::anyhow;
use bytes::{Bytes, BytesMut};
use tokio::sync::mpsc;

use crate::error::ChannelClosedError;

/// One item of a body stream, as seen by the consumer.
#[derive(Debug)]
pub enum ChannelEvent {
    /// A body fragment.
    Data(Bytes),
    /// The body is complete.
    Close,
    /// The writer gave up; fragments received so far are not a valid body.
    Failed(anyhow::Error),
}

/// Write side of a body stream.
#[derive(Debug)]
pub struct ContentChannel {
    tx: Option<mpsc::UnboundedSender<ChannelEvent>>,
}

/// Read side of a body stream.
#[derive(Debug)]
pub struct BodyReceiver {
    rx: mpsc::UnboundedReceiver<ChannelEvent>,
}

impl ContentChannel {
    /// Creates a connected channel/receiver pair.
    pub fn pair() -> (ContentChannel, BodyReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ContentChannel { tx: Some(tx) }, BodyReceiver { rx })
    }

    /// True once the terminal event was sent or the consumer went away.
    pub fn is_closed(&self) -> bool {
        self.tx.as_ref().is_none_or(|tx| tx.is_closed())
    }

    /// Appends a body fragment.
    pub fn write(&mut self, data: impl Into<Bytes>) -> Result<(), ChannelClosedError> {
        let tx = self.tx.as_ref().ok_or(ChannelClosedError)?;

        if tx.send(ChannelEvent::Data(data.into())).is_err() {
            tracing::debug!("body consumer gone, closing content channel");
            self.tx = None;
            return Err(ChannelClosedError);
        }

        Ok(())
    }

    /// Appends a borrowed string fragment.
    pub fn write_str(&mut self, data: &str) -> Result<(), ChannelClosedError> {
        self.write(Bytes::copy_from_slice(data.as_bytes()))
    }

    /// Signals a complete body. A second terminal call fails.
    pub fn close(&mut self) -> Result<(), ChannelClosedError> {
        self.finish(ChannelEvent::Close)
    }

    /// Closes the channel with a failure. The consumer must not treat the
    /// fragments written so far as a complete body.
    pub fn fail(&mut self, error: impl Into<anyhow::Error>) -> Result<(), ChannelClosedError> {
        self.finish(ChannelEvent::Failed(error.into()))
    }

    fn finish(&mut self, event: ChannelEvent) -> Result<(), ChannelClosedError> {
        let tx = self.tx.take().ok_or(ChannelClosedError)?;
        tx.send(event).map_err(|_| ChannelClosedError)
    }
}

impl Drop for ContentChannel {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take().filter(|tx| !tx.is_closed()) {
            tracing::warn!("content channel dropped while open, delivering failure");
            let _ = tx.send(ChannelEvent::Failed(anyhow!(
                "content channel dropped before close"
            )));
        }
    }
}

impl BodyReceiver {
    /// Waits for the next event. After the terminal event every further call
    /// reports a failure.
    pub async fn next_event(&mut self) -> ChannelEvent {
        self.rx
            .recv()
            .await
            .unwrap_or_else(|| ChannelEvent::Failed(anyhow!("content channel has no more events")))
    }

    /// Concatenates every fragment up to a successful close.
    pub async fn collect(mut self) -> anyhow::Result<Bytes> {
        let mut body = BytesMut::new();

        loop {
            match self.next_event().await {
                ChannelEvent::Data(chunk) => body.extend_from_slice(&chunk),
                ChannelEvent::Close => return Ok(body.freeze()),
                ChannelEvent::Failed(e) => return Err(e),
            }
        }
    }
}
