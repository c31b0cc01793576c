use flume::Receiver;

use crate::{Error, Result};

/// Caches the most recently retrieved readout of a single tensor, so a test (or host) can await
/// retrieval once after a run completes rather than racing the executor's own dispatch.
pub struct Probe {
    receiver: Receiver<Vec<u8>>,
}

impl Probe {
    pub fn new(receiver: Receiver<Vec<u8>>) -> Self {
        Self { receiver }
    }

    pub async fn retrieve(&self) -> Result<Vec<u8>> {
        self.receiver.recv_async().await.map_err(Error::ChannelClosed)
    }
}
