use flume::{Receiver, Sender};

use crate::{Error, Result};

/// Communication link between an observer-attached tensor readout point and its `Probe`. Carries
/// raw bytes rather than a generic `StorageType::IOType`: `exec-backend::Tensor` is object-safe
/// and exposes data only as `Vec<u8>`, so a probe can sit behind any backend without knowing its
/// concrete tensor type.
pub struct Channel {
    sender: Sender<Vec<u8>>,
    receiver: Receiver<Vec<u8>>,
}

impl Channel {
    pub fn new() -> Self {
        let (sender, receiver) = flume::bounded(1);
        Self { sender, receiver }
    }

    pub fn is_full(&self) -> bool {
        self.sender.is_full()
    }

    pub fn receiver(&self) -> Receiver<Vec<u8>> {
        self.receiver.clone()
    }

    pub async fn send(&self, data: Vec<u8>) -> Result<()> {
        self.sender.send_async(data).await.map_err(|e| Error::SendFailed(e.to_string()))
    }

    /// Blocking send, for the observer callback this channel is meant to be driven from —
    /// `Executor::execute` is synchronous, so an `Observer::on_op_sequence_complete` implementation
    /// cannot await `send`.
    pub fn send_sync(&self, data: Vec<u8>) -> Result<()> {
        self.sender.send(data).map_err(|e| Error::SendFailed(e.to_string()))
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Channel {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone(), receiver: self.receiver.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sent_bytes_are_received() {
        let channel = Channel::new();
        channel.send(vec![1, 2, 3]).await.unwrap();
        let received = channel.receiver().recv_async().await.unwrap();
        assert_eq!(received, vec![1, 2, 3]);
    }

    #[test]
    fn send_sync_does_not_require_an_async_context() {
        let channel = Channel::new();
        channel.send_sync(vec![4, 5]).unwrap();
        assert_eq!(channel.receiver().recv().unwrap(), vec![4, 5]);
    }
}
