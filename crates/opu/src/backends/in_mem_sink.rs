use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::backends::Sink;
use crate::common::BulkResponse;

/// 📦 A sink that never forgets. Unlike my dad, who forgot my soccer game in 1998.
///
/// Hoards every payload it is sent and answers with a scripted status code:
/// the queued statuses first, then 200 forever. Clone-able because tests need
/// to peek inside after handing `self` off to the uploader. The `Arc` means
/// every clone shares the same Vec. It can also be told to lose the connection
/// on a given send, which is how the uploader's abort path gets exercised.
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemorySink {
    /// 🔒 The evidence locker. One entry per `send`, in call order.
    pub(crate) received: Arc<Mutex<Vec<String>>>,
    scripted_statuses: Arc<Mutex<VecDeque<u16>>>,
    /// 🔌 1-based send number that errors out instead of answering.
    unreachable_on_send: Option<usize>,
}

impl InMemorySink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 🎬 Queue up the statuses the next `send`s will answer with.
    pub(crate) fn with_statuses(statuses: impl IntoIterator<Item = u16>) -> Self {
        Self {
            received: Arc::default(),
            scripted_statuses: Arc::new(Mutex::new(statuses.into_iter().collect())),
            unreachable_on_send: None,
        }
    }

    /// 🔌 Answer normally until send number `send_number`, which fails like a dead socket.
    pub(crate) fn unreachable_on(send_number: usize) -> Self {
        Self {
            unreachable_on_send: Some(send_number),
            ..Self::default()
        }
    }

    pub(crate) async fn payloads(&self) -> Vec<String> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl Sink for InMemorySink {
    async fn send(&mut self, payload: String) -> Result<BulkResponse> {
        let send_number = {
            let mut received = self.received.lock().await;
            received.push(payload);
            received.len()
        };
        if self.unreachable_on_send == Some(send_number) {
            bail!("💀 in-memory sink pretended the connection was reset on send {send_number}");
        }
        let status = self.scripted_statuses.lock().await.pop_front().unwrap_or(200);
        Ok(BulkResponse {
            status,
            body: format!(r#"{{"in_memory":true,"status":{status}}}"#),
        })
    }

    /// 🗑️ Nothing to close. We live in RAM.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
