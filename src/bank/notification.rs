//! Best-effort notifications sent to account holders after a transfer.
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{info, warn};

use crate::bank::Account;

/// Receives messages about balance-affecting events.
/// Implementations must not fail the caller: delivery problems are theirs to handle.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, account: &Account, message: &str);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn notify(&self, account: &Account, message: &str) {
        (**self).notify(account, message);
    }
}

/// Writes every notification to the log.
#[derive(Default, Clone, Copy)]
pub struct LoggingNotifier;

impl NotificationSink for LoggingNotifier {
    fn notify(&self, account: &Account, message: &str) {
        info!(account = account.id(), "{message}");
    }
}

/// A notification queued for asynchronous delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub account: Account,
    pub message: String,
}

/// Hands notifications to a [`NotificationWorker`] without waiting for delivery.
#[derive(Clone)]
pub struct ChannelNotifier {
    sender: mpsc::Sender<Notification>,
}

impl ChannelNotifier {
    /// Creates a notifier and the worker that drains it.
    pub fn channel<S: NotificationSink>(capacity: usize, sink: S) -> (Self, NotificationWorker<S>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (ChannelNotifier { sender }, NotificationWorker { receiver, sink })
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify(&self, account: &Account, message: &str) {
        let notification = Notification {
            account: account.clone(),
            message: message.to_owned(),
        };
        match self.sender.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                warn!(account = %dropped.account.id(), "notification queue full, dropping message");
            }
            Err(TrySendError::Closed(dropped)) => {
                warn!(account = %dropped.account.id(), "notification worker gone, dropping message");
            }
        }
    }
}

/// Drains queued notifications into the wrapped sink.
pub struct NotificationWorker<S> {
    receiver: mpsc::Receiver<Notification>,
    sink: S,
}

impl<S: NotificationSink> NotificationWorker<S> {
    /// Runs until every [`ChannelNotifier`] is dropped. Returns how many notifications were delivered.
    pub async fn run(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(notification) = self.receiver.recv().await {
            self.sink.notify(&notification.account, &notification.message);
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex, PoisonError};

    use super::{ChannelNotifier, NotificationSink};
    use crate::bank::Account;

    /// Records every notification it receives.
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingNotifier {
        pub(crate) fn sent(&self) -> Vec<(String, String)> {
            self.sent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl NotificationSink for RecordingNotifier {
        fn notify(&self, account: &Account, message: &str) {
            self.sent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((account.id().to_owned(), message.to_owned()));
        }
    }

    #[tokio::test]
    async fn test_worker_delivers_queued_notifications() {
        let recorder = Arc::new(RecordingNotifier::default());
        let (notifier, mut worker) = ChannelNotifier::channel(10, recorder.clone());
        notifier.notify(&Account::new("Id-1"), "hello");
        notifier.notify(&Account::new("Id-2"), "world");
        drop(notifier);
        assert_eq!(worker.run().await, 2);
        assert_eq!(
            recorder.sent(),
            vec![
                ("Id-1".to_owned(), "hello".to_owned()),
                ("Id-2".to_owned(), "world".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_failing() {
        let recorder = Arc::new(RecordingNotifier::default());
        let (notifier, mut worker) = ChannelNotifier::channel(1, recorder.clone());
        notifier.notify(&Account::new("Id-1"), "first");
        notifier.notify(&Account::new("Id-1"), "second");
        drop(notifier);
        assert_eq!(worker.run().await, 1);
        assert_eq!(recorder.sent()[0].1, "first");
    }

    #[test]
    fn test_closed_queue_does_not_panic() {
        let (notifier, worker) = ChannelNotifier::channel(1, RecordingNotifier::default());
        drop(worker);
        notifier.notify(&Account::new("Id-1"), "lost");
    }
}
