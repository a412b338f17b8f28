//! Change-notification channel.
//!
//! A payloadless, process-wide signal telling subscribers "the usage data
//! changed, re-fetch and re-render". Emission is synchronous and reaches
//! every listener subscribed at that moment once; listeners subscribed
//! after an emission do not receive it. Dropping a [`ChangeListener`]
//! unsubscribes it.

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

/// Broadcast side of the change signal.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<()>,
}

impl ChangeNotifier {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Register a new listener. It will observe emissions from this point
    /// on, not earlier ones.
    #[must_use]
    pub fn subscribe(&self) -> ChangeListener {
        ChangeListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Notify all current listeners. A send with no listeners is not an
    /// error.
    pub fn emit(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of the change signal, one per subscriber.
#[derive(Debug)]
pub struct ChangeListener {
    rx: broadcast::Receiver<()>,
}

impl ChangeListener {
    /// Wait for the next change notification.
    ///
    /// Returns `false` once the notifier has been dropped and no
    /// notifications remain. A listener that fell behind a burst of
    /// emissions still observes "changed" - the signal carries no
    /// payload, so coalescing loses nothing.
    pub async fn changed(&mut self) -> bool {
        match self.rx.recv().await {
            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => true,
            Err(broadcast::error::RecvError::Closed) => false,
        }
    }

    /// Non-blocking poll: whether a change was emitted since the last
    /// check.
    pub fn try_changed(&mut self) -> bool {
        match self.rx.try_recv() {
            Ok(()) | Err(broadcast::error::TryRecvError::Lagged(_)) => true,
            Err(
                broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
            ) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emission_reaches_all_current_listeners() {
        let notifier = ChangeNotifier::new();
        let mut first = notifier.subscribe();
        let mut second = notifier.subscribe();

        notifier.emit();

        assert!(first.try_changed());
        assert!(second.try_changed());
    }

    #[tokio::test]
    async fn late_subscribers_miss_earlier_emissions() {
        let notifier = ChangeNotifier::new();
        let mut early = notifier.subscribe();

        notifier.emit();

        let mut late = notifier.subscribe();
        assert!(early.try_changed());
        assert!(!late.try_changed());
    }

    #[tokio::test]
    async fn each_emission_is_delivered_once() {
        let notifier = ChangeNotifier::new();
        let mut listener = notifier.subscribe();

        notifier.emit();
        assert!(listener.try_changed());
        assert!(!listener.try_changed());
    }

    #[tokio::test]
    async fn changed_returns_false_after_notifier_drops() {
        let notifier = ChangeNotifier::new();
        let mut listener = notifier.subscribe();
        drop(notifier);

        assert!(!listener.changed().await);
    }

    #[tokio::test]
    async fn changed_resolves_on_emit() {
        let notifier = ChangeNotifier::new();
        let mut listener = notifier.subscribe();

        let waiter = tokio::spawn(async move { listener.changed().await });
        notifier.emit();

        assert!(waiter.await.expect("listener task"));
    }
}
