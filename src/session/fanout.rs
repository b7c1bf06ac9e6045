//! One-to-two queue broadcast.
//!
//! A value pushed once is independently dequeueable, in order, from both
//! destination queues. One consumer's dequeue never affects the other's
//! queue. Used to deliver user input both to the generation worker and to
//! the user-text outbound stream.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Sending half of a two-way fanout channel.
#[derive(Debug)]
pub struct FanoutSender<T> {
    first: UnboundedSender<T>,
    second: UnboundedSender<T>,
}

// Derived Clone would require T: Clone on the struct itself
impl<T> Clone for FanoutSender<T> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

impl<T: Clone> FanoutSender<T> {
    /// Pushes `value` onto both queues.
    ///
    /// A closed receiver is tolerated: the other queue still gets the
    /// value. Returns true if at least one queue accepted it.
    pub fn send(&self, value: T) -> bool {
        let first_ok = self.first.send(value.clone()).is_ok();
        let second_ok = self.second.send(value).is_ok();
        first_ok || second_ok
    }
}

/// Creates a fanout channel: one sender, two independent receivers.
pub fn fanout_channel<T>() -> (FanoutSender<T>, UnboundedReceiver<T>, UnboundedReceiver<T>) {
    let (first_tx, first_rx) = mpsc::unbounded_channel();
    let (second_tx, second_rx) = mpsc::unbounded_channel();
    (
        FanoutSender {
            first: first_tx,
            second: second_tx,
        },
        first_rx,
        second_rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_receivers_get_the_value() {
        let (tx, mut rx1, mut rx2) = fanout_channel::<String>();
        assert!(tx.send("hi".to_string()));

        assert_eq!(rx1.try_recv().unwrap(), "hi");
        assert_eq!(rx2.try_recv().unwrap(), "hi");
    }

    #[test]
    fn test_order_preserved_on_both_sides() {
        let (tx, mut rx1, mut rx2) = fanout_channel::<i32>();
        for i in 0..5 {
            tx.send(i);
        }
        for i in 0..5 {
            assert_eq!(rx1.try_recv().unwrap(), i);
            assert_eq!(rx2.try_recv().unwrap(), i);
        }
    }

    #[test]
    fn test_dequeues_are_independent() {
        let (tx, mut rx1, mut rx2) = fanout_channel::<i32>();
        tx.send(1);
        tx.send(2);

        // Drain the first queue entirely; the second must be unaffected.
        assert_eq!(rx1.try_recv().unwrap(), 1);
        assert_eq!(rx1.try_recv().unwrap(), 2);
        assert!(rx1.try_recv().is_err());

        assert_eq!(rx2.try_recv().unwrap(), 1);
        assert_eq!(rx2.try_recv().unwrap(), 2);
    }

    #[test]
    fn test_one_closed_receiver_is_tolerated() {
        let (tx, rx1, mut rx2) = fanout_channel::<i32>();
        drop(rx1);
        assert!(tx.send(7));
        assert_eq!(rx2.try_recv().unwrap(), 7);
    }

    #[test]
    fn test_both_closed_reports_failure() {
        let (tx, rx1, rx2) = fanout_channel::<i32>();
        drop(rx1);
        drop(rx2);
        assert!(!tx.send(7));
    }

    #[test]
    fn test_cloned_sender_feeds_same_queues() {
        let (tx, mut rx1, mut rx2) = fanout_channel::<i32>();
        let tx2 = tx.clone();
        tx.send(1);
        tx2.send(2);
        assert_eq!(rx1.try_recv().unwrap(), 1);
        assert_eq!(rx1.try_recv().unwrap(), 2);
        assert_eq!(rx2.try_recv().unwrap(), 1);
        assert_eq!(rx2.try_recv().unwrap(), 2);
    }
}
