// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Broadcasts events to any number of subscribers over unbounded channels.
///
/// Every subscriber receives every event published after it subscribed, in
/// publication order. Subscribers whose receiver was dropped are pruned on
/// the next publish.
#[derive(Debug)]
pub struct EventBus<T: Clone + Send + 'static> {
    subscribers: Vec<flume::Sender<T>>,
}

impl<T: Clone + Send + 'static> EventBus<T> {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&mut self) -> flume::Receiver<T> {
        let (sender, receiver) = flume::unbounded();
        self.subscribers.push(sender);
        log::debug!(
            "EventBus: subscriber added ({} total).",
            self.subscribers.len()
        );
        receiver
    }

    /// Sends `event` to every live subscriber.
    pub fn publish(&mut self, event: T) {
        log::trace!("Publishing an event to {} subscriber(s).", self.subscribers.len());
        let before = self.subscribers.len();
        self.subscribers
            .retain(|sender| sender.send(event.clone()).is_ok());
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            log::debug!("EventBus: pruned {dropped} disconnected subscriber(s).");
        }
    }

    /// Number of live subscribers, as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Clone + Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::TryRecvError;

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Tick(u32),
        Stop,
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let mut bus = EventBus::<TestEvent>::new();
        bus.publish(TestEvent::Stop);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn every_subscriber_sees_every_event_in_order() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(TestEvent::Tick(1));
        bus.publish(TestEvent::Tick(2));

        for rx in [&a, &b] {
            assert_eq!(rx.try_recv(), Ok(TestEvent::Tick(1)));
            assert_eq!(rx.try_recv(), Ok(TestEvent::Tick(2)));
            assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        }
    }

    #[test]
    fn late_subscriber_misses_earlier_events() {
        let mut bus = EventBus::new();
        bus.publish(TestEvent::Tick(1));
        let rx = bus.subscribe();
        bus.publish(TestEvent::Stop);
        assert_eq!(rx.try_recv(), Ok(TestEvent::Stop));
        assert!(rx.is_empty());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let keep = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(TestEvent::Tick(7));
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.try_recv(), Ok(TestEvent::Tick(7)));
    }

    #[test]
    fn receiver_works_across_threads() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        let handle = std::thread::spawn(move || rx.recv());
        bus.publish(TestEvent::Tick(3));
        assert_eq!(handle.join().ok().and_then(|r| r.ok()), Some(TestEvent::Tick(3)));
    }
}
