use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::Result;
use crate::media::{MediaStream, ResourceHandle};

use super::probe::ProbeBus;
use super::types::{ReadyState, SourceEvent};

/// A playable media source holding at most one bound stream.
///
/// Mirrors an HTML media element: transport requests go in, state changes come
/// back out as `SourceEvent`s on subscriptions. Everything runs on the UI thread.
pub trait MediaSource {
    /// Bind `stream` as the current source. Does not decode until `load`.
    fn bind(&mut self, handle: ResourceHandle, stream: MediaStream);
    /// Drop the current binding, stopping playback.
    fn unbind(&mut self);
    /// Handle of the currently bound stream.
    fn bound(&self) -> Option<ResourceHandle>;
    /// Start decoding the bound stream; readiness is reported through events.
    fn load(&mut self);
    /// Ask the source to start. May be refused.
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);
    fn set_volume(&mut self, volume: f32);
    fn ready_state(&self) -> ReadyState;
    /// Audio graph the source's output flows through, for analysers.
    fn graph(&self) -> ProbeBus;
    /// Register for notifications. Dropping the subscription unregisters it.
    fn subscribe(&mut self) -> Subscription;
    /// Give the source a chance to emit time-driven notifications.
    fn poll(&mut self) {}
}

type Subscribers = RefCell<Vec<(u64, Sender<SourceEvent>)>>;

/// Fan-out of source notifications to every live subscription.
#[derive(Default)]
pub struct EventHub {
    subscribers: Rc<Subscribers>,
    next_id: u64,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.next_id += 1;
        self.subscribers.borrow_mut().push((self.next_id, tx));
        log::trace!("subscription {} registered ({} live)", self.next_id, self.subscriber_count());
        Subscription {
            id: self.next_id,
            hub: Rc::downgrade(&self.subscribers),
            rx,
        }
    }

    pub fn emit(&self, event: SourceEvent) {
        log::trace!("source event {event:?}");
        self.subscribers
            .borrow_mut()
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

/// Receiving end of a source's notification stream.
///
/// Dropping it disposes of the registration, so every exit path (rebind,
/// teardown) cleans up without an explicit call.
pub struct Subscription {
    id: u64,
    hub: Weak<Subscribers>,
    rx: Receiver<SourceEvent>,
}

impl Subscription {
    /// Take every notification received so far, in emission order.
    pub fn drain(&self) -> Vec<SourceEvent> {
        self.rx.try_iter().collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.hub.upgrade() {
            subscribers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
