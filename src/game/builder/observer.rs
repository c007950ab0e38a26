//! Placement Observers
//!
//! UI and other systems follow mode switches, selections, placements and
//! removals by registering an observer with the controller that owns them.
//! Registration returns a [`Subscription`] used to unsubscribe.

use std::fmt;

use crate::game::builder::instance::Pose;
use crate::game::builder::mode::BuildMode;
use crate::game::catalog::DefinitionId;
use crate::handle::InstanceId;

/// Notification broadcast to registered observers.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEvent {
    ModeChanged(BuildMode),
    DefinitionSelected(DefinitionId),
    Committed {
        instance: InstanceId,
        definition: DefinitionId,
        pose: Pose,
    },
    Deleted(InstanceId),
}

pub trait PlacementObserver {
    fn on_event(&mut self, event: &PlacementEvent);
}

impl<F> PlacementObserver for F
where
    F: FnMut(&PlacementEvent),
{
    fn on_event(&mut self, event: &PlacementEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Observers in registration order.
#[derive(Default)]
pub struct ObserverRegistry {
    next: u64,
    observers: Vec<(Subscription, Box<dyn PlacementObserver>)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn PlacementObserver>) -> Subscription {
        self.next += 1;
        let subscription = Subscription(self.next);
        self.observers.push((subscription, observer));
        subscription
    }

    /// Returns `false` if the subscription was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(s, _)| *s != subscription);
        self.observers.len() != before
    }

    pub fn notify(&mut self, event: &PlacementEvent) {
        for (_, observer) in &mut self.observers {
            observer.on_event(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
