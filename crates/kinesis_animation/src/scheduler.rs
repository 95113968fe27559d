//! Animation scheduler
//!
//! Owns a set of tracked quantities and steps each toward its own target
//! every frame. The scheduler is an ordinary value; create as many as needed.

use slotmap::{new_key_type, SlotMap};

use crate::dynamics::SecondOrderDynamics;
use crate::vector::{Motion, Vec2};

new_key_type! {
    pub struct DynamicsId;
}

#[derive(Clone, Debug)]
struct Tracked<V: Motion> {
    dynamics: SecondOrderDynamics<V>,
    target: V,
}

/// Steps a set of [`SecondOrderDynamics`] together
pub struct AnimationScheduler<V: Motion = Vec2> {
    tracked: SlotMap<DynamicsId, Tracked<V>>,
}

impl<V: Motion> AnimationScheduler<V> {
    pub fn new() -> Self {
        Self {
            tracked: SlotMap::with_key(),
        }
    }

    /// Track `dynamics`, moving toward `target`
    pub fn add(&mut self, dynamics: SecondOrderDynamics<V>, target: V) -> DynamicsId {
        self.tracked.insert(Tracked { dynamics, target })
    }

    /// Returns false when `id` is not tracked
    pub fn set_target(&mut self, id: DynamicsId, target: V) -> bool {
        match self.tracked.get_mut(id) {
            Some(tracked) => {
                tracked.target = target;
                true
            }
            None => false,
        }
    }

    pub fn target(&self, id: DynamicsId) -> Option<V> {
        self.tracked.get(id).map(|t| t.target)
    }

    pub fn get(&self, id: DynamicsId) -> Option<&SecondOrderDynamics<V>> {
        self.tracked.get(id).map(|t| &t.dynamics)
    }

    pub fn get_mut(&mut self, id: DynamicsId) -> Option<&mut SecondOrderDynamics<V>> {
        self.tracked.get_mut(id).map(|t| &mut t.dynamics)
    }

    pub fn remove(&mut self, id: DynamicsId) -> Option<SecondOrderDynamics<V>> {
        self.tracked.remove(id).map(|t| t.dynamics)
    }

    /// Current output of `id`
    pub fn value(&self, id: DynamicsId) -> Option<V> {
        self.get(id).map(SecondOrderDynamics::value)
    }

    /// Tick all tracked quantities
    pub fn tick(&mut self, frame_rate: f64) {
        for (_, tracked) in self.tracked.iter_mut() {
            tracked.dynamics.update(frame_rate, tracked.target, None);
        }
    }

    /// Check if any tracked quantity is still moving
    pub fn has_active_animations(&self, epsilon: f64) -> bool {
        self.tracked
            .iter()
            .any(|(_, t)| !t.dynamics.is_settled(t.target, epsilon))
    }

    /// Iterate over all tracked quantities
    pub fn iter(&self) -> impl Iterator<Item = (DynamicsId, &SecondOrderDynamics<V>)> {
        self.tracked.iter().map(|(id, t)| (id, &t.dynamics))
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}

impl<V: Motion> Default for AnimationScheduler<V> {
    fn default() -> Self {
        Self::new()
    }
}
