use bevy_ecs::component::Component;

use crate::model::ResourceType;

/// Liquid money held by an entity. Not clamped: verbs may one day cost more
/// than the protagonist holds.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Asset {
    pub cash: i64,
    pub laundered: bool,
}

/// A stocked resource that bleeds `decay_rate` per week boundary.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ResourceStock {
    pub kind: ResourceType,
    pub amount: f64,
    pub decay_rate: f64,
}

impl ResourceStock {
    pub fn new(kind: ResourceType, amount: f64, decay_rate: f64) -> Self {
        Self {
            kind,
            amount,
            decay_rate,
        }
    }

    /// Apply one week of decay, flooring at zero.
    pub fn decay(&mut self) {
        self.amount = (self.amount - self.decay_rate).max(0.0);
    }
}
