use bevy_ecs::component::Component;

use crate::model::CardType;

/// Present on every seeded entity.
///
/// `id` is the simulation id (the clock is 0); `key` is the card slug the
/// UI refers to (`the-docks`, `shipment-window`, ...).
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct SimEntity {
    pub id: u64,
    pub key: String,
}

/// Display text and card type. Sanitized every tick by the identity system.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Identity {
    pub name: String,
    pub description: String,
    pub card_type: CardType,
}

impl Identity {
    pub fn new(name: impl Into<String>, description: impl Into<String>, card_type: CardType) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            card_type,
        }
    }
}

/// Marks the single protagonist entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Protagonist;
