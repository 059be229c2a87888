#![allow(dead_code)]

use dockside_sim::ecs::components::{Asset, Heat, Protagonist};
use dockside_sim::{CardType, SimConfig, SimContext, StartingState, VerbAction, VerbCard, VerbKind};

/// Dockside context with a short shift so boundary tests stay fast.
pub fn build_test_context(ticks_per_shift: u32) -> SimContext {
    let config = SimConfig {
        ticks_per_shift,
        ..SimConfig::default()
    };
    SimContext::new(config, &StartingState::dockside()).unwrap()
}

pub fn action(id: &str, slot: VerbKind, cards: Vec<VerbCard>) -> VerbAction {
    VerbAction {
        id: id.to_string(),
        slot_id: slot,
        cards,
        completed_at_ms: 0,
    }
}

pub fn docks() -> VerbCard {
    VerbCard::new("the-docks", "The Docks", CardType::Location)
}

pub fn shipment() -> VerbCard {
    VerbCard::new(
        "shipment-window",
        "Shipment Looking the Other Way",
        CardType::Situation,
    )
}

pub fn van() -> VerbCard {
    VerbCard::new("unmarked-van", "Unmarked Van, Lot C", CardType::Situation)
}

pub fn intel() -> VerbCard {
    VerbCard::new("intel", "Intel", CardType::Resource)
}

pub fn protagonist_cash(ctx: &mut SimContext) -> i64 {
    let world = ctx.world_mut();
    world
        .query_filtered::<&Asset, bevy_ecs::query::With<Protagonist>>()
        .single(world)
        .unwrap()
        .cash
}

pub fn protagonist_heat(ctx: &mut SimContext) -> Heat {
    let world = ctx.world_mut();
    world
        .query_filtered::<&Heat, bevy_ecs::query::With<Protagonist>>()
        .single(world)
        .unwrap()
        .clone()
}
