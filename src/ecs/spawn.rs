use bevy_ecs::bundle::Bundle;
use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::clock::Time;
use crate::ecs::components::*;
use crate::ecs::resources::SimEntityMap;
use crate::model::CardType;

pub const CLOCK_KEY: &str = "clock";
pub const CLOCK_NAME: &str = "Detroit Clock";

/// Spawn `bundle` with a freshly allocated `SimEntity` and register its key.
/// Worlds without a `SimEntityMap` get id 0 and no registration.
fn spawn_registered(world: &mut World, key: &str, bundle: impl Bundle) -> Entity {
    let id = world
        .get_resource_mut::<SimEntityMap>()
        .map(|mut map| map.allocate_id())
        .unwrap_or(0);
    let entity = world
        .spawn((
            SimEntity {
                id,
                key: key.to_string(),
            },
            bundle,
        ))
        .id();
    if let Some(mut map) = world.get_resource_mut::<SimEntityMap>() {
        map.insert(key, entity);
    }
    entity
}

pub fn spawn_clock(world: &mut World, year: u32, ticks_per_shift: u32) -> Entity {
    spawn_registered(
        world,
        CLOCK_KEY,
        (
            Identity::new(CLOCK_NAME, "Shift, day and week.", CardType::Asset),
            Time::new(year, ticks_per_shift),
        ),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn spawn_protagonist(
    world: &mut World,
    key: &str,
    identity: Identity,
    asset: Asset,
    heat: Heat,
    psychology: Psychology,
    network: Network,
    reputation: Reputation,
    visual: Visual,
) -> Entity {
    spawn_registered(
        world,
        key,
        (
            identity,
            Protagonist,
            asset,
            heat,
            psychology,
            network,
            reputation,
            visual,
            CardState::Idle,
        ),
    )
}

pub fn spawn_person(
    world: &mut World,
    key: &str,
    identity: Identity,
    psychology: Psychology,
    visual: Visual,
) -> Entity {
    spawn_registered(
        world,
        key,
        (
            identity,
            psychology,
            Network::default(),
            Reputation::default(),
            visual,
            CardState::Idle,
        ),
    )
}

pub fn spawn_location(
    world: &mut World,
    key: &str,
    identity: Identity,
    location: Location,
    turf: Turf,
    visual: Visual,
) -> Entity {
    spawn_registered(world, key, (identity, location, turf, visual, CardState::Idle))
}

pub fn spawn_situation(
    world: &mut World,
    key: &str,
    identity: Identity,
    state: CardState,
    visual: Visual,
) -> Entity {
    spawn_registered(world, key, (identity, visual, state))
}

pub fn spawn_resource(
    world: &mut World,
    key: &str,
    identity: Identity,
    stock: ResourceStock,
    visual: Visual,
) -> Entity {
    spawn_registered(world, key, (identity, stock, visual, CardState::Idle))
}
