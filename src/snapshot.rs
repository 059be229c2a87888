//! Read-only projection of the world for the presentation layer.
//!
//! `read_snapshot` takes `&World` and never mutates it. Before seeding (or
//! whenever a singleton is missing) it returns `None`; callers treat that as
//! "retry later".

use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::world::World;
use serde::Serialize;

use crate::ecs::clock::Time;
use crate::ecs::components::{
    Asset, CardState, DossierValue, Heat, HeatTier, Identity, Location, Protagonist, Reputation,
    ResourceStock, SimEntity, Visual,
};
use crate::ecs::resources::{StreetWire, WireEntry};
use crate::model::{CardCluster, CardType, ResourceType};

pub const MAX_TRUST_DOTS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub tick: u64,
    pub time: TimeView,
    pub protagonist: ProtagonistView,
    pub resources: BTreeMap<ResourceType, f64>,
    pub board_cards: Vec<BoardCard>,
    pub wire: Vec<WireEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeView {
    pub total_ticks: u64,
    pub shift: u32,
    pub day: u32,
    pub week: u32,
    pub year: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtagonistView {
    pub cash: i64,
    pub local_heat: f64,
    pub federal_heat: f64,
    pub heat_tier: HeatTier,
    pub fear: f64,
    pub respect: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCard {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub card_type: CardType,
    pub flavor: String,
    pub trust_dots: u8,
    pub state_label: String,
    pub decaying: bool,
    pub cluster: CardCluster,
    pub dossier: BTreeMap<String, DossierValue>,
}

impl From<&Time> for TimeView {
    fn from(time: &Time) -> Self {
        Self {
            total_ticks: time.total_ticks,
            shift: time.shift,
            day: time.day,
            week: time.week,
            year: time.year,
        }
    }
}

/// Project the world, or `None` while the clock or protagonist is missing.
pub fn read_snapshot(world: &World) -> Option<Snapshot> {
    let mut clocks = world.try_query::<&Time>()?;
    let time = TimeView::from(clocks.single(world).ok()?);

    let mut protagonists =
        world.try_query_filtered::<(&Asset, &Heat, &Reputation), With<Protagonist>>()?;
    let (asset, heat, reputation) = protagonists.single(world).ok()?;
    let protagonist = ProtagonistView {
        cash: asset.cash,
        local_heat: heat.local,
        federal_heat: heat.federal,
        heat_tier: heat.tier(),
        fear: reputation.fear,
        respect: reputation.respect,
    };

    let mut resources: BTreeMap<ResourceType, f64> =
        ResourceType::ALL.iter().map(|kind| (*kind, 0.0)).collect();
    if let Some(mut stocks) = world.try_query::<&ResourceStock>() {
        for stock in stocks.iter(world) {
            *resources.entry(stock.kind).or_insert(0.0) += stock.amount;
        }
    }
    // Protagonist cash is the source of truth for the cash line.
    resources.insert(ResourceType::Cash, protagonist.cash as f64);

    let wire = world
        .get_resource::<StreetWire>()
        .map(|wire| wire.entries().cloned().collect())
        .unwrap_or_default();

    Some(Snapshot {
        tick: time.total_ticks,
        time,
        protagonist,
        resources,
        board_cards: board_cards(world, protagonist.cash),
        wire,
    })
}

/// Revealed, unburned cards sorted by cluster rank and then title.
pub fn board_cards(world: &World, protagonist_cash: i64) -> Vec<BoardCard> {
    let Some(mut cards) = world.try_query::<(Entity, &SimEntity, &Identity, &Visual)>() else {
        return Vec::new();
    };

    let mut board: Vec<BoardCard> = cards
        .iter(world)
        .filter(|(_, _, _, visual)| visual.revealed)
        .filter_map(|(entity, sim, identity, visual)| {
            let cluster = identity.card_type.cluster()?;
            let state = world.get::<CardState>(entity);
            if state.is_some_and(CardState::is_burned) {
                return None;
            }
            let stock = world.get::<ResourceStock>(entity);
            let label = state_label(
                identity.card_type,
                state,
                world.get::<Location>(entity),
                stock,
                visual,
                protagonist_cash,
            );
            let decaying = state.is_some_and(CardState::is_decaying)
                || stock.is_some_and(|s| s.decay_rate > 0.0);

            Some(BoardCard {
                id: sim.key.clone(),
                title: visual
                    .face
                    .title
                    .clone()
                    .unwrap_or_else(|| identity.name.clone()),
                subtitle: visual.face.subtitle.clone(),
                card_type: identity.card_type,
                flavor: visual.face.flavor.clone(),
                trust_dots: visual.face.trust_dots.min(MAX_TRUST_DOTS),
                state_label: label,
                decaying,
                cluster,
                dossier: visual.dossier.to_fields(),
            })
        })
        .collect();

    board.sort_by(|a, b| a.cluster.cmp(&b.cluster).then_with(|| a.title.cmp(&b.title)));
    board
}

fn state_label(
    card_type: CardType,
    state: Option<&CardState>,
    location: Option<&Location>,
    stock: Option<&ResourceStock>,
    visual: &Visual,
    protagonist_cash: i64,
) -> String {
    if let Some(label) = state.and_then(CardState::label) {
        return label;
    }
    match card_type {
        CardType::Resource => match stock {
            Some(stock) if stock.kind == ResourceType::Cash => format!("Stack x{protagonist_cash}"),
            Some(stock) => visual
                .face
                .standing
                .clone()
                .unwrap_or_else(|| format!("x{}", stock.amount)),
            None => visual.face.standing.clone().unwrap_or_default(),
        },
        CardType::Location => match location {
            Some(location) if !location.unlocked => "Locked".to_string(),
            Some(_) => "Unlocked".to_string(),
            None => visual.face.standing.clone().unwrap_or_default(),
        },
        _ => visual.face.standing.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::ecs::components::CardFace;
    use crate::seed::{StartingState, seed_world};

    fn seeded() -> World {
        let mut world = World::new();
        seed_world(&mut world, &StartingState::dockside(), &SimConfig::default()).unwrap();
        world
    }

    #[test]
    fn empty_world_is_not_ready() {
        assert!(read_snapshot(&World::new()).is_none());
    }

    #[test]
    fn clock_without_protagonist_is_not_ready() {
        let mut world = World::new();
        world.spawn(Time::new(1986, 60));
        assert!(read_snapshot(&world).is_none());
    }

    #[test]
    fn seeded_world_projects_starting_values() {
        let world = seeded();
        let snapshot = read_snapshot(&world).unwrap();
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.time.year, 1986);
        assert_eq!(snapshot.protagonist.cash, 2);
        assert_eq!(snapshot.protagonist.heat_tier, HeatTier::Clear);
        assert_eq!(snapshot.resources[&ResourceType::Cash], 2.0);
        assert_eq!(snapshot.resources[&ResourceType::Favors], 1.0);
        assert_eq!(snapshot.resources[&ResourceType::GingaPoints], 0.0);
        assert_eq!(snapshot.wire.len(), 3);
    }

    #[test]
    fn board_is_sorted_by_cluster_then_title() {
        let world = seeded();
        let ids: Vec<String> = read_snapshot(&world)
            .unwrap()
            .board_cards
            .into_iter()
            .map(|card| card.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "jeffries",
                "ray-kowalski",
                "sal-marchetti",
                "abandoned-warehouse",
                "the-docks",
                "shipment-window",
                "unmarked-van",
                "cash",
                "favors",
                "intel",
            ]
        );
    }

    #[test]
    fn board_labels_come_from_state() {
        let world = seeded();
        let snapshot = read_snapshot(&world).unwrap();
        let card = |id: &str| {
            snapshot
                .board_cards
                .iter()
                .find(|card| card.id == id)
                .unwrap()
                .clone()
        };

        assert_eq!(card("jeffries").title, "Bartholomeu H. Jeffries");
        assert_eq!(card("jeffries").state_label, "Known Quantity");
        assert_eq!(card("jeffries").trust_dots, 3);
        assert_eq!(card("the-docks").state_label, "Unlocked");
        assert_eq!(card("shipment-window").state_label, "Burns in 2 Shifts");
        assert!(card("shipment-window").decaying);
        assert_eq!(card("unmarked-van").state_label, "Burns in 1 Shift");
        assert_eq!(card("cash").state_label, "Stack x2");
        assert!(!card("cash").decaying);
        assert!(card("intel").decaying);
        assert_eq!(
            card("jeffries").dossier["city"],
            DossierValue::Text("Detroit, MI".to_string())
        );
    }

    #[test]
    fn burned_and_hidden_cards_leave_the_board() {
        let mut world = seeded();
        let van = world
            .resource::<crate::ecs::resources::SimEntityMap>()
            .get_bevy("unmarked-van")
            .unwrap();
        *world.get_mut::<CardState>(van).unwrap() = CardState::Burned;

        let snapshot = read_snapshot(&world).unwrap();
        assert!(snapshot.board_cards.iter().all(|card| card.id != "unmarked-van"));
        assert!(snapshot.board_cards.iter().all(|card| card.id != "southwest-detroit"));
        assert!(snapshot.board_cards.iter().all(|card| card.card_type != CardType::Asset));
    }

    #[test]
    fn trust_dots_are_clamped() {
        let mut world = seeded();
        world.spawn((
            SimEntity {
                id: 99,
                key: "loud".to_string(),
            },
            Identity::new("Loud Friend", "", CardType::Person),
            Visual {
                revealed: true,
                face: CardFace {
                    trust_dots: 9,
                    ..CardFace::default()
                },
                ..Visual::default()
            },
        ));
        let snapshot = read_snapshot(&world).unwrap();
        let loud = snapshot.board_cards.iter().find(|c| c.id == "loud").unwrap();
        assert_eq!(loud.trust_dots, MAX_TRUST_DOTS);
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let world = seeded();
        let json = serde_json::to_value(read_snapshot(&world).unwrap()).unwrap();
        assert_eq!(json["time"]["totalTicks"], 0);
        assert_eq!(json["protagonist"]["localHeat"], 0.0);
        assert_eq!(json["resources"]["cleanCash"], 0.0);
        assert_eq!(json["boardCards"][0]["cardType"], "person");
        assert_eq!(json["boardCards"][0]["cluster"], "people");
    }
}
