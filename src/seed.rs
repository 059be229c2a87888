//! Starting state for a new world and the seeding pass that spawns it.
//!
//! `StartingState::dockside()` is the canonical 1986 start. Hosts may load an
//! alternative roster from JSON; `seed_world` validates whatever it is given
//! and fails at construction time rather than leaving a half-seeded world for
//! the tick loop to trip over.

use std::collections::BTreeSet;

use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::world::World;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::ecs::clock::Time;
use crate::ecs::components::{
    Asset, CardFace, CardState, Dossier, Heat, Identity, Location, Network, Protagonist,
    Psychology, Reputation, ResourceStock, Turf, Visual,
};
use crate::ecs::resources::{SimEntityMap, StreetWire, WireEntry};
use crate::ecs::spawn::{self, CLOCK_KEY};
use crate::error::{SimError, SimResult};
use crate::model::{CardType, ResolutionTone, ResourceType, capitalize};

pub const PROTAGONIST_NAME: &str = "Bartholomeu Helio Jeffries";
pub const PROTAGONIST_KEY: &str = "jeffries";
pub const START_YEAR: u32 = 1986;

// ---------------------------------------------------------------------------
// Seed description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartingState {
    pub year: u32,
    pub protagonist: ProtagonistSeed,
    #[serde(default)]
    pub resources: Vec<ResourceSeed>,
    #[serde(default)]
    pub locations: Vec<LocationSeed>,
    #[serde(default)]
    pub people: Vec<PersonSeed>,
    #[serde(default)]
    pub situations: Vec<SituationSeed>,
    #[serde(default)]
    pub wire: Vec<WireSeed>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub capoeira: u8,
    pub strength: u8,
    pub cunning: u8,
    pub charm: u8,
    pub loyalty: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtagonistSeed {
    pub key: String,
    pub name: String,
    pub description: String,
    pub city: String,
    pub neighborhood: String,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub fear: f64,
    #[serde(default)]
    pub respect: f64,
    pub cash: i64,
    #[serde(default)]
    pub local_heat: f64,
    #[serde(default)]
    pub federal_heat: f64,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub face: CardFace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSeed {
    pub key: String,
    pub kind: ResourceType,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub decay_rate: f64,
    #[serde(default)]
    pub revealed: bool,
    #[serde(default)]
    pub face: CardFace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSeed {
    pub key: String,
    /// Display name; derived from the district id when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub district_id: String,
    pub unlocked: bool,
    /// Share of the district the protagonist controls, `0.0..=1.0`.
    #[serde(default)]
    pub control_level: f64,
    #[serde(default)]
    pub revealed: bool,
    #[serde(default)]
    pub face: CardFace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSeed {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fear: f64,
    #[serde(default)]
    pub ambition: f64,
    #[serde(default)]
    pub loyalty: f64,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub face: CardFace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SituationSeed {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Shifts until the card burns. `None` never burns.
    #[serde(default)]
    pub burns_in: Option<u32>,
    #[serde(default)]
    pub face: CardFace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSeed {
    pub id: String,
    pub tone: ResolutionTone,
    pub line: String,
}

fn face(title: Option<&str>, subtitle: &str, flavor: &str, trust_dots: u8, standing: Option<&str>) -> CardFace {
    CardFace {
        title: title.map(str::to_string),
        subtitle: subtitle.to_string(),
        flavor: flavor.to_string(),
        trust_dots,
        standing: standing.map(str::to_string),
    }
}

fn resource(
    kind: ResourceType,
    name: &str,
    description: &str,
    amount: f64,
    decay_rate: f64,
    board: Option<(&str, &str)>,
) -> ResourceSeed {
    let key = match kind {
        ResourceType::CleanCash => "clean-cash".to_string(),
        ResourceType::GingaPoints => "ginga-points".to_string(),
        _ => name.to_lowercase(),
    };
    let (revealed, face) = match board {
        Some((flavor, standing)) => (true, face(None, "Resource Card", flavor, 0, Some(standing))),
        None => (false, CardFace::default()),
    };
    ResourceSeed {
        key,
        kind,
        name: name.to_string(),
        description: description.to_string(),
        amount,
        decay_rate,
        revealed,
        face,
    }
}

fn location(key: &str, district_id: &str, unlocked: bool, flavor: Option<&str>) -> LocationSeed {
    LocationSeed {
        key: key.to_string(),
        name: None,
        district_id: district_id.to_string(),
        unlocked,
        control_level: 0.0,
        revealed: flavor.is_some(),
        face: face(None, "Location Card", flavor.unwrap_or_default(), 0, None),
    }
}

impl StartingState {
    /// Bartholomeu Jeffries, Southwest Detroit, 1986.
    pub fn dockside() -> Self {
        let protagonist = ProtagonistSeed {
            key: PROTAGONIST_KEY.to_string(),
            name: PROTAGONIST_NAME.to_string(),
            description: "Southwest Detroit dock hand with no underworld contacts.".to_string(),
            city: "Detroit, MI".to_string(),
            neighborhood: "Southwest Detroit".to_string(),
            stats: Stats {
                capoeira: 3,
                strength: 4,
                cunning: 3,
                charm: 2,
                loyalty: 5,
            },
            fear: 0.0,
            respect: 0.0,
            cash: 2,
            local_heat: 0.0,
            federal_heat: 0.0,
            traits: ["LIMINAL", "CAPOEIRISTA", "BILINGUAL", "DOCK_WORKER", "MOTHERS_SON"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            face: face(
                Some("Bartholomeu H. Jeffries"),
                "Dock Hand / Quiet Ambition",
                "He keeps his voice low and his eyes open. That's how men live long at Bay 7.",
                3,
                Some("Known Quantity"),
            ),
        };

        let resources = vec![
            resource(
                ResourceType::Cash,
                "Cash",
                "Folded bills.",
                0.0,
                0.0,
                Some(("Folded bills still warm from honest work and crooked pockets.", "Stack")),
            ),
            resource(
                ResourceType::Muscle,
                "Muscle",
                "Men on the hook. They do not wait forever.",
                0.0,
                1.0,
                None,
            ),
            resource(
                ResourceType::Intel,
                "Intel",
                "Rumors age faster than produce.",
                0.0,
                1.0,
                Some(("Names, routes, and one lie wrapped in two truths.", "Stale by Week End")),
            ),
            resource(
                ResourceType::Favors,
                "Favors",
                "A debt cools when left on the table.",
                1.0,
                1.0,
                Some(("A nod tonight can cost you blood next month.", "Cooling")),
            ),
            resource(
                ResourceType::Evidence,
                "Evidence",
                "Paper that can ruin a quiet life.",
                0.0,
                0.0,
                None,
            ),
            resource(
                ResourceType::CleanCash,
                "Clean Cash",
                "Money that can stand sunlight.",
                0.0,
                0.0,
                None,
            ),
            resource(
                ResourceType::GingaPoints,
                "Ginga Points",
                "Balance held between threat and grace.",
                0.0,
                0.5,
                None,
            ),
        ];

        let locations = vec![
            location(
                "the-docks",
                "the_docks",
                true,
                Some("Steel, salt, diesel, and silence when the right foreman walks by."),
            ),
            location("southwest-detroit", "southwest_detroit", true, None),
            location(
                "abandoned-warehouse",
                "abandoned_warehouse",
                true,
                Some("Broken windows, open floor, enough room for practice and mistakes."),
            ),
        ];

        let people = vec![
            PersonSeed {
                key: "ray-kowalski".to_string(),
                name: "Ray Kowalski".to_string(),
                description: "Dock foreman, Local 299. Owes money.".to_string(),
                fear: 0.0,
                ambition: 1.0,
                loyalty: 2.0,
                neighborhood: Some("Southwest Detroit".to_string()),
                face: face(
                    None,
                    "Dock Foreman / Local 299",
                    "Ray owes money and time. Both clocks are louder every night.",
                    2,
                    Some("Contacted"),
                ),
            },
            PersonSeed {
                key: "sal-marchetti".to_string(),
                name: "Sal Marchetti".to_string(),
                description: "Bookmaker working River Row.".to_string(),
                fear: 0.0,
                ambition: 3.0,
                loyalty: 1.0,
                neighborhood: Some("River Row".to_string()),
                face: face(
                    None,
                    "Bookmaker / River Row",
                    "He smiles with his hands in his pockets. Nobody asks what those hands hold.",
                    1,
                    Some("Watching"),
                ),
            },
        ];

        let situations = vec![
            SituationSeed {
                key: "shipment-window".to_string(),
                name: "Shipment Looking the Other Way".to_string(),
                description: "A container nobody wants to inspect.".to_string(),
                burns_in: Some(2),
                face: face(
                    None,
                    "Situation Card",
                    "A container shows up Thursday. The manifest is clean. The locks are not.",
                    0,
                    None,
                ),
            },
            SituationSeed {
                key: "unmarked-van".to_string(),
                name: "Unmarked Van, Lot C".to_string(),
                description: "Somebody moving weight after midnight.".to_string(),
                burns_in: Some(1),
                face: face(
                    None,
                    "Situation Card",
                    "Someone is moving weight after midnight. You can watch, lift, or sell the story.",
                    0,
                    None,
                ),
            },
        ];

        let wire = vec![
            WireSeed {
                id: "seed-1".to_string(),
                tone: ResolutionTone::Info,
                line: "Detroit wakes slow. The docks do not.".to_string(),
            },
            WireSeed {
                id: "seed-2".to_string(),
                tone: ResolutionTone::Warning,
                line: "Word is somebody's skimming manifests after second horn.".to_string(),
            },
            WireSeed {
                id: "seed-3".to_string(),
                tone: ResolutionTone::Success,
                line: "Jeffries keeps his head down and his options open.".to_string(),
            },
        ];

        Self {
            year: START_YEAR,
            protagonist,
            resources,
            locations,
            people,
            situations,
            wire,
        }
    }

    pub fn from_json(raw: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reject seeds that could not produce a well-formed world.
    pub fn validate(&self) -> SimResult<()> {
        if self.protagonist.name.trim().is_empty() {
            return Err(SimError::InvalidSeed {
                reason: "protagonist needs a name".to_string(),
            });
        }

        let mut keys = BTreeSet::new();
        keys.insert(CLOCK_KEY);
        let all_keys = std::iter::once(self.protagonist.key.as_str())
            .chain(self.resources.iter().map(|r| r.key.as_str()))
            .chain(self.locations.iter().map(|l| l.key.as_str()))
            .chain(self.people.iter().map(|p| p.key.as_str()))
            .chain(self.situations.iter().map(|s| s.key.as_str()));
        for key in all_keys {
            if !keys.insert(key) {
                return Err(SimError::DuplicateCardKey {
                    key: key.to_string(),
                });
            }
        }

        for resource in &self.resources {
            if !resource.amount.is_finite() || resource.amount < 0.0 {
                return Err(SimError::InvalidSeed {
                    reason: format!(
                        "resource '{}' has amount {}, expected a finite value >= 0",
                        resource.key, resource.amount
                    ),
                });
            }
            if !resource.decay_rate.is_finite() || resource.decay_rate < 0.0 {
                return Err(SimError::InvalidSeed {
                    reason: format!(
                        "resource '{}' has decay rate {}, expected a finite value >= 0",
                        resource.key, resource.decay_rate
                    ),
                });
            }
        }

        if let Some(location) = self
            .locations
            .iter()
            .find(|l| !(0.0..=1.0).contains(&l.control_level))
        {
            return Err(SimError::InvalidSeed {
                reason: format!(
                    "location '{}' has control level {}, expected 0..=1",
                    location.key, location.control_level
                ),
            });
        }

        if let Some(situation) = self.situations.iter().find(|s| s.burns_in == Some(0)) {
            return Err(SimError::InvalidSeed {
                reason: format!("situation '{}' would start burned", situation.key),
            });
        }
        Ok(())
    }
}

impl Default for StartingState {
    fn default() -> Self {
        Self::dockside()
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Title-case a snake_case district id: `the_docks` becomes `The Docks`.
pub fn title_case(raw: &str) -> String {
    raw.split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spawn every entity in `state` into `world`, then validate the singletons.
pub fn seed_world(world: &mut World, state: &StartingState, config: &SimConfig) -> SimResult<()> {
    config.validate()?;
    state.validate()?;

    let existing_clocks = world.query::<&Time>().iter(world).count();
    if existing_clocks > 0 {
        return Err(SimError::DuplicateClock {
            count: existing_clocks + 1,
        });
    }
    if world.get_resource::<SimEntityMap>().is_none() {
        world.insert_resource(SimEntityMap::new());
    }
    if let Some(key) = first_taken_key(world, state) {
        return Err(SimError::DuplicateCardKey { key });
    }

    spawn::spawn_clock(world, state.year, config.ticks_per_shift);
    spawn_protagonist(world, &state.protagonist);

    for seed in &state.resources {
        spawn::spawn_resource(
            world,
            &seed.key,
            Identity::new(&seed.name, &seed.description, CardType::Resource),
            ResourceStock::new(seed.kind, seed.amount, seed.decay_rate),
            Visual {
                card_face_key: seed.key.clone(),
                revealed: seed.revealed,
                face: seed.face.clone(),
                dossier: Dossier::Blank,
            },
        );
    }

    for seed in &state.locations {
        let name = seed
            .name
            .clone()
            .unwrap_or_else(|| title_case(&seed.district_id));
        let description = format!("{name} location card.");
        spawn::spawn_location(
            world,
            &seed.key,
            Identity::new(name, description, CardType::Location),
            Location::new(&seed.district_id, seed.unlocked),
            Turf::new(&seed.district_id, seed.control_level),
            Visual {
                card_face_key: seed.key.clone(),
                revealed: seed.revealed,
                face: seed.face.clone(),
                dossier: Dossier::Location {
                    neighborhood: Some(state.protagonist.neighborhood.clone()),
                },
            },
        );
    }

    for seed in &state.people {
        spawn::spawn_person(
            world,
            &seed.key,
            Identity::new(&seed.name, &seed.description, CardType::Person),
            Psychology {
                fear: seed.fear,
                ambition: seed.ambition,
                loyalty: seed.loyalty,
                addiction: None,
            },
            Visual {
                card_face_key: seed.key.clone(),
                revealed: true,
                face: seed.face.clone(),
                dossier: Dossier::Person {
                    city: None,
                    neighborhood: seed.neighborhood.clone(),
                    capoeira: None,
                    traits: Vec::new(),
                },
            },
        );
    }

    for seed in &state.situations {
        let card_state = match seed.burns_in {
            Some(decay_timer) => CardState::Decaying { decay_timer },
            None => CardState::Idle,
        };
        spawn::spawn_situation(
            world,
            &seed.key,
            Identity::new(&seed.name, &seed.description, CardType::Situation),
            card_state,
            Visual {
                card_face_key: seed.key.clone(),
                revealed: true,
                face: seed.face.clone(),
                dossier: Dossier::Blank,
            },
        );
    }

    if world.get_resource::<StreetWire>().is_none() {
        world.insert_resource(StreetWire::new(config.street_wire_capacity));
    }
    let mut wire = world.resource_mut::<StreetWire>();
    // Oldest first so the first seed line ends up on top.
    for seed in state.wire.iter().rev() {
        wire.post(WireEntry {
            id: seed.id.clone(),
            tone: seed.tone,
            line: seed.line.clone(),
            tick: 0,
        });
    }

    validate_world(world, &state.protagonist.name)?;

    tracing::info!(
        entities = world.resource::<SimEntityMap>().len(),
        protagonist = %state.protagonist.name,
        year = state.year,
        "world seeded"
    );
    Ok(())
}

fn spawn_protagonist(world: &mut World, seed: &ProtagonistSeed) -> Entity {
    spawn::spawn_protagonist(
        world,
        &seed.key,
        Identity::new(&seed.name, &seed.description, CardType::Person),
        Asset {
            cash: seed.cash,
            laundered: false,
        },
        Heat::new(seed.local_heat, seed.federal_heat),
        Psychology {
            fear: 0.0,
            ambition: f64::from(seed.stats.cunning),
            loyalty: f64::from(seed.stats.loyalty),
            addiction: None,
        },
        Network {
            connections: Vec::new(),
            loyalty_score: f64::from(seed.stats.loyalty),
        },
        Reputation {
            fear: seed.fear,
            respect: seed.respect,
        },
        Visual {
            card_face_key: "bartholomeu".to_string(),
            revealed: true,
            face: seed.face.clone(),
            dossier: Dossier::Person {
                city: Some(seed.city.clone()),
                neighborhood: Some(seed.neighborhood.clone()),
                capoeira: Some(seed.stats.capoeira),
                traits: seed.traits.clone(),
            },
        },
    )
}

fn first_taken_key(world: &World, state: &StartingState) -> Option<String> {
    let map = world.get_resource::<SimEntityMap>()?;
    std::iter::once(CLOCK_KEY)
        .chain(std::iter::once(state.protagonist.key.as_str()))
        .chain(state.resources.iter().map(|r| r.key.as_str()))
        .chain(state.locations.iter().map(|l| l.key.as_str()))
        .chain(state.people.iter().map(|p| p.key.as_str()))
        .chain(state.situations.iter().map(|s| s.key.as_str()))
        .find(|key| map.get_bevy(key).is_some())
        .map(str::to_string)
}

/// Check the world holds exactly one clock and exactly one complete
/// protagonist named `protagonist_name`.
pub fn validate_world(world: &mut World, protagonist_name: &str) -> SimResult<()> {
    let clocks = world.query::<&Time>().iter(world).count();
    match clocks {
        0 => return Err(SimError::MissingClock),
        1 => {}
        count => return Err(SimError::DuplicateClock { count }),
    }

    let protagonists: Vec<Entity> = world
        .query_filtered::<Entity, With<Protagonist>>()
        .iter(world)
        .collect();
    let entity = match protagonists.as_slice() {
        [] => {
            return Err(SimError::MissingProtagonist {
                name: protagonist_name.to_string(),
            });
        }
        [entity] => *entity,
        many => {
            return Err(SimError::DuplicateProtagonist { count: many.len() });
        }
    };

    let Some(identity) = world.get::<Identity>(entity) else {
        return Err(SimError::IncompleteProtagonist {
            component: "Identity",
        });
    };
    if identity.name != protagonist_name {
        return Err(SimError::MissingProtagonist {
            name: protagonist_name.to_string(),
        });
    }
    if world.get::<Asset>(entity).is_none() {
        return Err(SimError::IncompleteProtagonist { component: "Asset" });
    }
    if world.get::<Heat>(entity).is_none() {
        return Err(SimError::IncompleteProtagonist { component: "Heat" });
    }
    if world.get::<Reputation>(entity).is_none() {
        return Err(SimError::IncompleteProtagonist {
            component: "Reputation",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::SimEntity;

    fn seeded() -> World {
        let mut world = World::new();
        seed_world(&mut world, &StartingState::dockside(), &SimConfig::default()).unwrap();
        world
    }

    #[test]
    fn dockside_seed_is_valid() {
        assert!(StartingState::dockside().validate().is_ok());
    }

    #[test]
    fn seeding_spawns_clock_first_and_protagonist_second() {
        let mut world = seeded();
        let map = world.resource::<SimEntityMap>();
        let clock = map.get_bevy(CLOCK_KEY).unwrap();
        let jeffries = map.get_bevy(PROTAGONIST_KEY).unwrap();
        assert_eq!(world.get::<SimEntity>(clock).unwrap().id, 0);
        assert_eq!(world.get::<SimEntity>(jeffries).unwrap().id, 1);

        let time = world.query::<&Time>().single(&world).unwrap();
        assert_eq!(time.year, 1986);
        assert_eq!(time.ticks_per_shift, 60);
    }

    #[test]
    fn protagonist_starts_with_seed_values() {
        let mut world = seeded();
        let (identity, asset, heat, psychology) = world
            .query_filtered::<(&Identity, &Asset, &Heat, &Psychology), With<Protagonist>>()
            .single(&world)
            .unwrap();
        assert_eq!(identity.name, PROTAGONIST_NAME);
        assert_eq!(asset.cash, 2);
        assert_eq!(heat, &Heat::new(0.0, 0.0));
        assert_eq!(psychology.ambition, 3.0);
        assert_eq!(psychology.loyalty, 5.0);
    }

    #[test]
    fn seeded_locations_are_unlocked_districts() {
        let mut world = seeded();
        let mut keys: Vec<String> = world
            .query::<&Location>()
            .iter(&world)
            .filter(|l| l.unlocked)
            .map(Location::district_key)
            .collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["abandoned_warehouse", "southwest_detroit", "the_docks"]
        );
    }

    #[test]
    fn seeded_locations_carry_turf() {
        let mut world = seeded();
        let turf: Vec<(String, f64)> = world
            .query::<(&Location, &Turf)>()
            .iter(&world)
            .map(|(location, turf)| {
                assert_eq!(location.district_id, turf.district_id);
                (turf.district_id.clone(), turf.control_level)
            })
            .collect();
        assert_eq!(turf.len(), 3);
        assert!(turf.iter().all(|(_, control)| *control == 0.0));
    }

    #[test]
    fn out_of_range_control_level_is_rejected() {
        let mut state = StartingState::dockside();
        state.locations[0].control_level = 1.5;
        assert!(matches!(state.validate(), Err(SimError::InvalidSeed { .. })));

        state.locations[0].control_level = f64::NAN;
        assert!(matches!(state.validate(), Err(SimError::InvalidSeed { .. })));
    }

    #[test]
    fn location_names_are_title_cased() {
        assert_eq!(title_case("the_docks"), "The Docks");
        assert_eq!(title_case("southwest_detroit"), "Southwest Detroit");
        assert_eq!(title_case("abandoned-warehouse"), "Abandoned Warehouse");
    }

    #[test]
    fn wire_opens_with_first_seed_line() {
        let world = seeded();
        let wire = world.resource::<StreetWire>();
        assert_eq!(wire.len(), 3);
        assert_eq!(wire.entries().next().unwrap().id, "seed-1");
    }

    #[test]
    fn seeding_twice_fails_loudly() {
        let mut world = seeded();
        let err = seed_world(&mut world, &StartingState::dockside(), &SimConfig::default())
            .unwrap_err();
        assert!(matches!(err, SimError::DuplicateClock { count: 2 }));
    }

    #[test]
    fn duplicate_keys_are_rejected_before_spawning() {
        let mut state = StartingState::dockside();
        state.people[1].key = "ray-kowalski".to_string();
        let mut world = World::new();
        let err = seed_world(&mut world, &state, &SimConfig::default()).unwrap_err();
        assert!(matches!(err, SimError::DuplicateCardKey { ref key } if key == "ray-kowalski"));
        assert_eq!(world.query::<Entity>().iter(&world).count(), 0);
    }

    #[test]
    fn nameless_protagonist_is_rejected() {
        let mut state = StartingState::dockside();
        state.protagonist.name = "  ".to_string();
        assert!(matches!(state.validate(), Err(SimError::InvalidSeed { .. })));
    }

    fn resource_mut<'a>(state: &'a mut StartingState, key: &str) -> &'a mut ResourceSeed {
        state.resources.iter_mut().find(|r| r.key == key).unwrap()
    }

    #[test]
    fn negative_resource_amount_is_rejected() {
        let mut state = StartingState::dockside();
        resource_mut(&mut state, "intel").amount = -4.0;
        let mut world = World::new();
        let err = seed_world(&mut world, &state, &SimConfig::default()).unwrap_err();
        assert!(matches!(err, SimError::InvalidSeed { ref reason } if reason.contains("intel")));
        assert_eq!(world.query::<Entity>().iter(&world).count(), 0);
    }

    #[test]
    fn negative_decay_rate_is_rejected() {
        let mut state = StartingState::dockside();
        resource_mut(&mut state, "favors").decay_rate = -2.0;
        assert!(matches!(state.validate(), Err(SimError::InvalidSeed { ref reason }) if reason.contains("favors")));
    }

    #[test]
    fn non_finite_resource_values_are_rejected() {
        let mut state = StartingState::dockside();
        resource_mut(&mut state, "muscle").amount = f64::NAN;
        assert!(matches!(state.validate(), Err(SimError::InvalidSeed { .. })));

        let mut state = StartingState::dockside();
        resource_mut(&mut state, "muscle").decay_rate = f64::INFINITY;
        assert!(matches!(state.validate(), Err(SimError::InvalidSeed { .. })));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut world = World::new();
        let config = SimConfig {
            ticks_per_shift: 0,
            ..SimConfig::default()
        };
        let err = seed_world(&mut world, &StartingState::dockside(), &config).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig { .. }));
    }

    #[test]
    fn validate_world_reports_missing_singletons() {
        let mut world = World::new();
        assert!(matches!(
            validate_world(&mut world, PROTAGONIST_NAME),
            Err(SimError::MissingClock)
        ));

        world.spawn(Time::new(1986, 60));
        assert!(matches!(
            validate_world(&mut world, PROTAGONIST_NAME),
            Err(SimError::MissingProtagonist { .. })
        ));

        world.spawn((
            Protagonist,
            Identity::new(PROTAGONIST_NAME, "", CardType::Person),
            Asset::default(),
            Reputation::default(),
        ));
        assert!(matches!(
            validate_world(&mut world, PROTAGONIST_NAME),
            Err(SimError::IncompleteProtagonist { component: "Heat" })
        ));
    }

    #[test]
    fn starting_state_round_trips_through_json() {
        let state = StartingState::dockside();
        let raw = serde_json::to_string(&state).unwrap();
        assert_eq!(StartingState::from_json(&raw).unwrap(), state);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            StartingState::from_json("{ \"year\": 1986 "),
            Err(SimError::Json(_))
        ));
    }
}
