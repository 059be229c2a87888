//! Verb resolution stage.
//!
//! Pulls every pending `VerbAction` once per tick through the injected
//! `VerbChannel`, validates each action's card requirements, applies the
//! resulting cash/heat deltas to the protagonist, and emits exactly one
//! `VerbResolution` per action in input order. Precondition failures are not
//! errors: they resolve with `ResolutionTone::Warning` and zero deltas.

use std::collections::BTreeSet;

use bevy_app::{App, Plugin};
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::ecs::clock::Time;
use crate::ecs::components::{Asset, Heat, Location, Protagonist, normalize_district_id};
use crate::ecs::resources::{
    PendingVerbs, StreetWire, VerbChannel, VerbResolutions, WallClock, WireEntry,
};
use crate::ecs::schedule::{SimStage, SimTick};
use crate::model::{CardType, ResolutionTone, VerbAction, VerbCard, VerbKind, VerbResolution};

// ---------------------------------------------------------------------------
// Payouts
// ---------------------------------------------------------------------------

const WORK_CASH: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemePayout {
    pub cash: i64,
    pub local_heat: f64,
    pub federal_heat: f64,
    pub tone: ResolutionTone,
    /// Appended to the situation card's title.
    pub line: &'static str,
}

/// Situations that pay out above the ordinary scheme rate, keyed by card id.
pub const DISTINGUISHED_SITUATIONS: &[(&str, SchemePayout)] = &[(
    "shipment-window",
    SchemePayout {
        cash: 2,
        local_heat: 6.0,
        federal_heat: 2.0,
        tone: ResolutionTone::Success,
        line: "moved clean on paper. Jeffries clears +2 cash, but the harbor cops smell smoke.",
    },
)];

pub const ORDINARY_SCHEME: SchemePayout = SchemePayout {
    cash: 1,
    local_heat: 2.0,
    federal_heat: 0.0,
    tone: ResolutionTone::Info,
    line: "pays a short edge: +1 cash, +2 local heat.",
};

pub fn scheme_payout(situation_card_id: &str) -> SchemePayout {
    DISTINGUISHED_SITUATIONS
        .iter()
        .find(|(id, _)| *id == situation_card_id)
        .map(|(_, payout)| *payout)
        .unwrap_or(ORDINARY_SCHEME)
}

// ---------------------------------------------------------------------------
// System registration
// ---------------------------------------------------------------------------

pub struct VerbPlugin;

impl Plugin for VerbPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VerbChannel>();
        app.init_resource::<PendingVerbs>();
        app.init_resource::<VerbResolutions>();
        app.init_resource::<WallClock>();
        app.init_resource::<StreetWire>();
        app.add_systems(SimTick, resolve_verb_actions.in_set(SimStage::Verbs));
    }
}

// ---------------------------------------------------------------------------
// Main dispatch
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
fn resolve_verb_actions(
    mut channel: ResMut<VerbChannel>,
    mut pending: ResMut<PendingVerbs>,
    mut results: ResMut<VerbResolutions>,
    mut wire: ResMut<StreetWire>,
    wall_clock: Res<WallClock>,
    clock: Query<&Time>,
    mut protagonist: Query<(&mut Asset, &mut Heat), With<Protagonist>>,
    locations: Query<&Location>,
) {
    // Not ready: leave the queue untouched so nothing is pulled and lost.
    let Ok((mut asset, mut heat)) = protagonist.single_mut() else {
        return;
    };

    let actions = channel.pull(&mut pending);
    if actions.is_empty() {
        return;
    }

    let unlocked: BTreeSet<String> = locations
        .iter()
        .filter(|location| location.unlocked)
        .map(Location::district_key)
        .collect();
    let tick = clock.single().map(|time| time.total_ticks).unwrap_or(0);

    for action in &actions {
        let resolution = resolve_action(action, &unlocked, wall_clock.now_ms());
        apply_resolution(&resolution, &mut asset, &mut heat);

        if resolution.tone == ResolutionTone::Warning {
            tracing::warn!(action = %resolution.action_id, verb = %resolution.slot_id, "{}", resolution.line);
        } else {
            tracing::debug!(
                action = %resolution.action_id,
                verb = %resolution.slot_id,
                cash = resolution.cash_delta,
                local_heat = resolution.local_heat_delta,
                federal_heat = resolution.federal_heat_delta,
                "verb resolved"
            );
        }

        wire.post(WireEntry {
            id: resolution.id.clone(),
            tone: resolution.tone,
            line: resolution.line.clone(),
            tick,
        });
        channel.notify(&resolution);
        results.push(resolution);
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Deltas plus narration for one resolved action.
struct Outcome {
    tone: ResolutionTone,
    line: String,
    cash: i64,
    local_heat: f64,
    federal_heat: f64,
}

impl Outcome {
    fn rejected(line: String) -> Self {
        Self {
            tone: ResolutionTone::Warning,
            line,
            cash: 0,
            local_heat: 0.0,
            federal_heat: 0.0,
        }
    }
}

/// Resolve a single action against the set of unlocked district keys.
/// Pure: the caller applies the deltas.
pub fn resolve_action(
    action: &VerbAction,
    unlocked_districts: &BTreeSet<String>,
    now_ms: u64,
) -> VerbResolution {
    let lead = lead_card(action);
    let title = lead
        .map(|card| card.card_title.clone())
        .unwrap_or_else(|| format!("An empty {} slot", action.slot_id));

    let outcome = match action.slot_id {
        VerbKind::Work => resolve_work(action, &title, unlocked_districts),
        VerbKind::Scheme => resolve_scheme(action, &title),
        VerbKind::Train | VerbKind::Recruit | VerbKind::Bribe | VerbKind::Violence => Outcome {
            tone: ResolutionTone::Info,
            line: format!(
                "{} is loaded but unresolved. No action taken yet.",
                action.slot_id.title()
            ),
            cash: 0,
            local_heat: 0.0,
            federal_heat: 0.0,
        },
    };

    VerbResolution {
        id: format!("verb-resolution-{}", action.id),
        action_id: action.id.clone(),
        slot_id: action.slot_id,
        card_id: lead.map(|card| card.card_id.clone()).unwrap_or_default(),
        card_title: title,
        tone: outcome.tone,
        line: outcome.line,
        cash_delta: outcome.cash,
        local_heat_delta: outcome.local_heat,
        federal_heat_delta: outcome.federal_heat,
        resolved_at_ms: now_ms,
    }
}

/// The card a resolution is reported against.
fn lead_card(action: &VerbAction) -> Option<&VerbCard> {
    let preferred = match action.slot_id {
        VerbKind::Work => action.first_of_type(CardType::Location),
        VerbKind::Scheme => action.first_of_type(CardType::Situation),
        _ => None,
    };
    preferred.or_else(|| action.cards.first())
}

fn resolve_work(action: &VerbAction, title: &str, unlocked: &BTreeSet<String>) -> Outcome {
    let Some(location) = action.first_of_type(CardType::Location) else {
        return Outcome::rejected(format!(
            "{title} cannot pull a shift. Work needs a location card."
        ));
    };

    if !unlocked.contains(&normalize_district_id(&location.card_id)) {
        return Outcome::rejected(format!("{title} is still off-limits. No shift, no cash."));
    }

    Outcome {
        tone: ResolutionTone::Success,
        line: format!("{title} paid one quiet shift. Jeffries pockets +{WORK_CASH} cash."),
        cash: WORK_CASH,
        local_heat: 0.0,
        federal_heat: 0.0,
    }
}

fn resolve_scheme(action: &VerbAction, title: &str) -> Outcome {
    let Some(situation) = action.first_of_type(CardType::Situation) else {
        return Outcome::rejected(format!(
            "{title} is the wrong kind of leverage. Scheme needs a situation card."
        ));
    };
    if !action.has_type(CardType::Resource) {
        return Outcome::rejected(format!(
            "{title} has nothing behind it. Scheme needs a resource card."
        ));
    }

    let payout = scheme_payout(&situation.card_id);
    Outcome {
        tone: payout.tone,
        line: format!("{title} {}", payout.line),
        cash: payout.cash,
        local_heat: payout.local_heat,
        federal_heat: payout.federal_heat,
    }
}

/// Apply a resolution's deltas. Heat is re-clamped by `Heat::apply`.
pub fn apply_resolution(resolution: &VerbResolution, asset: &mut Asset, heat: &mut Heat) {
    asset.cash += resolution.cash_delta;
    heat.apply(resolution.local_heat_delta, resolution.federal_heat_delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::app::build_sim_app;
    use crate::ecs::components::{Identity, SimEntity};
    use crate::ecs::schedule::SimTick;
    use crate::config::SimConfig;

    fn unlocked(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn action(id: &str, slot: VerbKind, cards: Vec<VerbCard>) -> VerbAction {
        VerbAction {
            id: id.to_string(),
            slot_id: slot,
            cards,
            completed_at_ms: 1000,
        }
    }

    fn docks() -> VerbCard {
        VerbCard::new("the-docks", "The Docks", CardType::Location)
    }

    fn shipment() -> VerbCard {
        VerbCard::new("shipment-window", "Shipment Looking the Other Way", CardType::Situation)
    }

    fn intel() -> VerbCard {
        VerbCard::new("intel", "Intel", CardType::Resource)
    }

    #[test]
    fn work_on_unlocked_location_pays() {
        let r = resolve_action(
            &action("w1", VerbKind::Work, vec![docks()]),
            &unlocked(&["the_docks"]),
            5,
        );
        assert_eq!(r.tone, ResolutionTone::Success);
        assert_eq!(r.cash_delta, 1);
        assert_eq!(r.card_id, "the-docks");
        assert_eq!(r.id, "verb-resolution-w1");
        assert_eq!(r.resolved_at_ms, 5);
    }

    #[test]
    fn work_on_locked_location_warns() {
        let r = resolve_action(&action("w2", VerbKind::Work, vec![docks()]), &unlocked(&[]), 0);
        assert_eq!(r.tone, ResolutionTone::Warning);
        assert!(r.is_inert());
    }

    #[test]
    fn work_without_location_warns() {
        let r = resolve_action(
            &action("w3", VerbKind::Work, vec![intel()]),
            &unlocked(&["the_docks"]),
            0,
        );
        assert_eq!(r.tone, ResolutionTone::Warning);
        assert!(r.is_inert());
        assert!(r.line.contains("needs a location card"));
    }

    #[test]
    fn work_uses_first_location_card() {
        let warehouse = VerbCard::new("abandoned-warehouse", "Abandoned Warehouse", CardType::Location);
        let r = resolve_action(
            &action("w4", VerbKind::Work, vec![intel(), warehouse, docks()]),
            &unlocked(&["abandoned_warehouse"]),
            0,
        );
        assert_eq!(r.tone, ResolutionTone::Success);
        assert_eq!(r.card_id, "abandoned-warehouse");
    }

    #[test]
    fn distinguished_scheme_pays_big() {
        let r = resolve_action(
            &action("s1", VerbKind::Scheme, vec![shipment(), intel()]),
            &unlocked(&[]),
            0,
        );
        assert_eq!(r.tone, ResolutionTone::Success);
        assert_eq!(r.cash_delta, 2);
        assert_eq!(r.local_heat_delta, 6.0);
        assert_eq!(r.federal_heat_delta, 2.0);
        assert_eq!(r.card_id, "shipment-window");
    }

    #[test]
    fn ordinary_scheme_pays_small() {
        let van = VerbCard::new("unmarked-van", "Unmarked Van, Lot C", CardType::Situation);
        let r = resolve_action(
            &action("s2", VerbKind::Scheme, vec![intel(), van]),
            &unlocked(&[]),
            0,
        );
        assert_eq!(r.tone, ResolutionTone::Info);
        assert_eq!(r.cash_delta, 1);
        assert_eq!(r.local_heat_delta, 2.0);
        assert_eq!(r.federal_heat_delta, 0.0);
    }

    #[test]
    fn scheme_missing_resource_warns() {
        let r = resolve_action(
            &action("s3", VerbKind::Scheme, vec![shipment()]),
            &unlocked(&[]),
            0,
        );
        assert_eq!(r.tone, ResolutionTone::Warning);
        assert!(r.is_inert());
    }

    #[test]
    fn scheme_missing_situation_warns() {
        let r = resolve_action(
            &action("s4", VerbKind::Scheme, vec![docks(), intel()]),
            &unlocked(&["the_docks"]),
            0,
        );
        assert_eq!(r.tone, ResolutionTone::Warning);
        assert!(r.is_inert());
    }

    #[test]
    fn placeholder_verbs_are_inert_info() {
        for kind in [VerbKind::Train, VerbKind::Recruit, VerbKind::Bribe, VerbKind::Violence] {
            let r = resolve_action(&action("p", kind, vec![]), &unlocked(&[]), 0);
            assert_eq!(r.tone, ResolutionTone::Info);
            assert!(r.is_inert());
            assert_eq!(r.card_id, "");
        }
    }

    #[test]
    fn scheme_payout_lookup_falls_back() {
        assert_eq!(scheme_payout("shipment-window").cash, 2);
        assert_eq!(scheme_payout("anything-else"), ORDINARY_SCHEME);
    }

    // -----------------------------------------------------------------------
    // System-level tests against a minimal world
    // -----------------------------------------------------------------------

    fn setup_app(districts: &[(&str, bool)]) -> App {
        let mut app = build_sim_app(SimConfig::default());
        app.add_plugins(VerbPlugin);
        app.insert_resource(WallClock::Fixed(42));
        let world = app.world_mut();
        world.spawn((
            SimEntity {
                id: 1,
                key: "jeffries".to_string(),
            },
            Identity::new("Jeffries", "test protagonist", CardType::Person),
            Protagonist,
            Asset {
                cash: 2,
                laundered: false,
            },
            Heat::new(0.0, 0.0),
        ));
        for (district, open) in districts {
            world.spawn(Location::new(*district, *open));
        }
        app
    }

    fn queue(app: &mut App, action: VerbAction) {
        app.world_mut().resource_mut::<PendingVerbs>().0.push(action);
    }

    fn protagonist(app: &mut App) -> (Asset, Heat) {
        let (asset, heat) = app
            .world_mut()
            .query_filtered::<(&Asset, &Heat), With<Protagonist>>()
            .single(app.world())
            .unwrap();
        (asset.clone(), heat.clone())
    }

    #[test]
    fn system_applies_work_payout() {
        let mut app = setup_app(&[("the_docks", true)]);
        queue(&mut app, action("w1", VerbKind::Work, vec![docks()]));
        app.world_mut().run_schedule(SimTick);

        let (asset, _) = protagonist(&mut app);
        assert_eq!(asset.cash, 3);
        let results = &app.world().resource::<VerbResolutions>().0;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].resolved_at_ms, 42);
        assert!(app.world().resource::<PendingVerbs>().0.is_empty());
    }

    #[test]
    fn system_clamps_heat_after_scheme() {
        let mut app = setup_app(&[]);
        app.world_mut()
            .query_filtered::<&mut Heat, With<Protagonist>>()
            .single_mut(app.world_mut())
            .unwrap()
            .local = 97.0;
        queue(&mut app, action("s1", VerbKind::Scheme, vec![shipment(), intel()]));
        app.world_mut().run_schedule(SimTick);

        let (asset, heat) = protagonist(&mut app);
        assert_eq!(asset.cash, 4);
        assert_eq!(heat.local, 100.0);
        assert_eq!(heat.federal, 2.0);
    }

    #[test]
    fn system_preserves_input_order_and_posts_to_wire() {
        let mut app = setup_app(&[("the_docks", false)]);
        queue(&mut app, action("a", VerbKind::Work, vec![docks()]));
        queue(&mut app, action("b", VerbKind::Train, vec![]));
        queue(&mut app, action("c", VerbKind::Scheme, vec![shipment(), intel()]));
        app.world_mut().run_schedule(SimTick);

        let ids: Vec<_> = app
            .world()
            .resource::<VerbResolutions>()
            .0
            .iter()
            .map(|r| r.action_id.clone())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let wire = app.world().resource::<StreetWire>();
        assert_eq!(wire.entries().next().unwrap().id, "verb-resolution-c");
    }

    #[test]
    fn system_without_protagonist_leaves_queue_alone() {
        let mut app = build_sim_app(SimConfig::default());
        app.add_plugins(VerbPlugin);
        queue(&mut app, action("w1", VerbKind::Work, vec![docks()]));
        app.world_mut().run_schedule(SimTick);
        assert_eq!(app.world().resource::<PendingVerbs>().0.len(), 1);
        assert!(app.world().resource::<VerbResolutions>().0.is_empty());
    }

    #[test]
    fn injected_channel_pulls_and_notifies() {
        use std::sync::Arc;

        use parking_lot::Mutex;

        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let seen_clone = seen.clone();
        let mut handed_out = false;

        let mut app = setup_app(&[("the_docks", true)]);
        app.insert_resource(VerbChannel::new(
            move || {
                if handed_out {
                    return Vec::new();
                }
                handed_out = true;
                vec![action("injected", VerbKind::Work, vec![docks()])]
            },
            move |r: &VerbResolution| seen_clone.lock().push(r.action_id.clone()),
        ));

        app.world_mut().run_schedule(SimTick);
        app.world_mut().run_schedule(SimTick);

        assert_eq!(*seen.lock(), vec!["injected".to_string()]);
        let (asset, _) = protagonist(&mut app);
        assert_eq!(asset.cash, 3);
    }
}
