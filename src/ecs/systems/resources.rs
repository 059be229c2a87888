//! Resource stage: flat shift income, card burn-down and weekly resource
//! decay. Every system here is gated on a clock boundary, so on most ticks
//! the stage does nothing.

use bevy_app::{App, Plugin};
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res};

use crate::config::SimConfig;
use crate::ecs::components::{Asset, CardState, Identity, Protagonist, ResourceStock};
use crate::ecs::conditions::{shift_boundary, week_boundary};
use crate::ecs::schedule::{SimStage, SimTick};

pub struct ResourcePlugin;

impl Plugin for ResourcePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            (
                (award_shift_income, burn_down_cards).run_if(shift_boundary),
                decay_resources.run_if(week_boundary),
            )
                .chain()
                .in_set(SimStage::Resources),
        );
    }
}

pub fn award_shift_income(
    config: Option<Res<SimConfig>>,
    mut protagonist: Query<&mut Asset, With<Protagonist>>,
) {
    let income = config.map(|c| c.income_per_shift).unwrap_or(1);
    if let Ok(mut asset) = protagonist.single_mut() {
        asset.cash += income;
    }
}

/// Count decaying cards down by one shift. Burned cards stay in the world
/// but fall off the board.
pub fn burn_down_cards(mut cards: Query<(&mut CardState, Option<&Identity>)>) {
    for (mut state, identity) in cards.iter_mut() {
        if !state.is_decaying() {
            continue;
        }
        if state.burn_down() {
            let name = identity.map(|i| i.name.as_str()).unwrap_or("card");
            tracing::info!(card = name, "card burned");
        }
    }
}

pub fn decay_resources(mut stocks: Query<&mut ResourceStock>) {
    for mut stock in stocks.iter_mut() {
        if stock.decay_rate > 0.0 {
            stock.decay();
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy_ecs::entity::Entity;
    use bevy_ecs::schedule::ExecutorKind;

    use super::*;
    use crate::ecs::clock::{DAYS_PER_WEEK, SHIFTS_PER_DAY, Time};
    use crate::ecs::schedule::configure_sim_schedule;
    use crate::ecs::systems::time::TimePlugin;
    use crate::ecs::test_helpers::{tick, tick_shifts, tick_weeks};
    use crate::model::{CardType, ResourceType};

    const TICKS_PER_SHIFT: u32 = 2;

    fn setup_app() -> App {
        let mut app = App::empty();
        app.add_schedule(configure_sim_schedule(ExecutorKind::SingleThreaded));
        app.insert_resource(SimConfig::default());
        app.add_plugins((TimePlugin, ResourcePlugin));
        app.world_mut().spawn(Time::new(1986, TICKS_PER_SHIFT));
        app
    }

    fn spawn_protagonist(app: &mut App, cash: i64) -> Entity {
        app.world_mut()
            .spawn((
                Identity::new("Jeffries", "", CardType::Person),
                Protagonist,
                Asset {
                    cash,
                    laundered: false,
                },
            ))
            .id()
    }

    #[test]
    fn income_lands_on_shift_boundary_only() {
        let mut app = setup_app();
        let jeffries = spawn_protagonist(&mut app, 2);

        tick(&mut app, TICKS_PER_SHIFT - 1);
        assert_eq!(app.world().get::<Asset>(jeffries).unwrap().cash, 2);

        tick(&mut app, 1);
        assert_eq!(app.world().get::<Asset>(jeffries).unwrap().cash, 3);

        tick_shifts(&mut app, 3);
        assert_eq!(app.world().get::<Asset>(jeffries).unwrap().cash, 6);
    }

    #[test]
    fn income_follows_config() {
        let mut app = setup_app();
        app.insert_resource(SimConfig {
            income_per_shift: 5,
            ..SimConfig::default()
        });
        let jeffries = spawn_protagonist(&mut app, 0);
        tick(&mut app, TICKS_PER_SHIFT);
        assert_eq!(app.world().get::<Asset>(jeffries).unwrap().cash, 5);
    }

    #[test]
    fn resources_decay_once_per_week_and_floor_at_zero() {
        let mut app = setup_app();
        let intel = app
            .world_mut()
            .spawn(ResourceStock::new(ResourceType::Intel, 1.0, 3.0))
            .id();
        let ginga = app
            .world_mut()
            .spawn(ResourceStock::new(ResourceType::GingaPoints, 2.0, 0.5))
            .id();

        let ticks_per_week = TICKS_PER_SHIFT * SHIFTS_PER_DAY * DAYS_PER_WEEK;
        tick(&mut app, ticks_per_week - 1);
        assert_eq!(app.world().get::<ResourceStock>(intel).unwrap().amount, 1.0);

        tick(&mut app, 1);
        assert_eq!(app.world().get::<ResourceStock>(intel).unwrap().amount, 0.0);
        assert_eq!(app.world().get::<ResourceStock>(ginga).unwrap().amount, 1.5);

        tick_weeks(&mut app, 1);
        assert_eq!(app.world().get::<ResourceStock>(intel).unwrap().amount, 0.0);
        assert_eq!(app.world().get::<ResourceStock>(ginga).unwrap().amount, 1.0);
    }

    #[test]
    fn decaying_cards_burn_after_their_shifts() {
        let mut app = setup_app();
        let van = app
            .world_mut()
            .spawn((
                Identity::new("Unmarked Van, Lot C", "", CardType::Situation),
                CardState::Decaying { decay_timer: 1 },
            ))
            .id();
        let window = app
            .world_mut()
            .spawn(CardState::Decaying { decay_timer: 2 })
            .id();
        let idle = app.world_mut().spawn(CardState::Idle).id();

        tick(&mut app, TICKS_PER_SHIFT);
        assert!(app.world().get::<CardState>(van).unwrap().is_burned());
        assert_eq!(
            app.world().get::<CardState>(window).unwrap(),
            &CardState::Decaying { decay_timer: 1 }
        );

        tick_shifts(&mut app, 1);
        assert!(app.world().get::<CardState>(window).unwrap().is_burned());
        assert_eq!(app.world().get::<CardState>(idle).unwrap(), &CardState::Idle);
    }

    #[test]
    fn no_protagonist_means_no_income() {
        let mut app = setup_app();
        tick(&mut app, TICKS_PER_SHIFT);
        let count = app.world_mut().query::<&Asset>().iter(app.world()).count();
        assert_eq!(count, 0);
    }
}
