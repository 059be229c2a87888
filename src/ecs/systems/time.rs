//! Time stage: advances the single clock entity by one tick and announces
//! shift/day/week rollovers.

use bevy_app::{App, Plugin};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::Query;

use crate::ecs::clock::Time;
use crate::ecs::schedule::{SimStage, SimTick};

pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(SimTick, advance_clock.in_set(SimStage::Time));
    }
}

/// Registered first so every later stage sees the tick just completed.
pub fn advance_clock(mut clock: Query<&mut Time>) {
    let Ok(mut time) = clock.single_mut() else {
        return;
    };
    let result = time.advance();

    if result.shift_changed {
        tracing::info!(
            shift = time.shift,
            day = time.day,
            week = time.week,
            "shift change"
        );
    }
    if result.day_changed {
        tracing::info!(day = time.day, week = time.week, "new day");
    }
    if result.week_changed {
        tracing::info!(week = time.week, "new week");
    }
}
