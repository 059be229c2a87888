use bevy_app::App;

use crate::ecs::clock::{DAYS_PER_WEEK, SHIFTS_PER_DAY, Time};
use crate::ecs::schedule::SimTick;

/// Run `n` ticks.
pub fn tick(app: &mut App, n: u32) {
    for _ in 0..n {
        app.world_mut().run_schedule(SimTick);
    }
}

/// Run `n` full shifts worth of ticks at the clock's current quota.
pub fn tick_shifts(app: &mut App, n: u32) {
    let per_shift = current_time(app).map(|t| t.ticks_per_shift).unwrap_or(1);
    tick(app, per_shift * n);
}

/// Run `n` full weeks worth of ticks.
pub fn tick_weeks(app: &mut App, n: u32) {
    tick_shifts(app, n * SHIFTS_PER_DAY * DAYS_PER_WEEK);
}

/// Copy of the clock component, if one has been seeded.
pub fn current_time(app: &mut App) -> Option<Time> {
    let world = app.world_mut();
    world.query::<&Time>().single(world).ok().cloned()
}
