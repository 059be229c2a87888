use bevy_ecs::system::Query;

use super::clock::Time;

// Bevy run condition functions (for use with `.run_if()`).
// An unseeded world has no clock, so neither condition fires.

pub fn shift_boundary(clock: Query<&Time>) -> bool {
    clock.single().is_ok_and(|time| time.is_shift_boundary())
}

pub fn week_boundary(clock: Query<&Time>) -> bool {
    clock.single().is_ok_and(|time| time.is_week_boundary())
}
