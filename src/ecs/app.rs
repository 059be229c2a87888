use bevy_app::App;
use bevy_ecs::schedule::ExecutorKind;

use super::resources::{SimEntityMap, StreetWire, WallClock};
use super::schedule::configure_sim_schedule;
use crate::config::SimConfig;

/// Build a headless Bevy app with the tick schedule and core resources.
/// Systems are installed separately with `DocksidePlugin`; entities with
/// `seed_world`.
///
/// Manual tick control:
/// ```no_run
/// # use dockside_sim::ecs::{build_sim_app, SimTick};
/// # use dockside_sim::config::SimConfig;
/// let mut app = build_sim_app(SimConfig::default());
/// for _ in 0..60 {  // one shift at the default rate
///     app.world_mut().run_schedule(SimTick);
/// }
/// ```
pub fn build_sim_app(config: SimConfig) -> App {
    build_sim_app_with_executor(config, ExecutorKind::SingleThreaded)
}

/// Build a headless Bevy app with a specific executor kind.
///
/// Stage order is the same under either executor; only systems inside one
/// stage may run in parallel on the multi-threaded one.
pub fn build_sim_app_with_executor(config: SimConfig, executor: ExecutorKind) -> App {
    let mut app = App::empty();

    app.insert_resource(StreetWire::new(config.street_wire_capacity));
    app.insert_resource(SimEntityMap::new());
    app.insert_resource(WallClock::System);
    app.insert_resource(config);

    app.add_schedule(configure_sim_schedule(executor));
    app
}
