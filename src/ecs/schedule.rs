use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

/// Schedule label for the main simulation tick.
/// Run manually each tick via `app.world_mut().run_schedule(SimTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimTick;

/// Ordered stages within each simulation tick.
///
/// Stages run in declaration order:
/// Time < Verbs < Resources < Heat < Identity.
/// Every system in a stage finishes before the next stage starts, so the
/// resource systems always see the boundary the clock just crossed.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimStage {
    Time,
    Verbs,
    Resources,
    Heat,
    Identity,
}

/// Build a configured `SimTick` schedule with stage ordering.
pub fn configure_sim_schedule(executor: ExecutorKind) -> Schedule {
    let mut schedule = Schedule::new(SimTick);
    schedule.set_executor_kind(executor);
    schedule.configure_sets(
        (
            SimStage::Time,
            SimStage::Verbs,
            SimStage::Resources,
            SimStage::Heat,
            SimStage::Identity,
        )
            .chain(),
    );
    schedule
}
