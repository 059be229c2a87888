pub mod app;
pub mod clock;
pub mod components;
pub mod conditions;
pub mod plugin;
pub mod resources;
pub mod schedule;
pub mod spawn;
pub mod systems;
pub mod test_helpers;

pub use app::{build_sim_app, build_sim_app_with_executor};
pub use clock::{DAYS_PER_WEEK, SHIFTS_PER_DAY, ShiftName, Time, TimeAdvance};
pub use components::{
    Asset, CardFace, CardState, Dossier, DossierValue, Heat, HeatTier, Identity, Location,
    Network, Protagonist, Psychology, Reputation, ResourceStock, SimEntity, Turf, Visual,
    clamp_heat, normalize_district_id,
};
pub use conditions::{shift_boundary, week_boundary};
pub use plugin::DocksidePlugin;
pub use resources::{
    PendingVerbs, ResolutionSink, SimEntityMap, StreetWire, VerbActionSource, VerbChannel,
    VerbResolutions, WallClock, WireEntry,
};
pub use schedule::{SimStage, SimTick, configure_sim_schedule};
