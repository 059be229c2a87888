pub mod entity_map;
pub mod sim_resources;
pub mod street_wire;

pub use entity_map::SimEntityMap;
pub use sim_resources::{
    PendingVerbs, ResolutionSink, VerbActionSource, VerbChannel, VerbResolutions, WallClock,
    RECENT_RESOLUTIONS,
};
pub use street_wire::{StreetWire, WireEntry};
