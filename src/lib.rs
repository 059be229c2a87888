pub mod config;
pub mod context;
pub mod ecs;
pub mod error;
pub mod model;
pub mod queue;
pub mod seed;
pub mod slot;
pub mod snapshot;

pub use config::SimConfig;
pub use context::{SimContext, TickDriver};
pub use error::{SimError, SimResult};
pub use model::{
    CardCluster, CardType, ResolutionTone, ResourceType, VerbAction, VerbCard, VerbKind,
    VerbResolution,
};
pub use queue::{ActionQueue, SharedActionQueue};
pub use seed::{PROTAGONIST_NAME, StartingState, seed_world};
pub use slot::{DropOutcome, SlotCompletion, SlotPhase, VerbSlotBoard, VerbSlotSpec, VerbSlotTimer};
pub use snapshot::{BoardCard, Snapshot, read_snapshot};
