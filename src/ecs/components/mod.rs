pub mod assets;
pub mod card_state;
pub mod common;
pub mod heat;
pub mod location;
pub mod social;
pub mod visual;

pub use assets::{Asset, ResourceStock};
pub use card_state::CardState;
pub use common::{Identity, Protagonist, SimEntity};
pub use heat::{Heat, HeatTier, MAX_HEAT, MIN_HEAT, clamp_heat};
pub use location::{Location, Turf, normalize_district_id};
pub use social::{Edge, Network, Psychology, Reputation};
pub use visual::{CardFace, Dossier, DossierValue, Visual};
