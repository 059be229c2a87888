use bevy_app::{App, Plugin};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::Query;

use crate::ecs::components::Identity;
use crate::ecs::schedule::{SimStage, SimTick};

pub const UNKNOWN_NAME: &str = "Unknown";
pub const MISSING_DESCRIPTION: &str = "No description available.";

pub struct IdentityPlugin;

impl Plugin for IdentityPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(SimTick, normalize_identities.in_set(SimStage::Identity));
    }
}

pub fn normalize_identities(mut identities: Query<&mut Identity>) {
    for mut identity in identities.iter_mut() {
        let name = sanitize(&identity.name, UNKNOWN_NAME);
        let description = sanitize(&identity.description, MISSING_DESCRIPTION);
        // Only touch the component when something actually changed.
        if name != identity.name || description != identity.description {
            identity.name = name;
            identity.description = description;
        }
    }
}

fn sanitize(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
