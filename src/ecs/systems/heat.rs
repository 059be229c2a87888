use bevy_app::{App, Plugin};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res};

use crate::config::SimConfig;
use crate::ecs::components::Heat;
use crate::ecs::schedule::{SimStage, SimTick};

pub struct HeatPlugin;

impl Plugin for HeatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(SimTick, decay_heat.in_set(SimStage::Heat));
    }
}

/// Bleed both meters toward zero every tick. Federal heat decays at its own,
/// slower rate.
pub fn decay_heat(config: Option<Res<SimConfig>>, mut heats: Query<&mut Heat>) {
    let (local, federal) = config
        .map(|c| (c.local_heat_decay, c.federal_heat_decay))
        .unwrap_or((0.02, 0.01));

    for mut heat in heats.iter_mut() {
        if heat.local == 0.0 && heat.federal == 0.0 {
            continue;
        }
        heat.apply(-local, -federal);
    }
}
