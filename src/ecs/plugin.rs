use bevy_app::{App, Plugin};

use super::systems::heat::HeatPlugin;
use super::systems::identity::IdentityPlugin;
use super::systems::resources::ResourcePlugin;
use super::systems::time::TimePlugin;
use super::systems::verbs::VerbPlugin;

/// Aggregate plugin that installs every simulation stage.
pub struct DocksidePlugin;

impl Plugin for DocksidePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            TimePlugin,
            VerbPlugin,
            ResourcePlugin,
            HeatPlugin,
            IdentityPlugin,
        ));
    }
}
