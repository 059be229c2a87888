use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

/// Normalize a card id or district name to a district key:
/// trimmed, lowercase, spaces and hyphens become underscores.
pub fn normalize_district_id(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Location {
    pub district_id: String,
    pub unlocked: bool,
    pub active_schemes: Vec<Entity>,
}

impl Location {
    pub fn new(district_id: impl Into<String>, unlocked: bool) -> Self {
        Self {
            district_id: district_id.into(),
            unlocked,
            active_schemes: Vec::new(),
        }
    }

    pub fn district_key(&self) -> String {
        normalize_district_id(&self.district_id)
    }
}

/// Territorial control over a district, as a fraction in `[0, 1]`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Turf {
    pub district_id: String,
    pub control_level: f64,
}

impl Turf {
    pub fn new(district_id: impl Into<String>, control_level: f64) -> Self {
        Self {
            district_id: district_id.into(),
            control_level,
        }
    }
}
