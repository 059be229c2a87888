use bevy_ecs::component::Component;
use serde::Serialize;

pub const MIN_HEAT: f64 = 0.0;
pub const MAX_HEAT: f64 = 100.0;

/// Clamp a heat value into `[MIN_HEAT, MAX_HEAT]`. NaN collapses to zero.
pub fn clamp_heat(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_HEAT;
    }
    value.clamp(MIN_HEAT, MAX_HEAT)
}

/// Two risk meters: street-level and federal attention.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Heat {
    pub local: f64,
    pub federal: f64,
}

impl Heat {
    pub fn new(local: f64, federal: f64) -> Self {
        Self {
            local: clamp_heat(local),
            federal: clamp_heat(federal),
        }
    }

    /// Add deltas and re-clamp both meters.
    pub fn apply(&mut self, local_delta: f64, federal_delta: f64) {
        self.local = clamp_heat(self.local + local_delta);
        self.federal = clamp_heat(self.federal + federal_delta);
    }

    /// The more severe of the local and federal tiers.
    pub fn tier(&self) -> HeatTier {
        HeatTier::from_heat(self.local).max(HeatTier::from_heat(self.federal))
    }
}

/// Severity bands. Declaration order is severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HeatTier {
    Clear,
    Noticed,
    Investigated,
    Pressured,
    Crisis,
}

impl HeatTier {
    pub fn from_heat(heat: f64) -> Self {
        let heat = clamp_heat(heat);
        if heat <= 20.0 {
            HeatTier::Clear
        } else if heat <= 40.0 {
            HeatTier::Noticed
        } else if heat <= 60.0 {
            HeatTier::Investigated
        } else if heat <= 80.0 {
            HeatTier::Pressured
        } else {
            HeatTier::Crisis
        }
    }
}
