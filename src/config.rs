use bevy_ecs::resource::Resource;
use serde::Deserialize;

use crate::error::{SimError, SimResult};

/// Tunables for one simulation run.
///
/// Every field has a default, so a host may deserialize a partial JSON
/// object and only override what it cares about.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Rate at which the host is expected to call `step()`.
    pub tick_rate_hz: u32,
    pub ticks_per_shift: u32,
    /// Flat cash awarded to the protagonist on every shift boundary.
    pub income_per_shift: i64,
    pub local_heat_decay: f64,
    pub federal_heat_decay: f64,
    pub slot_cooldown_ms: u64,
    pub street_wire_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            ticks_per_shift: 60,
            income_per_shift: 1,
            local_heat_decay: 0.02,
            federal_heat_decay: 0.01,
            slot_cooldown_ms: 700,
            street_wire_capacity: 16,
        }
    }
}

impl SimConfig {
    pub fn from_json(raw: &str) -> SimResult<Self> {
        let config: SimConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.tick_rate_hz == 0 {
            return Err(invalid("tick_rate_hz must be positive"));
        }
        if self.ticks_per_shift == 0 {
            return Err(invalid("ticks_per_shift must be positive"));
        }
        if !(self.local_heat_decay >= 0.0) || !(self.federal_heat_decay >= 0.0) {
            return Err(invalid("heat decay rates must be non-negative"));
        }
        if self.street_wire_capacity == 0 {
            return Err(invalid("street_wire_capacity must be positive"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> SimError {
    SimError::InvalidConfig {
        reason: reason.to_string(),
    }
}
