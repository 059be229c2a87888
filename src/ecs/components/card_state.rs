use bevy_ecs::component::Component;

use crate::model::VerbKind;

/// Lifecycle of a card on the board. Timers count shifts.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub enum CardState {
    #[default]
    Idle,
    Decaying {
        decay_timer: u32,
    },
    InVerbSlot {
        verb: VerbKind,
        decay_timer: Option<u32>,
    },
    Burned,
}

impl CardState {
    pub fn is_decaying(&self) -> bool {
        matches!(
            self,
            CardState::Decaying { .. } | CardState::InVerbSlot { decay_timer: Some(_), .. }
        )
    }

    pub fn is_burned(&self) -> bool {
        matches!(self, CardState::Burned)
    }

    /// Count one shift off the decay timer. Returns true when this call burned
    /// the card.
    pub fn burn_down(&mut self) -> bool {
        let timer = match self {
            CardState::Decaying { decay_timer } => decay_timer,
            CardState::InVerbSlot {
                decay_timer: Some(decay_timer),
                ..
            } => decay_timer,
            _ => return false,
        };
        *timer = timer.saturating_sub(1);
        if *timer > 0 {
            return false;
        }
        *self = CardState::Burned;
        true
    }

    /// Board label for states that override the card's own standing.
    pub fn label(&self) -> Option<String> {
        match self {
            CardState::Idle => None,
            CardState::Decaying { decay_timer } => Some(burns_in(*decay_timer)),
            CardState::InVerbSlot { verb, .. } => Some(format!("In {}", verb.title())),
            CardState::Burned => Some("Burned".to_string()),
        }
    }
}

fn burns_in(shifts: u32) -> String {
    if shifts == 1 {
        "Burns in 1 Shift".to_string()
    } else {
        format!("Burns in {shifts} Shifts")
    }
}
