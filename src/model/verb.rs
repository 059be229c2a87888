//! Verb actions and their resolutions.
//!
//! External code (the verb slots) queues `VerbAction`s; the verb system
//! drains them once per tick and emits one `VerbResolution` per action.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::CardType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerbKind {
    Work,
    Scheme,
    Train,
    Recruit,
    Bribe,
    Violence,
}

impl VerbKind {
    pub const ALL: [VerbKind; 6] = [
        VerbKind::Work,
        VerbKind::Scheme,
        VerbKind::Train,
        VerbKind::Recruit,
        VerbKind::Bribe,
        VerbKind::Violence,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VerbKind::Work => "work",
            VerbKind::Scheme => "scheme",
            VerbKind::Train => "train",
            VerbKind::Recruit => "recruit",
            VerbKind::Bribe => "bribe",
            VerbKind::Violence => "violence",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            VerbKind::Work => "Work",
            VerbKind::Scheme => "Scheme",
            VerbKind::Train => "Train",
            VerbKind::Recruit => "Recruit",
            VerbKind::Bribe => "Bribe",
            VerbKind::Violence => "Violence",
        }
    }
}

impl fmt::Display for VerbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One card committed to a verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbCard {
    pub card_id: String,
    pub card_title: String,
    pub card_type: CardType,
}

impl VerbCard {
    pub fn new(card_id: impl Into<String>, card_title: impl Into<String>, card_type: CardType) -> Self {
        Self {
            card_id: card_id.into(),
            card_title: card_title.into(),
            card_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbAction {
    pub id: String,
    pub slot_id: VerbKind,
    pub cards: Vec<VerbCard>,
    pub completed_at_ms: u64,
}

impl VerbAction {
    pub fn first_of_type(&self, card_type: CardType) -> Option<&VerbCard> {
        self.cards.iter().find(|c| c.card_type == card_type)
    }

    pub fn has_type(&self, card_type: CardType) -> bool {
        self.first_of_type(card_type).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionTone {
    Info,
    Warning,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbResolution {
    pub id: String,
    pub action_id: String,
    pub slot_id: VerbKind,
    pub card_id: String,
    pub card_title: String,
    pub tone: ResolutionTone,
    pub line: String,
    pub cash_delta: i64,
    pub local_heat_delta: f64,
    pub federal_heat_delta: f64,
    pub resolved_at_ms: u64,
}

impl VerbResolution {
    /// True when the resolution carries no effect on the protagonist.
    pub fn is_inert(&self) -> bool {
        self.cash_delta == 0 && self.local_heat_delta == 0.0 && self.federal_heat_delta == 0.0
    }
}
