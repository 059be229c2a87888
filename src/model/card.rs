//! Card vocabulary shared by the ECS components, the verb slots, and the
//! board projection.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardType {
    Person,
    Resource,
    Situation,
    Location,
    Asset,
}

impl CardType {
    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Person => "person",
            CardType::Resource => "resource",
            CardType::Situation => "situation",
            CardType::Location => "location",
            CardType::Asset => "asset",
        }
    }

    /// Board cluster for this card type. Asset cards (the clock) never reach
    /// the board.
    pub fn cluster(self) -> Option<CardCluster> {
        match self {
            CardType::Person => Some(CardCluster::People),
            CardType::Location => Some(CardCluster::Locations),
            CardType::Situation => Some(CardCluster::Situations),
            CardType::Resource => Some(CardCluster::Resources),
            CardType::Asset => None,
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board grouping. Declaration order is the board's sort rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CardCluster {
    People,
    Locations,
    Situations,
    Resources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    Cash,
    Muscle,
    Intel,
    Favors,
    Evidence,
    CleanCash,
    GingaPoints,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Cash,
        ResourceType::Muscle,
        ResourceType::Intel,
        ResourceType::Favors,
        ResourceType::Evidence,
        ResourceType::CleanCash,
        ResourceType::GingaPoints,
    ];
}

/// Kind of tie between two people in a protagonist's network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeType {
    Family,
    Business,
    Debt,
    Secret,
    Vendetta,
    Informant,
}
