use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

use crate::model::EdgeType;

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Psychology {
    pub fear: f64,
    pub ambition: f64,
    pub loyalty: f64,
    pub addiction: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: Entity,
    pub kind: EdgeType,
    pub weight: f64,
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Network {
    pub connections: Vec<Edge>,
    pub loyalty_score: f64,
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Reputation {
    pub fear: f64,
    pub respect: f64,
}
