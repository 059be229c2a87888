use thiserror::Error;

/// Failures raised while building or seeding a world.
///
/// Runtime paths never produce these: rejected verbs become warning
/// resolutions and reads against an unseeded world return `None`.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("seed produced no clock entity")]
    MissingClock,

    #[error("seed produced {count} clock entities, expected exactly one")]
    DuplicateClock { count: usize },

    #[error("seed produced no protagonist named '{name}'")]
    MissingProtagonist { name: String },

    #[error("seed produced {count} protagonist entities, expected exactly one")]
    DuplicateProtagonist { count: usize },

    #[error("protagonist is missing its {component} component")]
    IncompleteProtagonist { component: &'static str },

    #[error("card key '{key}' is used more than once")]
    DuplicateCardKey { key: String },

    #[error("invalid seed: {reason}")]
    InvalidSeed { reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("malformed seed or config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
