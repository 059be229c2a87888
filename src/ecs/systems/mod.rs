pub mod heat;
pub mod identity;
pub mod resources;
pub mod time;
pub mod verbs;
