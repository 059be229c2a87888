pub mod card;
pub mod verb;

pub use card::{CardCluster, CardType, EdgeType, ResourceType};
pub use verb::{ResolutionTone, VerbAction, VerbCard, VerbKind, VerbResolution};

/// Uppercase the first character of `word`, leaving the rest as is.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
