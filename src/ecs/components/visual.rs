use std::collections::BTreeMap;

use bevy_ecs::component::Component;
use serde::{Deserialize, Serialize};

/// Printed face of a board card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFace {
    /// Board title when it differs from the identity name.
    pub title: Option<String>,
    pub subtitle: String,
    pub flavor: String,
    /// Clamped to 0..=5 when projected onto the board.
    pub trust_dots: u8,
    /// Standing label shown while the card is idle ("Contacted", "Watching").
    pub standing: Option<String>,
}

/// Per-card-type dossier details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Dossier {
    #[default]
    Blank,
    Person {
        city: Option<String>,
        neighborhood: Option<String>,
        capoeira: Option<u8>,
        #[serde(default)]
        traits: Vec<String>,
    },
    Location {
        neighborhood: Option<String>,
    },
}

/// Primitive value in the serialized dossier map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DossierValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl Dossier {
    /// Flatten to the open key/value form handed to the UI.
    pub fn to_fields(&self) -> BTreeMap<String, DossierValue> {
        let mut fields = BTreeMap::new();
        match self {
            Dossier::Blank => {}
            Dossier::Person {
                city,
                neighborhood,
                capoeira,
                traits,
            } => {
                if let Some(city) = city {
                    fields.insert("city".to_string(), DossierValue::Text(city.clone()));
                }
                if let Some(neighborhood) = neighborhood {
                    fields.insert(
                        "neighborhood".to_string(),
                        DossierValue::Text(neighborhood.clone()),
                    );
                }
                if let Some(capoeira) = capoeira {
                    fields.insert(
                        "capoeira".to_string(),
                        DossierValue::Number(f64::from(*capoeira)),
                    );
                }
                if !traits.is_empty() {
                    fields.insert("traits".to_string(), DossierValue::Text(traits.join(", ")));
                }
            }
            Dossier::Location { neighborhood } => {
                if let Some(neighborhood) = neighborhood {
                    fields.insert(
                        "neighborhood".to_string(),
                        DossierValue::Text(neighborhood.clone()),
                    );
                }
            }
        }
        fields
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Visual {
    pub card_face_key: String,
    pub revealed: bool,
    pub face: CardFace,
    pub dossier: Dossier,
}
