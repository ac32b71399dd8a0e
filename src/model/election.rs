use serde::Serialize;

use crate::model::choice::ChoiceShape;

/// One fixed election instance: what it is called and what a valid ballot
/// looks like. The instance is selected at startup and never changes
/// mid-session; run one process per election.
#[derive(Debug, Clone, Serialize)]
pub struct ElectionSpec {
    pub title: String,
    pub shape: ChoiceShape,
}

impl ElectionSpec {
    /// Approval vote on the annual accounts.
    pub fn accounting() -> Self {
        Self {
            title: "Regnskab 2025".to_string(),
            shape: ChoiceShape::Single {
                options: vec![
                    "Godkendt".to_string(),
                    "Neutral".to_string(),
                    "Afvist".to_string(),
                ],
            },
        }
    }

    /// Supplementary-seat election: pick up to four board supplements.
    pub fn supplementary() -> Self {
        Self {
            title: "Suppleantvalg 2025".to_string(),
            shape: ChoiceShape::Multi {
                candidates: vec![
                    "1".to_string(),
                    "2".to_string(),
                    "3".to_string(),
                    "4".to_string(),
                ],
                max: 4,
            },
        }
    }

    /// Look up an instance by its configuration name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "accounting" => Some(Self::accounting()),
            "supplementary" => Some(Self::supplementary()),
            _ => None,
        }
    }
}
