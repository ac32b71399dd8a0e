use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A voter's selection, as the API receives it: a bare string for
/// single-choice elections, an array of candidate names for multi-choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Single(String),
    Multi(Vec<String>),
}

/// The validation rule for what counts as a well-formed selection.
///
/// One shape drives both election flows; the session never needs to know
/// which kind it is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ChoiceShape {
    /// Exactly one value from a fixed option set.
    Single { options: Vec<String> },
    /// Between 1 and `max` distinct values from a fixed candidate set,
    /// order preserved.
    Multi { candidates: Vec<String>, max: usize },
}

impl ChoiceShape {
    /// Check a selection against this shape.
    pub fn validate(&self, choice: &Choice) -> Result<()> {
        match (self, choice) {
            (ChoiceShape::Single { options }, Choice::Single(value)) => {
                if options.contains(value) {
                    Ok(())
                } else {
                    Err(Error::InvalidChoiceShape(format!(
                        "'{value}' is not one of the available options"
                    )))
                }
            }
            (ChoiceShape::Multi { candidates, max }, Choice::Multi(values)) => {
                if values.is_empty() {
                    return Err(Error::InvalidChoiceShape(
                        "select at least one candidate".to_string(),
                    ));
                }
                if values.len() > *max {
                    return Err(Error::InvalidChoiceShape(format!(
                        "select at most {max} candidates"
                    )));
                }
                for (i, value) in values.iter().enumerate() {
                    if !candidates.contains(value) {
                        return Err(Error::InvalidChoiceShape(format!(
                            "'{value}' is not one of the candidates"
                        )));
                    }
                    if values[..i].contains(value) {
                        return Err(Error::InvalidChoiceShape(format!(
                            "candidate '{value}' selected more than once"
                        )));
                    }
                }
                Ok(())
            }
            _ => Err(Error::InvalidChoiceShape(
                "selection does not match this election's ballot".to_string(),
            )),
        }
    }

    /// Flatten a validated choice into ballot row fields. Multi-choice rows
    /// are padded with empty fields to the fixed width `max`, so every row
    /// in a store has the same number of columns.
    pub fn row_fields(&self, choice: &Choice) -> Vec<String> {
        match (self, choice) {
            (ChoiceShape::Single { .. }, Choice::Single(value)) => vec![value.clone()],
            (ChoiceShape::Multi { max, .. }, Choice::Multi(values)) => {
                let mut fields = values.clone();
                fields.resize(*max, String::new());
                fields
            }
            _ => unreachable!("choice is validated against the shape before flattening"),
        }
    }
}
