use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::persona::Persona;

/// Append-only log entry. Once recorded a decision is never mutated;
/// revisiting an outcome is a new decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: String,
    pub title: String,
    pub context: String,
    pub outcome: String,
    pub date: NaiveDate,
    pub agent: Option<Persona>,
}
