use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    OnTrack,
    AtRisk,
    Behind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    /// Human-readable target description, e.g. `"$50,000 MRR"`.
    pub target: String,
    pub current: f64,
    pub target_value: f64,
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
}
