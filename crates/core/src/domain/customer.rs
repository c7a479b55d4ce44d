use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerStage {
    Lead,
    Trial,
    Active,
    AtRisk,
    Churned,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub company: String,
    pub email: Option<String>,
    pub mrr: f64,
    pub health_score: u8,
    pub stage: CustomerStage,
    pub last_contact: String,
    pub join_date: String,
}

impl Customer {
    pub fn is_active(&self) -> bool {
        matches!(self.stage, CustomerStage::Active | CustomerStage::AtRisk)
    }
}
