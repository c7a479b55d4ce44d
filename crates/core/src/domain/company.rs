use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub industry: String,
    pub stage: String,
    pub team_size: u32,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "Unnamed Venture".to_string(),
            industry: "saas".to_string(),
            stage: "pre-seed".to_string(),
            team_size: 1,
        }
    }
}
