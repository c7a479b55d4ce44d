use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub category: String,
    pub vendor: String,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevenueStream {
    pub name: String,
    pub monthly: f64,
}

/// Single value object holding the company's financial picture. Updates
/// arrive as partial merges; `arr` and `runway_months` are re-derived after
/// every merge and never set directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub balance: f64,
    pub monthly_burn: f64,
    pub monthly_revenue: f64,
    pub mrr: f64,
    pub arr: f64,
    pub runway_months: f64,
    pub expenses: Vec<ExpenseLine>,
    pub revenue_streams: Vec<RevenueStream>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FinancesPatch {
    pub balance: Option<f64>,
    pub monthly_burn: Option<f64>,
    pub monthly_revenue: Option<f64>,
    pub mrr: Option<f64>,
}

impl Default for FinancialMetrics {
    fn default() -> Self {
        Self {
            balance: 0.0,
            monthly_burn: 0.0,
            monthly_revenue: 0.0,
            mrr: 0.0,
            arr: 0.0,
            runway_months: 0.0,
            expenses: Vec::new(),
            revenue_streams: Vec::new(),
        }
    }
}

impl FinancialMetrics {
    pub fn apply(&mut self, patch: FinancesPatch) {
        if let Some(balance) = patch.balance {
            self.balance = balance;
        }
        if let Some(monthly_burn) = patch.monthly_burn {
            self.monthly_burn = monthly_burn;
        }
        if let Some(monthly_revenue) = patch.monthly_revenue {
            self.monthly_revenue = monthly_revenue;
        }
        if let Some(mrr) = patch.mrr {
            self.mrr = mrr;
        }
        self.rederive();
    }

    // Runway is reported as 0 rather than infinite when there is no burn,
    // so snapshots stay plain JSON numbers.
    fn rederive(&mut self) {
        self.arr = self.mrr * 12.0;
        self.runway_months =
            if self.monthly_burn > 0.0 { self.balance / self.monthly_burn } else { 0.0 };
    }
}
