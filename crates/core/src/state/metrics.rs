use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::customer::{Customer, CustomerStage};
use crate::domain::finance::FinancialMetrics;
use crate::domain::task::{Priority, Task};

/// Derived view over the rest of the business state. Always recomputed via
/// [`ComputedMetrics::derive`] after a mutation, never edited in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputedMetrics {
    pub runway_months: f64,
    pub monthly_burn: f64,
    pub net_monthly: f64,
    pub churn_rate_pct: f64,
    pub active_customers: usize,
    pub total_customer_mrr: f64,
    pub open_tasks: usize,
    pub overdue_tasks: usize,
    pub high_priority_open: usize,
}

impl ComputedMetrics {
    pub fn derive(
        tasks: &[Task],
        customers: &[Customer],
        finances: &FinancialMetrics,
        as_of: NaiveDate,
    ) -> Self {
        let churned = customers.iter().filter(|c| c.stage == CustomerStage::Churned).count();
        let churn_rate_pct = if customers.is_empty() {
            0.0
        } else {
            churned as f64 / customers.len() as f64 * 100.0
        };

        Self {
            runway_months: finances.runway_months,
            monthly_burn: finances.monthly_burn,
            net_monthly: finances.monthly_revenue - finances.monthly_burn,
            churn_rate_pct,
            active_customers: customers.iter().filter(|c| c.is_active()).count(),
            total_customer_mrr: customers.iter().map(|c| c.mrr).sum(),
            open_tasks: tasks.iter().filter(|t| t.is_open()).count(),
            overdue_tasks: tasks.iter().filter(|t| t.is_overdue(as_of)).count(),
            high_priority_open: tasks
                .iter()
                .filter(|t| t.is_open() && t.priority == Priority::High)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use crate::domain::customer::{Customer, CustomerStage};
    use crate::domain::finance::{FinancesPatch, FinancialMetrics};
    use crate::domain::task::{Owner, Priority, Task, TaskStatus};

    use super::ComputedMetrics;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 8).expect("valid anchor")
    }

    fn customer(stage: CustomerStage, mrr: f64) -> Customer {
        Customer {
            id: "c-1".to_string(),
            name: "Dana Reeve".to_string(),
            company: "Northwind Ltd".to_string(),
            email: None,
            mrr,
            health_score: 80,
            stage,
            last_contact: "Today".to_string(),
            join_date: "Jan 2026".to_string(),
        }
    }

    #[test]
    fn churn_rate_counts_churned_share() {
        let customers = vec![
            customer(CustomerStage::Active, 500.0),
            customer(CustomerStage::Active, 300.0),
            customer(CustomerStage::Churned, 0.0),
            customer(CustomerStage::Trial, 0.0),
        ];
        let metrics =
            ComputedMetrics::derive(&[], &customers, &FinancialMetrics::default(), anchor());

        assert_eq!(metrics.churn_rate_pct, 25.0);
        assert_eq!(metrics.active_customers, 2);
        assert_eq!(metrics.total_customer_mrr, 800.0);
    }

    #[test]
    fn task_counters_split_open_overdue_and_high_priority() {
        let task = |priority, status, due: Option<&str>| Task {
            id: "t".to_string(),
            title: "x".to_string(),
            priority,
            status,
            owner: Owner::You,
            due_date: due.map(|raw| raw.parse().expect("valid date literal")),
            agent: None,
            created_at: Utc::now(),
        };
        let tasks = vec![
            task(Priority::High, TaskStatus::Todo, Some("2026-01-02")),
            task(Priority::Medium, TaskStatus::InProgress, Some("2026-02-01")),
            task(Priority::High, TaskStatus::Done, Some("2025-12-01")),
        ];
        let metrics = ComputedMetrics::derive(&tasks, &[], &FinancialMetrics::default(), anchor());

        assert_eq!(metrics.open_tasks, 2);
        assert_eq!(metrics.overdue_tasks, 1);
        assert_eq!(metrics.high_priority_open, 1);
    }

    #[test]
    fn financial_fields_mirror_the_value_object() {
        let mut finances = FinancialMetrics::default();
        finances.apply(FinancesPatch {
            balance: Some(120_000.0),
            monthly_burn: Some(20_000.0),
            monthly_revenue: Some(5_000.0),
            ..FinancesPatch::default()
        });
        let metrics = ComputedMetrics::derive(&[], &[], &finances, anchor());

        assert_eq!(metrics.runway_months, 6.0);
        assert_eq!(metrics.net_monthly, -15_000.0);
        assert_eq!(metrics.churn_rate_pct, 0.0);
    }
}
