pub mod metrics;

use chrono::{Datelike, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::company::CompanyInfo;
use crate::domain::customer::{Customer, CustomerStage};
use crate::domain::decision::Decision;
use crate::domain::finance::{FinancesPatch, FinancialMetrics};
use crate::domain::goal::{Goal, GoalStatus};
use crate::domain::persona::Persona;
use crate::domain::task::{Owner, Priority, Task, TaskStatus};
use crate::errors::DomainError;
use crate::snapshot::BusinessSnapshot;

use self::metrics::ComputedMetrics;

/// Source of entity identifiers. Injected so tests can pin IDs and so ID
/// uniqueness does not depend on wall-clock resolution.
pub trait IdProvider: Send {
    fn next_id(&mut self) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[derive(Clone, Debug)]
pub struct SequentialIdProvider {
    prefix: String,
    next: u64,
}

impl SequentialIdProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: 1 }
    }
}

impl IdProvider for SequentialIdProvider {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{:04}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub priority: Priority,
    pub owner: Owner,
    pub due_date: Option<NaiveDate>,
    pub agent: Option<Persona>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub company: String,
    pub email: Option<String>,
    pub mrr: f64,
    pub health_score: u8,
    pub stage: CustomerStage,
    pub last_contact: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewGoal {
    pub title: String,
    pub target: String,
    pub target_value: f64,
    pub deadline: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewDecision {
    pub title: String,
    pub context: String,
    pub outcome: String,
    pub agent: Option<Persona>,
}

/// Mutation surface the action executor works against. Every method assigns
/// an ID where relevant, recomputes derived metrics, and returns the created
/// entity for confirmation-message construction.
pub trait BusinessStateWriter {
    fn add_task(&mut self, new_task: NewTask) -> Result<Task, DomainError>;
    fn add_customer(&mut self, new_customer: NewCustomer) -> Result<Customer, DomainError>;
    fn update_finances(&mut self, patch: FinancesPatch) -> Result<FinancialMetrics, DomainError>;
    fn add_decision(&mut self, new_decision: NewDecision) -> Result<Decision, DomainError>;
    fn add_goal(&mut self, new_goal: NewGoal) -> Result<Goal, DomainError>;
}

/// The session-scoped business model. Owned explicitly and passed by
/// reference; mutated only through the named operations so derived metrics
/// can never drift from the underlying collections.
pub struct BusinessState {
    company: CompanyInfo,
    tasks: Vec<Task>,
    customers: Vec<Customer>,
    finances: FinancialMetrics,
    goals: Vec<Goal>,
    decisions: Vec<Decision>,
    metrics: ComputedMetrics,
    as_of: NaiveDate,
    ids: Box<dyn IdProvider>,
}

impl BusinessState {
    pub fn new(as_of: NaiveDate) -> Self {
        Self::with_ids(as_of, Box::new(UuidIdProvider))
    }

    pub fn with_ids(as_of: NaiveDate, ids: Box<dyn IdProvider>) -> Self {
        let mut state = Self {
            company: CompanyInfo::default(),
            tasks: Vec::new(),
            customers: Vec::new(),
            finances: FinancialMetrics::default(),
            goals: Vec::new(),
            decisions: Vec::new(),
            metrics: ComputedMetrics::default(),
            as_of,
            ids,
        };
        state.recompute();
        state
    }

    pub fn from_snapshot(snapshot: BusinessSnapshot, ids: Box<dyn IdProvider>) -> Self {
        let mut state = Self {
            company: snapshot.company,
            tasks: snapshot.tasks,
            customers: snapshot.customers,
            finances: snapshot.finances,
            goals: snapshot.goals,
            decisions: snapshot.decisions,
            metrics: ComputedMetrics::default(),
            as_of: snapshot.as_of,
            ids,
        };
        state.recompute();
        state
    }

    /// Snapshots carry everything except computed metrics, which are
    /// re-derived on rehydration.
    pub fn snapshot(&self) -> BusinessSnapshot {
        BusinessSnapshot {
            company: self.company.clone(),
            tasks: self.tasks.clone(),
            customers: self.customers.clone(),
            finances: self.finances.clone(),
            goals: self.goals.clone(),
            decisions: self.decisions.clone(),
            as_of: self.as_of,
        }
    }

    pub fn company(&self) -> &CompanyInfo {
        &self.company
    }

    pub fn set_company(&mut self, company: CompanyInfo) {
        self.company = company;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn finances(&self) -> &FinancialMetrics {
        &self.finances
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn metrics(&self) -> &ComputedMetrics {
        &self.metrics
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    fn recompute(&mut self) {
        self.metrics =
            ComputedMetrics::derive(&self.tasks, &self.customers, &self.finances, self.as_of);
    }

    fn month_year(&self) -> String {
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        format!("{} {}", MONTHS[self.as_of.month0() as usize], self.as_of.year())
    }
}

impl BusinessStateWriter for BusinessState {
    fn add_task(&mut self, new_task: NewTask) -> Result<Task, DomainError> {
        if new_task.title.trim().is_empty() {
            return Err(DomainError::EmptyTaskTitle);
        }

        let task = Task {
            id: self.ids.next_id(),
            title: new_task.title,
            priority: new_task.priority,
            status: TaskStatus::Todo,
            owner: new_task.owner,
            due_date: new_task.due_date,
            agent: new_task.agent,
            created_at: Utc::now(),
        };
        // Newest first; insertion order doubles as recency.
        self.tasks.insert(0, task.clone());
        self.recompute();
        tracing::debug!(task_id = %task.id, title = %task.title, "task added");
        Ok(task)
    }

    fn add_customer(&mut self, new_customer: NewCustomer) -> Result<Customer, DomainError> {
        if new_customer.mrr < 0.0 {
            return Err(DomainError::NegativeMrr(new_customer.mrr));
        }
        if new_customer.health_score > 100 {
            return Err(DomainError::HealthScoreOutOfRange(new_customer.health_score));
        }

        let customer = Customer {
            id: self.ids.next_id(),
            name: new_customer.name,
            company: new_customer.company,
            email: new_customer.email,
            mrr: new_customer.mrr,
            health_score: new_customer.health_score,
            stage: new_customer.stage,
            last_contact: new_customer.last_contact,
            join_date: self.month_year(),
        };
        self.customers.insert(0, customer.clone());
        self.recompute();
        tracing::debug!(customer_id = %customer.id, name = %customer.name, "customer added");
        Ok(customer)
    }

    fn update_finances(&mut self, patch: FinancesPatch) -> Result<FinancialMetrics, DomainError> {
        self.finances.apply(patch);
        self.recompute();
        tracing::debug!(
            balance = self.finances.balance,
            burn = self.finances.monthly_burn,
            revenue = self.finances.monthly_revenue,
            "finances updated"
        );
        Ok(self.finances.clone())
    }

    fn add_decision(&mut self, new_decision: NewDecision) -> Result<Decision, DomainError> {
        if new_decision.title.trim().is_empty() {
            return Err(DomainError::EmptyDecisionTitle);
        }

        let decision = Decision {
            id: self.ids.next_id(),
            title: new_decision.title,
            context: new_decision.context,
            outcome: new_decision.outcome,
            date: self.as_of,
            agent: new_decision.agent,
        };
        self.decisions.insert(0, decision.clone());
        self.recompute();
        tracing::debug!(decision_id = %decision.id, title = %decision.title, "decision logged");
        Ok(decision)
    }

    fn add_goal(&mut self, new_goal: NewGoal) -> Result<Goal, DomainError> {
        if new_goal.target_value < 0.0 {
            return Err(DomainError::NegativeGoalTarget(new_goal.target_value));
        }

        let goal = Goal {
            id: self.ids.next_id(),
            title: new_goal.title,
            target: new_goal.target,
            current: 0.0,
            target_value: new_goal.target_value,
            deadline: new_goal.deadline,
            status: GoalStatus::OnTrack,
        };
        self.goals.insert(0, goal.clone());
        self.recompute();
        tracing::debug!(goal_id = %goal.id, title = %goal.title, "goal set");
        Ok(goal)
    }
}
