pub mod config;
pub mod domain;
pub mod errors;
pub mod snapshot;
pub mod state;

pub use config::{ConfigError, EngineConfig};
pub use domain::company::CompanyInfo;
pub use domain::customer::{Customer, CustomerStage};
pub use domain::decision::Decision;
pub use domain::finance::{ExpenseLine, FinancesPatch, FinancialMetrics, RevenueStream};
pub use domain::goal::{Goal, GoalStatus};
pub use domain::persona::Persona;
pub use domain::task::{Owner, Priority, Task, TaskStatus};
pub use errors::DomainError;
pub use snapshot::{
    BusinessSnapshot, InMemorySnapshotStore, JsonFileSnapshotStore, SnapshotError, SnapshotStore,
};
pub use state::metrics::ComputedMetrics;
pub use state::{
    BusinessState, BusinessStateWriter, IdProvider, NewCustomer, NewDecision, NewGoal, NewTask,
    SequentialIdProvider, UuidIdProvider,
};
