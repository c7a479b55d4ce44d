use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("task title must not be empty")]
    EmptyTaskTitle,
    #[error("decision title must not be empty")]
    EmptyDecisionTitle,
    #[error("customer mrr must not be negative, got {0}")]
    NegativeMrr(f64),
    #[error("health score {0} is outside 0..=100")]
    HealthScoreOutOfRange(u8),
    #[error("goal target value must not be negative, got {0}")]
    NegativeGoalTarget(f64),
}
