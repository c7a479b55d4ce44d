//! Turns a detected intent into a state mutation, behind the confidence
//! gate. Execution is all-or-nothing per message: either exactly one writer
//! method runs, or the state is untouched and the result says why.

use cofounder_core::{
    Customer, CustomerStage, Decision, DomainError, EngineConfig, FinancesPatch, FinancialMetrics,
    Goal, NewCustomer, NewDecision, NewGoal, NewTask, Persona, Task,
};

use crate::intent::{DetectedIntent, FinanceUpdateKind, IntentKind, IntentParams};

#[derive(Clone, Debug, PartialEq)]
pub enum CreatedItem {
    Task(Task),
    Customer(Customer),
    Goal(Goal),
    Decision(Decision),
    Finances(FinancialMetrics),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionResult {
    pub success: bool,
    pub kind: IntentKind,
    pub message: String,
    pub created: Option<CreatedItem>,
    pub error: Option<String>,
}

impl ExecutionResult {
    fn skipped(kind: IntentKind, message: impl Into<String>) -> Self {
        Self { success: false, kind, message: message.into(), created: None, error: None }
    }

    fn failed(kind: IntentKind, error: DomainError) -> Self {
        Self {
            success: false,
            kind,
            message: "Action failed".to_string(),
            created: None,
            error: Some(error.to_string()),
        }
    }
}

pub fn execute_intent<S: cofounder_core::BusinessStateWriter>(
    intent: &DetectedIntent,
    state: &mut S,
    persona: Persona,
    config: &EngineConfig,
) -> ExecutionResult {
    if intent.confidence < config.execution_threshold {
        tracing::debug!(
            kind = ?intent.kind,
            confidence = intent.confidence,
            threshold = config.execution_threshold,
            "intent below execution threshold, skipping"
        );
        return ExecutionResult::skipped(intent.kind, "Confidence too low to act automatically");
    }

    let outcome = match &intent.params {
        IntentParams::Task { title, priority, due_date, owner } => {
            let title = title.clone().unwrap_or_else(|| "New Task".to_string());
            state
                .add_task(NewTask {
                    title,
                    priority: *priority,
                    owner: *owner,
                    due_date: *due_date,
                    agent: Some(persona),
                })
                .map(|task| {
                    let mut message = format!("Created task \"{}\"", task.title);
                    if let Some(due) = task.due_date {
                        message.push_str(&format!(" due {due}"));
                    }
                    (message, CreatedItem::Task(task))
                })
        }
        IntentParams::Customer { name, company, email, mrr } => state
            .add_customer(NewCustomer {
                name: name.clone(),
                company: company.clone(),
                email: email.clone(),
                mrr: *mrr,
                health_score: 80,
                stage: CustomerStage::Active,
                last_contact: "Today".to_string(),
            })
            .map(|customer| {
                let mut message =
                    format!("Added customer {} ({})", customer.name, customer.company);
                if customer.mrr > 0.0 {
                    message.push_str(&format!(" at ${}/mo", format_amount(customer.mrr)));
                }
                (message, CreatedItem::Customer(customer))
            }),
        IntentParams::Finances { kind, amount } => {
            let patch = match kind {
                FinanceUpdateKind::Expense => {
                    FinancesPatch { monthly_burn: Some(*amount), ..FinancesPatch::default() }
                }
                FinanceUpdateKind::Income => FinancesPatch {
                    monthly_revenue: Some(*amount),
                    mrr: Some(*amount),
                    ..FinancesPatch::default()
                },
                FinanceUpdateKind::Balance => {
                    FinancesPatch { balance: Some(*amount), ..FinancesPatch::default() }
                }
            };
            let label = match kind {
                FinanceUpdateKind::Expense => "monthly burn",
                FinanceUpdateKind::Income => "monthly revenue",
                FinanceUpdateKind::Balance => "cash balance",
            };
            state.update_finances(patch).map(|finances| {
                let message = format!("Updated {label} to ${}", format_amount(*amount));
                (message, CreatedItem::Finances(finances))
            })
        }
        IntentParams::Goal { title, target_value, deadline } => {
            let title = title.clone().unwrap_or_else(|| "New Goal".to_string());
            state
                .add_goal(NewGoal {
                    title,
                    target: format!("${}", format_amount(*target_value)),
                    target_value: *target_value,
                    deadline: *deadline,
                })
                .map(|goal| {
                    let message = format!("Set goal \"{}\"", goal.title);
                    (message, CreatedItem::Goal(goal))
                })
        }
        IntentParams::Decision { title, context, outcome } => {
            let title = title.clone().unwrap_or_else(|| "New Decision".to_string());
            state
                .add_decision(NewDecision {
                    title,
                    context: context.clone(),
                    outcome: outcome.clone(),
                    agent: Some(persona),
                })
                .map(|decision| {
                    let message = format!("Logged decision \"{}\"", decision.title);
                    (message, CreatedItem::Decision(decision))
                })
        }
        IntentParams::Expense { .. } | IntentParams::Campaign { .. } | IntentParams::None => {
            return ExecutionResult::skipped(
                intent.kind,
                "Understood, but this action is not yet supported",
            );
        }
    };

    match outcome {
        Ok((message, created)) => {
            tracing::info!(kind = ?intent.kind, %message, "intent executed");
            ExecutionResult {
                success: true,
                kind: intent.kind,
                message,
                created: Some(created),
                error: None,
            }
        }
        Err(error) => {
            tracing::warn!(kind = ?intent.kind, %error, "intent execution failed");
            ExecutionResult::failed(intent.kind, error)
        }
    }
}

/// Renders an amount with thousands separators; whole amounts drop the
/// fractional part ("1,500", "2,500.50").
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let whole = amount.trunc() as u64;
    let cents = ((amount - amount.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let mut rendered = String::new();
    if negative {
        rendered.push('-');
    }
    rendered.push_str(&grouped);
    if cents > 0 {
        rendered.push_str(&format!(".{cents:02}"));
    }
    rendered
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use cofounder_core::{
        BusinessState, EngineConfig, Owner, Persona, Priority, SequentialIdProvider,
    };

    use crate::intent::{DetectedIntent, FinanceUpdateKind, IntentKind, IntentParams};

    use super::{execute_intent, format_amount, CreatedItem};

    fn state() -> BusinessState {
        let anchor = NaiveDate::from_ymd_opt(2026, 1, 8).expect("valid anchor");
        BusinessState::with_ids(anchor, Box::new(SequentialIdProvider::new("id")))
    }

    fn intent(kind: IntentKind, confidence: f32, params: IntentParams) -> DetectedIntent {
        DetectedIntent { kind, confidence, params, original_text: String::new() }
    }

    #[test]
    fn confident_task_intent_creates_a_task() {
        let mut state = state();
        let detected = intent(
            IntentKind::CreateTask,
            0.9,
            IntentParams::Task {
                title: Some("call the investor".to_string()),
                priority: Priority::High,
                due_date: Some("2026-01-09".parse().expect("valid date literal")),
                owner: Owner::You,
            },
        );

        let result =
            execute_intent(&detected, &mut state, Persona::Execution, &EngineConfig::default());

        assert!(result.success);
        assert_eq!(result.message, "Created task \"call the investor\" due 2026-01-09");
        assert_eq!(state.tasks().len(), 1);
        assert_eq!(state.tasks()[0].agent, Some(Persona::Execution));
    }

    #[test]
    fn low_confidence_intent_never_touches_state() {
        let mut state = state();
        let detected = intent(
            IntentKind::CreateTask,
            0.65,
            IntentParams::Task {
                title: Some("maybe do something".to_string()),
                priority: Priority::Medium,
                due_date: None,
                owner: Owner::You,
            },
        );

        let result =
            execute_intent(&detected, &mut state, Persona::Execution, &EngineConfig::default());

        assert!(!result.success);
        assert!(result.created.is_none());
        assert!(result.error.is_none());
        assert!(state.tasks().is_empty());
    }

    #[test]
    fn missing_task_title_falls_back_to_default() {
        let mut state = state();
        let detected = intent(
            IntentKind::CreateTask,
            0.9,
            IntentParams::Task {
                title: None,
                priority: Priority::Medium,
                due_date: None,
                owner: Owner::You,
            },
        );

        let result =
            execute_intent(&detected, &mut state, Persona::Execution, &EngineConfig::default());

        assert!(result.success);
        assert_eq!(state.tasks()[0].title, "New Task");
    }

    #[test]
    fn customer_confirmation_includes_mrr_only_when_positive() {
        let mut state = state();
        let detected = intent(
            IntentKind::AddCustomer,
            0.9,
            IntentParams::Customer {
                name: "John Smith".to_string(),
                company: "Acme Corp".to_string(),
                email: None,
                mrr: 450.0,
            },
        );

        let result =
            execute_intent(&detected, &mut state, Persona::Customer, &EngineConfig::default());
        assert_eq!(result.message, "Added customer John Smith (Acme Corp) at $450/mo");

        let free = intent(
            IntentKind::AddCustomer,
            0.9,
            IntentParams::Customer {
                name: "Dana".to_string(),
                company: "Northwind".to_string(),
                email: None,
                mrr: 0.0,
            },
        );
        let result =
            execute_intent(&free, &mut state, Persona::Customer, &EngineConfig::default());
        assert_eq!(result.message, "Added customer Dana (Northwind)");
    }

    #[test]
    fn domain_error_is_reported_not_panicked() {
        let mut state = state();
        let detected = intent(
            IntentKind::AddCustomer,
            0.9,
            IntentParams::Customer {
                name: "Bad".to_string(),
                company: "Bad Co".to_string(),
                email: None,
                mrr: -10.0,
            },
        );

        let result =
            execute_intent(&detected, &mut state, Persona::Customer, &EngineConfig::default());

        assert!(!result.success);
        assert!(result.error.expect("error message").contains("-10"));
        assert!(state.customers().is_empty());
    }

    #[test]
    fn balance_update_flows_into_financial_metrics() {
        let mut state = state();
        let detected = intent(
            IntentKind::UpdateFinances,
            0.9,
            IntentParams::Finances { kind: FinanceUpdateKind::Balance, amount: 120_000.0 },
        );

        let result =
            execute_intent(&detected, &mut state, Persona::Finance, &EngineConfig::default());

        assert_eq!(result.message, "Updated cash balance to $120,000");
        let Some(CreatedItem::Finances(finances)) = result.created else {
            panic!("expected finances in result");
        };
        assert_eq!(finances.balance, 120_000.0);
    }

    #[test]
    fn expense_intent_is_acknowledged_but_not_executed() {
        let mut state = state();
        let detected = intent(
            IntentKind::AddExpense,
            0.9,
            IntentParams::Expense { amount: 99.0, category: "software", vendor: "Figma".into() },
        );

        let result =
            execute_intent(&detected, &mut state, Persona::Finance, &EngineConfig::default());

        assert!(!result.success);
        assert!(result.message.contains("not yet supported"));
    }

    #[test]
    fn amounts_render_with_thousands_separators() {
        assert_eq!(format_amount(450.0), "450");
        assert_eq!(format_amount(1_500.0), "1,500");
        assert_eq!(format_amount(120_000.0), "120,000");
        assert_eq!(format_amount(2_500.5), "2,500.50");
        assert_eq!(format_amount(0.0), "0");
    }
}
