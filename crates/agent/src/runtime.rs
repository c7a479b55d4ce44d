//! One-message orchestration: route, classify, prompt, execute, persist.

use anyhow::Context;

use cofounder_core::{BusinessState, EngineConfig, Persona, SnapshotStore};

use crate::executor::{execute_intent, ExecutionResult};
use crate::intent::{DetectedIntent, IntentClassifier};
use crate::llm::LlmClient;
use crate::reply::append_confirmation;
use crate::router::{AgentRoute, AgentRouter};

/// Everything that happened for one inbound message. Callers render
/// `reply`; the rest is there for logging and UI affordances.
#[derive(Clone, Debug)]
pub struct TurnOutcome {
    pub route: AgentRoute,
    pub intent: DetectedIntent,
    pub execution: ExecutionResult,
    pub reply: String,
}

pub struct AgentRuntime<L: LlmClient> {
    classifier: IntentClassifier,
    router: AgentRouter,
    llm: L,
    config: EngineConfig,
}

impl<L: LlmClient> AgentRuntime<L> {
    pub fn new(config: EngineConfig, llm: L) -> Self {
        Self {
            classifier: IntentClassifier::new(config.clone()),
            router: AgentRouter::new(config.clone()),
            llm,
            config,
        }
    }

    /// Handles one user message against the given state. Classification and
    /// routing are deterministic; only the prose reply comes from the model.
    /// The snapshot store is written only when an action actually mutated
    /// the state, so a failed turn never persists a half-applied snapshot.
    pub async fn handle_message<S: SnapshotStore>(
        &self,
        state: &mut BusinessState,
        snapshots: &mut S,
        message: &str,
    ) -> anyhow::Result<TurnOutcome> {
        let route = self.router.route(message);
        let intent = self.classifier.detect_at(message, state.as_of());
        tracing::debug!(
            persona = route.primary.label(),
            kind = ?intent.kind,
            confidence = intent.confidence,
            "handling message"
        );

        let prompt = build_prompt(route.primary, state, message);
        let prose =
            self.llm.complete(&prompt).await.context("language model completion failed")?;

        let execution = execute_intent(&intent, state, route.primary, &self.config);
        if execution.success {
            snapshots
                .save(&state.snapshot())
                .context("persisting snapshot after execution")?;
        }

        let reply = append_confirmation(&prose, &execution);
        Ok(TurnOutcome { route, intent, execution, reply })
    }
}

/// Persona-flavored prompt with a compact slice of live business context.
fn build_prompt(persona: Persona, state: &BusinessState, message: &str) -> String {
    let company = state.company();
    let metrics = state.metrics();

    let mut prompt = format!(
        "You are the {} advisor for {}, a {} {} company with a team of {}.\n",
        persona.label(),
        company.name,
        company.stage,
        company.industry,
        company.team_size,
    );

    match persona {
        Persona::Finance => {
            prompt.push_str(&format!(
                "Runway: {:.1} months. Monthly burn: ${:.0}. Net monthly: ${:.0}.\n",
                metrics.runway_months, metrics.monthly_burn, metrics.net_monthly,
            ));
        }
        Persona::Execution => {
            prompt.push_str(&format!(
                "Open tasks: {} ({} overdue, {} high priority).\n",
                metrics.open_tasks, metrics.overdue_tasks, metrics.high_priority_open,
            ));
        }
        Persona::Customer => {
            prompt.push_str(&format!(
                "Active customers: {} worth ${:.0}/mo. Churn: {:.1}%.\n",
                metrics.active_customers, metrics.total_customer_mrr, metrics.churn_rate_pct,
            ));
        }
        _ => {
            prompt.push_str(&format!(
                "Open tasks: {}. Active customers: {}. Runway: {:.1} months.\n",
                metrics.open_tasks, metrics.active_customers, metrics.runway_months,
            ));
        }
    }

    prompt.push_str("\nUser message:\n");
    prompt.push_str(message);
    prompt
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use cofounder_core::{
        BusinessState, EngineConfig, InMemorySnapshotStore, Persona, SequentialIdProvider,
    };

    use crate::intent::IntentKind;
    use crate::llm::LlmClient;

    use super::AgentRuntime;

    struct CannedLlmClient {
        reply: &'static str,
    }

    #[async_trait]
    impl LlmClient for CannedLlmClient {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.reply.to_string())
        }
    }

    fn state() -> BusinessState {
        let anchor = NaiveDate::from_ymd_opt(2026, 1, 8).expect("valid anchor");
        BusinessState::with_ids(anchor, Box::new(SequentialIdProvider::new("id")))
    }

    fn runtime(reply: &'static str) -> AgentRuntime<CannedLlmClient> {
        AgentRuntime::new(EngineConfig::default(), CannedLlmClient { reply })
    }

    #[tokio::test]
    async fn confident_task_message_mutates_state_and_persists() {
        let mut state = state();
        let mut snapshots = InMemorySnapshotStore::default();
        let runtime = runtime("On it.");

        let outcome = runtime
            .handle_message(&mut state, &mut snapshots, "remind me to call the investor tomorrow")
            .await
            .expect("turn succeeds");

        assert_eq!(outcome.intent.kind, IntentKind::CreateTask);
        assert!(outcome.execution.success);
        assert!(outcome.reply.contains("**Action Executed:**"));
        assert_eq!(state.tasks().len(), 1);
        assert_eq!(snapshots.saves(), 1);
    }

    #[tokio::test]
    async fn small_talk_neither_mutates_nor_persists() {
        let mut state = state();
        let mut snapshots = InMemorySnapshotStore::default();
        let runtime = runtime("Hey! All quiet.");

        let outcome = runtime
            .handle_message(&mut state, &mut snapshots, "hey what's up")
            .await
            .expect("turn succeeds");

        assert_eq!(outcome.intent.kind, IntentKind::Unknown);
        assert!(!outcome.execution.success);
        assert_eq!(outcome.reply, "Hey! All quiet.");
        assert!(state.tasks().is_empty());
        assert_eq!(snapshots.saves(), 0);
    }

    #[tokio::test]
    async fn finance_message_routes_to_the_finance_persona() {
        let mut state = state();
        let mut snapshots = InMemorySnapshotStore::default();
        let runtime = runtime("Burn looks fine.");

        let outcome = runtime
            .handle_message(&mut state, &mut snapshots, "what's our runway looking like?")
            .await
            .expect("turn succeeds");

        assert_eq!(outcome.route.primary, Persona::Finance);
    }
}
