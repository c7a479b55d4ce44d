//! Conversational layer for the cofounder engine.
//!
//! A message flows through four deterministic stages and one model call:
//! persona routing ([`router`]), intent classification ([`intent`]) over
//! the slot extractors in [`extract`], prose generation behind the
//! [`llm::LlmClient`] seam, and gated execution ([`executor`]) against the
//! business state. [`runtime::AgentRuntime`] wires the stages together and
//! persists a snapshot after every successful action.

pub mod executor;
pub mod extract;
pub mod intent;
pub mod llm;
pub mod reply;
pub mod router;
pub mod runtime;

pub use executor::{execute_intent, CreatedItem, ExecutionResult};
pub use intent::{DetectedIntent, FinanceUpdateKind, IntentClassifier, IntentKind, IntentParams};
pub use llm::LlmClient;
pub use reply::append_confirmation;
pub use router::{AgentRoute, AgentRouter};
pub use runtime::{AgentRuntime, TurnOutcome};
