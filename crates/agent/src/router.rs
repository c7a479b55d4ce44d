//! Keyword-count persona routing.
//!
//! Deliberately dumber than the intent classifier: each persona owns a
//! vocabulary, the persona with the most hits wins, and the generalist CEO
//! catches everything else. Routing never blocks a message; at worst it
//! answers with the fallback confidence.

use cofounder_core::{EngineConfig, Persona};

const PERSONA_KEYWORDS: [(Persona, &[&str]); 8] = [
    (
        Persona::Ceo,
        &["strategy", "vision", "priorities", "roadmap", "fundraise", "investor", "board"],
    ),
    (
        Persona::Execution,
        &["task", "todo", "deadline", "ship", "sprint", "block", "progress", "remind"],
    ),
    (
        Persona::Customer,
        &["customer", "client", "churn", "onboarding", "support", "retention", "feedback"],
    ),
    (
        Persona::Decision,
        &["decide", "decision", "tradeoff", "option", "choose", "pros and cons"],
    ),
    (
        Persona::Finance,
        &["runway", "burn", "revenue", "mrr", "cash", "expense", "budget", "pricing", "finances"],
    ),
    (
        Persona::Marketing,
        &["marketing", "campaign", "ads", "seo", "content", "launch", "audience", "growth"],
    ),
    (
        Persona::Branding,
        &["brand", "logo", "design", "voice", "positioning", "identity", "naming"],
    ),
    (
        Persona::Product,
        &["product", "feature", "spec", "user", "prototype", "mvp", "usability"],
    ),
];

/// Outcome of routing one message. `keywords` records which vocabulary
/// words fired, so the reply layer can show its work.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentRoute {
    pub primary: Persona,
    pub secondary: Vec<Persona>,
    pub confidence: f32,
    pub keywords: Vec<String>,
}

pub struct AgentRouter {
    config: EngineConfig,
}

impl Default for AgentRouter {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl AgentRouter {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn route(&self, message: &str) -> AgentRoute {
        let lower = message.to_ascii_lowercase();

        let mut best: Option<(Persona, usize)> = None;
        let mut secondary = Vec::new();
        let mut keywords = Vec::new();

        for (persona, vocabulary) in PERSONA_KEYWORDS {
            let hits: Vec<&str> =
                vocabulary.iter().copied().filter(|word| lower.contains(word)).collect();
            if hits.is_empty() {
                continue;
            }

            keywords.extend(hits.iter().map(|word| word.to_string()));
            match best {
                Some((_, count)) if hits.len() <= count => secondary.push(persona),
                Some((previous, _)) => {
                    secondary.push(previous);
                    best = Some((persona, hits.len()));
                }
                None => best = Some((persona, hits.len())),
            }
        }

        let route = match best {
            Some((primary, count)) => AgentRoute {
                primary,
                secondary,
                confidence: (count as f32 / 3.0).min(1.0),
                keywords,
            },
            None => AgentRoute {
                primary: Persona::Ceo,
                secondary: Vec::new(),
                confidence: self.config.router_fallback_confidence,
                keywords: Vec::new(),
            },
        };

        tracing::debug!(
            primary = route.primary.label(),
            confidence = route.confidence,
            "message routed"
        );
        route
    }
}

#[cfg(test)]
mod tests {
    use cofounder_core::Persona;

    use super::AgentRouter;

    #[test]
    fn finance_vocabulary_routes_to_finance() {
        let route = AgentRouter::default().route("what's our runway and burn rate this month?");

        assert_eq!(route.primary, Persona::Finance);
        assert!(route.keywords.contains(&"runway".to_string()));
        assert!(route.keywords.contains(&"burn".to_string()));
        assert!(route.confidence > 0.5);
    }

    #[test]
    fn unmatched_message_falls_back_to_ceo() {
        let route = AgentRouter::default().route("good morning!");

        assert_eq!(route.primary, Persona::Ceo);
        assert_eq!(route.confidence, 0.5);
        assert!(route.secondary.is_empty());
        assert!(route.keywords.is_empty());
    }

    #[test]
    fn runner_up_personas_are_kept_as_secondary() {
        let route = AgentRouter::default()
            .route("plan the campaign launch and remind me to review the ads budget");

        assert_eq!(route.primary, Persona::Marketing);
        assert!(route.secondary.contains(&Persona::Execution));
    }

    #[test]
    fn confidence_is_capped_at_one() {
        let route = AgentRouter::default()
            .route("runway burn revenue mrr cash expense budget pricing");

        assert_eq!(route.primary, Persona::Finance);
        assert_eq!(route.confidence, 1.0);
    }
}
