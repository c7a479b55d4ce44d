//! Rule-based intent classification.
//!
//! The catalog is an ordered table of `{patterns, keywords, builder}`
//! entries. Regex matches carry a constant high confidence, so the first
//! matching catalog entry wins the regex pass; the keyword pass only runs
//! when no pattern cleared the execution threshold and its score is capped
//! below it, so a loose keyword hit can inform persona selection but never
//! outranks an explicit phrasing from another intent.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use cofounder_core::{EngineConfig, Owner, Priority};

use crate::extract;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    CreateTask,
    CreateGoal,
    AddCustomer,
    UpdateFinances,
    LogDecision,
    AddExpense,
    CreateCampaign,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinanceUpdateKind {
    Expense,
    Income,
    Balance,
}

/// Strongly-typed parameter bag, one variant per executable intent. The
/// executor pattern-matches this exhaustively instead of poking an untyped
/// map.
#[derive(Clone, Debug, PartialEq)]
pub enum IntentParams {
    Task {
        title: Option<String>,
        priority: Priority,
        due_date: Option<NaiveDate>,
        owner: Owner,
    },
    Goal {
        title: Option<String>,
        target_value: f64,
        deadline: Option<NaiveDate>,
    },
    Customer {
        name: String,
        company: String,
        email: Option<String>,
        mrr: f64,
    },
    Finances {
        kind: FinanceUpdateKind,
        amount: f64,
    },
    Decision {
        title: Option<String>,
        context: String,
        outcome: String,
    },
    Expense {
        amount: f64,
        category: &'static str,
        vendor: String,
    },
    Campaign {
        title: Option<String>,
        channel: &'static str,
        budget: f64,
    },
    None,
}

/// Per-message classification outcome. Ephemeral; classification never
/// mutates anything, execution is a separate explicit step.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedIntent {
    pub kind: IntentKind,
    pub confidence: f32,
    pub params: IntentParams,
    pub original_text: String,
}

type ParamsBuilder = fn(&str, NaiveDate, &EngineConfig) -> IntentParams;

struct IntentRule {
    kind: IntentKind,
    patterns: &'static [&'static str],
    keywords: &'static [&'static str],
    build: ParamsBuilder,
}

const CATALOG: [IntentRule; 7] = [
    IntentRule {
        kind: IntentKind::CreateTask,
        patterns: &[
            r"(?i)\b(?:create|add|make)\s+(?:a\s+)?(?:new\s+)?task\b",
            r"(?i)\bremind me\b",
            r"(?i)\bi need to\b",
            r"(?i)\btodo\b",
            r"(?i)\bdon'?t forget to\b",
        ],
        keywords: &["task", "remind", "todo", "follow up"],
        build: task_params,
    },
    IntentRule {
        kind: IntentKind::CreateGoal,
        patterns: &[
            r"(?i)\bset\s+(?:a\s+)?(?:new\s+)?goal\b",
            r"(?i)\bour goal is\b",
            r"(?i)\bwe want to (?:reach|hit|get to)\b",
            r"(?i)\baim(?:ing)? (?:for|to)\b",
        ],
        keywords: &["goal", "target", "objective", "milestone"],
        build: goal_params,
    },
    IntentRule {
        kind: IntentKind::AddCustomer,
        patterns: &[
            r"(?i)\badd\s+(?:a\s+)?(?:new\s+)?(?:customer|client)\b",
            r"(?i)\bnew (?:customer|client)\b",
            r"(?i)\b(?:signed|closed)\s+(?:up\s+)?(?:a\s+)?(?:new\s+)?(?:customer|client|deal)\b",
            r"(?i)\bclosed a deal with\b",
        ],
        keywords: &["customer", "client", "signed"],
        build: customer_params,
    },
    IntentRule {
        kind: IntentKind::UpdateFinances,
        patterns: &[
            r"(?i)\bupdate\s+(?:the\s+|our\s+)?(?:finances|balance|revenue|burn)\b",
            r"(?i)\b(?:bank\s+)?balance is\b",
            r"(?i)\brevenue (?:is|hit|reached)\b",
            r"(?i)\bburn (?:rate\s+)?is\b",
            r"(?i)\bwe (?:raised|got paid)\b",
        ],
        keywords: &["balance", "revenue", "burn", "cash", "finances"],
        build: finance_params,
    },
    IntentRule {
        kind: IntentKind::LogDecision,
        patterns: &[
            r"(?i)\blog\s+(?:a\s+|the\s+)?decision\b",
            r"(?i)\bwe (?:decided|chose|are going with)\b",
            r"(?i)\bmade (?:a\s+|the\s+)?(?:call|decision)\b",
        ],
        keywords: &["decided", "decision", "chose", "going with"],
        build: decision_params,
    },
    IntentRule {
        kind: IntentKind::AddExpense,
        patterns: &[
            r"(?i)\badd\s+(?:an\s+)?expense\b",
            r"(?i)\b(?:we\s+)?spent\b",
            r"(?i)\bpaid\s+(?:for\b|\$|\d)",
        ],
        keywords: &["expense", "spent", "paid", "cost"],
        build: expense_params,
    },
    IntentRule {
        kind: IntentKind::CreateCampaign,
        patterns: &[
            r"(?i)\b(?:create|launch|start|run)\s+(?:a\s+)?(?:new\s+)?(?:marketing\s+)?campaign\b",
            r"(?i)\bmarketing campaign\b",
        ],
        keywords: &["campaign", "ads", "promotion"],
        build: campaign_params,
    },
];

fn task_params(message: &str, anchor: NaiveDate, config: &EngineConfig) -> IntentParams {
    IntentParams::Task {
        title: extract::extract_title(message),
        priority: extract::extract_priority(message),
        due_date: extract::extract_due_date(message, anchor),
        owner: extract::extract_owner(message, &config.assistant_name),
    }
}

fn goal_params(message: &str, anchor: NaiveDate, _config: &EngineConfig) -> IntentParams {
    IntentParams::Goal {
        title: extract::extract_title(message),
        target_value: extract::extract_money(message),
        deadline: extract::extract_due_date(message, anchor),
    }
}

fn customer_params(message: &str, _anchor: NaiveDate, _config: &EngineConfig) -> IntentParams {
    IntentParams::Customer {
        name: extract::extract_customer_name(message),
        company: extract::extract_company(message),
        email: extract::extract_email(message),
        mrr: extract::extract_money(message),
    }
}

fn finance_params(message: &str, _anchor: NaiveDate, _config: &EngineConfig) -> IntentParams {
    IntentParams::Finances {
        kind: finance_update_kind(message),
        amount: extract::extract_money(message),
    }
}

fn finance_update_kind(message: &str) -> FinanceUpdateKind {
    let lower = message.to_ascii_lowercase();
    if lower.contains("burn") || lower.contains("expense") || lower.contains("spend") {
        FinanceUpdateKind::Expense
    } else if lower.contains("revenue")
        || lower.contains("income")
        || lower.contains("mrr")
        || lower.contains("sales")
    {
        FinanceUpdateKind::Income
    } else {
        FinanceUpdateKind::Balance
    }
}

static DECISION_OUTCOME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:decided|chose|going with)\s+(?:to\s+)?(.+)$")
        .expect("static decision pattern must compile")
});

fn decision_params(message: &str, _anchor: NaiveDate, _config: &EngineConfig) -> IntentParams {
    let outcome = DECISION_OUTCOME
        .captures(message)
        .map(|captures| captures[1].trim().trim_end_matches(['.', '!', '?']).to_string())
        .unwrap_or_else(|| "Recorded".to_string());

    IntentParams::Decision {
        title: extract::extract_title(message),
        context: message.trim().to_string(),
        outcome,
    }
}

fn expense_params(message: &str, _anchor: NaiveDate, _config: &EngineConfig) -> IntentParams {
    IntentParams::Expense {
        amount: extract::extract_money(message),
        category: extract::extract_category(message),
        vendor: extract::extract_vendor(message),
    }
}

fn campaign_params(message: &str, _anchor: NaiveDate, _config: &EngineConfig) -> IntentParams {
    IntentParams::Campaign {
        title: extract::extract_title(message),
        channel: extract::extract_channel(message),
        budget: extract::extract_money(message),
    }
}

struct CompiledRule {
    kind: IntentKind,
    patterns: Vec<Regex>,
    keywords: &'static [&'static str],
    build: ParamsBuilder,
}

pub struct IntentClassifier {
    rules: Vec<CompiledRule>,
    config: EngineConfig,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl IntentClassifier {
    pub fn new(config: EngineConfig) -> Self {
        let rules = CATALOG
            .iter()
            .map(|rule| CompiledRule {
                kind: rule.kind,
                patterns: rule
                    .patterns
                    .iter()
                    .map(|pattern| {
                        Regex::new(pattern).expect("static intent pattern must compile")
                    })
                    .collect(),
                keywords: rule.keywords,
                build: rule.build,
            })
            .collect();
        Self { rules, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classifies against the local current date.
    pub fn detect(&self, message: &str) -> DetectedIntent {
        self.detect_at(message, Local::now().date_naive())
    }

    /// Classifies with an explicit anchor date for relative-date slots.
    /// Total and deterministic for a fixed `(message, anchor)` pair.
    pub fn detect_at(&self, message: &str, anchor: NaiveDate) -> DetectedIntent {
        let mut best = DetectedIntent {
            kind: IntentKind::Unknown,
            confidence: 0.0,
            params: IntentParams::None,
            original_text: message.to_string(),
        };

        for rule in &self.rules {
            if rule.patterns.iter().any(|pattern| pattern.is_match(message))
                && self.config.regex_confidence > best.confidence
            {
                best = DetectedIntent {
                    kind: rule.kind,
                    confidence: self.config.regex_confidence,
                    params: (rule.build)(message, anchor, &self.config),
                    original_text: message.to_string(),
                };
            }
        }

        if best.confidence < self.config.execution_threshold {
            let lower = message.to_ascii_lowercase();
            for rule in &self.rules {
                let matched =
                    rule.keywords.iter().filter(|keyword| lower.contains(**keyword)).count();
                if matched == 0 {
                    continue;
                }
                let confidence = (self.config.keyword_base
                    + self.config.keyword_step * matched as f32)
                    .min(self.config.keyword_cap);
                if confidence > best.confidence {
                    best = DetectedIntent {
                        kind: rule.kind,
                        confidence,
                        params: (rule.build)(message, anchor, &self.config),
                        original_text: message.to_string(),
                    };
                }
            }
        }

        tracing::debug!(kind = ?best.kind, confidence = best.confidence, "intent classified");
        best
    }
}
