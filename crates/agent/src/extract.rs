//! Pure text-to-value slot extractors.
//!
//! Every function here is total over arbitrary input: it returns a typed
//! value, `None`, or a documented fallback, and never errors. Extractors
//! always scan the whole message, not a capture group, so several of them
//! can draw from different parts of the same sentence.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use cofounder_core::{Owner, Priority};

const TITLE_MAX_CHARS: usize = 100;

static LEADING_COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*(?:",
        r"(?:please\s+)?(?:can you\s+)?(?:create|add|make|set|log|launch|start)\s+",
        r"(?:a\s+|an\s+|the\s+)?(?:new\s+)?",
        r"(?:task|goal|reminder|decision|customer|client|campaign|expense)\s*:?\s*",
        r"|(?:remind me|i need|we need|don'?t forget|note to self:?|todo:?)\s*",
        r")",
    ))
    .expect("static title pattern must compile")
});

static LEADING_CONNECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:to|that|about|for|the)\s+").expect("static pattern"));

static TRAILING_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+(?:by|before|due|from|with)\s+.*$").expect("static pattern"));

static TRAILING_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\s+(?:",
        r"(?:on\s+)?(?:today|tonight|tomorrow|monday|tuesday|wednesday|thursday|friday|saturday|sunday)",
        r"|in\s+\d+\s+days?",
        r"|next\s+week",
        r"|(?:by\s+)?(?:the\s+)?end\s+of\s+(?:the\s+)?month",
        r"|month\s+end",
        r")\s*[.!?]*\s*$",
    ))
    .expect("static title pattern must compile")
});

/// Task/goal/decision title pulled from a command-style sentence. Strips the
/// leading command phrase and connector words, then trailing date/owner
/// clauses. Never yields an empty string for non-empty input; `None` only
/// when the input itself is blank.
pub fn extract_title(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut working = LEADING_COMMAND.replace(trimmed, "").into_owned();
    loop {
        let stripped = LEADING_CONNECTOR.replace(&working, "").into_owned();
        if stripped == working {
            break;
        }
        working = stripped;
    }
    working = TRAILING_CLAUSE.replace(&working, "").into_owned();
    working = TRAILING_DATE.replace(&working, "").into_owned();

    let cleaned = working.trim().trim_matches(|c: char| ".,!?;:\"'".contains(c)).trim();
    let candidate = if cleaned.is_empty() { trimmed } else { cleaned };
    Some(truncate_title(candidate))
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_MAX_CHARS {
        return title.to_string();
    }
    let mut short: String = title.chars().take(TITLE_MAX_CHARS).collect();
    short.push('…');
    short
}

const HIGH_PRIORITY_MARKERS: [&str; 4] = ["urgent", "high priority", "asap", "critical"];
const LOW_PRIORITY_MARKERS: [&str; 3] = ["low priority", "when you can", "not urgent"];

/// High-priority markers win when both sets appear in one message.
pub fn extract_priority(text: &str) -> Priority {
    let lower = text.to_ascii_lowercase();
    if HIGH_PRIORITY_MARKERS.iter().any(|marker| lower.contains(marker)) {
        Priority::High
    } else if LOW_PRIORITY_MARKERS.iter().any(|marker| lower.contains(marker)) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

static IN_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bin\s+(\d{1,4})\s+days?\b").expect("static pattern"));

/// Resolves a relative date phrase against an explicit anchor date.
/// A weekday name always means the next occurrence strictly after the
/// anchor; saying "friday" on a Friday resolves seven days out. Past-tense
/// or ambiguous phrases are unsupported and yield `None`.
pub fn extract_due_date(text: &str, anchor: NaiveDate) -> Option<NaiveDate> {
    let lower = text.to_ascii_lowercase();

    if lower.contains("today") || lower.contains("tonight") {
        return Some(anchor);
    }
    if lower.contains("tomorrow") {
        return Some(anchor + Duration::days(1));
    }
    for (name, weekday) in WEEKDAYS {
        if lower.contains(name) {
            return Some(next_weekday(anchor, weekday));
        }
    }
    if let Some(captures) = IN_DAYS.captures(&lower) {
        if let Ok(days) = captures[1].parse::<i64>() {
            return Some(anchor + Duration::days(days));
        }
    }
    if lower.contains("next week") {
        return Some(anchor + Duration::days(7));
    }
    if lower.contains("end of month") || lower.contains("month end") {
        return Some(last_day_of_month(anchor));
    }

    None
}

fn next_weekday(anchor: NaiveDate, target: Weekday) -> NaiveDate {
    let ahead = (7 + i64::from(target.num_days_from_monday())
        - i64::from(anchor.weekday().num_days_from_monday()))
        % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    anchor + Duration::days(ahead)
}

fn last_day_of_month(anchor: NaiveDate) -> NaiveDate {
    let (year, month) = if anchor.month() == 12 {
        (anchor.year() + 1, 1)
    } else {
        (anchor.year(), anchor.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first_of_next| first_of_next - Duration::days(1))
        .unwrap_or(anchor)
}

/// Who a task lands on. The assistant claims it when addressed by name or
/// with "you do"; "team"/"someone"/"delegate" hand it to the team; the
/// default owner is the founder.
pub fn extract_owner(text: &str, assistant_name: &str) -> Owner {
    let lower = text.to_ascii_lowercase();
    if lower.contains(&assistant_name.to_ascii_lowercase()) || lower.contains("you do") {
        Owner::Ai
    } else if lower.contains("team") || lower.contains("someone") || lower.contains("delegate") {
        Owner::Team
    } else {
        Owner::You
    }
}

static MONEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\$?\s*(\d[\d,]*(?:\.\d+)?)\s*(k\b)?").expect("static pattern"));

/// First `$`-optional numeric token, thousands separators stripped, `k`
/// suffix multiplying by 1000. Returns 0 when no amount appears; callers
/// treat 0 as "not specified".
pub fn extract_money(text: &str) -> f64 {
    let Some(captures) = MONEY.captures(text) else {
        return 0.0;
    };
    let raw = captures[1].replace(',', "");
    let Ok(amount) = raw.parse::<f64>() else {
        return 0.0;
    };
    if captures.get(2).is_some() {
        amount * 1000.0
    } else {
        amount
    }
}

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("static pattern")
});

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|found| found.as_str().to_string())
}

const EXPENSE_CATEGORIES: [&str; 7] =
    ["payroll", "software", "marketing", "office", "hosting", "travel", "legal"];

pub fn extract_category(text: &str) -> &'static str {
    let lower = text.to_ascii_lowercase();
    EXPENSE_CATEGORIES.iter().find(|category| lower.contains(*category)).copied().unwrap_or("other")
}

const CAMPAIGN_CHANNELS: [&str; 7] =
    ["google", "facebook", "linkedin", "twitter", "instagram", "email", "content"];

pub fn extract_channel(text: &str) -> &'static str {
    let lower = text.to_ascii_lowercase();
    CAMPAIGN_CHANNELS.iter().find(|channel| lower.contains(*channel)).copied().unwrap_or("google")
}

const COMPANY_SUFFIXES: [&str; 7] = ["inc", "corp", "llc", "ltd", "gmbh", "labs", "co"];

/// Capitalized-word-sequence heuristic, skipping the sentence-initial token
/// and anything that looks like a company name. At most three words.
pub fn extract_customer_name(text: &str) -> String {
    capitalized_runs(text)
        .into_iter()
        .find(|run| !has_company_suffix(run))
        .map(|run| run.split_whitespace().take(3).collect::<Vec<_>>().join(" "))
        .unwrap_or_else(|| "New Customer".to_string())
}

pub fn extract_company(text: &str) -> String {
    if let Some(run) = capitalized_runs(text).into_iter().find(|run| has_company_suffix(run)) {
        return run;
    }
    run_after_marker(text, &["at", "from"]).unwrap_or_else(|| "Unknown Company".to_string())
}

pub fn extract_vendor(text: &str) -> String {
    run_after_marker(text, &["to", "at", "from"])
        .or_else(|| capitalized_runs(text).into_iter().next())
        .unwrap_or_else(|| "Unknown Vendor".to_string())
}

fn has_company_suffix(run: &str) -> bool {
    run.split_whitespace()
        .last()
        .map(|word| COMPANY_SUFFIXES.contains(&word.trim_matches('.').to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_capitalized_word(token: &str) -> bool {
    token.chars().count() >= 2 && token.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

fn clean_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_ascii_alphanumeric())
}

/// Runs of capitalized words, excluding a run that starts the sentence
/// (command verbs are capitalized too).
fn capitalized_runs(text: &str) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut runs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut run_start = 0;

    for (index, token) in tokens.iter().enumerate() {
        let cleaned = clean_token(token);
        if is_capitalized_word(cleaned) {
            if current.is_empty() {
                run_start = index;
            }
            current.push(cleaned);
        } else if !current.is_empty() {
            if run_start > 0 {
                runs.push(current.join(" "));
            }
            current.clear();
        }
    }
    if !current.is_empty() && run_start > 0 {
        runs.push(current.join(" "));
    }
    runs
}

fn run_after_marker(text: &str, markers: &[&str]) -> Option<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    for (index, token) in tokens.iter().enumerate() {
        if !markers.contains(&token.to_ascii_lowercase().as_str()) {
            continue;
        }
        let run: Vec<&str> = tokens[index + 1..]
            .iter()
            .map(|follower| clean_token(follower))
            .take_while(|cleaned| is_capitalized_word(cleaned))
            .collect();
        if !run.is_empty() {
            return Some(run.join(" "));
        }
    }
    None
}
