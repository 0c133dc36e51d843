//! Parse LLM output into candidate rules

use crate::error::ExtractorError;
use rulesmith_domain::Rule;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Parse an LLM response into candidate rules
///
/// Never fails: a response [`try_parse_llm_response`] rejects yields no rules.
pub fn parse_llm_response(response: &str) -> Vec<Rule> {
    match try_parse_llm_response(response) {
        Ok(rules) => rules,
        Err(e) => {
            warn!("No rules recovered: {}", e);
            Vec::new()
        }
    }
}

/// Parse an LLM response, reporting responses that carry no rule list
///
/// Tries a strict JSON parse of the whole response first, then of the span
/// from the first `{` to the last `}` (models like to wrap JSON in prose or
/// markdown fences). A response that is not JSON, or whose JSON has no
/// `rules` array, is an `ExtractorError::JsonParse`. An empty `rules` array
/// is a valid answer.
pub fn try_parse_llm_response(response: &str) -> Result<Vec<Rule>, ExtractorError> {
    let json = extract_json(response).ok_or_else(|| {
        ExtractorError::JsonParse(format!("response is not JSON ({} chars)", response.len()))
    })?;

    let entries = json.get("rules").and_then(Value::as_array).ok_or_else(|| {
        ExtractorError::JsonParse("response JSON has no \"rules\" array".to_string())
    })?;

    let mut rules = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match entry.as_object() {
            Some(obj) => rules.push(parse_rule_json(obj)),
            None => warn!("Rule entry {} is not a JSON object, skipping", idx),
        }
    }

    debug!("Parsed {} candidate rules", rules.len());
    Ok(rules)
}

/// Recover a JSON value from a response, trying strict then brace-span parsing
fn extract_json(response: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(response) {
        return Some(value);
    }

    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }

    serde_json::from_str(&response[start..=end]).ok()
}

/// Build a rule from a JSON object, tolerating missing or non-string fields
fn parse_rule_json(obj: &Map<String, Value>) -> Rule {
    Rule {
        rule_id: field_text(obj, "rule_id"),
        rule: field_text(obj, "rule"),
        suggested_fix: field_text(obj, "suggested_fix"),
    }
}

fn field_text(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
