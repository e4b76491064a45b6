//! Value parsers for command arguments.

use greenfield_tools::{DebtResponse, ValueResponse};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseArg {
    pub name: String,
    pub amount: f64,
    pub essential: bool,
}

fn split_pair(raw: &str) -> Result<(&str, &str), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(format!("expected key=value, got {raw:?}")),
    }
}

/// `key=value`; the value is JSON when it parses as JSON, a string otherwise.
pub fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = split_pair(raw)?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((key.to_owned(), value))
}

/// `name=amount`, or `name=amount!optional` for a non-essential expense.
pub fn parse_expense(raw: &str) -> Result<ExpenseArg, String> {
    let (name, amount) = split_pair(raw)?;
    let (amount, essential) = match amount.strip_suffix("!optional") {
        Some(amount) => (amount, false),
        None => (amount, true),
    };
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid amount for {name}: {e}"))?;
    Ok(ExpenseArg {
        name: name.to_owned(),
        amount,
        essential,
    })
}

/// `question=score`, e.g. `mf1=3`.
pub fn parse_response(raw: &str) -> Result<DebtResponse, String> {
    let (question, score) = split_pair(raw)?;
    let score = score
        .parse::<u8>()
        .map_err(|e| format!("invalid score for {question}: {e}"))?;
    Ok(DebtResponse {
        question_id: question.to_owned(),
        score,
    })
}

/// `question=importance`, e.g. `autonomy_1=5`.
pub fn parse_value_response(raw: &str) -> Result<ValueResponse, String> {
    let (question, importance) = split_pair(raw)?;
    let importance = importance
        .parse::<u8>()
        .map_err(|e| format!("invalid importance for {question}: {e}"))?;
    Ok(ValueResponse {
        question_id: question.to_owned(),
        importance,
    })
}
