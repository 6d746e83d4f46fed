use crate::utils::error::{HelperError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static FLOAT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|\d+\.?\d*(?:[eE][+-]?\d+)?|\.\d+(?:[eE][+-]?\d+)?)")
        .expect("float prefix pattern")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn is_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 俄羅斯格式：去除非數字後為 10 或 11 位
pub fn is_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (10..=11).contains(&digits)
}

/// null、空字串、空陣列、空物件皆視為空值
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// The whole (trimmed) input must be numeric, `Infinity` included.
pub fn is_number(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }

    match trimmed.parse::<f64>() {
        Ok(n) if n.is_nan() => false,
        Ok(n) if n.is_infinite() => trimmed.trim_start_matches(['+', '-']) == "Infinity",
        Ok(_) => true,
        Err(_) => false,
    }
}

/// Parses the longest numeric prefix, ignoring leading whitespace and trailing garbage.
pub fn parse_float_prefix(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let matched = FLOAT_PREFIX_RE.find(trimmed)?.as_str();

    match matched.trim_start_matches(['+', '-']) {
        "Infinity" if matched.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => matched.parse().ok(),
    }
}

pub fn in_range(value: &str, min: f64, max: f64) -> bool {
    parse_float_prefix(value).is_some_and(|n| n >= min && n <= max)
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HelperError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HelperError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HelperError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(HelperError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_currency_code(field_name: &str, code: &str) -> Result<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(HelperError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: code.to_string(),
            reason: "Currency must be a three-letter ISO 4217 code, e.g. RUB".to_string(),
        });
    }
    Ok(())
}

pub fn validate_date_pattern(field_name: &str, pattern: &str) -> Result<()> {
    const TOKENS: [&str; 5] = ["dd", "MM", "yyyy", "HH", "mm"];

    if !TOKENS.iter().any(|token| pattern.contains(token)) {
        return Err(HelperError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: pattern.to_string(),
            reason: format!("Pattern must contain at least one of: {}", TOKENS.join(", ")),
        });
    }
    Ok(())
}
