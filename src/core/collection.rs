//! Slice helpers: de-duplication, grouping, sorting and search over records.

use crate::domain::model::{Record, SortOrder};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Removes duplicates, keeping the first occurrence of each item in order.
pub fn unique<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// 依 key 分組，群組順序為 key 第一次出現的順序
pub fn group_by<T, K, F>(items: &[T], key_fn: F) -> Vec<(K, Vec<T>)>
where
    T: Clone,
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let key = key_fn(item);
        match index.get(&key) {
            Some(&i) => groups[i].1.push(item.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item.clone()]));
            }
        }
    }

    groups
}

/// Groups records by the display form of `field`; records without it land in `"undefined"`.
pub fn group_by_field(records: &[Record], field: &str) -> Vec<(String, Vec<Record>)> {
    group_by(records, |record| match record.get(field) {
        Some(value) => display_value(value),
        None => "undefined".to_string(),
    })
}

/// 穩定排序；遞增時缺少欄位或 null 的紀錄排在最後
pub fn sort_by_field(records: &mut [Record], field: &str, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = compare_values(a.get(field), b.get(field));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Case-insensitive substring search across `fields`; falsy values never match.
pub fn search<'a>(records: &'a [Record], query: &str, fields: &[&str]) -> Vec<&'a Record> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            fields.iter().any(|field| {
                record
                    .get(field)
                    .filter(|value| is_truthy(value))
                    .is_some_and(|value| display_value(value).to_lowercase().contains(&query))
            })
        })
        .collect()
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::Bool(_)) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Array(_)) | Some(Value::Object(_)) => 3,
        Some(Value::Null) | None => 4,
    }
}

/// Total order: values of one kind compare naturally, kinds are ranked by `type_rank`.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

const WHOLE_FLOAT_LIMIT: f64 = 1e21;

/// 與瀏覽器 toString 相同的字串形式
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => display_number(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

// 整數值的浮點數不帶小數點 (1.0 -> "1", -0.0 -> "0")
fn display_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < WHOLE_FLOAT_LIMIT => {
            format!("{:.0}", f)
        }
        _ => n.to_string(),
    }
}
