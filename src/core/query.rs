//! Query-string helpers over the current location.
//!
//! Mutations push a new history entry through [`Navigator::push_state`]; the
//! page is never reloaded.

use crate::domain::ports::Navigator;
use crate::utils::error::Result;
use url::Url;

pub fn get_param<N: Navigator + ?Sized>(navigator: &N, name: &str) -> Option<String> {
    navigator
        .location()
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

pub fn set_param<N: Navigator + ?Sized>(navigator: &mut N, name: &str, value: &str) {
    let mut url = navigator.location().clone();
    set_query_param(&mut url, name, value);
    tracing::debug!("Pushing history entry {}", url);
    navigator.push_state(url);
}

pub fn remove_param<N: Navigator + ?Sized>(navigator: &mut N, name: &str) {
    let mut url = navigator.location().clone();
    remove_query_param(&mut url, name);
    tracing::debug!("Pushing history entry {}", url);
    navigator.push_state(url);
}

/// Resolves `base` against `origin` and sets every parameter that has a value.
pub fn build_url(base: &str, origin: &Url, params: &[(&str, Option<&str>)]) -> Result<String> {
    let mut url = origin.join(base)?;
    for (key, value) in params {
        if let Some(value) = value {
            set_query_param(&mut url, key, value);
        }
    }
    Ok(url.to_string())
}

/// 取代第一個同名參數並移除其餘重複者；不存在時附加在最後
pub fn set_query_param(url: &mut Url, name: &str, value: &str) {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;

    for (key, existing) in url.query_pairs() {
        if key == name {
            if !replaced {
                pairs.push((key.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((key.into_owned(), existing.into_owned()));
        }
    }

    if !replaced {
        pairs.push((name.to_string(), value.to_string()));
    }

    write_pairs(url, &pairs);
}

pub fn remove_query_param(url: &mut Url, name: &str) {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    write_pairs(url, &pairs);
}

fn write_pairs(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::history::MemoryHistory;

    #[test]
    fn test_get_param() {
        let url = "https://crm.example/clients?status=new&q=%D0%98%D0%B2%D0%B0%D0%BD";
        let history = MemoryHistory::parse(url).unwrap();
        assert_eq!(get_param(&history, "status").as_deref(), Some("new"));
        assert_eq!(get_param(&history, "q").as_deref(), Some("Иван"));
        assert_eq!(get_param(&history, "page"), None);
    }

    #[test]
    fn test_set_param_replaces_and_appends() {
        let mut history =
            MemoryHistory::parse("https://crm.example/clients?page=1&tag=a&tag=b").unwrap();

        set_param(&mut history, "tag", "vip");
        assert_eq!(history.location().query(), Some("page=1&tag=vip"));

        set_param(&mut history, "sort", "name asc");
        assert_eq!(history.location().query(), Some("page=1&tag=vip&sort=name+asc"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_remove_param_drops_empty_query() {
        let mut history = MemoryHistory::parse("https://crm.example/orders?page=2#top").unwrap();

        remove_param(&mut history, "page");
        assert_eq!(history.location().as_str(), "https://crm.example/orders#top");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_build_url_skips_missing_values() {
        let origin = Url::parse("https://crm.example").unwrap();
        let url = build_url(
            "/api/clients",
            &origin,
            &[("page", Some("2")), ("manager", None), ("q", Some("a&b"))],
        )
        .unwrap();
        assert_eq!(url, "https://crm.example/api/clients?page=2&q=a%26b");
    }

    #[test]
    fn test_build_url_keeps_absolute_base() {
        let origin = Url::parse("https://crm.example").unwrap();
        let url = build_url("https://other.example/x?a=1", &origin, &[("a", Some("2"))]).unwrap();
        assert_eq!(url, "https://other.example/x?a=2");
    }
}
