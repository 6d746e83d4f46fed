use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// 一筆以欄位名稱索引的 JSON 資料，對應前端常見的 plain object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只接受 JSON 物件，其他型別回傳 None
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(obj) => Some(Self {
                data: obj.into_iter().collect(),
            }),
            _ => None,
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.data.get(field)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// "desc" (不分大小寫) 為遞減，其餘一律遞增
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// In-memory stand-in for a document element.
///
/// Layout metrics (`offset_top`, `offset_height`) are owned by whoever renders
/// the element; the helpers only read them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub class_list: Vec<String>,
    pub text_content: String,
    pub inner_html: String,
    pub style: BTreeMap<String, String>,
    pub offset_top: f64,
    pub offset_height: f64,
}

pub type SharedElement = Arc<Mutex<Element>>;

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            ..Self::default()
        }
    }

    pub fn into_shared(self) -> SharedElement {
        Arc::new(Mutex::new(self))
    }

    pub fn class_name(&self) -> String {
        self.class_list.join(" ")
    }

    pub fn set_class_name(&mut self, value: &str) {
        self.class_list.clear();
        for class in value.split_whitespace() {
            self.add_class(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.class_list.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.class_list.retain(|c| c != class);
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// 未設定的樣式屬性回傳空字串
    pub fn style(&self, property: &str) -> &str {
        self.style.get(property).map(String::as_str).unwrap_or("")
    }

    /// 設為空字串等同移除該樣式
    pub fn set_style(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.style.remove(property);
        } else {
            self.style.insert(property.to_string(), value.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    #[default]
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// 待下載的記憶體內檔案
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub object_url: String,
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Download {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_value() {
        let record = Record::from_value(json!({"id": 1, "name": "Анна"})).unwrap();
        assert_eq!(record.get("id"), Some(&json!(1)));
        assert!(Record::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("whatever"), SortOrder::Asc);
    }

    #[test]
    fn test_element_class_list() {
        let mut element = Element::new("DIV");
        element.set_class_name("card  card--active card");
        assert_eq!(element.tag, "div");
        assert_eq!(element.class_name(), "card card--active");

        element.remove_class("card");
        assert!(!element.has_class("card"));
        assert!(element.has_class("card--active"));
    }

    #[test]
    fn test_element_style_removal() {
        let mut element = Element::new("div");
        element.set_style("height", "10px");
        assert_eq!(element.style("height"), "10px");
        element.set_style("height", "");
        assert_eq!(element.style("height"), "");
        assert!(element.style.is_empty());
    }
}
