//! 后端返回的通用行数据
//!
//! 实体页面不为每种实体定义结构体，而是保留原始 JSON 字段，
//! 再按 `FieldSpec` 决定如何显示和如何回填表单。

use crate::date::{display_date, input_date};
use crate::schema::{FieldKind, FieldSpec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::Display;

/// 表单草稿：字段名 -> 输入框内容
pub type Draft = BTreeMap<String, String>;

/// 记录 ID（后端可能返回字符串或数字，统一为字符串）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub fields: Map<String, Value>,
}

/// 引用对象显示时依次尝试的字段
const LABEL_KEYS: [&str; 4] = ["name", "title", "label", "number"];

impl Record {
    /// 从任意 JSON 行构造；没有 id 的行用位置生成占位 ID
    pub fn from_json(value: Value, index: usize) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        let id = id_of(&fields).unwrap_or_else(|| format!("row-{index}"));
        Record {
            id: RecordId(id),
            fields,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// 列表/卡片中显示的文本
    pub fn display_value(&self, field: &FieldSpec) -> String {
        let Some(value) = self.fields.get(field.key) else {
            return String::new();
        };
        match (&field.kind, value) {
            (FieldKind::Password, _) => String::new(),
            (FieldKind::Date, Value::String(s)) => display_date(s),
            (FieldKind::Select(options), Value::String(s)) => options
                .iter()
                .find(|(v, _)| v == s)
                .map(|(_, label)| label.to_string())
                .unwrap_or_else(|| s.clone()),
            _ => display_json(value),
        }
    }

    /// 回填表单时的文本
    pub fn draft_value(&self, field: &FieldSpec) -> String {
        let Some(value) = self.fields.get(field.key) else {
            return String::new();
        };
        match (&field.kind, value) {
            (FieldKind::Password, _) => String::new(),
            (FieldKind::Date, Value::String(s)) => input_date(s),
            (_, Value::Object(map)) => id_of(map).unwrap_or_default(),
            (_, Value::Null) => String::new(),
            (_, Value::String(s)) => s.clone(),
            (_, other) => other.to_string(),
        }
    }
}

fn id_of(map: &Map<String, Value>) -> Option<String> {
    ["id", "_id"].iter().find_map(|k| match map.get(*k)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// 通用 JSON 值的显示文本
pub fn display_json(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_json)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => LABEL_KEYS
            .iter()
            .find_map(|k| map.get(*k).map(display_json))
            .or_else(|| id_of(map))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const STATUS: &[(&str, &str)] = &[("filed", "Filed")];

    #[test]
    fn test_id_sources() {
        assert_eq!(Record::from_json(json!({"id": 7}), 0).id.0, "7");
        assert_eq!(Record::from_json(json!({"_id": "abc"}), 0).id.0, "abc");
        assert_eq!(Record::from_json(json!({"name": "x"}), 3).id.0, "row-3");
    }

    #[test]
    fn test_display_rules() {
        let r = Record::from_json(
            json!({
                "id": 1,
                "active": true,
                "customer": {"_id": "c1", "name": "Acme"},
                "classes": [3, 5],
                "filed_on": "2024-01-05T00:00:00Z",
                "status": "filed",
                "note": null
            }),
            0,
        );
        assert_eq!(display_json(r.get("active").unwrap()), "Yes");
        assert_eq!(r.display_value(&FieldSpec::text("customer", "Customer")), "Acme");
        assert_eq!(r.display_value(&FieldSpec::text("classes", "Classes")), "3, 5");
        assert_eq!(r.display_value(&FieldSpec::date("filed_on", "Filed")), "05 Jan 2024");
        assert_eq!(
            r.display_value(&FieldSpec::new("status", "Status", FieldKind::Select(STATUS))),
            "Filed"
        );
        assert_eq!(r.display_value(&FieldSpec::text("note", "Note")), "");
        assert_eq!(r.display_value(&FieldSpec::text("missing", "Missing")), "");
    }

    #[test]
    fn test_draft_rules() {
        let r = Record::from_json(
            json!({
                "customer": {"_id": "c1", "name": "Acme"},
                "filed_on": "2024-01-05T00:00:00Z",
                "class_no": 25,
                "password": "hash"
            }),
            0,
        );
        assert_eq!(r.draft_value(&FieldSpec::text("customer", "Customer")), "c1");
        assert_eq!(r.draft_value(&FieldSpec::date("filed_on", "Filed")), "2024-01-05");
        assert_eq!(r.draft_value(&FieldSpec::text("class_no", "Class")), "25");
        assert_eq!(
            r.draft_value(&FieldSpec::new("password", "Password", FieldKind::Password)),
            ""
        );
    }
}
