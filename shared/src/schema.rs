//! 实体页面字段描述
//!
//! 约七十个 CRUD/报表页面只在字段上有差异，
//! 每个页面由一个静态的 `ResourceSchema` 描述：端点、表单字段、筛选字段、
//! 可执行的操作以及是否携带附件。

use crate::record::{Draft, Record, RecordId};
use serde_json::{Map, Number, Value};

/// 引用字段的选项来源
#[derive(Debug, PartialEq, Eq)]
pub struct LookupSpec {
    /// 选项列表端点
    pub endpoint: &'static str,
    /// 选项显示用的字段
    pub label_key: &'static str,
}

/// 字段输入类型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Number,
    Date,
    TextArea,
    /// 仅创建时必填，编辑时留空表示不修改
    Password,
    /// 固定选项 (value, label)
    Select(&'static [(&'static str, &'static str)]),
    /// 从其它实体加载的选项
    Lookup(&'static LookupSpec),
}

impl FieldKind {
    /// 对应的 `<input type>`
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Phone => "tel",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Password => "password",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// 是否作为表格列 / 卡片行显示
    pub list_column: bool,
    /// 是否出现在新增 / 编辑表单中
    pub form_field: bool,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            list_column: true,
            form_field: true,
        }
    }

    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub const fn date(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Date)
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// 只出现在表单中，不进入列表
    pub const fn form_only(self) -> Self {
        Self {
            list_column: false,
            ..self
        }
    }

    /// 只在列表中显示，由服务端维护（如上传时间）
    pub const fn list_only(self) -> Self {
        Self {
            form_field: false,
            ..self
        }
    }

    /// 编辑已有记录时是否必填
    pub fn is_required(&self, editing: bool) -> bool {
        match self.kind {
            FieldKind::Password => self.required && !editing,
            _ => self.required,
        }
    }
}

/// 页面允许的写操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl Capabilities {
    pub const FULL: Self = Self {
        create: true,
        update: true,
        delete: true,
    };
    pub const READ_ONLY: Self = Self {
        create: false,
        update: false,
        delete: false,
    };
    /// 只能上传与删除（如客户门户的文档）
    pub const UPLOAD_ONLY: Self = Self {
        create: true,
        update: false,
        delete: true,
    };
}

/// 附件配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentSpec {
    /// multipart 中文件部分的字段名
    pub field: &'static str,
    /// `<input accept>`
    pub accept: &'static str,
    pub required_on_create: bool,
    /// 行上是否提供下载
    pub downloadable: bool,
}

/// 用户选择的本地文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// 一个实体页面的完整描述
#[derive(Debug, PartialEq)]
pub struct ResourceSchema {
    /// 路由段，如 "customers"
    pub key: &'static str,
    pub title: &'static str,
    /// 集合端点，如 "/api/customers"
    pub endpoint: &'static str,
    pub fields: &'static [FieldSpec],
    pub filters: &'static [FieldSpec],
    pub capabilities: Capabilities,
    pub attachment: Option<AttachmentSpec>,
}

impl ResourceSchema {
    pub fn is_read_only(&self) -> bool {
        let c = self.capabilities;
        !c.create && !c.update
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn list_columns(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.list_column)
    }

    pub fn form_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.form_field)
    }

    pub fn item_path(&self, id: &RecordId) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    pub fn download_path(&self, id: &RecordId) -> Option<String> {
        self.attachment
            .filter(|a| a.downloadable)
            .map(|_| format!("{}/download", self.item_path(id)))
    }

    /// 所有表单字段为空的草稿
    pub fn empty_draft(&self) -> Draft {
        self.form_fields()
            .map(|f| (f.key.to_string(), String::new()))
            .collect()
    }

    pub fn empty_filters(&self) -> Draft {
        self.filters
            .iter()
            .map(|f| (f.key.to_string(), String::new()))
            .collect()
    }

    /// 从已有记录生成编辑草稿：键集合恰好等于表单字段
    pub fn draft_from(&self, record: &Record) -> Draft {
        self.form_fields()
            .map(|f| (f.key.to_string(), record.draft_value(f)))
            .collect()
    }

    /// 草稿转请求体
    ///
    /// 数字字段尽量转为 JSON 数字；空的可选字段为 null；
    /// 非必填的空密码不发送（编辑时表示不修改）。
    pub fn payload(&self, draft: &Draft, editing: bool) -> Map<String, Value> {
        let mut body = Map::new();
        for field in self.form_fields() {
            let raw = draft.get(field.key).map(|s| s.trim()).unwrap_or("");
            if field.kind == FieldKind::Password && raw.is_empty() && !field.is_required(editing) {
                continue;
            }
            let value = if raw.is_empty() {
                Value::Null
            } else if field.kind == FieldKind::Number {
                number_value(raw).unwrap_or_else(|| Value::String(raw.to_string()))
            } else {
                Value::String(raw.to_string())
            };
            body.insert(field.key.to_string(), value);
        }
        body
    }

    /// multipart 文本部分：null 不发送，其余按字符串发送
    pub fn multipart_fields(&self, draft: &Draft, editing: bool) -> Vec<(String, String)> {
        self.payload(draft, editing)
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::Null => None,
                Value::String(s) => Some((k, s)),
                other => Some((k, other.to_string())),
            })
            .collect()
    }

    /// 非空筛选条件
    pub fn active_filters(&self, filters: &Draft) -> Vec<(String, String)> {
        self.filters
            .iter()
            .filter_map(|f| {
                let v = filters.get(f.key)?.trim();
                (!v.is_empty()).then(|| (f.key.to_string(), v.to_string()))
            })
            .collect()
    }
}

fn number_value(raw: &str) -> Option<Value> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(Value::Number(i.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const STATUS_OPTIONS: &[(&str, &str)] = &[("filed", "Filed"), ("registered", "Registered")];

    static SAMPLE: ResourceSchema = ResourceSchema {
        key: "samples",
        title: "Samples",
        endpoint: "/api/samples",
        fields: &[
            FieldSpec::text("name", "Name").required(),
            FieldSpec::new("class_no", "Class", FieldKind::Number),
            FieldSpec::new("status", "Status", FieldKind::Select(STATUS_OPTIONS)),
            FieldSpec::new("password", "Password", FieldKind::Password)
                .required()
                .form_only(),
        ],
        filters: &[FieldSpec::text("name", "Name")],
        capabilities: Capabilities::FULL,
        attachment: None,
    };

    #[test]
    fn test_payload_types() {
        let mut draft = SAMPLE.empty_draft();
        draft.insert("name".into(), " Lotus ".into());
        draft.insert("class_no".into(), "25".into());
        draft.insert("password".into(), "Secret#123".into());
        let body = SAMPLE.payload(&draft, false);
        assert_eq!(body.get("name"), Some(&json!("Lotus")));
        assert_eq!(body.get("class_no"), Some(&json!(25)));
        assert_eq!(body.get("status"), Some(&Value::Null));
        assert_eq!(body.get("password"), Some(&json!("Secret#123")));
    }

    #[test]
    fn test_payload_skips_blank_password_only_when_editing() {
        let draft = SAMPLE.empty_draft();
        assert!(!SAMPLE.payload(&draft, true).contains_key("password"));
        assert_eq!(SAMPLE.payload(&draft, false).get("password"), Some(&Value::Null));
    }

    #[test]
    fn test_list_only_field_stays_out_of_form() {
        static STAMPED: ResourceSchema = ResourceSchema {
            key: "stamped",
            title: "Stamped",
            endpoint: "/api/stamped",
            fields: &[
                FieldSpec::text("title", "Title").required(),
                FieldSpec::date("createdAt", "Uploaded").list_only(),
            ],
            filters: &[],
            capabilities: Capabilities::FULL,
            attachment: None,
        };
        assert_eq!(STAMPED.form_fields().map(|f| f.key).collect::<Vec<_>>(), vec!["title"]);
        assert_eq!(STAMPED.list_columns().count(), 2);

        let mut draft = STAMPED.empty_draft();
        assert!(!draft.contains_key("createdAt"));
        draft.insert("createdAt".into(), "2024-01-05".into());
        assert!(!STAMPED.payload(&draft, false).contains_key("createdAt"));
    }

    #[test]
    fn test_password_required_only_on_create() {
        let pw = SAMPLE.field("password").unwrap();
        assert!(pw.is_required(false));
        assert!(!pw.is_required(true));
    }

    #[test]
    fn test_active_filters_skip_blank() {
        let mut filters = SAMPLE.empty_filters();
        assert!(SAMPLE.active_filters(&filters).is_empty());
        filters.insert("name".into(), "lot".into());
        assert_eq!(
            SAMPLE.active_filters(&filters),
            vec![("name".to_string(), "lot".to_string())]
        );
    }

    #[test]
    fn test_list_columns_exclude_form_only() {
        let keys: Vec<_> = SAMPLE.list_columns().map(|f| f.key).collect();
        assert_eq!(keys, vec!["name", "class_no", "status"]);
    }
}
