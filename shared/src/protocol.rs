use crate::session::AuthUser;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::BTreeMap;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// 固定端点的请求/响应关系
///
/// 响应可能被 `{data: ...}` 包裹，解码前由客户端统一拆封。
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// 实际请求路径（路径中带参数的请求覆盖此方法）
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

/// 后端的通用确认响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
}

// =========================================================
// 认证
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录响应，兼容几种字段命名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoginResponse")]
pub struct LoginResponse {
    pub token: String,
    pub role: Option<String>,
    pub user_name: Option<String>,
    pub user: Option<AuthUser>,
    pub user_id: Option<Value>,
}

/// 同一含义可能同时以多个键出现，逐个接收后取第一个非空值
#[derive(Deserialize)]
struct RawLoginResponse {
    token: Option<String>,
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
    role: Option<String>,
    user_name: Option<String>,
    #[serde(rename = "userName")]
    user_name_camel: Option<String>,
    username: Option<String>,
    name: Option<String>,
    user: Option<AuthUser>,
    #[serde(rename = "authUser")]
    auth_user: Option<AuthUser>,
    user_id: Option<Value>,
    #[serde(rename = "userId")]
    user_id_camel: Option<Value>,
}

impl TryFrom<RawLoginResponse> for LoginResponse {
    type Error = String;

    fn try_from(raw: RawLoginResponse) -> Result<Self, Self::Error> {
        let token = first_text([raw.token, raw.access_token])
            .ok_or_else(|| "missing field `token`".to_string())?;
        Ok(Self {
            token,
            role: raw.role,
            user_name: first_text([raw.user_name, raw.user_name_camel, raw.username, raw.name]),
            user: raw.user.or(raw.auth_user),
            user_id: [raw.user_id, raw.user_id_camel]
                .into_iter()
                .flatten()
                .find(|v| !v.is_null()),
        })
    }
}

fn first_text<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}

/// 分组键可能是字符串、数字或 null
fn label_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/api/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ApiRequest for ForgotPasswordRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/api/auth/forgot-password";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// 邮件链接中的一次性令牌，放在路径上
    #[serde(skip)]
    pub token: String,
    pub password: String,
}

impl ApiRequest for ResetPasswordRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/api/auth/reset-password";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!(
            "{}/{}",
            Self::PATH,
            utf8_percent_encode(&self.token, NON_ALPHANUMERIC)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ApiRequest for ChangePasswordRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/api/auth/change-password";
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// 期刊比对
// =========================================================

/// 名称匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    #[default]
    Exact,
    Prefix,
    Suffix,
    Contains,
}

impl MatchType {
    pub const ALL: [MatchType; 4] = [
        MatchType::Exact,
        MatchType::Prefix,
        MatchType::Suffix,
        MatchType::Contains,
    ];

    /// 是否需要字符数
    pub fn needs_char_count(&self) -> bool {
        matches!(self, MatchType::Prefix | MatchType::Suffix)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Prefix => "prefix",
            MatchType::Suffix => "suffix",
            MatchType::Contains => "contains",
        }
    }

    pub fn parse(raw: &str) -> Option<MatchType> {
        Self::ALL.into_iter().find(|m| m.as_str() == raw)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchType::Exact => "Exact",
            MatchType::Prefix => "Starts with",
            MatchType::Suffix => "Ends with",
            MatchType::Contains => "Contains",
        }
    }
}

/// 比对来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// 客户已有商标 vs 指定期刊
    CustomerMarks,
    /// 手工输入的商标 vs 指定期刊
    ManualAgainstJournal,
    /// 手工输入的商标 vs 全部期刊
    ManualAll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalSearchRequest {
    pub mode: SearchMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub match_type: MatchType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_count: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_no: Option<u8>,
}

impl ApiRequest for JournalSearchRequest {
    /// 结果行格式随后端变化，保留为通用 JSON，按结果 schema 渲染
    type Response = Value;
    const PATH: &'static str = "/api/journals/compare";
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// 仪表盘
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMonthlyRow")]
pub struct MonthlyRow {
    pub year: i32,
    /// 1..=12
    pub month: u32,
    pub count: u64,
}

#[derive(Deserialize)]
struct RawMonthlyRow {
    year: Option<i32>,
    #[serde(rename = "_year")]
    underscore_year: Option<i32>,
    month: Option<u32>,
    #[serde(rename = "_month")]
    underscore_month: Option<u32>,
    count: Option<u64>,
    total: Option<u64>,
}

impl TryFrom<RawMonthlyRow> for MonthlyRow {
    type Error = String;

    fn try_from(raw: RawMonthlyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            year: raw
                .year
                .or(raw.underscore_year)
                .ok_or_else(|| "missing field `year`".to_string())?,
            month: raw
                .month
                .or(raw.underscore_month)
                .ok_or_else(|| "missing field `month`".to_string())?,
            count: raw.count.or(raw.total).unwrap_or(0),
        })
    }
}

pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCategoryCount")]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

#[derive(Deserialize)]
struct RawCategoryCount {
    #[serde(rename = "_id", default)]
    id: Value,
    #[serde(default)]
    status: Value,
    #[serde(default)]
    name: Value,
    #[serde(default)]
    label: Value,
    count: Option<u64>,
    total: Option<u64>,
}

impl From<RawCategoryCount> for CategoryCount {
    fn from(raw: RawCategoryCount) -> Self {
        let label = [raw.label, raw.id, raw.status, raw.name]
            .into_iter()
            .find_map(label_text)
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
        Self {
            label,
            count: raw.count.or(raw.total).unwrap_or(0),
        }
    }
}

/// 仪表盘聚合数据（各门户共用，缺失部分为空）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default, alias = "totals")]
    pub counts: BTreeMap<String, u64>,
    #[serde(default, alias = "monthlyApplications")]
    pub monthly: Vec<MonthlyRow>,
    #[serde(default, alias = "statusBreakdown", alias = "byStatus")]
    pub by_status: Vec<CategoryCount>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reset_path_carries_token() {
        let req = ResetPasswordRequest {
            token: "abc".into(),
            password: "x".into(),
        };
        assert_eq!(req.path(), "/api/auth/reset-password/abc");
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"password": "x"}));
    }

    #[test]
    fn test_reset_path_encodes_token() {
        let req = ResetPasswordRequest {
            token: "a/b?c=d e".into(),
            password: "x".into(),
        };
        assert_eq!(req.path(), "/api/auth/reset-password/a%2Fb%3Fc%3Dd%20e");
    }

    #[test]
    fn test_login_response_accepts_repeated_keys() {
        let res: LoginResponse = serde_json::from_value(json!({
            "token": "",
            "accessToken": "t2",
            "role": "admin",
            "user_name": null,
            "userName": "Ravi",
            "name": "Ravi K",
            "user_id": null,
            "userId": "u1"
        }))
        .unwrap();
        assert_eq!(res.token, "t2");
        assert_eq!(res.user_name.as_deref(), Some("Ravi"));
        assert_eq!(res.user_id, Some(json!("u1")));

        let missing = serde_json::from_value::<LoginResponse>(json!({"role": "admin"}));
        assert!(missing.is_err());
    }

    #[test]
    fn test_category_count_with_several_label_keys() {
        let rows: Vec<CategoryCount> = serde_json::from_value(json!([
            {"_id": "filed", "status": "Filed", "count": 4},
            {"_id": null, "status": "objected", "total": 2},
            {"_id": null}
        ]))
        .unwrap();
        assert_eq!(rows[0].label, "filed");
        assert_eq!(rows[0].count, 4);
        assert_eq!(rows[1].label, "objected");
        assert_eq!(rows[1].count, 2);
        assert_eq!(rows[2].label, UNKNOWN_CATEGORY);
        assert_eq!(rows[2].count, 0);
    }

    #[test]
    fn test_monthly_row_with_both_key_styles() {
        let row: MonthlyRow =
            serde_json::from_value(json!({"_year": 2024, "year": 2024, "_month": 3, "total": 7}))
                .unwrap();
        assert_eq!((row.year, row.month, row.count), (2024, 3, 7));
    }

    #[test]
    fn test_login_response_aliases() {
        let res: LoginResponse = serde_json::from_value(json!({
            "token": "t",
            "role": "agent",
            "userName": "Ravi",
            "authUser": {"permissions": {"x": true}},
            "userId": 42
        }))
        .unwrap();
        assert_eq!(res.user_name.as_deref(), Some("Ravi"));
        assert!(res.user.unwrap().permissions.is_some());
        assert_eq!(res.user_id, Some(json!(42)));
    }

    #[test]
    fn test_search_request_omits_empty() {
        let req = JournalSearchRequest {
            mode: SearchMode::ManualAll,
            journal_no: None,
            customer_id: None,
            text: Some("LOTUS".into()),
            match_type: MatchType::Prefix,
            char_count: Some(3),
            class_no: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"mode": "manual_all", "text": "LOTUS", "match_type": "prefix", "char_count": 3})
        );
    }

    #[test]
    fn test_dashboard_defaults() {
        let summary: DashboardSummary = serde_json::from_value(json!({
            "counts": {"customers": 4},
            "monthly": [{"_year": 2024, "_month": 2, "total": 9}]
        }))
        .unwrap();
        assert_eq!(summary.counts.get("customers"), Some(&4));
        assert_eq!(summary.monthly[0].count, 9);
        assert!(summary.by_status.is_empty());
    }
}
