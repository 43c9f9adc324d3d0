//! 商标管理门户共享类型
//!
//! 前端与核心客户端共用的领域模型：
//! - `role`: 角色词汇表（各门户接受的角色名集中在此）
//! - `session`: 本地持久化的会话记录
//! - `schema`: 各实体页面的字段描述
//! - `catalog`: 各门户的实体页面目录
//! - `record`: 后端返回的通用行数据
//! - `protocol`: 固定端点的请求/响应定义
//! - `date`: 日期显示格式

pub mod catalog;
pub mod date;
pub mod protocol;
pub mod record;
pub mod role;
pub mod schema;
pub mod session;

pub use record::{Draft, Record, RecordId};
pub use role::Portal;
pub use schema::{
    Attachment, AttachmentSpec, Capabilities, FieldKind, FieldSpec, LookupSpec, ResourceSchema,
};
pub use session::{AuthUser, Session};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中会话记录使用的键
pub const STORAGE_TOKEN_KEY: &str = "token";
pub const STORAGE_ROLE_KEY: &str = "role";
pub const STORAGE_USER_NAME_KEY: &str = "userName";
pub const STORAGE_AUTH_USER_KEY: &str = "authUser";
pub const STORAGE_USER_ID_KEY: &str = "userId";

/// 登出时需要清除的全部键
pub const SESSION_KEYS: [&str; 5] = [
    STORAGE_TOKEN_KEY,
    STORAGE_ROLE_KEY,
    STORAGE_USER_NAME_KEY,
    STORAGE_AUTH_USER_KEY,
    STORAGE_USER_ID_KEY,
];

pub const HEADER_AUTHORIZATION: &str = "Authorization";

pub const LOGIN_PATH: &str = "/login";
