//! 会话记录
//!
//! 登录时写入 LocalStorage，守卫、侧边栏和权限检查读取，登出时整体清除。

use crate::role::Portal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// 登录用户的详细信息（`authUser` 键，JSON 存储）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthUser {
    /// 权限开关；缺失与空表含义不同，见 `Session::can`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<BTreeMap<String, bool>>,
    /// 其余字段原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 本地会话记录
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: String,
    pub user_name: String,
    pub auth_user: Option<AuthUser>,
    pub user_id: Option<String>,
}

impl Session {
    /// 会话角色所属门户（未知角色返回 None）
    pub fn portal(&self) -> Option<Portal> {
        Portal::for_role(&self.role)
    }

    /// 权限检查
    ///
    /// 权限表存在时只有显式为 true 的键才放行；
    /// 管理员账号没有权限表时视为超级管理员。
    pub fn can(&self, permission: &str) -> bool {
        match self.auth_user.as_ref().and_then(|u| u.permissions.as_ref()) {
            Some(map) => map.get(permission).copied().unwrap_or(false),
            None => self.portal() == Some(Portal::Admin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(role: &str, auth_user: Option<AuthUser>) -> Session {
        Session {
            token: "t".into(),
            role: role.into(),
            user_name: "Asha".into(),
            auth_user,
            user_id: None,
        }
    }

    #[test]
    fn test_auth_user_keeps_extra_fields() {
        let user: AuthUser = serde_json::from_value(json!({
            "email": "a@b.c",
            "permissions": { "customers": true, "agents": false }
        }))
        .unwrap();
        assert_eq!(user.extra.get("email"), Some(&json!("a@b.c")));
        let perms = user.permissions.as_ref().unwrap();
        assert_eq!(perms.get("customers"), Some(&true));
    }

    #[test]
    fn test_can_with_permission_map() {
        let user: AuthUser =
            serde_json::from_value(json!({ "permissions": { "customers": true, "agents": false } }))
                .unwrap();
        let s = session("admin", Some(user));
        assert!(s.can("customers"));
        assert!(!s.can("agents"));
        assert!(!s.can("journals"));
    }

    #[test]
    fn test_can_without_permission_map() {
        assert!(session("admin", None).can("anything"));
        assert!(!session("agent", None).can("anything"));
        assert!(!session("user", Some(AuthUser::default())).can("anything"));
    }
}
