//! 角色词汇表
//!
//! 三个门户各自接受的角色名只在这里定义一次，
//! 路由守卫和布局的二次检查都通过 `Portal::accepts` 判断。

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 门户（对应 `/admin`、`/user`、`/agent` 三棵受保护的路由树）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portal {
    Admin,
    User,
    Agent,
}

/// Admin 只接受精确的 "admin"
const ADMIN_ROLES: &[&str] = &["admin"];
/// User 门户历史上接受多个别名（大小写变体与旧的 customer/CLIENT 命名）
const USER_ROLES: &[&str] = &["user", "User", "customer", "CLIENT"];
const AGENT_ROLES: &[&str] = &["agent"];

impl Portal {
    pub const ALL: [Portal; 3] = [Portal::Admin, Portal::User, Portal::Agent];

    /// 该门户接受的角色名集合
    pub fn accepted_roles(&self) -> &'static [&'static str] {
        match self {
            Portal::Admin => ADMIN_ROLES,
            Portal::User => USER_ROLES,
            Portal::Agent => AGENT_ROLES,
        }
    }

    /// 角色名是否属于该门户（大小写敏感，与各别名逐一比较）
    pub fn accepts(&self, role: &str) -> bool {
        self.accepted_roles().contains(&role)
    }

    /// 根据会话中的角色名找到所属门户
    pub fn for_role(role: &str) -> Option<Portal> {
        Self::ALL.into_iter().find(|p| p.accepts(role))
    }

    /// 路由前缀
    pub fn prefix(&self) -> &'static str {
        match self {
            Portal::Admin => "/admin",
            Portal::User => "/user",
            Portal::Agent => "/agent",
        }
    }

    /// 登录成功后的落地页
    pub fn home_path(&self) -> String {
        format!("{}/dashboard", self.prefix())
    }

    pub fn title(&self) -> &'static str {
        match self {
            Portal::Admin => "Admin",
            Portal::User => "Client",
            Portal::Agent => "Agent",
        }
    }
}

impl Display for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_exact_match_only() {
        assert!(Portal::Admin.accepts("admin"));
        assert!(!Portal::Admin.accepts("Admin"));
        assert!(!Portal::Admin.accepts("user"));
    }

    #[test]
    fn test_user_aliases() {
        for role in ["user", "User", "customer", "CLIENT"] {
            assert!(Portal::User.accepts(role), "{role} should be accepted");
            assert_eq!(Portal::for_role(role), Some(Portal::User));
        }
        assert!(!Portal::User.accepts("client"));
        assert!(!Portal::User.accepts("agent"));
    }

    #[test]
    fn test_for_role_unknown() {
        assert_eq!(Portal::for_role("superuser"), None);
        assert_eq!(Portal::for_role(""), None);
        assert_eq!(Portal::for_role("agent"), Some(Portal::Agent));
    }

    #[test]
    fn test_home_path() {
        assert_eq!(Portal::Agent.home_path(), "/agent/dashboard");
    }
}
