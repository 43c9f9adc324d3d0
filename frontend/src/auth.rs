//! 认证模块
//!
//! 会话只保存在 LocalStorage 中，这里不缓存副本。
//! `version` 信号在登录/注销后递增，让读取会话的守卫和布局重新计算。

use crate::web::{BrowserStorage, FetchClient};
use leptos::prelude::*;
use std::rc::Rc;
use tm_portal::shared::Session;
use tm_portal::{AppConfig, SessionRepository, TmApi};

/// 浏览器端的 API 客户端
pub type PortalApi = TmApi<FetchClient>;

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    version: RwSignal<u64>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self {
            version: RwSignal::new(0),
        }
    }

    /// 当前会话（响应式）
    pub fn session(&self) -> Option<Session> {
        self.version.track();
        repository().load()
    }

    /// 存储中的会话已变化
    pub fn refresh(&self) {
        self.version.update(|v| *v += 1);
    }

    /// 注销：清除全部会话键，不请求后端
    pub fn logout(&self) {
        repository().clear();
        self.refresh();
        log::info!("signed out");
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

pub fn repository() -> SessionRepository<BrowserStorage> {
    SessionRepository::new(BrowserStorage)
}

/// 使用当前会话的 token 构造 API 客户端
pub fn use_api() -> Rc<PortalApi> {
    let config = use_context::<AppConfig>().expect("AppConfig should be provided");
    let token = repository().load().map(|s| s.token);
    Rc::new(TmApi::new(FetchClient, &config.api_base_url, token))
}
