//! 浏览器 API 适配层
//!
//! 核心库只依赖 trait，这里给出浏览器端实现：
//! - `http`: gloo-net 实现的 `HttpClient`
//! - `storage`: gloo-storage 实现的 `SessionStore`
//! - `files`: 文件读取与 Blob 下载
//! - `viewport`: 视口宽度信号

mod files;
mod http;
mod storage;
mod viewport;

pub use files::{read_attachment, save_file};
pub use http::FetchClient;
pub use storage::BrowserStorage;
pub use viewport::use_is_mobile;

use leptos::prelude::document;
use tm_portal::AppConfig;
use tm_portal::config::KEY_API_BASE_URL;

/// 编译期指定的后端地址（`TM_PORTAL_API_BASE_URL=... trunk build`）
const BUILD_API_BASE_URL: Option<&str> = option_env!("TM_PORTAL_API_BASE_URL");

/// 读取 `<meta name="tm-portal:{key}" content="...">`
fn meta_content(key: &str) -> Option<String> {
    document()
        .query_selector(&format!("meta[name=\"tm-portal:{key}\"]"))
        .ok()
        .flatten()?
        .get_attribute("content")
        .filter(|v| !v.trim().is_empty())
}

/// 运行时配置：meta 标签优先，其次是编译期环境变量，最后是默认值
pub fn load_config() -> AppConfig {
    let config = AppConfig::from_lookup(|key| {
        meta_content(key).or_else(|| {
            (key == KEY_API_BASE_URL)
                .then_some(BUILD_API_BASE_URL)
                .flatten()
                .map(str::to_string)
        })
    });
    log::info!("api base url: {}", config.api_base_url);
    config
}
