//! 视口宽度
//!
//! 监听 `resize`，组件卸载时自动移除监听器。

use leptos::ev;
use leptos::prelude::*;
use tm_portal::AppConfig;

fn current_width() -> f64 {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

/// 当前视口宽度（像素）
pub fn use_viewport_width() -> ReadSignal<f64> {
    let (width, set_width) = signal(current_width());
    let handle = window_event_listener(ev::resize, move |_| set_width.set(current_width()));
    on_cleanup(move || handle.remove());
    width
}

/// 是否处于移动端布局
pub fn use_is_mobile() -> Signal<bool> {
    let config = expect_context::<AppConfig>();
    let width = use_viewport_width();
    Signal::derive(move || config.is_mobile(width.get()))
}
