//! 通知提示
//!
//! 每条通知有独立的 uuid，到期后按 id 移除，互不影响。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use tm_portal::{Notice, NoticeLevel, PortalError};
use uuid::Uuid;

#[derive(Clone, Copy)]
pub struct ToastContext {
    notices: RwSignal<Vec<Notice>>,
    timeout_ms: u32,
}

impl ToastContext {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            timeout_ms,
        }
    }

    pub fn push(&self, notice: Notice) {
        let id = notice.id;
        let notices = self.notices;
        notices.update(|list| list.push(notice));
        Timeout::new(self.timeout_ms, move || {
            notices.try_update(|list| list.retain(|n| n.id != id));
        })
        .forget();
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Notice::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Notice::error(message));
    }

    /// 记录完整错误链，界面只显示用户可读的消息
    pub fn report(&self, err: &PortalError) {
        log::error!("{}", err);
        self.push(Notice::from_error(err));
    }

    fn dismiss(&self, id: Uuid) {
        self.notices.update(|list| list.retain(|n| n.id != id));
    }
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toast = use_toast();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toast.notices.get()
                key=|n| n.id
                children=move |notice| {
                    let id = notice.id;
                    let class = match notice.level {
                        NoticeLevel::Success => "alert alert-success shadow-lg",
                        NoticeLevel::Info => "alert alert-info shadow-lg",
                        NoticeLevel::Error => "alert alert-error shadow-lg",
                    };
                    view! {
                        <div role="alert" class=class on:click=move |_| toast.dismiss(id)>
                            <span>{notice.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
