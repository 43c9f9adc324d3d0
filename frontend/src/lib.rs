//! 商标管理门户前端
//!
//! Context-Driven 架构：
//! - `web`: 浏览器 API 适配（fetch / LocalStorage / 文件 / 视口）
//! - `auth`: 会话上下文
//! - `components`: 守卫、布局与页面
//!
//! 状态机、校验与数据整形都在 `tm-portal` 核心库中。

mod auth;
mod components {
    pub mod chart;
    pub mod confirm_dialog;
    pub mod crud_page;
    pub mod dashboard;
    pub mod guard;
    pub mod header;
    pub mod journal_search;
    pub mod layout;
    pub mod login;
    pub mod password;
    pub mod records_view;
    pub mod sidebar;
    pub mod toast;
}
mod serde_helper;
mod web;

use crate::auth::{AuthContext, use_auth};
use crate::components::crud_page::ResourcePage;
use crate::components::dashboard::DashboardPage;
use crate::components::journal_search::JournalSearchPage;
use crate::components::layout::PortalShell;
use crate::components::login::LoginPage;
use crate::components::password::{ChangePasswordPage, ForgotPasswordPage, ResetPasswordPage};
use crate::components::toast::{ToastContext, ToastHost};

use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::path;
use tm_portal::access::landing_path;
use tm_portal::shared::protocol::SearchMode;
use tm_portal::shared::Portal;

/// `/`：按会话跳转
#[component]
fn Splash() -> impl IntoView {
    let auth = use_auth();
    view! { <Redirect path=landing_path(auth.session().as_ref()) /> }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <a href="/" class="btn btn-link mt-2">"Go home"</a>
            </div>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 运行时配置
    let config = web::load_config();
    provide_context(ToastContext::new(config.notice_timeout_ms));
    provide_context(config);

    // 2. 认证上下文（会话本身保存在 LocalStorage）
    provide_context(AuthContext::new());

    view! {
        <Router>
            <ToastHost />
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/") view=Splash />
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/forgot-password") view=ForgotPasswordPage />
                <Route path=path!("/reset-password/:token") view=ResetPasswordPage />

                <ParentRoute path=path!("/admin") view=|| view! { <PortalShell portal=Portal::Admin /> }>
                    <Route path=path!("") view=|| view! { <Redirect path=Portal::Admin.home_path() /> } />
                    <Route path=path!("dashboard") view=|| view! { <DashboardPage portal=Portal::Admin /> } />
                    <Route
                        path=path!("compare-journal")
                        view=|| view! { <JournalSearchPage mode=SearchMode::CustomerMarks /> }
                    />
                    <Route
                        path=path!("search-manual-journal")
                        view=|| view! { <JournalSearchPage mode=SearchMode::ManualAgainstJournal /> }
                    />
                    <Route
                        path=path!("manual-search")
                        view=|| view! { <JournalSearchPage mode=SearchMode::ManualAll /> }
                    />
                    <Route path=path!(":resource") view=|| view! { <ResourcePage portal=Portal::Admin /> } />
                </ParentRoute>

                <ParentRoute path=path!("/agent") view=|| view! { <PortalShell portal=Portal::Agent /> }>
                    <Route path=path!("") view=|| view! { <Redirect path=Portal::Agent.home_path() /> } />
                    <Route path=path!("dashboard") view=|| view! { <DashboardPage portal=Portal::Agent /> } />
                    <Route
                        path=path!("compare-journal")
                        view=|| view! { <JournalSearchPage mode=SearchMode::CustomerMarks /> }
                    />
                    <Route
                        path=path!("manual-search")
                        view=|| view! { <JournalSearchPage mode=SearchMode::ManualAll /> }
                    />
                    <Route path=path!("change-password") view=ChangePasswordPage />
                    <Route path=path!(":resource") view=|| view! { <ResourcePage portal=Portal::Agent /> } />
                </ParentRoute>

                <ParentRoute path=path!("/user") view=|| view! { <PortalShell portal=Portal::User /> }>
                    <Route path=path!("") view=|| view! { <Redirect path=Portal::User.home_path() /> } />
                    <Route path=path!("dashboard") view=|| view! { <DashboardPage portal=Portal::User /> } />
                    <Route path=path!("change-password") view=ChangePasswordPage />
                    <Route path=path!(":resource") view=|| view! { <ResourcePage portal=Portal::User /> } />
                </ParentRoute>

            </Routes>
        </Router>
    }
}
