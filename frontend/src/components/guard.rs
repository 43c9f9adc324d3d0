//! 路由守卫
//!
//! 渲染前同步读取会话；没有 token 或角色不符时只渲染跳转，不渲染子节点。
//! 这只是界面层面的拦截，真正的权限由后端校验。

use crate::auth::use_auth;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use tm_portal::authorize;
use tm_portal::shared::{LOGIN_PATH, Portal};

#[component]
pub fn RouteGuard(portal: Portal, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let granted = move || authorize(auth.session().as_ref(), portal).is_granted();

    view! {
        <Show when=granted fallback=|| view! { <Redirect path=LOGIN_PATH /> }>
            {children()}
        </Show>
    }
}
