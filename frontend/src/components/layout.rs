//! 门户外壳：守卫 + 侧边栏 + 顶栏 + 内容区

use crate::auth::use_auth;
use crate::components::guard::RouteGuard;
use crate::components::header::Header;
use crate::components::sidebar::Sidebar;
use crate::web::use_is_mobile;
use leptos::prelude::*;
use leptos_router::components::{Outlet, Redirect};
use tm_portal::authorize;
use tm_portal::shared::{LOGIN_PATH, Portal};

/// 路由树的父视图
#[component]
pub fn PortalShell(portal: Portal) -> impl IntoView {
    view! {
        <RouteGuard portal=portal>
            <PortalLayout portal=portal />
        </RouteGuard>
    }
}

#[component]
fn PortalLayout(portal: Portal) -> impl IntoView {
    let auth = use_auth();
    let is_mobile = use_is_mobile();
    let (sidebar_open, set_sidebar_open) = signal(false);

    // 布局自身再检查一次，会话在页面内被清除时同样跳转
    let granted = move || authorize(auth.session().as_ref(), portal).is_granted();
    let close_sidebar = Callback::new(move |_: ()| set_sidebar_open.set(false));
    let open_sidebar = Callback::new(move |_: ()| set_sidebar_open.set(true));

    view! {
        <Show when=granted fallback=|| view! { <Redirect path=LOGIN_PATH /> }>
            <div class="min-h-screen bg-base-200 md:flex font-sans">
                <Sidebar portal=portal open=sidebar_open on_close=close_sidebar />
                <Show when=move || sidebar_open.get() && is_mobile.get()>
                    <div
                        class="fixed inset-0 z-30 bg-black/40"
                        on:click=move |_| set_sidebar_open.set(false)
                    ></div>
                </Show>
                <div class="flex-1 min-w-0 flex flex-col">
                    <Header portal=portal on_menu=open_sidebar />
                    <main class="p-4 md:p-8">
                        <Outlet />
                    </main>
                </div>
            </div>
        </Show>
    }
}
