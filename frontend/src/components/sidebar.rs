//! 侧边栏导航
//!
//! 桌面端常驻，移动端为抽屉；点击任意链接都会关闭抽屉。

use crate::auth::{use_api, use_auth};
use crate::components::toast::use_toast;
use crate::web::save_file;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};
use tm_portal::Download;
use tm_portal::navigation::{is_active, visible_groups};
use tm_portal::shared::{LOGIN_PATH, Portal};

const MANUAL_FILE_NAME: &str = "user-manual";

#[component]
pub fn Sidebar(
    portal: Portal,
    #[prop(into)] open: Signal<bool>,
    on_close: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let groups = move || visible_groups(portal, auth.session().as_ref());

    let on_logout = move |_| {
        auth.logout();
        on_close.run(());
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <aside class=move || {
            let base = "fixed inset-y-0 left-0 z-40 w-64 bg-base-100 shadow-xl flex flex-col transition-transform md:sticky md:top-0 md:h-screen md:translate-x-0";
            if open.get() {
                format!("{base} translate-x-0")
            } else {
                format!("{base} -translate-x-full")
            }
        }>
            <div class="flex items-center justify-between p-4 border-b border-base-200">
                <div>
                    <div class="text-xl font-bold text-primary">"TM Portal"</div>
                    <div class="text-xs text-base-content/60">{portal.title()} " Portal"</div>
                </div>
                <button
                    class="btn btn-ghost btn-sm btn-square md:hidden"
                    aria-label="Close menu"
                    on:click=move |_| on_close.run(())
                >
                    "✕"
                </button>
            </div>

            <ul class="menu w-full flex-1 overflow-y-auto">
                {move || {
                    groups()
                        .into_iter()
                        .map(|(title, items)| {
                            view! {
                                <li class="menu-title">{title}</li>
                                {items
                                    .into_iter()
                                    .map(|item| {
                                        let path = item.path;
                                        view! {
                                            <li>
                                                <a
                                                    href=path
                                                    class=move || {
                                                        if is_active(&pathname.get(), path) {
                                                            "active"
                                                        } else {
                                                            ""
                                                        }
                                                    }
                                                    on:click=move |_| on_close.run(())
                                                >
                                                    {item.label}
                                                </a>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            }
                        })
                        .collect_view()
                }}
            </ul>

            {(portal == Portal::User).then(|| view! { <UserManual /> })}

            <div class="p-4 border-t border-base-200">
                <button on:click=on_logout class="btn btn-outline btn-error w-full">
                    "Logout"
                </button>
            </div>
        </aside>
    }
}

/// 用户手册：挂载时下载，点击保存到本地
#[component]
fn UserManual() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let manual = RwSignal::new(None::<Download>);

    spawn_local(async move {
        match api.manual().await {
            Ok(file) => {
                manual.try_set(Some(file));
            }
            Err(e) => log::warn!("user manual unavailable: {}", e),
        }
    });

    let on_save = move |_| {
        manual.with(|file| {
            let Some(file) = file else {
                return;
            };
            if let Err(e) = save_file(file, MANUAL_FILE_NAME) {
                log::error!("saving user manual failed: {:?}", e);
                toast.error("Unable to download the file");
            }
        });
    };

    view! {
        <div class="px-4 pb-2">
            <button
                class="btn btn-ghost btn-sm w-full justify-start"
                disabled=move || manual.with(Option::is_none)
                on:click=on_save
            >
                "User Manual (PDF)"
            </button>
        </div>
    }
}
