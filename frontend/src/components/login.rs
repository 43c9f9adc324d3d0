use crate::auth::{repository, use_api, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use tm_portal::access::landing_path;
use tm_portal::session::sign_in;
use tm_portal::shared::LOGIN_PATH;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let api = StoredValue::new_local(use_api());

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 已登录则直接进入对应门户
    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            let target = landing_path(auth.session().as_ref());
            if target != LOGIN_PATH {
                navigate(&target, Default::default());
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().trim().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let navigate = navigate.clone();
        let api = api.get_value();
        spawn_local(async move {
            match sign_in(api.as_ref(), &repository(), &email.get_untracked(), &password.get_untracked()).await {
                Ok(portal) => {
                    navigate(&portal.home_path(), Default::default());
                }
                Err(e) => {
                    log::warn!("sign in failed: {}", e);
                    set_error_msg.try_set(Some(e.user_message().to_string()));
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"TM Portal"</h1>
                    <p class="text-base-content/70">"Sign in to manage your trademarks"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                autocomplete="username"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                            <label class="label">
                                <a href="/forgot-password" class="label-text-alt link link-hover">
                                    "Forgot password?"
                                </a>
                            </label>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
