//! 密码相关页面：忘记密码、重置密码、修改密码
//!
//! 校验规则在核心库 `forms` 中，失败时不发送请求。

use crate::auth::use_api;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use tm_portal::forms::{check_change_password, check_email, check_new_password};
use tm_portal::shared::LOGIN_PATH;
use tm_portal::shared::protocol::{
    ChangePasswordRequest, ForgotPasswordRequest, MessageResponse, ResetPasswordRequest,
};

fn reply_or(res: MessageResponse, fallback: &str) -> String {
    res.message.unwrap_or_else(|| fallback.to_string())
}

#[component]
fn PasswordInput(
    id: &'static str,
    label: &'static str,
    autocomplete: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type="password"
                autocomplete=autocomplete
                on:input=move |ev| set_value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered"
            />
        </div>
    }
}

#[component]
fn AuthCard(title: &'static str, subtitle: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">{title}</h1>
                    <p class="text-base-content/70">{subtitle}</p>
                </div>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">{children()}</div>
                <a href=LOGIN_PATH class="link link-hover text-sm">"Back to sign in"</a>
            </div>
        </div>
    }
}

fn submit_label(busy: ReadSignal<bool>, idle: &'static str) -> impl IntoView {
    move || {
        if busy.get() {
            view! { <span class="loading loading-spinner"></span> "Please wait..." }.into_any()
        } else {
            idle.into_any()
        }
    }
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let api = StoredValue::new_local(use_api());
    let toast = use_toast();
    let (email, set_email) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = ForgotPasswordRequest {
            email: email.get().trim().to_string(),
        };
        if let Err(e) = check_email(&request.email) {
            toast.report(&e);
            return;
        }
        set_busy.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match api.call(&request).await {
                Ok(res) => {
                    toast.success(reply_or(res, "Check your inbox for a reset link"));
                    set_email.try_set(String::new());
                }
                Err(e) => toast.report(&e),
            }
            set_busy.try_set(false);
        });
    };

    view! {
        <AuthCard title="Forgot password" subtitle="We will email you a reset link">
            <form class="card-body" on:submit=on_submit novalidate>
                <div class="form-control">
                    <label class="label" for="email">
                        <span class="label-text">"Email"</span>
                    </label>
                    <input
                        id="email"
                        type="email"
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                        class="input input-bordered"
                    />
                </div>
                <div class="form-control mt-6">
                    <button class="btn btn-primary" disabled=move || busy.get()>
                        {submit_label(busy, "Send reset link")}
                    </button>
                </div>
            </form>
        </AuthCard>
    }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let api = StoredValue::new_local(use_api());
    let toast = use_toast();
    let navigate = use_navigate();
    let params = use_params_map();
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let token = params.with(|p| p.get("token")).unwrap_or_default();
        if let Err(e) = check_new_password(&password.get(), &confirm.get()) {
            toast.report(&e);
            return;
        }
        let request = ResetPasswordRequest {
            token,
            password: password.get(),
        };
        set_busy.set(true);
        let api = api.get_value();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.call(&request).await {
                Ok(res) => {
                    toast.success(reply_or(res, "Password updated. Please sign in."));
                    navigate(LOGIN_PATH, Default::default());
                }
                Err(e) => toast.report(&e),
            }
            set_busy.try_set(false);
        });
    };

    view! {
        <AuthCard title="Reset password" subtitle="Choose a new password">
            <form class="card-body" on:submit=on_submit novalidate>
                <PasswordInput
                    id="password"
                    label="New password"
                    autocomplete="new-password"
                    value=password
                    set_value=set_password
                />
                <PasswordInput
                    id="confirm"
                    label="Confirm password"
                    autocomplete="new-password"
                    value=confirm
                    set_value=set_confirm
                />
                <div class="form-control mt-6">
                    <button class="btn btn-primary" disabled=move || busy.get()>
                        {submit_label(busy, "Reset password")}
                    </button>
                </div>
            </form>
        </AuthCard>
    }
}

/// 门户内的修改密码页
#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let api = StoredValue::new_local(use_api());
    let toast = use_toast();
    let (current, set_current) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Err(e) = check_change_password(&current.get(), &password.get(), &confirm.get()) {
            toast.report(&e);
            return;
        }
        let request = ChangePasswordRequest {
            current_password: current.get(),
            new_password: password.get(),
        };
        set_busy.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match api.call(&request).await {
                Ok(res) => {
                    toast.success(reply_or(res, "Password changed"));
                    set_current.try_set(String::new());
                    set_password.try_set(String::new());
                    set_confirm.try_set(String::new());
                }
                Err(e) => toast.report(&e),
            }
            set_busy.try_set(false);
        });
    };

    view! {
        <div class="max-w-lg space-y-6">
            <h2 class="text-2xl font-bold">"Change Password"</h2>
            <form class="card bg-base-100 shadow" on:submit=on_submit novalidate>
                <div class="card-body">
                    <PasswordInput
                        id="current"
                        label="Current password"
                        autocomplete="current-password"
                        value=current
                        set_value=set_current
                    />
                    <PasswordInput
                        id="password"
                        label="New password"
                        autocomplete="new-password"
                        value=password
                        set_value=set_password
                    />
                    <PasswordInput
                        id="confirm"
                        label="Confirm new password"
                        autocomplete="new-password"
                        value=confirm
                        set_value=set_confirm
                    />
                    <div class="card-actions justify-end mt-4">
                        <button class="btn btn-primary" disabled=move || busy.get()>
                            {submit_label(busy, "Update password")}
                        </button>
                    </div>
                </div>
            </form>
        </div>
    }
}
