//! 通用实体 / 报表页面
//!
//! 状态机与网络流程都在核心库的 `CrudFlow` 中，
//! 这里只负责把 `CrudState` 放进信号并渲染。

use crate::auth::use_api;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::records_view::RecordsView;
use crate::components::toast::use_toast;
use crate::web::{read_attachment, save_file};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use std::collections::BTreeMap;
use tm_portal::shared::{FieldKind, FieldSpec, Portal, RecordId, ResourceSchema, catalog};
use tm_portal::{CrudFlow, CrudState, PageStatus, SelectOption, StateCell};
use web_sys::HtmlInputElement;

/// 用 Leptos 信号实现的状态容器
///
/// 页面卸载后信号被释放，异步任务的写入会被忽略。
pub struct SignalCell<T: Send + Sync + 'static>(pub RwSignal<T>);

impl<T: Send + Sync + 'static> Clone for SignalCell<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for SignalCell<T> {}

impl<T: Send + Sync + 'static> StateCell<T> for SignalCell<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.0.try_update(f)
    }

    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.0.try_with_untracked(f)
    }
}

type Options = BTreeMap<&'static str, Vec<SelectOption>>;

/// `/:portal/:resource`：按路由参数查找页面定义
#[component]
pub fn ResourcePage(portal: Portal) -> impl IntoView {
    let params = use_params_map();
    let key = Memo::new(move |_| params.with(|p| p.get("resource")));

    move || match key.get().and_then(|k| catalog::find(portal, &k)) {
        Some(schema) => view! { <CrudPage schema=schema /> }.into_any(),
        None => view! { <crate::NotFound /> }.into_any(),
    }
}

#[component]
pub fn CrudPage(schema: &'static ResourceSchema) -> impl IntoView {
    let toast = use_toast();
    let state = RwSignal::new(CrudState::new(schema));
    let flow = StoredValue::new_local(CrudFlow::new(use_api(), schema, SignalCell(state)));
    let options = RwSignal::new(Options::new());

    // 挂载：加载列表与下拉选项
    let initial = flow.get_value();
    spawn_local(async move {
        initial.reload().await;
        let loaded = initial.lookup_options().await;
        options.try_set(loaded);
    });

    // 状态中的通知转交给全局提示
    Effect::new(move |_| {
        if let Some(notice) = state.with(|s| s.notice.clone()) {
            toast.push(notice);
            state.update_untracked(|s| s.notice = None);
        }
    });

    on_cleanup(move || {
        state.try_update_untracked(|s| s.abort());
    });

    let caps = schema.capabilities;
    let downloadable = schema.attachment.is_some_and(|a| a.downloadable);
    let show_form = move || !schema.is_read_only() && (caps.create || state.with(|s| s.editing_id.is_some()));
    let loading = Signal::derive(move || state.with(|s| s.status == PageStatus::Loading));
    let rows = Memo::new(move |_| state.with(CrudState::rows));
    let columns = schema.list_columns().map(|f| f.label).collect::<Vec<_>>();

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let flow = flow.get_value();
        spawn_local(async move { flow.search().await });
    };
    let on_reset = move |_| {
        let flow = flow.get_value();
        spawn_local(async move { flow.reset_search().await });
    };
    let on_refresh = move |_| {
        let flow = flow.get_value();
        spawn_local(async move { flow.reload().await });
    };
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let flow = flow.get_value();
        spawn_local(async move {
            flow.submit().await;
        });
    };

    let download = move |id: RecordId| {
        let flow = flow.get_value();
        let name = state.with_untracked(|s| {
            s.items
                .iter()
                .find(|r| r.id == id)
                .and_then(|r| {
                    ["fileName", "originalName", "title"]
                        .iter()
                        .find_map(|k| r.fields.get(*k).and_then(|v| v.as_str()))
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("{}-{}", schema.key, id))
        });
        spawn_local(async move {
            if let Some(file) = flow.download(&id).await {
                if let Err(e) = save_file(&file, &name) {
                    log::error!("{}: saving {} failed: {:?}", schema.key, id, e);
                    toast.error("Unable to download the file");
                }
            }
        });
    };

    let has_actions = caps.update || caps.delete || downloadable;
    let actions = has_actions.then(|| {
        Callback::new(move |id: RecordId| {
            let edit_id = id.clone();
            let delete_id = id.clone();
            view! {
                <div class="flex gap-1 justify-end">
                    {caps.update.then(|| view! {
                        <button
                            class="btn btn-ghost btn-xs"
                            on:click=move |_| state.update(|s| s.select_for_edit(&edit_id))
                        >
                            "Edit"
                        </button>
                    })}
                    {downloadable.then(|| view! {
                        <button class="btn btn-ghost btn-xs" on:click=move |_| download(id.clone())>
                            "Download"
                        </button>
                    })}
                    {caps.delete.then(|| view! {
                        <button
                            class="btn btn-ghost btn-xs text-error"
                            on:click=move |_| state.update(|s| s.request_delete(delete_id.clone()))
                        >
                            "Delete"
                        </button>
                    })}
                </div>
            }
            .into_any()
        })
    });

    let confirm_open = Signal::derive(move || state.with(|s| s.pending_delete.is_some()));
    let confirm_busy = Signal::derive(move || state.with(|s| s.status == PageStatus::Submitting));
    let confirm_message = Signal::derive(move || {
        format!("Delete this {} record? This cannot be undone.", schema.title.to_lowercase())
    });
    let on_confirm = Callback::new(move |_: ()| {
        let flow = flow.get_value();
        spawn_local(async move {
            flow.confirm_delete().await;
        });
    });
    let on_cancel = Callback::new(move |_: ()| state.update(|s| s.cancel_delete()));

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">{schema.title}</h2>
                <button
                    class="btn btn-ghost btn-sm"
                    disabled=move || state.with(|s| s.is_busy())
                    on:click=on_refresh
                >
                    "Refresh"
                </button>
            </div>

            {(!schema.filters.is_empty()).then(|| view! {
                <form class="card bg-base-100 shadow" on:submit=on_search>
                    <div class="card-body p-4">
                        <div class="grid gap-3 md:grid-cols-4 items-end">
                            {schema
                                .filters
                                .iter()
                                .map(|field| filter_input(field, state))
                                .collect_view()}
                            <div class="flex gap-2">
                                <button type="submit" class="btn btn-primary btn-sm">"Search"</button>
                                <button type="button" class="btn btn-ghost btn-sm" on:click=on_reset>
                                    "Reset"
                                </button>
                            </div>
                        </div>
                    </div>
                </form>
            })}

            <Show when=show_form>
                <form class="card bg-base-100 shadow" on:submit=on_submit novalidate>
                    <div class="card-body">
                        <h3 class="card-title">
                            {move || if state.with(|s| s.editing_id.is_some()) {
                                format!("Edit {}", schema.title)
                            } else {
                                format!("Add {}", schema.title)
                            }}
                        </h3>
                        <div class="grid gap-4 md:grid-cols-2">
                            {schema
                                .form_fields()
                                .map(|field| form_input(field, state, options))
                                .collect_view()}
                            {schema.attachment.map(|spec| file_input(spec.accept, state))}
                        </div>
                        <div class="card-actions justify-end mt-4">
                            <Show when=move || state.with(|s| s.editing_id.is_some())>
                                <button
                                    type="button"
                                    class="btn btn-ghost"
                                    on:click=move |_| state.update(|s| s.cancel_edit())
                                >
                                    "Cancel"
                                </button>
                            </Show>
                            <button
                                type="submit"
                                class="btn btn-primary"
                                disabled=move || state.with(|s| s.is_busy())
                            >
                                {move || if state.with(|s| s.status == PageStatus::Submitting) {
                                    view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                } else if state.with(|s| s.editing_id.is_some()) {
                                    "Update".into_any()
                                } else {
                                    "Save".into_any()
                                }}
                            </button>
                        </div>
                    </div>
                </form>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-2 md:p-4">
                    {match actions {
                        Some(actions) => view! {
                            <RecordsView rows=rows columns=columns loading=loading actions=actions />
                        }
                        .into_any(),
                        None => view! { <RecordsView rows=rows columns=columns loading=loading /> }.into_any(),
                    }}
                </div>
            </div>

            <ConfirmDialog
                open=confirm_open
                message=confirm_message
                busy=confirm_busy
                on_confirm=on_confirm
                on_cancel=on_cancel
            />
        </div>
    }
}

fn field_label(
    field: &'static FieldSpec,
    required: impl Fn() -> bool + Send + Sync + 'static,
) -> impl IntoView {
    view! {
        <label class="label">
            <span class="label-text">
                {field.label}
                {move || required().then_some(" *")}
            </span>
        </label>
    }
}

fn filter_input(field: &'static FieldSpec, state: RwSignal<CrudState>) -> impl IntoView {
    let value = move || state.with(|s| s.filters.get(field.key).cloned().unwrap_or_default());
    let on_input = move |ev: leptos::ev::Event| state.update(|s| s.set_filter(field.key, event_target_value(&ev)));

    let input = match field.kind {
        FieldKind::Select(choices) => view! {
            <select class="select select-bordered select-sm w-full" on:change=on_input prop:value=value>
                <option value="">"All"</option>
                {choices
                    .iter()
                    .map(|(v, l)| view! { <option value=*v selected=move || value() == *v>{*l}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        kind => view! {
            <input
                type=kind.input_type()
                class="input input-bordered input-sm w-full"
                on:input=on_input
                prop:value=value
            />
        }
        .into_any(),
    };

    view! {
        <div class="form-control">
            {field_label(field, || false)}
            {input}
        </div>
    }
}

fn form_input(
    field: &'static FieldSpec,
    state: RwSignal<CrudState>,
    options: RwSignal<Options>,
) -> impl IntoView {
    let value = move || state.with(|s| s.draft.get(field.key).cloned().unwrap_or_default());
    let on_input = move |ev: leptos::ev::Event| state.update(|s| s.set_field(field.key, event_target_value(&ev)));
    let required = move || field.is_required(state.with(|s| s.editing_id.is_some()));

    let input = match field.kind {
        FieldKind::TextArea => view! {
            <textarea
                class="textarea textarea-bordered w-full"
                rows="3"
                on:input=on_input
                prop:value=value
            ></textarea>
        }
        .into_any(),
        FieldKind::Select(choices) => view! {
            <select class="select select-bordered w-full" on:change=on_input prop:value=value>
                <option value="">"Select..."</option>
                {choices
                    .iter()
                    .map(|(v, l)| view! { <option value=*v selected=move || value() == *v>{*l}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Lookup(_) => view! {
            <select class="select select-bordered w-full" on:change=on_input prop:value=value>
                <option value="">"Select..."</option>
                {move || {
                    options
                        .with(|o| o.get(field.key).cloned().unwrap_or_default())
                        .into_iter()
                        .map(|(id, label)| {
                            let selected_id = id.clone();
                            view! {
                                <option value=id selected=move || value() == selected_id>
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        }
        .into_any(),
        kind => view! {
            <input
                type=kind.input_type()
                class="input input-bordered w-full"
                autocomplete=if kind == FieldKind::Password { "new-password" } else { "off" }
                on:input=on_input
                prop:value=value
            />
        }
        .into_any(),
    };

    let wide = matches!(field.kind, FieldKind::TextArea);
    view! {
        <div class=if wide { "form-control md:col-span-2" } else { "form-control" }>
            {field_label(field, required)}
            {input}
        </div>
    }
}

fn file_input(accept: &'static str, state: RwSignal<CrudState>) -> impl IntoView {
    let toast = use_toast();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    // 表单被清空后同步清空文件框
    Effect::new(move |_| {
        if state.with(|s| s.attachment.is_none()) {
            if let Some(input) = input_ref.get() {
                input.set_value("");
            }
        }
    });

    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            state.update(|s| s.set_attachment(None));
            return;
        };
        spawn_local(async move {
            match read_attachment(&file).await {
                Ok(attachment) => {
                    state.try_update(|s| s.set_attachment(Some(attachment)));
                }
                Err(e) => {
                    log::error!("reading {} failed: {:?}", file.name(), e);
                    toast.error("Unable to read the selected file");
                }
            }
        });
    };

    view! {
        <div class="form-control md:col-span-2">
            <label class="label">
                <span class="label-text">"File"</span>
            </label>
            <input
                type="file"
                class="file-input file-input-bordered w-full"
                accept=accept
                node_ref=input_ref
                on:change=on_change
            />
        </div>
    }
}
