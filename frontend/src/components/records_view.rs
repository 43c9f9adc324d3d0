//! 列表的两种呈现
//!
//! 宽屏为表格，窄屏为卡片；两者读取同一份 `DisplayRow`，行数与取值一致。

use crate::web::use_is_mobile;
use leptos::prelude::*;
use tm_portal::crud::DisplayRow;
use tm_portal::shared::RecordId;

#[component]
pub fn RecordsView(
    #[prop(into)] rows: Signal<Vec<DisplayRow>>,
    columns: Vec<&'static str>,
    #[prop(into)] loading: Signal<bool>,
    /// 每行的操作按钮，None 表示只读
    #[prop(optional)]
    actions: Option<Callback<RecordId, AnyView>>,
) -> impl IntoView {
    let is_mobile = use_is_mobile();
    let columns = StoredValue::new(columns);
    let is_empty = move || rows.with(Vec::is_empty);

    let empty_state = move || {
        view! {
            <div class="text-center py-8 text-base-content/50">
                {move || if loading.get() {
                    view! { <span class="loading loading-spinner loading-md"></span> " Loading..." }.into_any()
                } else {
                    "No records found.".into_any()
                }}
            </div>
        }
    };

    let table = move || {
        view! {
            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            {columns.with_value(|cols| {
                                cols.iter().map(|c| view! { <th>{*c}</th> }).collect_view()
                            })}
                            {actions.is_some().then(|| view! { <th></th> })}
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || rows.get()
                            key=|row| row.clone()
                            children=move |row| {
                                let id = row.id;
                                view! {
                                    <tr>
                                        {row.cells
                                            .into_iter()
                                            .map(|cell| view! { <td>{cell.value}</td> })
                                            .collect_view()}
                                        {actions.map(|a| view! { <td class="text-right">{a.run(id)}</td> })}
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        }
    };

    let cards = move || {
        view! {
            <div class="grid gap-3">
                <For
                    each=move || rows.get()
                    key=|row| row.clone()
                    children=move |row| {
                        let id = row.id;
                        view! {
                            <div class="card bg-base-100 shadow border border-base-200">
                                <div class="card-body p-4 gap-1">
                                    {row.cells
                                        .into_iter()
                                        .map(|cell| {
                                            view! {
                                                <div class="flex justify-between gap-4 text-sm">
                                                    <span class="text-base-content/60">{cell.label}</span>
                                                    <span class="text-right break-all">{cell.value}</span>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                    {actions.map(|a| view! { <div class="card-actions justify-end mt-2">{a.run(id)}</div> })}
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        }
    };

    view! {
        <Show when=move || !is_empty() fallback=empty_state>
            {move || if is_mobile.get() { cards().into_any() } else { table().into_any() }}
        </Show>
    }
}
