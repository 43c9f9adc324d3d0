//! 期刊比对 / 手工检索页面

use crate::auth::use_api;
use crate::components::records_view::RecordsView;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tm_portal::SelectOption;
use tm_portal::crud::display_rows;
use tm_portal::journal::{
    JournalSearchForm, MAX_CHAR_COUNT, MAX_CLASS_NO, mode_title, run_search, uses_customer,
    uses_journal, uses_text,
};
use tm_portal::shared::Record;
use tm_portal::shared::catalog::{CUSTOMER_LOOKUP, JOURNAL_MATCHES};
use tm_portal::shared::protocol::{MatchType, SearchMode};

#[component]
pub fn JournalSearchPage(mode: SearchMode) -> impl IntoView {
    let api = StoredValue::new_local(use_api());
    let toast = use_toast();

    let form = RwSignal::new(JournalSearchForm::default());
    let results = RwSignal::new(Vec::<Record>::new());
    let customers = RwSignal::new(Vec::<SelectOption>::new());
    let (searching, set_searching) = signal(false);
    let (searched, set_searched) = signal(false);

    if uses_customer(mode) {
        let api = api.get_value();
        spawn_local(async move {
            match api.lookup_options(&CUSTOMER_LOOKUP).await {
                Ok(list) => {
                    customers.try_set(list);
                }
                Err(e) => log::warn!("customer options failed: {}", e),
            }
        });
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if searching.get_untracked() {
            return;
        }
        let api = api.get_value();
        let input = form.get_untracked();
        set_searching.set(true);
        spawn_local(async move {
            match run_search(api.as_ref(), &input, mode).await {
                Ok(rows) => {
                    log::info!("journal search returned {} rows", rows.len());
                    results.try_set(rows);
                    set_searched.try_set(true);
                }
                Err(e) => toast.report(&e),
            }
            set_searching.try_set(false);
        });
    };

    let rows = Memo::new(move |_| results.with(|r| display_rows(&JOURNAL_MATCHES, r)));
    let columns = JOURNAL_MATCHES.list_columns().map(|f| f.label).collect::<Vec<_>>();
    let needs_count = move || form.with(|f| f.match_type.needs_char_count());

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">{mode_title(mode)}</h2>

            <form class="card bg-base-100 shadow" on:submit=on_submit novalidate>
                <div class="card-body">
                    <div class="grid gap-4 md:grid-cols-3">
                        {uses_journal(mode).then(|| view! {
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Journal No *"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered w-full"
                                    on:input=move |ev| form.update(|f| f.journal_no = event_target_value(&ev))
                                    prop:value=move || form.with(|f| f.journal_no.clone())
                                />
                            </div>
                        })}

                        {uses_customer(mode).then(|| view! {
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Customer"</span></label>
                                <select
                                    class="select select-bordered w-full"
                                    on:change=move |ev| form.update(|f| f.customer_id = event_target_value(&ev))
                                >
                                    <option value="">"All customers"</option>
                                    <For
                                        each=move || customers.get()
                                        key=|(id, _)| id.clone()
                                        children=move |(id, label)| view! { <option value=id>{label}</option> }
                                    />
                                </select>
                            </div>
                        })}

                        {uses_text(mode).then(|| view! {
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Trademark *"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered w-full"
                                    on:input=move |ev| form.update(|f| f.text = event_target_value(&ev))
                                    prop:value=move || form.with(|f| f.text.clone())
                                />
                            </div>
                        })}

                        <div class="form-control">
                            <label class="label"><span class="label-text">"Match"</span></label>
                            <select
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    let match_type = MatchType::parse(&event_target_value(&ev)).unwrap_or_default();
                                    form.update(|f| f.match_type = match_type);
                                }
                            >
                                {MatchType::ALL
                                    .into_iter()
                                    .map(|m| view! {
                                        <option
                                            value=m.as_str()
                                            selected=move || form.with(|f| f.match_type == m)
                                        >
                                            {m.label()}
                                        </option>
                                    })
                                    .collect_view()}
                            </select>
                        </div>

                        <Show when=needs_count>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Characters *"</span></label>
                                <input
                                    type="number"
                                    min="1"
                                    max=MAX_CHAR_COUNT.to_string()
                                    class="input input-bordered w-full"
                                    on:input=move |ev| form.update(|f| f.char_count = event_target_value(&ev))
                                    prop:value=move || form.with(|f| f.char_count.clone())
                                />
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label"><span class="label-text">"Class"</span></label>
                            <input
                                type="number"
                                min="1"
                                max=MAX_CLASS_NO.to_string()
                                class="input input-bordered w-full"
                                on:input=move |ev| form.update(|f| f.class_no = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.class_no.clone())
                            />
                        </div>
                    </div>

                    <div class="card-actions justify-end mt-4">
                        <button type="submit" class="btn btn-primary" disabled=move || searching.get()>
                            {move || if searching.get() {
                                view! { <span class="loading loading-spinner"></span> "Searching..." }.into_any()
                            } else {
                                "Search".into_any()
                            }}
                        </button>
                    </div>
                </div>
            </form>

            <Show when=move || searched.get() || searching.get()>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-2 md:p-4">
                        <h3 class="card-title px-2">"Matches"</h3>
                        <RecordsView rows=rows columns=columns.clone() loading=searching />
                    </div>
                </div>
            </Show>
        </div>
    }
}
