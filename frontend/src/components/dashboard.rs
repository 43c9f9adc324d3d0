use crate::auth::use_api;
use crate::components::chart::ChartCanvas;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tm_portal::dashboard::{available_years, count_tiles, monthly_chart, status_chart};
use tm_portal::shared::Portal;
use tm_portal::shared::protocol::DashboardSummary;

#[component]
pub fn DashboardPage(portal: Portal) -> impl IntoView {
    let api = use_api();
    let toast = use_toast();

    let summary = RwSignal::new(None::<DashboardSummary>);
    let (loading, set_loading) = signal(true);
    let year = RwSignal::new(None::<i32>);

    // 初始加载；年份默认取最近的一年
    spawn_local(async move {
        match api.dashboard(portal).await {
            Ok(data) => {
                year.try_set(available_years(&data.monthly).first().copied());
                summary.try_set(Some(data));
            }
            Err(e) => toast.report(&e),
        }
        set_loading.try_set(false);
    });

    let tiles = move || summary.with(|s| s.as_ref().map(count_tiles).unwrap_or_default());
    let years = move || {
        summary.with(|s| {
            s.as_ref()
                .map(|s| available_years(&s.monthly))
                .unwrap_or_default()
        })
    };
    let monthly = Signal::derive(move || {
        let selected = year.get()?;
        summary.with(|s| s.as_ref().map(|s| monthly_chart(&s.monthly, selected)))
    });
    let by_status = Signal::derive(move || {
        summary.with(|s| {
            s.as_ref()
                .filter(|s| !s.by_status.is_empty())
                .map(|s| status_chart(&s.by_status))
        })
    });

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">{portal.title()} " Dashboard"</h2>

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <For
                        each=tiles
                        key=|(title, count)| (title.clone(), *count)
                        children=|(title, count)| view! {
                            <div class="stat">
                                <div class="stat-title">{title}</div>
                                <div class="stat-value text-primary">{count}</div>
                            </div>
                        }
                    />
                </div>

                <div class="grid gap-6 lg:grid-cols-2">
                    {(portal == Portal::Admin).then(|| view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <div class="flex items-center justify-between">
                                    <h3 class="card-title">"Applications by Month"</h3>
                                    <select
                                        class="select select-bordered select-sm"
                                        on:change=move |ev| year.set(event_target_value(&ev).parse().ok())
                                    >
                                        <For
                                            each=years
                                            key=|y| *y
                                            children=move |y| view! {
                                                <option value=y.to_string() selected=move || year.get() == Some(y)>
                                                    {y}
                                                </option>
                                            }
                                        />
                                    </select>
                                </div>
                                <Show
                                    when=move || monthly.with(Option::is_some)
                                    fallback=|| view! { <p class="text-base-content/50">"No data yet."</p> }
                                >
                                    <ChartCanvas config=monthly />
                                </Show>
                            </div>
                        </div>
                    })}

                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"Applications by Status"</h3>
                            <Show
                                when=move || by_status.with(Option::is_some)
                                fallback=|| view! { <p class="text-base-content/50">"No data yet."</p> }
                            >
                                <ChartCanvas config=by_status />
                            </Show>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
