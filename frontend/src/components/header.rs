use crate::auth::use_auth;
use leptos::prelude::*;
use leptos_router::hooks::use_location;
use tm_portal::navigation::section_label;
use tm_portal::shared::Portal;

#[component]
pub fn Header(portal: Portal, on_menu: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let pathname = use_location().pathname;

    let section = move || section_label(portal, &pathname.get());
    let user_name = move || auth.session().map(|s| s.user_name).unwrap_or_default();

    view! {
        <header class="navbar bg-base-100 shadow sticky top-0 z-20 px-4">
            <div class="flex-none md:hidden">
                <button
                    class="btn btn-square btn-ghost"
                    aria-label="Open menu"
                    on:click=move |_| on_menu.run(())
                >
                    <svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" class="inline-block w-6 h-6 stroke-current"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16"></path></svg>
                </button>
            </div>
            <div class="flex-1 gap-3">
                <span class="font-bold text-primary md:hidden">"TM Portal"</span>
                <h1 class="text-lg font-semibold">{section}</h1>
            </div>
            <div class="flex-none gap-2">
                <span class="badge badge-neutral">{portal.title()}</span>
                <span class="hidden md:inline text-sm text-base-content/70">{user_name}</span>
            </div>
        </header>
    }
}
