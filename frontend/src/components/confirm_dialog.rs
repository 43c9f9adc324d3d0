use leptos::prelude::*;

/// 删除确认框
///
/// 打开时聚焦“取消”，Esc 关闭视为取消。
#[component]
pub fn ConfirmDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] message: Signal<String>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let cancel_ref = NodeRef::<leptos::html::Button>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                    if let Some(button) = cancel_ref.get_untracked() {
                        let _ = button.focus();
                    }
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <dialog
            class="modal"
            node_ref=dialog_ref
            on:close=move |_| {
                if open.get_untracked() {
                    on_cancel.run(());
                }
            }
        >
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Confirm delete"</h3>
                <p class="py-4 text-base-content/70">{move || message.get()}</p>
                <div class="modal-action">
                    <button
                        type="button"
                        class="btn"
                        node_ref=cancel_ref
                        on:click=move |_| on_cancel.run(())
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="btn btn-error"
                        disabled=move || busy.get()
                        on:click=move |_| on_confirm.run(())
                    >
                        {move || if busy.get() {
                            view! { <span class="loading loading-spinner"></span> "Deleting..." }.into_any()
                        } else {
                            "Delete".into_any()
                        }}
                    </button>
                </div>
            </div>
        </dialog>
    }
}
