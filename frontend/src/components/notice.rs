use leptos::*;

use crate::state::notices::{dismiss_notice, use_notices, NoticeLevel};

/// Fixed toast stack fed by the notices context. Each entry auto-dismisses
/// after a few seconds or on click.
#[component]
pub fn NoticeStack() -> impl IntoView {
    let notices = use_notices();
    view! {
        <div class="fixed top-4 right-4 z-[80] w-80 space-y-2">
            <For
                each=move || notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    let class = match notice.level {
                        NoticeLevel::Success => "bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded shadow flex items-start justify-between gap-2",
                        NoticeLevel::Error => "bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded shadow flex items-start justify-between gap-2",
                    };
                    view! {
                        <div class=class role="status">
                            <p class="text-sm">{notice.text}</p>
                            <button
                                type="button"
                                aria-label="关闭"
                                class="opacity-70 hover:opacity-100"
                                on:click=move |_| dismiss_notice(notices, id)
                            >
                                {"✕"}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
