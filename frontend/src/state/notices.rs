//! Transient toast notices shown at the top of the layout.

use leptos::*;
use uuid::Uuid;

const AUTO_DISMISS_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub text: String,
}

pub type Notices = RwSignal<Vec<Notice>>;

#[component]
pub fn NoticeProvider(children: Children) -> impl IntoView {
    provide_context::<Notices>(create_rw_signal(Vec::new()));
    view! { <>{children()}</> }
}

pub fn use_notices() -> Notices {
    use_context::<Notices>().unwrap_or_else(|| create_rw_signal(Vec::new()))
}

pub fn push_notice(notices: Notices, level: NoticeLevel, text: impl Into<String>) {
    let notice = Notice {
        id: Uuid::new_v4(),
        level,
        text: text.into(),
    };
    let id = notice.id;
    notices.update(|list| list.push(notice));
    schedule_dismiss(notices, id);
}

pub fn push_success(notices: Notices, text: impl Into<String>) {
    push_notice(notices, NoticeLevel::Success, text);
}

pub fn push_error(notices: Notices, text: impl Into<String>) {
    push_notice(notices, NoticeLevel::Error, text);
}

pub fn dismiss_notice(notices: Notices, id: Uuid) {
    notices.update(|list| list.retain(|n| n.id != id));
}

#[cfg(target_arch = "wasm32")]
fn schedule_dismiss(notices: Notices, id: Uuid) {
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(AUTO_DISMISS_MS).await;
        dismiss_notice(notices, id);
    });
}

// Host builds (render tests) keep notices until dismissed explicitly.
#[cfg(not(target_arch = "wasm32"))]
fn schedule_dismiss(_notices: Notices, _id: Uuid) {
    let _ = AUTO_DISMISS_MS;
}
