//! Unread notification count shown as a badge in the header.

use leptos::*;

pub type UnreadCount = RwSignal<usize>;

#[component]
pub fn UnreadProvider(children: Children) -> impl IntoView {
    provide_context::<UnreadCount>(create_rw_signal(0));
    view! { <>{children()}</> }
}

pub fn use_unread_count() -> UnreadCount {
    use_context::<UnreadCount>().unwrap_or_else(|| create_rw_signal(0))
}
