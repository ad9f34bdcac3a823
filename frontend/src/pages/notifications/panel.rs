use leptos::*;

use super::view_model::use_notifications_view_model;
use crate::api::Notification;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner};

#[component]
pub fn NotificationsPage() -> impl IntoView {
    view! {
        <Layout>
            <NotificationsPanel />
        </Layout>
    }
}

fn created_label(notification: &Notification) -> String {
    notification
        .created_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[component]
pub fn NotificationsPanel() -> impl IntoView {
    let vm = use_notifications_view_model();

    let notifications = Signal::derive({
        let vm = vm.clone();
        move || vm.notifications.get()
    });
    let loading = Signal::derive({
        let vm = vm.clone();
        move || vm.loading.get()
    });
    let error = Signal::derive({
        let vm = vm.clone();
        move || vm.error.get()
    });
    let has_more = Signal::derive({
        let vm = vm.clone();
        move || vm.has_more.get()
    });
    let any_unread = Signal::derive({
        let vm = vm.clone();
        move || vm.notifications.get().iter().any(|n| !n.read)
    });

    let mark_read = Callback::new({
        let vm = vm.clone();
        move |id: String| vm.mark_read_action.dispatch(id)
    });
    let mark_all = Callback::new({
        let vm = vm.clone();
        move |_: ()| vm.mark_all_action.dispatch(())
    });
    let load_more = Callback::new({
        let vm = vm.clone();
        move |_: ()| vm.load_more()
    });

    view! {
        <div class="space-y-4 px-4 sm:px-0">
            <div class="flex items-center justify-between">
                <h2 class="text-lg font-semibold text-fg">{"通知"}</h2>
                <Show when=move || any_unread.get()>
                    <button
                        class="text-sm text-fg-muted underline"
                        on:click=move |_| mark_all.call(())
                    >
                        {"全部标为已读"}
                    </button>
                </Show>
            </div>
            {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
            <Show
                when=move || !notifications.get().is_empty()
                fallback=move || {
                    if loading.get() {
                        view! { <LoadingSpinner /> }.into_view()
                    } else if error.get().is_none() {
                        view! { <EmptyState title="暂无通知" /> }.into_view()
                    } else {
                        ().into_view()
                    }
                }
            >
                <For
                    each=move || notifications.get()
                    key=|notification| (notification.id.clone(), notification.read)
                    children=move |notification| {
                        let id = notification.id.clone();
                        let unread = !notification.read;
                        view! {
                            <div class="bg-surface-elevated shadow rounded-lg p-4 flex items-start justify-between gap-3">
                                <div class="space-y-1">
                                    <div class="flex items-center gap-2">
                                        <Show when=move || unread>
                                            <span class="h-2 w-2 rounded-full bg-status-error-bg"></span>
                                        </Show>
                                        <span class="text-sm font-semibold text-fg">{notification.title.clone()}</span>
                                    </div>
                                    <p class="text-sm text-fg-muted">{notification.content.clone()}</p>
                                    <p class="text-xs text-fg-muted">{created_label(&notification)}</p>
                                </div>
                                <Show when=move || unread>
                                    {
                                        let id = id.clone();
                                        view! {
                                            <button
                                                class="text-xs text-fg-muted underline shrink-0"
                                                on:click=move |_| mark_read.call(id.clone())
                                            >
                                                {"标为已读"}
                                            </button>
                                        }
                                    }
                                </Show>
                            </div>
                        }
                    }
                />
                <Show when=move || loading.get()>
                    <LoadingSpinner />
                </Show>
                <Show when=move || has_more.get() && !loading.get()>
                    <div class="flex justify-center pt-2">
                        <button
                            class="px-4 py-2 text-sm font-medium rounded-md bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| load_more.call(())
                        >
                            {"加载更多"}
                        </button>
                    </div>
                </Show>
            </Show>
        </div>
    }
}
