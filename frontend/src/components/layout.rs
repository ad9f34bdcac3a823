use leptos::*;

use crate::api::Role;
use crate::state::session::{self, use_session};
use crate::state::unread::use_unread_count;

#[component]
pub fn Header() -> impl IntoView {
    let (session, set_session) = use_session();
    let (menu_open, set_menu_open) = create_signal(false);
    let unread = use_unread_count();

    let is_admin_view = move || session.get().is_admin();
    let can_switch_role = move || {
        session
            .get()
            .profile
            .as_ref()
            .map(|p| p.role == Role::Admin)
            .unwrap_or(false)
    };
    let display_name = move || {
        session
            .get()
            .profile
            .as_ref()
            .map(|p| {
                if p.real_name.is_empty() {
                    p.username.clone()
                } else {
                    p.real_name.clone()
                }
            })
            .unwrap_or_default()
    };

    let logout_action = session::use_logout_action();
    let logout_pending = logout_action.pending();
    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            if let Some(win) = web_sys::window() {
                let _ = win.location().set_href("/login");
            }
        }
    });
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        set_menu_open.set(false);
        logout_action.dispatch(());
    };
    let on_switch_role = move |_| {
        let next = if session.get_untracked().is_admin() {
            Role::Member
        } else {
            Role::Admin
        };
        set_menu_open.set(false);
        session::switch_role(next, set_session);
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href("/");
        }
    };
    let switch_label = move || {
        if is_admin_view() {
            "切换为成员视图"
        } else {
            "切换为管理视图"
        }
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-3">
                        <h1 class="text-xl font-semibold text-fg">"点名助手"</h1>
                        <span class="hidden sm:inline text-sm text-fg-muted">{display_name}</span>
                    </div>
                    <div class="flex items-center">
                        <nav class="hidden lg:flex items-center space-x-4">
                            <a href="/records" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                "签到记录"
                            </a>
                            <a href="/courses" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                "课程表"
                            </a>
                            <a href="/notifications" class="relative text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                "通知"
                                <Show when=move || { unread.get() > 0 }>
                                    <span class="absolute -top-0.5 -right-0.5 min-w-[1.25rem] h-5 px-1 inline-flex items-center justify-center rounded-full bg-status-error-bg text-status-error-text text-xs">
                                        {move || unread.get()}
                                    </span>
                                </Show>
                            </a>
                            <a href="/profile" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                "我的"
                            </a>
                            <Show when=move || is_admin_view()>
                                <a href="/approvals" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                    "审批"
                                </a>
                            </Show>
                            <Show when=move || can_switch_role()>
                                <button
                                    on:click=on_switch_role
                                    class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                >
                                    {switch_label}
                                </button>
                            </Show>
                            <button
                                on:click=on_logout
                                class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50 hover:bg-action-ghost-bg-hover"
                                disabled=move || logout_pending.get()
                            >
                                "退出登录"
                            </button>
                        </nav>
                        <button
                            type="button"
                            class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            on:click=toggle_menu
                            aria-expanded=move || menu_open.get()
                            aria-controls="mobile-nav"
                        >
                            <span class="sr-only">
                                {move || if menu_open.get() { "关闭菜单" } else { "打开菜单" }}
                            </span>
                            <svg
                                class="h-6 w-6"
                                xmlns="http://www.w3.org/2000/svg"
                                fill="none"
                                viewBox="0 0 24 24"
                                stroke="currentColor"
                            >
                                <Show
                                    when=move || menu_open.get()
                                    fallback=move || {
                                        view! {
                                            <path
                                                stroke-linecap="round"
                                                stroke-linejoin="round"
                                                stroke-width="2"
                                                d="M4 6h16M4 12h16M4 18h16"
                                            />
                                        }
                                    }
                                >
                                    <path
                                        stroke-linecap="round"
                                        stroke-linejoin="round"
                                        stroke-width="2"
                                        d="M6 18L18 6M6 6l12 12"
                                    />
                                </Show>
                            </svg>
                        </button>
                    </div>
                </div>
                <Show when=move || menu_open.get()>
                    <div id="mobile-nav" class="lg:hidden border-t border-border">
                        <nav class="px-4 py-3 space-y-2">
                            <a
                                href="/records"
                                class="block text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                on:click=move |_| set_menu_open.set(false)
                            >
                                "签到记录"
                            </a>
                            <a
                                href="/courses"
                                class="block text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                on:click=move |_| set_menu_open.set(false)
                            >
                                "课程表"
                            </a>
                            <a
                                href="/notifications"
                                class="block text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                on:click=move |_| set_menu_open.set(false)
                            >
                                "通知"
                                <Show when=move || { unread.get() > 0 }>
                                    <span class="ml-2 min-w-[1.25rem] h-5 px-1 inline-flex items-center justify-center rounded-full bg-status-error-bg text-status-error-text text-xs">
                                        {move || unread.get()}
                                    </span>
                                </Show>
                            </a>
                            <a
                                href="/profile"
                                class="block text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                on:click=move |_| set_menu_open.set(false)
                            >
                                "我的"
                            </a>
                            <Show when=move || is_admin_view()>
                                <a
                                    href="/approvals"
                                    class="block text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                    on:click=move |_| set_menu_open.set(false)
                                >
                                    "审批"
                                </a>
                            </Show>
                            <Show when=move || can_switch_role()>
                                <button
                                    on:click=on_switch_role
                                    class="w-full text-left text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                >
                                    {switch_label}
                                </button>
                            </Show>
                            <button
                                on:click=on_logout
                                class="w-full text-left text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50 hover:bg-action-ghost-bg-hover"
                                disabled=move || logout_pending.get()
                            >
                                "退出登录"
                            </button>
                        </nav>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-exclamation-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-check-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}
