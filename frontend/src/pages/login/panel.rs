use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

use crate::{
    api::{ApiError, LoginRequest},
    components::error::InlineErrorMessage,
    components::guard::sanitized_redirect,
    pages::login::utils,
    state::session,
};

/// Where a successful login lands. The `redirect` query parameter is honoured
/// for in-app paths only.
fn post_login_target() -> String {
    let raw = web_sys::window()
        .and_then(|win| win.location().search().ok())
        .and_then(|search| utils::redirect_from_search(&search));
    sanitized_redirect(raw.as_deref())
}

#[component]
pub fn LoginPanel() -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<ApiError>);

    let login_action = session::use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    set_error.set(None);
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&post_login_target());
                    }
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let uname = username.get_untracked();
        let pword = password.get_untracked();

        if let Err(msg) = utils::validate_credentials(&uname, &pword) {
            set_error.set(Some(ApiError::validation(msg)));
            return;
        }
        set_error.set(None);

        login_action.dispatch(LoginRequest {
            username: uname,
            password: pword,
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                        {"登录点名助手"}
                    </h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">
                        {"学生组织考勤管理"}
                    </p>
                </div>
                <form class="mt-8 space-y-6" on:submit=handle_submit>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <div>
                            <label for="username" class="sr-only">{"用户名"}</label>
                            <input
                                id="username"
                                name="username"
                                type="text"
                                required
                                class="appearance-none rounded-none relative block w-full px-3 py-2 border border-border placeholder-fg-muted text-fg rounded-t-md focus:outline-none focus:ring-action-primary-bg focus:border-action-primary-bg focus:z-10 sm:text-sm"
                                placeholder="用户名"
                                prop:value=username
                                on:input=move |ev| {
                                    let target = event_target::<HtmlInputElement>(&ev);
                                    set_username.set(target.value());
                                }
                            />
                        </div>
                        <div>
                            <label for="password" class="sr-only">{"密码"}</label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                required
                                class="appearance-none rounded-none relative block w-full px-3 py-2 border border-border placeholder-fg-muted text-fg rounded-b-md focus:outline-none focus:ring-action-primary-bg focus:border-action-primary-bg focus:z-10 sm:text-sm"
                                placeholder="密码"
                                prop:value=password
                                on:input=move |ev| {
                                    let target = event_target::<HtmlInputElement>(&ev);
                                    set_password.set(target.value());
                                }
                            />
                        </div>
                    </div>
                    <InlineErrorMessage error=error.into() />

                    <button
                        type="submit"
                        class="group relative w-full flex justify-center py-2 px-4 border border-transparent text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover focus:outline-none disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "登录中..." } else { "登录" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::provide_session;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn login_panel_renders_the_form() {
        let html = render_to_string(move || {
            provide_session(None);
            view! { <LoginPanel /> }
        });
        assert!(html.contains("登录点名助手"));
        assert!(html.contains("用户名"));
        assert!(html.contains("密码"));
    }
}
