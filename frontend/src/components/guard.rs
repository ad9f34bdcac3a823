use leptos::*;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::state::session::use_session;

/// Login URL carrying the interrupted path so a successful login can return
/// to it.
pub fn login_redirect_target(current_path: &str) -> String {
    if current_path.is_empty() || current_path == "/" || current_path.starts_with("/login") {
        return "/login".to_string();
    }
    format!(
        "/login?redirect={}",
        utf8_percent_encode(current_path, NON_ALPHANUMERIC)
    )
}

/// Only in-app paths are honoured; anything absolute or protocol-relative
/// falls back to the records page.
pub fn sanitized_redirect(raw: Option<&str>) -> String {
    match raw {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/records".to_string(),
    }
}

fn current_browser_path() -> Option<String> {
    let location = web_sys::window()?.location();
    let pathname = location.pathname().ok()?;
    let search = location.search().ok().unwrap_or_default();
    Some(format!("{}{}", pathname, search))
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_session();
    let is_authenticated = create_memo(move |_| session.get().is_authenticated());
    create_effect(move |_| {
        if session.get().is_authenticated() {
            return;
        }
        if let Some(win) = web_sys::window() {
            let path = current_browser_path().unwrap_or_default();
            let _ = win.location().set_href(&login_redirect_target(&path));
        }
    });
    view! {
        <Show when=move || is_authenticated.get() fallback=|| ()>
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_session();
    let can_enter = create_memo(move |_| {
        let state = session.get();
        state.is_authenticated() && state.is_admin()
    });
    create_effect(move |_| {
        let state = session.get();
        let target = if !state.is_authenticated() {
            let path = current_browser_path().unwrap_or_default();
            login_redirect_target(&path)
        } else if !state.is_admin() {
            "/records".to_string()
        } else {
            return;
        };
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href(&target);
        }
    });
    view! {
        <Show when=move || can_enter.get() fallback=|| ()>
            {children()}
        </Show>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::{RequireAdmin, RequireAuth};
    use crate::test_support::helpers::{admin_profile, member_profile, provide_session};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_session(Some(member_profile()));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_unauthenticated() {
        let html = render_to_string(move || {
            provide_session(None);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_admin_renders_children_for_admin_session() {
        let html = render_to_string(move || {
            provide_session(Some(admin_profile()));
            view! {
                <RequireAdmin>
                    {|| view! { <div>"admin-protected"</div> }}
                </RequireAdmin>
            }
        });
        assert!(html.contains("admin-protected"));
    }

    #[test]
    fn require_admin_hides_children_for_member_session() {
        let html = render_to_string(move || {
            provide_session(Some(member_profile()));
            view! {
                <RequireAdmin>
                    {|| view! { <div>"admin-protected"</div> }}
                </RequireAdmin>
            }
        });
        assert!(!html.contains("admin-protected"));
    }
}
