use leptos::*;

pub mod utils;

mod panel;

pub use panel::LoginPanel;

#[component]
pub fn LoginPage() -> impl IntoView {
    let (session, _) = crate::state::session::use_session();
    // A visitor who is already signed in has nothing to do here. Checked once
    // on mount, untracked, so the post-login navigation is not raced.
    create_effect(move |mounted: Option<()>| {
        if mounted.is_none() && session.get_untracked().is_authenticated() {
            if let Some(win) = web_sys::window() {
                let _ = win.location().set_href("/");
            }
        }
    });
    view! { <LoginPanel /> }
}
