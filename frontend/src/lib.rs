use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

use components::guard::{RequireAdmin, RequireAuth};
use components::notice::NoticeStack;
use pages::{
    approvals::ApprovalsPage, courses::CoursesPage, home::HomePage, login::LoginPage,
    notifications::NotificationsPage, profile::ProfilePage, records::RecordsPage,
};
use state::{notices::NoticeProvider, session::SessionProvider, unread::UnreadProvider};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(api::ApiClient::new());
    view! {
        <Title text="点名助手"/>
        <SessionProvider>
            <NoticeProvider>
                <UnreadProvider>
                    <NoticeStack/>
                    <Router>
                        <Routes>
                            <Route path="/" view=HomePage/>
                            <Route path="/login" view=LoginPage/>
                            <Route path="/records" view=ProtectedRecords/>
                            <Route path="/courses" view=ProtectedCourses/>
                            <Route path="/notifications" view=ProtectedNotifications/>
                            <Route path="/profile" view=ProtectedProfile/>
                            <Route path="/approvals" view=ProtectedApprovals/>
                        </Routes>
                    </Router>
                </UnreadProvider>
            </NoticeProvider>
        </SessionProvider>
    }
}

#[component]
fn ProtectedRecords() -> impl IntoView {
    view! { <RequireAuth><RecordsPage/></RequireAuth> }
}

#[component]
fn ProtectedCourses() -> impl IntoView {
    view! { <RequireAuth><CoursesPage/></RequireAuth> }
}

#[component]
fn ProtectedNotifications() -> impl IntoView {
    view! { <RequireAuth><NotificationsPage/></RequireAuth> }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <RequireAuth><ProfilePage/></RequireAuth> }
}

#[component]
fn ProtectedApprovals() -> impl IntoView {
    view! { <RequireAdmin><ApprovalsPage/></RequireAdmin> }
}

/// Resolves runtime config, then mounts the app.
#[cfg(target_arch = "wasm32")]
pub fn boot() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let perf = web_sys::window().and_then(|w| w.performance());
    let t0 = perf.as_ref().map(|p| p.now());
    log::info!("正在启动点名助手，加载运行时配置");

    wasm_bindgen_futures::spawn_local(async move {
        config::init().await;
        if let (Some(p), Some(start)) = (perf.as_ref(), t0) {
            log::info!("运行时配置加载完成（{:.0} ms）", p.now() - start);
        }
        mount_to_body(App);
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn boot() {}
