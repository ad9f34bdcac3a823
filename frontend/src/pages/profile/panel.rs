use leptos::*;

use super::repository::{self, ProfileView};
use crate::api::ApiClient;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner};
use crate::state::session::use_session;

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <Layout>
            <ProfilePanel />
        </Layout>
    }
}

#[component]
pub fn ProfilePanel() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let (session, set_session) = use_session();

    let profile_resource = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { repository::load_profile(&api).await }
        },
    );

    // Keep the session's cached profile in step with the fresh fetch.
    create_effect(move |_| {
        if let Some(Ok(view)) = profile_resource.get() {
            set_session.update(|state| state.profile = Some(view.profile.clone()));
        }
    });

    let role_label = move || session.get().role.label();

    view! {
        <div class="space-y-4 px-4 sm:px-0">
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || profile_resource.get().map(|result| match result {
                    Ok(view) => profile_card(view, role_label()).into_view(),
                    Err(e) => view! { <ErrorMessage message=e.error /> }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

fn profile_card(view: ProfileView, role_label: &'static str) -> impl IntoView {
    let profile = view.profile;
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <div class="flex items-center gap-4">
                {match view.avatar_url {
                    Some(url) => view! {
                        <img src=url alt="头像" class="h-16 w-16 rounded-full object-cover" />
                    }.into_view(),
                    None => view! {
                        <div class="h-16 w-16 rounded-full bg-surface-muted flex items-center justify-center text-xl text-fg-muted">
                            {profile.real_name.chars().next().map(String::from).unwrap_or_default()}
                        </div>
                    }.into_view(),
                }}
                <div>
                    <h2 class="text-lg font-semibold text-fg">{profile.real_name.clone()}</h2>
                    <p class="text-sm text-fg-muted">{role_label}</p>
                </div>
            </div>
            <dl class="grid grid-cols-1 sm:grid-cols-2 gap-x-6 gap-y-3 text-sm">
                <div>
                    <dt class="text-fg-muted">{"用户名"}</dt>
                    <dd class="text-fg">{profile.username.clone()}</dd>
                </div>
                <div>
                    <dt class="text-fg-muted">{"学号"}</dt>
                    <dd class="text-fg">{profile.student_no.clone()}</dd>
                </div>
                {profile.college.clone().map(|college| view! {
                    <div>
                        <dt class="text-fg-muted">{"学院"}</dt>
                        <dd class="text-fg">{college}</dd>
                    </div>
                })}
                {profile.phone.clone().map(|phone| view! {
                    <div>
                        <dt class="text-fg-muted">{"电话"}</dt>
                        <dd class="text-fg">{phone}</dd>
                    </div>
                })}
            </dl>
        </div>
    }
}
