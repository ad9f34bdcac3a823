//! Signed-in session context: token, profile and active role.
//!
//! The session is hydrated synchronously from persisted storage before the
//! first render, so guarded routes never flash the login page for a user who
//! already holds a token. The server re-validates the token on every request;
//! a 401 anywhere tears the session down.

use leptos::*;
use log::warn;

use crate::api::{ApiClient, ApiError, LoginData, LoginRequest, Role, UserProfile};
use crate::utils::storage::{self, keys};

type SessionContext = (ReadSignal<SessionState>, WriteSignal<SessionState>);

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub token: Option<String>,
    pub profile: Option<UserProfile>,
    pub role: Role,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Rebuilds the session from storage. A corrupt profile blob is discarded but
/// the token is kept; the profile endpoint repopulates it.
pub fn hydrate_from_storage() -> SessionState {
    let token = storage::get_item(keys::TOKEN);
    let profile = storage::get_item(keys::USER_PROFILE).and_then(|raw| {
        serde_json::from_str::<UserProfile>(&raw)
            .map_err(|e| warn!("忽略无法解析的本地用户信息: {}", e))
            .ok()
    });
    let role = storage::get_item(keys::ROLE)
        .and_then(|raw| raw.parse::<Role>().ok())
        .or_else(|| profile.as_ref().map(|p| p.role))
        .unwrap_or_default();

    SessionState {
        token,
        profile,
        role,
    }
}

fn persist_session(data: &LoginData) {
    if let Err(e) = storage::set_item(keys::TOKEN, &data.token) {
        warn!("登录凭证写入失败: {}", e);
    }
    match serde_json::to_string(&data.user_info) {
        Ok(raw) => {
            if let Err(e) = storage::set_item(keys::USER_PROFILE, &raw) {
                warn!("用户信息写入失败: {}", e);
            }
        }
        Err(e) => warn!("用户信息序列化失败: {}", e),
    }
    let role = data.role.unwrap_or(data.user_info.role);
    if let Err(e) = storage::set_item(keys::ROLE, role.as_str()) {
        warn!("角色写入失败: {}", e);
    }
}

fn clear_persisted_session() {
    storage::remove_item(keys::TOKEN);
    storage::remove_item(keys::USER_PROFILE);
    storage::remove_item(keys::ROLE);
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let ctx = create_signal(hydrate_from_storage());
    provide_context::<SessionContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| create_signal(SessionState::default()))
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    set_session: WriteSignal<SessionState>,
) -> Result<(), ApiError> {
    let data = api.login(&request).await?;
    persist_session(&data);
    set_session.update(|state| {
        state.role = data.role.unwrap_or(data.user_info.role);
        state.token = Some(data.token);
        state.profile = Some(data.user_info);
    });
    Ok(())
}

/// The server call is best effort; the local session is gone either way.
pub async fn logout(api: &ApiClient, set_session: WriteSignal<SessionState>) {
    if let Err(e) = api.logout().await {
        warn!("退出登录请求失败: {}", e);
    }
    clear_persisted_session();
    set_session.set(SessionState::default());
}

/// Persists the chosen role so it survives a reload.
pub fn switch_role(role: Role, set_session: WriteSignal<SessionState>) {
    if let Err(e) = storage::set_item(keys::ROLE, role.as_str()) {
        warn!("角色写入失败: {}", e);
    }
    set_session.update(|state| state.role = role);
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_session, set_session) = use_session();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_session).await }
    })
}

pub fn use_logout_action() -> Action<(), ()> {
    let (_session, set_session) = use_session();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |_: &()| {
        let api = api.clone();
        async move { logout(&api, set_session).await }
    })
}
