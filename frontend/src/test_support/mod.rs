#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{Role, UserProfile};
    use crate::state::session::SessionState;
    use leptos::*;

    pub fn admin_profile() -> UserProfile {
        UserProfile {
            id: "u-admin".into(),
            username: "admin".into(),
            real_name: "王管理".into(),
            student_no: "20210001".into(),
            college: Some("计算机学院".into()),
            phone: None,
            avatar: None,
            role: Role::Admin,
        }
    }

    pub fn member_profile() -> UserProfile {
        UserProfile {
            id: "u-member".into(),
            username: "member".into(),
            real_name: "张三".into(),
            student_no: "20230001".into(),
            college: Some("计算机学院".into()),
            phone: Some("13800000000".into()),
            avatar: None,
            role: Role::Member,
        }
    }

    pub fn provide_session(
        profile: Option<UserProfile>,
    ) -> (ReadSignal<SessionState>, WriteSignal<SessionState>) {
        let role = profile.as_ref().map(|p| p.role).unwrap_or_default();
        let (session, set_session) = create_signal(SessionState {
            token: profile.as_ref().map(|_| "tok-test".to_string()),
            profile,
            role,
        });
        provide_context((session, set_session));
        (session, set_session)
    }
}
