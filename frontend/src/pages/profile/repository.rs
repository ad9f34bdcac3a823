use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiError, UserProfile};
use crate::config;

// Serialized because it is the value of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    pub profile: UserProfile,
    pub avatar_url: Option<String>,
}

/// Profile plus the absolute avatar URL. The server stores file paths
/// relative to the file host.
pub async fn load_profile(api: &ApiClient) -> Result<ProfileView, ApiError> {
    let profile = api.get_profile().await?;
    let avatar_url = match &profile.avatar {
        Some(relative) if !relative.is_empty() => {
            let base = config::await_file_base_url().await;
            Some(config::compose_file_view_url(&base, relative))
        }
        _ => None,
    };
    Ok(ProfileView {
        profile,
        avatar_url,
    })
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn avatar_path_becomes_a_file_view_url() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/wx/user/profile");
            then.status(200).json_body(json!({
                "code": 200,
                "data": {
                    "id": "u1",
                    "username": "zhangsan",
                    "realName": "张三",
                    "avatarUrl": "avatars/u1.png"
                }
            }));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let view = load_profile(&api).await.unwrap();
        assert_eq!(view.profile.real_name, "张三");
        let avatar = view.avatar_url.unwrap();
        assert!(avatar.ends_with("/wx/file/view/avatars/u1.png"));
    }

    #[tokio::test]
    async fn missing_avatar_yields_no_url() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/wx/user/profile");
            then.status(200).json_body(json!({
                "code": 200,
                "data": { "id": "u1", "username": "zhangsan", "realName": "张三" }
            }));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let view = load_profile(&api).await.unwrap();
        assert!(view.avatar_url.is_none());
    }
}
