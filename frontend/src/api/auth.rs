use super::{
    client::ApiClient,
    types::{ApiError, LoginData, LoginRequest, UserProfile},
};

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginData, ApiError> {
        let url = self.url("/wx/auth/login").await;
        self.fetch(self.http().post(&url).json(request)).await
    }

    /// Best effort: the session is torn down locally whether or not the
    /// server acknowledges.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.url("/wx/auth/logout").await;
        self.execute_unit(self.http().post(&url)).await
    }

    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        let url = self.url("/wx/user/profile").await;
        self.fetch(self.http().get(&url)).await
    }
}
