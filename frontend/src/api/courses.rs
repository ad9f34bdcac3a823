use super::{
    client::ApiClient,
    types::{ApiError, CourseBatch},
};

impl ApiClient {
    pub async fn list_courses(&self) -> Result<CourseBatch, ApiError> {
        let url = self.url("/wx/courses").await;
        self.fetch(self.http().get(&url)).await
    }
}
