use super::{
    client::ApiClient,
    types::{ApiError, NotificationBatch},
};

impl ApiClient {
    pub async fn list_notifications(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<NotificationBatch, ApiError> {
        let url = self.url("/wx/notifications").await;
        let params = [
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        self.fetch(self.http().get(&url).query(&params)).await
    }

    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<(), ApiError> {
        let url = self
            .url(&format!("/wx/notifications/{}/read", notification_id))
            .await;
        self.execute_unit(self.http().post(&url)).await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        let url = self.url("/wx/notifications/read-all").await;
        self.execute_unit(self.http().post(&url)).await
    }
}
