use serde_json::json;

use super::{
    client::ApiClient,
    types::{ApiError, ApprovalBatch},
};

impl ApiClient {
    pub async fn list_approvals(
        &self,
        page: u32,
        page_size: u32,
        status: Option<&str>,
    ) -> Result<ApprovalBatch, ApiError> {
        let url = self.url("/wx/approvals").await;
        let mut params = vec![
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(status) = status {
            params.push(("status", status.to_string()));
        }
        self.fetch(self.http().get(&url).query(&params)).await
    }

    pub async fn approve_request(
        &self,
        approval_id: &str,
        comment: Option<&str>,
    ) -> Result<(), ApiError> {
        let url = self
            .url(&format!("/wx/approvals/{}/approve", approval_id))
            .await;
        self.execute_unit(self.http().post(&url).json(&json!({ "comment": comment })))
            .await
    }

    pub async fn reject_request(
        &self,
        approval_id: &str,
        comment: Option<&str>,
    ) -> Result<(), ApiError> {
        let url = self
            .url(&format!("/wx/approvals/{}/reject", approval_id))
            .await;
        self.execute_unit(self.http().post(&url).json(&json!({ "comment": comment })))
            .await
    }
}
