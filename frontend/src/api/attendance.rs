use chrono::NaiveDate;

use super::{
    client::ApiClient,
    types::{ApiError, RecordBatch},
};

/// Query parameters for the record list endpoint. Only non-empty filter
/// fields are sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    pub page: u32,
    pub page_size: u32,
    pub status: Option<String>,
    pub plan_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl RecordQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(status) = &self.status {
            params.push(("status", status.clone()));
        }
        if let Some(plan_type) = &self.plan_type {
            params.push(("type", plan_type.clone()));
        }
        if let Some(start) = self.start_date {
            params.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

impl ApiClient {
    pub async fn list_attendance_records(
        &self,
        query: &RecordQuery,
    ) -> Result<RecordBatch, ApiError> {
        let url = self.url("/wx/attendance/records").await;
        self.fetch(self.http().get(&url).query(&query.to_params()))
            .await
    }

    /// Cancels the viewer's own pending record.
    pub async fn cancel_attendance_record(&self, record_id: &str) -> Result<(), ApiError> {
        let url = self
            .url(&format!("/wx/attendance/records/{}/cancel", record_id))
            .await;
        self.execute_unit(self.http().post(&url)).await
    }
}
