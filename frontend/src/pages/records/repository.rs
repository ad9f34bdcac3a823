use chrono::NaiveDate;

use crate::api::{ApiClient, ApiError, AttendanceRecord, RecordQuery};
use crate::pages::records::utils::{
    filter_records, has_more, range_window, stats_filter, tally, RangePreset, RecordFilters,
    RecordStats, PAGE_SIZE, STATS_PAGE_SIZE,
};

pub struct PageOutcome {
    pub records: Vec<AttendanceRecord>,
    pub has_more: bool,
}

fn build_query(filters: &RecordFilters, page: u32, page_size: u32, today: NaiveDate) -> RecordQuery {
    let (start_date, end_date) = range_window(filters.range, today);
    RecordQuery {
        page,
        page_size,
        status: filters.status.map(|s| s.as_str().to_string()),
        plan_type: filters.plan_type.map(|t| t.as_str().to_string()),
        start_date,
        end_date,
    }
}

/// One page under the active filters. `has_more` is judged on the batch
/// before the client-side pass so a heavily filtered page still advances.
pub async fn fetch_filtered_page(
    api: &ApiClient,
    filters: &RecordFilters,
    page: u32,
    today: NaiveDate,
) -> Result<PageOutcome, ApiError> {
    let query = build_query(filters, page, PAGE_SIZE, today);
    let batch = api.list_attendance_records(&query).await?;
    let more = has_more(batch.records.len(), PAGE_SIZE);
    Ok(PageOutcome {
        records: filter_records(batch.records, filters),
        has_more: more,
    })
}

/// Counts over the last month in one wide fetch, narrowed client-side to the
/// active filters.
pub async fn fetch_stats(
    api: &ApiClient,
    filters: &RecordFilters,
    today: NaiveDate,
) -> Result<RecordStats, ApiError> {
    let window = RecordFilters {
        range: RangePreset::Month,
        ..RecordFilters::default()
    };
    let query = build_query(&window, 1, STATS_PAGE_SIZE, today);
    let batch = api.list_attendance_records(&query).await?;
    Ok(tally(&stats_filter(batch.records, filters, today)))
}

pub async fn cancel_record(api: &ApiClient, record_id: &str) -> Result<(), ApiError> {
    api.cancel_attendance_record(record_id).await
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{PlanType, RecordStatus};
    use httpmock::prelude::*;
    use serde_json::json;

    fn record_json(id: u32, status: &str, plan_type: &str, check_in: &str) -> serde_json::Value {
        json!({
            "id": id,
            "planName": "周例会",
            "planType": plan_type,
            "status": status,
            "checkInTime": check_in
        })
    }

    #[tokio::test]
    async fn page_fetch_applies_filters_after_the_wire() {
        let server = MockServer::start_async().await;
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/wx/attendance/records")
                .query_param("page", "1")
                .query_param("pageSize", "15")
                .query_param("status", "present");
            then.status(200).json_body(json!({
                "code": 200,
                "data": { "list": [
                    record_json(1, "present", "duty", "2026-03-14 09:00:00"),
                    // Ignores the status parameter; filtered out client-side.
                    record_json(2, "late", "duty", "2026-03-14 09:20:00")
                ] }
            }));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let filters = RecordFilters {
            status: Some(RecordStatus::Present),
            ..Default::default()
        };
        let outcome = fetch_filtered_page(&api, &filters, 1, today).await.unwrap();
        mock.assert();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].status, RecordStatus::Present);
        assert!(!outcome.has_more);
    }

    #[tokio::test]
    async fn default_filters_bound_the_list_to_the_month_window() {
        let server = MockServer::start_async().await;
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        // Same dates the statistics fetch sends, so the list and the stats
        // always describe the same window.
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/wx/attendance/records")
                .query_param("pageSize", "15")
                .query_param("startDate", "2026-02-15")
                .query_param("endDate", "2026-03-15");
            then.status(200).json_body(json!({
                "code": 200,
                "data": { "list": [record_json(1, "present", "duty", "2026-03-10 09:00:00")] }
            }));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let outcome = fetch_filtered_page(&api, &RecordFilters::default(), 1, today)
            .await
            .unwrap();
        mock.assert();
        assert_eq!(outcome.records.len(), 1);
    }

    #[tokio::test]
    async fn full_batch_reports_more_even_after_filtering() {
        let server = MockServer::start_async().await;
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let rows: Vec<_> = (0..15)
            .map(|i| record_json(i, if i == 0 { "present" } else { "late" }, "duty", "2026-03-14 09:00:00"))
            .collect();
        server.mock(|when, then| {
            when.method(GET).path("/api/wx/attendance/records");
            then.status(200)
                .json_body(json!({ "code": 200, "data": { "list": rows } }));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let filters = RecordFilters {
            status: Some(RecordStatus::Present),
            ..Default::default()
        };
        let outcome = fetch_filtered_page(&api, &filters, 1, today).await.unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.has_more);
    }

    #[tokio::test]
    async fn stats_fetch_uses_the_month_window_and_wide_page() {
        let server = MockServer::start_async().await;
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/wx/attendance/records")
                .query_param("page", "1")
                .query_param("pageSize", "1000")
                .query_param("startDate", "2026-02-15")
                .query_param("endDate", "2026-03-15");
            then.status(200).json_body(json!({
                "code": 200,
                "data": { "list": [
                    record_json(1, "present", "duty", "2026-03-14 09:00:00"),
                    record_json(2, "present", "course", "2026-03-10 08:00:00"),
                    record_json(3, "absent", "duty", "2026-03-01 09:00:00")
                ] }
            }));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let filters = RecordFilters {
            plan_type: Some(PlanType::Duty),
            ..Default::default()
        };
        let stats = fetch_stats(&api, &filters, today).await.unwrap();
        mock.assert();
        assert_eq!(stats.present, 1);
        assert_eq!(stats.absent, 1);
        assert_eq!(stats.total, 2);
    }
}
