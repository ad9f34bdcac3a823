#![cfg(not(coverage))]

use super::*;
use crate::utils::storage::{self, keys};
use httpmock::prelude::*;
use serde_json::json;

fn record_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "planId": "p-1",
        "planName": "周例会",
        "planType": "duty",
        "status": status,
        "checkInTime": "2026-03-02 09:05:00",
        "location": "实验楼 302"
    })
}

fn approval_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "recordId": "r-1",
        "applicantName": "张三",
        "planName": "高数课",
        "planType": "course",
        "reason": "身体不适",
        "status": "pending",
        "submittedAt": "2026-03-01T20:00:00"
    })
}

fn notification_json(id: &str, read: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": "签到提醒",
        "content": "周例会将于 10 分钟后开始",
        "isRead": read,
        "createdAt": "2026-03-02 08:50:00"
    })
}

fn course_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "高等数学",
        "teacherName": "李老师",
        "location": "教学楼 101",
        "dayOfWeek": 1,
        "periodsLabel": "1-2 节"
    })
}

fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.url("/api"))
}

fn clear_session() {
    storage::remove_item(keys::TOKEN);
    storage::remove_item(keys::USER_PROFILE);
    storage::remove_item(keys::ROLE);
}

#[tokio::test]
async fn login_normalizes_camel_case_payload() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/wx/auth/login")
            .json_body(json!({ "username": "zhangsan", "password": "secret" }));
        then.status(200).json_body(json!({
            "code": 200,
            "data": {
                "accessToken": "tok-1",
                "userInfo": {
                    "id": 3,
                    "username": "zhangsan",
                    "realName": "张三",
                    "studentNo": "20230001",
                    "role": "admin"
                },
                "role": "admin"
            }
        }));
    });

    let client = api_client(&server);
    let data = client
        .login(&LoginRequest {
            username: "zhangsan".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(data.token, "tok-1");
    assert_eq!(data.user_info.real_name, "张三");
    assert_eq!(data.role, Some(Role::Admin));
}

#[tokio::test]
async fn record_list_sends_only_active_filters() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/wx/attendance/records")
            .query_param("page", "1")
            .query_param("pageSize", "15")
            .query_param("status", "present");
        then.status(200).json_body(json!({
            "code": 200,
            "data": { "list": [record_json("r-1", "present")] }
        }));
    });

    let client = api_client(&server);
    let batch = client
        .list_attendance_records(&RecordQuery {
            page: 1,
            page_size: 15,
            status: Some("present".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    mock.assert();
    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].status, RecordStatus::Present);
}

#[tokio::test]
async fn record_list_accepts_code_zero_and_success_flag() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/wx/attendance/records")
            .query_param("page", "1");
        then.status(200).json_body(json!({
            "code": 0,
            "data": { "records": [record_json("r-1", "late")] }
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/wx/attendance/records")
            .query_param("page", "2");
        then.status(200).json_body(json!({
            "success": true,
            "data": { "items": [record_json("r-2", "leave")] }
        }));
    });

    let client = api_client(&server);
    let query = RecordQuery {
        page: 1,
        page_size: 15,
        ..Default::default()
    };
    let first = client.list_attendance_records(&query).await.unwrap();
    assert_eq!(first.records[0].status, RecordStatus::Late);

    let second = client
        .list_attendance_records(&RecordQuery { page: 2, ..query })
        .await
        .unwrap();
    assert_eq!(second.records[0].status, RecordStatus::Leave);
}

#[tokio::test]
async fn envelope_failure_surfaces_server_message() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/wx/attendance/records/r-9/cancel");
        then.status(200)
            .json_body(json!({ "code": 500, "message": "签到记录不存在" }));
    });

    let client = api_client(&server);
    let err = client.cancel_attendance_record("r-9").await.unwrap_err();
    assert_eq!(err.code, "SERVER_ERROR");
    assert_eq!(err.error, "签到记录不存在");
}

#[tokio::test]
async fn http_error_without_envelope_falls_back_to_status_text() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/wx/courses");
        then.status(502).body("bad gateway");
    });

    let client = api_client(&server);
    let err = client.list_courses().await.unwrap_err();
    assert_eq!(err.code, "SERVER_ERROR");
    assert_eq!(err.error, "请求失败 (HTTP 502)");
}

#[tokio::test]
async fn stored_token_is_sent_as_bearer_header() {
    clear_session();
    storage::set_item(keys::TOKEN, "tok-abc").unwrap();

    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/wx/user/profile")
            .header("authorization", "Bearer tok-abc");
        then.status(200).json_body(json!({
            "code": 200,
            "data": { "id": "u1", "username": "zhangsan", "realName": "张三" }
        }));
    });

    let client = api_client(&server);
    let profile = client.get_profile().await.unwrap();
    mock.assert();
    assert_eq!(profile.real_name, "张三");
    clear_session();
}

#[tokio::test]
async fn unauthorized_clears_persisted_session() {
    clear_session();
    storage::set_item(keys::TOKEN, "stale").unwrap();
    storage::set_item(keys::USER_PROFILE, "{}").unwrap();
    storage::set_item(keys::ROLE, "admin").unwrap();

    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/wx/user/profile");
        then.status(401).json_body(json!({ "code": 401, "message": "未登录" }));
    });

    let client = api_client(&server);
    let err = client.get_profile().await.unwrap_err();
    assert_eq!(err.error, "登录已过期，请重新登录");
    assert!(storage::get_item(keys::TOKEN).is_none());
    assert!(storage::get_item(keys::USER_PROFILE).is_none());
    assert!(storage::get_item(keys::ROLE).is_none());
}

#[tokio::test]
async fn approval_decisions_post_the_comment() {
    let server = MockServer::start_async().await;
    let approve = server.mock(|when, then| {
        when.method(POST)
            .path("/api/wx/approvals/a-1/approve")
            .json_body(json!({ "comment": "情况属实" }));
        then.status(200).json_body(json!({ "code": 200 }));
    });
    let reject = server.mock(|when, then| {
        when.method(POST)
            .path("/api/wx/approvals/a-2/reject")
            .json_body(json!({ "comment": null }));
        then.status(200).json_body(json!({ "code": 200 }));
    });

    let client = api_client(&server);
    client.approve_request("a-1", Some("情况属实")).await.unwrap();
    client.reject_request("a-2", None).await.unwrap();
    approve.assert();
    reject.assert();
}

#[tokio::test]
async fn approval_list_normalizes_items() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/wx/approvals")
            .query_param("status", "pending");
        then.status(200).json_body(json!({
            "code": 200,
            "data": { "list": [approval_json("a-1")] }
        }));
    });

    let client = api_client(&server);
    let batch = client.list_approvals(1, 15, Some("pending")).await.unwrap();
    assert_eq!(batch.approvals.len(), 1);
    assert_eq!(batch.approvals[0].applicant, "张三");
    assert_eq!(batch.approvals[0].status, ApprovalStatus::Pending);
    assert!(batch.approvals[0].submitted_at.is_some());
}

#[tokio::test]
async fn notification_endpoints_succeed() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/wx/notifications");
        then.status(200).json_body(json!({
            "code": 200,
            "data": { "list": [notification_json("n-1", false), notification_json("n-2", true)] }
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/wx/notifications/n-1/read");
        then.status(200).json_body(json!({ "code": 200 }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/wx/notifications/read-all");
        then.status(200).json_body(json!({ "code": 200 }));
    });

    let client = api_client(&server);
    let batch = client.list_notifications(1, 15).await.unwrap();
    assert_eq!(batch.notifications.len(), 2);
    assert!(!batch.notifications[0].read);
    assert!(batch.notifications[1].read);
    client.mark_notification_read("n-1").await.unwrap();
    client.mark_all_notifications_read().await.unwrap();
}

#[tokio::test]
async fn course_list_normalizes_fields() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/wx/courses");
        then.status(200).json_body(json!({
            "code": 200,
            "data": { "list": [course_json("c-1")] }
        }));
    });

    let client = api_client(&server);
    let batch = client.list_courses().await.unwrap();
    assert_eq!(batch.courses.len(), 1);
    assert_eq!(batch.courses[0].teacher, "李老师");
    assert_eq!(batch.courses[0].weekday, 1);
    assert_eq!(batch.courses[0].periods, "1-2 节");
}

#[tokio::test]
async fn logout_is_fire_and_forget() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/wx/auth/logout");
        then.status(200).json_body(json!({ "code": 200 }));
    });

    let client = api_client(&server);
    client.logout().await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn network_failure_maps_to_network_error() {
    // Nothing listens on the discard port.
    let client = ApiClient::new_with_base_url("http://127.0.0.1:9/api");
    let err = client.list_courses().await.unwrap_err();
    assert_eq!(err.code, "NETWORK_ERROR");
}
