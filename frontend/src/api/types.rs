//! Wire types and the normalization boundary.
//!
//! The server mixes snake_case and camelCase field names and is inconsistent
//! about how it signals success. Everything is absorbed here, once, during
//! deserialization: serde aliases map the name variants onto one canonical
//! shape, unknown enum strings fall back to `Unknown` instead of failing the
//! whole batch, and the envelope accepts every success convention the server
//! uses. No consumer ever sees a wire variant.

use chrono::{DateTime, NaiveDateTime};
use leptos::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Uniform `{code, data, message}` wrapper on every response. Success is
/// `code == 200`, `code == 0`, or `success == true`; the server uses all
/// three.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: Option<i64>,
    pub success: Option<bool>,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self.code, Some(200) | Some(0)) || self.success == Some(true)
    }

    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::server(
                self.message
                    .unwrap_or_else(|| "服务器返回了未知错误".to_string()),
            ))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "NETWORK_ERROR".to_string(),
            details: None,
        }
    }

    pub fn server(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "SERVER_ERROR".to_string(),
            details: None,
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "DECODE_ERROR".to_string(),
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }
}

/// Exactly two roles. Anything else the server might send collapses to
/// `Member`, the safe default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(other)]
    Member,
}

impl Default for Role {
    fn default() -> Self {
        Role::Member
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Member => "成员",
            Role::Admin => "管理员",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Pending,
    Present,
    Late,
    Absent,
    Leave,
    #[serde(other)]
    Unknown,
}

impl Default for RecordStatus {
    fn default() -> Self {
        RecordStatus::Unknown
    }
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Present => "present",
            RecordStatus::Late => "late",
            RecordStatus::Absent => "absent",
            RecordStatus::Leave => "leave",
            RecordStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "待签到",
            RecordStatus::Present => "已签到",
            RecordStatus::Late => "迟到",
            RecordStatus::Absent => "缺勤",
            RecordStatus::Leave => "请假",
            RecordStatus::Unknown => "未知",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Activity,
    Course,
    Duty,
    #[serde(other)]
    Unknown,
}

impl Default for PlanType {
    fn default() -> Self {
        PlanType::Unknown
    }
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Activity => "activity",
            PlanType::Course => "course",
            PlanType::Duty => "duty",
            PlanType::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanType::Activity => "活动",
            PlanType::Course => "课程",
            PlanType::Duty => "值班",
            PlanType::Unknown => "其他",
        }
    }
}

// Hash lets (id, status) pairs key the approvals list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl Default for ApprovalStatus {
    fn default() -> Self {
        ApprovalStatus::Unknown
    }
}

impl ApprovalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "待审批",
            ApprovalStatus::Approved => "已通过",
            ApprovalStatus::Rejected => "已驳回",
            ApprovalStatus::Cancelled => "已取消",
            ApprovalStatus::Unknown => "未知",
        }
    }
}

/// One student's recorded response to an attendance plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(alias = "recordId", deserialize_with = "de_flexible_id")]
    pub id: String,
    #[serde(rename = "plan_id", alias = "planId", default, deserialize_with = "de_flexible_id")]
    pub plan_id: String,
    #[serde(rename = "plan_name", alias = "planName", alias = "title", default)]
    pub plan_name: String,
    #[serde(rename = "plan_type", alias = "planType", alias = "type", default)]
    pub plan_type: PlanType,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(
        rename = "check_in_time",
        alias = "checkInTime",
        alias = "checkinTime",
        default,
        deserialize_with = "de_flexible_datetime"
    )]
    pub check_in_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "de_flexible_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "real_name", alias = "realName", alias = "name", default)]
    pub real_name: String,
    #[serde(
        rename = "student_no",
        alias = "studentNo",
        alias = "studentNumber",
        default
    )]
    pub student_no: String,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(alias = "avatarUrl", alias = "avatar_url", default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    #[serde(rename = "userInfo", alias = "user_info", alias = "user", alias = "profile")]
    pub user_info: UserProfile,
    #[serde(default)]
    pub role: Option<Role>,
}

/// A pending leave request awaiting an admin decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalItem {
    #[serde(deserialize_with = "de_flexible_id")]
    pub id: String,
    #[serde(rename = "record_id", alias = "recordId", default, deserialize_with = "de_flexible_id")]
    pub record_id: String,
    #[serde(
        rename = "applicant",
        alias = "applicantName",
        alias = "studentName",
        alias = "student_name",
        default
    )]
    pub applicant: String,
    #[serde(rename = "plan_name", alias = "planName", default)]
    pub plan_name: String,
    #[serde(rename = "plan_type", alias = "planType", alias = "type", default)]
    pub plan_type: PlanType,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(
        rename = "submitted_at",
        alias = "submittedAt",
        alias = "createdAt",
        alias = "created_at",
        default,
        deserialize_with = "de_flexible_datetime"
    )]
    pub submitted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(deserialize_with = "de_flexible_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "read", alias = "is_read", alias = "isRead", default)]
    pub read: bool,
    #[serde(
        rename = "created_at",
        alias = "createdAt",
        alias = "createTime",
        default,
        deserialize_with = "de_flexible_datetime"
    )]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(deserialize_with = "de_flexible_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "teacher", alias = "teacherName", alias = "teacher_name", default)]
    pub teacher: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "weekday", alias = "dayOfWeek", alias = "day_of_week", default)]
    pub weekday: u8,
    #[serde(rename = "periods", alias = "periodsLabel", alias = "section", default)]
    pub periods: String,
}

// List payloads inside the envelope; some endpoints name the array `list`.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordBatch {
    #[serde(default, alias = "list", alias = "items")]
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApprovalBatch {
    #[serde(default, alias = "list", alias = "items")]
    pub approvals: Vec<ApprovalItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationBatch {
    #[serde(default, alias = "list", alias = "items")]
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseBatch {
    #[serde(default, alias = "list", alias = "items")]
    pub courses: Vec<Course>,
}

/// Record and user ids arrive as either JSON strings or numbers.
fn de_flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Timestamps arrive as `YYYY-MM-DD HH:MM:SS`, ISO-8601, or RFC 3339; an
/// unparseable value degrades to `None` rather than failing the record.
fn de_flexible_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_flexible_datetime))
}

pub fn parse_flexible_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use leptos::IntoView;
    use serde_json::json;

    #[test]
    fn envelope_accepts_all_three_success_conventions() {
        let by_code_200: Envelope<i32> =
            serde_json::from_value(json!({ "code": 200, "data": 1 })).unwrap();
        assert!(by_code_200.is_success());

        let by_code_0: Envelope<i32> =
            serde_json::from_value(json!({ "code": 0, "data": 2 })).unwrap();
        assert!(by_code_0.is_success());

        let by_flag: Envelope<i32> =
            serde_json::from_value(json!({ "success": true, "data": 3 })).unwrap();
        assert!(by_flag.is_success());
        assert_eq!(by_flag.into_result().unwrap(), Some(3));
    }

    #[test]
    fn envelope_failure_carries_server_message() {
        let failed: Envelope<i32> =
            serde_json::from_value(json!({ "code": 500, "message": "签到计划不存在" })).unwrap();
        let err = failed.into_result().unwrap_err();
        assert_eq!(err.code, "SERVER_ERROR");
        assert_eq!(err.error, "签到计划不存在");
    }

    #[test]
    fn record_normalizes_camel_case_and_numeric_ids() {
        let record: AttendanceRecord = serde_json::from_value(json!({
            "recordId": 42,
            "planId": "p-9",
            "planName": "周例会",
            "planType": "duty",
            "status": "late",
            "checkInTime": "2026-03-02 09:05:00",
            "location": "实验楼 302"
        }))
        .unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.plan_id, "p-9");
        assert_eq!(record.plan_name, "周例会");
        assert_eq!(record.plan_type, PlanType::Duty);
        assert_eq!(record.status, RecordStatus::Late);
        assert!(record.check_in_time.is_some());
        assert_eq!(record.remark, None);
    }

    #[test]
    fn record_accepts_snake_case_and_type_alias() {
        let record: AttendanceRecord = serde_json::from_value(json!({
            "id": "r-1",
            "plan_id": 7,
            "plan_name": "高数课",
            "type": "course",
            "status": "present",
            "check_in_time": "2026-03-02T08:00:00"
        }))
        .unwrap();
        assert_eq!(record.plan_type, PlanType::Course);
        assert_eq!(record.status, RecordStatus::Present);
    }

    #[test]
    fn unknown_enum_strings_do_not_fail_the_batch() {
        let batch: RecordBatch = serde_json::from_value(json!({
            "records": [
                { "id": "r-1", "status": "present", "plan_type": "activity" },
                { "id": "r-2", "status": "totally-new-status", "plan_type": "exam" }
            ]
        }))
        .unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[1].status, RecordStatus::Unknown);
        assert_eq!(batch.records[1].plan_type, PlanType::Unknown);
    }

    #[test]
    fn batch_accepts_list_alias() {
        let batch: RecordBatch = serde_json::from_value(json!({
            "list": [{ "id": "r-1", "status": "pending" }]
        }))
        .unwrap();
        assert_eq!(batch.records.len(), 1);
    }

    #[test]
    fn unparseable_timestamp_degrades_to_none() {
        let record: AttendanceRecord = serde_json::from_value(json!({
            "id": "r-1",
            "status": "present",
            "check_in_time": "昨天上午"
        }))
        .unwrap();
        assert!(record.check_in_time.is_none());
    }

    #[test]
    fn login_data_normalizes_token_and_profile_variants() {
        let data: LoginData = serde_json::from_value(json!({
            "accessToken": "tok-1",
            "userInfo": {
                "id": 3,
                "username": "zhangsan",
                "realName": "张三",
                "studentNo": "20230001",
                "avatarUrl": "avatars/3.png",
                "role": "admin"
            },
            "role": "admin"
        }))
        .unwrap();
        assert_eq!(data.token, "tok-1");
        assert_eq!(data.user_info.real_name, "张三");
        assert_eq!(data.user_info.student_no, "20230001");
        assert_eq!(data.user_info.avatar.as_deref(), Some("avatars/3.png"));
        assert_eq!(data.role, Some(Role::Admin));
    }

    #[test]
    fn envelope_works_for_payloads_without_default() {
        // LoginData has no Default impl; the envelope must not require one.
        let envelope: Envelope<LoginData> = serde_json::from_value(json!({
            "code": 200,
            "data": {
                "accessToken": "tok-1",
                "userInfo": { "id": "u1", "username": "zhangsan" }
            }
        }))
        .unwrap();
        let data = envelope.into_result().unwrap().unwrap();
        assert_eq!(data.token, "tok-1");
    }

    #[test]
    fn role_parses_both_known_values() {
        let admin: Role = serde_json::from_value(json!("admin")).unwrap();
        assert_eq!(admin, Role::Admin);
        let member: Role = serde_json::from_value(json!("member")).unwrap();
        assert_eq!(member, Role::Member);
    }

    #[test]
    fn unknown_role_collapses_to_member() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": "u1",
            "role": "superintendent"
        }))
        .unwrap();
        assert_eq!(profile.role, Role::Member);
    }

    #[test]
    fn notification_read_flag_accepts_all_names() {
        for key in ["read", "is_read", "isRead"] {
            let n: Notification =
                serde_json::from_value(json!({ "id": "n1", key: true })).unwrap();
            assert!(n.read, "flag name {key} should map to read");
        }
    }

    #[test]
    fn api_error_helpers_set_expected_codes() {
        assert_eq!(ApiError::network("x").code, "NETWORK_ERROR");
        assert_eq!(ApiError::server("x").code, "SERVER_ERROR");
        assert_eq!(ApiError::decode("x").code, "DECODE_ERROR");
        assert_eq!(ApiError::validation("x").code, "VALIDATION_ERROR");
        assert_eq!(ApiError::unknown("x").code, "UNKNOWN");
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::server("请求失败");
        assert_eq!(format!("{}", error), "请求失败");
        let raw: String = error.into();
        assert_eq!(raw, "请求失败");
    }

    #[test]
    fn api_error_can_be_converted_to_view() {
        let _: View = ApiError::network("网络异常").into_view();
    }
}
