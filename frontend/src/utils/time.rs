use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

// Date windows are computed in the organization's time zone, not the
// browser's.
const APP_TIME_ZONE: Tz = chrono_tz::Asia::Shanghai;

pub fn now_in_app_tz() -> DateTime<Tz> {
    Utc::now().with_timezone(&APP_TIME_ZONE)
}

pub fn today_in_app_tz() -> NaiveDate {
    now_in_app_tz().date_naive()
}
