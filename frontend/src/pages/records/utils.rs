//! Filter model, pagination bookkeeping and statistics for the record list.

use chrono::{Days, Months, NaiveDate};

use crate::api::{AttendanceRecord, PlanType, RecordStatus};

pub const PAGE_SIZE: u32 = 15;
/// Wide page used for the statistics fetch; one request covers the window.
pub const STATS_PAGE_SIZE: u32 = 1000;

/// Quick date presets offered next to the status and type selects. Month is
/// the widest; every list window is therefore a subset of the month-wide
/// statistics fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePreset {
    Week,
    #[default]
    Month,
}

impl RangePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangePreset::Week => "week",
            RangePreset::Month => "month",
        }
    }

    pub fn from_value(raw: &str) -> Self {
        match raw {
            "week" => RangePreset::Week,
            _ => RangePreset::Month,
        }
    }
}

/// Start/end dates a preset expands to, inclusive on both ends.
pub fn range_window(preset: RangePreset, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
    match preset {
        RangePreset::Week => (today.checked_sub_days(Days::new(7)), Some(today)),
        RangePreset::Month => (today.checked_sub_months(Months::new(1)), Some(today)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordFilters {
    pub status: Option<RecordStatus>,
    pub plan_type: Option<PlanType>,
    pub range: RangePreset,
}

/// Select values map back onto the filter model; the empty option clears.
pub fn status_from_value(raw: &str) -> Option<RecordStatus> {
    match raw {
        "pending" => Some(RecordStatus::Pending),
        "present" => Some(RecordStatus::Present),
        "late" => Some(RecordStatus::Late),
        "absent" => Some(RecordStatus::Absent),
        "leave" => Some(RecordStatus::Leave),
        _ => None,
    }
}

pub fn plan_type_from_value(raw: &str) -> Option<PlanType> {
    match raw {
        "activity" => Some(PlanType::Activity),
        "course" => Some(PlanType::Course),
        "duty" => Some(PlanType::Duty),
        _ => None,
    }
}

/// The server is expected to filter, but older deployments ignore unknown
/// query parameters; the same predicate is applied again client-side.
pub fn filter_records(records: Vec<AttendanceRecord>, filters: &RecordFilters) -> Vec<AttendanceRecord> {
    records
        .into_iter()
        .filter(|record| {
            filters.status.map(|s| record.status == s).unwrap_or(true)
                && filters
                    .plan_type
                    .map(|t| record.plan_type == t)
                    .unwrap_or(true)
        })
        .collect()
}

/// Whether another page is worth requesting. The server sends no total, so a
/// full pre-filter batch is read as "probably more". A final page of exactly
/// `page_size` rows costs one empty follow-up request.
pub fn has_more(raw_len: usize, page_size: u32) -> bool {
    raw_len >= page_size as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordStats {
    pub pending: usize,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
    pub leave: usize,
    pub total: usize,
}

/// Records with an unrecognized status stay out entirely so the per-status
/// counts always sum to `total`.
pub fn tally(records: &[AttendanceRecord]) -> RecordStats {
    let mut stats = RecordStats::default();
    for record in records {
        match record.status {
            RecordStatus::Pending => stats.pending += 1,
            RecordStatus::Present => stats.present += 1,
            RecordStatus::Late => stats.late += 1,
            RecordStatus::Absent => stats.absent += 1,
            RecordStatus::Leave => stats.leave += 1,
            RecordStatus::Unknown => continue,
        }
        stats.total += 1;
    }
    stats
}

/// Statistics come from a single month-wide fetch; the active filters are
/// reapplied here. The week preset narrows further on the check-in time, and
/// records without one are kept rather than guessed at.
pub fn stats_filter(
    records: Vec<AttendanceRecord>,
    filters: &RecordFilters,
    today: NaiveDate,
) -> Vec<AttendanceRecord> {
    let filtered = filter_records(records, filters);
    if filters.range != RangePreset::Week {
        return filtered;
    }
    let (start, end) = range_window(RangePreset::Week, today);
    filtered
        .into_iter()
        .filter(|record| match record.check_in_time {
            Some(ts) => {
                let date = ts.date();
                start.map(|s| date >= s).unwrap_or(true) && end.map(|e| date <= e).unwrap_or(true)
            }
            None => true,
        })
        .collect()
}

/// One list load may be in flight at a time. Changing the filters invalidates
/// the slot: the stale response's generation no longer matches and its result
/// is dropped instead of overwriting the fresh list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSlot {
    busy: bool,
    generation: u32,
}

impl LoadSlot {
    /// Claims the slot, returning the generation the caller must present to
    /// `finish`. `None` while another load holds it.
    pub fn try_begin(&mut self) -> Option<u32> {
        if self.busy {
            return None;
        }
        self.busy = true;
        Some(self.generation)
    }

    /// Drops whatever is in flight and frees the slot for a fresh load.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.busy = false;
    }

    /// True when the finished load is still current and its result may be
    /// applied.
    pub fn finish(&mut self, generation: u32) -> bool {
        if generation == self.generation {
            self.busy = false;
            true
        } else {
            false
        }
    }
}
