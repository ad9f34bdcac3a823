use crate::api::Course;

pub fn weekday_label(weekday: u8) -> &'static str {
    match weekday {
        1 => "周一",
        2 => "周二",
        3 => "周三",
        4 => "周四",
        5 => "周五",
        6 => "周六",
        7 => "周日",
        _ => "未排",
    }
}

/// Groups the flat course list into the seven weekday buckets, in order.
/// Courses with an out-of-range weekday land in a trailing bucket.
pub fn group_by_weekday(courses: Vec<Course>) -> Vec<(u8, Vec<Course>)> {
    let mut buckets: Vec<(u8, Vec<Course>)> = (1..=7).map(|day| (day, Vec::new())).collect();
    let mut unscheduled = Vec::new();
    for course in courses {
        match course.weekday {
            1..=7 => buckets[course.weekday as usize - 1].1.push(course),
            _ => unscheduled.push(course),
        }
    }
    if !unscheduled.is_empty() {
        buckets.push((0, unscheduled));
    }
    buckets.retain(|(_, list)| !list.is_empty());
    buckets
}
