use leptos::*;

use super::utils::{group_by_weekday, weekday_label};
use crate::api::{ApiClient, Course};
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner};

#[component]
pub fn CoursesPage() -> impl IntoView {
    view! {
        <Layout>
            <CoursesPanel />
        </Layout>
    }
}

#[component]
pub fn CoursesPanel() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    let courses_resource = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.list_courses().await.map(|batch| batch.courses) }
        },
    );

    view! {
        <div class="space-y-4 px-4 sm:px-0">
            <h2 class="text-lg font-semibold text-fg">{"课程表"}</h2>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || courses_resource.get().map(|result| match result {
                    Ok(courses) => schedule_view(courses).into_view(),
                    Err(e) => view! { <ErrorMessage message=e.error /> }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

fn schedule_view(courses: Vec<Course>) -> impl IntoView {
    let grouped = group_by_weekday(courses);
    if grouped.is_empty() {
        return view! { <EmptyState title="暂无课程" /> }.into_view();
    }
    grouped
        .into_iter()
        .map(|(weekday, list)| {
            view! {
                <div class="bg-surface-elevated shadow rounded-lg p-4 space-y-2">
                    <h3 class="text-sm font-semibold text-fg">{weekday_label(weekday)}</h3>
                    {list
                        .into_iter()
                        .map(|course| view! {
                            <div class="flex items-center justify-between text-sm border-t border-border pt-2">
                                <div>
                                    <span class="text-fg">{course.name.clone()}</span>
                                    <span class="ml-2 text-fg-muted">{course.teacher.clone()}</span>
                                </div>
                                <div class="text-fg-muted text-xs text-right">
                                    <div>{course.periods.clone()}</div>
                                    {course.location.clone().map(|loc| view! { <div>{loc}</div> })}
                                </div>
                            </div>
                        })
                        .collect_view()}
                </div>
            }
        })
        .collect_view()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    fn course(id: &str, name: &str, weekday: u8) -> Course {
        Course {
            id: id.into(),
            name: name.into(),
            teacher: "李老师".into(),
            location: Some("教学楼 101".into()),
            weekday,
            periods: "1-2 节".into(),
        }
    }

    #[test]
    fn schedule_groups_courses_under_weekday_headers() {
        let html = render_to_string(move || {
            schedule_view(vec![
                course("c-1", "高等数学", 1),
                course("c-2", "大学英语", 3),
            ])
        });
        assert!(html.contains("周一"));
        assert!(html.contains("周三"));
        assert!(html.contains("高等数学"));
        assert!(html.contains("大学英语"));
        assert!(html.contains("教学楼 101"));
    }

    #[test]
    fn empty_schedule_shows_the_empty_state() {
        let html = render_to_string(move || schedule_view(Vec::new()));
        assert!(html.contains("暂无课程"));
    }
}
