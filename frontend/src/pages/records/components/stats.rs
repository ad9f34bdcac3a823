use leptos::*;

use crate::pages::records::utils::RecordStats;

#[component]
fn StatChip(label: &'static str, value: usize) -> impl IntoView {
    view! {
        <div class="bg-surface-muted rounded-lg px-4 py-3 text-center">
            <div class="text-xl font-semibold text-fg">{value}</div>
            <div class="text-xs text-fg-muted mt-1">{label}</div>
        </div>
    }
}

#[component]
pub fn StatsSection(stats: Signal<Option<RecordStats>>, loading: Signal<bool>) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4">
            <div class="flex items-center justify-between mb-3">
                <h3 class="text-sm font-semibold text-fg">{"近一月统计"}</h3>
                <Show when=move || loading.get()>
                    <span class="text-xs text-fg-muted">{"统计中..."}</span>
                </Show>
            </div>
            {move || match stats.get() {
                Some(counts) => view! {
                    <div class="grid grid-cols-3 sm:grid-cols-6 gap-2">
                        <StatChip label="总计" value=counts.total />
                        <StatChip label="已签到" value=counts.present />
                        <StatChip label="迟到" value=counts.late />
                        <StatChip label="缺勤" value=counts.absent />
                        <StatChip label="请假" value=counts.leave />
                        <StatChip label="待签到" value=counts.pending />
                    </div>
                }.into_view(),
                None => view! {
                    <p class="text-sm text-fg-muted">{"暂无统计数据"}</p>
                }.into_view(),
            }}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn stats_section_renders_counts() {
        let html = render_to_string(move || {
            let stats = Signal::derive(|| {
                Some(RecordStats {
                    pending: 1,
                    present: 7,
                    late: 2,
                    absent: 0,
                    leave: 1,
                    total: 11,
                })
            });
            let loading = Signal::derive(|| false);
            view! { <StatsSection stats=stats loading=loading /> }
        });
        assert!(html.contains("近一月统计"));
        assert!(html.contains("已签到"));
        assert!(html.contains("11"));
    }

    #[test]
    fn stats_section_renders_placeholder_without_data() {
        let html = render_to_string(move || {
            let stats = Signal::derive(|| None);
            let loading = Signal::derive(|| true);
            view! { <StatsSection stats=stats loading=loading /> }
        });
        assert!(html.contains("暂无统计数据"));
        assert!(html.contains("统计中..."));
    }
}
