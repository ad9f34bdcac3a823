use leptos::*;

use crate::pages::records::utils::{
    plan_type_from_value, status_from_value, RangePreset, RecordFilters,
};

#[component]
pub fn RecordsFilter(filters: RwSignal<RecordFilters>) -> impl IntoView {
    let status_value = move || {
        filters
            .get()
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or_default()
    };
    let type_value = move || {
        filters
            .get()
            .plan_type
            .map(|t| t.as_str().to_string())
            .unwrap_or_default()
    };
    let range_value = move || filters.get().range.as_str().to_string();

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 flex flex-col gap-3 md:flex-row md:items-center md:justify-between">
            <div>
                <h3 class="text-sm font-semibold text-fg">{"筛选签到记录"}</h3>
                <p class="text-xs text-fg-muted">{"按状态、类型或时间范围查看记录。"}</p>
            </div>
            <div class="flex flex-wrap items-center gap-2">
                <select
                    class="border rounded px-2 py-1 text-sm"
                    prop:value=status_value
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filters.update(|f| f.status = status_from_value(&value));
                    }
                >
                    <option value="">{"全部状态"}</option>
                    <option value="pending">{"待签到"}</option>
                    <option value="present">{"已签到"}</option>
                    <option value="late">{"迟到"}</option>
                    <option value="absent">{"缺勤"}</option>
                    <option value="leave">{"请假"}</option>
                </select>
                <select
                    class="border rounded px-2 py-1 text-sm"
                    prop:value=type_value
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filters.update(|f| f.plan_type = plan_type_from_value(&value));
                    }
                >
                    <option value="">{"全部类型"}</option>
                    <option value="activity">{"活动"}</option>
                    <option value="course">{"课程"}</option>
                    <option value="duty">{"值班"}</option>
                </select>
                <select
                    class="border rounded px-2 py-1 text-sm"
                    prop:value=range_value
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filters.update(|f| f.range = RangePreset::from_value(&value));
                    }
                >
                    <option value="week">{"最近一周"}</option>
                    <option value="month">{"最近一月"}</option>
                </select>
                <button
                    class="text-sm text-fg-muted underline"
                    on:click=move |_| filters.set(RecordFilters::default())
                >
                    {"清除"}
                </button>
            </div>
        </div>
    }
}
