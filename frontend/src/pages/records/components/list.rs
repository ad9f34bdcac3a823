use leptos::*;

use crate::api::{AttendanceRecord, RecordStatus};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, LoadingSpinner};

fn status_badge_class(status: RecordStatus) -> &'static str {
    match status {
        RecordStatus::Present => "bg-status-success-bg text-status-success-text",
        RecordStatus::Pending => "bg-surface-muted text-fg",
        RecordStatus::Late => "bg-status-warning-bg text-status-warning-text",
        RecordStatus::Absent => "bg-status-error-bg text-status-error-text",
        RecordStatus::Leave | RecordStatus::Unknown => "bg-surface-muted text-fg-muted",
    }
}

fn check_in_label(record: &AttendanceRecord) -> String {
    record
        .check_in_time
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "—".to_string())
}

#[component]
fn RecordCard(record: AttendanceRecord, on_cancel: Callback<String>) -> impl IntoView {
    let cancellable = record.status == RecordStatus::Pending;
    let id = record.id.clone();
    let badge = format!(
        "inline-flex items-center px-2 py-0.5 rounded text-xs font-medium {}",
        status_badge_class(record.status)
    );
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 flex items-start justify-between gap-3">
            <div class="space-y-1">
                <div class="flex items-center gap-2">
                    <span class="text-sm font-semibold text-fg">{record.plan_name.clone()}</span>
                    <span class="text-xs text-fg-muted">{record.plan_type.label()}</span>
                </div>
                <div class="text-xs text-fg-muted">
                    {"签到时间: "}{check_in_label(&record)}
                </div>
                {record.location.clone().map(|loc| view! {
                    <div class="text-xs text-fg-muted">{"地点: "}{loc}</div>
                })}
                {record.remark.clone().map(|remark| view! {
                    <div class="text-xs text-fg-muted">{"备注: "}{remark}</div>
                })}
            </div>
            <div class="flex flex-col items-end gap-2">
                <span class=badge>{record.status.label()}</span>
                <Show when=move || cancellable>
                    {
                        let id = id.clone();
                        view! {
                            <button
                                class="text-xs text-status-error-text underline"
                                on:click=move |_| on_cancel.call(id.clone())
                            >
                                {"取消"}
                            </button>
                        }
                    }
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn RecordsList(
    records: Signal<Vec<AttendanceRecord>>,
    loading: Signal<bool>,
    error: Signal<Option<String>>,
    has_more: Signal<bool>,
    on_load_more: Callback<()>,
    on_cancel: Callback<String>,
) -> impl IntoView {
    let pending_cancel = create_rw_signal(None::<String>);
    let dialog_open = Signal::derive(move || pending_cancel.get().is_some());
    let confirm_cancel = Callback::new(move |_| {
        if let Some(id) = pending_cancel.get_untracked() {
            on_cancel.call(id);
        }
        pending_cancel.set(None);
    });
    let request_cancel = Callback::new(move |id: String| pending_cancel.set(Some(id)));

    view! {
        <div class="space-y-3">
            {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
            <Show
                when=move || !records.get().is_empty()
                fallback=move || {
                    if loading.get() {
                        view! { <LoadingSpinner /> }.into_view()
                    } else if error.get().is_none() {
                        view! {
                            <EmptyState
                                title="暂无签到记录"
                                description="调整筛选条件或等待新的签到计划。"
                            />
                        }.into_view()
                    } else {
                        ().into_view()
                    }
                }
            >
                <For
                    each=move || records.get()
                    key=|record| record.id.clone()
                    children=move |record| view! {
                        <RecordCard record=record on_cancel=request_cancel />
                    }
                />
                <Show when=move || loading.get()>
                    <LoadingSpinner />
                </Show>
                <Show when=move || has_more.get() && !loading.get()>
                    <div class="flex justify-center pt-2">
                        <button
                            class="px-4 py-2 text-sm font-medium rounded-md bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| on_load_more.call(())
                        >
                            {"加载更多"}
                        </button>
                    </div>
                </Show>
            </Show>
            <ConfirmDialog
                is_open=dialog_open
                title="取消签到"
                message="确定要取消这条签到记录吗？"
                on_confirm=confirm_cancel
                on_cancel=Callback::new(move |_| pending_cancel.set(None))
                destructive=true
            />
        </div>
    }
}
