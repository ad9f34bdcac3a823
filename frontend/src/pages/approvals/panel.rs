use leptos::*;

use super::view_model::use_approvals_view_model;
use crate::api::{ApprovalItem, ApprovalStatus};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::empty_state::EmptyState;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner};

#[component]
pub fn ApprovalsPage() -> impl IntoView {
    view! {
        <Layout>
            <ApprovalsPanel />
        </Layout>
    }
}

fn submitted_label(item: &ApprovalItem) -> String {
    item.submitted_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[component]
fn ApprovalCard(item: ApprovalItem, on_decide: Callback<(String, bool, String)>) -> impl IntoView {
    let comment = create_rw_signal(String::new());
    let pending = item.status == ApprovalStatus::Pending;
    let approve_id = item.id.clone();
    let reject_id = item.id.clone();
    let on_approve = on_decide;
    let on_reject = on_decide;

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 space-y-2">
            <div class="flex items-center justify-between">
                <div class="flex items-center gap-2">
                    <span class="text-sm font-semibold text-fg">{item.applicant.clone()}</span>
                    <span class="text-xs text-fg-muted">{item.plan_name.clone()}</span>
                    <span class="text-xs text-fg-muted">{item.plan_type.label()}</span>
                </div>
                <span class="text-xs text-fg-muted">{item.status.label()}</span>
            </div>
            {item.reason.clone().map(|reason| view! {
                <p class="text-sm text-fg-muted">{"请假理由: "}{reason}</p>
            })}
            <p class="text-xs text-fg-muted">{"提交时间: "}{submitted_label(&item)}</p>
            <Show when=move || pending>
                <div class="flex flex-col sm:flex-row gap-2 pt-1">
                    <input
                        type="text"
                        class="flex-1 border border-border rounded px-2 py-1 text-sm"
                        placeholder="审批意见（可选）"
                        prop:value=move || comment.get()
                        on:input=move |ev| comment.set(event_target_value(&ev))
                    />
                    {
                        let id = approve_id.clone();
                        view! {
                            <button
                                class="px-3 py-1 text-sm font-medium rounded bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                                on:click=move |_| on_approve.call((id.clone(), true, comment.get_untracked()))
                            >
                                {"通过"}
                            </button>
                        }
                    }
                    {
                        let id = reject_id.clone();
                        view! {
                            <button
                                class="px-3 py-1 text-sm font-medium rounded bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover"
                                on:click=move |_| on_reject.call((id.clone(), false, comment.get_untracked()))
                            >
                                {"驳回"}
                            </button>
                        }
                    }
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn ApprovalsPanel() -> impl IntoView {
    let vm = use_approvals_view_model();

    let approvals = Signal::derive({
        let vm = vm.clone();
        move || vm.approvals.get()
    });
    let loading = Signal::derive({
        let vm = vm.clone();
        move || vm.loading.get()
    });
    let error = Signal::derive({
        let vm = vm.clone();
        move || vm.error.get()
    });
    let has_more = Signal::derive({
        let vm = vm.clone();
        move || vm.has_more.get()
    });
    let status_filter = vm.status_filter;

    // Decisions are staged until the dialog confirms them.
    let pending_decision = create_rw_signal(None::<(String, bool, String)>);
    let dialog_open = Signal::derive(move || pending_decision.get().is_some());
    let dialog_message = Signal::derive(move || {
        match pending_decision.get() {
            Some((_, true, _)) => "确定要通过该申请吗？".to_string(),
            _ => "确定要驳回该申请吗？".to_string(),
        }
    });
    let on_decide = Callback::new(move |staged: (String, bool, String)| {
        pending_decision.set(Some(staged));
    });
    let confirm_decision = Callback::new({
        let vm = vm.clone();
        move |_| {
            if let Some((id, approve, comment)) = pending_decision.get_untracked() {
                vm.decide(id, approve, &comment);
            }
            pending_decision.set(None);
        }
    });
    let load_more = Callback::new({
        let vm = vm.clone();
        move |_: ()| vm.load_more()
    });

    view! {
        <div class="space-y-4 px-4 sm:px-0">
            <div class="bg-surface-elevated shadow rounded-lg p-4 flex flex-col gap-3 md:flex-row md:items-center md:justify-between">
                <div>
                    <h3 class="text-sm font-semibold text-fg">{"请假审批"}</h3>
                    <p class="text-xs text-fg-muted">{"审批成员提交的请假申请。"}</p>
                </div>
                <select
                    class="border rounded px-2 py-1 text-sm"
                    prop:value=move || status_filter.get()
                    on:change=move |ev| status_filter.set(event_target_value(&ev))
                >
                    <option value="pending">{"待审批"}</option>
                    <option value="approved">{"已通过"}</option>
                    <option value="rejected">{"已驳回"}</option>
                    <option value="">{"全部"}</option>
                </select>
            </div>
            {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
            <Show
                when=move || !approvals.get().is_empty()
                fallback=move || {
                    if loading.get() {
                        view! { <LoadingSpinner /> }.into_view()
                    } else if error.get().is_none() {
                        view! { <EmptyState title="暂无待处理的申请" /> }.into_view()
                    } else {
                        ().into_view()
                    }
                }
            >
                <For
                    each=move || approvals.get()
                    key=|item| (item.id.clone(), item.status)
                    children=move |item| view! { <ApprovalCard item=item on_decide=on_decide /> }
                />
                <Show when=move || loading.get()>
                    <LoadingSpinner />
                </Show>
                <Show when=move || has_more.get() && !loading.get()>
                    <div class="flex justify-center pt-2">
                        <button
                            class="px-4 py-2 text-sm font-medium rounded-md bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| load_more.call(())
                        >
                            {"加载更多"}
                        </button>
                    </div>
                </Show>
            </Show>
            <ConfirmDialog
                is_open=dialog_open
                title="确认审批"
                message=dialog_message
                on_confirm=confirm_decision
                on_cancel=Callback::new(move |_| pending_decision.set(None))
            />
        </div>
    }
}
