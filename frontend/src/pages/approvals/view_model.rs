use leptos::*;

use crate::api::{ApiClient, ApiError, ApprovalItem};
use crate::pages::records::utils::{has_more, LoadSlot, PAGE_SIZE};
use crate::state::notices::{push_error, push_success, use_notices, Notices};

/// Admin decision over a leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub approval_id: String,
    pub approve: bool,
    pub comment: Option<String>,
}

pub fn normalize_comment(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Clone)]
pub struct ApprovalsViewModel {
    pub api: ApiClient,
    pub status_filter: RwSignal<String>,
    pub approvals: RwSignal<Vec<ApprovalItem>>,
    pub page: RwSignal<u32>,
    pub has_more: RwSignal<bool>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub decision_action: Action<Decision, Result<Decision, ApiError>>,
    notices: Notices,
    slot: StoredValue<LoadSlot>,
}

impl ApprovalsViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let notices = use_notices();

        let api_for_decision = api.clone();
        let decision_action = create_action(move |decision: &Decision| {
            let api = api_for_decision.clone();
            let decision = decision.clone();
            async move {
                let comment = decision.comment.as_deref();
                if decision.approve {
                    api.approve_request(&decision.approval_id, comment).await?;
                } else {
                    api.reject_request(&decision.approval_id, comment).await?;
                }
                Ok(decision)
            }
        });

        let vm = Self {
            api,
            status_filter: create_rw_signal("pending".to_string()),
            approvals: create_rw_signal(Vec::new()),
            page: create_rw_signal(1),
            has_more: create_rw_signal(false),
            loading: create_rw_signal(false),
            error: create_rw_signal(None),
            decision_action,
            notices,
            slot: store_value(LoadSlot::default()),
        };

        {
            let vm = vm.clone();
            create_effect(move |_| {
                let _ = vm.status_filter.get();
                vm.reload();
            });
        }
        {
            let vm = vm.clone();
            create_effect(move |_| {
                if let Some(result) = vm.decision_action.value().get() {
                    match result {
                        Ok(decision) => {
                            let text = if decision.approve {
                                "已通过该申请"
                            } else {
                                "已驳回该申请"
                            };
                            push_success(vm.notices, text);
                            vm.reload();
                        }
                        Err(e) => push_error(vm.notices, e.error),
                    }
                }
            });
        }

        vm
    }

    /// Drops any in-flight page and reloads page 1 under the current status
    /// filter. A stale response landing after the filter changed is ignored.
    pub fn reload(&self) {
        self.slot.update_value(|slot| slot.invalidate());
        self.error.set(None);
        self.load_page(1, true);
    }

    pub fn load_more(&self) {
        if !self.has_more.get_untracked() {
            return;
        }
        let next = self.page.get_untracked() + 1;
        self.load_page(next, false);
    }

    pub fn decide(&self, approval_id: String, approve: bool, raw_comment: &str) {
        self.decision_action.dispatch(Decision {
            approval_id,
            approve,
            comment: normalize_comment(raw_comment),
        });
    }

    fn load_page(&self, page: u32, replace: bool) {
        let Some(generation) = self
            .slot
            .try_update_value(|slot| slot.try_begin())
            .flatten()
        else {
            return;
        };
        self.loading.set(true);

        let api = self.api.clone();
        let status_filter = self.status_filter;
        let slot = self.slot;
        let approvals = self.approvals;
        let page_signal = self.page;
        let has_more_signal = self.has_more;
        let loading = self.loading;
        let error = self.error;
        spawn_local(async move {
            let status = status_filter.get_untracked();
            let status = if status.is_empty() {
                None
            } else {
                Some(status)
            };
            let result = api.list_approvals(page, PAGE_SIZE, status.as_deref()).await;

            let still_current = slot
                .try_update_value(|slot| slot.finish(generation))
                .unwrap_or(false);
            if !still_current {
                return;
            }
            loading.set(false);
            match result {
                Ok(batch) => {
                    has_more_signal.set(has_more(batch.approvals.len(), PAGE_SIZE));
                    if replace {
                        approvals.set(batch.approvals);
                    } else {
                        approvals.update(|list| list.extend(batch.approvals));
                    }
                    page_signal.set(page);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.error)),
            }
        });
    }
}

pub fn use_approvals_view_model() -> ApprovalsViewModel {
    match use_context::<ApprovalsViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = ApprovalsViewModel::new();
            provide_context(vm.clone());
            vm
        }
    }
}
