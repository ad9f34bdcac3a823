use leptos::*;

use crate::api::{ApiClient, ApiError, AttendanceRecord};
use crate::pages::records::{
    repository,
    utils::{LoadSlot, RecordFilters, RecordStats},
};
use crate::state::notices::{push_error, push_success, use_notices, Notices};
use crate::utils::time::today_in_app_tz;

#[derive(Clone)]
pub struct RecordsViewModel {
    pub api: ApiClient,
    pub filters: RwSignal<RecordFilters>,
    pub records: RwSignal<Vec<AttendanceRecord>>,
    pub stats: RwSignal<Option<RecordStats>>,
    pub page: RwSignal<u32>,
    pub has_more: RwSignal<bool>,
    pub loading: RwSignal<bool>,
    pub stats_loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub cancel_action: Action<String, Result<(), ApiError>>,
    notices: Notices,
    list_slot: StoredValue<LoadSlot>,
    stats_slot: StoredValue<LoadSlot>,
}

impl RecordsViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let notices = use_notices();

        let api_for_cancel = api.clone();
        let cancel_action = create_action(move |record_id: &String| {
            let api = api_for_cancel.clone();
            let id = record_id.clone();
            async move { repository::cancel_record(&api, &id).await }
        });

        let vm = Self {
            api,
            filters: create_rw_signal(RecordFilters::default()),
            records: create_rw_signal(Vec::new()),
            stats: create_rw_signal(None),
            page: create_rw_signal(1),
            has_more: create_rw_signal(false),
            loading: create_rw_signal(false),
            stats_loading: create_rw_signal(false),
            error: create_rw_signal(None),
            cancel_action,
            notices,
            list_slot: store_value(LoadSlot::default()),
            stats_slot: store_value(LoadSlot::default()),
        };

        // Initial load and every filter change go through the same restart.
        {
            let vm = vm.clone();
            create_effect(move |_| {
                let _ = vm.filters.get();
                vm.restart();
            });
        }
        {
            let vm = vm.clone();
            create_effect(move |_| {
                if let Some(result) = vm.cancel_action.value().get() {
                    match result {
                        Ok(()) => {
                            push_success(vm.notices, "已取消签到记录");
                            vm.restart();
                        }
                        Err(e) => push_error(vm.notices, e.error),
                    }
                }
            });
        }

        vm
    }

    /// Drops any in-flight load and reloads page 1 plus the statistics under
    /// the current filters.
    pub fn restart(&self) {
        self.list_slot.update_value(|slot| slot.invalidate());
        self.stats_slot.update_value(|slot| slot.invalidate());
        self.error.set(None);
        self.spawn_list_load(1, true);
        self.spawn_stats_load();
    }

    /// Appends the next page. Ignored while a load is running or when the
    /// last page reported no follow-up.
    pub fn load_more(&self) {
        if !self.has_more.get_untracked() {
            return;
        }
        let next = self.page.get_untracked() + 1;
        self.spawn_list_load(next, false);
    }

    pub fn request_cancel(&self, record_id: String) {
        self.cancel_action.dispatch(record_id);
    }

    fn spawn_list_load(&self, page: u32, replace: bool) {
        let Some(generation) = self
            .list_slot
            .try_update_value(|slot| slot.try_begin())
            .flatten()
        else {
            return;
        };
        self.loading.set(true);

        let api = self.api.clone();
        let filters = self.filters;
        let slot = self.list_slot;
        let records = self.records;
        let page_signal = self.page;
        let has_more = self.has_more;
        let loading = self.loading;
        let error = self.error;
        spawn_local(async move {
            let snapshot = filters.get_untracked();
            let result =
                repository::fetch_filtered_page(&api, &snapshot, page, today_in_app_tz()).await;

            let still_current = slot
                .try_update_value(|slot| slot.finish(generation))
                .unwrap_or(false);
            if !still_current {
                return;
            }
            loading.set(false);
            match result {
                Ok(outcome) => {
                    if replace {
                        records.set(outcome.records);
                    } else {
                        records.update(|list| list.extend(outcome.records));
                    }
                    has_more.set(outcome.has_more);
                    // The page pointer only advances when its load landed.
                    page_signal.set(page);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.error)),
            }
        });
    }

    fn spawn_stats_load(&self) {
        let Some(generation) = self
            .stats_slot
            .try_update_value(|slot| slot.try_begin())
            .flatten()
        else {
            return;
        };
        self.stats_loading.set(true);

        let api = self.api.clone();
        let filters = self.filters;
        let slot = self.stats_slot;
        let stats = self.stats;
        let stats_loading = self.stats_loading;
        spawn_local(async move {
            let snapshot = filters.get_untracked();
            let result = repository::fetch_stats(&api, &snapshot, today_in_app_tz()).await;

            let still_current = slot
                .try_update_value(|slot| slot.finish(generation))
                .unwrap_or(false);
            if !still_current {
                return;
            }
            stats_loading.set(false);
            // A failed statistics fetch keeps the previous counts; the list
            // error banner already covers the endpoint being down.
            if let Ok(counts) = result {
                stats.set(Some(counts));
            }
        });
    }
}

pub fn use_records_view_model() -> RecordsViewModel {
    match use_context::<RecordsViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = RecordsViewModel::new();
            provide_context(vm.clone());
            vm
        }
    }
}
