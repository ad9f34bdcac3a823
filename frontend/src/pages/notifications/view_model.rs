use leptos::*;

use crate::api::{ApiClient, ApiError, Notification};
use crate::pages::records::utils::{has_more, PAGE_SIZE};
use crate::state::notices::{push_error, use_notices, Notices};
use crate::state::unread::{use_unread_count, UnreadCount};

pub fn unread_in(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

#[derive(Clone)]
pub struct NotificationsViewModel {
    pub api: ApiClient,
    pub notifications: RwSignal<Vec<Notification>>,
    pub page: RwSignal<u32>,
    pub has_more: RwSignal<bool>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub mark_read_action: Action<String, Result<String, ApiError>>,
    pub mark_all_action: Action<(), Result<(), ApiError>>,
    notices: Notices,
    unread: UnreadCount,
}

impl NotificationsViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let notices = use_notices();
        let unread = use_unread_count();

        // The action yields the id back so the list entry can be updated
        // in place.
        let api_for_read = api.clone();
        let mark_read_action = create_action(move |notification_id: &String| {
            let api = api_for_read.clone();
            let id = notification_id.clone();
            async move { api.mark_notification_read(&id).await.map(|_| id) }
        });

        let api_for_all = api.clone();
        let mark_all_action = create_action(move |_: &()| {
            let api = api_for_all.clone();
            async move { api.mark_all_notifications_read().await }
        });

        let vm = Self {
            api,
            notifications: create_rw_signal(Vec::new()),
            page: create_rw_signal(1),
            has_more: create_rw_signal(false),
            loading: create_rw_signal(false),
            error: create_rw_signal(None),
            mark_read_action,
            mark_all_action,
            notices,
            unread,
        };

        {
            let vm = vm.clone();
            create_effect(move |started: Option<()>| {
                if started.is_none() {
                    vm.load_page(1, true);
                }
            });
        }
        {
            let vm = vm.clone();
            create_effect(move |_| {
                if let Some(result) = vm.mark_read_action.value().get() {
                    match result {
                        Ok(id) => vm.apply_read(&id),
                        Err(e) => push_error(vm.notices, e.error),
                    }
                }
            });
        }
        {
            let vm = vm.clone();
            create_effect(move |_| {
                if let Some(result) = vm.mark_all_action.value().get() {
                    match result {
                        Ok(()) => vm.apply_all_read(),
                        Err(e) => push_error(vm.notices, e.error),
                    }
                }
            });
        }

        vm
    }

    pub fn load_more(&self) {
        if self.loading.get_untracked() || !self.has_more.get_untracked() {
            return;
        }
        let next = self.page.get_untracked() + 1;
        self.load_page(next, false);
    }

    fn load_page(&self, page: u32, replace: bool) {
        self.loading.set(true);
        let api = self.api.clone();
        let notifications = self.notifications;
        let page_signal = self.page;
        let has_more_signal = self.has_more;
        let loading = self.loading;
        let error = self.error;
        let unread = self.unread;
        spawn_local(async move {
            let result = api.list_notifications(page, PAGE_SIZE).await;
            loading.set(false);
            match result {
                Ok(batch) => {
                    has_more_signal.set(has_more(batch.notifications.len(), PAGE_SIZE));
                    if replace {
                        notifications.set(batch.notifications);
                    } else {
                        notifications.update(|list| list.extend(batch.notifications));
                    }
                    page_signal.set(page);
                    error.set(None);
                    unread.set(unread_in(&notifications.get_untracked()));
                }
                Err(e) => error.set(Some(e.error)),
            }
        });
    }

    fn apply_read(&self, id: &str) {
        self.notifications.update(|list| {
            if let Some(item) = list.iter_mut().find(|n| n.id == id) {
                item.read = true;
            }
        });
        self.unread
            .set(unread_in(&self.notifications.get_untracked()));
    }

    fn apply_all_read(&self) {
        self.notifications.update(|list| {
            for item in list.iter_mut() {
                item.read = true;
            }
        });
        self.unread.set(0);
    }
}

pub fn use_notifications_view_model() -> NotificationsViewModel {
    match use_context::<NotificationsViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = NotificationsViewModel::new();
            provide_context(vm.clone());
            vm
        }
    }
}
