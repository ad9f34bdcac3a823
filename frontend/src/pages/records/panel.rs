use leptos::*;

use super::{
    components::{filter::RecordsFilter, list::RecordsList, stats::StatsSection},
    view_model::use_records_view_model,
};
use crate::components::layout::Layout;

#[component]
pub fn RecordsPage() -> impl IntoView {
    view! {
        <Layout>
            <RecordsPanel />
        </Layout>
    }
}

#[component]
pub fn RecordsPanel() -> impl IntoView {
    let vm = use_records_view_model();

    let records = Signal::derive({
        let vm = vm.clone();
        move || vm.records.get()
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
    let stats = Signal::derive({
        let vm = vm.clone();
        move || vm.stats.get()
    });
    let stats_loading = Signal::derive({
        let vm = vm.clone();
        move || vm.stats_loading.get()
    });

    let on_load_more = Callback::new({
        let vm = vm.clone();
        move |_| vm.load_more()
    });
    let on_cancel = Callback::new({
        let vm = vm.clone();
        move |record_id: String| vm.request_cancel(record_id)
    });

    view! {
        <div class="space-y-4 px-4 sm:px-0">
            <RecordsFilter filters=vm.filters />
            <StatsSection stats=stats loading=stats_loading />
            <RecordsList
                records=records
                loading=loading
                error=error
                has_more=has_more
                on_load_more=on_load_more
                on_cancel=on_cancel
            />
        </div>
    }
}
