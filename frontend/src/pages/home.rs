use leptos::*;

use crate::components::layout::Layout;
use crate::state::session::use_session;

#[component]
fn QuickLink(href: &'static str, title: &'static str, hint: &'static str) -> impl IntoView {
    view! {
        <a
            href=href
            class="block bg-surface-elevated shadow rounded-lg p-6 hover:shadow-md"
        >
            <h3 class="text-sm font-semibold text-fg">{title}</h3>
            <p class="mt-1 text-xs text-fg-muted">{hint}</p>
        </a>
    }
}

/// Public hero shown to visitors without a session.
#[component]
fn Landing() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <div class="max-w-7xl mx-auto py-12 px-4 sm:px-6 lg:px-8">
                <div class="text-center">
                    <h1 class="text-4xl font-extrabold text-fg sm:text-5xl lg:text-6xl">
                        {"点名助手"}
                    </h1>
                    <p class="mt-3 max-w-md mx-auto text-base text-fg-muted sm:text-lg lg:mt-5 lg:text-xl lg:max-w-3xl">
                        {"学生组织考勤管理系统"}
                    </p>
                    <div class="mt-5 max-w-md mx-auto sm:flex sm:justify-center lg:mt-8">
                        <div class="rounded-md shadow">
                            <a
                                href="/login"
                                class="w-full flex items-center justify-center px-8 py-3 border border-transparent text-base font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover lg:py-4 lg:text-lg lg:px-10"
                            >
                                {"登录"}
                            </a>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let (session, _) = use_session();
    let is_authenticated = create_memo(move |_| session.get().is_authenticated());
    let greeting = move || {
        session
            .get()
            .profile
            .as_ref()
            .map(|p| format!("{}，你好", p.real_name))
            .unwrap_or_else(|| "你好".to_string())
    };
    let is_admin = move || session.get().is_admin();

    view! {
        <Show when=move || is_authenticated.get() fallback=|| view! { <Landing /> }>
            <Layout>
                <div class="space-y-4 px-4 sm:px-0">
                    <h2 class="text-lg font-semibold text-fg">{greeting}</h2>
                    <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                        <QuickLink href="/records" title="签到记录" hint="查看与筛选自己的签到情况" />
                        <QuickLink href="/courses" title="课程表" hint="按星期查看课程安排" />
                        <QuickLink href="/notifications" title="通知" hint="查看签到提醒与公告" />
                        <QuickLink href="/profile" title="我的" hint="查看个人信息" />
                        <Show when=is_admin>
                            <QuickLink href="/approvals" title="请假审批" hint="处理成员提交的请假申请" />
                        </Show>
                    </div>
                </div>
            </Layout>
        </Show>
    }
}
