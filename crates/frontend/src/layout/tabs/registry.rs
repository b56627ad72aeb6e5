//! Tab content registry: the single mapping from tab key to view.
//!
//! Each entry is wrapped in `RequirePermission` with the same check the
//! sidebar uses, so a hand-edited `?active=` cannot reveal a hidden tab.

use crate::dashboards::d400_admin_stats::AdminStats;
use crate::domain::a001_member::ui::list::MemberList;
use crate::domain::a003_department::ui::list::DepartmentList;
use crate::domain::a004_payment::ui::list::PaymentList;
use crate::domain::a005_activity_log::ui::list::ActivityLogViewer;
use crate::system::auth::guard::RequirePermission;
use crate::usecases::u501_zelle_reconcile::{ZelleIngestionDocs, ZelleReview};
use contracts::system::roles::DashboardTab;
use leptos::prelude::*;

/// Renders the content of a tab by its key.
pub fn render_tab_content(key: &str) -> AnyView {
    let Some(tab) = DashboardTab::from_key(key) else {
        log::warn!("Unknown tab key: {}", key);
        return view! { <div class="placeholder">"Unknown section"</div> }.into_any();
    };

    let content = move || match tab {
        DashboardTab::Stats => view! { <AdminStats /> }.into_any(),
        DashboardTab::Members => view! { <MemberList /> }.into_any(),
        DashboardTab::Departments => view! { <DepartmentList /> }.into_any(),
        DashboardTab::Payments => view! { <PaymentList /> }.into_any(),
        DashboardTab::Zelle => view! { <ZelleReview /> }.into_any(),
        DashboardTab::ZelleDocs => view! { <ZelleIngestionDocs /> }.into_any(),
        DashboardTab::ActivityLogs => view! { <ActivityLogViewer /> }.into_any(),
    };

    view! {
        <RequirePermission tab=tab>
            {content()}
        </RequirePermission>
    }
    .into_any()
}
