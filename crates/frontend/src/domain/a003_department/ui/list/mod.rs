use contracts::domain::a003_department::{
    build_hierarchy, Department, DepartmentQuery, DepartmentStats, DepartmentType,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::card::DepartmentCard;
use super::details::DepartmentFormModal;
use crate::domain::a003_department::api;
use crate::shared::components::stat_card::{StatCard, ValueFormat};
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::request_guard::RequestGuard;
use crate::system::auth::context::use_permissions;

/// Roots plus their nested sub-departments, in display order.
fn flatten(roots: &[Department]) -> Vec<Department> {
    roots
        .iter()
        .flat_map(|root| std::iter::once(root.clone()).chain(root.sub_departments.iter().cloned()))
        .collect()
}

type CardKey = (
    i64,
    String,
    u32,
    bool,
    usize,
    DepartmentType,
    Option<String>,
    Option<i64>,
    Option<u32>,
    Option<String>,
    Option<String>,
);

/// Fields rendered on the card; an edit to any of them rebuilds it.
fn card_key(d: &Department) -> CardKey {
    (
        d.id,
        d.name.clone(),
        d.member_count,
        d.is_active,
        d.sub_departments.len(),
        d.department_type,
        d.description.clone(),
        d.leader_id,
        d.max_members,
        d.meeting_schedule.clone(),
        d.contact_email.clone(),
    )
}

fn build_query(type_filter: &str, search: &str, include_inactive: bool) -> DepartmentQuery {
    let search = search.trim();
    DepartmentQuery {
        department_type: DepartmentType::parse(type_filter),
        search: (!search.is_empty()).then(|| search.to_string()),
        include_inactive,
    }
}

#[derive(Clone, Debug, PartialEq)]
enum DepartmentDialog {
    Create,
    Edit(Department),
}

#[component]
pub fn DepartmentList() -> impl IntoView {
    let departments = RwSignal::new(Vec::<Department>::new());
    let stats = RwSignal::new(None::<DepartmentStats>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let dialog = RwSignal::new(None::<DepartmentDialog>);
    let permissions = use_permissions();
    let can_manage = Signal::derive(move || permissions.get().can_manage_departments);

    let type_filter = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());
    let include_inactive = RwSignal::new(false);

    let list_guard = RequestGuard::new("a003_department");
    let stats_guard = RequestGuard::new("a003_department_stats");

    let load_departments = move |debounce: bool| {
        let ticket = list_guard.next();
        let query = build_query(
            &type_filter.get_untracked(),
            &search.get_untracked(),
            include_inactive.get_untracked(),
        );
        spawn_local(async move {
            if debounce && !list_guard.settle(ticket, config().ui.search_debounce_ms).await {
                return;
            }
            set_loading.set(true);
            set_error.set(None);
            let result = api::fetch_departments(&query).await;
            if !list_guard.accept(ticket) {
                return;
            }
            match result {
                Ok(list) => departments.set(build_hierarchy(list)),
                Err(e) => {
                    log::error!("Failed to load departments: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    let load_stats = move || {
        let ticket = stats_guard.next();
        spawn_local(async move {
            let result = api::fetch_stats().await;
            if !stats_guard.accept(ticket) {
                return;
            }
            match result {
                Ok(s) => stats.set(Some(s)),
                Err(e) => log::warn!("Department stats unavailable: {}", e),
            }
        });
    };

    let reload = move || {
        load_departments(false);
        load_stats();
    };

    // Type and inactive toggles reload at once; typing in search is debounced.
    Effect::new(move |_| {
        type_filter.track();
        include_inactive.track();
        load_departments(false);
    });
    Effect::new(move |prev: Option<String>| {
        let current = search.get();
        if prev.is_some_and(|p| p != current) {
            load_departments(true);
        }
        current
    });
    load_stats();

    let delete_department = Callback::new(move |dept: Department| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Delete department \"{}\"?", dept.name))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_department(dept.id).await {
                Ok(()) => {
                    log::info!("Deleted department {}", dept.id);
                    reload();
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    });

    let edit_department = Callback::new(move |dept: Department| {
        dialog.set(Some(DepartmentDialog::Edit(dept)));
    });

    let stat = move |pick: fn(&DepartmentStats) -> u32| {
        Signal::derive(move || stats.with(|s| s.as_ref().map(|s| pick(s) as f64)))
    };

    view! {
        <PageFrame page_id="a003_department--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Departments"</h1>
                </div>
                <div class="page__header-right">
                    <Show when=move || can_manage.get()>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| dialog.set(Some(DepartmentDialog::Create))
                        >
                            {icon("plus")}
                            " New department"
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| reload()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard label="Departments" icon_name="building" value=stat(|s| s.total_departments) format=ValueFormat::Integer />
                    <StatCard label="Active" icon_name="check" value=stat(|s| s.active_departments) format=ValueFormat::Integer />
                    <StatCard label="Members Assigned" icon_name="users" value=stat(|s| s.total_members) format=ValueFormat::Integer />
                </div>

                {move || stats.with(|s| s.as_ref().filter(|s| !s.by_type.is_empty()).map(|s| {
                    s.by_type.iter().map(|t| view! {
                        <span class="badge badge--neutral">{format!("{}: {}", t.department_type.label(), t.count)}</span>
                    }).collect_view()
                })).map(|badges| view! { <div class="type-breakdown">{badges}</div> })}

                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Type:"</Label>
                                <Select value=type_filter>
                                    <option value="">"All types"</option>
                                    {DepartmentType::ALL.into_iter().map(|t| view! {
                                        <option value=t.as_str()>{t.label()}</option>
                                    }).collect_view()}
                                </Select>
                            </Flex>
                            <div style="flex: 1; max-width: 320px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Search:"</Label>
                                    <Input value=search placeholder="Name or description..." />
                                </Flex>
                            </div>
                            <Checkbox checked=include_inactive label="Include inactive" />
                        </Flex>
                    </div>
                </div>

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <Show when=move || loading.get() && departments.with(Vec::is_empty)>
                    <div class="loading">
                        <Spinner />
                        <span>"Loading departments..."</span>
                    </div>
                </Show>

                <Show when=move || !loading.get() && error.get().is_none() && departments.with(Vec::is_empty)>
                    <div class="placeholder">"No departments found"</div>
                </Show>

                <div class="department-grid">
                    <For
                        each=move || departments.get()
                        key=card_key
                        children=move |dept| view! {
                            <DepartmentCard
                                department=dept
                                can_manage=can_manage
                                on_edit=edit_department
                                on_delete=delete_department
                            />
                        }
                    />
                </div>
            </div>

            {move || dialog.get().map(|d| {
                let editing = match d {
                    DepartmentDialog::Create => None,
                    DepartmentDialog::Edit(dept) => Some(dept),
                };
                view! {
                    <DepartmentFormModal
                        editing=editing
                        parents=departments.with_untracked(|roots| flatten(roots))
                        on_close=Callback::new(move |_| dialog.set(None))
                        on_saved=Callback::new(move |_| {
                            dialog.set(None);
                            reload();
                        })
                    />
                }
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_from_filters() {
        let q = build_query("committee", "  choir ", false);
        assert_eq!(q.department_type, Some(DepartmentType::Committee));
        assert_eq!(q.search.as_deref(), Some("choir"));

        let q = build_query("", "   ", true);
        assert_eq!(q.department_type, None);
        assert_eq!(q.search, None);
        assert!(q.include_inactive);
    }

    #[test]
    fn flatten_lists_children_after_parent() {
        let flat: Vec<Department> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Youth"},
                {"id": 2, "name": "Youth Choir", "parent_department_id": 1},
                {"id": 3, "name": "Ushers"}
            ]"#,
        )
        .unwrap();
        let ids: Vec<i64> = flatten(&build_hierarchy(flat)).iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn card_key_tracks_visible_fields() {
        let mut dept: Department =
            serde_json::from_str(r#"{"id": 4, "name": "Ushers", "member_count": 6}"#).unwrap();
        let before = card_key(&dept);
        dept.parent_department_id = Some(1);
        assert_eq!(card_key(&dept), before);
        dept.description = Some("Sunday service".into());
        assert_ne!(card_key(&dept), before);
        let before = card_key(&dept);

        dept.member_count = 7;
        assert_ne!(card_key(&dept), before);
        let after_join = card_key(&dept);
        dept.sub_departments.push(dept.clone());
        assert_ne!(card_key(&dept), after_join);
    }
}
