//! Sidebar with collapsible menu groups, filtered by the user's role.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{tab_icon_for_key, tab_label_for_key};
use crate::shared::icons::icon;
use crate::system::auth::context::use_permissions;
use contracts::system::roles::{DashboardTab, RolePermissions};
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<DashboardTab>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "overview",
            label: "Overview",
            icon: "bar-chart",
            items: vec![DashboardTab::Stats],
        },
        MenuGroup {
            id: "congregation",
            label: "Congregation",
            icon: "users",
            items: vec![DashboardTab::Members, DashboardTab::Departments],
        },
        MenuGroup {
            id: "finance",
            label: "Finance",
            icon: "credit-card",
            items: vec![
                DashboardTab::Payments,
                DashboardTab::Zelle,
                DashboardTab::ZelleDocs,
            ],
        },
        MenuGroup {
            id: "audit",
            label: "Audit",
            icon: "activity",
            items: vec![DashboardTab::ActivityLogs],
        },
    ]
}

/// Groups with only the tabs `perms` allows; empty groups are dropped.
fn permitted_groups(perms: &RolePermissions) -> Vec<MenuGroup> {
    get_menu_groups()
        .into_iter()
        .filter_map(|mut group| {
            group.items.retain(|tab| tab.is_allowed(perms));
            (!group.items.is_empty()).then_some(group)
        })
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let permissions = use_permissions();

    let expanded_groups = RwSignal::new(
        get_menu_groups()
            .iter()
            .map(|g| g.id.to_string())
            .collect::<Vec<_>>(),
    );

    view! {
        <div class="app-sidebar__content">
            {move || permitted_groups(&permissions.get()).into_iter().map(|group| {
                let group_id = group.id.to_string();
                let group_id_for_click = group_id.clone();
                let group_id_for_chevron = group_id.clone();
                let items = StoredValue::new(group.items.clone());

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = group_id_for_click.clone();
                                expanded_groups.update(move |groups| {
                                    if let Some(pos) = groups.iter().position(|x| x == &gid) {
                                        groups.remove(pos);
                                    } else {
                                        groups.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || {
                                    expanded_groups.get().contains(&group_id_for_chevron)
                                }
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&group_id)>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|tab| {
                                    let key = tab.key();
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(key)
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_key(key)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(tab_icon_for_key(key))}
                                                <span>{tab_label_for_key(key)}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::roles::Role;

    #[test]
    fn treasurer_menu_skips_audit() {
        let groups = permitted_groups(&RolePermissions::for_role(Role::Treasurer));
        let ids: Vec<&str> = groups.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["overview", "congregation", "finance"]);
        let finance = groups.iter().find(|g| g.id == "finance").unwrap();
        assert_eq!(finance.items.len(), 3);
    }

    #[test]
    fn secretary_menu_drops_finance_group() {
        let groups = permitted_groups(&RolePermissions::for_role(Role::Secretary));
        assert!(groups.iter().all(|g| g.id != "finance" && g.id != "audit"));
    }

    #[test]
    fn every_tab_appears_in_exactly_one_group() {
        let all: Vec<DashboardTab> = get_menu_groups()
            .into_iter()
            .flat_map(|g| g.items)
            .collect();
        assert_eq!(all.len(), DashboardTab::ALL.len());
        for tab in DashboardTab::ALL {
            assert!(all.contains(&tab));
        }
    }
}
