pub mod state;

use std::cmp::Ordering;

use contracts::domain::a001_member::Member;
use contracts::system::roles::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::{create_state, MemberListState};
use super::dependents::MemberDependentsModal;
use super::details::MemberEditModal;
use super::welcome_note::ModalWelcomeNote;
use crate::domain::a001_member::api;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_date_opt;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_text, get_sort_class, get_sort_indicator, page_count, page_slice, sort_list, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::request_guard::RequestGuard;
use crate::system::auth::context::use_permissions;

impl Sortable for Member {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "name" => cmp_text(&self.last_name, &other.last_name)
                .then_with(|| cmp_text(&self.first_name, &other.first_name)),
            "email" => cmp_text(
                self.email.as_deref().unwrap_or(""),
                other.email.as_deref().unwrap_or(""),
            ),
            "role" => self.role.label().cmp(other.role.label()),
            "status" => other.is_active.cmp(&self.is_active),
            "joined" => self.created_at.cmp(&other.created_at),
            _ => self.id.cmp(&other.id),
        }
    }
}

/// Members matching the filters, sorted; pagination is applied by the caller.
pub fn visible_members(members: &[Member], state: &MemberListState) -> Vec<Member> {
    let mut rows: Vec<Member> = members
        .iter()
        .filter(|m| m.matches_search(&state.search_query))
        .filter(|m| {
            state
                .role_filter
                .as_deref()
                .map_or(true, |role| m.role.as_str() == role)
        })
        .filter(|m| state.show_inactive || m.is_active)
        .cloned()
        .collect();
    sort_list(&mut rows, &state.sort_field, state.sort_ascending);
    rows
}

/// Which dialog the list currently shows.
#[derive(Clone, Debug, PartialEq)]
enum MemberDialog {
    Edit(Member),
    Dependents(i64),
    Welcome(i64),
}

#[component]
pub fn MemberList() -> impl IntoView {
    let state = create_state();
    let members = RwSignal::new(Vec::<Member>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let dialog = RwSignal::new(None::<MemberDialog>);
    let is_filter_expanded = RwSignal::new(false);
    let permissions = use_permissions();
    let guard = RequestGuard::new("a001_member");

    let load_members = move || {
        let ticket = guard.next();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_all_members().await;
            if !guard.accept(ticket) {
                return;
            }
            match result {
                Ok(list) => {
                    log::debug!("Loaded {} members", list.len());
                    members.set(list);
                    state.update(|s| {
                        let pages = page_count(members.with_untracked(Vec::len), s.page_size);
                        if s.page >= pages {
                            s.page = pages.saturating_sub(1);
                        }
                    });
                }
                Err(e) => {
                    log::error!("Failed to load members: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    load_members();

    let search_query = RwSignal::new(state.get_untracked().search_query);
    Effect::new(move || {
        let v = search_query.get();
        untrack(move || {
            state.update(|s| {
                if s.search_query != v {
                    s.search_query = v;
                    s.page = 0;
                }
            })
        });
    });

    let role_filter = RwSignal::new(String::new());
    Effect::new(move || {
        let v = role_filter.get();
        untrack(move || {
            state.update(|s| {
                s.role_filter = (!v.is_empty()).then_some(v);
                s.page = 0;
            })
        });
    });

    let show_inactive = RwSignal::new(true);
    Effect::new(move || {
        let v = show_inactive.get();
        untrack(move || {
            state.update(|s| {
                s.show_inactive = v;
                s.page = 0;
            })
        });
    });

    let filtered = Memo::new(move |_| {
        let s = state.get();
        members.with(|all| visible_members(all, &s))
    });

    let page_rows = move || {
        let (page, size) = state.with(|s| (s.page, s.page_size));
        filtered.with(|rows| page_slice(rows, page, size))
    };

    let toggle_sort = move |field: &'static str| {
        state.update(|s| {
            if s.sort_field == field {
                s.sort_ascending = !s.sort_ascending;
            } else {
                s.sort_field = field.to_string();
                s.sort_ascending = true;
            }
            s.page = 0;
        });
    };

    let sort_header = move |field: &'static str, title: &'static str| {
        view! {
            <div class="table__sortable-header" style="cursor: pointer;" on:click=move |_| toggle_sort(field)>
                {title}
                <span class=move || state.with(|s| get_sort_class(&s.sort_field, field))>
                    {move || state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))}
                </span>
            </div>
        }
    };

    let delete_member = move |member: Member| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "Delete {}? This also removes their dependents.",
                    member.full_name()
                ))
                .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_member(member.id).await {
                Ok(()) => {
                    log::info!("Deleted member {}", member.id);
                    load_members();
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let close_dialog = Callback::new(move |_| dialog.set(None));
    let on_changed = Callback::new(move |_| {
        dialog.set(None);
        load_members();
    });

    view! {
        <PageFrame page_id="a001_member--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Members"</h1>
                    <span class="badge badge--primary">{move || filtered.with(Vec::len)}</span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_members()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=is_filter_expanded
                    active_filters_count=Signal::derive(move || state.with(MemberListState::active_filters))
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || state.with(|s| s.page))
                            total_pages=Signal::derive(move || {
                                page_count(filtered.with(Vec::len), state.with(|s| s.page_size))
                            })
                            total_count=Signal::derive(move || filtered.with(Vec::len))
                            page_size=Signal::derive(move || state.with(|s| s.page_size))
                            on_page_change=Callback::new(move |page| state.update(|s| s.page = page))
                            on_page_size_change=Callback::new(move |size| state.update(|s| {
                                s.page_size = size;
                                s.page = 0;
                            }))
                        />
                    }
                    filter_content=move || view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div style="flex: 1; max-width: 320px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Search:"</Label>
                                    <Input value=search_query placeholder="Name, email or phone..." />
                                </Flex>
                            </div>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Role:"</Label>
                                <Select value=role_filter>
                                    <option value="">"All roles"</option>
                                    {Role::ALL.into_iter().map(|role| view! {
                                        <option value=role.as_str()>{role.label()}</option>
                                    }).collect_view()}
                                </Select>
                            </Flex>
                            <Checkbox checked=show_inactive label="Include inactive" />
                        </Flex>
                    }
                />

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <Show when=move || loading.get() && members.with(Vec::is_empty)>
                    <div class="loading">
                        <Spinner />
                        <span>"Loading members..."</span>
                    </div>
                </Show>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 900px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=200.0>
                                    {sort_header("name", "Name")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=200.0>
                                    {sort_header("email", "Email")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=120.0>"Phone"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=130.0>
                                    {sort_header("role", "Role")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>
                                    {sort_header("status", "Status")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>"Dependents"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0>
                                    {sort_header("joined", "Joined")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=200.0>"Actions"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=page_rows
                                key=|m| (m.id, m.first_name.clone(), m.last_name.clone(), m.role, m.is_active, m.dependents.len())
                                children=move |member| {
                                    let id = member.id;
                                    let for_edit = member.clone();
                                    let for_delete = member.clone();
                                    let (status_class, status_text) = if member.is_active {
                                        ("badge badge--success", "Active")
                                    } else {
                                        ("badge badge--neutral", "Inactive")
                                    };
                                    let full_name = member.full_name();
                                    let email = member.email.clone().unwrap_or_else(|| "-".to_string());
                                    let phone_number = member.phone_number.clone().unwrap_or_else(|| "-".to_string());
                                    let role_label = member.role.label();
                                    let dependents_count = member.dependents.len();
                                    let created_at = format_date_opt(member.created_at.as_deref());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{full_name}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {email}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {phone_number}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{role_label}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class=status_class>{status_text}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{dependents_count}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {created_at}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <div class="table__actions">
                                                    <Show when=move || permissions.get().can_edit_members>
                                                        <button
                                                            class="button button--icon"
                                                            title="Edit"
                                                            on:click={
                                                                let m = for_edit.clone();
                                                                move |_| dialog.set(Some(MemberDialog::Edit(m.clone())))
                                                            }
                                                        >
                                                            {icon("edit")}
                                                        </button>
                                                    </Show>
                                                    <button
                                                        class="button button--icon"
                                                        title="Dependents"
                                                        on:click=move |_| dialog.set(Some(MemberDialog::Dependents(id)))
                                                    >
                                                        {icon("users")}
                                                    </button>
                                                    <Show when=move || permissions.get().can_welcome_members>
                                                        <button
                                                            class="button button--icon"
                                                            title="Welcome note"
                                                            on:click=move |_| dialog.set(Some(MemberDialog::Welcome(id)))
                                                        >
                                                            {icon("mail")}
                                                        </button>
                                                    </Show>
                                                    <Show when=move || permissions.get().can_delete_members>
                                                        <button
                                                            class="button button--icon button--danger"
                                                            title="Delete"
                                                            on:click={
                                                                let m = for_delete.clone();
                                                                move |_| delete_member(m.clone())
                                                            }
                                                        >
                                                            {icon("trash")}
                                                        </button>
                                                    </Show>
                                                </div>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || !loading.get() && filtered.with(Vec::is_empty)>
                        <div class="table__empty">"No members match the current filters"</div>
                    </Show>
                </div>
            </div>

            {move || dialog.get().map(|d| match d {
                MemberDialog::Edit(member) => view! {
                    <MemberEditModal member=member on_close=close_dialog on_saved=on_changed />
                }.into_any(),
                MemberDialog::Dependents(id) => view! {
                    <MemberDependentsModal
                        member=Signal::derive(move || members.with(|all| all.iter().find(|m| m.id == id).cloned()))
                        on_close=close_dialog
                        on_added=Callback::new(move |_| load_members())
                    />
                }.into_any(),
                MemberDialog::Welcome(id) => view! {
                    <ModalWelcomeNote member_id=id on_close=close_dialog on_sent=on_changed />
                }.into_any(),
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, first: &str, last: &str, role: &str, active: bool) -> Member {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "firstName": first,
            "lastName": last,
            "role": role,
            "isActive": active,
            "email": format!("{}@example.org", first.to_lowercase()),
        }))
        .unwrap()
    }

    fn state() -> MemberListState {
        MemberListState {
            search_query: String::new(),
            role_filter: None,
            show_inactive: true,
            sort_field: "name".to_string(),
            sort_ascending: true,
            page: 0,
            page_size: 20,
        }
    }

    fn sample() -> Vec<Member> {
        vec![
            member(1, "Selam", "Worku", "member", true),
            member(2, "Abel", "Bekele", "treasurer", true),
            member(3, "Ruth", "Alemu", "member", false),
        ]
    }

    #[test]
    fn sorts_by_last_name() {
        let rows = visible_members(&sample(), &state());
        let ids: Vec<i64> = rows.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn filters_combine() {
        let mut s = state();
        s.role_filter = Some("member".into());
        s.show_inactive = false;
        let rows = visible_members(&sample(), &s);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
        assert_eq!(s.active_filters(), 2);
    }

    #[test]
    fn search_matches_email() {
        let mut s = state();
        s.search_query = "abel@".into();
        let rows = visible_members(&sample(), &s);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].last_name, "Bekele");
    }
}
