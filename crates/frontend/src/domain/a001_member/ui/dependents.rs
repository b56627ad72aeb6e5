use contracts::domain::a001_member::Member;
use contracts::domain::a002_dependent::Dependent;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a002_dependent::ui::AddDependentModal;
use crate::shared::date_utils::format_date_opt;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::system::auth::context::use_permissions;

/// Dependents of one household, with an entry point to add another.
///
/// `member` tracks the parent list, so a refetch after adding shows the
/// new row without reopening the dialog.
#[component]
pub fn MemberDependentsModal(
    #[prop(into)] member: Signal<Option<Member>>,
    on_close: Callback<()>,
    on_added: Callback<()>,
) -> impl IntoView {
    let permissions = use_permissions();
    let adding = RwSignal::new(false);

    let title = member.with_untracked(|m| {
        m.as_ref()
            .map(|m| format!("Dependents of {}", m.full_name()))
            .unwrap_or_else(|| "Dependents".to_string())
    });

    view! {
        <Modal title=title on_close=on_close class="modal--wide">
            <Show when=move || permissions.get().can_add_dependents>
                <div class="modal-toolbar">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| adding.set(true)>
                        {icon("user-plus")}
                        " Add dependent"
                    </Button>
                </div>
            </Show>

            {move || {
                let dependents: Vec<Dependent> =
                    member.with(|m| m.as_ref().map(|m| m.dependents.clone()).unwrap_or_default());
                if dependents.is_empty() {
                    return view! { <p class="text-muted">"No dependents recorded"</p> }.into_any();
                }
                view! {
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Name"</TableHeaderCell>
                                <TableHeaderCell>"Relationship"</TableHeaderCell>
                                <TableHeaderCell>"Date of birth"</TableHeaderCell>
                                <TableHeaderCell>"Baptized"</TableHeaderCell>
                                <TableHeaderCell>"Contact"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {dependents.into_iter().map(|d| {
                                let contact = d.email.clone().or_else(|| d.phone.clone()).unwrap_or_else(|| "-".to_string());
                                let baptized = match (d.is_baptized, d.baptism_name.as_deref()) {
                                    (true, Some(name)) if !name.trim().is_empty() => format!("Yes ({})", name),
                                    (true, _) => "Yes".to_string(),
                                    (false, _) => "No".to_string(),
                                };
                                let full_name = d.full_name();
                                let relationship = d.relationship.clone().unwrap_or_else(|| "-".to_string());
                                let date_of_birth = format_date_opt(d.date_of_birth.as_deref());
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout truncate=true>{full_name}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{relationship}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{date_of_birth}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{baptized}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{contact}</TableCellLayout></TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                }.into_any()
            }}
        </Modal>

        {move || {
            if !adding.get() {
                return None;
            }
            member.get_untracked().map(|m| view! {
                <AddDependentModal
                    member_id=m.id
                    member_name=m.full_name()
                    on_close=Callback::new(move |_| adding.set(false))
                    on_added=Callback::new(move |_| {
                        adding.set(false);
                        on_added.run(());
                    })
                />
            })
        }}
    }
}
