use contracts::domain::a002_dependent::aggregate::non_blank;
use contracts::domain::a003_department::{
    parent_candidates, Department, DepartmentForm, DepartmentType,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_department::api;
use crate::shared::modal::Modal;

/// Parses an optional positive id or count typed into a text field.
fn parse_optional<T: std::str::FromStr>(raw: &str) -> Result<Option<T>, ()> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(|_| ())
}

/// Create (when `editing` is `None`) or edit dialog for a department.
#[component]
pub fn DepartmentFormModal(
    editing: Option<Department>,
    /// Candidates for the parent select, flattened.
    parents: Vec<Department>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let editing_id = editing.as_ref().map(|d| d.id);
    let initial = editing
        .as_ref()
        .map(DepartmentForm::from)
        .unwrap_or_else(DepartmentForm::new);

    let name = RwSignal::new(initial.name.clone());
    let description = RwSignal::new(initial.description.clone().unwrap_or_default());
    let department_type = RwSignal::new(initial.department_type.as_str().to_string());
    let parent_id = RwSignal::new(
        initial
            .parent_department_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
    );
    let leader_id = RwSignal::new(initial.leader_id.map(|id| id.to_string()).unwrap_or_default());
    let max_members = RwSignal::new(initial.max_members.map(|n| n.to_string()).unwrap_or_default());
    let meeting_schedule = RwSignal::new(initial.meeting_schedule.clone().unwrap_or_default());
    let contact_email = RwSignal::new(initial.contact_email.clone().unwrap_or_default());
    let is_active = RwSignal::new(initial.is_active);

    let (error, set_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    let collect_form = move || -> Result<DepartmentForm, String> {
        let leader_id = parse_optional::<i64>(&leader_id.get_untracked())
            .map_err(|_| "Leader must be a member ID".to_string())?;
        let max_members = parse_optional::<u32>(&max_members.get_untracked())
            .map_err(|_| "Maximum members must be a whole number".to_string())?;
        Ok(DepartmentForm {
            name: name.get_untracked().trim().to_string(),
            description: non_blank(&description.get_untracked()),
            department_type: DepartmentType::parse(&department_type.get_untracked())
                .unwrap_or_default(),
            leader_id,
            parent_department_id: parent_id.get_untracked().parse().ok(),
            max_members,
            meeting_schedule: non_blank(&meeting_schedule.get_untracked()),
            contact_email: non_blank(&contact_email.get_untracked()),
            is_active: is_active.get_untracked(),
        })
    };

    let submit = move || {
        let form = match collect_form().and_then(|f| f.validate(editing_id).map(|_| f)) {
            Ok(form) => form,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api::update_department(id, &form).await,
                None => api::create_department(&form).await,
            };
            match result {
                Ok(()) => {
                    log::info!("Saved department {:?}", form.name);
                    on_saved.run(());
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_saving.set(false);
        });
    };

    let title = match &editing {
        Some(d) => format!("Edit {}", d.name),
        None => "New department".to_string(),
    };

    let parent_options = parent_candidates(&parents, editing.as_ref());

    view! {
        <Modal title=title on_close=on_close>
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form details-form--two-columns">
                <div class="form-group">
                    <Label>"Name *"</Label>
                    <Input value=name placeholder="e.g. Youth Choir" />
                </div>

                <div class="form-group">
                    <Label>"Type"</Label>
                    <Select value=department_type>
                        {DepartmentType::ALL.into_iter().map(|t| view! {
                            <option value=t.as_str()>{t.label()}</option>
                        }).collect_view()}
                    </Select>
                </div>

                <div class="form-group">
                    <Label>"Parent department"</Label>
                    <Select value=parent_id>
                        <option value="">"None (top level)"</option>
                        {parent_options.into_iter().map(|(id, name)| view! {
                            <option value=id.to_string()>{name}</option>
                        }).collect_view()}
                    </Select>
                </div>

                <div class="form-group">
                    <Label>"Leader (member ID)"</Label>
                    <Input value=leader_id placeholder="Optional" />
                </div>

                <div class="form-group">
                    <Label>"Maximum members"</Label>
                    <Input value=max_members placeholder="No limit" />
                </div>

                <div class="form-group">
                    <Label>"Meeting schedule"</Label>
                    <Input value=meeting_schedule placeholder="e.g. Sundays after liturgy" />
                </div>

                <div class="form-group">
                    <Label>"Contact email"</Label>
                    <Input value=contact_email />
                </div>

                <div class="form-group">
                    <Checkbox checked=is_active label="Active" />
                </div>

                <div class="form-group form-group--wide">
                    <Label>"Description"</Label>
                    <Textarea value=description />
                </div>
            </div>

            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| submit()
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_numbers() {
        assert_eq!(parse_optional::<u32>(""), Ok(None));
        assert_eq!(parse_optional::<u32>(" 25 "), Ok(Some(25)));
        assert!(parse_optional::<u32>("lots").is_err());
        assert!(parse_optional::<u32>("-3").is_err());
    }
}
