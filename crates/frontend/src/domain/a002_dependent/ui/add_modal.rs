use contracts::domain::a002_dependent::{NewDependent, RELATIONSHIPS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_dependent::api;
use crate::shared::components::date_input::DateInput;
use crate::shared::modal::Modal;

/// Form for adding a dependent to a member household.
///
/// Required names are checked before anything is sent; on success the
/// parent is told through `on_added` and decides whether to close.
#[component]
pub fn AddDependentModal(
    member_id: i64,
    #[prop(into)] member_name: String,
    on_close: Callback<()>,
    on_added: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(NewDependent::default());
    let (error, set_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    let relationship = RwSignal::new(String::new());
    let date_of_birth = RwSignal::new(String::new());
    let is_baptized = RwSignal::new(false);
    let notes = RwSignal::new(String::new());

    let text_field = move |label: &'static str,
                           get: fn(&NewDependent) -> String,
                           set: fn(&mut NewDependent, String)| {
        view! {
            <div class="form-group">
                <label>{label}</label>
                <input
                    type="text"
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </div>
        }
    };

    let submit = move || {
        let mut draft = form.get_untracked();
        draft.relationship = Some(relationship.get_untracked());
        draft.date_of_birth = Some(date_of_birth.get_untracked());
        draft.is_baptized = is_baptized.get_untracked();
        draft.notes = Some(notes.get_untracked());

        if let Err(msg) = draft.validate() {
            set_error.set(Some(msg));
            return;
        }

        let payload = draft.normalized();
        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::add_dependent(member_id, &payload).await {
                Ok(()) => {
                    log::info!("Added dependent to member {}", member_id);
                    form.set(NewDependent::default());
                    relationship.set(String::new());
                    date_of_birth.set(String::new());
                    is_baptized.set(false);
                    notes.set(String::new());
                    on_added.run(());
                }
                Err(e) => {
                    log::warn!("Adding dependent failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <Modal title=format!("Add dependent for {}", member_name) on_close=on_close>
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form details-form--two-columns">
                {text_field("First name *", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                {text_field("Middle name", |f| f.middle_name.clone().unwrap_or_default(), |f, v| f.middle_name = Some(v))}
                {text_field("Last name *", |f| f.last_name.clone(), |f, v| f.last_name = v)}

                <div class="form-group">
                    <label>"Relationship"</label>
                    <Select value=relationship>
                        <option value="">"Select..."</option>
                        {RELATIONSHIPS.iter().map(|r| view! { <option value=*r>{*r}</option> }).collect_view()}
                    </Select>
                </div>

                <div class="form-group">
                    <label>"Date of birth"</label>
                    <DateInput value=date_of_birth />
                </div>

                <div class="form-group">
                    <label>"Gender"</label>
                    <select
                        prop:value=move || form.with(|f| f.gender.clone().unwrap_or_default())
                        on:change=move |ev| form.update(|f| f.gender = Some(event_target_value(&ev)))
                    >
                        <option value="">"Not specified"</option>
                        <option value="male">"Male"</option>
                        <option value="female">"Female"</option>
                    </select>
                </div>

                {text_field("Phone", |f| f.phone.clone().unwrap_or_default(), |f, v| f.phone = Some(v))}
                {text_field("Email", |f| f.email.clone().unwrap_or_default(), |f, v| f.email = Some(v))}
                {text_field("Baptism name", |f| f.baptism_name.clone().unwrap_or_default(), |f, v| f.baptism_name = Some(v))}

                <div class="form-group">
                    <Checkbox checked=is_baptized label="Baptized" />
                </div>

                <div class="form-group form-group--wide">
                    <label>"Notes"</label>
                    <Textarea value=notes placeholder="Optional" />
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
                    {move || if saving.get() { "Adding..." } else { "Add dependent" }}
                </Button>
            </div>
        </Modal>
    }
}
