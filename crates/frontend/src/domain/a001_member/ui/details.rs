use contracts::domain::a001_member::{Member, MemberUpdate};
use contracts::system::roles::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_member::api;
use crate::shared::modal::Modal;

/// Form state of the member edit dialog.
#[derive(Clone, Copy)]
pub struct MemberEditViewModel {
    pub id: i64,
    pub form: RwSignal<MemberUpdate>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl MemberEditViewModel {
    pub fn new(member: &Member) -> Self {
        Self {
            id: member.id,
            form: RwSignal::new(MemberUpdate::from(member)),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let update = self.form.get_untracked();
        if let Err(msg) = update.validate() {
            self.error.set(Some(msg));
            return;
        }
        let update = update.normalized();

        let (id, error, saving) = (self.id, self.error, self.saving);
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match api::update_member(id, &update).await {
                Ok(()) => {
                    log::info!("Updated member {}", id);
                    on_saved.run(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    }
}

#[component]
pub fn MemberEditModal(
    member: Member,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let vm = MemberEditViewModel::new(&member);
    let form = vm.form;

    let text_field = move |label: &'static str,
                           get: fn(&MemberUpdate) -> String,
                           set: fn(&mut MemberUpdate, String)| {
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

    let role = RwSignal::new(member.role.as_str().to_string());
    Effect::new(move || {
        let value = role.get();
        form.update(|f| f.role = Role::from_str_lossy(&value));
    });

    let is_active = RwSignal::new(member.is_active);
    Effect::new(move || {
        let value = is_active.get();
        form.update(|f| f.is_active = value);
    });

    view! {
        <Modal title=format!("Edit {}", member.full_name()) on_close=on_close>
            {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form">
                {text_field("First name *", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                {text_field("Middle name", |f| f.middle_name.clone().unwrap_or_default(), |f, v| f.middle_name = Some(v))}
                {text_field("Last name *", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                {text_field("Email", |f| f.email.clone().unwrap_or_default(), |f, v| f.email = Some(v))}
                {text_field("Phone", |f| f.phone_number.clone().unwrap_or_default(), |f, v| f.phone_number = Some(v))}

                <div class="form-group">
                    <label>"Date of birth"</label>
                    <input
                        type="date"
                        class="date-input"
                        prop:value=move || form.with(|f| f.date_of_birth.clone().unwrap_or_default())
                        on:input=move |ev| form.update(|f| f.date_of_birth = Some(event_target_value(&ev)))
                    />
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

                <div class="form-group">
                    <label>"Role"</label>
                    <Select value=role>
                        {Role::ALL.into_iter().map(|r| view! {
                            <option value=r.as_str()>{r.label()}</option>
                        }).collect_view()}
                    </Select>
                </div>

                <Checkbox checked=is_active label="Active member" />
            </div>

            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save_command(on_saved)
                    disabled=Signal::derive(move || vm.saving.get())
                >
                    {move || if vm.saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </div>
        </Modal>
    }
}
