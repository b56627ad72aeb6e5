use contracts::domain::a001_member::{Member, WelcomeNote};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_member::api;
use crate::shared::date_utils::format_date_opt;
use crate::shared::modal::Modal;

/// Read-only profile summary of a new member plus a welcome note composer.
#[component]
pub fn ModalWelcomeNote(
    member_id: i64,
    on_close: Callback<()>,
    on_sent: Callback<()>,
) -> impl IntoView {
    let (member, set_member) = signal(None::<Member>);
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal(None::<String>);
    let (send_error, set_send_error) = signal(None::<String>);
    let (sending, set_sending) = signal(false);
    let note = RwSignal::new(String::new());

    spawn_local(async move {
        match api::fetch_member(member_id).await {
            Ok(m) => set_member.set(Some(m)),
            Err(e) => {
                log::warn!("Could not load member {}: {}", member_id, e);
                set_load_error.set(Some(e.to_string()));
            }
        }
        set_loading.set(false);
    });

    let send = move || {
        let payload = WelcomeNote::new(&note.get_untracked());
        if let Err(msg) = payload.validate() {
            set_send_error.set(Some(msg));
            return;
        }
        set_sending.set(true);
        set_send_error.set(None);
        spawn_local(async move {
            match api::mark_welcomed(member_id, &payload).await {
                Ok(()) => {
                    log::info!("Member {} marked as welcomed", member_id);
                    on_sent.run(());
                }
                Err(e) => set_send_error.set(Some(e.to_string())),
            }
            set_sending.set(false);
        });
    };

    view! {
        <Modal title="Welcome note" on_close=on_close>
            <Show when=move || loading.get()>
                <div class="loading">
                    <Spinner />
                    <span>"Loading profile..."</span>
                </div>
            </Show>

            {move || load_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            {move || member.get().map(|m| {
                let row = |label: &'static str, value: String| view! {
                    <div class="profile-summary__row">
                        <span class="profile-summary__label">{label}</span>
                        <span class="profile-summary__value">{value}</span>
                    </div>
                };
                let dash = |v: Option<String>| v.filter(|s| !s.trim().is_empty()).unwrap_or_else(|| "-".to_string());
                view! {
                    <div class="profile-summary">
                        <h3 class="profile-summary__name">{m.full_name()}</h3>
                        {row("Email", dash(m.email.clone()))}
                        {row("Phone", dash(m.phone_number.clone()))}
                        {row("Address", dash(m.address_line()))}
                        {row("Role", m.role.label().to_string())}
                        {row("Member since", format_date_opt(m.created_at.as_deref()))}
                        {row("Dependents", m.dependents.len().to_string())}
                    </div>
                }
            })}

            <div class="form-group form-group--wide">
                <label>"Note"</label>
                <Textarea
                    value=note
                    placeholder="Write a short welcome message..."
                    attr:style="width: 100%; min-height: 120px;"
                />
            </div>

            {move || send_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| send()
                    disabled=Signal::derive(move || sending.get() || member.with(Option::is_none))
                >
                    {move || if sending.get() { "Saving..." } else { "Save & mark welcomed" }}
                </Button>
            </div>
        </Modal>
    }
}
