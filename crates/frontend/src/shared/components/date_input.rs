use leptos::prelude::*;

/// Native date picker bound to a `yyyy-mm-dd` string; empty means unset.
#[component]
pub fn DateInput(
    value: RwSignal<String>,
    #[prop(optional)] max: Option<Signal<String>>,
    #[prop(optional)] min: Option<Signal<String>>,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="date-input"
            prop:value=move || value.get()
            min=move || min.map(|m| m.get()).unwrap_or_default()
            max=move || max.map(|m| m.get()).unwrap_or_default()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}
