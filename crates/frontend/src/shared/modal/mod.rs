use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Overlay dialog. Closes on Escape, on the close button and on a click
/// outside the dialog; footers are part of `children`.
#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: String,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Extra class for sizing, e.g. `modal--wide`
    #[prop(optional)]
    class: &'static str,
    /// Modal content
    children: Children,
) -> impl IntoView {
    // Escape closes the modal; the listener goes away with it.
    let handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    let handle_overlay_click = move |_| {
        on_close.run(());
    };

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    let handle_close = move |_| {
        on_close.run(());
    };

    let modal_class = if class.is_empty() {
        "modal".to_string()
    } else {
        format!("modal {class}")
    };

    view! {
        <div class="modal-overlay" on:click=handle_overlay_click>
            <div class=modal_class on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <button class="button button--icon modal__close" title="Close" on:click=handle_close>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
