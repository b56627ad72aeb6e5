use contracts::domain::a006_zelle::{
    can_submit, resolve_member_id, CreateTransactionRequest, RowState, ZellePreviewItem,
    PAYMENT_TYPES,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::shared::components::stat_card::{format_money, StatCard, ValueFormat};
use crate::shared::date_utils::format_date_opt;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::request_guard::RequestGuard;

const DEFAULT_PAYMENT_TYPE: &str = "donation";

fn row_status(state: &RowState) -> (&'static str, String) {
    match state {
        RowState::Pending => ("badge badge--neutral", "Pending".to_string()),
        RowState::Submitting => ("badge badge--primary", "Creating...".to_string()),
        RowState::Created {
            duplicate: true, ..
        } => ("badge badge--warning", "Already recorded".to_string()),
        RowState::Created {
            transaction_id: Some(id),
            ..
        } => ("badge badge--success", format!("Created #{}", id)),
        RowState::Created { .. } => ("badge badge--success", "Created".to_string()),
        RowState::Failed(msg) => ("badge badge--error", msg.clone()),
    }
}

fn sender_label(item: &ZellePreviewItem) -> String {
    match (&item.sender_name, &item.sender_email) {
        (Some(name), Some(email)) => format!("{} <{}>", name, email),
        (Some(name), None) => name.clone(),
        (None, Some(email)) => email.clone(),
        (None, None) => "Unknown sender".to_string(),
    }
}

#[component]
fn PreviewRow(item: ZellePreviewItem, on_created: Callback<()>) -> impl IntoView {
    let typed_member_id = RwSignal::new(String::new());
    let payment_type = RwSignal::new(DEFAULT_PAYMENT_TYPE.to_string());
    let row_state = RwSignal::new(RowState::default());
    let item = StoredValue::new(item);

    let enabled = Signal::derive(move || {
        item.with_value(|it| row_state.with(|st| can_submit(it, &typed_member_id.get(), st)))
    });

    let submit = move |_| {
        let Some(member_id) = item.with_value(|it| {
            resolve_member_id(it.matched_member_id, &typed_member_id.get_untracked())
        }) else {
            row_state.set(RowState::Failed("Enter a numeric member ID".to_string()));
            return;
        };
        let request = item.with_value(|it| {
            CreateTransactionRequest::for_item(it, member_id, &payment_type.get_untracked())
        });
        row_state.set(RowState::Submitting);
        spawn_local(async move {
            let next = match api::create_transaction(&request).await {
                Ok(resp) => RowState::from_response(&resp),
                Err(e) => {
                    log::error!("Zelle reconcile {} failed: {}", request.external_id, e);
                    RowState::Failed(e.to_string())
                }
            };
            let done = next.is_done();
            row_state.set(next);
            if done {
                on_created.run(());
            }
        });
    };

    let it = item.get_value();
    let placeholder = it
        .matched_member_id
        .map(|id| format!("Matched #{}", id))
        .unwrap_or_else(|| "Member ID".to_string());
    let payment_date = format_date_opt(it.payment_date.as_deref());
    let sender = sender_label(&it);
    let subject = it.subject.clone();
    let amount = format_money(it.amount);
    let note = it.note.clone().unwrap_or_default();
    let matched_member_id = it.matched_member_id;

    view! {
        <TableRow>
            <TableCell>
                <TableCellLayout>{payment_date}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>
                    <div class="cell-stack">
                        <span>{sender}</span>
                        {subject.map(|s| view! { <span class="text-muted">{s}</span> })}
                    </div>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{amount}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>{note}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    {match matched_member_id {
                        Some(id) => view! { <span class="badge badge--success">{format!("#{}", id)}</span> }.into_any(),
                        None => view! { <span class="badge badge--warning">"Unmatched"</span> }.into_any(),
                    }}
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <Input value=typed_member_id placeholder=placeholder attr:style="width: 120px;" />
            </TableCell>
            <TableCell>
                <Select value=payment_type>
                    {PAYMENT_TYPES.iter().map(|(value, label)| view! {
                        <option value=*value>{*label}</option>
                    }).collect_view()}
                </Select>
            </TableCell>
            <TableCell>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=submit
                        disabled=Signal::derive(move || !enabled.get())
                    >
                        "Create"
                    </Button>
                    {move || row_state.with(|st| {
                        let (class, text) = row_status(st);
                        view! { <span class=class>{text}</span> }
                    })}
                </Flex>
            </TableCell>
        </TableRow>
    }
}

/// Gmail-sourced Zelle candidates with manual per-row reconciliation.
#[component]
pub fn ZelleReview() -> impl IntoView {
    let items = RwSignal::new(Vec::<ZellePreviewItem>::new());
    let (loading, set_loading) = signal(false);
    let (loaded, set_loaded) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let guard = RequestGuard::new("u501_zelle_reconcile");

    let load_preview = move || {
        let ticket = guard.next();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_gmail_preview().await;
            if !guard.accept(ticket) {
                return;
            }
            match result {
                Ok(resp) => {
                    log::info!("Zelle preview: {} candidates", resp.items.len());
                    items.set(resp.items);
                    set_loaded.set(true);
                }
                Err(e) => {
                    log::error!("Failed to load Zelle preview: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    load_preview();

    let count = move |pick: fn(&ZellePreviewItem) -> bool| {
        Signal::derive(move || {
            loaded
                .get()
                .then(|| items.with(|list| list.iter().filter(|i| pick(i)).count() as f64))
        })
    };

    view! {
        <PageFrame page_id="u501_zelle_reconcile--usecase" category="usecase">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Zelle Review"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_preview()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Checking Gmail..." } else { " Refresh preview" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard label="Candidates" icon_name="mail" value=count(|_| true) format=ValueFormat::Integer />
                    <StatCard label="Would Create" icon_name="plus" value=count(|i| i.would_create) format=ValueFormat::Integer />
                    <StatCard label="Matched" icon_name="user" value=count(|i| i.matched_member_id.is_some()) format=ValueFormat::Integer />
                </div>

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <Show when=move || loading.get() && !loaded.get()>
                    <div class="loading">
                        <Spinner />
                        <span>"Reading Zelle notifications..."</span>
                    </div>
                </Show>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1100px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=100.0>"Date"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=200.0>"Sender"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>"Amount"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=160.0>"Note"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>"Match"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=130.0>"Member ID"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=150.0>"Payment Type"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=200.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|item| item.external_id.clone()
                                children=move |item| view! {
                                    <PreviewRow item=item on_created=Callback::new(move |_| load_preview()) />
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || loaded.get() && items.with(Vec::is_empty)>
                        <div class="table__empty">"No new Zelle payments found"</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_zelle::CreateTransactionResponse;

    #[test]
    fn duplicate_rows_read_as_already_recorded() {
        let resp: CreateTransactionResponse =
            serde_json::from_str(r#"{"success": false, "duplicate": true}"#).unwrap();
        let (class, text) = row_status(&RowState::from_response(&resp));
        assert_eq!(class, "badge badge--warning");
        assert_eq!(text, "Already recorded");
    }

    #[test]
    fn created_rows_show_transaction_id() {
        let state = RowState::Created {
            transaction_id: Some(88),
            duplicate: false,
        };
        assert_eq!(row_status(&state).1, "Created #88");
        assert_eq!(row_status(&RowState::Failed("Member not found".into())).1, "Member not found");
    }

    #[test]
    fn sender_prefers_name_with_email() {
        let item: ZellePreviewItem = serde_json::from_str(
            r#"{"gmail_id": "g", "external_id": "e", "amount": 10, "sender_name": "Abeba T", "sender_email": "abeba@example.org"}"#,
        )
        .unwrap();
        assert_eq!(sender_label(&item), "Abeba T <abeba@example.org>");
    }
}
