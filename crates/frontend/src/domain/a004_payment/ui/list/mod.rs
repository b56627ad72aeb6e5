pub mod state;

use contracts::domain::a004_payment::{PaymentStatus, PAYMENT_METHODS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::{create_state, PaymentListState};
use super::stats::PaymentStats;
use crate::domain::a004_payment::api;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::format_money;
use crate::shared::config::config;
use crate::shared::date_utils::format_date_opt;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::request_guard::RequestGuard;

#[component]
pub fn PaymentList() -> impl IntoView {
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let is_filter_expanded = RwSignal::new(true);
    let guard = RequestGuard::new("a004_payment");

    let load_items = move |debounce: bool| {
        let ticket = guard.next();
        let query = state.with_untracked(PaymentListState::to_query);
        spawn_local(async move {
            if debounce && !guard.settle(ticket, config().ui.search_debounce_ms).await {
                return;
            }
            set_loading.set(true);
            set_error.set(None);
            log::debug!("Loading payments page {}", query.page);
            let result = api::fetch_payments(&query).await;
            if !guard.accept(ticket) {
                return;
            }
            match result {
                Ok(resp) => state.update(|s| {
                    s.items = resp.payments;
                    s.total_count = resp.pagination.total as usize;
                    s.total_pages = resp.pagination.display_pages();
                    s.page = resp.pagination.page_index();
                    s.is_loaded = true;
                }),
                Err(e) => {
                    log::error!("Failed to load payments: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    load_items(false);

    let search_query = RwSignal::new(String::new());
    Effect::new(move |prev: Option<String>| {
        let v = search_query.get();
        if prev.is_some_and(|p| p != v) {
            state.update(|s| {
                s.search_query = v.clone();
                s.page = 0;
            });
            load_items(true);
        }
        v
    });

    let status_filter = RwSignal::new(String::new());
    let method_filter = RwSignal::new(String::new());
    Effect::new(move |prev: Option<(String, String)>| {
        let current = (status_filter.get(), method_filter.get());
        if prev.as_ref().is_some_and(|p| *p != current) {
            let (status, method) = current.clone();
            state.update(|s| {
                s.status = PaymentStatus::parse(&status);
                s.payment_method = (!method.is_empty()).then_some(method);
                s.page = 0;
            });
            load_items(false);
        }
        current
    });

    let go_to_page = move |page: usize| {
        state.update(|s| s.page = page);
        load_items(false);
    };

    let change_page_size = move |size: usize| {
        state.update(|s| {
            s.page_size = size;
            s.page = 0;
        });
        load_items(false);
    };

    view! {
        <PageFrame page_id="a004_payment--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Payments"</h1>
                    <span class="badge badge--primary">{move || state.with(|s| s.total_count)}</span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_items(false)
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <PaymentStats
                    payments=Signal::derive(move || state.with(|s| s.items.clone()))
                    total_count=Signal::derive(move || state.with(|s| s.total_count))
                    is_loaded=Signal::derive(move || state.with(|s| s.is_loaded))
                />

                <FilterPanel
                    is_expanded=is_filter_expanded
                    active_filters_count=Signal::derive(move || state.with(PaymentListState::active_filters))
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || state.with(|s| s.page))
                            total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                            total_count=Signal::derive(move || state.with(|s| s.total_count))
                            page_size=Signal::derive(move || state.with(|s| s.page_size))
                            on_page_change=Callback::new(go_to_page)
                            on_page_size_change=Callback::new(change_page_size)
                        />
                    }
                    filter_content=move || view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div style="flex: 1; max-width: 320px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Search:"</Label>
                                    <Input value=search_query placeholder="Member name or email..." />
                                </Flex>
                            </div>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Status:"</Label>
                                <Select value=status_filter>
                                    <option value="">"All statuses"</option>
                                    {PaymentStatus::ALL.into_iter().map(|st| view! {
                                        <option value=st.as_str()>{st.label()}</option>
                                    }).collect_view()}
                                </Select>
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Method:"</Label>
                                <Select value=method_filter>
                                    <option value="">"All methods"</option>
                                    {PAYMENT_METHODS.iter().map(|m| view! {
                                        <option value=*m>{m.to_uppercase()}</option>
                                    }).collect_view()}
                                </Select>
                            </Flex>
                        </Flex>
                    }
                />

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <Show when=move || loading.get() && !state.with(|s| s.is_loaded)>
                    <div class="loading">
                        <Spinner />
                        <span>"Loading payments..."</span>
                    </div>
                </Show>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 900px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=200.0>"Member"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>"Amount Due"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>"Collected"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>"Balance"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0>"Status"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>"Method"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>"Last Payment"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || state.with(|s| s.items.clone())
                                key=|p| (p.id, p.total_amount_due.to_bits(), p.total_collected.to_bits())
                                children=move |p| {
                                    let status = p.status();
                                    let contact = p.member_email.clone().or_else(|| p.member_phone.clone());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <div class="cell-stack">
                                                        <span>{p.member_name.clone()}</span>
                                                        {contact.map(|c| view! { <span class="text-muted">{c}</span> })}
                                                    </div>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_money(p.total_amount_due)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_money(p.total_collected)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_money(p.balance_due)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class=status.badge_class()>{status.label()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {p.payment_method.clone().map(|m| m.to_uppercase()).unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_date_opt(p.last_payment_date.as_deref())}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || state.with(|s| s.is_loaded && s.items.is_empty())>
                        <div class="table__empty">"No payments match the current filters"</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
