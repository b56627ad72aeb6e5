pub mod state;

use contracts::domain::a005_activity_log::{details_summary, details_text, ENTITY_TYPES};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::{create_state, ActivityLogState};
use crate::domain::a005_activity_log::api;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::config;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::request_guard::RequestGuard;

#[component]
pub fn ActivityLogViewer() -> impl IntoView {
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let is_filter_expanded = RwSignal::new(false);
    let guard = RequestGuard::new("a005_activity_log");

    let load_logs = move |debounce: bool| {
        let ticket = guard.next();
        let query = state.with_untracked(ActivityLogState::to_query);
        spawn_local(async move {
            if debounce && !guard.settle(ticket, config().ui.search_debounce_ms).await {
                return;
            }
            set_loading.set(true);
            set_error.set(None);
            let result = api::fetch_logs(&query).await;
            if !guard.accept(ticket) {
                return;
            }
            match result {
                Ok(resp) => state.update(|s| {
                    s.items = resp.logs;
                    s.total_count = resp.pagination.total as usize;
                    s.total_pages = resp.pagination.display_pages();
                    s.page = resp.pagination.page_index();
                    s.is_loaded = true;
                }),
                Err(e) => {
                    log::error!("Failed to load activity logs: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    load_logs(false);

    let action = RwSignal::new(String::new());
    let actor = RwSignal::new(String::new());
    let entity_type = RwSignal::new(String::new());
    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());

    // Free-text fields are debounced.
    Effect::new(move |prev: Option<(String, String)>| {
        let current = (action.get(), actor.get());
        if prev.as_ref().is_some_and(|p| *p != current) {
            let (a, who) = current.clone();
            state.update(|s| {
                s.action = a;
                s.actor = who;
                s.page = 0;
            });
            load_logs(true);
        }
        current
    });

    Effect::new(move |prev: Option<(String, String, String)>| {
        let current = (entity_type.get(), start_date.get(), end_date.get());
        if prev.as_ref().is_some_and(|p| *p != current) {
            let (kind, from, to) = current.clone();
            state.update(|s| {
                s.entity_type = kind;
                s.start_date = from;
                s.end_date = to;
                s.page = 0;
            });
            load_logs(false);
        }
        current
    });

    let clear_filters = move |_| {
        action.set(String::new());
        actor.set(String::new());
        entity_type.set(String::new());
        start_date.set(String::new());
        end_date.set(String::new());
    };

    let go_to_page = move |page: usize| {
        state.update(|s| s.page = page);
        load_logs(false);
    };

    let change_page_size = move |size: usize| {
        state.update(|s| {
            s.page_size = size;
            s.page = 0;
        });
        load_logs(false);
    };

    view! {
        <PageFrame page_id="a005_activity_log--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Activity Log"</h1>
                    <span class="badge badge--primary">{move || state.with(|s| s.total_count)}</span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_logs(false)
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=is_filter_expanded
                    active_filters_count=Signal::derive(move || state.with(ActivityLogState::active_filters))
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || state.with(|s| s.page))
                            total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                            total_count=Signal::derive(move || state.with(|s| s.total_count))
                            page_size=Signal::derive(move || state.with(|s| s.page_size))
                            on_page_change=Callback::new(go_to_page)
                            on_page_size_change=Callback::new(change_page_size)
                            page_size_options=vec![25, 50, 100, 200]
                        />
                    }
                    filter_content=move || view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Action:"</Label>
                                <Input value=action placeholder="e.g. MEMBER_UPDATED" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Entity:"</Label>
                                <Select value=entity_type>
                                    <option value="">"All entities"</option>
                                    {ENTITY_TYPES.iter().map(|t| view! {
                                        <option value=*t>{*t}</option>
                                    }).collect_view()}
                                </Select>
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Actor:"</Label>
                                <Input value=actor placeholder="Email or name" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"From:"</Label>
                                <DateInput value=start_date max=Signal::derive(move || end_date.get()) />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"To:"</Label>
                                <DateInput value=end_date min=Signal::derive(move || start_date.get()) />
                            </Flex>
                            <Button appearance=ButtonAppearance::Subtle on_click=clear_filters>
                                "Clear"
                            </Button>
                        </Flex>
                    }
                />

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <Show when=move || loading.get() && !state.with(|s| s.is_loaded)>
                    <div class="loading">
                        <Spinner />
                        <span>"Loading activity..."</span>
                    </div>
                </Show>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1000px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=150.0>"When"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=160.0>"Actor"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=160.0>"Action"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>"Entity"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=280.0>"Details"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>"IP"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || state.with(|s| s.items.clone())
                                key=|entry| entry.id
                                children=move |entry| {
                                    let details = details_summary(&entry.details);
                                    let details_title = details_text(&entry.details);
                                    let created_at = format_datetime(&entry.created_at);
                                    let actor = entry.actor.clone().unwrap_or_else(|| "system".to_string());
                                    let badge_class = entry.kind().badge_class();
                                    let action = entry.action.clone();
                                    let entity_label = entry.entity_label();
                                    let ip_address = entry.ip_address.clone().unwrap_or_else(|| "-".to_string());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{created_at}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {actor}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class=badge_class>{action}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{entity_label}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span title=details_title>{details}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {ip_address}
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || state.with(|s| s.is_loaded && s.items.is_empty())>
                        <div class="table__empty">"No activity recorded for these filters"</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
