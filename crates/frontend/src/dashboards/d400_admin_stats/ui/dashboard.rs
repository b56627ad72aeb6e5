use contracts::domain::a001_member::MemberStats;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_member::api;
use crate::shared::components::stat_card::{CardTone, StatCard, ValueFormat};
use crate::shared::date_utils::today;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::request_guard::RequestGuard;

/// Overview tab: membership figures computed from the full member list.
#[component]
pub fn AdminStats() -> impl IntoView {
    let (stats, set_stats) = signal(None::<MemberStats>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let guard = RequestGuard::new("d400_admin_stats");

    let load = move || {
        let ticket = guard.next();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_all_members().await;
            if !guard.accept(ticket) {
                return;
            }
            match result {
                Ok(members) => {
                    log::debug!("Computing stats over {} members", members.len());
                    set_stats.set(Some(MemberStats::compute(&members, today())));
                }
                Err(e) => {
                    log::error!("Failed to load member stats: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    load();

    let figure = move |pick: fn(&MemberStats) -> usize| {
        Signal::derive(move || stats.with(|s| s.as_ref().map(|s| pick(s) as f64)))
    };

    let active_share = Signal::derive(move || {
        stats.with(|s| {
            s.as_ref()
                .map(|s| format!("{:.1}% of all members", s.active_percent()))
        })
    });

    let inactive_tone = Signal::derive(move || {
        stats.with(|s| match s {
            Some(s) if s.inactive_members > 0 => CardTone::Warning,
            _ => CardTone::Neutral,
        })
    });

    view! {
        <PageFrame page_id="d400_admin_stats--dashboard" category="dashboard">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Overview"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <Show when=move || loading.get() && stats.with(Option::is_none)>
                    <div class="loading">
                        <Spinner />
                        <span>"Loading members..."</span>
                    </div>
                </Show>

                <div class="stat-grid">
                    <StatCard
                        label="Total Members"
                        icon_name="users"
                        value=figure(|s| s.total_members)
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Active"
                        icon_name="check"
                        value=figure(|s| s.active_members)
                        format=ValueFormat::Integer
                        tone=CardTone::Good
                        subtitle=active_share
                    />
                    <StatCard
                        label="Inactive"
                        icon_name="x"
                        value=figure(|s| s.inactive_members)
                        format=ValueFormat::Integer
                        tone=inactive_tone
                    />
                    <StatCard
                        label="Joined This Month"
                        icon_name="user-plus"
                        value=figure(|s| s.joined_this_month)
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Households with Dependents"
                        icon_name="heart"
                        value=figure(|s| s.households_with_dependents)
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Dependents"
                        icon_name="user"
                        value=figure(|s| s.total_dependents)
                        format=ValueFormat::Integer
                    />
                </div>

                {move || stats.get().map(|s| view! {
                    <div class="breakdown-grid">
                        <Card>
                            <h3 class="breakdown__title">"By Role"</h3>
                            <Breakdown
                                rows=s.by_role.iter().map(|(role, n)| (role.label().to_string(), *n)).collect()
                                total=s.total_members
                            />
                        </Card>
                        <Card>
                            <h3 class="breakdown__title">"By Gender"</h3>
                            <Breakdown rows=s.by_gender.clone() total=s.total_members />
                        </Card>
                    </div>
                })}
            </div>
        </PageFrame>
    }
}

/// Label / count / share bars for one breakdown.
#[component]
fn Breakdown(rows: Vec<(String, usize)>, total: usize) -> impl IntoView {
    if rows.is_empty() {
        return view! { <p class="text-muted">"No members yet"</p> }.into_any();
    }

    rows.into_iter()
        .map(|(label, count)| {
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            view! {
                <div class="breakdown__row">
                    <span class="breakdown__label">{label}</span>
                    <div class="breakdown__bar">
                        <div class="breakdown__fill" style=format!("width: {:.1}%;", percent)></div>
                    </div>
                    <span class="breakdown__count">{count}</span>
                </div>
            }
        })
        .collect_view()
        .into_any()
}
