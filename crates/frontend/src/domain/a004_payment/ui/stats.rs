use contracts::domain::a004_payment::{Payment, PaymentStatus, PaymentSummary};
use leptos::prelude::*;

use crate::shared::components::stat_card::{CardTone, StatCard, ValueFormat};

fn rate_tone(rate: f64) -> CardTone {
    if rate >= 90.0 {
        CardTone::Good
    } else if rate >= 60.0 {
        CardTone::Warning
    } else {
        CardTone::Bad
    }
}

/// Summary cards over the loaded page of payments.
#[component]
pub fn PaymentStats(
    #[prop(into)] payments: Signal<Vec<Payment>>,
    /// Server-side total of matching records
    #[prop(into)]
    total_count: Signal<usize>,
    #[prop(into)] is_loaded: Signal<bool>,
) -> impl IntoView {
    let summary = Memo::new(move |_| payments.with(|p| PaymentSummary::from_payments(p)));

    let value = move |pick: fn(&PaymentSummary) -> f64| {
        Signal::derive(move || is_loaded.get().then(|| summary.with(pick)))
    };

    let page_note = Signal::derive(move || {
        summary.with(|s| Some(format!("across {} records on this page", s.count)))
    });

    let buckets = move || {
        summary.with(|s| {
            [
                (PaymentStatus::UpToDate, s.up_to_date),
                (PaymentStatus::Partial, s.partial),
                (PaymentStatus::Behind, s.behind),
            ]
        })
    };

    view! {
        <div class="stat-grid">
            <StatCard
                label="Members on File"
                icon_name="users"
                value=Signal::derive(move || is_loaded.get().then(|| total_count.get() as f64))
                format=ValueFormat::Integer
            />
            <StatCard
                label="Total Due"
                icon_name="credit-card"
                value=value(|s| s.total_due)
                format=ValueFormat::Money
                subtitle=page_note
            />
            <StatCard
                label="Collected"
                icon_name="check"
                value=value(|s| s.total_collected)
                format=ValueFormat::Money
                tone=CardTone::Good
            />
            <StatCard
                label="Outstanding"
                icon_name="bar-chart"
                value=value(|s| s.outstanding)
                format=ValueFormat::Money
                tone=Signal::derive(move || {
                    if summary.with(|s| s.outstanding > 0.0) { CardTone::Warning } else { CardTone::Neutral }
                })
            />
            <StatCard
                label="Collection Rate"
                icon_name="activity"
                value=value(PaymentSummary::collection_rate)
                format=ValueFormat::Percent { decimals: 1 }
                tone=Signal::derive(move || rate_tone(summary.with(PaymentSummary::collection_rate)))
            />
        </div>
        <div class="status-breakdown">
            {move || buckets().into_iter().map(|(status, count)| view! {
                <span class=status.badge_class()>{format!("{}: {}", status.label(), count)}</span>
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_rate_tones() {
        assert_eq!(rate_tone(100.0), CardTone::Good);
        assert_eq!(rate_tone(75.0), CardTone::Warning);
        assert_eq!(rate_tone(10.0), CardTone::Bad);
    }
}
