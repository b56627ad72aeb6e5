use crate::shared::icons::icon;
use leptos::prelude::*;

/// How a stat card renders its number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueFormat {
    Money,
    Integer,
    Percent { decimals: u8 },
}

/// Colour accent of a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardTone {
    #[default]
    Neutral,
    Good,
    Warning,
    Bad,
}

pub fn format_thousands(n: i64) -> String {
    let s = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// `1234.5` -> `$1,234.50`; negatives as `-$12.00`.
pub fn format_money(val: f64) -> String {
    let cents = (val.abs() * 100.0).round() as i64;
    let sign = if val < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}${}.{:02}",
        sign,
        format_thousands(cents / 100),
        cents % 100
    )
}

pub fn format_value(val: f64, fmt: ValueFormat) -> String {
    match fmt {
        ValueFormat::Money => format_money(val),
        ValueFormat::Integer => format_thousands(val.round() as i64),
        ValueFormat::Percent { decimals } => {
            format!("{:.prec$}%", val, prec = decimals as usize)
        }
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// Primary value (None = still loading)
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: ValueFormat,
    #[prop(into, optional)]
    tone: Signal<CardTone>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let tone_class = move || match tone.get() {
        CardTone::Good => "stat-card stat-card--success",
        CardTone::Bad => "stat-card stat-card--error",
        CardTone::Warning => "stat-card stat-card--warning",
        CardTone::Neutral => "stat-card",
    };

    let formatted = move || match value.get() {
        Some(v) => format_value(v, format),
        None => "-".to_string(),
    };

    view! {
        <div class=tone_class>
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! {
                    <div class="stat-card__subtitle">{s}</div>
                })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_use_commas() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-4_500), "-4,500");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(-12.0), "-$12.00");
        assert_eq!(format_money(19.999), "$20.00");
    }

    #[test]
    fn percent_and_integer_formats() {
        assert_eq!(format_value(35.714, ValueFormat::Percent { decimals: 1 }), "35.7%");
        assert_eq!(format_value(1520.0, ValueFormat::Integer), "1,520");
    }
}
