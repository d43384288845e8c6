use api::CompositionItem;
use dioxus::prelude::*;

use crate::core::format;

const PALETTE: [&str; 8] = [
    "#10b981", "#3b82f6", "#f59e0b", "#ef4444", "#8b5cf6", "#14b8a6", "#ec4899", "#64748b",
];

fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Shares of the total as percentages; empty when the total is not positive.
fn shares(items: &[CompositionItem]) -> Vec<f64> {
    let total: f64 = items.iter().map(|i| i.value).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    items.iter().map(|i| i.value / total * 100.0).collect()
}

/// CSS `conic-gradient` stops for a pie of `items`.
pub(crate) fn conic_gradient(items: &[CompositionItem]) -> String {
    let mut start = 0.0;
    let stops: Vec<String> = shares(items)
        .into_iter()
        .enumerate()
        .map(|(index, share)| {
            let end = start + share;
            let stop = format!("{} {start:.2}% {end:.2}%", color(index));
            start = end;
            stop
        })
        .collect();
    format!("conic-gradient({})", stops.join(", "))
}

#[component]
pub fn CompositionChart(items: Vec<CompositionItem>) -> Element {
    let percentages = shares(&items);

    if percentages.is_empty() {
        return rsx! {
            p { class: "composition-chart__empty", "No composition data available." }
        };
    }

    let gradient = conic_gradient(&items);
    let summary = items
        .iter()
        .zip(&percentages)
        .map(|(item, pct)| format!("{} {}", item.name, format::format_percent(*pct)))
        .collect::<Vec<_>>()
        .join(", ");

    rsx! {
        div { class: "composition-chart",
            div {
                class: "composition-chart__pie",
                role: "img",
                aria_label: "Pie chart showing material composition: {summary}",
                style: "background: {gradient};",
            }
            ul { class: "composition-chart__legend",
                for (index, (item, pct)) in items.iter().zip(percentages.iter()).enumerate() {
                    li { key: "{item.name}-{index}", class: "composition-chart__entry",
                        span {
                            class: "composition-chart__swatch",
                            style: "background: {color(index)};",
                        }
                        span { class: "composition-chart__name", "{item.name}" }
                        span { class: "composition-chart__value", "{format::format_percent(*pct)}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_stops_cover_the_circle() {
        let gradient = conic_gradient(&[
            CompositionItem::new("Plastic", 3.0),
            CompositionItem::new("Metal", 1.0),
        ]);
        assert_eq!(
            gradient,
            "conic-gradient(#10b981 0.00% 75.00%, #3b82f6 75.00% 100.00%)"
        );
    }

    #[test]
    fn zero_total_has_no_shares() {
        assert!(shares(&[CompositionItem::new("Air", 0.0)]).is_empty());
    }
}
