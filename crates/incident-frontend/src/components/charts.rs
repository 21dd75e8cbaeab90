//! # Incident Type Chart Component
//!
//! Horizontal bar chart of the top incident types using Charming
//! (ECharts wrapper).

use charming::{
    component::{Axis, Grid, Title},
    element::{
        AxisLabel, AxisLine, AxisLineStyle, AxisType, ItemStyle, LineStyle, SplitLine, TextStyle, Tooltip, Trigger,
    },
    series::Bar,
    Chart, WasmRenderer,
};
use incident_domain::RankedRow;
use leptos::prelude::*;

const CHART_ID: &str = "type-ranking-chart";

/// Build the chart; the highest ranked type ends up on top
#[allow(clippy::cast_precision_loss)]
fn ranking_chart(rows: &[RankedRow]) -> Chart {
    let labels: Vec<String> = rows.iter().rev().map(|row| row.label.clone()).collect();
    let totals: Vec<f64> = rows.iter().rev().map(|row| row.total as f64).collect();

    Chart::new()
        .title(
            Title::new()
                .text("TIPOS DE INCIDENTE")
                .text_style(TextStyle::new().color("#e0e0e0").font_size(12))
                .left("center"),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(Grid::new().left("30%").right("8%").top("12%").bottom("8%"))
        .x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().color("#8899aa"))
                .split_line(SplitLine::new().line_style(LineStyle::new().color("#2a3340"))),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(labels)
                .axis_line(AxisLine::new().line_style(AxisLineStyle::new().color((1.0, "#8899aa"))))
                .axis_label(AxisLabel::new().color("#c0c8d0")),
        )
        .series(
            Bar::new()
                .name("Incidentes")
                .data(totals)
                .item_style(ItemStyle::new().color("#ff6b6b")),
        )
}

/// Chart of the ranked incident types of a statistics result
#[component]
pub fn TypeRankingChart(rows: Vec<RankedRow>) -> impl IntoView {
    let has_rows = !rows.is_empty();

    // Render after the container is in the document
    Effect::new(move |_| {
        if rows.is_empty() {
            return;
        }
        let renderer = WasmRenderer::new(520, 280);
        if let Err(e) = renderer.render(CHART_ID, &ranking_chart(&rows)) {
            log::error!("Chart render error: {e:?}");
        }
    });

    has_rows.then(|| view! { <div id=CHART_ID class="chart-container"></div> })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_chart_builds_for_empty_rows() {
        let chart = ranking_chart(&[]);
        assert!(chart.to_string().contains("TIPOS DE INCIDENTE"));
    }

    #[test]
    fn test_ranking_chart_puts_top_row_last() {
        let rows = vec![
            RankedRow { position: 1, label: "Robo".into(), total: 9 },
            RankedRow { position: 2, label: "Choque".into(), total: 4 },
        ];
        let json = ranking_chart(&rows).to_string();
        let choque = json.find("Choque").unwrap();
        let robo = json.find("Robo").unwrap();
        assert!(choque < robo);
    }
}
