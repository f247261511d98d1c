use contracts::dashboards::d400_store_summary::ChartSeries;
use leptos::prelude::*;

/// Горизонтальные столбцы, пропорциональные максимуму серии
#[component]
pub fn BarChart(series: ChartSeries) -> impl IntoView {
    let max = series.max_value();
    let empty = series.is_empty();

    view! {
        <div class="bar-chart">
            <h3 class="bar-chart__title">{series.title.clone()}</h3>
            {empty.then(|| view! { <div class="bar-chart__empty">"Sin datos"</div> })}
            {series.points.into_iter().map(|point| {
                let width = if max > 0.0 { point.value / max * 100.0 } else { 0.0 };
                view! {
                    <div class="bar-chart__row">
                        <span class="bar-chart__label" title=point.label.clone()>{point.label.clone()}</span>
                        <div class="bar-chart__track">
                            <div class="bar-chart__bar" style=format!("width: {width:.1}%;")></div>
                        </div>
                        <span class="bar-chart__value">{format!("{}", point.value)}</span>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
