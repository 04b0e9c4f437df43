//! Chart generation and rendering for the expense page.
//!
//! - **Monthly Expenses**: bar chart of the total spent per month
//! - **Spending by Category**: pie chart of the total spent per category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a container div and an inline initialization script. The
//! script is inline so that it also runs when htmx swaps in new page content.

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Label, Tooltip, Trigger},
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

/// Where the ECharts library is loaded from.
pub(super) const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct PageChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// The HTML element ID of the monthly expenses chart.
pub(super) const MONTHLY_CHART_ID: &str = "monthly-expenses-chart";
/// The HTML element ID of the category spending chart.
pub(super) const CATEGORY_CHART_ID: &str = "category-spending-chart";

/// Renders the container for a chart.
pub(super) fn chart_container(chart: &PageChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="w-full min-h-[380px] rounded dark:bg-gray-100"
        {}
    )
}

/// Generates the JavaScript that initializes `charts`.
///
/// Creates ECharts instances with dark mode support and responsive resizing.
/// The script must come after the chart containers in the document.
pub(super) fn charts_script(charts: &[PageChart]) -> Markup {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                escape_script_text(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html!(script { (PreEscaped(script_content)) })
}

/// Escapes `<` so that text from the expense file, such as a category named
/// `</script>`, cannot close the script element early.
///
/// `<` only appears inside string literals in the chart options, where `\u003c`
/// decodes back to the same character.
fn escape_script_text(options: &str) -> String {
    options.replace('<', "\\u003c")
}

/// Bar chart of the total spent per month, in chronological order.
pub(super) fn monthly_expenses_chart(
    monthly_totals: &BTreeMap<String, f64>,
    currency_symbol: &str,
) -> Chart {
    let labels: Vec<String> = monthly_totals.keys().cloned().collect();
    let values: Vec<f64> = monthly_totals.values().copied().collect();

    Chart::new()
        .title(Title::new().text("Monthly Expenses"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter(currency_symbol))
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter(currency_symbol))),
        )
        .series(Bar::new().name("Spent").data(values))
}

/// Pie chart of the total spent per category with percentage labels.
pub(super) fn category_spending_chart(
    category_totals: &[(String, f64)],
    currency_symbol: &str,
) -> Chart {
    let data: Vec<(f64, &str)> = category_totals
        .iter()
        .map(|(category, total)| (*total, category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Spending by Category"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter(currency_symbol)),
        )
        .legend(Legend::new().bottom("1%"))
        .series(
            Pie::new()
                .name("Spent")
                .radius("60%")
                .label(Label::new().formatter("{b}: {d}%"))
                .data(data),
        )
}

fn currency_formatter(currency_symbol: &str) -> JsFunction {
    // Formatted in the browser so the symbol is shown even when it is not an ISO currency.
    let symbol = currency_symbol.replace('\\', "\\\\").replace('"', "\\\"");

    JsFunction::new_with_args(
        "number",
        &format!(
            "const numberFormatter = new Intl.NumberFormat('en-US', {{
                  minimumFractionDigits: 2,
                  maximumFractionDigits: 2
                }});
                return (number || number === 0) ? \"{symbol}\" + numberFormatter.format(number) : \"-\";"
        ),
    )
}
