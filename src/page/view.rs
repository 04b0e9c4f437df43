//! HTML views for the expense page.
//!
//! The page is split into the sidebar form, which is rendered once, and the
//! content partial (`#expense-content`), which every action re-renders.

use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{
    endpoints,
    expense::Expense,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, PAGE_CONTAINER_STYLE, SECTION_HEADER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, currency_input_styles, format_currency,
        info_message,
    },
    page::{
        charts::{
            CATEGORY_CHART_ID, ECHARTS_SCRIPT_URL, MONTHLY_CHART_ID, PageChart,
            category_spending_chart, chart_container, charts_script, monthly_expenses_chart,
        },
        form::expense_form_fields,
        model::{ExpensePage, ExpenseRow},
    },
};

/// The ID of the element that holds the re-rendered page content.
const CONTENT_ID: &str = "expense-content";
/// The ID of the category filter select, included in every action's request.
const FILTER_ID: &str = "filter";

const FORM_ID: &str = "expense-form";
const CONTENT_TARGET: &str = "#expense-content";
const FILTER_INCLUDE: &str = "#filter";
const ALERT_TARGET: &str = "#alert-container";

/// Renders the full expense page.
pub(super) fn expenses_page_view(page: &ExpensePage, today: Date, currency_symbol: &str) -> Markup {
    let content = html!(
        div class="flex flex-col lg:flex-row min-h-screen"
        {
            aside
                class="w-full lg:w-80 lg:min-h-screen px-6 py-8 bg-white
                    dark:bg-gray-800 text-gray-900 dark:text-white shadow"
            {
                h2 class=(SECTION_HEADER_STYLE) { "Add New Expense" }

                (expense_form(today))
            }

            main class={(PAGE_CONTAINER_STYLE) " w-full max-w-screen-lg"}
            {
                h1 class="text-3xl font-bold mb-6" { "Simple Expense Manager" }

                (expense_content_view(page, currency_symbol))
            }
        }
    );

    base(
        "Expenses",
        &[
            HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
            currency_input_styles(currency_symbol),
        ],
        &content,
    )
}

fn expense_form(today: Date) -> Markup {
    html! {
        form
            hx-post=(endpoints::EXPENSES_API)
            hx-target=(CONTENT_TARGET)
            hx-swap="outerHTML"
            hx-target-error=(ALERT_TARGET)
            hx-include=(FILTER_INCLUDE)
            id=(FORM_ID)
            class="space-y-4"
        {
            (expense_form_fields(today))

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                "Add Expense"
            }
        }

        // Clear the form once the expense has been added.
        script
        {
            (PreEscaped(format!(
                "document.getElementById('{FORM_ID}').addEventListener('htmx:afterRequest', (event) => {{
                    if (event.detail.successful) event.target.reset();
                }});"
            )))
        }
    }
}

/// Renders the part of the page that changes with every action.
pub(super) fn expense_content_view(page: &ExpensePage, currency_symbol: &str) -> Markup {
    let mut charts = Vec::new();

    if !page.monthly_totals.is_empty() {
        charts.push(PageChart {
            id: MONTHLY_CHART_ID,
            options: monthly_expenses_chart(&page.monthly_totals, currency_symbol).to_string(),
        });
    }

    if !page.category_totals.is_empty() {
        charts.push(PageChart {
            id: CATEGORY_CHART_ID,
            options: category_spending_chart(&page.category_totals, currency_symbol).to_string(),
        });
    }

    let chart_with_id = |id: &str| charts.iter().find(|chart| chart.id == id);

    html! {
        div id=(CONTENT_ID) class="w-full space-y-8"
        {
            section id="all-expenses"
            {
                h2 class=(SECTION_HEADER_STYLE) { "All Expenses" }

                @if page.rows.is_empty() {
                    (info_message("No expenses added yet."))
                } @else {
                    ul class="divide-y divide-gray-200 dark:divide-gray-700"
                    {
                        @for row in &page.rows {
                            (expense_list_item(row, currency_symbol))
                        }
                    }
                }
            }

            section id="filter-expenses"
            {
                h2 class=(SECTION_HEADER_STYLE) { "Filter Expenses" }

                label for=(FILTER_ID) class=(FORM_LABEL_STYLE) { "Select Category" }

                select
                    id=(FILTER_ID)
                    name="filter"
                    hx-get=(endpoints::EXPENSES_API)
                    hx-trigger="change"
                    hx-target=(CONTENT_TARGET)
                    hx-swap="outerHTML"
                    hx-target-error=(ALERT_TARGET)
                    class={(FORM_TEXT_INPUT_STYLE) " max-w-xs mb-4"}
                {
                    @for filter_option in &page.filter_options {
                        option
                            value=(filter_option)
                            selected[*filter_option == page.selected_filter]
                        {
                            (filter_option)
                        }
                    }
                }

                h3 class="text-lg font-semibold mb-2" { "Filtered Expenses" }

                @if page.filtered.is_empty() {
                    (info_message("No data to display."))
                } @else {
                    (filtered_expenses_table(&page.filtered))
                }
            }

            section id="total-expenses"
            {
                h2 class=(SECTION_HEADER_STYLE) { "Total Expenses" }

                p
                {
                    "Total spent: "
                    span id="total" class="font-bold" { (format_currency(page.total, currency_symbol)) }
                }
            }

            section id="monthly-summary"
            {
                h2 class=(SECTION_HEADER_STYLE) { "Monthly Expense Summary" }

                @match chart_with_id(MONTHLY_CHART_ID) {
                    Some(chart) => { (chart_container(chart)) }
                    None => { (info_message("No monthly data to show.")) }
                }
            }

            section id="category-summary"
            {
                h2 class=(SECTION_HEADER_STYLE) { "Category-wise Spending" }

                @match chart_with_id(CATEGORY_CHART_ID) {
                    Some(chart) => { (chart_container(chart)) }
                    None => { (info_message("No category-wise data to show.")) }
                }
            }

            @if !charts.is_empty() {
                (charts_script(&charts))
            }
        }
    }
}

fn expense_list_item(row: &ExpenseRow, currency_symbol: &str) -> Markup {
    let expense = &row.expense;
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_EXPENSE, row.position);

    html! {
        li class="flex items-center justify-between gap-4 py-3"
        {
            span
            {
                (expense.date) " | " (expense.category) " | "
                (currency_symbol) (expense.amount) " | " (expense.description)
            }

            button
                type="button"
                hx-delete=(delete_url)
                hx-target=(CONTENT_TARGET)
                hx-swap="outerHTML"
                hx-target-error=(ALERT_TARGET)
                hx-include=(FILTER_INCLUDE)
                aria-label={"Delete expense " (row.position + 1)}
                class=(BUTTON_DELETE_STYLE)
            {
                "Delete"
            }
        }
    }
}

fn filtered_expenses_table(expenses: &[Expense]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (expense.date) }
                            td class=(TABLE_CELL_STYLE) { (expense.category) }
                            td class=(TABLE_CELL_STYLE) { (expense.amount) }
                            td class=(TABLE_CELL_STYLE) { (expense.description) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        endpoints,
        expense::{Category, CategoryFilter, Expense},
        html::format_currency,
        page::{
            ExpensePage,
            view::{expense_content_view, expenses_page_view},
        },
        test_utils::{assert_hx_endpoint, assert_valid_html, must_get_form},
    };

    fn scenario_expenses() -> Vec<Expense> {
        vec![
            Expense::new(date!(2024 - 01 - 01), Category::Food, 10.0, "lunch"),
            Expense::new(date!(2024 - 01 - 15), Category::Food, 5.5, "snack"),
            Expense::new(date!(2024 - 02 - 01), Category::Transport, 20.0, "bus"),
        ]
    }

    fn render_content(expenses: &[Expense], filter: CategoryFilter) -> Html {
        let page = ExpensePage::build(expenses, &filter).unwrap();
        Html::parse_fragment(&expense_content_view(&page, "₹").into_string())
    }

    fn select_text(html: &Html, selector: &str) -> Vec<String> {
        html.select(&Selector::parse(selector).unwrap())
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[test]
    fn page_has_form_that_posts_expenses() {
        let page = ExpensePage::build(&[], &CategoryFilter::All).unwrap();

        let html = Html::parse_document(
            &expenses_page_view(&page, date!(2024 - 06 - 30), "₹").into_string(),
        );

        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::EXPENSES_API, "hx-post");
    }

    #[test]
    fn empty_page_shows_info_messages() {
        let html = render_content(&[], CategoryFilter::All);

        assert_eq!(
            select_text(&html, "[role=status]"),
            vec![
                "No expenses added yet.",
                "No data to display.",
                "No monthly data to show.",
                "No category-wise data to show.",
            ]
        );
        assert!(
            html.select(&Selector::parse("script").unwrap())
                .next()
                .is_none(),
            "want no chart script when there is no data"
        );
    }

    #[test]
    fn list_shows_every_expense_with_delete_by_position() {
        let html = render_content(&scenario_expenses(), CategoryFilter::All);

        let items = select_text(&html, "#all-expenses li span");
        assert_eq!(
            items,
            vec![
                "2024-01-01 | Food | ₹10.00 | lunch",
                "2024-01-15 | Food | ₹5.50 | snack",
                "2024-02-01 | Transport | ₹20.00 | bus",
            ]
        );

        let delete_urls = html
            .select(&Selector::parse("#all-expenses button").unwrap())
            .map(|button| button.value().attr("hx-delete").unwrap_or_default().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(
            delete_urls,
            vec!["/api/expenses/0", "/api/expenses/1", "/api/expenses/2"]
        );
    }

    #[test]
    fn filter_narrows_table_and_total_but_not_list() {
        let html = render_content(
            &scenario_expenses(),
            CategoryFilter::Category("Food".to_owned()),
        );

        assert_eq!(select_text(&html, "#all-expenses li").len(), 3);
        assert_eq!(select_text(&html, "#filter-expenses tbody tr").len(), 2);
        assert_eq!(
            select_text(&html, "#total"),
            vec![format_currency(15.5, "₹")]
        );
    }

    #[test]
    fn filter_options_mark_selected_category() {
        let html = render_content(
            &scenario_expenses(),
            CategoryFilter::Category("Transport".to_owned()),
        );

        assert_eq!(
            select_text(&html, "#filter option"),
            vec!["All", "Food", "Transport"]
        );
        assert_eq!(
            select_text(&html, "#filter option[selected]"),
            vec!["Transport"]
        );
    }

    #[test]
    fn total_covers_all_expenses_without_filter() {
        let html = render_content(&scenario_expenses(), CategoryFilter::All);

        assert_eq!(
            select_text(&html, "#total"),
            vec![format_currency(35.5, "₹")]
        );
    }

    #[test]
    fn charts_are_rendered_when_there_is_data() {
        let html = render_content(&scenario_expenses(), CategoryFilter::All);

        for id in ["#monthly-expenses-chart", "#category-spending-chart"] {
            assert!(
                html.select(&Selector::parse(id).unwrap()).next().is_some(),
                "want chart container {id}"
            );
        }

        let script = select_text(&html, "script").join("\n");
        assert!(script.contains("monthly-expenses-chart"));
        assert!(script.contains("category-spending-chart"));
    }

    #[test]
    fn markup_in_category_names_is_rendered_as_text() {
        let category = "</script><img src=x onerror=alert(1)>";
        let expenses = vec![Expense {
            date: "2024-01-01".to_owned(),
            category: category.to_owned(),
            amount: "1.00".to_owned(),
            description: "<b>lunch</b>".to_owned(),
        }];

        let markup = {
            let page = ExpensePage::build(&expenses, &CategoryFilter::All).unwrap();
            expense_content_view(&page, "₹").into_string()
        };
        let html = Html::parse_fragment(&markup);

        assert!(!markup.contains("</script><img"), "got {markup}");
        assert!(html.select(&Selector::parse("img").unwrap()).next().is_none());
        assert!(html.select(&Selector::parse("b").unwrap()).next().is_none());
        assert!(
            select_text(&html, "#filter option").contains(&category.to_owned()),
            "want the category as option text"
        );
        let script = select_text(&html, "script").join("\n");
        assert!(script.contains("category-spending-chart"), "got {script}");
    }

    #[test]
    fn monthly_chart_is_omitted_when_no_dates_parse() {
        let expenses = vec![Expense {
            date: "someday".to_owned(),
            category: "Food".to_owned(),
            amount: "1.00".to_owned(),
            description: String::new(),
        }];

        let html = render_content(&expenses, CategoryFilter::All);

        assert!(
            html.select(&Selector::parse("#monthly-expenses-chart").unwrap())
                .next()
                .is_none()
        );
        assert!(
            html.select(&Selector::parse("#category-spending-chart").unwrap())
                .next()
                .is_some()
        );
        assert!(select_text(&html, "[role=status]").contains(&"No monthly data to show.".to_owned()));
    }
}
