use maud::{DOCTYPE, Markup, PreEscaped, html};

use numfmt::{Formatter, Precision};

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Page layout
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub const SECTION_HEADER_STYLE: &str = "text-xl font-semibold mb-4";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    Style(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expense Tracker" }

                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/dist/response-targets.min.js" {}

                style
                {
                    r#"
                    /* Keep chart tooltips below the alerts, but above page content. */
                    .echarts-tooltip {
                        z-index: 30 !important;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptLink(path) => script src=(path) {}
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                (alert_container(html!(), false))
            }
        }
    }
}

/// The element that alerts are swapped into.
///
/// Set `swap_oob` to replace the page's container from another response.
pub fn alert_container(content: Markup, swap_oob: bool) -> Markup {
    html! {
        div
            id="alert-container"
            hx-swap-oob=[swap_oob.then_some("true")]
            class="w-full max-w-md px-4"
            style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
        {
            (content)
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Expenses"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// A muted message shown in place of a list, table or chart with nothing to show.
pub fn info_message(message: &str) -> Markup {
    html! {
        p
            class="w-full p-4 text-sm text-blue-800 rounded bg-blue-50
                dark:bg-gray-800 dark:text-blue-400"
            role="status"
        {
            (message)
        }
    }
}

/// Returns the CSS styles for adding a currency symbol prefix to number inputs.
pub fn currency_input_styles(currency_symbol: &str) -> HeadElement {
    let symbol = currency_symbol.replace('\\', "\\\\").replace('\'', "\\'");

    HeadElement::Style(PreEscaped(format!(
        r#"
        .input-wrapper {{
            position: relative;
            display: inline-block;
        }}
        .input-wrapper input[type="number"] {{
            padding-left: 1.4rem;
        }}
        .input-wrapper::before {{
            content: '{symbol}';
            position: absolute;
            left: 0.6rem;
            top: 50%;
            transform: translateY(-50%);
            pointer-events: none;
        }}
        "#
    )))
}

/// Format `number` with thousands separators, two decimal places and
/// `currency_symbol` as the prefix, e.g. "₹1,234.50".
pub fn format_currency(number: f64, currency_symbol: &str) -> String {
    if number == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return format!("{currency_symbol}0.00");
    }

    let prefix = if number < 0.0 {
        format!("-{currency_symbol}")
    } else {
        currency_symbol.to_owned()
    };

    let formatter = match Formatter::currency(&prefix) {
        Ok(formatter) => formatter.precision(Precision::Decimals(2)),
        Err(error) => {
            tracing::warn!("could not create currency formatter for {prefix:?}: {error:?}");
            return format!("{prefix}{:.2}", number.abs());
        }
    };

    let formatted_string = formatter.fmt_string(number.abs());

    // numfmt omits trailing zeros, so we must add them ourselves.
    // For example, "12.30" is rendered as "12.3" so we append "0".
    match formatted_string.rfind('.') {
        None => format!("{formatted_string}.00"),
        Some(point) if formatted_string.len() - point == 2 => format!("{formatted_string}0"),
        Some(_) => formatted_string,
    }
}
