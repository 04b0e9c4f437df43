use maud::{Markup, html};
use time::Date;

use crate::{
    expense::Category,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The inputs for a new expense, without the surrounding form or submit button.
pub(super) fn expense_form_fields(today: Date) -> Markup {
    html! {
        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(today)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in Category::ALL {
                    option value=(category) { (category) }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0"
                    placeholder="0.00"
                    value="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use super::expense_form_fields;
    use crate::test_utils::{assert_form_input, assert_form_input_with_value, must_get_form};

    fn render_fields() -> Html {
        let fields = expense_form_fields(date!(2024 - 06 - 30));
        let markup = maud::html! { form { (fields) } };
        Html::parse_document(&markup.into_string())
    }

    #[test]
    fn date_defaults_to_today() {
        let html = render_fields();
        let form = must_get_form(&html);

        assert_form_input_with_value(&form, "date", "date", "2024-06-30");
    }

    #[test]
    fn amount_is_a_non_negative_number_with_cents() {
        let html = render_fields();
        let form = must_get_form(&html);

        assert_form_input(&form, "amount", "number");

        let amount = form
            .select(&Selector::parse("input[name=amount]").unwrap())
            .next()
            .expect("No amount input found");
        assert_eq!(amount.value().attr("min"), Some("0"));
        assert_eq!(amount.value().attr("step"), Some("0.01"));
    }

    #[test]
    fn category_offers_the_fixed_categories() {
        let html = render_fields();

        let options = html
            .select(&Selector::parse("select[name=category] option").unwrap())
            .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
            .collect::<Vec<_>>();

        assert_eq!(
            options,
            vec!["Food", "Transport", "Utilities", "Entertainment", "Other"]
        );
    }
}
