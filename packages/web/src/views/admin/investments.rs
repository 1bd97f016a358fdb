//! Investment administration: the holdings table plus the two adjustment
//! dialogs (revaluation and fraction reduction). Invalid input stays
//! inline and never produces a request.

use api::models::Investment;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input, Label, ModalOverlay, Spinner};
use ui::format::{money, percent};
use ui::{report_error, use_api, use_auth, use_collection, use_toast, Collection};

use super::AdminLayout;

#[component]
pub fn AdminInvestments() -> Element {
    rsx! {
        AdminLayout { title: "Investments", return_to: "/admin/investments",
            InvestmentsPanel {}
        }
    }
}

#[component]
fn InvestmentsPanel() -> Element {
    let investments =
        use_collection(|client| async move { api::admin::investments::list(&client).await });
    let mut valuing = use_signal(|| None::<Investment>);
    let mut reducing = use_signal(|| None::<Investment>);

    let loading = *investments.loading.read();
    let error = investments.error.read().clone();
    let holdings = investments.items.read().to_vec();

    rsx! {
        if let Some(message) = error {
            div { class: "error-banner", "{message}" }
        }
        if loading {
            div { class: "loading-row", Spinner {} }
        } else if holdings.is_empty() {
            p { class: "empty-note", "No investments recorded yet." }
        } else {
            table { class: "data-table",
                thead {
                    tr {
                        th { "Property" }
                        th { "Investor" }
                        th { "Fractions" }
                        th { "Initial value" }
                        th { "Current value" }
                        th { "Growth" }
                        th { "" }
                    }
                }
                tbody {
                    for investment in holdings {
                        {investment_row(&investment, valuing, reducing)}
                    }
                }
            }
        }
        if let Some(investment) = valuing() {
            ValuationDialog {
                investment,
                investments,
                on_close: move |_| valuing.set(None),
            }
        }
        if let Some(investment) = reducing() {
            ReduceFractionsDialog {
                investment,
                investments,
                on_close: move |_| reducing.set(None),
            }
        }
    }
}

fn investment_row(
    investment: &Investment,
    mut valuing: Signal<Option<Investment>>,
    mut reducing: Signal<Option<Investment>>,
) -> Element {
    let property = investment
        .property_title
        .clone()
        .unwrap_or_else(|| "(unknown property)".to_string());
    let investor = investment
        .investor_email
        .clone()
        .unwrap_or_else(|| "-".to_string());
    let growth_class = if investment.is_growing() {
        "growth-up"
    } else if investment.growth_amount < 0.0 {
        "growth-down"
    } else {
        "growth-flat"
    };
    let growth = percent(investment.growth_percentage);
    let value_target = investment.clone();
    let reduce_target = investment.clone();

    rsx! {
        tr { key: "{investment.id}",
            td { "{property}" }
            td { "{investor}" }
            td { "{investment.fractions_owned}" }
            td { "{money(investment.initial_value)}" }
            td { "{money(investment.current_value)}" }
            td {
                span { class: "{growth_class}", "{growth}" }
            }
            td { class: "row-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| valuing.set(Some(value_target.clone())),
                    "Revalue"
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| reducing.set(Some(reduce_target.clone())),
                    "Adjust fractions"
                }
            }
        }
    }
}

#[component]
fn ValuationDialog(
    investment: Investment,
    investments: Collection<Investment>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut investments = investments;

    let mut amount = use_signal({
        let v = investment.current_value.to_string();
        move || v
    });
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let id = investment.id.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let id = id.clone();
        spawn(async move {
            let value = match api::admin::investments::validate_valuation(&amount.peek()) {
                Ok(value) => value,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            error.set(None);
            busy.set(true);
            match api::admin::investments::set_valuation(&client, &id, value).await {
                Ok(Some(updated)) => {
                    investments.upsert(updated);
                    toasts.success("Valuation updated.");
                    on_close.call(());
                }
                Ok(None) => {
                    investments.reload();
                    toasts.success("Valuation updated.");
                    on_close.call(());
                }
                Err(err) => {
                    busy.set(false);
                    error.set(Some(report_error(err, auth)));
                }
            }
        });
    };

    let holding = investment
        .property_title
        .clone()
        .unwrap_or_else(|| "this holding".to_string());
    rsx! {
        ModalOverlay { title: "Update valuation", on_close: move |_| on_close.call(()),
            form { class: "dialog-form", onsubmit: handle_submit,
                p { class: "dialog-context",
                    "Current value of {holding}: {money(investment.current_value)}"
                }
                Label { html_for: "valuation", "New value" }
                Input {
                    id: "valuation",
                    value: amount(),
                    oninput: move |evt: FormEvent| amount.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "field-error", "{message}" }
                }
                div { class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: busy(),
                        if busy() { "Saving..." } else { "Save valuation" }
                    }
                }
            }
        }
    }
}

#[component]
fn ReduceFractionsDialog(
    investment: Investment,
    investments: Collection<Investment>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut investments = investments;

    let mut amount = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let id = investment.id.clone();
    let owned = investment.fractions_owned;
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let id = id.clone();
        spawn(async move {
            let reduce_by =
                match api::admin::investments::validate_fraction_reduction(&amount.peek(), owned) {
                    Ok(amount) => amount,
                    Err(message) => {
                        error.set(Some(message));
                        return;
                    }
                };
            error.set(None);
            busy.set(true);
            match api::admin::investments::reduce_fractions(&client, &id, reduce_by).await {
                Ok(Some(updated)) => {
                    investments.upsert(updated);
                    toasts.success("Fractions reduced.");
                    on_close.call(());
                }
                Ok(None) => {
                    investments.reload();
                    toasts.success("Fractions reduced.");
                    on_close.call(());
                }
                Err(err) => {
                    busy.set(false);
                    error.set(Some(report_error(err, auth)));
                }
            }
        });
    };

    rsx! {
        ModalOverlay { title: "Reduce fractions", on_close: move |_| on_close.call(()),
            form { class: "dialog-form", onsubmit: handle_submit,
                p { class: "dialog-context",
                    "This holding currently has {owned} fractions."
                }
                Label { html_for: "reduce-by", "Reduce by" }
                Input {
                    id: "reduce-by",
                    value: amount(),
                    oninput: move |evt: FormEvent| amount.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "field-error", "{message}" }
                }
                div { class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        r#type: "submit",
                        disabled: busy(),
                        if busy() { "Reducing..." } else { "Reduce" }
                    }
                }
            }
        }
    }
}
