//! Property administration: the listing table, the create/edit modal, and
//! deletion.
//!
//! Saving is sequenced: numeric fields are parsed and the draft validated
//! before any request; the primary save patches the cached list from the
//! echoed entity; staged media uploads run afterwards in the background
//! and attach themselves with a follow-up PATCH. An upload failure never
//! rolls back the already-saved record.

use api::admin::properties::PropertyDraft;
use api::models::{Property, PropertyStatus};
use api::ApiClient;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ConfirmDialog, Input, Label, MediaManager, ModalOverlay, Select, Spinner, Textarea};
use ui::format::money;
use ui::staged::{staged_from_event, upload_staged};
use ui::{report_error, use_api, use_auth, use_collection, use_toast, AuthState, Collection, StagedFile, Toasts};

use super::AdminLayout;

#[component]
pub fn AdminProperties() -> Element {
    rsx! {
        AdminLayout { title: "Properties", return_to: "/admin/properties",
            PropertiesPanel {}
        }
    }
}

#[derive(Clone, PartialEq)]
enum Editor {
    Create,
    Edit(Property),
}

#[component]
fn PropertiesPanel() -> Element {
    let properties =
        use_collection(|client| async move { api::admin::properties::list(&client).await });
    let mut editing = use_signal(|| None::<Editor>);
    let mut deleting = use_signal(|| None::<Property>);

    let loading = *properties.loading.read();
    let error = properties.error.read().clone();
    let listing = properties.items.read().to_vec();

    rsx! {
        div { class: "admin-toolbar",
            Button {
                variant: ButtonVariant::Primary,
                onclick: move |_| editing.set(Some(Editor::Create)),
                "New property"
            }
        }
        if let Some(message) = error {
            div { class: "error-banner", "{message}" }
        }
        if loading {
            div { class: "loading-row", Spinner {} }
        } else if listing.is_empty() {
            p { class: "empty-note", "No properties yet. Create the first listing." }
        } else {
            table { class: "data-table",
                thead {
                    tr {
                        th { "Title" }
                        th { "Location" }
                        th { "Status" }
                        th { "Fractions" }
                        th { "Fraction price" }
                        th { "" }
                    }
                }
                tbody {
                    for property in listing {
                        {property_row(&property, editing, deleting)}
                    }
                }
            }
        }
        if let Some(target) = editing() {
            PropertyForm {
                target,
                properties,
                on_close: move |_| editing.set(None),
            }
        }
        if let Some(property) = deleting() {
            DeletePropertyDialog {
                property,
                properties,
                on_close: move |_| deleting.set(None),
            }
        }
    }
}

fn property_row(
    property: &Property,
    mut editing: Signal<Option<Editor>>,
    mut deleting: Signal<Option<Property>>,
) -> Element {
    let status = property.status.label();
    let slug = property.status.as_str().to_lowercase();
    let fractions = format!("{}/{}", property.fractions_sold, property.total_fractions);
    let price = money(property.fraction_price);
    let edit_target = property.clone();
    let delete_target = property.clone();

    rsx! {
        tr { key: "{property.id}",
            td { "{property.title}" }
            td { "{property.location}" }
            td {
                span { class: "status-chip status-{slug}", "{status}" }
            }
            td { "{fractions}" }
            td { "{price}" }
            td { class: "row-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| editing.set(Some(Editor::Edit(edit_target.clone()))),
                    "Edit"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    onclick: move |_| deleting.set(Some(delete_target.clone())),
                    "Delete"
                }
            }
        }
    }
}

#[component]
fn PropertyForm(
    target: Editor,
    properties: Collection<Property>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut properties = properties;

    let existing = match &target {
        Editor::Edit(property) => Some(property.clone()),
        Editor::Create => None,
    };
    let seed = existing
        .as_ref()
        .map(PropertyDraft::from_property)
        .unwrap_or_default();

    let mut title = use_signal({
        let v = seed.title.clone();
        move || v
    });
    let mut location = use_signal({
        let v = seed.location.clone();
        move || v
    });
    let mut description = use_signal({
        let v = seed.description.clone();
        move || v
    });
    let mut status = use_signal({
        let v = seed.status;
        move || v
    });
    let mut fractional = use_signal({
        let v = seed.is_fractional;
        move || v
    });
    let mut bedrooms = use_signal({
        let v = seed_count(seed.bedrooms);
        move || v
    });
    let mut bathrooms = use_signal({
        let v = seed_amount(seed.bathrooms);
        move || v
    });
    let mut area_sqft = use_signal({
        let v = seed_amount(seed.area_sqft);
        move || v
    });
    let mut expected_roi = use_signal({
        let v = seed_amount(seed.expected_roi);
        move || v
    });
    let mut total_fractions = use_signal({
        let v = seed_count(seed.total_fractions);
        move || v
    });
    let mut fraction_price = use_signal({
        let v = seed_amount(seed.fraction_price);
        move || v
    });
    let mut project_value = use_signal({
        let v = seed_amount(seed.project_value);
        move || v
    });
    let kept_media = use_signal({
        let v = seed.media.clone();
        move || v
    });
    let mut staged = use_signal(Vec::<StagedFile>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let handle_files = move |evt: FormEvent| {
        spawn(async move {
            let mut picked = staged_from_event(&evt).await;
            staged.write().append(&mut picked);
        });
    };

    let save_existing = existing.clone();
    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let existing = save_existing.clone();
        spawn(async move {
            let draft = match build_draft(FormValues {
                title: title.peek().clone(),
                location: location.peek().clone(),
                description: description.peek().clone(),
                status: *status.peek(),
                is_fractional: *fractional.peek(),
                bedrooms: bedrooms.peek().clone(),
                bathrooms: bathrooms.peek().clone(),
                area_sqft: area_sqft.peek().clone(),
                expected_roi: expected_roi.peek().clone(),
                total_fractions: total_fractions.peek().clone(),
                fraction_price: fraction_price.peek().clone(),
                project_value: project_value.peek().clone(),
                media: kept_media.peek().clone(),
            }) {
                Ok(draft) => draft,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            if let Some(message) = api::admin::properties::validate_draft(&draft) {
                error.set(Some(message));
                return;
            }

            error.set(None);
            saving.set(true);
            let result = match &existing {
                Some(property) => {
                    api::admin::properties::update(&client, &property.id, &draft).await
                }
                None => api::admin::properties::create(&client, &draft).await,
            };
            match result {
                Ok(echoed) => {
                    let saved_id = echoed
                        .as_ref()
                        .map(|p| p.id.clone())
                        .or_else(|| existing.as_ref().map(|p| p.id.clone()));
                    match echoed {
                        Some(property) => {
                            properties.upsert(property);
                        }
                        None => properties.reload(),
                    }
                    toasts.success(if existing.is_some() {
                        "Property updated."
                    } else {
                        "Property created."
                    });

                    let files = staged.peek().clone();
                    if !files.is_empty() {
                        match saved_id {
                            Some(id) => {
                                // Outlives the closing modal on purpose.
                                spawn_forever(attach_media(
                                    client,
                                    auth,
                                    toasts,
                                    properties,
                                    id,
                                    draft.media.clone(),
                                    files,
                                ));
                            }
                            None => toasts.warning(
                                "Saved, but media could not be attached; edit the property to retry.",
                            ),
                        }
                    }
                    on_close.call(());
                }
                Err(err) => {
                    saving.set(false);
                    error.set(Some(report_error(err, auth)));
                }
            }
        });
    };

    let heading = if existing.is_some() {
        "Edit property"
    } else {
        "New property"
    };
    let status_value = status().as_str();

    rsx! {
        ModalOverlay { title: heading, on_close: move |_| on_close.call(()),
            form { class: "admin-form", onsubmit: handle_save,
                if let Some(message) = error() {
                    div { class: "error-banner", "{message}" }
                }

                Label { html_for: "title", "Title" }
                Input {
                    id: "title",
                    value: title(),
                    oninput: move |evt: FormEvent| title.set(evt.value()),
                }
                Label { html_for: "location", "Location" }
                Input {
                    id: "location",
                    value: location(),
                    oninput: move |evt: FormEvent| location.set(evt.value()),
                }
                Label { html_for: "description", "Description" }
                Textarea {
                    id: "description",
                    value: description(),
                    oninput: move |evt: FormEvent| description.set(evt.value()),
                }

                div { class: "form-row",
                    div { class: "form-field",
                        Label { html_for: "status", "Status" }
                        Select {
                            id: "status",
                            value: status_value,
                            onchange: move |evt: FormEvent| {
                                status.set(if evt.value() == "SOLD" {
                                    PropertyStatus::Sold
                                } else {
                                    PropertyStatus::Available
                                });
                            },
                            option { value: "AVAILABLE", "Available" }
                            option { value: "SOLD", "Sold" }
                        }
                    }
                    label { class: "check-field",
                        input {
                            r#type: "checkbox",
                            checked: fractional(),
                            onchange: move |evt: FormEvent| fractional.set(evt.checked()),
                        }
                        "Sold in fractions"
                    }
                }

                div { class: "form-row",
                    div { class: "form-field",
                        Label { html_for: "bedrooms", "Bedrooms" }
                        Input {
                            id: "bedrooms",
                            value: bedrooms(),
                            oninput: move |evt: FormEvent| bedrooms.set(evt.value()),
                        }
                    }
                    div { class: "form-field",
                        Label { html_for: "bathrooms", "Bathrooms" }
                        Input {
                            id: "bathrooms",
                            value: bathrooms(),
                            oninput: move |evt: FormEvent| bathrooms.set(evt.value()),
                        }
                    }
                    div { class: "form-field",
                        Label { html_for: "area", "Area (sqft)" }
                        Input {
                            id: "area",
                            value: area_sqft(),
                            oninput: move |evt: FormEvent| area_sqft.set(evt.value()),
                        }
                    }
                    div { class: "form-field",
                        Label { html_for: "roi", "Expected ROI (%)" }
                        Input {
                            id: "roi",
                            value: expected_roi(),
                            oninput: move |evt: FormEvent| expected_roi.set(evt.value()),
                        }
                    }
                }

                div { class: "form-row",
                    div { class: "form-field",
                        Label { html_for: "fractions", "Total fractions" }
                        Input {
                            id: "fractions",
                            value: total_fractions(),
                            oninput: move |evt: FormEvent| total_fractions.set(evt.value()),
                        }
                    }
                    div { class: "form-field",
                        Label { html_for: "fraction-price", "Fraction price" }
                        Input {
                            id: "fraction-price",
                            value: fraction_price(),
                            oninput: move |evt: FormEvent| fraction_price.set(evt.value()),
                        }
                    }
                    div { class: "form-field",
                        Label { html_for: "project-value", "Project value" }
                        Input {
                            id: "project-value",
                            value: project_value(),
                            oninput: move |evt: FormEvent| project_value.set(evt.value()),
                        }
                    }
                }

                Label { "Media" }
                MediaManager { kept: kept_media, staged, on_pick: handle_files }

                div { class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save property" }
                    }
                }
            }
        }
    }
}

/// Background continuation of a save: upload staged files, then attach
/// whatever stored successfully to the entity.
async fn attach_media(
    client: ApiClient,
    auth: Signal<AuthState>,
    mut toasts: Toasts,
    mut properties: Collection<Property>,
    id: String,
    mut media: Vec<String>,
    files: Vec<StagedFile>,
) {
    let (stored, failed) = upload_staged(&client, &files).await;
    for file in &files {
        file.revoke_preview();
    }
    if !failed.is_empty() {
        toasts.warning_with_detail("Some media could not be uploaded.", failed.join(", "));
    }
    if stored.is_empty() {
        return;
    }
    media.extend(stored);
    match api::admin::properties::set_media(&client, &id, &media).await {
        Ok(Some(property)) => {
            properties.upsert(property);
        }
        Ok(None) => properties.reload(),
        Err(err) => toasts.warning(report_error(err, auth)),
    }
}

#[component]
fn DeletePropertyDialog(
    property: Property,
    properties: Collection<Property>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut properties = properties;
    let mut busy = use_signal(|| false);

    let id = property.id.clone();
    let handle_confirm = move |_| {
        let client = client.clone();
        let id = id.clone();
        spawn(async move {
            busy.set(true);
            match api::admin::properties::delete(&client, &id).await {
                Ok(()) => {
                    properties.remove(&id);
                    toasts.success("Property deleted.");
                    on_close.call(());
                }
                Err(err) => {
                    busy.set(false);
                    toasts.error(report_error(err, auth));
                }
            }
        });
    };

    let message = format!("Delete \"{}\"? This cannot be undone.", property.title);
    rsx! {
        ConfirmDialog {
            title: "Delete property",
            message,
            confirm_label: "Delete",
            busy: busy(),
            on_confirm: handle_confirm,
            on_cancel: move |_| on_close.call(()),
        }
    }
}

struct FormValues {
    title: String,
    location: String,
    description: String,
    status: PropertyStatus,
    is_fractional: bool,
    bedrooms: String,
    bathrooms: String,
    area_sqft: String,
    expected_roi: String,
    total_fractions: String,
    fraction_price: String,
    project_value: String,
    media: Vec<String>,
}

/// Turns raw form text into a draft; the first bad numeric field aborts
/// with a message naming it.
fn build_draft(values: FormValues) -> Result<PropertyDraft, String> {
    Ok(PropertyDraft {
        title: values.title.trim().to_string(),
        location: values.location.trim().to_string(),
        description: values.description.trim().to_string(),
        status: values.status,
        bedrooms: parse_count("Bedrooms", &values.bedrooms)?,
        bathrooms: parse_amount("Bathrooms", &values.bathrooms)?,
        area_sqft: parse_amount("Area", &values.area_sqft)?,
        expected_roi: parse_amount("Expected ROI", &values.expected_roi)?,
        is_fractional: values.is_fractional,
        total_fractions: parse_count("Total fractions", &values.total_fractions)?,
        fraction_price: parse_amount("Fraction price", &values.fraction_price)?,
        project_value: parse_amount("Project value", &values.project_value)?,
        media: values.media,
    })
}

fn parse_count(label: &str, value: &str) -> Result<u32, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| format!("{label} must be a whole number"))
}

fn parse_amount(label: &str, value: &str) -> Result<f64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => Ok(parsed),
        _ => Err(format!("{label} must be a non-negative number")),
    }
}

fn seed_count(value: u32) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

fn seed_amount(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> FormValues {
        FormValues {
            title: "Palm Court".into(),
            location: "Lekki".into(),
            description: String::new(),
            status: PropertyStatus::Available,
            is_fractional: true,
            bedrooms: "3".into(),
            bathrooms: "2.5".into(),
            area_sqft: "1400".into(),
            expected_roi: "12.5".into(),
            total_fractions: "100".into(),
            fraction_price: "250000".into(),
            project_value: "25000000".into(),
            media: vec!["k1".into()],
        }
    }

    #[test]
    fn form_text_parses_into_a_draft() {
        let draft = build_draft(values()).unwrap();
        assert_eq!(draft.bedrooms, 3);
        assert_eq!(draft.bathrooms, 2.5);
        assert_eq!(draft.total_fractions, 100);
        assert_eq!(draft.media, vec!["k1".to_string()]);
    }

    #[test]
    fn bad_numeric_input_names_the_field() {
        let mut bad = values();
        bad.total_fractions = "a hundred".into();
        assert_eq!(
            build_draft(bad).unwrap_err(),
            "Total fractions must be a whole number"
        );

        let mut negative = values();
        negative.fraction_price = "-5".into();
        assert_eq!(
            build_draft(negative).unwrap_err(),
            "Fraction price must be a non-negative number"
        );
    }

    #[test]
    fn empty_numeric_fields_default_to_zero() {
        let mut sparse = values();
        sparse.bedrooms = String::new();
        sparse.bathrooms = "  ".into();
        let draft = build_draft(sparse).unwrap();
        assert_eq!(draft.bedrooms, 0);
        assert_eq!(draft.bathrooms, 0.0);
    }
}
