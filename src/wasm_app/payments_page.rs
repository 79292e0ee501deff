use std::rc::Rc;

use tracing::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlSelectElement};

use crate::forms::{load_payments, PaymentsOutcome};
use crate::pagination::PageControl;
use crate::payments::{table_rows, PaymentRow, PaymentsQuery, RequestSequence};

use super::dom::{hide, listen, query, query_input, show};
use super::Client;

struct PaymentsPanel {
    document: Document,
    client: Rc<Client>,
    store_id: String,
    table_body: Element,
    pagination: Element,
    alert: Option<Element>,
    sequence: RequestSequence,
}

impl PaymentsPanel {
    fn read_query(&self, page: Option<u32>) -> PaymentsQuery {
        let limit = query_input(&self.document, "#limit-form #limit")
            .map(|input| input.value())
            .unwrap_or_default();
        let sort = selected_value(&self.document, "#sort-by-form select");
        let status = selected_value(&self.document, "#filter-status-form select");
        let currency = query_input(&self.document, "#filter-currency-form #currency")
            .map(|input| input.value())
            .unwrap_or_default();
        PaymentsQuery::from_controls(&limit, &sort, &status, &currency, page)
    }

    fn apply(&self, outcome: PaymentsOutcome) -> Result<(), JsValue> {
        match outcome {
            PaymentsOutcome::Loaded { payments, controls } => {
                render_payment_rows(&self.document, &self.table_body, &table_rows(&payments))?;
                render_page_controls(&self.document, &self.pagination, &controls)?;
            }
            PaymentsOutcome::Rejected { message } => {
                render_payment_rows(
                    &self.document,
                    &self.table_body,
                    &[PaymentRow::placeholder()],
                )?;
                render_page_controls(&self.document, &self.pagination, &[])?;
                self.show_error(&message);
            }
            PaymentsOutcome::Failed { message } => self.show_error(&message),
        }
        Ok(())
    }

    fn show_error(&self, message: &str) {
        if let Some(alert) = &self.alert {
            alert.set_text_content(Some(message));
            show(alert);
        }
    }
}

fn selected_value(document: &Document, selector: &str) -> String {
    query(document, selector)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
        .unwrap_or_default()
}

fn reload(panel: &Rc<PaymentsPanel>, page: Option<u32>) {
    let panel = Rc::clone(panel);
    spawn_local(async move {
        let query = panel.read_query(page);
        let ticket = panel.sequence.begin();
        if let Some(alert) = &panel.alert {
            hide(alert);
        }

        let outcome = load_payments(&panel.client, &panel.store_id, &query).await;

        if !panel.sequence.is_current(ticket) {
            debug!(page = query.page, "discarding stale payments response");
            return;
        }
        if let Err(err) = panel.apply(outcome) {
            error!(?err, "failed to render payments");
        }
    });
}

pub(crate) fn bind(document: &Document, client: &Rc<Client>, store_id: &str) {
    let (Some(table_body), Some(pagination)) = (
        query(document, "table tbody"),
        query(document, "ul.pagination"),
    ) else {
        debug!("no payments table on this page");
        return;
    };

    let panel = Rc::new(PaymentsPanel {
        document: document.clone(),
        client: Rc::clone(client),
        store_id: store_id.to_string(),
        table_body,
        pagination,
        alert: query(document, "div.alert"),
        sequence: RequestSequence::default(),
    });

    for (selector, event_name) in [
        ("#limit-form", "input"),
        ("#sort-by-form", "change"),
        ("#filter-status-form", "change"),
        ("#filter-currency-form", "input"),
    ] {
        let Some(form) = query(document, selector) else {
            continue;
        };
        listen(&form, "submit", |event| event.prevent_default());
        let target = Rc::clone(&panel);
        listen(&form, event_name, move |event| {
            event.prevent_default();
            reload(&target, None);
        });
    }

    let target = Rc::clone(&panel);
    listen(&panel.pagination, "click", move |event| {
        let Some(clicked) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        else {
            return;
        };
        event.prevent_default();
        if let Some(page) = clicked_page(&clicked) {
            reload(&target, Some(page));
        }
    });

    reload(&panel, None);
}

pub fn clicked_page(target: &Element) -> Option<u32> {
    target
        .closest("li.page-item")
        .ok()
        .flatten()?
        .get_attribute("data-page")?
        .parse::<u32>()
        .ok()
}

pub fn render_payment_rows(
    document: &Document,
    table_body: &Element,
    rows: &[PaymentRow],
) -> Result<(), JsValue> {
    let fragment = document.create_document_fragment();
    for row in rows {
        let tr = document.create_element("tr")?;
        if let Some(class_name) = row.class_name {
            tr.set_class_name(class_name);
        }
        for cell in &row.cells {
            let td = document.create_element("td")?;
            td.set_text_content(Some(cell));
            tr.append_child(&td)?;
        }
        fragment.append_child(&tr)?;
    }
    table_body.set_inner_html("");
    table_body.append_child(&fragment)?;
    Ok(())
}

pub fn render_page_controls(
    document: &Document,
    list: &Element,
    controls: &[PageControl],
) -> Result<(), JsValue> {
    list.set_inner_html("");
    for control in controls {
        let item = document.create_element("li")?;
        item.set_class_name("page-item");
        let link = document.create_element("a")?;
        link.set_class_name("page-link");
        link.set_attribute("href", "#")?;

        match control {
            PageControl::Previous { .. } | PageControl::Next { .. } => {
                let (arrow, label) = match control {
                    PageControl::Previous { .. } => ("\u{ab}", "Previous"),
                    _ => ("\u{bb}", "Next"),
                };
                link.set_attribute("aria-label", label)?;
                let icon = document.create_element("span")?;
                icon.set_attribute("aria-hidden", "true")?;
                icon.set_text_content(Some(arrow));
                let text = document.create_element("span")?;
                text.set_class_name("sr-only");
                text.set_text_content(Some(label));
                link.append_child(&icon)?;
                link.append_child(&text)?;
            }
            PageControl::Ellipsis => {
                item.class_list().add_1("disabled")?;
                link.class_list().add_1("font-weight-bold")?;
                link.set_text_content(Some(&control.label()));
            }
            PageControl::Page { .. } => link.set_text_content(Some(&control.label())),
        }

        if let Some(page) = control.target() {
            item.set_attribute("data-page", &page.to_string())?;
        }
        if control.is_active() {
            item.class_list().add_1("active")?;
        }
        item.append_child(&link)?;
        list.append_child(&item)?;
    }
    Ok(())
}
