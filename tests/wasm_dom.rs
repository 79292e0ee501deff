#![cfg(target_arch = "wasm32")]

use dero_merchant_dashboard::page_controls;
use dero_merchant_dashboard::payments::{PaymentRow, table_rows};
use dero_merchant_dashboard::{clicked_page, render_page_controls, render_payment_rows};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window()
        .and_then(|window| window.document())
        .expect("document")
}

fn mount(tag: &str) -> Element {
    let document = document();
    let element = document.create_element(tag).expect("element");
    document
        .body()
        .expect("body")
        .append_child(&element)
        .expect("append");
    element
}

fn items(list: &Element) -> Vec<Element> {
    let nodes = list.query_selector_all("li.page-item").expect("items");
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

#[wasm_bindgen_test]
fn pagination_renders_bootstrap_items() {
    let list = mount("ul");
    render_page_controls(&document(), &list, &page_controls(5, 10)).expect("render");

    let items = items(&list);
    assert_eq!(items.len(), 11);

    let pages: Vec<Option<String>> = items
        .iter()
        .map(|item| item.get_attribute("data-page"))
        .collect();
    assert_eq!(pages[0].as_deref(), Some("4"));
    assert_eq!(pages[1].as_deref(), Some("1"));
    assert_eq!(pages[2], None);
    assert_eq!(pages[10].as_deref(), Some("6"));

    assert!(items[2].class_list().contains("disabled"));
    assert!(items[5].class_list().contains("active"));
    assert_eq!(items[5].text_content().as_deref(), Some("5"));
    assert_eq!(
        items
            .iter()
            .filter(|item| item.class_list().contains("active"))
            .count(),
        1
    );
}

fn link_of(item: &Element) -> Element {
    item.query_selector("a.page-link")
        .expect("query")
        .expect("page link")
}

#[wasm_bindgen_test]
fn clicks_on_controls_resolve_to_their_page() {
    let list = mount("ul");
    render_page_controls(&document(), &list, &page_controls(5, 10)).expect("render");
    let items = items(&list);

    let previous_icon = items[0]
        .query_selector("span")
        .expect("query")
        .expect("arrow span");
    assert_eq!(clicked_page(&previous_icon), Some(4));
    assert_eq!(clicked_page(&link_of(&items[1])), Some(1));
    assert_eq!(clicked_page(&link_of(&items[2])), None);
    assert_eq!(clicked_page(&link_of(&items[6])), Some(6));
    assert_eq!(clicked_page(&link_of(&items[9])), Some(10));
    assert_eq!(clicked_page(&link_of(&items[10])), Some(6));
    assert_eq!(clicked_page(&list), None);
}

#[wasm_bindgen_test]
fn rerendering_pagination_replaces_previous_items() {
    let list = mount("ul");
    render_page_controls(&document(), &list, &page_controls(5, 10)).expect("render");
    render_page_controls(&document(), &list, &[]).expect("render");

    assert!(items(&list).is_empty());
}

#[wasm_bindgen_test]
fn empty_payments_render_placeholder_row() {
    let table_body = mount("tbody");
    render_payment_rows(&document(), &table_body, &table_rows(&[])).expect("render");

    let rows = table_body.query_selector_all("tr").expect("rows");
    assert_eq!(rows.length(), 1);
    let cells = table_body.query_selector_all("td").expect("cells");
    assert_eq!(cells.length(), 10);
    assert_eq!(table_body.text_content().as_deref(), Some("----------"));
}

#[wasm_bindgen_test]
fn payment_cells_are_text_not_markup() {
    let table_body = mount("tbody");
    let row = PaymentRow {
        class_name: Some("table-success"),
        cells: vec!["<b>paid</b>".to_string()],
    };
    render_payment_rows(&document(), &table_body, &[row]).expect("render");

    let tr = table_body.query_selector("tr").expect("query").expect("row");
    assert_eq!(tr.class_name(), "table-success");
    assert!(table_body.query_selector("b").expect("query").is_none());
    assert_eq!(tr.text_content().as_deref(), Some("<b>paid</b>"));
}
