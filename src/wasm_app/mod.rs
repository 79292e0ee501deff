use std::rc::Rc;

use tracing::{debug, info};
use wasm_bindgen::prelude::*;

use crate::api::DashboardClient;
use crate::config::PageConfig;

mod account_page;
mod dom;
mod fetch;
mod pay_page;
mod payments_page;
mod store_page;

pub use self::payments_page::{clicked_page, render_page_controls, render_payment_rows};

use self::dom::{meta_content, window};
use self::fetch::FetchTransport;

pub(crate) type Client = DashboardClient<FetchTransport>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let window = window();
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let origin = window.location().origin()?;
    let config = PageConfig::from_lookup(&origin, |name| meta_content(&document, name));
    info!(origin = %config.origin, "dashboard client starting");

    let client = Rc::new(DashboardClient::new(FetchTransport::new(config.origin.clone())));

    account_page::bind(&document, &client);
    match config.store_id.as_deref() {
        Some(store_id) => {
            store_page::bind(&document, &client, store_id);
            payments_page::bind(&document, &client, store_id);
        }
        None => debug!("no store id on this page"),
    }
    pay_page::bind(&document, &config);

    Ok(())
}
