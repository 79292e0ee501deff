use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlInputElement, MessageEvent, WebSocket};

use crate::config::PageConfig;
use crate::constants::{COPY_FEEDBACK_MS, COUNTDOWN_TICK_MS};
use crate::models::PaymentStatus;
use crate::qr::qr_svg;
use crate::status::{Countdown, CountdownTick, PaymentTracker};

use super::dom::{hide, js_error_message, listen, query, query_all, write_to_clipboard};

#[derive(Default)]
struct PayState {
    tracker: PaymentTracker,
    countdown_timer: Option<Interval>,
    socket: Option<WebSocket>,
    copy_reset_timers: HashMap<u32, Timeout>,
    next_copy_id: u32,
}

pub(crate) fn bind(document: &Document, config: &PageConfig) {
    let state_rc = Rc::new(RefCell::new(PayState {
        next_copy_id: 1,
        ..PayState::default()
    }));

    render_qr_code(document);
    bind_copy_buttons(document, &state_rc);
    start_countdown(document, &state_rc);

    if let Some(url) = config.payment_status_url() {
        open_status_socket(document, &state_rc, &url);
    }
}

fn render_qr_code(document: &Document) {
    let (Some(target), Some(address)) = (query(document, "#qrcode"), query(document, "#iaddr"))
    else {
        return;
    };
    let address = address.text_content().unwrap_or_default();
    if let Some(svg) = qr_svg(&address) {
        target.set_inner_html(&svg);
    }
}

fn bind_copy_buttons(document: &Document, state_rc: &Rc<RefCell<PayState>>) {
    for button in query_all(document, ".btn-copy") {
        let state_clone = state_rc.clone();
        let document = document.clone();
        let target = button.clone();
        listen(&button, "click", move |event: Event| {
            event.prevent_default();
            handle_copy_button(state_clone.clone(), &document, target.clone());
        });
    }
}

fn clipboard_text(document: &Document, button: &Element) -> Option<String> {
    if let Some(text) = button.get_attribute("data-clipboard-text") {
        return Some(text);
    }
    let selector = button.get_attribute("data-clipboard-target")?;
    let source = query(document, &selector)?;
    match source.dyn_ref::<HtmlInputElement>() {
        Some(input) => Some(input.value()),
        None => source.text_content(),
    }
}

fn ensure_copy_id(state: &mut PayState, button: &Element) -> u32 {
    if let Some(value) = button.get_attribute("data-copy-id") {
        if let Ok(parsed) = value.parse::<u32>() {
            return parsed;
        }
    }
    let id = state.next_copy_id;
    state.next_copy_id += 1;
    let _ = button.set_attribute("data-copy-id", &id.to_string());
    id
}

fn handle_copy_button(state_rc: Rc<RefCell<PayState>>, document: &Document, button: Element) {
    let value = match clipboard_text(document, &button) {
        Some(value) if !value.is_empty() => value,
        _ => return,
    };

    let id = ensure_copy_id(&mut state_rc.borrow_mut(), &button);
    // A pending reset means the label currently shows feedback, not the original.
    let original = match button.get_attribute("data-copy-label") {
        Some(label) => label,
        None => {
            let label = button.inner_html();
            let _ = button.set_attribute("data-copy-label", &label);
            label
        }
    };

    spawn_local(async move {
        let copied = write_to_clipboard(&value).await.unwrap_or_else(|err| {
            warn!(error = %js_error_message(err, "clipboard unavailable"), "copy failed");
            false
        });
        button.set_text_content(Some(if copied { "Copied!" } else { "Copy failed" }));

        let mut state = state_rc.borrow_mut();
        state.copy_reset_timers.remove(&id);
        let state_clone = state_rc.clone();
        let button_clone = button.clone();
        let timer = Timeout::new(COPY_FEEDBACK_MS, move || {
            button_clone.set_inner_html(&original);
            if let Ok(mut state) = state_clone.try_borrow_mut() {
                state.copy_reset_timers.remove(&id);
            }
        });
        state.copy_reset_timers.insert(id, timer);
    });
}

fn start_countdown(document: &Document, state_rc: &Rc<RefCell<PayState>>) {
    let Some(element) = query(document, "#minutes-left") else {
        return;
    };
    let countdown = element.text_content().as_deref().and_then(Countdown::parse);
    let tracker = PaymentTracker::new(countdown);
    state_rc.borrow_mut().tracker = tracker;
    if !tracker.is_counting_down() {
        debug!("payment countdown not running");
        return;
    }

    let state_clone = state_rc.clone();
    let timer = Interval::new(COUNTDOWN_TICK_MS, move || {
        let stopped_timer = {
            let mut state = state_clone.borrow_mut();
            match state.tracker.tick() {
                Some(CountdownTick::Remaining(minutes)) => {
                    element.set_text_content(Some(&minutes.to_string()));
                    None
                }
                Some(CountdownTick::Finished) => {
                    element.set_text_content(Some("0"));
                    state.countdown_timer.take()
                }
                None => state.countdown_timer.take(),
            }
        };
        drop(stopped_timer);
    });
    state_rc.borrow_mut().countdown_timer = Some(timer);
}

fn open_status_socket(document: &Document, state_rc: &Rc<RefCell<PayState>>, url: &str) {
    let socket = match WebSocket::new(url) {
        Ok(socket) => socket,
        Err(err) => {
            warn!(error = %js_error_message(err, "WebSocket unavailable"), "status socket failed");
            return;
        }
    };

    let onmessage_state = state_rc.clone();
    let document = document.clone();
    let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
        let Some(message) = event.data().as_string() else {
            return;
        };
        let (status, finished_timer, socket) = {
            let mut state = onmessage_state.borrow_mut();
            let Some(status) = state.tracker.on_message(&message) else {
                return;
            };
            (status, state.countdown_timer.take(), state.socket.take())
        };
        drop(finished_timer);
        info!(status = status.as_str(), "payment settled");
        show_settled_status(&document, status);
        if let Some(socket) = socket {
            let _ = socket.close();
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    socket.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();

    let onerror = Closure::wrap(Box::new(move |_: Event| {
        warn!("payment status socket error");
    }) as Box<dyn FnMut(Event)>);
    socket.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    let onclose_state = state_rc.clone();
    let onclose = Closure::wrap(Box::new(move |_: Event| {
        if !onclose_state.borrow().tracker.is_settled() {
            warn!("payment status socket closed before a final status");
        }
    }) as Box<dyn FnMut(Event)>);
    socket.set_onclose(Some(onclose.as_ref().unchecked_ref()));
    onclose.forget();

    state_rc.borrow_mut().socket = Some(socket);
}

fn show_settled_status(document: &Document, status: PaymentStatus) {
    if let Some(element) = query(document, "#status") {
        element.set_text_content(Some(status.as_str()));
        element.set_class_name(&format!(
            "text-capitalize font-weight-bold {}",
            status.text_class()
        ));
    }
    if let Some(element) = query(document, ".toast .toast-header small") {
        hide(&element);
    }
    if let Some(toast) = query(document, ".toast") {
        let _ = toast.class_list().add_1("blurred");
    }
}
