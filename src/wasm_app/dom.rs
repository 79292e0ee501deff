use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement};

use crate::auth::PasswordAuth;
use crate::constants::PASSWORD_PROMPT;
use crate::forms::Alert;

const HIDDEN_CLASS: &str = "d-none";

pub(crate) fn window() -> web_sys::Window {
    web_sys::window().expect("window")
}

pub(crate) fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub(crate) fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub(crate) fn query_input(document: &Document, selector: &str) -> Option<HtmlInputElement> {
    query(document, selector).and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let mut elements = Vec::new();
    if let Ok(nodes) = document.query_selector_all(selector) {
        for index in 0..nodes.length() {
            if let Some(element) = nodes
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            {
                elements.push(element);
            }
        }
    }
    elements
}

pub(crate) fn meta_content(document: &Document, name: &str) -> Option<String> {
    query(document, &format!("meta[name=\"{}\"]", name))?.get_attribute("content")
}

pub(crate) fn listen<F>(target: &EventTarget, event_name: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let handler = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let _ = target.add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref());
    handler.forget();
}

pub(crate) fn named_input(form: &Element, name: &str) -> Option<HtmlInputElement> {
    query_in(form, &format!("[name=\"{}\"]", name))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

pub(crate) fn input_value(form: &Element, name: &str) -> String {
    named_input(form, name)
        .map(|input| input.value())
        .unwrap_or_default()
}

pub(crate) fn set_input_value(form: &Element, name: &str, value: &str) {
    if let Some(input) = named_input(form, name) {
        input.set_value(value);
    }
}

pub(crate) fn show(element: &Element) {
    let _ = element.class_list().remove_1(HIDDEN_CLASS);
}

pub(crate) fn hide(element: &Element) {
    let _ = element.class_list().add_1(HIDDEN_CLASS);
}

pub(crate) fn show_alert(element: &Element, alert: &Alert) {
    element.set_text_content(Some(&alert.message));
    let classes = element.class_list();
    let _ = classes.remove_2("alert-success", "alert-danger");
    let _ = classes.add_1(alert.tone.alert_class());
    show(element);
}

pub(crate) fn prompt_password() -> Option<PasswordAuth> {
    let input = window()
        .prompt_with_message(PASSWORD_PROMPT)
        .ok()
        .flatten();
    PasswordAuth::from_prompt(input)
}

pub(crate) fn js_error_message(err: JsValue, fallback: &str) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    if let Ok(error) = err.dyn_into::<js_sys::Error>() {
        return error.message().into();
    }
    fallback.to_string()
}

pub(crate) async fn write_to_clipboard(text: &str) -> Result<bool, JsValue> {
    let window = window();
    let navigator = window.navigator();
    let has_clipboard =
        Reflect::has(&navigator, &JsValue::from_str("clipboard")).unwrap_or(false);
    if has_clipboard {
        let promise = navigator.clipboard().write_text(text);
        if JsFuture::from(promise).await.is_ok() {
            return Ok(true);
        }
    }

    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document body unavailable"))?;
    let textarea = document
        .create_element("textarea")?
        .dyn_into::<web_sys::HtmlTextAreaElement>()?;
    textarea.set_value(text);
    textarea.set_attribute("readonly", "")?;
    textarea.style().set_property("position", "absolute")?;
    textarea.style().set_property("left", "-9999px")?;
    body.append_child(&textarea)?;
    textarea.select();

    let exec = Reflect::get(document.as_ref(), &JsValue::from_str("execCommand"))?;
    let success = if exec.is_function() {
        let func: Function = exec.dyn_into()?;
        let result = func.call1(document.as_ref(), &JsValue::from_str("copy"))?;
        result.as_bool().unwrap_or(false)
    } else {
        false
    };
    textarea.remove();
    Ok(success)
}
