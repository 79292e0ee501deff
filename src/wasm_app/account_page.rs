use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::forms::{
    submit_change_email, submit_change_password, Alert, ChangeEmailForm, ChangePasswordForm,
};

use super::dom::{input_value, listen, query, query_in, set_input_value, show_alert};
use super::Client;

const ALERT_BASE_CLASS: &str = "alert mt-3";

pub(crate) fn bind(document: &Document, client: &Rc<Client>) {
    if let Some(form) = query(document, "form#change-email") {
        bind_change_email(document.clone(), form, Rc::clone(client));
    }
    if let Some(form) = query(document, "form#change-password") {
        bind_change_password(form, Rc::clone(client));
    }
}

fn reset_alert(form: &Element) -> Option<Element> {
    let alert = query_in(form, "div.alert")?;
    alert.set_class_name(ALERT_BASE_CLASS);
    Some(alert)
}

fn render_alert(alert_el: Option<&Element>, alert: &Alert) {
    if let Some(el) = alert_el {
        show_alert(el, alert);
    }
}

fn bind_change_email(document: Document, form: Element, client: Rc<Client>) {
    let target = form.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        let form = target.clone();
        let document = document.clone();
        let client = Rc::clone(&client);
        spawn_local(async move {
            let alert_el = reset_alert(&form);
            let mut values = ChangeEmailForm {
                new_email: input_value(&form, "new-email"),
                password: input_value(&form, "password"),
            };

            let outcome = submit_change_email(&client, &mut values).await;

            render_alert(alert_el.as_ref(), &outcome.alert);
            if let Some(email) = outcome.displayed_email {
                if let Some(el) = query(&document, ".card-subtitle #email") {
                    el.set_text_content(Some(&email));
                }
            }
            set_input_value(&form, "password", &values.password);
        });
    });
}

fn bind_change_password(form: Element, client: Rc<Client>) {
    let target = form.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        let form = target.clone();
        let client = Rc::clone(&client);
        spawn_local(async move {
            let alert_el = reset_alert(&form);
            let mut values = ChangePasswordForm {
                old_password: input_value(&form, "old-password"),
                new_password: input_value(&form, "new-password"),
                confirm_new_password: input_value(&form, "confirm-new-password"),
            };

            let alert = submit_change_password(&client, &mut values).await;

            render_alert(alert_el.as_ref(), &alert);
            set_input_value(&form, "old-password", &values.old_password);
            set_input_value(&form, "new-password", &values.new_password);
            set_input_value(&form, "confirm-new-password", &values.confirm_new_password);
        });
    });
}
