use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlInputElement};

use crate::auth::PasswordAuth;
use crate::editor::EditorMode;
use crate::forms::{
    regenerate_store_keys, regenerate_webhook_secret, remove_store, submit_view_key,
    submit_webhook, Alert, FieldOutcome, RemoveStoreOutcome,
};

use super::dom::{hide, input_value, listen, prompt_password, query, show, show_alert, window};
use super::Client;

const INVALID_CLASS: &str = "is-invalid";

struct InlineEditor {
    input: HtmlInputElement,
    toggle: Element,
    submit: Option<Element>,
    invalid_feedback: Option<Element>,
    saved_alert: Option<Element>,
    mode: Cell<EditorMode>,
}

impl InlineEditor {
    fn find(document: &Document, root: &str) -> Option<Rc<Self>> {
        let input = query(document, &format!("{} input", root))?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        let toggle = query(document, &format!("{} .toggle-editor-btn", root))?;
        let mode = EditorMode::from_read_only(input.read_only());
        Some(Rc::new(Self {
            submit: query(document, &format!("{} .submit-btn", root)),
            invalid_feedback: query(document, &format!("{} .invalid-feedback", root)),
            saved_alert: query(document, &format!("{} .alert.alert-success", root)),
            input,
            toggle,
            mode: Cell::new(mode),
        }))
    }

    fn toggle(&self) {
        let mode = self.mode.get().toggled();
        self.mode.set(mode);
        self.input.set_read_only(mode.is_read_only());
        self.input.set_class_name(mode.input_class());
        self.toggle.set_inner_html(mode.toggle_button_html());
        if let Some(submit) = &self.submit {
            if mode.submit_hidden() {
                hide(submit);
            } else {
                show(submit);
            }
        }
        if !mode.is_read_only() {
            let _ = self.input.focus();
        }
    }

    fn begin_submit(&self) {
        let _ = self.input.class_list().remove_1(INVALID_CLASS);
    }

    fn apply(&self, outcome: FieldOutcome) {
        match outcome {
            FieldOutcome::Saved { value } => {
                self.input.set_value(&value);
                if let Some(alert) = &self.saved_alert {
                    show(alert);
                }
            }
            FieldOutcome::Invalid { feedback } => {
                if let Some(el) = &self.invalid_feedback {
                    el.set_text_content(Some(&feedback));
                }
                let _ = self.input.class_list().add_1(INVALID_CLASS);
            }
        }
    }
}

#[derive(Clone, Copy)]
enum EditedField {
    ViewKey,
    Webhook,
}

impl EditedField {
    fn input_name(self) -> &'static str {
        match self {
            Self::ViewKey => "new-viewkey",
            Self::Webhook => "new-webhook",
        }
    }
}

pub(crate) fn bind(document: &Document, client: &Rc<Client>, store_id: &str) {
    let store_id: Rc<str> = Rc::from(store_id);

    if let Some(editor) = InlineEditor::find(document, "#viewkey-editor") {
        bind_toggle(&editor);
        if let Some(form) = query(document, "form#edit-viewkey") {
            bind_field_submit(form, editor, EditedField::ViewKey, client, &store_id);
        }
    }
    if let Some(editor) = InlineEditor::find(document, "form#edit-webhook") {
        bind_toggle(&editor);
        if let Some(form) = query(document, "form#edit-webhook") {
            bind_field_submit(form, editor, EditedField::Webhook, client, &store_id);
        }
    }

    if let Some(button) = query(document, "#btn-new-store-keys") {
        let alert = query(document, "#store-keys .alert");
        let api_key = query(document, "#api-key");
        let secret_key = query(document, "#secret-key");
        let client = Rc::clone(client);
        let store_id = Rc::clone(&store_id);
        listen(&button, "click", move |_| {
            let Some(auth) = gate() else { return };
            let client = Rc::clone(&client);
            let store_id = Rc::clone(&store_id);
            let (alert, api_key, secret_key) = (alert.clone(), api_key.clone(), secret_key.clone());
            spawn_local(async move {
                let outcome = regenerate_store_keys(&client, &store_id, &auth).await;
                replace_text(api_key.as_ref(), outcome.api_key.as_deref());
                replace_text(secret_key.as_ref(), outcome.secret_key.as_deref());
                render_alert(alert.as_ref(), &outcome.alert);
            });
        });
    }

    if let Some(button) = query(document, "#btn-new-webhook-secret-key") {
        let alert = query(document, "#webhook-secret-key-collapse .alert");
        let secret = query(document, "#webhook-secret-key");
        let client = Rc::clone(client);
        let store_id = Rc::clone(&store_id);
        listen(&button, "click", move |_| {
            let Some(auth) = gate() else { return };
            let client = Rc::clone(&client);
            let store_id = Rc::clone(&store_id);
            let (alert, secret) = (alert.clone(), secret.clone());
            spawn_local(async move {
                let outcome = regenerate_webhook_secret(&client, &store_id, &auth).await;
                replace_text(secret.as_ref(), outcome.webhook_secret_key.as_deref());
                render_alert(alert.as_ref(), &outcome.alert);
            });
        });
    }

    if let Some(button) = query(document, "#remove-store button") {
        let alert = query(document, "#remove-store .alert");
        let client = Rc::clone(client);
        listen(&button, "click", move |_| {
            let Some(auth) = gate() else { return };
            let client = Rc::clone(&client);
            let store_id = Rc::clone(&store_id);
            let alert = alert.clone();
            spawn_local(async move {
                match remove_store(&client, &store_id, &auth).await {
                    RemoveStoreOutcome::Redirect(path) => {
                        let _ = window().location().replace(&path);
                    }
                    RemoveStoreOutcome::Failed(message) => {
                        if let Some(alert) = &alert {
                            alert.set_text_content(Some(&message));
                            show(alert);
                        }
                    }
                }
            });
        });
    }
}

fn gate() -> Option<PasswordAuth> {
    let auth = prompt_password();
    if auth.is_none() {
        debug!("password prompt dismissed");
    }
    auth
}

fn bind_toggle(editor: &Rc<InlineEditor>) {
    let target = Rc::clone(editor);
    listen(&editor.toggle, "click", move |_| target.toggle());
}

fn bind_field_submit(
    form: Element,
    editor: Rc<InlineEditor>,
    field: EditedField,
    client: &Rc<Client>,
    store_id: &Rc<str>,
) {
    let client = Rc::clone(client);
    let store_id = Rc::clone(store_id);
    let target = form.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        let Some(auth) = gate() else { return };
        let value = input_value(&target, field.input_name());
        let client = Rc::clone(&client);
        let store_id = Rc::clone(&store_id);
        let editor = Rc::clone(&editor);
        spawn_local(async move {
            editor.begin_submit();
            let outcome = match field {
                EditedField::ViewKey => submit_view_key(&client, &store_id, &value, &auth).await,
                EditedField::Webhook => submit_webhook(&client, &store_id, &value, &auth).await,
            };
            editor.apply(outcome);
        });
    });
}

fn replace_text(element: Option<&Element>, text: Option<&str>) {
    if let (Some(element), Some(text)) = (element, text) {
        element.set_text_content(Some(text));
    }
}

fn render_alert(element: Option<&Element>, alert: &Alert) {
    if let Some(element) = element {
        show_alert(element, alert);
    }
}
