#![allow(dead_code)]

use oxide_feedback::{Document, FeedbackConfig, NodeId, Page};

/// Installs a test-writer subscriber so `RUST_LOG`-style output shows up
/// with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Node ids of a registration form.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub container: NodeId,
    pub form: NodeId,
    pub username: NodeId,
    pub email: NodeId,
    pub password: NodeId,
    pub password2: NodeId,
    pub submit: NodeId,
}

/// Node ids of a profile form.
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub form: NodeId,
    pub bio: NodeId,
    pub submit: NodeId,
}

fn field(
    doc: &mut Document,
    form: NodeId,
    tag: &str,
    ty: &str,
    name: &str,
    required: bool,
) -> NodeId {
    let group = doc.append_element(form, "div").unwrap();
    doc.add_class(group, "form-group").unwrap();
    let input = doc.append_element(group, tag).unwrap();
    if tag == "input" {
        doc.set_attr(input, "type", ty).unwrap();
    }
    doc.set_attr(input, "name", name).unwrap();
    if required {
        doc.set_attr(input, "required", "").unwrap();
    }
    input
}

fn submit_button(doc: &mut Document, form: NodeId, label: &str) -> NodeId {
    let button = doc.append_element(form, "button").unwrap();
    doc.set_attr(button, "type", "submit").unwrap();
    doc.set_text(button, label).unwrap();
    button
}

/// Adds a registration form wrapped in a `.form-container`.
pub fn add_registration(doc: &mut Document) -> Registration {
    let container = doc.append_element(doc.root(), "div").unwrap();
    doc.add_class(container, "form-container").unwrap();
    let form = doc.append_element(container, "form").unwrap();
    doc.set_attr(form, "method", "post").unwrap();
    doc.set_attr(form, "action", "/register/").unwrap();

    let hidden = doc.append_element(form, "input").unwrap();
    doc.set_attr(hidden, "type", "hidden").unwrap();
    doc.set_attr(hidden, "name", "csrfmiddlewaretoken").unwrap();

    Registration {
        container,
        form,
        username: field(doc, form, "input", "text", "username", true),
        email: field(doc, form, "input", "email", "email", true),
        password: field(doc, form, "input", "password", "password", true),
        password2: field(doc, form, "input", "password", "password2", true),
        submit: submit_button(doc, form, "Register"),
    }
}

/// Adds a profile form with an optional bio.
pub fn add_profile(doc: &mut Document) -> Profile {
    let form = doc.append_element(doc.root(), "form").unwrap();
    Profile {
        form,
        bio: field(doc, form, "textarea", "", "bio", false),
        submit: submit_button(doc, form, "Save"),
    }
}

/// A page holding only the registration form.
pub fn registration_page() -> (Page, Registration) {
    init_tracing();
    let mut doc = Document::new();
    let reg = add_registration(&mut doc);
    (Page::new(doc, FeedbackConfig::default()).unwrap(), reg)
}

/// Fills every registration field with acceptable values.
pub fn fill_valid(page: &mut Page, reg: &Registration) {
    page.input(reg.username, "alice_01").unwrap();
    page.input(reg.email, "alice@example.org").unwrap();
    page.input(reg.password, "Abcdefg1").unwrap();
    page.input(reg.password2, "Abcdefg1").unwrap();
}

/// Counts elements under `scope` carrying `class`.
pub fn count_class(page: &Page, scope: NodeId, class: &str) -> usize {
    page.document()
        .find_all(scope, |el| el.has_class(class))
        .unwrap()
        .len()
}
