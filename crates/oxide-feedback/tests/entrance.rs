mod common;

use std::time::Duration;

use common::{add_profile, add_registration, init_tracing, registration_page};
use oxide_feedback::{Document, FeedbackConfig, Page};

fn style(page: &Page, id: oxide_feedback::NodeId, property: &str) -> Option<String> {
    page.document()
        .element(id)
        .unwrap()
        .style(property)
        .map(str::to_string)
}

#[test]
fn test_containers_start_hidden_and_slide_in() {
    let (mut page, reg) = registration_page();

    assert_eq!(style(&page, reg.container, "opacity").as_deref(), Some("0"));
    assert_eq!(
        style(&page, reg.container, "transform").as_deref(),
        Some("translateY(30px)")
    );
    assert_eq!(style(&page, reg.container, "transition"), None);

    page.advance(Duration::from_millis(99)).unwrap();
    assert_eq!(style(&page, reg.container, "opacity").as_deref(), Some("0"));

    page.advance(Duration::from_millis(1)).unwrap();
    assert_eq!(style(&page, reg.container, "opacity").as_deref(), Some("1"));
    assert_eq!(
        style(&page, reg.container, "transform").as_deref(),
        Some("translateY(0)")
    );
    assert_eq!(
        style(&page, reg.container, "transition").as_deref(),
        Some("all 0.5s ease-out")
    );
}

#[test]
fn test_forms_outside_containers_are_not_animated() {
    init_tracing();
    let mut doc = Document::new();
    let profile = add_profile(&mut doc);
    let page = Page::new(doc, FeedbackConfig::default()).unwrap();

    assert_eq!(style(&page, profile.form, "opacity"), None);
}

#[test]
fn test_entrance_delay_is_configurable() {
    init_tracing();
    let mut doc = Document::new();
    let reg = add_registration(&mut doc);
    let config = FeedbackConfig::default().with_entrance_delay(Duration::from_millis(250));
    let mut page = Page::new(doc, config).unwrap();

    page.advance(Duration::from_millis(200)).unwrap();
    assert_eq!(style(&page, reg.container, "opacity").as_deref(), Some("0"));
    page.advance(Duration::from_millis(50)).unwrap();
    assert_eq!(style(&page, reg.container, "opacity").as_deref(), Some("1"));
    assert_eq!(page.now(), Duration::from_millis(250));
}

#[test]
fn test_fields_work_before_entrance_finishes() {
    let (mut page, reg) = registration_page();

    page.blur(reg.username).unwrap();
    assert!(page
        .controller(reg.form)
        .unwrap()
        .annotation_for(reg.username)
        .is_some());
}
