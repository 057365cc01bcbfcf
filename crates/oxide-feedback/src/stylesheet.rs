//! Static styles for the strength meter.
//!
//! The host includes this once when it builds the page head; nothing in
//! this crate injects styles at runtime.

use ironhtml::typed::Element;
use ironhtml_elements::Style;

/// CSS for `div.password-strength` and its parts.
pub const STRENGTH_METER_CSS: &str = "\
.password-strength { margin-top: 10px; }\n\
.strength-bar { width: 100%; height: 4px; \
background-color: #e1e5e9; border-radius: 2px; overflow: hidden; }\n\
.strength-fill { height: 100%; width: 0%; transition: all 0.3s ease; }\n\
.strength-text { font-size: 12px; margin-top: 5px; font-weight: 500; }";

/// Renders the stylesheet as a `<style>` element.
#[must_use]
pub fn stylesheet_markup() -> String {
    Element::<Style>::new()
        .class("oxide-feedback")
        .raw(STRENGTH_METER_CSS)
        .render()
}
