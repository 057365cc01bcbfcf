//! # oxide-feedback
//!
//! Inline validation feedback, password strength meter, transient banners
//! and submit gating for forms.
//!
//! This crate provides:
//! - An arena-backed UI tree with generational node ids and scoped queries
//! - A per-form controller state machine (`Idle`, `Validating`,
//!   `Blocked`, `Submitting`)
//! - Idempotent inline error annotations
//! - A strength meter for password fields
//! - Self-dismissing error and success banners, one per kind
//! - A virtual-clock timer queue standing in for the host event loop
//!
//! Validation here is advisory only. When every field passes the native
//! submission proceeds untouched and the server decides.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//!
//! use oxide_feedback::{Document, FeedbackConfig, Page, SubmitDecision};
//!
//! let mut doc = Document::new();
//! let form = doc.append_element(doc.root(), "form").unwrap();
//! let group = doc.append_element(form, "div").unwrap();
//! let username = doc.append_element(group, "input").unwrap();
//! doc.set_attr(username, "name", "username").unwrap();
//! doc.set_attr(username, "required", "").unwrap();
//!
//! let mut page = Page::new(doc, FeedbackConfig::default()).unwrap();
//!
//! page.input(username, "ab").unwrap();
//! assert_eq!(page.submit(form).unwrap(), SubmitDecision::Cancel);
//!
//! // The inline annotation and the page-level banner are now shown.
//! let controller = page.controller(form).unwrap();
//! assert!(controller.annotation_for(username).is_some());
//! assert!(page.banners().current(oxide_feedback::BannerKind::Error).is_some());
//!
//! // Banners dismiss themselves.
//! page.advance(Duration::from_secs(5)).unwrap();
//! assert!(page.banners().current(oxide_feedback::BannerKind::Error).is_none());
//! ```
//!
//! ## Styles
//!
//! The strength meter expects [`stylesheet::STRENGTH_METER_CSS`] to be
//! loaded once with the page; [`stylesheet::stylesheet_markup`] renders it
//! as a `<style>` element.

pub mod banner;
mod config;
pub mod controller;
pub mod dom;
mod error;
pub mod page;
pub mod renderer;
pub mod scheduler;
pub mod stylesheet;

pub use banner::{BannerKind, BannerManager};
pub use config::FeedbackConfig;
pub use controller::{FormController, FormState, SubmitDecision};
pub use dom::{Document, NodeId};
pub use error::{FeedbackError, Result};
pub use page::{Dispatch, Page, PageEvent};
pub use renderer::{FeedbackRenderer, StrengthMeter};
