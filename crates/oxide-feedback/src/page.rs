//! Page bootstrap and event routing.
//!
//! A [`Page`] owns the UI tree and everything that mutates it. Building
//! one wires a [`FormController`] to every form, attaches strength meters
//! and starts the entrance animation of `.form-container` elements. Host
//! events are then fed through [`Page::dispatch`] and time is moved
//! forward with [`Page::advance`].

use std::time::Duration;

use oxide_forms::{FieldValidator, ValidationResult};
use serde::Serialize;
use tracing::{debug, info};

use crate::banner::{BannerKind, BannerManager};
use crate::config::FeedbackConfig;
use crate::controller::{Context, FormController, SubmitDecision};
use crate::dom::{Document, NodeId};
use crate::error::{FeedbackError, Result};
use crate::scheduler::{Scheduler, Task};

/// Class of the containers that animate in on page load.
pub const FORM_CONTAINER_CLASS: &str = "form-container";

/// A user interaction delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Focus left a field.
    Blur {
        /// The field.
        field: NodeId,
    },
    /// A field's value changed.
    Input {
        /// The field.
        field: NodeId,
        /// The new value.
        value: String,
    },
    /// A form is being submitted.
    Submit {
        /// The form.
        form: NodeId,
    },
}

/// Result of dispatching a [`PageEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Dispatch {
    /// A field was validated.
    Validated(ValidationResult),
    /// The event was processed with nothing to report.
    Handled,
    /// The owning form no longer reacts to field events.
    Ignored,
    /// The host must act on this submit decision.
    Submit(SubmitDecision),
}

/// All forms of a page plus the shared UI resources.
#[derive(Debug)]
pub struct Page {
    document: Document,
    scheduler: Scheduler,
    banners: BannerManager,
    validator: FieldValidator,
    config: FeedbackConfig,
    controllers: Vec<FormController>,
}

impl Page {
    /// Initializes every form found in `document`.
    ///
    /// # Errors
    ///
    /// Fails if the field rules cannot be built or a form cannot be bound.
    pub fn new(mut document: Document, config: FeedbackConfig) -> Result<Self> {
        let validator = FieldValidator::new()?;
        let mut scheduler = Scheduler::new();

        let forms = document.find_all(document.root(), |el| el.tag() == "form")?;
        let controllers = forms
            .into_iter()
            .map(|form| FormController::new(&mut document, form))
            .collect::<Result<Vec<_>>>()?;

        let containers =
            document.find_all(document.root(), |el| el.has_class(FORM_CONTAINER_CLASS))?;
        for container in &containers {
            document.set_style(*container, "opacity", "0")?;
            document.set_style(*container, "transform", "translateY(30px)")?;
            scheduler.schedule(
                config.entrance_delay(),
                Task::RevealEntrance {
                    container: *container,
                },
            );
        }

        info!(
            forms = controllers.len(),
            containers = containers.len(),
            "page initialized"
        );
        Ok(Self {
            document,
            scheduler,
            banners: BannerManager::new(config.banner_lifetime()),
            validator,
            config,
            controllers,
        })
    }

    /// Returns the UI tree.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    /// Returns the banner manager.
    #[must_use]
    pub const fn banners(&self) -> &BannerManager {
        &self.banners
    }

    /// Returns the current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Returns the controllers, one per form, in document order.
    #[must_use]
    pub fn controllers(&self) -> &[FormController] {
        &self.controllers
    }

    /// Returns the controller bound to `form`.
    #[must_use]
    pub fn controller(&self, form: NodeId) -> Option<&FormController> {
        self.controllers.iter().find(|c| c.form() == form)
    }

    fn owner_of_field(&self, field: NodeId) -> Result<usize> {
        self.controllers
            .iter()
            .position(|c| c.owns(field))
            .ok_or(FeedbackError::Unowned(field))
    }

    fn owner_of_form(&self, form: NodeId) -> Result<usize> {
        self.controllers
            .iter()
            .position(|c| c.form() == form)
            .ok_or(FeedbackError::Unowned(form))
    }

    /// Routes `event` to the controller owning its target.
    ///
    /// # Errors
    ///
    /// Fails with [`FeedbackError::Unowned`] when no form owns the target,
    /// or with the controller's error when handling fails.
    pub fn dispatch(&mut self, event: PageEvent) -> Result<Dispatch> {
        debug!(?event, nodes = self.document.node_count(), "dispatching");
        let Self {
            document,
            scheduler,
            banners,
            validator,
            config,
            controllers,
        } = self;

        let index = match &event {
            PageEvent::Blur { field } | PageEvent::Input { field, .. } => {
                controllers.iter().position(|c| c.owns(*field))
            }
            PageEvent::Submit { form } => controllers.iter().position(|c| c.form() == *form),
        };
        let Some(controller) = index.and_then(|i| controllers.get_mut(i)) else {
            let target = match &event {
                PageEvent::Blur { field } | PageEvent::Input { field, .. } => *field,
                PageEvent::Submit { form } => *form,
            };
            return Err(FeedbackError::Unowned(target));
        };

        let mut ctx = Context {
            doc: document,
            scheduler,
            banners,
            validator,
            config,
        };

        match event {
            PageEvent::Blur { field } => Ok(controller
                .blur(&mut ctx, field)?
                .map_or(Dispatch::Ignored, Dispatch::Validated)),
            PageEvent::Input { field, value } => {
                ctx.doc.set_value(field, value)?;
                if !controller.state().accepts_field_events() {
                    return Ok(Dispatch::Ignored);
                }
                controller.input(ctx.doc, field)?;
                Ok(Dispatch::Handled)
            }
            PageEvent::Submit { .. } => Ok(Dispatch::Submit(controller.submit(&mut ctx)?)),
        }
    }

    /// Focus left `field`.
    ///
    /// # Errors
    ///
    /// See [`Page::dispatch`].
    pub fn blur(&mut self, field: NodeId) -> Result<Dispatch> {
        self.dispatch(PageEvent::Blur { field })
    }

    /// The value of `field` changed to `value`.
    ///
    /// # Errors
    ///
    /// See [`Page::dispatch`].
    pub fn input(&mut self, field: NodeId, value: impl Into<String>) -> Result<Dispatch> {
        self.dispatch(PageEvent::Input {
            field,
            value: value.into(),
        })
    }

    /// The user submitted `form`.
    ///
    /// # Errors
    ///
    /// See [`Page::dispatch`].
    pub fn submit(&mut self, form: NodeId) -> Result<SubmitDecision> {
        let Dispatch::Submit(decision) = self.dispatch(PageEvent::Submit { form })? else {
            return Ok(SubmitDecision::Cancel);
        };
        Ok(decision)
    }

    /// Shows a page-level banner at the top of `form`.
    ///
    /// # Errors
    ///
    /// Fails with [`FeedbackError::Unowned`] when `form` has no controller.
    pub fn show_banner(
        &mut self,
        form: NodeId,
        kind: BannerKind,
        message: &str,
    ) -> Result<NodeId> {
        self.owner_of_form(form)?;
        self.banners
            .show(&mut self.document, &mut self.scheduler, form, kind, message)
    }

    /// Shows a success banner at the top of `form`.
    ///
    /// # Errors
    ///
    /// See [`Page::show_banner`].
    pub fn show_success(&mut self, form: NodeId, message: &str) -> Result<NodeId> {
        self.show_banner(form, BannerKind::Success, message)
    }

    /// Returns the form owning `field`.
    ///
    /// # Errors
    ///
    /// Fails with [`FeedbackError::Unowned`] when no form owns `field`.
    pub fn form_of(&self, field: NodeId) -> Result<NodeId> {
        Ok(self.controllers[self.owner_of_field(field)?].form())
    }

    /// Moves the clock forward by `dt`, running every task that falls due.
    ///
    /// # Errors
    ///
    /// Fails if a due task targets nodes that no longer exist.
    pub fn advance(&mut self, dt: Duration) -> Result<()> {
        let until = self.scheduler.now().saturating_add(dt);
        while let Some((id, task)) = self.scheduler.pop_due(until) {
            debug!(?id, ?task, now = ?self.scheduler.now(), "running task");
            self.run(task)?;
        }
        Ok(())
    }

    fn run(&mut self, task: Task) -> Result<()> {
        match task {
            Task::DismissBanner { kind, banner } => {
                self.banners.expire(&mut self.document, kind, banner)?;
            }
            Task::RevealEntrance { container } => {
                let doc = &mut self.document;
                let transition = self.config.entrance_transition.as_str();
                doc.set_style(container, "transition", transition)?;
                doc.set_style(container, "opacity", "1")?;
                doc.set_style(container, "transform", "translateY(0)")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::FormState;

    fn page_with_username() -> (Page, NodeId, NodeId) {
        let mut doc = Document::new();
        let container = doc.append_element(doc.root(), "div").unwrap();
        doc.add_class(container, FORM_CONTAINER_CLASS).unwrap();
        let form = doc.append_element(container, "form").unwrap();
        let group = doc.append_element(form, "div").unwrap();
        let username = doc.append_element(group, "input").unwrap();
        doc.set_attr(username, "name", "username").unwrap();
        doc.set_attr(username, "required", "").unwrap();
        let page = Page::new(doc, FeedbackConfig::default()).unwrap();
        (page, form, username)
    }

    #[test]
    fn test_new_wires_every_form() {
        let (page, form, username) = page_with_username();
        assert_eq!(page.controllers().len(), 1);
        assert_eq!(page.form_of(username).unwrap(), form);
        assert_eq!(page.now(), Duration::ZERO);
        assert_eq!(page.scheduler.pending(), 1);
    }

    #[test]
    fn test_input_stores_value() {
        let (mut page, _, username) = page_with_username();
        assert_eq!(page.input(username, "alice").unwrap(), Dispatch::Handled);
        assert_eq!(page.document().element(username).unwrap().value(), "alice");
    }

    #[test]
    fn test_dispatch_submit() {
        let (mut page, form, username) = page_with_username();
        let outcome = page.dispatch(PageEvent::Submit { form }).unwrap();
        assert_eq!(outcome, Dispatch::Submit(SubmitDecision::Cancel));
        assert_eq!(page.controller(form).unwrap().state(), FormState::Blocked);

        page.input(username, "alice").unwrap();
        assert_eq!(page.submit(form).unwrap(), SubmitDecision::Proceed);
    }

    #[test]
    fn test_dispatch_serializes() {
        let (mut page, _, username) = page_with_username();
        let outcome = page.blur(username).unwrap();
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["Validated"]["valid"], serde_json::json!(false));
        assert_eq!(json["Validated"]["message"], "This field is required.");
    }

    #[test]
    fn test_advance_moves_clock() {
        let (mut page, _, _) = page_with_username();
        page.advance(Duration::from_secs(1)).unwrap();
        assert_eq!(page.now(), Duration::from_secs(1));
        assert_eq!(page.scheduler.pending(), 0);
    }
}
