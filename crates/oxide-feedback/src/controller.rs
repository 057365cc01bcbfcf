//! Per-form validation state machine.
//!
//! A [`FormController`] is bound to one `<form>` and only ever touches the
//! fields it discovered inside that form at construction. Its lifecycle:
//!
//! ```text
//!            submit            all valid
//!   Idle ───────────▶ Validating ─────────▶ Submitting (terminal)
//!                       │    ▲
//!            any invalid│    │submit
//!                       ▼    │
//!                      Blocked
//! ```
//!
//! Field events (blur, input) are handled in `Idle` and `Blocked` without
//! changing state. Once `Submitting`, every further event is ignored. A
//! submit attempt that fails part-way (a field went missing from the
//! tree) lands in `Blocked`, so the form keeps reacting to the user.

use oxide_forms::{score, FieldContext, FieldValidator, ValidationResult};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::banner::{BannerKind, BannerManager};
use crate::config::FeedbackConfig;
use crate::dom::{Document, Element, NodeId};
use crate::error::{FeedbackError, Result};
use crate::renderer::{FeedbackRenderer, StrengthMeter};
use crate::scheduler::Scheduler;

/// Class of the spinner placed in the submit button while submitting.
pub const LOADING_CLASS: &str = "loading";

/// Lifecycle state of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormState {
    /// Waiting for user interaction.
    Idle,
    /// Checking every field after a submit attempt.
    Validating,
    /// The last submit attempt was cancelled because of invalid fields.
    Blocked,
    /// Submission is under way; the page is about to navigate.
    Submitting,
}

/// Inputs of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The user tried to submit.
    SubmitAttempted,
    /// Every field passed.
    AllValid,
    /// At least one field failed.
    AnyInvalid,
}

impl FormState {
    /// Returns the next state, or `None` if `transition` is not allowed here.
    #[must_use]
    pub const fn on(self, transition: Transition) -> Option<Self> {
        match (self, transition) {
            (Self::Idle | Self::Blocked, Transition::SubmitAttempted) => Some(Self::Validating),
            (Self::Validating, Transition::AllValid) => Some(Self::Submitting),
            (Self::Validating, Transition::AnyInvalid) => Some(Self::Blocked),
            _ => None,
        }
    }

    /// Returns whether blur and input events are processed.
    #[must_use]
    pub const fn accepts_field_events(self) -> bool {
        matches!(self, Self::Idle | Self::Blocked)
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// What the host should do with a native submit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubmitDecision {
    /// Let the native submission go ahead untouched.
    Proceed,
    /// Prevent the native submission.
    Cancel,
}

/// Shared resources a controller mutates while handling an event.
#[derive(Debug)]
pub struct Context<'a> {
    /// The UI tree.
    pub doc: &'a mut Document,
    /// Timer queue for deferred work.
    pub scheduler: &'a mut Scheduler,
    /// Page-level banners.
    pub banners: &'a mut BannerManager,
    /// Field rules.
    pub validator: &'a FieldValidator,
    /// Tunables.
    pub config: &'a FeedbackConfig,
}

/// Returns whether `el` is a field this layer validates.
#[must_use]
pub fn is_validable(el: &Element) -> bool {
    el.tag() == "textarea" || matches!(el.input_type(), Some("text" | "email" | "password"))
}

/// Validation and feedback for a single form.
#[derive(Debug)]
pub struct FormController {
    form: NodeId,
    fields: Vec<NodeId>,
    password: Option<NodeId>,
    submit_button: Option<NodeId>,
    meter: Option<StrengthMeter>,
    renderer: FeedbackRenderer,
    state: FormState,
}

impl FormController {
    /// Binds a controller to `form`, discovering its fields once.
    ///
    /// A strength meter is attached when the form has a `password` field;
    /// without one the form works the same, just without a meter.
    ///
    /// # Errors
    ///
    /// Fails with [`FeedbackError::NotAForm`] when `form` is not a `<form>`.
    pub fn new(doc: &mut Document, form: NodeId) -> Result<Self> {
        if doc.element(form)?.tag() != "form" {
            return Err(FeedbackError::NotAForm(form));
        }

        let fields = doc.find_all(form, is_validable)?;
        let password = fields
            .iter()
            .copied()
            .find(|f| doc.element(*f).is_ok_and(|el| el.attr("name") == Some("password")));
        let submit_button = doc.find_first(form, |el| {
            el.tag() == "button" && el.attr("type") == Some("submit")
        })?;

        let meter = password.and_then(|field| {
            StrengthMeter::attach(doc, field)
                .inspect_err(|err| warn!(%form, %err, "strength meter not attached"))
                .ok()
        });
        if password.is_none() {
            debug!(%form, "no password field, strength meter disabled");
        }

        debug!(%form, fields = fields.len(), "form controller ready");
        Ok(Self {
            form,
            fields,
            password,
            submit_button,
            meter,
            renderer: FeedbackRenderer::new(),
            state: FormState::Idle,
        })
    }

    /// Returns the form element.
    #[must_use]
    pub const fn form(&self) -> NodeId {
        self.form
    }

    /// Returns the validable fields, in document order.
    #[must_use]
    pub fn fields(&self) -> &[NodeId] {
        &self.fields
    }

    /// Returns the `password` field, if the form has one.
    #[must_use]
    pub const fn password_field(&self) -> Option<NodeId> {
        self.password
    }

    /// Returns the submit button, if the form has one.
    #[must_use]
    pub const fn submit_button(&self) -> Option<NodeId> {
        self.submit_button
    }

    /// Returns the strength meter, if one was attached.
    #[must_use]
    pub const fn strength_meter(&self) -> Option<&StrengthMeter> {
        self.meter.as_ref()
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> FormState {
        self.state
    }

    /// Returns the annotation currently attached to `field`.
    #[must_use]
    pub fn annotation_for(&self, field: NodeId) -> Option<NodeId> {
        self.renderer.annotation_for(field)
    }

    /// Returns whether `field` belongs to this form.
    #[must_use]
    pub fn owns(&self, field: NodeId) -> bool {
        self.fields.contains(&field)
    }

    fn transition(&mut self, transition: Transition) {
        match self.state.on(transition) {
            Some(next) => {
                info!(form = %self.form, from = ?self.state, to = ?next, "form state changed");
                self.state = next;
            }
            None => warn!(
                form = %self.form,
                state = ?self.state,
                ?transition,
                "transition rejected"
            ),
        }
    }

    fn field_context(doc: &Document, field: NodeId) -> Result<FieldContext> {
        let el = doc.element(field)?;
        Ok(FieldContext::new(el.attr("name").unwrap_or_default(), el.value())
            .required(el.has_attr("required")))
    }

    fn password_value<'d>(&self, doc: &'d Document) -> Result<Option<&'d str>> {
        self.password
            .map(|p| doc.element(p).map(Element::value))
            .transpose()
    }

    fn check(&mut self, ctx: &mut Context<'_>, field: NodeId) -> Result<ValidationResult> {
        let field_ctx = Self::field_context(ctx.doc, field)?;
        let password = self.password_value(ctx.doc)?;
        let result = ctx.validator.validate(&field_ctx, password);
        self.renderer.apply_field_feedback(ctx.doc, field, &result)?;
        Ok(result)
    }

    /// Handles focus leaving `field`: validates it and shows the outcome.
    ///
    /// Returns `None` when the event was ignored.
    ///
    /// # Errors
    ///
    /// Fails with [`FeedbackError::Unowned`] for a foreign field and with
    /// [`FeedbackError::Detached`] when an invalid field has no parent.
    pub fn blur(
        &mut self,
        ctx: &mut Context<'_>,
        field: NodeId,
    ) -> Result<Option<ValidationResult>> {
        if !self.owns(field) {
            return Err(FeedbackError::Unowned(field));
        }
        if !self.state.accepts_field_events() {
            debug!(form = %self.form, %field, "blur ignored while submitting");
            return Ok(None);
        }
        self.check(ctx, field).map(Some)
    }

    /// Handles a value change of `field`.
    ///
    /// The field's annotation is cleared without re-validating; the
    /// password field also redraws its strength meter.
    ///
    /// # Errors
    ///
    /// Fails with [`FeedbackError::Unowned`] for a foreign field.
    pub fn input(&mut self, doc: &mut Document, field: NodeId) -> Result<()> {
        if !self.owns(field) {
            return Err(FeedbackError::Unowned(field));
        }
        if !self.state.accepts_field_events() {
            debug!(form = %self.form, %field, "input ignored while submitting");
            return Ok(());
        }

        self.renderer.clear_field_feedback(doc, field)?;
        if Some(field) == self.password {
            if let Some(meter) = &self.meter {
                let level = score(doc.element(field)?.value());
                meter.render(doc, level)?;
            }
        }
        Ok(())
    }

    /// Handles a submit attempt.
    ///
    /// Every field is validated. If any fails, the submission is cancelled
    /// and a page-level error banner is shown. Otherwise the submit button
    /// switches to its loading state and the native submission proceeds.
    ///
    /// # Errors
    ///
    /// Fails when a field can no longer be validated, for instance because
    /// it was detached from the tree. The form is left `Blocked`.
    pub fn submit(&mut self, ctx: &mut Context<'_>) -> Result<SubmitDecision> {
        if self.state.is_terminal() {
            debug!(form = %self.form, "duplicate submit suppressed");
            return Ok(SubmitDecision::Cancel);
        }

        self.transition(Transition::SubmitAttempted);
        let mut invalid = 0usize;
        for field in self.fields.clone() {
            let result = match self.check(ctx, field) {
                Ok(result) => result,
                Err(err) => {
                    warn!(form = %self.form, %field, %err, "validation aborted");
                    self.transition(Transition::AnyInvalid);
                    return Err(err);
                }
            };
            if !result.is_valid() {
                invalid += 1;
            }
        }

        if invalid > 0 {
            self.transition(Transition::AnyInvalid);
            ctx.banners.show(
                ctx.doc,
                ctx.scheduler,
                self.form,
                BannerKind::Error,
                &ctx.config.blocked_message,
            )?;
            info!(form = %self.form, invalid, "submission blocked");
            return Ok(SubmitDecision::Cancel);
        }

        self.transition(Transition::AllValid);
        self.show_processing(ctx.doc, &ctx.config.processing_label)?;
        Ok(SubmitDecision::Proceed)
    }

    fn show_processing(&self, doc: &mut Document, label: &str) -> Result<()> {
        let Some(button) = self.submit_button else {
            return Ok(());
        };
        doc.set_attr(button, "disabled", "disabled")?;
        doc.clear_children(button)?;
        let spinner = doc.append_element(button, "span")?;
        doc.add_class(spinner, LOADING_CLASS)?;
        let text = doc.create_text(format!(" {label}"));
        doc.append_child(button, text)?;
        Ok(())
    }
}
