//! Inline field feedback and the password strength meter.

use std::collections::HashMap;

use oxide_forms::{StrengthLevel, ValidationResult};
use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::error::{FeedbackError, Result};

/// Class marking a field as invalid.
pub const ERROR_CLASS: &str = "error";
/// Class of an inline error annotation.
pub const ANNOTATION_CLASS: &str = "error-message";

/// Attaches and removes the inline error annotation of each field.
///
/// Each field owns at most one annotation. The association is tracked
/// here rather than rediscovered from the tree, so two fields sharing a
/// parent never clear each other's annotation.
#[derive(Debug, Default)]
pub struct FeedbackRenderer {
    annotations: HashMap<NodeId, NodeId>,
}

impl FeedbackRenderer {
    /// Creates a renderer with no annotations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the annotation currently attached to `field`.
    #[must_use]
    pub fn annotation_for(&self, field: NodeId) -> Option<NodeId> {
        self.annotations.get(&field).copied()
    }

    /// Shows or clears the feedback of `field` according to `result`.
    ///
    /// Invalid results replace any existing annotation with a new one
    /// showing the message, appended to the field's parent.
    ///
    /// # Errors
    ///
    /// Fails with [`FeedbackError::Detached`] when an invalid field has no
    /// parent to hold the annotation.
    pub fn apply_field_feedback(
        &mut self,
        doc: &mut Document,
        field: NodeId,
        result: &ValidationResult,
    ) -> Result<()> {
        self.clear_field_feedback(doc, field)?;
        if result.is_valid() {
            return Ok(());
        }

        let parent = doc.parent(field)?.ok_or(FeedbackError::Detached(field))?;
        doc.add_class(field, ERROR_CLASS)?;

        let annotation = doc.create_element("div");
        doc.add_class(annotation, ANNOTATION_CLASS)?;
        doc.set_style(annotation, "display", "block")?;
        doc.set_text(annotation, result.message())?;
        doc.append_child(parent, annotation)?;

        debug!(%field, %annotation, text = result.message(), "annotated field");
        self.annotations.insert(field, annotation);
        Ok(())
    }

    /// Removes the annotation and error marker of `field`, if any. The
    /// annotation is freed, not just detached.
    ///
    /// # Errors
    ///
    /// Fails if `field` is not a live element.
    pub fn clear_field_feedback(&mut self, doc: &mut Document, field: NodeId) -> Result<()> {
        doc.remove_class(field, ERROR_CLASS)?;
        if let Some(annotation) = self.annotations.remove(&field) {
            doc.delete(annotation)?;
        }
        Ok(())
    }
}

/// The strength meter attached below a password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthMeter {
    root: NodeId,
    fill: NodeId,
    label: NodeId,
}

impl StrengthMeter {
    /// Builds the meter and appends it to the parent of `password_field`:
    ///
    /// ```text
    /// div.password-strength
    ///   div.strength-bar
    ///     div.strength-fill
    ///   div.strength-text
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`FeedbackError::Detached`] when the field has no parent.
    pub fn attach(doc: &mut Document, password_field: NodeId) -> Result<Self> {
        let parent = doc
            .parent(password_field)?
            .ok_or(FeedbackError::Detached(password_field))?;

        let root = doc.create_element("div");
        doc.add_class(root, "password-strength")?;
        let bar = doc.append_element(root, "div")?;
        doc.add_class(bar, "strength-bar")?;
        let fill = doc.append_element(bar, "div")?;
        doc.add_class(fill, "strength-fill")?;
        let label = doc.append_element(root, "div")?;
        doc.add_class(label, "strength-text")?;
        doc.append_child(parent, root)?;

        Ok(Self { root, fill, label })
    }

    /// Returns the meter's outer element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the fill bar element.
    #[must_use]
    pub const fn fill(&self) -> NodeId {
        self.fill
    }

    /// Returns the label element.
    #[must_use]
    pub const fn label(&self) -> NodeId {
        self.label
    }

    /// Draws `level`, overwriting whatever was drawn before. The label's
    /// text node is rewritten in place.
    ///
    /// # Errors
    ///
    /// Fails if the meter's nodes were removed from `doc`.
    pub fn render(&self, doc: &mut Document, level: StrengthLevel) -> Result<()> {
        let style = level.style();
        doc.set_style(self.fill, "width", format!("{}%", style.fill_percentage))?;
        doc.set_style(self.fill, "background-color", style.color)?;
        doc.set_text(self.label, style.label)?;
        doc.set_style(self.label, "color", style.color)?;
        Ok(())
    }
}
