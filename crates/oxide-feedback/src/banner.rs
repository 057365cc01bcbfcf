//! Page-level transient banners.
//!
//! At most one banner per [`BannerKind`] is shown at a time. Showing a
//! banner replaces the previous one of the same kind and schedules its own
//! dismissal; a dismissal timer only removes the banner it was scheduled
//! for, so a stale timer never takes down a newer banner. Replacing a
//! banner also cancels the old banner's timer and frees its nodes.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::scheduler::{Scheduler, Task, TimerId};

/// The two independent banner slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    /// Something needs the user's attention.
    Error,
    /// An action completed.
    Success,
}

impl BannerKind {
    /// Returns the CSS class naming this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for BannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the current banner of each kind.
#[derive(Debug)]
pub struct BannerManager {
    lifetime: Duration,
    current: HashMap<BannerKind, (NodeId, TimerId)>,
}

impl BannerManager {
    /// Creates a manager whose banners live for `lifetime`.
    #[must_use]
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            current: HashMap::new(),
        }
    }

    /// Returns the banner of `kind` currently shown, if any.
    #[must_use]
    pub fn current(&self, kind: BannerKind) -> Option<NodeId> {
        self.current.get(&kind).map(|(banner, _)| *banner)
    }

    /// Shows `message` as the banner of `kind`, first in `target`.
    ///
    /// Any banner of the same kind is removed first; the other kind is left
    /// alone. Returns the new banner element.
    ///
    /// # Errors
    ///
    /// Fails if `target` is not a live element.
    pub fn show(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        target: NodeId,
        kind: BannerKind,
        message: &str,
    ) -> Result<NodeId> {
        doc.element(target)?;
        if let Some((previous, timer)) = self.current.remove(&kind) {
            scheduler.cancel(timer);
            doc.delete(previous)?;
            debug!(%kind, banner = %previous, "replaced banner");
        }

        let banner = doc.create_element("div");
        doc.add_class(banner, "message")?;
        doc.add_class(banner, kind.as_str())?;
        doc.set_text(banner, message)?;
        doc.insert_first_child(target, banner)?;

        let timer = scheduler.schedule(self.lifetime, Task::DismissBanner { kind, banner });
        self.current.insert(kind, (banner, timer));
        info!(%kind, %banner, text = message, "showing banner");
        Ok(banner)
    }

    /// Dismisses `banner` if it is still the current banner of `kind`.
    ///
    /// Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Fails if the banner's nodes cannot be freed.
    pub fn expire(
        &mut self,
        doc: &mut Document,
        kind: BannerKind,
        banner: NodeId,
    ) -> Result<bool> {
        if self.current(kind) != Some(banner) {
            debug!(%kind, %banner, "ignoring stale banner timer");
            return Ok(false);
        }
        self.current.remove(&kind);
        doc.delete(banner)?;
        debug!(%kind, %banner, "banner expired");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Document, Scheduler, BannerManager, NodeId) {
        let mut doc = Document::new();
        let form = doc.append_element(doc.root(), "form").unwrap();
        doc.append_element(form, "input").unwrap();
        (
            doc,
            Scheduler::new(),
            BannerManager::new(Duration::from_secs(5)),
            form,
        )
    }

    fn banners(doc: &Document, kind: BannerKind) -> Vec<NodeId> {
        doc.find_all(doc.root(), |el| {
            el.has_class("message") && el.has_class(kind.as_str())
        })
        .unwrap()
    }

    #[test]
    fn test_banner_is_first_child() {
        let (mut doc, mut sched, mut banners_mgr, form) = setup();
        let banner = banners_mgr
            .show(&mut doc, &mut sched, form, BannerKind::Error, "Oops")
            .unwrap();
        assert_eq!(doc.children(form).unwrap()[0], banner);
        assert_eq!(doc.text_content(banner).unwrap(), "Oops");
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn test_same_kind_replaces() {
        let (mut doc, mut sched, mut mgr, form) = setup();
        mgr.show(&mut doc, &mut sched, form, BannerKind::Error, "m1")
            .unwrap();
        let second = mgr
            .show(&mut doc, &mut sched, form, BannerKind::Error, "m2")
            .unwrap();

        let shown = banners(&doc, BannerKind::Error);
        assert_eq!(shown, vec![second]);
        assert_eq!(doc.text_content(second).unwrap(), "m2");
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn test_replaced_banner_is_freed() {
        let (mut doc, mut sched, mut mgr, form) = setup();
        mgr.show(&mut doc, &mut sched, form, BannerKind::Error, "m0")
            .unwrap();
        let count = doc.node_count();

        let mut last = None;
        for round in 0..100 {
            let banner = mgr
                .show(&mut doc, &mut sched, form, BannerKind::Error, &format!("m{round}"))
                .unwrap();
            if let Some(previous) = last {
                assert!(doc.element(previous).is_err());
            }
            last = Some(banner);
        }
        assert_eq!(doc.node_count(), count);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn test_kinds_are_independent() {
        let (mut doc, mut sched, mut mgr, form) = setup();
        let error = mgr
            .show(&mut doc, &mut sched, form, BannerKind::Error, "bad")
            .unwrap();
        let success = mgr
            .show(&mut doc, &mut sched, form, BannerKind::Success, "good")
            .unwrap();

        assert!(doc.is_connected(error));
        assert!(doc.is_connected(success));
        assert_eq!(doc.children(form).unwrap()[0], success);
        assert_eq!(mgr.current(BannerKind::Error), Some(error));
    }

    #[test]
    fn test_stale_expiry_is_noop() {
        let (mut doc, mut sched, mut mgr, form) = setup();
        let first = mgr
            .show(&mut doc, &mut sched, form, BannerKind::Error, "m1")
            .unwrap();
        let second = mgr
            .show(&mut doc, &mut sched, form, BannerKind::Error, "m2")
            .unwrap();

        assert!(!mgr.expire(&mut doc, BannerKind::Error, first).unwrap());
        assert!(doc.is_connected(second));
        assert!(mgr.expire(&mut doc, BannerKind::Error, second).unwrap());
        assert!(!doc.is_connected(second));
        assert_eq!(mgr.current(BannerKind::Error), None);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BannerKind::Success).unwrap(),
            r#""success""#
        );
    }
}
