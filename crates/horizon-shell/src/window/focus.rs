//! Focus coordination between the shell chrome and the hosted content.
//!
//! The shell owns a single focus proxy element. The toolkit reports focus
//! changes on that proxy; the coordinator forwards them to whatever content
//! view is currently swallowed into it.
//!
//! Having no content is a normal state: focus events are then absorbed by the
//! proxy and nothing is forwarded.

use super::toolkit::{ContentHandle, FocusTarget, Toolkit};
use horizon_shell_core::logging::targets;

/// Which element currently owns input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusOwner {
    /// The shell chrome (the focus proxy itself).
    #[default]
    Shell,
    /// The hosted content view.
    Content,
}

/// Tracks the hosted content and routes focus to it.
///
/// The coordinator holds a non-owning [`ContentHandle`]. It never disposes of
/// content: [`set_content`](Self::set_content) returns the handle it replaced
/// so the owner can dispose of it.
#[derive(Debug, Default)]
pub struct FocusCoordinator {
    content: Option<ContentHandle>,
    owner: FocusOwner,
}

impl FocusCoordinator {
    /// Create a coordinator with no content and the shell owning focus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content handle.
    #[inline]
    pub fn content(&self) -> Option<ContentHandle> {
        self.content
    }

    /// Get the element that currently owns focus.
    #[inline]
    pub fn owner(&self) -> FocusOwner {
        self.owner
    }

    /// Replace the displayed content.
    ///
    /// Focus returns to the shell until the toolkit reports the proxy focused,
    /// which [`on_focus_changed`](Self::on_focus_changed) then forwards to the
    /// new content.
    ///
    /// Returns the previous handle, now detached and unmanaged, and the
    /// directive that shows the new content.
    pub fn set_content(
        &mut self,
        content: Option<ContentHandle>,
    ) -> (Option<ContentHandle>, FocusDirective) {
        let previous = std::mem::replace(&mut self.content, content);
        self.owner = FocusOwner::Shell;
        tracing::debug!(
            target: targets::FOCUS,
            content = ?content.map(ContentHandle::as_raw),
            previous = ?previous.map(ContentHandle::as_raw),
            "content replaced"
        );
        (previous, FocusDirective::Attach(content))
    }

    /// Handle a focus change on the focus proxy.
    ///
    /// With content set, returns the directive forwarding the change to it.
    /// Without content the change is absorbed.
    pub fn on_focus_changed(&mut self, got_focus: bool) -> Option<FocusDirective> {
        let Some(content) = self.content else {
            tracing::trace!(target: targets::FOCUS, got_focus, "no content, focus change absorbed");
            self.owner = FocusOwner::Shell;
            return None;
        };

        self.owner = if got_focus {
            FocusOwner::Content
        } else {
            FocusOwner::Shell
        };
        tracing::trace!(target: targets::FOCUS, got_focus, content = content.as_raw(), "focus forwarded");
        Some(FocusDirective::Forward(content, got_focus))
    }
}

/// Toolkit calls decided by a [`FocusCoordinator`].
///
/// The coordinator only records state. Its caller applies the directive once
/// the coordinator is no longer borrowed, because a toolkit may report the
/// resulting focus change back synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirective {
    /// Swallow the content into the focus proxy (or only unset it, for
    /// `None`) and focus the proxy.
    Attach(Option<ContentHandle>),
    /// Give or take focus on the content.
    Forward(ContentHandle, bool),
}

impl FocusDirective {
    /// Issue the directive to `toolkit`.
    pub fn apply(self, toolkit: &dyn Toolkit) {
        match self {
            FocusDirective::Attach(content) => {
                toolkit.attach_content(content);
                toolkit.set_focus(FocusTarget::FocusProxy, true);
            }
            FocusDirective::Forward(content, got_focus) => {
                toolkit.set_focus(FocusTarget::Content(content), got_focus);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::headless::{Directive, HeadlessToolkit};

    #[test]
    fn test_set_content_focuses_proxy() {
        let toolkit = HeadlessToolkit::new();
        let mut focus = FocusCoordinator::new();
        let content = ContentHandle::from_raw(7);

        let (previous, directive) = focus.set_content(Some(content));
        assert_eq!(previous, None);
        assert_eq!(focus.content(), Some(content));
        assert_eq!(focus.owner(), FocusOwner::Shell);

        directive.apply(&toolkit);
        assert_eq!(
            toolkit.take_directives(),
            vec![
                Directive::AttachContent(Some(content)),
                Directive::SetFocus(FocusTarget::FocusProxy, true),
            ]
        );
    }

    #[test]
    fn test_replacing_content_returns_previous() {
        let mut focus = FocusCoordinator::new();
        let first = ContentHandle::from_raw(1);
        let second = ContentHandle::from_raw(2);

        focus.set_content(Some(first));
        assert_eq!(focus.set_content(Some(second)).0, Some(first));
        assert_eq!(
            focus.set_content(None),
            (Some(second), FocusDirective::Attach(None))
        );
        assert_eq!(focus.content(), None);
    }

    #[test]
    fn test_focus_forwarded_to_content() {
        let toolkit = HeadlessToolkit::new();
        let mut focus = FocusCoordinator::new();
        let content = ContentHandle::from_raw(3);
        focus.set_content(Some(content));

        let gained = focus.on_focus_changed(true);
        assert_eq!(gained, Some(FocusDirective::Forward(content, true)));
        assert_eq!(focus.owner(), FocusOwner::Content);
        let lost = focus.on_focus_changed(false);
        assert_eq!(focus.owner(), FocusOwner::Shell);

        for directive in [gained, lost].into_iter().flatten() {
            directive.apply(&toolkit);
        }
        assert_eq!(
            toolkit.take_directives(),
            vec![
                Directive::SetFocus(FocusTarget::Content(content), true),
                Directive::SetFocus(FocusTarget::Content(content), false),
            ]
        );
    }

    #[test]
    fn test_focus_without_content_is_noop() {
        let mut focus = FocusCoordinator::new();
        focus.set_content(None);

        assert_eq!(focus.on_focus_changed(true), None);
        assert_eq!(focus.owner(), FocusOwner::Shell);
    }

    #[test]
    fn test_focus_gain_after_replace_keeps_content_owner() {
        let mut focus = FocusCoordinator::new();
        focus.set_content(Some(ContentHandle::from_raw(1)));
        focus.on_focus_changed(true);

        // Replacing content hands focus back to the shell until the proxy
        // reports focus again.
        focus.set_content(Some(ContentHandle::from_raw(2)));
        assert_eq!(focus.owner(), FocusOwner::Shell);
        focus.on_focus_changed(true);
        assert_eq!(focus.owner(), FocusOwner::Content);
    }
}
