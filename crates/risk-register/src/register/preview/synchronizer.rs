use tracing::{debug, trace};

use super::super::surface::{DisplaySurface, FormSurface, PageBindings};
use super::view::{HtmlPreviewRenderer, PreviewInput, PreviewRenderer, PreviewView};

/// An input event raised by a form element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub field: String,
}

impl InputEvent {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Attached { listeners: Vec<String> },
}

/// Keeps the preview container in step with the risk form.
///
/// Every input event recomputes synchronously; there is no debouncing, so the rendered
/// card always reflects the latest read of all three fields.
pub struct PreviewSynchronizer<R = HtmlPreviewRenderer> {
    bindings: PageBindings,
    renderer: R,
    state: SyncState,
    last_view: Option<PreviewView>,
}

impl PreviewSynchronizer<HtmlPreviewRenderer> {
    pub fn new(bindings: PageBindings) -> Self {
        Self::with_renderer(bindings, HtmlPreviewRenderer)
    }
}

impl<R: PreviewRenderer> PreviewSynchronizer<R> {
    pub fn with_renderer(bindings: PageBindings, renderer: R) -> Self {
        Self {
            bindings,
            renderer,
            state: SyncState::Idle,
            last_view: None,
        }
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, SyncState::Attached { .. })
    }

    pub fn last_view(&self) -> Option<&PreviewView> {
        self.last_view.as_ref()
    }

    /// Binds to every input in the form and renders once.
    ///
    /// Returns `false` without touching the page when either the form or the preview
    /// container is missing.
    pub fn attach<P>(&mut self, page: &mut P) -> bool
    where
        P: FormSurface + DisplaySurface,
    {
        if !page.has_form() || !page.has_region(&self.bindings.preview_region) {
            debug!(
                region = %self.bindings.preview_region,
                "preview target missing, synchronizer stays idle"
            );
            return false;
        }

        let listeners = page.input_names();
        debug!(listeners = listeners.len(), "preview synchronizer attached");
        self.state = SyncState::Attached { listeners };
        self.recompute(page);
        true
    }

    /// Handles an input event; returns the refreshed view when the event was bound.
    pub fn on_input<P>(&mut self, page: &mut P, event: &InputEvent) -> Option<&PreviewView>
    where
        P: FormSurface + DisplaySurface,
    {
        let bound = match &self.state {
            SyncState::Attached { listeners } => listeners.iter().any(|name| *name == event.field),
            SyncState::Idle => false,
        };
        if !bound {
            trace!(field = %event.field, "ignoring unbound input event");
            return None;
        }

        self.recompute(page);
        self.last_view.as_ref()
    }

    /// Reads the form, classifies, and writes the rendered card.
    pub fn recompute<P>(&mut self, page: &mut P) -> PreviewView
    where
        P: FormSurface + DisplaySurface,
    {
        let input = PreviewInput::from_fields(
            page.field_value(&self.bindings.title_field).as_deref(),
            page.field_value(&self.bindings.probability_field).as_deref(),
            page.field_value(&self.bindings.impact_field).as_deref(),
        );
        let view = PreviewView::build(&input);

        page.write_region(&self.bindings.preview_region, self.renderer.render(&view));
        trace!(score = view.score, level = %view.level, "preview refreshed");

        self.last_view = Some(view.clone());
        view
    }

    /// Drops all listeners, as happens when the page is left.
    pub fn detach(&mut self) {
        self.state = SyncState::Idle;
        self.last_view = None;
    }
}
