//! Live preview of a risk form.

mod synchronizer;
mod view;

pub use synchronizer::{InputEvent, PreviewSynchronizer, SyncState};
pub use view::{
    HtmlPreviewRenderer, PreviewInput, PreviewRenderer, PreviewView, TextPreviewRenderer,
    DEFAULT_FIELD_VALUE,
};
