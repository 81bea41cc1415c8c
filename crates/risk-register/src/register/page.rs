use std::sync::Arc;
use tracing::info;

use super::client::RiskApi;
use super::preview::{PreviewRenderer, PreviewSynchronizer};
use super::stats::{StatsOutcome, StatsReporter};
use super::surface::{DisplaySurface, FormSurface, PageBindings};

/// What startup wired up for the current page.
pub struct PageSession<R> {
    pub stats: StatsOutcome,
    pub preview: PreviewSynchronizer<R>,
}

/// Runs once when the page is ready: loads the counters when the summary region is
/// present and attaches the preview when the form and container are present.
pub async fn init_page<A, P, R>(
    api: Arc<A>,
    bindings: PageBindings,
    renderer: R,
    page: &mut P,
) -> PageSession<R>
where
    A: RiskApi + ?Sized,
    P: FormSurface + DisplaySurface,
    R: PreviewRenderer,
{
    let reporter = StatsReporter::new(api, bindings.clone());
    let stats = reporter.report(page).await;

    let mut preview = PreviewSynchronizer::with_renderer(bindings, renderer);
    let attached = preview.attach(page);

    info!(?stats, preview_attached = attached, "page initialized");
    PageSession { stats, preview }
}
