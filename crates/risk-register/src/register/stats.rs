use std::sync::Arc;
use tracing::{error, info, warn};

use super::aggregate::{aggregate, inconsistent_records, RiskCounts};
use super::client::RiskApi;
use super::surface::{DisplaySurface, PageBindings, RegionContent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsOutcome {
    /// The summary region is not on the page; nothing was requested.
    Skipped,
    Rendered(RiskCounts),
    /// Fetch or parse failed; the regions were left untouched.
    Failed,
}

/// Fills the dashboard counters from the full risk collection.
pub struct StatsReporter<A: ?Sized> {
    api: Arc<A>,
    bindings: PageBindings,
}

impl<A: RiskApi + ?Sized> StatsReporter<A> {
    pub fn new(api: Arc<A>, bindings: PageBindings) -> Self {
        Self { api, bindings }
    }

    pub async fn report<D>(&self, surface: &mut D) -> StatsOutcome
    where
        D: DisplaySurface + ?Sized,
    {
        if !surface.has_region(&self.bindings.total_region) {
            return StatsOutcome::Skipped;
        }

        let records = match self.api.list_risks().await {
            Ok(records) => records,
            Err(err) => {
                error!(error = %err, "error loading risk stats");
                return StatsOutcome::Failed;
            }
        };

        let inconsistent = inconsistent_records(&records);
        if !inconsistent.is_empty() {
            warn!(
                ids = ?inconsistent,
                "risk levels disagree with probability x impact; counting delivered levels"
            );
        }

        let counts = aggregate(&records);
        self.render(surface, &counts);
        info!(
            total = counts.total,
            critical = counts.critical,
            high = counts.high,
            "risk stats rendered"
        );

        StatsOutcome::Rendered(counts)
    }

    fn render<D>(&self, surface: &mut D, counts: &RiskCounts)
    where
        D: DisplaySurface + ?Sized,
    {
        let bindings = &self.bindings;
        let mut regions = vec![
            (bindings.total_region.as_str(), counts.total),
            (bindings.critical_region.as_str(), counts.critical),
            (bindings.high_region.as_str(), counts.high),
            (bindings.medium_region.as_str(), counts.medium),
        ];
        if let Some(low) = bindings.low_region.as_deref() {
            regions.push((low, counts.low));
        }

        for (region, value) in regions {
            if surface.has_region(region) {
                surface.write_region(region, RegionContent::Text(value.to_string()));
            }
        }
    }
}
