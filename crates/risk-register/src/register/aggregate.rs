use serde::Serialize;

use super::domain::{RiskId, RiskLevel, RiskRecord};

/// Per-level tallies over a collection of records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskCounts {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelShare {
    pub level: RiskLevel,
    pub count: usize,
    pub percentage: f64,
}

impl RiskCounts {
    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }

    fn bucket_mut(&mut self, level: RiskLevel) -> &mut usize {
        match level {
            RiskLevel::Low => &mut self.low,
            RiskLevel::Medium => &mut self.medium,
            RiskLevel::High => &mut self.high,
            RiskLevel::Critical => &mut self.critical,
        }
    }

    /// Most severe level first.
    pub fn breakdown(&self) -> Vec<LevelShare> {
        RiskLevel::ordered()
            .into_iter()
            .rev()
            .map(|level| {
                let count = self.count(level);
                let percentage = if self.total == 0 {
                    0.0
                } else {
                    count as f64 * 100.0 / self.total as f64
                };
                LevelShare {
                    level,
                    count,
                    percentage,
                }
            })
            .collect()
    }
}

/// Tallies records by their delivered level. The level is not recomputed.
pub fn aggregate<'a, I>(records: I) -> RiskCounts
where
    I: IntoIterator<Item = &'a RiskRecord>,
{
    records
        .into_iter()
        .fold(RiskCounts::default(), |mut counts, record| {
            counts.total += 1;
            *counts.bucket_mut(record.level()) += 1;
            counts
        })
}

/// Ids of records whose delivered level disagrees with their inputs.
pub fn inconsistent_records<'a, I>(records: I) -> Vec<RiskId>
where
    I: IntoIterator<Item = &'a RiskRecord>,
{
    records
        .into_iter()
        .filter(|record| !record.is_consistent())
        .map(|record| record.id)
        .collect()
}
