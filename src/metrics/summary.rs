// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Per-graph and cross-graph metric summaries

use super::{CentralityReport, Metric};
use serde::Serialize;
use std::collections::BTreeMap;

/// Sum, mean and count of one metric over the users of a graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricSummary {
    /// Sum of all scores
    pub sum: f64,
    /// Mean score, zero for an empty graph
    pub mean: f64,
    /// Number of scored users
    pub count: usize,
}

impl MetricSummary {
    fn of<'a>(values: impl IntoIterator<Item = &'a f64>) -> Self {
        let (sum, count) = values
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        let mean = if count == 0 { 0.0 } else { sum / count as f64 };
        Self { sum, mean, count }
    }
}

/// Summary of every metric for one graph
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphSummary {
    /// Summaries keyed by metric
    pub metrics: BTreeMap<Metric, MetricSummary>,
}

impl GraphSummary {
    /// Summarize a centrality report
    #[must_use]
    pub fn from_report(report: &CentralityReport) -> Self {
        Self {
            metrics: Metric::ALL
                .into_iter()
                .map(|metric| (metric, MetricSummary::of(report.get(metric).values())))
                .collect(),
        }
    }

    /// Summary of one metric
    #[must_use]
    pub fn get(&self, metric: Metric) -> MetricSummary {
        self.metrics.get(&metric).copied().unwrap_or_default()
    }
}

/// Mean of each metric across several graphs, weighted by user count.
///
/// Computed as the sum of per-graph sums over the sum of per-graph counts,
/// so larger graphs weigh more. Metrics with no scored users average to zero.
#[must_use]
pub fn overall_means<'a, N: 'a>(
    summaries: impl IntoIterator<Item = &'a (N, GraphSummary)>,
) -> BTreeMap<Metric, f64> {
    let mut totals: BTreeMap<Metric, (f64, usize)> =
        Metric::ALL.into_iter().map(|m| (m, (0.0, 0))).collect();

    for (_, summary) in summaries {
        for (metric, (sum, count)) in &mut totals {
            let s = summary.get(*metric);
            *sum += s.sum;
            *count += s.count;
        }
    }

    totals
        .into_iter()
        .map(|(metric, (sum, count))| {
            let mean = if count == 0 { 0.0 } else { sum / count as f64 };
            (metric, mean)
        })
        .collect()
}
