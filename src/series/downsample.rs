// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Second pass: thin a bucket series down to a display budget.

use super::{round1, AggregatedPoint, Mean};
use crate::error::{GrassError, Result};

/// Collapse contiguous runs of points so at most `budget` remain
///
/// Runs are `ceil(len / budget)` points long (the last one may be shorter).
/// Each run becomes one point: the mean of its values, labelled after its
/// element at index `len / 2` (the upper of the two middles for even runs).
/// Series already within budget are returned unchanged.
pub fn downsample(points: &[AggregatedPoint], budget: usize) -> Result<Vec<AggregatedPoint>> {
    if budget == 0 {
        return Err(GrassError::InvalidPointBudget(budget));
    }
    if points.len() <= budget {
        return Ok(points.to_vec());
    }

    let run = (points.len() + budget - 1) / budget;
    debug!(
        "downsampling {} points to budget {} (runs of {})",
        points.len(),
        budget,
        run
    );

    Ok(points
        .chunks(run)
        .map(|chunk| {
            let mut mean = Mean::default();
            chunk.iter().for_each(|p| mean.add(p.value));
            let middle = &chunk[chunk.len() / 2];
            AggregatedPoint {
                value: round1(mean.value()),
                label: middle.label.clone(),
                display_label: middle.display_label.clone(),
            }
        })
        .collect())
}
