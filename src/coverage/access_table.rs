use super::checker::{AccessGeometry, CoverageResult};
use itertools::Itertools;

/// A single `(time index, point index)` access.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRow {
    pub time_index: usize,
    pub point: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<AccessGeometry>,
}

/// Maximal run of consecutive time indices during which a point is accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct AccessInterval {
    pub point: usize,
    /// First time index of the run.
    pub start: usize,
    /// Last time index of the run, inclusive.
    pub end: usize,
}

/// Sparse "who is visible when" table of a coverage run.
///
/// Rows are ordered by time index, then by point index. A timestep without visible points
/// contributes no rows.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct AccessTable {
    rows: Vec<AccessRow>,
    /// Time indices that were skipped because their frame was undefined.
    skipped: Vec<usize>,
    /// Number of evaluated timesteps, skipped ones included.
    timesteps: usize,
}

impl AccessTable {
    pub fn new() -> Self { Self::default() }

    /// Appends the result of the next timestep.
    ///
    /// Results must arrive in increasing time index order.
    pub fn push_result(&mut self, result: CoverageResult) {
        let (time_index, indices, geometry, skipped) = result.into_parts();
        debug_assert!(self.rows.last().is_none_or(|r| r.time_index < time_index));
        self.timesteps += 1;
        if skipped {
            self.skipped.push(time_index);
        }
        let mut geometry = geometry.into_iter();
        self.rows.extend(indices.into_iter().map(|point| AccessRow {
            time_index,
            point,
            geometry: geometry.next(),
        }));
    }

    pub fn rows(&self) -> &[AccessRow] { &self.rows }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn timesteps(&self) -> usize { self.timesteps }

    pub fn skipped_timesteps(&self) -> &[usize] { &self.skipped }

    /// Points accessed at `time_index`, ascending.
    pub fn points_at(&self, time_index: usize) -> Vec<usize> {
        let start = self.rows.partition_point(|r| r.time_index < time_index);
        self.rows[start..].iter().take_while(|r| r.time_index == time_index).map(|r| r.point).collect()
    }

    /// Number of accessed timesteps per point, for points `0..point_count`.
    pub fn access_counts(&self, point_count: usize) -> Vec<usize> {
        let mut counts = vec![0; point_count];
        for row in &self.rows {
            if let Some(count) = counts.get_mut(row.point) {
                *count += 1;
            }
        }
        counts
    }

    /// Access intervals of all points, ordered by point and then start time.
    pub fn intervals(&self) -> Vec<AccessInterval> {
        let by_point = self
            .rows
            .iter()
            .map(|r| (r.point, r.time_index))
            .sorted_unstable()
            .chunk_by(|(point, _)| *point);
        by_point
            .into_iter()
            .flat_map(|(point, times)| {
                times
                    .map(|(_, t)| (t, t))
                    .coalesce(|(start, end), (s, e)| {
                        if s == end + 1 { Ok((start, e)) } else { Err(((start, end), (s, e))) }
                    })
                    .map(|(start, end)| AccessInterval { point, start, end })
                    .collect_vec()
            })
            .collect()
    }
}
