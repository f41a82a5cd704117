use super::access_table::AccessTable;
use super::checker::{CoverageChecker, CoverageResult};
use super::state::Trajectory;
use crate::error::{ConfigError, CoverageError};
use crate::fov::SensorView;
use crate::instrument::ViewMode;
use crate::{error, info, warn};
use rayon::prelude::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Coverage evaluation of a full trajectory.
///
/// Timesteps are independent and are evaluated on the rayon pool when the settings ask
/// for it. Cancellation is checked before each timestep. A cancelled run returns an error
/// instead of a partial table.
#[derive(Clone)]
pub struct CoverageRun {
    checker: CoverageChecker,
    c_tok: CancellationToken,
}

impl CoverageRun {
    pub fn new(checker: CoverageChecker) -> Self { Self { checker, c_tok: CancellationToken::new() } }

    /// Uses an externally owned cancellation token.
    pub fn with_cancellation(checker: CoverageChecker, c_tok: CancellationToken) -> Self {
        Self { checker, c_tok }
    }

    pub fn checker(&self) -> &CoverageChecker { &self.checker }

    /// Token cancelling this run, and every run sharing it.
    pub fn cancellation_token(&self) -> CancellationToken { self.c_tok.clone() }

    /// Evaluates every timestep of `trajectory` for the spacecraft's views in `mode`.
    ///
    /// # Returns
    /// The complete access table, or a `CoverageError` for an invalid view configuration
    /// or a cancelled run.
    pub fn run(
        &self,
        trajectory: &Trajectory,
        mode: ViewMode,
    ) -> Result<AccessTable, CoverageError> {
        let views = self.checker.spacecraft().views(mode)?;
        info!(
            "Starting {mode} coverage over {} timesteps and {} points",
            trajectory.len(),
            self.checker.points().size()
        );
        let tables = self.run_views(trajectory, std::slice::from_ref(&views))?;
        let table = tables.into_iter().next().unwrap_or_default();
        info!(
            "Finished {mode} coverage: {} access rows, {} skipped timesteps",
            table.len(),
            table.skipped_timesteps().len()
        );
        Ok(table)
    }

    /// Evaluates every timestep once per pointing option of the instrument.
    ///
    /// The frame chain of a timestep is built once and shared by all options.
    ///
    /// # Returns
    /// One access table per pointing option, in option order.
    pub fn run_pointing_options(
        &self,
        trajectory: &Trajectory,
    ) -> Result<Vec<AccessTable>, CoverageError> {
        let options = self
            .checker
            .spacecraft()
            .instrument()
            .ok_or(ConfigError::MissingViewMode { what: "instrument" })?
            .pointing_option_views()?;
        info!(
            "Starting pointing option coverage for {} options over {} timesteps",
            options.len(),
            trajectory.len()
        );
        let tables = self.run_views(trajectory, &options)?;
        info!(
            "Finished pointing option coverage: {} access rows in total",
            tables.iter().map(AccessTable::len).sum::<usize>()
        );
        Ok(tables)
    }

    /// Runs [`CoverageRun::run`] on the tokio blocking pool.
    pub async fn run_async(
        self: Arc<Self>,
        trajectory: Arc<Trajectory>,
        mode: ViewMode,
    ) -> Result<AccessTable, CoverageError> {
        tokio::task::spawn_blocking(move || self.run(&trajectory, mode))
            .await
            .map_err(|e| {
                error!("Coverage worker did not finish: {e}");
                CoverageError::WorkerFailed { reason: e.to_string() }
            })?
    }

    /// Evaluates all timesteps for each view set, one table per view set.
    fn run_views(
        &self,
        trajectory: &Trajectory,
        view_sets: &[Vec<SensorView>],
    ) -> Result<Vec<AccessTable>, CoverageError> {
        let evaluate = |position: usize| -> Option<Vec<CoverageResult>> {
            if self.c_tok.is_cancelled() {
                return None;
            }
            let state = &trajectory.states()[position];
            let jd = trajectory.julian_date(state);
            let results = match self.checker.prepare(state, jd) {
                Ok(geometry) => view_sets
                    .iter()
                    .map(|views| self.checker.evaluate(state, jd, views, Some(&geometry)))
                    .collect(),
                Err(err) => {
                    warn!("Skipping timestep {}: {err}", state.time_index());
                    view_sets.iter().map(|_| CoverageResult::skipped(state.time_index())).collect()
                }
            };
            Some(results)
        };

        let per_timestep: Vec<Option<Vec<CoverageResult>>> = if self.checker.settings().parallel {
            (0..trajectory.len()).into_par_iter().map(evaluate).collect()
        } else {
            (0..trajectory.len()).map(evaluate).collect()
        };

        let completed = per_timestep.iter().take_while(|r| r.is_some()).count();
        if completed < per_timestep.len() {
            warn!("Coverage run cancelled after {completed} of {} timesteps", per_timestep.len());
            return Err(CoverageError::Cancelled { completed });
        }

        let mut tables = vec![AccessTable::new(); view_sets.len()];
        for results in per_timestep.into_iter().flatten() {
            for (table, result) in tables.iter_mut().zip(results) {
                table.push_result(result);
            }
        }
        Ok(tables)
    }
}
