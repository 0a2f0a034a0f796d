//! Forecast state — one explicit value owned by a single controller.
//!
//! Reducers consume the current state and return a new one with every derived
//! field (analysis output and fingerprint) recomputed together, so a state is
//! never observed with output from an older series or older settings.
//!
//! The forecast is anchored at the last historical timestamp and uses the
//! random mode named by `settings.seed`.

use tracing::debug;

use crate::data::{append_resampled, minimum_interval, should_append};
use crate::domain::PricePoint;
use crate::fingerprint::{fingerprint, Fingerprint};
use crate::pipeline::{analyze, AnalysisOutput};
use crate::settings::AnalysisSettings;
use crate::simulation::source_for;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastState {
    settings: AnalysisSettings,
    history: Vec<PricePoint>,
    output: Option<AnalysisOutput>,
    fingerprint: Option<Fingerprint>,
}

impl ForecastState {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn history(&self) -> &[PricePoint] {
        &self.history
    }

    /// `None` while the history is empty.
    pub fn output(&self) -> Option<&AnalysisOutput> {
        self.output.as_ref()
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    pub fn current_price(&self) -> Option<f64> {
        self.history.last().map(|p| p.price)
    }

    /// Replace the whole history.
    pub fn with_history(self, history: Vec<PricePoint>) -> Self {
        Self { history, ..self }.recompute()
    }

    /// Replace the settings.
    pub fn with_settings(self, settings: AnalysisSettings) -> Self {
        Self { settings, ..self }.recompute()
    }

    /// Add a live observation, honouring the sampling cadence for the
    /// current historical window. A point arriving too soon after the last one
    /// is ignored and the state is returned unchanged.
    pub fn append_point(self, point: PricePoint) -> Self {
        let interval = minimum_interval(self.settings.historical_window_seconds);
        if !should_append(&self.history, &point, interval) {
            debug!(timestamp = point.timestamp, interval, "point within cadence, skipped");
            return self;
        }
        let history = append_resampled(&self.history, point, interval);
        Self { history, ..self }.recompute()
    }

    fn recompute(self) -> Self {
        let Some(anchor) = self.history.last().map(|p| p.timestamp) else {
            return Self {
                output: None,
                fingerprint: None,
                ..self
            };
        };

        let mut rng = source_for(self.settings.seed);
        let fp = fingerprint(&self.history, &self.settings);
        let output = match analyze(&self.history, &self.settings, rng.as_mut(), anchor) {
            Ok(output) => Some(output),
            Err(e) => {
                debug!(error = %e, "analysis unavailable");
                None
            }
        };
        debug!(fingerprint = fp.short(), points = self.history.len(), "state recomputed");

        Self {
            output,
            fingerprint: Some(fp),
            ..self
        }
    }
}
