use log::info;

/// A results visualizer receiving one cumulative reward curve per agent
///
/// Implementations only read the curves; a comparison run behaves identically without one.
pub trait RewardPlot {
    /// Add the curve of cumulative reward after each pull for the agent named `label`
    fn plot(&mut self, label: &str, cumulative_rewards: &[f64]);

    /// Called once every agent of a comparison has been plotted
    fn finish(&mut self) {}
}

/// A labelled cumulative reward curve
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<f64>,
}

/// Collects the plotted curves in memory, for rendering elsewhere
#[derive(Debug, Clone, Default)]
pub struct SeriesRecorder {
    series: Vec<Series>,
}

impl SeriesRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn into_series(self) -> Vec<Series> {
        self.series
    }
}

impl RewardPlot for SeriesRecorder {
    fn plot(&mut self, label: &str, cumulative_rewards: &[f64]) {
        self.series.push(Series {
            label: label.to_owned(),
            points: cumulative_rewards.to_vec(),
        });
    }
}

/// Logs the final total of each curve
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPlot;

impl RewardPlot for LogPlot {
    fn plot(&mut self, label: &str, cumulative_rewards: &[f64]) {
        let total = cumulative_rewards.last().copied().unwrap_or_default();
        info!(
            "{label}: total reward {total:.3} over {} iterations",
            cumulative_rewards.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_curves_in_order() {
        let mut recorder = SeriesRecorder::new();
        recorder.plot("a", &[1.0, 2.0]);
        recorder.plot("b", &[]);
        recorder.finish();

        let series = recorder.into_series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "a");
        assert_eq!(series[0].points, vec![1.0, 2.0]);
        assert!(series[1].points.is_empty());
    }
}
