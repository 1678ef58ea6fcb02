//! Aligned label/weight series for external charting.
//!
//! The payload is stringly typed on purpose: consumers splice the `labels`
//! and `data` lines verbatim into their own chart configuration, so this
//! module owns the exact text shape and nothing else renders it.

use belief_fusion_core::{Belief, BeliefSystem};
use serde::Serialize;

/// Maximum number of weight series carried by one payload.
pub const REPORT_SERIES_MAX: usize = 6;

/// Chart payload: one label line and up to [`REPORT_SERIES_MAX`] data lines,
/// each aligned to the label line element by element.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ComparisonGraphData {
    /// `labels : ["a","b"]`
    pub labels: String,
    /// `data : [0.2,0.8]`, one entry per charted system
    pub data: Vec<String>,
}

impl ComparisonGraphData {
    /// Payload for one system over its own frame of discernment.
    pub fn single(system: &BeliefSystem) -> ComparisonGraphData {
        let mut frame_records: Vec<&Belief> = system
            .beliefs()
            .iter()
            .filter(|b| b.is_ordinary() && !b.label().is_empty())
            .collect();
        frame_records.sort_by(|a, b| a.record_key().cmp(&b.record_key()));

        let labels: Vec<&str> = frame_records.iter().map(|b| b.label()).collect();
        let weights: Vec<String> = frame_records
            .iter()
            .map(|b| format!("{}", b.weight))
            .collect();

        ComparisonGraphData {
            labels: label_line(&labels),
            data: vec![data_line(&weights)],
        }
    }

    /// Payload for two systems over their union frame. Elements one side
    /// lacks chart as 0.
    pub fn pair(a: &BeliefSystem, b: &BeliefSystem) -> ComparisonGraphData {
        let frame = a.combined_frame(b);
        ComparisonGraphData {
            labels: label_line(&frame),
            data: vec![series_line(a, &frame), series_line(b, &frame)],
        }
    }

    /// Payload for a batch of systems, capped at [`REPORT_SERIES_MAX`]
    /// series. The frame comes from the first two systems (or the first
    /// system's own frame when the batch has one entry); every series is
    /// aligned to it with 0 for missing elements.
    pub fn many(systems: &[BeliefSystem]) -> ComparisonGraphData {
        let frame: Vec<&str> = match systems {
            [] => Vec::new(),
            [only] => only.discernment_frame(),
            [first, second, ..] => first.combined_frame(second),
        };
        let data = systems
            .iter()
            .take(REPORT_SERIES_MAX)
            .map(|system| series_line(system, &frame))
            .collect();
        ComparisonGraphData {
            labels: label_line(&frame),
            data,
        }
    }
}

fn label_line(labels: &[&str]) -> String {
    let quoted: Vec<String> = labels.iter().map(|label| format!("\"{}\"", label)).collect();
    format!("labels : [{}]", quoted.join(","))
}

fn data_line(weights: &[String]) -> String {
    format!("data : [{}]", weights.join(","))
}

fn series_line(system: &BeliefSystem, frame: &[&str]) -> String {
    let weights: Vec<String> = frame
        .iter()
        .map(|label| format!("{}", system.weight_of(label)))
        .collect();
    data_line(&weights)
}
