//! Prediction events and their fixed label/color bindings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format;

/// Colors assigned to events in config order when the event carries no
/// explicit `color`. Cycles when there are more events than entries.
pub const DEFAULT_EVENT_COLORS: [&str; 4] = ["#d62728", "#9467bd", "#e377c2", "#bcbd22"];

/// A dated public call. The tracked claim is always "price will fall".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionEvent {
    pub date: NaiveDate,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
    /// Overrides the default color table for this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PredictionEvent {
    pub fn new(date: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            date,
            title: String::new(),
            label: label.into(),
            url: String::new(),
            color: None,
        }
    }
}

/// An event bound to its position, short tag, and color.
///
/// Everything downstream (annotation lines, banners, scorecard labels) reads
/// tag and color from here instead of branching on the event index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBinding {
    /// 1-based position in the config.
    pub ordinal: usize,
    pub event: PredictionEvent,
    pub tag: String,
    pub color: String,
}

/// Bind events in config order.
pub fn bind_events(events: &[PredictionEvent]) -> Vec<EventBinding> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let tag = if event.label.trim().is_empty() {
                format::short_date(event.date)
            } else {
                event.label.trim().to_string()
            };
            let color = event
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_EVENT_COLORS[i % DEFAULT_EVENT_COLORS.len()].to_string());
            EventBinding {
                ordinal: i + 1,
                event: event.clone(),
                tag,
                color,
            }
        })
        .collect()
}
