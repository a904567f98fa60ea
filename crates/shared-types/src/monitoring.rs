//! # Monitored Items
//!
//! The sampling engine owns monitored items; the address space only hears
//! about their creation, modification, deletion and mode changes.

use crate::services::ReadValueId;
use serde::{Deserialize, Serialize};

/// Monitoring mode of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MonitoringMode {
    /// Not sampled.
    Disabled,
    /// Sampled but not reported.
    Sampling,
    /// Sampled and reported.
    #[default]
    Reporting,
}

/// Common view over data and event items.
pub trait MonitoredItem: Send + Sync {
    /// Server-assigned item id.
    fn id(&self) -> u32;

    /// What the item monitors.
    fn read_value_id(&self) -> &ReadValueId;

    /// Current monitoring mode.
    fn monitoring_mode(&self) -> MonitoringMode;
}

/// An item monitoring an attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataItem {
    /// Server-assigned item id.
    pub id: u32,
    /// Monitored attribute.
    pub read_value_id: ReadValueId,
    /// Revised sampling interval in milliseconds.
    pub sampling_interval: f64,
    /// Revised queue size.
    pub queue_size: u32,
    /// Current monitoring mode.
    pub monitoring_mode: MonitoringMode,
}

impl DataItem {
    /// A reporting item with the given sampling interval.
    pub fn new(id: u32, read_value_id: ReadValueId, sampling_interval: f64) -> Self {
        Self {
            id,
            read_value_id,
            sampling_interval,
            queue_size: 1,
            monitoring_mode: MonitoringMode::Reporting,
        }
    }
}

impl MonitoredItem for DataItem {
    fn id(&self) -> u32 {
        self.id
    }

    fn read_value_id(&self) -> &ReadValueId {
        &self.read_value_id
    }

    fn monitoring_mode(&self) -> MonitoringMode {
        self.monitoring_mode
    }
}

/// An item subscribing to events of a notifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventItem {
    /// Server-assigned item id.
    pub id: u32,
    /// The notifier's EventNotifier attribute.
    pub read_value_id: ReadValueId,
    /// Revised queue size.
    pub queue_size: u32,
    /// Current monitoring mode.
    pub monitoring_mode: MonitoringMode,
}

impl EventItem {
    /// A reporting item on the given notifier.
    pub fn new(id: u32, read_value_id: ReadValueId) -> Self {
        Self {
            id,
            read_value_id,
            queue_size: 0,
            monitoring_mode: MonitoringMode::Reporting,
        }
    }
}

impl MonitoredItem for EventItem {
    fn id(&self) -> u32 {
        self.id
    }

    fn read_value_id(&self) -> &ReadValueId {
        &self.read_value_id
    }

    fn monitoring_mode(&self) -> MonitoringMode {
        self.monitoring_mode
    }
}
