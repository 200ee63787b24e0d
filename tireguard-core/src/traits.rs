//! Seams between the core pipeline and the outside world
//!
//! Readings come in through a [`ReadingSource`]; alert batches go out
//! through an [`AlertSink`]. Neither side knows about the hardware or the
//! vehicle bus behind it.

use alloc::vec::Vec;

use crate::alerts::Alert;
use crate::pipeline::TickReadings;

/// Anything that can produce one tick of sensor readings at a time
pub trait ReadingSource {
    /// Readings for the next tick, or `None` once the source is exhausted
    fn next_tick(&mut self) -> Option<TickReadings>;
}

/// Receiver for alerts as they are raised
pub trait AlertSink {
    /// Deliver one tick's alerts; never called with an empty batch
    fn deliver(&mut self, alerts: &[Alert]);
}

impl AlertSink for Vec<Alert> {
    fn deliver(&mut self, alerts: &[Alert]) {
        self.extend_from_slice(alerts);
    }
}

impl<S: AlertSink + ?Sized> AlertSink for &mut S {
    fn deliver(&mut self, alerts: &[Alert]) {
        (**self).deliver(alerts);
    }
}

impl<S: ReadingSource + ?Sized> ReadingSource for &mut S {
    fn next_tick(&mut self) -> Option<TickReadings> {
        (**self).next_tick()
    }
}
