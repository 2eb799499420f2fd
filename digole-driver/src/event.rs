//! Device state notification seam.
//!
//! Reconfiguring the display takes it through a not-active window:
//! [`configure`](crate::Digole::configure) reports inactive before the
//! first bus write and active once the setup sequence lands. Firmware
//! can hook this into its device event system; a configure that fails
//! leaves the inactive notification standing as the degraded-state
//! signal.

/// Sink for device state notifications
pub trait EventSink {
    /// Record whether the display is currently active
    fn device_state(&mut self, active: bool);
}

impl<E: EventSink + ?Sized> EventSink for &mut E {
    fn device_state(&mut self, active: bool) {
        E::device_state(self, active)
    }
}

/// Event sink that discards all notifications
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventSink for NoEvents {
    fn device_state(&mut self, _active: bool) {}
}
