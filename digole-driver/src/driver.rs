//! Display lifecycle and operation surface.

use core::fmt;

use digole_protocol::{Command, EncodeError};
use heapless::String;

use crate::event::{EventSink, NoEvents};
use crate::transport::Transport;

/// Capacity of the bounded buffer [`Digole::print`] renders into
pub const FORMAT_LEN: usize = 32;

/// Bus parameters bound at identify time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Per-transaction timeout in milliseconds
    pub timeout_ms: u32,
}

impl BusConfig {
    /// Fast mode (400 kHz) with a 25 ms timeout, the parameters the
    /// display adapter supports
    pub const FAST: Self = Self {
        frequency: 400_000,
        timeout_ms: 25,
    };
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus error from the transport, propagated unchanged
    Transport(E),
    /// Command could not be encoded
    Encode(EncodeError),
    /// [`Digole::configure`] called before [`Digole::identify`]
    NotIdentified,
}

impl<E> From<EncodeError> for Error<E> {
    fn from(err: EncodeError) -> Self {
        Error::Encode(err)
    }
}

/// Handle for one Digole display
///
/// Owns its transport and state flags; create one instance per
/// physical display. Every operation takes `&mut self`, so shared use
/// needs an external mutex.
pub struct Digole<T, E = NoEvents> {
    transport: T,
    events: E,
    bus: BusConfig,
    identified: bool,
    configured: bool,
}

impl<T: Transport> Digole<T> {
    /// Create a driver that discards device state notifications
    pub fn new(transport: T) -> Self {
        Self::with_events(transport, NoEvents)
    }
}

impl<T: Transport, E: EventSink> Digole<T, E> {
    /// Create a driver with a device state notification sink
    pub fn with_events(transport: T, events: E) -> Self {
        Self {
            transport,
            events,
            bus: BusConfig::FAST,
            identified: false,
            configured: false,
        }
    }

    /// Bind the fixed bus parameters and mark the device identified
    ///
    /// The display adapter has no identification register, so nothing
    /// is probed; the device is assumed present on the bus.
    pub fn identify(&mut self) {
        self.bus = BusConfig::FAST;
        self.identified = true;
    }

    /// Whether [`identify`](Self::identify) has run
    pub fn is_identified(&self) -> bool {
        self.identified
    }

    /// Whether the last [`configure`](Self::configure) completed
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Bus parameters in effect
    pub fn bus_config(&self) -> BusConfig {
        self.bus
    }

    /// Send the fixed setup sequence (clear, cursor off, font 18,
    /// backlight on) and mark the device configured
    ///
    /// Reports the device inactive before the bus write and active
    /// once the sequence lands. On failure the configured flag stays
    /// clear and only the inactive notification has fired.
    pub fn configure(&mut self) -> Result<(), Error<T::Error>> {
        if !self.identified {
            return Err(Error::NotIdentified);
        }
        self.configured = false;
        self.events.device_state(false);
        self.send(Command::Configure)?;
        self.configured = true;
        self.events.device_state(true);
        Ok(())
    }

    /// Render a one-line human-readable device status into `w`
    pub fn report<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        writeln!(
            w,
            "digole: {}kHz timeout={}ms identified={} configured={}",
            self.bus.frequency / 1000,
            self.bus.timeout_ms,
            self.identified as u8,
            self.configured as u8,
        )
    }

    /// Clear the screen
    pub fn clear(&mut self) -> Result<(), Error<T::Error>> {
        self.send(Command::Clear)
    }

    /// Switch the backlight on or off
    pub fn backlight(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.send(Command::Backlight(on))
    }

    /// Show or hide the cursor
    pub fn cursor(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.send(Command::Cursor(on))
    }

    /// Select a device font
    pub fn set_font(&mut self, font: u8) -> Result<(), Error<T::Error>> {
        self.send(Command::Font(font))
    }

    /// Move the text cursor
    pub fn locate(&mut self, row: u16, col: u16) -> Result<(), Error<T::Error>> {
        self.send(Command::Position { row, col })
    }

    /// Draw a string at the current cursor position
    pub fn text(&mut self, text: &str) -> Result<(), Error<T::Error>> {
        self.send(Command::Text(text))
    }

    /// Move the cursor, then draw a string
    ///
    /// Two bus writes; a failure on the second leaves the cursor
    /// already moved.
    pub fn text_at(&mut self, row: u16, col: u16, text: &str) -> Result<(), Error<T::Error>> {
        self.send(Command::TextAt { row, col, text })
    }

    /// Render `args` into the bounded format buffer and draw the
    /// result at the current cursor position
    ///
    /// Output beyond [`FORMAT_LEN`] bytes is truncated.
    pub fn print(&mut self, args: fmt::Arguments<'_>) -> Result<(), Error<T::Error>> {
        let line = render(args);
        self.text(&line)
    }

    /// Move the cursor, then render and draw `args`
    pub fn print_at(
        &mut self,
        row: u16,
        col: u16,
        args: fmt::Arguments<'_>,
    ) -> Result<(), Error<T::Error>> {
        let line = render(args);
        self.text_at(row, col, &line)
    }

    /// Release the transport
    pub fn release(self) -> T {
        self.transport
    }

    /// Encode one command and issue its transport writes in order,
    /// stopping at the first failure.
    fn send(&mut self, command: Command<'_>) -> Result<(), Error<T::Error>> {
        for buf in command.encode()?.iter() {
            self.transport.write(buf).map_err(Error::Transport)?;
        }
        Ok(())
    }
}

/// Render format arguments into the bounded buffer, dropping whatever
/// does not fit. `heapless::String` rejects a whole piece that does
/// not fit, so the writer feeds it char by char to get sprintf-style
/// truncation instead.
fn render(args: fmt::Arguments<'_>) -> String<FORMAT_LEN> {
    struct Truncating<'a>(&'a mut String<FORMAT_LEN>);

    impl fmt::Write for Truncating<'_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for c in s.chars() {
                if self.0.push(c).is_err() {
                    break;
                }
            }
            Ok(())
        }
    }

    let mut line = String::new();
    let mut writer = Truncating(&mut line);
    let _ = fmt::Write::write_fmt(&mut writer, args);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use digole_protocol::CONFIG_SEQUENCE;
    use heapless::Vec;

    /// Records each successful write; optionally fails the write at a
    /// given index.
    #[derive(Default)]
    struct MockTransport {
        writes: Vec<Vec<u8, 80>, 8>,
        fail_on: Option<usize>,
    }

    impl MockTransport {
        fn failing_on(index: usize) -> Self {
            Self {
                fail_on: Some(index),
                ..Self::default()
            }
        }
    }

    impl Transport for MockTransport {
        type Error = ();

        fn write(&mut self, bytes: &[u8]) -> Result<(), ()> {
            if self.fail_on == Some(self.writes.len()) {
                return Err(());
            }
            let mut buf = Vec::new();
            buf.extend_from_slice(bytes).unwrap();
            self.writes.push(buf).unwrap();
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingEvents {
        states: Vec<bool, 8>,
    }

    impl EventSink for RecordingEvents {
        fn device_state(&mut self, active: bool) {
            self.states.push(active).unwrap();
        }
    }

    #[test]
    fn configure_before_identify_touches_nothing() {
        let mut transport = MockTransport::default();
        let mut events = RecordingEvents::default();
        let mut display = Digole::with_events(&mut transport, &mut events);

        assert_eq!(display.configure(), Err(Error::NotIdentified));
        assert!(!display.is_configured());
        drop(display);
        assert!(transport.writes.is_empty());
        assert!(events.states.is_empty());
    }

    #[test]
    fn configure_sends_the_sequence_and_reports_active() {
        let mut transport = MockTransport::default();
        let mut events = RecordingEvents::default();
        let mut display = Digole::with_events(&mut transport, &mut events);

        display.identify();
        assert!(display.is_identified());
        display.configure().unwrap();
        assert!(display.is_configured());
        drop(display);
        assert_eq!(transport.writes.len(), 1);
        assert_eq!(transport.writes[0].as_slice(), CONFIG_SEQUENCE);
        // inactive first, active exactly once
        assert_eq!(events.states.as_slice(), &[false, true]);
    }

    #[test]
    fn failed_configure_leaves_only_the_inactive_event() {
        let mut transport = MockTransport::failing_on(0);
        let mut events = RecordingEvents::default();
        let mut display = Digole::with_events(&mut transport, &mut events);

        display.identify();
        assert_eq!(display.configure(), Err(Error::Transport(())));
        assert!(!display.is_configured());
        drop(display);
        assert!(transport.writes.is_empty());
        assert_eq!(events.states.as_slice(), &[false]);
    }

    #[test]
    fn locate_then_text_issues_two_writes() {
        let mut transport = MockTransport::default();
        let mut display = Digole::new(&mut transport);

        display.locate(3, 7).unwrap();
        display.text("Hi").unwrap();
        drop(display);
        assert_eq!(transport.writes.len(), 2);
        assert_eq!(transport.writes[0].as_slice(), &[b'T', b'P', 3, 7]);
        assert_eq!(transport.writes[1].as_slice(), &[b'T', b'T', b'H', b'i', 0]);
    }

    #[test]
    fn set_font_is_a_single_write() {
        let mut transport = MockTransport::default();
        let mut display = Digole::new(&mut transport);

        display.set_font(18).unwrap();
        drop(display);
        assert_eq!(transport.writes.len(), 1);
        assert_eq!(transport.writes[0].as_slice(), &[b'S', b'F', 18]);
    }

    #[test]
    fn text_at_aborts_after_a_failed_position_write() {
        let mut transport = MockTransport::failing_on(1);
        let mut display = Digole::new(&mut transport);

        assert_eq!(display.text_at(3, 7, "Hi"), Err(Error::Transport(())));
        drop(display);
        // the position write landed, the text write did not
        assert_eq!(transport.writes.len(), 1);
        assert_eq!(transport.writes[0].as_slice(), &[b'T', b'P', 3, 7]);
    }

    #[test]
    fn out_of_range_position_is_rejected_before_the_bus() {
        let mut transport = MockTransport::default();
        let mut display = Digole::new(&mut transport);

        assert_eq!(
            display.locate(600, 0),
            Err(Error::Encode(EncodeError::ValueOutOfRange(600)))
        );
        drop(display);
        assert!(transport.writes.is_empty());
    }

    #[test]
    fn print_truncates_at_the_format_cap() {
        let mut transport = MockTransport::default();
        let mut display = Digole::new(&mut transport);

        display
            .print(format_args!("{}", "0123456789012345678901234567890123456789"))
            .unwrap();
        drop(display);
        assert_eq!(transport.writes.len(), 1);
        let buf = &transport.writes[0];
        // TT + 32 payload bytes + NUL
        assert_eq!(buf.len(), 2 + FORMAT_LEN + 1);
        assert_eq!(&buf[..2], b"TT");
        assert_eq!(&buf[2..2 + FORMAT_LEN], "01234567890123456789012345678901".as_bytes());
        assert_eq!(buf[buf.len() - 1], 0);
    }

    #[test]
    fn print_at_positions_then_draws() {
        let mut transport = MockTransport::default();
        let mut display = Digole::new(&mut transport);

        display.print_at(1, 300, format_args!("t={}C", 42)).unwrap();
        drop(display);
        assert_eq!(transport.writes.len(), 2);
        assert_eq!(transport.writes[0].as_slice(), &[b'T', b'P', 1, 255, 45]);
        assert_eq!(
            transport.writes[1].as_slice(),
            &[b'T', b'T', b't', b'=', b'4', b'2', b'C', 0]
        );
    }

    #[test]
    fn report_renders_the_device_status() {
        let mut transport = MockTransport::default();
        let mut display = Digole::new(&mut transport);
        display.identify();

        let mut out: String<80> = String::new();
        display.report(&mut out).unwrap();
        assert_eq!(
            out.as_str(),
            "digole: 400kHz timeout=25ms identified=1 configured=0\n"
        );
    }
}
