//! Semantic operations for the system/channel ("Lighting3") family.

pub use crate::packet::{Lighting3Subtype, MAX_LEVEL};

use crate::address::parse_system_channel;
use crate::error::{Error, Result};
use crate::packet::{Lighting3Command, encode_lighting3};
use crate::transceiver::Transceiver;
use crate::types::{CommandId, CompletionSender, DeviceId};

/// Handler for Koppla-style devices addressed as `"system/channel"`, with
/// system codes 1-16 and channels 0-10 (channel 0 addresses the whole
/// system).
///
/// Every operation validates the identifier, assembles the frame, and
/// hands it to the transceiver; the returned [`CommandId`] matches the
/// completion delivered once the hardware acknowledges the transmission.
pub struct Lighting3 {
    subtype: Lighting3Subtype,
}

impl Lighting3 {
    pub fn new(subtype: Lighting3Subtype) -> Self {
        Self { subtype }
    }

    /// Switch a device (or a whole system, channel 0) on.
    pub fn switch_on<'a, S: embedded_io::Write>(
        &self,
        transceiver: &mut Transceiver<S>,
        device: impl Into<DeviceId<'a>>,
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        self.send_command(transceiver, &device.into(), Lighting3Command::SwitchOn, done)
    }

    /// Switch a device (or a whole system, channel 0) off.
    pub fn switch_off<'a, S: embedded_io::Write>(
        &self,
        transceiver: &mut Transceiver<S>,
        device: impl Into<DeviceId<'a>>,
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        self.send_command(transceiver, &device.into(), Lighting3Command::SwitchOff, done)
    }

    /// Step the dim level up. The optional room number is accepted for
    /// compatibility with multi-room remotes but does not alter the frame.
    pub fn increase_level<'a, S: embedded_io::Write>(
        &self,
        transceiver: &mut Transceiver<S>,
        device: impl Into<DeviceId<'a>>,
        _room: Option<u8>,
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        self.send_command(
            transceiver,
            &device.into(),
            Lighting3Command::IncreaseLevel,
            done,
        )
    }

    /// Step the dim level down. The optional room number is accepted for
    /// compatibility with multi-room remotes but does not alter the frame.
    pub fn decrease_level<'a, S: embedded_io::Write>(
        &self,
        transceiver: &mut Transceiver<S>,
        device: impl Into<DeviceId<'a>>,
        _room: Option<u8>,
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        self.send_command(
            transceiver,
            &device.into(),
            Lighting3Command::DecreaseLevel,
            done,
        )
    }

    /// Dim to a fixed level in `0..=10`.
    pub fn set_level<'a, S: embedded_io::Write>(
        &self,
        transceiver: &mut Transceiver<S>,
        device: impl Into<DeviceId<'a>>,
        level: u8,
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        if level > MAX_LEVEL {
            return Err(Error::InvalidLevel);
        }
        self.send_command(
            transceiver,
            &device.into(),
            Lighting3Command::SetLevel(level),
            done,
        )
    }

    /// Put the device into pairing mode.
    pub fn program<'a, S: embedded_io::Write>(
        &self,
        transceiver: &mut Transceiver<S>,
        device: impl Into<DeviceId<'a>>,
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        self.send_command(transceiver, &device.into(), Lighting3Command::Program, done)
    }

    fn send_command<S: embedded_io::Write>(
        &self,
        transceiver: &mut Transceiver<S>,
        device: &DeviceId<'_>,
        command: Lighting3Command,
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        let address = parse_system_channel(device)?;
        let frame = encode_lighting3(self.subtype, &address, command);
        transceiver.send(&frame, done)
    }
}
