//! Semantic operations for the rolling-code ("Lighting6") family.

pub use crate::packet::Lighting6Subtype;

use crate::address::parse_remote;
use crate::error::Result;
use crate::packet::{Lighting6Command, encode_lighting6};
use crate::sequence::SequenceCounter;
use crate::transceiver::Transceiver;
use crate::types::{CommandId, CompletionSender, DeviceId};

/// Handler for Blyss and Cuveo remotes addressed as `"id/group/unit"`,
/// e.g. `"0xF09A/B/1"`.
///
/// Each handler owns the rolling sequence counter its frames carry, so
/// keep using the same instance for a given remote identity. Blyss
/// devices treat unit 0 as the whole group and get the dedicated group
/// on/off opcodes.
pub struct Lighting6 {
    subtype: Lighting6Subtype,
    sequence: SequenceCounter,
}

impl Lighting6 {
    pub fn new(subtype: Lighting6Subtype) -> Self {
        Self {
            subtype,
            sequence: SequenceCounter::new(subtype.sequence_modulus()),
        }
    }

    /// Switch a device (or, with unit 0 on Blyss, a whole group) on.
    pub fn switch_on<'a, S: embedded_io::Write>(
        &mut self,
        transceiver: &mut Transceiver<S>,
        device: impl Into<DeviceId<'a>>,
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        self.send_command(transceiver, &device.into(), true, done)
    }

    /// Switch a device (or, with unit 0 on Blyss, a whole group) off.
    pub fn switch_off<'a, S: embedded_io::Write>(
        &mut self,
        transceiver: &mut Transceiver<S>,
        device: impl Into<DeviceId<'a>>,
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        self.send_command(transceiver, &device.into(), false, done)
    }

    /// The rolling sequence counter carried in this handler's frames.
    pub fn sequence(&self) -> &SequenceCounter {
        &self.sequence
    }

    /// Mutable access to the counter, e.g. to resume a known session.
    pub fn sequence_mut(&mut self) -> &mut SequenceCounter {
        &mut self.sequence
    }

    fn send_command<S: embedded_io::Write>(
        &mut self,
        transceiver: &mut Transceiver<S>,
        device: &DeviceId<'_>,
        on: bool,
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        let address = parse_remote(self.subtype, device)?;
        let command = match (self.subtype, address.unit, on) {
            (Lighting6Subtype::Blyss, 0, true) => Lighting6Command::GroupOn,
            (Lighting6Subtype::Blyss, 0, false) => Lighting6Command::GroupOff,
            (_, _, true) => Lighting6Command::On,
            (_, _, false) => Lighting6Command::Off,
        };
        // A rejected command must not consume a sequence value, so the
        // counter only advances after validation.
        let sequence = self.sequence.advance();
        let frame = encode_lighting6(self.subtype, &address, command, sequence);
        transceiver.send(&frame, done)
    }
}
