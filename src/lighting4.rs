//! Semantic operations for the raw-code ("Lighting4") family.

pub use crate::packet::{DEFAULT_PULSE_WIDTH, Lighting4Subtype};

use crate::address::{resolve_data, resolve_pulse};
use crate::error::Result;
use crate::packet::encode_lighting4;
use crate::transceiver::Transceiver;
use crate::types::{CommandId, CompletionSender, Pulse, RawData};

/// Handler for PT2262-style fixed-code transmitters.
///
/// There is no addressing scheme here: whatever 24-bit code the caller
/// supplies goes on the air verbatim, which is how these chips encode
/// device, button, and state in one lump.
pub struct Lighting4 {
    subtype: Lighting4Subtype,
}

impl Lighting4 {
    pub fn new(subtype: Lighting4Subtype) -> Self {
        Self { subtype }
    }

    /// Transmit a raw code.
    ///
    /// `data` may be a number, decimal or hex text, or up to 3 raw bytes;
    /// see [`RawData`]. When `pulse` is `None` the transmission uses
    /// [`DEFAULT_PULSE_WIDTH`].
    pub fn send_data<'a, S: embedded_io::Write>(
        &self,
        transceiver: &mut Transceiver<S>,
        data: impl Into<RawData<'a>>,
        pulse: Option<Pulse<'a>>,
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        let data = resolve_data(&data.into())?;
        let pulse = resolve_pulse(pulse.as_ref())?;
        let frame = encode_lighting4(self.subtype, data, pulse);
        transceiver.send(&frame, done)
    }
}
