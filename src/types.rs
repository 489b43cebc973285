//! This module contains the shared command and input types.

use std::sync::mpsc;

/// Identifier correlating a transmitted command with its acknowledgment.
///
/// Assigned by the transceiver at send time, starting at 0 and increasing
/// monotonically for the lifetime of the connection. Never reused.
pub type CommandId = u32;

/// Acknowledgment token passed through from the transceiver's response
/// frame.
///
/// The dispatcher hands it to completions without interpreting it; what the
/// byte means is between the read loop that produced it and the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response(u8);

impl Response {
    /// Wrap the raw response byte reported by the read loop.
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// The raw response byte.
    pub fn raw(self) -> u8 {
        self.0
    }
}

/// Delivered on a command's completion channel once the transceiver has
/// acknowledged the transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// The identifier the originating send call returned.
    pub command_id: CommandId,
    /// The acknowledgment token, passed through untouched.
    pub response: Response,
}

/// Sending half of a completion channel.
///
/// Clone one sender across many commands to receive their completions in
/// send order, or create a fresh channel per command to wait on each
/// individually.
pub type CompletionSender = mpsc::Sender<Completion>;

/// A caller-supplied device identifier: either delimited text such as
/// `"1/1"` or `"0xF09A/B/1"`, or the same fields as separate parts.
///
/// Both forms of the same identifier produce identical frames. Numeric
/// fields accept decimal text and `0x`-prefixed hex text.
#[derive(Debug, Clone, Copy)]
pub enum DeviceId<'a> {
    /// `/`-delimited identifier text.
    Text(&'a str),
    /// Identifier fields as separate parts.
    Parts(&'a [&'a str]),
}

impl<'a> From<&'a str> for DeviceId<'a> {
    fn from(text: &'a str) -> Self {
        DeviceId::Text(text)
    }
}

impl<'a> From<&'a [&'a str]> for DeviceId<'a> {
    fn from(parts: &'a [&'a str]) -> Self {
        DeviceId::Parts(parts)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for DeviceId<'a> {
    fn from(parts: &'a [&'a str; N]) -> Self {
        DeviceId::Parts(parts.as_slice())
    }
}

/// Raw fixed-code payload for the Lighting4 family.
///
/// The accepted input shapes mirror what PT2262 tooling tends to hand
/// around; all of them resolve to the same 3-byte big-endian quantity
/// before encoding.
#[derive(Debug, Clone, Copy)]
pub enum RawData<'a> {
    /// Numeric code, at most 24 bits.
    Value(u32),
    /// Decimal text or `0x`-prefixed hex text.
    Text(&'a str),
    /// 1-3 bytes, most significant first; shorter values are padded with
    /// leading zero bytes.
    Bytes(&'a [u8]),
}

impl From<u32> for RawData<'_> {
    fn from(value: u32) -> Self {
        RawData::Value(value)
    }
}

impl<'a> From<&'a str> for RawData<'a> {
    fn from(text: &'a str) -> Self {
        RawData::Text(text)
    }
}

impl<'a> From<&'a [u8]> for RawData<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        RawData::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for RawData<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        RawData::Bytes(bytes.as_slice())
    }
}

/// Pulse width for Lighting4 transmissions, in the same numeric forms as
/// [`RawData`]. Resolves to a 2-byte big-endian quantity.
#[derive(Debug, Clone, Copy)]
pub enum Pulse<'a> {
    /// Pulse width in microseconds.
    Value(u32),
    /// Decimal text or `0x`-prefixed hex text.
    Text(&'a str),
}

impl From<u32> for Pulse<'_> {
    fn from(value: u32) -> Self {
        Pulse::Value(value)
    }
}

impl<'a> From<&'a str> for Pulse<'a> {
    fn from(text: &'a str) -> Self {
        Pulse::Text(text)
    }
}
