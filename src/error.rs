//! Our error types for transceiver commands.

use thiserror::Error;

pub type Result<T, I> = core::result::Result<T, Error<I>>;

/// Custom error type for transceiver communications and command validation.
///
/// Every validation failure is raised before the transport is touched: a
/// command that returns one of the `Invalid*` variants has written nothing
/// and holds no pending completion slot.
#[derive(Error, Debug)]
pub enum Error<I: embedded_io::Error> {
    #[error("Serial communication error")]
    SerialError(I),
    #[error("Device not connected")]
    NotConnected,
    #[error("Invalid subtype {0}")]
    InvalidSubtype(u8),
    #[error("Invalid deviceId format")]
    InvalidDeviceId,
    #[error("Invalid system code {0}")]
    InvalidSystemCode(u32),
    #[error("Invalid channel number {0}")]
    InvalidChannelNumber(u32),
    #[error("Invalid remote ID 0x{0:X}")]
    InvalidRemoteId(u32),
    #[error("Invalid group code '{0}'")]
    InvalidGroupCode(char),
    #[error("Invalid unit number {0}")]
    InvalidUnitNumber(u32),
    #[error("Invalid level: value must be in range 0-10")]
    InvalidLevel,
    #[error("Invalid data {0}")]
    InvalidData(u32),
    #[error("Invalid pulse width {0}")]
    InvalidPulseWidth(u32),
    #[error("Invalid data format")]
    InvalidDataFormat,
}
