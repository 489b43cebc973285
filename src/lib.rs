//! This crate provides a command bridge for RFXtrx433-class RF transceivers:
//! it turns semantic lighting commands ("switch on", "set dim level", "send
//! this raw code") into the exact binary frames the transceiver expects,
//! writes them over any interface which implements [`embedded_io::Write`],
//! and correlates the hardware's acknowledgments back to callers in send
//! order.
//!
//! Supported protocol families:
//! * Lighting3 - Ikea Koppla (system/channel addressing)
//! * Lighting4 - PT2262 and compatible fixed raw codes
//! * Lighting6 - Blyss and Cuveo rolling-code remotes
//!
//! Opening and configuring the serial port is left to the caller; wrap
//! whatever you have into [`embedded_io::Write`]. The transceiver's serial
//! port should be configured like so:
//! * Baud rate: 38400
//! * Data bits: 8
//! * Stop bits: 1
//! * Parity: None
//!
//! Incoming frames are not parsed here. A read loop owns the receive side
//! of the port and reports each transmitter response via
//! [`transceiver::Transceiver::acknowledge_next`], which resolves pending
//! commands oldest-first.

pub mod error;
pub mod lighting3;
pub mod lighting4;
pub mod lighting6;
pub mod sequence;
pub mod transceiver;
pub mod types;

mod address;
mod packet;

#[cfg(test)]
mod mock_serial;
