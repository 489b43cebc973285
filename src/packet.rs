//! Frame assembly for each protocol family.
//!
//! Every family+subtype pair has a fixed frame length and a fixed header
//! (length byte, packet type, subtype, reserved zero byte); the tables
//! below are the single source of truth for those constants. Encoding is
//! pure: the functions here only read the already-validated fields they
//! are given.

use modular_bitfield::prelude::*;
use strum_macros::EnumIter;

use crate::address::{RemoteAddress, SystemChannel};
use crate::error::{Error, Result};

/// Packet type byte for the system/channel (Koppla) family.
const PACKET_TYPE_LIGHTING3: u8 = 0x12;
/// Packet type byte for the raw-code (PT2262) family.
const PACKET_TYPE_LIGHTING4: u8 = 0x13;
/// Packet type byte for the rolling-code (Blyss/Cuveo) family.
const PACKET_TYPE_LIGHTING6: u8 = 0x15;

pub(crate) const LIGHTING3_FRAME_LEN: usize = 9;
pub(crate) const LIGHTING4_FRAME_LEN: usize = 10;
pub(crate) const LIGHTING6_FRAME_LEN: usize = 12;

/// Pulse width transmitted when the caller does not supply one.
pub const DEFAULT_PULSE_WIDTH: u16 = 0x015E;

/// Highest dim level the Lighting3 set-level command accepts.
pub const MAX_LEVEL: u8 = 10;

/// Fixed leading bytes of a frame. The length byte counts the bytes that
/// follow it, so a frame's total size is `length + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameHeader {
    pub length: u8,
    pub packet_type: u8,
    pub subtype: u8,
}

/// Subtypes of the system/channel family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[repr(u8)]
pub enum Lighting3Subtype {
    /// Ikea Koppla rotary dimmers and switches.
    Koppla = 0x00,
}

impl Lighting3Subtype {
    /// Look up a subtype from its wire code.
    pub fn from_code<I: embedded_io::Error>(code: u8) -> Result<Self, I> {
        match code {
            0x00 => Ok(Lighting3Subtype::Koppla),
            _ => Err(Error::InvalidSubtype(code)),
        }
    }

    pub(crate) fn header(self) -> FrameHeader {
        FrameHeader {
            length: (LIGHTING3_FRAME_LEN - 1) as u8,
            packet_type: PACKET_TYPE_LIGHTING3,
            subtype: self as u8,
        }
    }
}

/// Subtypes of the raw-code family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[repr(u8)]
pub enum Lighting4Subtype {
    /// PT2262 and compatible encoder chips.
    Pt2262 = 0x00,
}

impl Lighting4Subtype {
    /// Look up a subtype from its wire code.
    pub fn from_code<I: embedded_io::Error>(code: u8) -> Result<Self, I> {
        match code {
            0x00 => Ok(Lighting4Subtype::Pt2262),
            _ => Err(Error::InvalidSubtype(code)),
        }
    }

    pub(crate) fn header(self) -> FrameHeader {
        FrameHeader {
            length: (LIGHTING4_FRAME_LEN - 1) as u8,
            packet_type: PACKET_TYPE_LIGHTING4,
            subtype: self as u8,
        }
    }
}

/// Subtypes of the rolling-code family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[repr(u8)]
pub enum Lighting6Subtype {
    /// Blyss remotes: lettered groups, sequence counter wrapping at 5.
    Blyss = 0x00,
    /// Cuveo remotes: numbered groups, byte-wide sequence counter.
    Cuveo = 0x01,
}

impl Lighting6Subtype {
    /// Look up a subtype from its wire code.
    pub fn from_code<I: embedded_io::Error>(code: u8) -> Result<Self, I> {
        match code {
            0x00 => Ok(Lighting6Subtype::Blyss),
            0x01 => Ok(Lighting6Subtype::Cuveo),
            _ => Err(Error::InvalidSubtype(code)),
        }
    }

    /// Modulus of the rolling sequence counter for this subtype.
    pub(crate) fn sequence_modulus(self) -> u16 {
        match self {
            Lighting6Subtype::Blyss => 5,
            Lighting6Subtype::Cuveo => 256,
        }
    }

    pub(crate) fn header(self) -> FrameHeader {
        FrameHeader {
            length: (LIGHTING6_FRAME_LEN - 1) as u8,
            packet_type: PACKET_TYPE_LIGHTING6,
            subtype: self as u8,
        }
    }
}

/// Command opcodes of the Lighting3 family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lighting3Command {
    IncreaseLevel,
    DecreaseLevel,
    SwitchOn,
    /// Dim to a fixed level, 0-10.
    SetLevel(u8),
    SwitchOff,
    Program,
}

impl Lighting3Command {
    pub(crate) fn opcode(self) -> u8 {
        match self {
            Lighting3Command::IncreaseLevel => 0x00,
            Lighting3Command::DecreaseLevel => 0x08,
            Lighting3Command::SwitchOn => 0x10,
            Lighting3Command::SetLevel(level) => {
                debug_assert!(level <= MAX_LEVEL);
                0x10 + level
            }
            Lighting3Command::SwitchOff => 0x1A,
            Lighting3Command::Program => 0x1C,
        }
    }
}

/// Command opcodes of the Lighting6 family. The group variants address a
/// whole lettered group at once and put 0 in the unit byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lighting6Command {
    On,
    Off,
    GroupOn,
    GroupOff,
}

impl Lighting6Command {
    pub(crate) fn opcode(self) -> u8 {
        match self {
            Lighting6Command::On => 0x00,
            Lighting6Command::Off => 0x01,
            Lighting6Command::GroupOn => 0x02,
            Lighting6Command::GroupOff => 0x03,
        }
    }
}

/// The ten channel-selection bits of a Koppla frame, split over two bytes
/// on the wire: bits 0-7 are channels 1-8, bits 8-9 channels 9-10.
#[bitfield]
#[derive(Debug, Clone, Copy)]
struct ChannelMask {
    channels: B10,
    #[skip]
    __: B6,
}

/// Wire bytes for a channel selection. Channel 0 addresses the whole
/// system, so every channel bit is set.
fn channel_mask_bytes(channel: u8) -> [u8; 2] {
    let bits: u16 = match channel {
        0 => 0x03FF,
        n => 1 << (n - 1),
    };
    ChannelMask::new().with_channels(bits).into_bytes()
}

/// Assemble a Lighting3 frame. The system code is carried as `system - 1`,
/// so system 16 appears on the wire as 0x0F rather than the literal 16.
pub(crate) fn encode_lighting3(
    subtype: Lighting3Subtype,
    address: &SystemChannel,
    command: Lighting3Command,
) -> [u8; LIGHTING3_FRAME_LEN] {
    let header = subtype.header();
    let mask = channel_mask_bytes(address.channel);
    [
        header.length,
        header.packet_type,
        header.subtype,
        0x00,
        address.system - 1,
        mask[0],
        mask[1],
        command.opcode(),
        0x00,
    ]
}

/// Assemble a Lighting4 frame from the already-normalized payload and
/// pulse width.
pub(crate) fn encode_lighting4(
    subtype: Lighting4Subtype,
    data: [u8; 3],
    pulse: [u8; 2],
) -> [u8; LIGHTING4_FRAME_LEN] {
    let header = subtype.header();
    [
        header.length,
        header.packet_type,
        header.subtype,
        0x00,
        data[0],
        data[1],
        data[2],
        pulse[0],
        pulse[1],
        0x00,
    ]
}

/// Assemble a Lighting6 frame. Group commands zero the unit byte; the
/// rolling sequence value lands after the opcode.
pub(crate) fn encode_lighting6(
    subtype: Lighting6Subtype,
    address: &RemoteAddress,
    command: Lighting6Command,
    sequence: u8,
) -> [u8; LIGHTING6_FRAME_LEN] {
    let header = subtype.header();
    let [id_hi, id_lo] = address.id.to_be_bytes();
    let unit = match command {
        Lighting6Command::GroupOn | Lighting6Command::GroupOff => 0x00,
        _ => address.unit,
    };
    [
        header.length,
        header.packet_type,
        header.subtype,
        0x00,
        id_hi,
        id_lo,
        address.group,
        unit,
        command.opcode(),
        sequence,
        0x00,
        0x00,
    ]
}
