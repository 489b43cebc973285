//! Parsing and validation of caller-supplied device identifiers and raw
//! payloads into the numeric fields each protocol family encodes.
//!
//! Everything in this module is pure: nothing here touches the transport,
//! so an invalid identifier fails the command before any byte is written.

use crate::error::{Error, Result};
use crate::packet::{DEFAULT_PULSE_WIDTH, Lighting6Subtype};
use crate::types::{DeviceId, Pulse, RawData};

/// Validated Lighting3 target: system code 1-16, channel 0-10 where
/// channel 0 addresses every channel of the system at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SystemChannel {
    pub system: u8,
    pub channel: u8,
}

/// Validated Lighting6 target. `group` holds the byte as it appears on the
/// wire (ASCII letter for Blyss, plain digit for Cuveo).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RemoteAddress {
    pub id: u16,
    pub group: u8,
    pub unit: u8,
}

/// Parse a numeric identifier field: `0x`-prefixed hex text or decimal.
fn number(text: &str) -> Option<u32> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Split an identifier into its fields, whichever input form was used.
fn split_fields<'a, I: embedded_io::Error>(
    device: &DeviceId<'a>,
) -> Result<heapless::Vec<&'a str, 4>, I> {
    let mut fields: heapless::Vec<&str, 4> = heapless::Vec::new();
    match device {
        DeviceId::Text(text) => {
            for field in text.split('/') {
                fields.push(field).map_err(|_| Error::InvalidDeviceId)?;
            }
        }
        DeviceId::Parts(parts) => {
            for field in parts.iter().copied() {
                fields.push(field).map_err(|_| Error::InvalidDeviceId)?;
            }
        }
    }
    Ok(fields)
}

/// Parse a `system/channel` identifier for the Lighting3 family.
pub(crate) fn parse_system_channel<I: embedded_io::Error>(
    device: &DeviceId<'_>,
) -> Result<SystemChannel, I> {
    let fields = split_fields(device)?;
    if fields.len() != 2 {
        return Err(Error::InvalidDeviceId);
    }

    let system = number(fields[0]).ok_or(Error::InvalidDeviceId)?;
    if !(1..=16).contains(&system) {
        return Err(Error::InvalidSystemCode(system));
    }

    let channel = number(fields[1]).ok_or(Error::InvalidDeviceId)?;
    if channel > 10 {
        return Err(Error::InvalidChannelNumber(channel));
    }

    Ok(SystemChannel {
        system: system as u8,
        channel: channel as u8,
    })
}

/// Parse an `id/group/unit` identifier for the Lighting6 family.
///
/// The legal group and unit ranges depend on the subtype: Blyss groups are
/// letters A-P with units 0-5 (unit 0 meaning the whole group), Cuveo
/// groups are digits 0-3 with the unit bound set by the group (group 0
/// carries units 0-2, the others 0-8).
pub(crate) fn parse_remote<I: embedded_io::Error>(
    subtype: Lighting6Subtype,
    device: &DeviceId<'_>,
) -> Result<RemoteAddress, I> {
    let fields = split_fields(device)?;
    if fields.len() != 3 {
        return Err(Error::InvalidDeviceId);
    }

    let id = number(fields[0]).ok_or(Error::InvalidDeviceId)?;
    if id > 0xFFFF {
        return Err(Error::InvalidRemoteId(id));
    }

    let mut group_chars = fields[1].chars();
    let group_char = match (group_chars.next(), group_chars.next()) {
        (Some(c), None) => c,
        _ => return Err(Error::InvalidDeviceId),
    };

    let (group, max_unit) = match subtype {
        Lighting6Subtype::Blyss => {
            if !group_char.is_ascii_uppercase() || group_char > 'P' {
                return Err(Error::InvalidGroupCode(group_char));
            }
            (group_char as u8, 5)
        }
        Lighting6Subtype::Cuveo => {
            let digit = group_char
                .to_digit(10)
                .ok_or(Error::InvalidGroupCode(group_char))?;
            if digit > 3 {
                return Err(Error::InvalidGroupCode(group_char));
            }
            (digit as u8, if digit == 0 { 2 } else { 8 })
        }
    };

    let unit = number(fields[2]).ok_or(Error::InvalidDeviceId)?;
    if unit > max_unit {
        return Err(Error::InvalidUnitNumber(unit));
    }

    Ok(RemoteAddress {
        id: id as u16,
        group,
        unit: unit as u8,
    })
}

/// Resolve a raw Lighting4 payload to its 3-byte big-endian form.
pub(crate) fn resolve_data<I: embedded_io::Error>(data: &RawData<'_>) -> Result<[u8; 3], I> {
    match *data {
        RawData::Value(value) => {
            if value > 0xFF_FFFF {
                return Err(Error::InvalidData(value));
            }
            let bytes = value.to_be_bytes();
            Ok([bytes[1], bytes[2], bytes[3]])
        }
        RawData::Text(text) => {
            let value = number(text).ok_or(Error::InvalidDataFormat)?;
            resolve_data(&RawData::Value(value))
        }
        RawData::Bytes(bytes) => {
            if bytes.is_empty() || bytes.len() > 3 {
                return Err(Error::InvalidDataFormat);
            }
            let mut out = [0u8; 3];
            out[3 - bytes.len()..].copy_from_slice(bytes);
            Ok(out)
        }
    }
}

/// Resolve an optional pulse width to its 2-byte big-endian form, falling
/// back to [`DEFAULT_PULSE_WIDTH`] when the caller gave none.
pub(crate) fn resolve_pulse<I: embedded_io::Error>(pulse: Option<&Pulse<'_>>) -> Result<[u8; 2], I> {
    let value = match pulse {
        None => u32::from(DEFAULT_PULSE_WIDTH),
        Some(Pulse::Value(value)) => *value,
        Some(Pulse::Text(text)) => number(text).ok_or(Error::InvalidDataFormat)?,
    };
    if value > 0xFFFF {
        return Err(Error::InvalidPulseWidth(value));
    }
    Ok((value as u16).to_be_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    fn parse_l3(device: DeviceId<'_>) -> Result<SystemChannel, Infallible> {
        parse_system_channel::<Infallible>(&device)
    }

    fn parse_l6(
        subtype: Lighting6Subtype,
        device: DeviceId<'_>,
    ) -> Result<RemoteAddress, Infallible> {
        parse_remote::<Infallible>(subtype, &device)
    }

    #[test]
    fn text_and_parts_forms_parse_identically() {
        let from_text = parse_l3(DeviceId::Text("1/1")).unwrap();
        let from_parts = parse_l3(DeviceId::Parts(&["1", "1"])).unwrap();
        assert_eq!(from_text, from_parts);

        let from_text = parse_l6(Lighting6Subtype::Blyss, DeviceId::Text("0xF09A/B/1")).unwrap();
        let from_parts =
            parse_l6(Lighting6Subtype::Blyss, DeviceId::Parts(&["0xF09A", "B", "1"])).unwrap();
        assert_eq!(from_text, from_parts);
        assert_eq!(from_text.id, 0xF09A);
        assert_eq!(from_text.group, 0x42);
        assert_eq!(from_text.unit, 1);
    }

    #[test]
    fn numeric_fields_accept_hex_and_decimal_text() {
        let hex = parse_l6(Lighting6Subtype::Cuveo, DeviceId::Text("0xFFFF/3/8")).unwrap();
        let dec = parse_l6(Lighting6Subtype::Cuveo, DeviceId::Text("65535/3/8")).unwrap();
        assert_eq!(hex, dec);
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for device in ["0xF09AC8", "1/1/1", "x/1", "1/"] {
            let err = parse_l3(DeviceId::Text(device)).unwrap_err();
            assert_eq!(err.to_string(), "Invalid deviceId format");
        }
        let err = parse_l6(Lighting6Subtype::Blyss, DeviceId::Text("0xF09AC8")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid deviceId format");
    }

    #[test]
    fn rejects_out_of_range_fields_by_name() {
        let err = parse_l3(DeviceId::Text("17/1")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid system code 17");

        let err = parse_l3(DeviceId::Text("16/11")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid channel number 11");

        let err = parse_l6(Lighting6Subtype::Blyss, DeviceId::Text("0xFFFF/Q/5")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid group code 'Q'");

        let err = parse_l6(Lighting6Subtype::Blyss, DeviceId::Text("0xFFFF/P/6")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid unit number 6");

        let err = parse_l6(Lighting6Subtype::Blyss, DeviceId::Text("0x10000/A/1")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid remote ID 0x10000");
    }

    #[test]
    fn cuveo_unit_bound_depends_on_group() {
        assert!(parse_l6(Lighting6Subtype::Cuveo, DeviceId::Text("0xFFFF/0/2")).is_ok());
        let err = parse_l6(Lighting6Subtype::Cuveo, DeviceId::Text("0xFFFF/0/3")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid unit number 3");

        assert!(parse_l6(Lighting6Subtype::Cuveo, DeviceId::Text("0xFFFF/1/8")).is_ok());
        let err = parse_l6(Lighting6Subtype::Cuveo, DeviceId::Text("0xFFFF/1/9")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid unit number 9");

        let err = parse_l6(Lighting6Subtype::Cuveo, DeviceId::Text("0xFFFF/4/1")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid group code '4'");
    }

    #[test]
    fn validation_is_idempotent() {
        // The same bad input must produce the same message every time.
        let first = parse_l3(DeviceId::Text("17/1")).unwrap_err().to_string();
        let second = parse_l3(DeviceId::Text("17/1")).unwrap_err().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn raw_data_forms_resolve_to_the_same_bytes() {
        let value = resolve_data::<Infallible>(&RawData::Value(0x000102)).unwrap();
        let text = resolve_data::<Infallible>(&RawData::Text("0x000102")).unwrap();
        let decimal = resolve_data::<Infallible>(&RawData::Text("258")).unwrap();
        let bytes = resolve_data::<Infallible>(&RawData::Bytes(&[0, 1, 2])).unwrap();
        let short = resolve_data::<Infallible>(&RawData::Bytes(&[1, 2])).unwrap();
        assert_eq!(value, [0x00, 0x01, 0x02]);
        assert_eq!(text, value);
        assert_eq!(decimal, value);
        assert_eq!(bytes, value);
        assert_eq!(short, value);
    }

    #[test]
    fn raw_data_range_and_shape_errors() {
        let err = resolve_data::<Infallible>(&RawData::Value(0x0100_0000)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid data 16777216");

        let err = resolve_data::<Infallible>(&RawData::Bytes(&[1, 2, 3, 4])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid data format");

        let err = resolve_data::<Infallible>(&RawData::Bytes(&[])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid data format");

        let err = resolve_data::<Infallible>(&RawData::Text("pulse")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid data format");
    }

    #[test]
    fn pulse_defaults_and_validates() {
        assert_eq!(resolve_pulse::<Infallible>(None).unwrap(), [0x01, 0x5E]);
        assert_eq!(
            resolve_pulse::<Infallible>(Some(&Pulse::Text("0x0578"))).unwrap(),
            [0x05, 0x78]
        );
        assert_eq!(
            resolve_pulse::<Infallible>(Some(&Pulse::Text("786"))).unwrap(),
            [0x03, 0x12]
        );
        assert_eq!(
            resolve_pulse::<Infallible>(Some(&Pulse::Value(0x0312))).unwrap(),
            [0x03, 0x12]
        );

        let err = resolve_pulse::<Infallible>(Some(&Pulse::Value(0x10000))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid pulse width 65536");
    }
}
