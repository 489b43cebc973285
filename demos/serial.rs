use std::env;
use std::sync::mpsc;

use inquire::{Select, Text};
use serialport::SerialPort;

use rfxtrx::lighting3::{Lighting3, Lighting3Subtype};
use rfxtrx::lighting4::{Lighting4, Lighting4Subtype};
use rfxtrx::lighting6::{Lighting6, Lighting6Subtype};
use rfxtrx::transceiver::Transceiver;
use rfxtrx::types::Response;

// Configuration constants - adjust these for your setup
const BAUD_RATE: u32 = 38400;
// The transceiver answers each transmission within a few tens of ms; a
// modest timeout keeps the acknowledgment pump responsive.
const SERIAL_TIMEOUT_MS: u64 = 300;

pub struct PortWrapper(Box<dyn SerialPort>);

#[derive(Debug)]
pub struct IoError(std::io::Error);

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl embedded_io::Error for IoError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self.0.kind() {
            std::io::ErrorKind::NotFound => embedded_io::ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => embedded_io::ErrorKind::PermissionDenied,
            std::io::ErrorKind::ConnectionRefused => embedded_io::ErrorKind::ConnectionRefused,
            std::io::ErrorKind::ConnectionReset => embedded_io::ErrorKind::ConnectionReset,
            std::io::ErrorKind::ConnectionAborted => embedded_io::ErrorKind::ConnectionAborted,
            std::io::ErrorKind::NotConnected => embedded_io::ErrorKind::NotConnected,
            std::io::ErrorKind::AddrInUse => embedded_io::ErrorKind::AddrInUse,
            std::io::ErrorKind::AddrNotAvailable => embedded_io::ErrorKind::AddrNotAvailable,
            std::io::ErrorKind::BrokenPipe => embedded_io::ErrorKind::BrokenPipe,
            std::io::ErrorKind::AlreadyExists => embedded_io::ErrorKind::AlreadyExists,
            std::io::ErrorKind::InvalidInput => embedded_io::ErrorKind::InvalidInput,
            std::io::ErrorKind::InvalidData => embedded_io::ErrorKind::InvalidData,
            std::io::ErrorKind::TimedOut => embedded_io::ErrorKind::TimedOut,
            std::io::ErrorKind::Interrupted => embedded_io::ErrorKind::Interrupted,
            std::io::ErrorKind::Unsupported => embedded_io::ErrorKind::Unsupported,
            std::io::ErrorKind::OutOfMemory => embedded_io::ErrorKind::OutOfMemory,
            _ => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for PortWrapper {
    type Error = IoError;
}

impl embedded_io::Write for PortWrapper {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        std::io::Write::write(&mut self.0, buf).map_err(IoError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        std::io::Write::flush(&mut self.0).map_err(IoError)
    }
}

fn main() {
    env_logger::init();

    // Get serial port from command line arg or interactive selection
    let port_name = env::args().nth(1).unwrap_or_else(|| {
        // List available serial ports
        let ports = serialport::available_ports().expect("Failed to enumerate serial ports");

        if ports.is_empty() {
            eprintln!("No serial ports found!");
            std::process::exit(1);
        }

        let port_names: Vec<String> = ports.iter().map(|p| p.port_name.clone()).collect();

        // Interactive selection
        Select::new("Select a serial port:", port_names)
            .prompt()
            .expect("Failed to select port")
    });

    println!("Using port: {}", port_name);

    // Open serial port
    let port = serialport::new(&port_name, BAUD_RATE)
        .timeout(std::time::Duration::from_millis(SERIAL_TIMEOUT_MS))
        .open()
        .expect("Failed to open serial port");

    let mut transceiver = Transceiver::new(PortWrapper(port));
    transceiver.set_debug_sink(Box::new(|line| println!("{line}")));
    // The port is open and the firmware is assumed ready; a full setup
    // would run the reset/status handshake before flipping this.
    transceiver.set_connected(true);

    let koppla = Lighting3::new(Lighting3Subtype::Koppla);
    let pt2262 = Lighting4::new(Lighting4Subtype::Pt2262);
    let mut blyss = Lighting6::new(Lighting6Subtype::Blyss);

    // One channel collects every completion, in send order.
    let (done, completions) = mpsc::channel();

    loop {
        let action = Select::new(
            "Action:",
            vec![
                "Koppla on",
                "Koppla off",
                "Koppla set level",
                "PT2262 raw code",
                "Blyss on",
                "Blyss off",
                "Quit",
            ],
        )
        .prompt()
        .expect("Failed to select action");

        let result = match action {
            "Koppla on" | "Koppla off" | "Koppla set level" => {
                let device = Text::new("Device (system/channel):")
                    .with_default("1/1")
                    .prompt()
                    .expect("Failed to read device");
                match action {
                    "Koppla on" => {
                        koppla.switch_on(&mut transceiver, device.as_str(), Some(done.clone()))
                    }
                    "Koppla off" => {
                        koppla.switch_off(&mut transceiver, device.as_str(), Some(done.clone()))
                    }
                    _ => {
                        let level = Text::new("Level (0-10):")
                            .with_default("5")
                            .prompt()
                            .expect("Failed to read level")
                            .trim()
                            .parse()
                            .unwrap_or(5);
                        koppla.set_level(
                            &mut transceiver,
                            device.as_str(),
                            level,
                            Some(done.clone()),
                        )
                    }
                }
            }
            "PT2262 raw code" => {
                let data = Text::new("Code (decimal, 0x hex):")
                    .with_default("0x000102")
                    .prompt()
                    .expect("Failed to read code");
                pt2262.send_data(&mut transceiver, data.as_str(), None, Some(done.clone()))
            }
            "Blyss on" | "Blyss off" => {
                let device = Text::new("Device (id/group/unit):")
                    .with_default("0xF09A/B/1")
                    .prompt()
                    .expect("Failed to read device");
                if action == "Blyss on" {
                    blyss.switch_on(&mut transceiver, device.as_str(), Some(done.clone()))
                } else {
                    blyss.switch_off(&mut transceiver, device.as_str(), Some(done.clone()))
                }
            }
            _ => break,
        };

        match result {
            Ok(command_id) => println!("Queued command {command_id}"),
            Err(err) => {
                eprintln!("Error: {err}");
                continue;
            }
        }

        pump_acknowledgments(&mut transceiver);

        while let Ok(completion) = completions.try_recv() {
            println!(
                "Command {} completed (response 0x{:02X})",
                completion.command_id,
                completion.response.raw()
            );
        }
    }
}

/// Drain whatever the transceiver sent back and resolve pending commands
/// oldest-first. A real integration would parse the incoming frames; for
/// the demo each transmitter-response frame is reduced to its final byte.
fn pump_acknowledgments(transceiver: &mut Transceiver<PortWrapper>) {
    let mut scratch = [0u8; 32];
    while transceiver.pending_commands() > 0 {
        match std::io::Read::read(&mut transceiver.interface_mut().0, &mut scratch) {
            Ok(count) if count > 0 => {
                transceiver.acknowledge_next(Response::from_raw(scratch[count - 1]));
            }
            _ => break,
        }
    }
}
