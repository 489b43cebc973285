//! The transceiver connection: owns the serial write path, assigns command
//! identifiers, and resolves acknowledgments against pending completions.

use std::collections::VecDeque;
use std::fmt::Write as _;

use embedded_io::Write;

use crate::error::{Error, Result};
use crate::types::{CommandId, Completion, CompletionSender, Response};

/// Sink for the hex dump of each transmitted frame, e.g. a logger hook or
/// a capture buffer in tests. Installed with
/// [`Transceiver::set_debug_sink`].
pub type DebugSink = Box<dyn FnMut(&str) + Send>;

/// A connection to the transceiver over any interface which implements
/// [`embedded_io::Write`].
///
/// Encoding, the optional debug dump, the port write, and the completion
/// bookkeeping happen under one `&mut self` call, so frames from different
/// commands can never interleave on the wire. Callers on several threads
/// should share the transceiver behind a `Mutex`.
///
/// The transceiver acknowledges transmissions in the order they were sent;
/// a single connection serializes every device behind it. Whoever reads
/// the port calls [`Transceiver::acknowledge_next`] once per transmitter
/// response, and the oldest pending command completes.
pub struct Transceiver<S: Write> {
    interface: S,
    connected: bool,
    debug_sink: Option<DebugSink>,
    next_command_id: CommandId,
    pending: VecDeque<Pending>,
}

struct Pending {
    command_id: CommandId,
    done: Option<CompletionSender>,
}

impl<S: Write> Transceiver<S> {
    /// Create a connection over the given interface. It starts
    /// disconnected; flip it with [`Transceiver::set_connected`] once the
    /// port-opening collaborator has the hardware up.
    pub fn new(interface: S) -> Self {
        Self {
            interface,
            connected: false,
            debug_sink: None,
            next_command_id: 0,
            pending: VecDeque::new(),
        }
    }

    /// Mark the connection usable (or not). Sends fail with
    /// [`Error::NotConnected`] while this is false.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Install a debug sink. Every subsequent send emits one line of the
    /// form `Sent    : 0B,15,00,...` through it.
    pub fn set_debug_sink(&mut self, sink: DebugSink) {
        self.debug_sink = Some(sink);
    }

    /// Number of commands sent but not yet acknowledged.
    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    /// Borrow the underlying interface.
    pub fn interface(&self) -> &S {
        &self.interface
    }

    /// Mutably borrow the underlying interface, e.g. for a read loop that
    /// shares the port object.
    pub fn interface_mut(&mut self) -> &mut S {
        &mut self.interface
    }

    /// Write a fully assembled frame and register its completion channel.
    ///
    /// Returns the command identifier immediately; the completion arrives
    /// later, when an acknowledgment consumes the pending slot. A failed
    /// write consumes neither an identifier nor a slot.
    pub fn send(
        &mut self,
        frame: &[u8],
        done: Option<CompletionSender>,
    ) -> Result<CommandId, S::Error> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        let command_id = self.next_command_id;
        self.interface
            .write_all(frame)
            .map_err(Error::SerialError)?;

        if let Some(sink) = self.debug_sink.as_mut() {
            sink(&format!("Sent    : {}", hex_pairs(frame)));
        }
        log::trace!("command {command_id} sent ({} bytes)", frame.len());

        self.next_command_id += 1;
        self.pending.push_back(Pending { command_id, done });
        Ok(command_id)
    }

    /// Resolve the oldest pending command with the transceiver's response.
    ///
    /// Driven by the external read loop, once per transmitter response.
    /// Returns the completed command's identifier, or `None` if nothing
    /// was pending. A command sent without a completion channel (or whose
    /// receiver is gone) still consumes its slot.
    pub fn acknowledge_next(&mut self, response: Response) -> Option<CommandId> {
        let entry = self.pending.pop_front()?;
        log::trace!("command {} acknowledged", entry.command_id);
        if let Some(done) = entry.done {
            let _ = done.send(Completion {
                command_id: entry.command_id,
                response,
            });
        }
        Some(entry.command_id)
    }
}

/// Uppercase hex pairs, comma separated: `08,12,00,...`.
fn hex_pairs(frame: &[u8]) -> String {
    let mut out = String::with_capacity(frame.len() * 3);
    for (i, byte) in frame.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // Writing to a String cannot fail.
        let _ = write!(out, "{byte:02X}");
    }
    out
}
