//! We use this mocking module in unit tests to emulate the write side of a
//! serial port. The receive side never appears here: incoming frames are a
//! read loop's problem, and tests drive acknowledgments directly.

use crate::transceiver::Transceiver;

/// Our mock type used to emulate a serial port.
pub struct MockSerial {
    /// Buffer to store data written to the mock serial port
    write_buffer: heapless::Vec<u8, 256>,
    /// Flag to simulate write errors
    should_error_on_write: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum MockSerialError {
    /// Simulated buffer overflow
    #[error("Simulated buffer overflow")]
    BufferOverflow,
    /// Generic simulated error for testing
    #[error("Generic simulated error")]
    SimulatedError,
}

impl embedded_io::Error for MockSerialError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            MockSerialError::BufferOverflow => embedded_io::ErrorKind::OutOfMemory,
            MockSerialError::SimulatedError => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = MockSerialError;
}

impl embedded_io::Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.should_error_on_write {
            return Err(MockSerialError::SimulatedError);
        }

        for &byte in buf {
            self.write_buffer
                .push(byte)
                .map_err(|_| MockSerialError::BufferOverflow)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.should_error_on_write {
            return Err(MockSerialError::SimulatedError);
        }
        Ok(())
    }
}

impl MockSerial {
    /// Create a new MockSerial instance with an empty write buffer
    pub fn new() -> Self {
        Self {
            write_buffer: heapless::Vec::new(),
            should_error_on_write: false,
        }
    }

    /// Get a reference to the data that was written to this mock serial port
    pub fn written_data(&self) -> &[u8] {
        &self.write_buffer
    }

    /// Clear the write buffer
    pub fn clear_written_data(&mut self) {
        self.write_buffer.clear();
    }

    /// Configure whether write operations should fail with an error
    pub fn set_write_error(&mut self, should_error: bool) {
        self.should_error_on_write = should_error;
    }
}

/// A transceiver over a fresh mock port, already marked connected; most
/// facade tests start from this.
pub fn connected_transceiver() -> Transceiver<MockSerial> {
    let mut transceiver = Transceiver::new(MockSerial::new());
    transceiver.set_connected(true);
    transceiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::{Error, Write};

    #[test]
    fn test_write_data_accumulates() {
        let mut mock = MockSerial::new();

        mock.write(&[0x01, 0x02]).unwrap();
        mock.write(&[0x03]).unwrap();

        assert_eq!(mock.written_data(), &[0x01, 0x02, 0x03]);

        mock.clear_written_data();
        assert!(mock.written_data().is_empty());
    }

    #[test]
    fn test_write_buffer_overflow() {
        let mut mock = MockSerial::new();
        let large_data = vec![0u8; 300]; // Larger than 256 byte capacity

        let result = mock.write(&large_data);
        assert!(matches!(result, Err(MockSerialError::BufferOverflow)));
    }

    #[test]
    fn test_write_error_simulation() {
        let mut mock = MockSerial::new();
        mock.set_write_error(true);

        assert!(matches!(
            mock.write(&[0x01]),
            Err(MockSerialError::SimulatedError)
        ));
        assert!(mock.written_data().is_empty()); // Nothing should be written

        mock.set_write_error(false);
        assert!(mock.write(&[0x01]).is_ok());
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(
            MockSerialError::BufferOverflow.kind(),
            embedded_io::ErrorKind::OutOfMemory
        ));
        assert!(matches!(
            MockSerialError::SimulatedError.kind(),
            embedded_io::ErrorKind::Other
        ));
    }
}
