use bytes::BytesMut;
use mio::net::TcpStream;
use std::io::{self, Read, Write};
use std::net::SocketAddr;
use uuid::Uuid;

const READ_CHUNK_SIZE: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConnectionState {
    Open,
    Closed,
}

pub struct Connection {
    pub id: Uuid,
    pub client_address: SocketAddr,
    stream: TcpStream,
    // Bytes read from the socket accumulate here until the socket runs dry, the whole buffer is
    // then handled as one request and cleared.
    buffer: BytesMut,
}

impl Connection {
    pub fn new(stream: TcpStream, client_address: SocketAddr) -> Connection {
        Connection {
            id: Uuid::new_v4(),
            client_address,
            stream,
            // Allocate the buffer with 4kb of capacity.
            buffer: BytesMut::with_capacity(4096),
        }
    }

    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Reads everything the socket has to offer right now. Readiness is edge-triggered, so
    /// reading stops only once the socket would block, the peer hangs up, or more than
    /// `limit` bytes are buffered.
    pub fn fill_buffer(&mut self, limit: usize) -> io::Result<ConnectionState> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => return Ok(ConnectionState::Closed),
                Ok(n) => {
                    self.buffer.extend_from_slice(&chunk[..n]);

                    if self.buffer.len() > limit {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "frame size exceeds limit",
                        ));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    return Ok(ConnectionState::Open)
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Writes all of `data`, spinning while the socket would block. The event loop is not
    /// re-entered until the response is out.
    pub fn write_all(&mut self, mut data: &[u8]) -> io::Result<()> {
        while !data.is_empty() {
            match self.stream.write(data) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => data = &data[n..],
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                    ) =>
                {
                    continue
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}
