use mio::net::TcpListener;
use mio::{Events, Interest, Poll, Token, Waker};
use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::commands;
use crate::config::Config;
use crate::connection::{Connection, ConnectionState};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

const LISTENER: Token = Token(0);
const WAKER: Token = Token(1);
const FIRST_CLIENT: usize = 2;

const MAX_EVENTS: usize = 64;

/// Single-threaded, readiness-driven server. Every connection is multiplexed over the thread
/// calling [`Server::run`], which also owns the store.
pub struct Server {
    config: Config,
    store: Store,
    poll: Option<Poll>,
    listener: Option<TcpListener>,
    waker: Option<Arc<Waker>>,
    connections: HashMap<Token, Connection>,
    next_token: usize,
    shutdown: Arc<AtomicBool>,
}

/// Asks a running [`Server`] to stop. Cheap to clone and safe to use from any thread, e.g. a
/// signal handler task.
#[derive(Clone)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
    waker: Arc<Waker>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);

        // The loop blocks in `poll` without a timeout, it has to be woken up to see the flag.
        if let Err(e) = self.waker.wake() {
            warn!("Failed to wake up the event loop: {}", e);
        }
    }
}

impl Server {
    pub fn new(config: Config) -> Server {
        Server {
            config,
            store: Store::new(),
            poll: None,
            listener: None,
            waker: None,
            connections: HashMap::new(),
            next_token: FIRST_CLIENT,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Binds the listening socket and sets up readiness notifications. Nothing is accepted
    /// until [`Server::run`] is called.
    pub fn start(&mut self) -> Result<ShutdownHandle, Error> {
        let poll = Poll::new()?;

        let mut listener = TcpListener::bind(self.config.addr())?;
        poll.registry()
            .register(&mut listener, LISTENER, Interest::READABLE)?;

        let waker = Arc::new(Waker::new(poll.registry(), WAKER)?);

        info!("Server listening on {}", listener.local_addr()?);

        self.poll = Some(poll);
        self.listener = Some(listener);
        self.waker = Some(waker.clone());
        self.shutdown.store(false, Ordering::SeqCst);

        Ok(ShutdownHandle {
            shutdown: self.shutdown.clone(),
            waker,
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener
            .as_ref()
            .and_then(|listener| listener.local_addr().ok())
    }

    /// Waits for readiness events and serves them until a shutdown is requested, then releases
    /// every resource through [`Server::stop`].
    pub fn run(&mut self) -> Result<(), Error> {
        let mut events = Events::with_capacity(MAX_EVENTS);

        while !self.shutdown.load(Ordering::SeqCst) {
            let poll = self.poll.as_mut().ok_or("server is not started")?;

            if let Err(e) = poll.poll(&mut events, None) {
                if e.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(e.into());
            }

            for event in events.iter() {
                match event.token() {
                    LISTENER => self.accept_connections(),
                    // Only used to interrupt `poll`, the flag is checked by the loop.
                    WAKER => {}
                    token => self.handle_client(token),
                }
            }
        }

        info!("Shutting down");
        self.stop();

        Ok(())
    }

    /// Closes every connection and releases the poll instance and the listening socket.
    /// Calling it again is a no-op.
    pub fn stop(&mut self) {
        let tokens: Vec<Token> = self.connections.keys().copied().collect();
        for token in tokens {
            self.close_connection(token);
        }

        self.waker = None;
        self.poll = None;
        self.listener = None;
    }

    fn accept_connections(&mut self) {
        let (Some(listener), Some(poll)) = (self.listener.as_ref(), self.poll.as_ref()) else {
            return;
        };

        // Edge-triggered: drain the backlog until the listener would block.
        loop {
            let (mut stream, client_address) = match listener.accept() {
                Ok(accepted) => accepted,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    break;
                }
            };

            let token = Token(self.next_token);
            self.next_token += 1;

            if let Err(e) = poll
                .registry()
                .register(&mut stream, token, Interest::READABLE)
            {
                error!("Failed to register connection from {}: {}", client_address, e);
                continue;
            }

            let conn = Connection::new(stream, client_address);
            info!(connection_id = %conn.id, "Accepted connection from {:?}", client_address);

            self.connections.insert(token, conn);
        }
    }

    fn handle_client(&mut self, token: Token) {
        let Some(conn) = self.connections.get_mut(&token) else {
            return;
        };

        let state = match serve(conn, &mut self.store, self.config.max_frame_size) {
            Ok(state) => state,
            Err(e) => {
                warn!(connection_id = %conn.id, "Dropping connection: {}", e);
                ConnectionState::Closed
            }
        };

        if state == ConnectionState::Closed {
            self.close_connection(token);
        }
    }

    fn close_connection(&mut self, token: Token) {
        let Some(mut conn) = self.connections.remove(&token) else {
            return;
        };

        if let Some(poll) = self.poll.as_ref() {
            if let Err(e) = poll.registry().deregister(conn.stream_mut()) {
                debug!(connection_id = %conn.id, "Failed to deregister connection: {}", e);
            }
        }

        info!(connection_id = %conn.id, "Connection closed");
        // Dropping the connection closes the socket.
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Handles a read-readiness event: drains the socket, then treats everything buffered as a
/// single request.
///
/// Bytes following the first decoded value are discarded, and a request split across two
/// readiness events fails to decode and closes the connection. Clients must send one request
/// and wait for its response.
#[instrument(
    name = "connection",
    skip_all,
    fields(connection_id = %conn.id, client_address = %conn.client_address)
)]
fn serve(
    conn: &mut Connection,
    store: &mut Store,
    max_frame_size: usize,
) -> Result<ConnectionState, Error> {
    if conn.fill_buffer(max_frame_size)? == ConnectionState::Closed {
        debug!("Peer closed the connection");
        return Ok(ConnectionState::Closed);
    }

    // Spurious wake-up, nothing to handle.
    if conn.buffer().is_empty() {
        return Ok(ConnectionState::Open);
    }

    let (frame, consumed) = Frame::decode(conn.buffer(), 0)?;
    if consumed < conn.buffer().len() {
        debug!(
            "Discarding {} bytes following the request",
            conn.buffer().len() - consumed
        );
    }

    debug!("Received frame from client: {}", frame);
    let res = commands::dispatch(frame, store);
    debug!("Sending response to client: {}", res);

    conn.write_all(&res.serialize())?;
    conn.clear_buffer();

    Ok(ConnectionState::Open)
}
