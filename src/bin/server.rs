use clap::Parser;
use respkv::config::{Config, DEFAULT_MAX_FRAME_SIZE, DEFAULT_PORT};
use respkv::server::{Server, ShutdownHandle};
use std::future::Future;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::process::ExitCode;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The port to listen on
    #[arg(value_parser = clap::value_parser!(u16).range(1..), default_value_t = DEFAULT_PORT)]
    port: u16,

    /// The address to bind to
    #[arg(long, env = "BIND", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    bind: IpAddr,

    /// Inputs growing past this many bytes without forming a request close the connection
    #[arg(long, env = "MAX_FRAME_SIZE", default_value_t = DEFAULT_MAX_FRAME_SIZE)]
    max_frame_size: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // `--help` and `--version` are reported through the same path.
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    let _ = tracing_subscriber::fmt()
        .try_init()
        .map_err(|e| debug!("Failed to initialize global tracing: {}", e));

    let mut server = Server::new(Config {
        bind: args.bind,
        port: args.port,
        max_frame_size: args.max_frame_size,
    });

    let handle = match server.start() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let event_loop = tokio::task::spawn_blocking(move || server.run());

    match wait_for_shutdown(event_loop, tokio::signal::ctrl_c(), handle).await {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            error!("Server stopped with an error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Event loop panicked: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Waits for the event loop to return, asking it to stop once `signal` fires. If the signal
/// cannot be listened for, the server keeps running until the loop ends on its own.
async fn wait_for_shutdown<S>(
    mut event_loop: JoinHandle<respkv::Result<()>>,
    signal: S,
    handle: ShutdownHandle,
) -> Result<respkv::Result<()>, JoinError>
where
    S: Future<Output = io::Result<()>>,
{
    tokio::select! {
        result = &mut event_loop => result,
        signal = signal => {
            match signal {
                Ok(()) => {
                    info!("Received interrupt signal");
                    handle.shutdown();
                }
                Err(e) => error!("Failed to listen for the interrupt signal: {}", e),
            }
            event_loop.await
        }
    }
}
