use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 6379;

/// Inputs accumulated past this size without forming a request close the connection.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 512 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bind: IpAddr,
    /// `0` asks the OS for an ephemeral port.
    pub port: u16,
    pub max_frame_size: usize,
}

impl Config {
    pub fn with_port(port: u16) -> Config {
        Config {
            port,
            ..Config::default()
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_every_interface() {
        let config = Config::default();

        assert_eq!(config.addr(), "0.0.0.0:6379".parse().unwrap());
        assert_eq!(config.max_frame_size, DEFAULT_MAX_FRAME_SIZE);
    }

    #[test]
    fn with_port_keeps_other_defaults() {
        let config = Config::with_port(7000);

        assert_eq!(config.port, 7000);
        assert_eq!(config.bind, Config::default().bind);
    }
}
