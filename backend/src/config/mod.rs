//! Central module for application-wide configuration settings.
//!
//! The only setting is the listen address. Flags take precedence over the
//! environment, and a `.env` file is loaded into the environment first when
//! one is present.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Parser, Debug, Clone)]
#[command(name = "authgate")]
#[command(about = "In-memory user directory with signup, login and a protected listing")]
pub struct Config {
    /// Address to bind. All interfaces by default.
    #[arg(long, env = "AUTHGATE_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Config {
    /// Loads `.env` if present, then parses flags and environment.
    /// Returns whether a `.env` file was found alongside the config.
    pub fn load() -> (Self, bool) {
        let env_file_loaded = dotenvy::dotenv().is_ok();
        (Self::parse(), env_file_loaded)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
