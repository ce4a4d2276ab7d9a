use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;

/// Serve and search a directory of GIFs by the words in their filenames.
#[derive(Parser, Debug, Clone)]
#[command(name = "wild-gif-chase", version, about)]
pub struct Config {
  /// Port to listen on
  #[arg(short, long, env = "GIF_CHASE_PORT", default_value_t = 8000)]
  pub port: u16,

  /// Address to bind
  #[arg(long, env = "GIF_CHASE_HOST", default_value = "0.0.0.0")]
  pub host: String,

  /// Source GIF directory
  #[arg(short, long, value_name = "DIR", env = "GIF_CHASE_SRC")]
  pub src: PathBuf,

  /// Directory holding entry.html, results.html and search.html
  #[arg(short, long, value_name = "DIR", env = "GIF_CHASE_TEMPLATES", default_value = "templates")]
  pub templates: PathBuf,
}

impl Config {
  pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
    let ip: IpAddr = self
      .host
      .parse()
      .map_err(|_| ConfigError::ListenAddr(self.host.clone()))?;
    Ok(SocketAddr::new(ip, self.port))
  }
}
