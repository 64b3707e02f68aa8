//! Command line configuration of the `mini-guestbook` binary.
//!
//! ```bash
//! mini-guestbook --port 8080 --chunk-size 32 \
//!   --entry "first!" --entry "second" \
//!   --log-level debug
//! ```

use std::num::NonZeroUsize;

use clap::Parser;
use tracing::Level;

#[derive(Debug, Clone, Parser)]
#[command(name = "mini-guestbook")]
#[command(about = "A guest book served over HTTP/1.0")]
#[command(version)]
pub struct Config {
    /// Host/IP to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Size in bytes of each chunk of a compressed response
    #[arg(long = "chunk-size", default_value = "16")]
    pub chunk_size: NonZeroUsize,

    /// Guest book entry to start with, may be repeated
    #[arg(long = "entry", value_name = "TEXT")]
    pub entries: Vec<String>,

    /// Maximum log level: error, warn, info, debug or trace
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: Level,
}

impl Config {
    pub fn address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
