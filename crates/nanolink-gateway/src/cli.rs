use clap::Parser;
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "NANOLINK_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "NANOLINK_BASE_URL";
pub const DEFAULT_TTL_ENV: &str = "NANOLINK_DEFAULT_TTL_SECONDS";
pub const SWEEP_INTERVAL_ENV: &str = "NANOLINK_SWEEP_INTERVAL_SECONDS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Parser)]
#[command(name = "nanolink-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public base URL used to render short URLs in responses.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// TTL applied to records created without an explicit one.
    #[arg(long, env = DEFAULT_TTL_ENV, default_value_t = 120)]
    pub default_ttl_seconds: u32,

    /// How often the expiration reaper sweeps the store.
    #[arg(long, env = SWEEP_INTERVAL_ENV, default_value_t = 10)]
    pub sweep_interval_seconds: u32,
}
