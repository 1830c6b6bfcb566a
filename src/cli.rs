use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use clap::Parser;
use lastsong::{
    clients::{errors::Result, lastfm::LASTFM_BASE_URL},
    config::{Config, ConfigBuilder},
};

#[derive(Parser, Debug)]
#[command(name = "lastsong")]
#[command(version, about = "Serve the latest played Last.fm song over HTTP", long_about = None)]
pub struct Cli {
    /// Last.fm API key
    #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Address to listen on
    #[arg(long, env = "LASTSONG_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Timeout of a single Last.fm call, in seconds
    #[arg(long, env = "LASTFM_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Upper bound for a whole request, in seconds (Last.fm timeout + 5 by default)
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Last.fm API endpoint
    #[arg(long, env = "LASTFM_API_BASE_URL", default_value = LASTFM_BASE_URL)]
    api_base_url: String,
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        let mut builder = ConfigBuilder::new()
            .api_key(self.api_key)
            .api_base_url(self.api_base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .bind_addr(SocketAddr::new(self.host, self.port));
        if let Some(secs) = self.request_timeout_secs {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_end_up_in_config() {
        let cli = Cli::try_parse_from([
            "lastsong",
            "--api-key",
            "key",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--timeout-secs",
            "3",
            "--request-timeout-secs",
            "7",
            "--api-base-url",
            "http://localhost:1234/2.0/",
        ])
        .unwrap();

        let config = cli.into_config().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.request_timeout, Duration::from_secs(7));
        assert_eq!(config.api_base_url, "http://localhost:1234/2.0/");
    }
}
