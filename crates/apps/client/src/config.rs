use std::env;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use reqwest::Url;
use scene::SelectionMode;

use crate::error::ClientError;

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Place markers, group them into polygons and ask a geospatial service about them"
)]
pub struct Args {
    /// Base URL of the reasoning service (default: $NL_GEO_SERVICE_URL or 127.0.0.1:8000)
    #[arg(long)]
    pub service_url: Option<String>,

    /// Selection mode
    #[arg(long, value_enum, default_value_t = ModeArg::Multi)]
    pub mode: ModeArg,

    /// How responses to overlapping commands are applied
    #[arg(long, value_enum, default_value_t = ResponseOrdering::Arrival)]
    pub ordering: ResponseOrdering,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Single,
    Multi,
}

impl From<ModeArg> for SelectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Single => SelectionMode::Single,
            ModeArg::Multi => SelectionMode::Multi,
        }
    }
}

/// Policy for responses that arrive while newer commands are in flight.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ResponseOrdering {
    /// Apply every response as it arrives; the last arrival wins.
    #[default]
    Arrival,
    /// Drop responses to commands superseded by a later dispatch.
    LatestOnly,
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub service_url: Url,
    pub mode: SelectionMode,
    pub ordering: ResponseOrdering,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn from_args(args: Args) -> Result<Self, ClientError> {
        let raw_url = args.service_url.unwrap_or_else(|| {
            env::var("NL_GEO_SERVICE_URL").unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string())
        });
        let service_url = Url::parse(&raw_url)
            .map_err(|e| ClientError::Config(format!("service url {raw_url:?}: {e}")))?;
        if !matches!(service_url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "service url must be http(s), got {raw_url:?}"
            )));
        }
        if args.timeout_secs == 0 {
            return Err(ClientError::Config("timeout must be positive".to_string()));
        }

        Ok(Self {
            service_url,
            mode: args.mode.into(),
            ordering: args.ordering,
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }

    /// `POST` target for commands.
    pub fn process_url(&self) -> Result<Url, ClientError> {
        let base = self.service_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/process"))
            .map_err(|e| ClientError::Config(format!("process url: {e}")))
    }
}
