use clap::Parser;
use shiruk_core::{ClientConfig, ControllerConfig, DEFAULT_API_BASE, Locale};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
pub struct ClientOpts {
    /// Base URL of the analysis backend
    #[arg(long, env = "SHIRUK_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Give up on a request after this many seconds (default: wait forever)
    #[arg(long, env = "SHIRUK_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}

impl ClientOpts {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base: self.api_base.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub struct UiOpts {
    /// Language of messages and labels (ar, en)
    #[arg(long, env = "SHIRUK_LANG", default_value = "ar")]
    pub lang: Locale,
}

impl UiOpts {
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            locale: self.lang,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}
