//! Global command-line settings, each overridable from the environment.

use std::time::Duration;

use clap::Args;
use ev_insights_sync::{DEFAULT_TIMEOUT, WA_EV_DATA_URL};

#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Location of the dataset's `rows.json` export.
    #[arg(long, env = "EV_INSIGHTS_URL", default_value = WA_EV_DATA_URL, global = true)]
    pub url: String,

    /// Give up on the download after this many seconds (0 waits forever).
    #[arg(
        long,
        env = "EV_INSIGHTS_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        global = true
    )]
    pub timeout_secs: u64,
}

impl Settings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
