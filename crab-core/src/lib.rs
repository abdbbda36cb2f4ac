use std::time::Duration;

use crab_database::Database;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    /// Unix seconds at which the process started serving.
    pub started_at: u64,
    /// HTTP proxy the client was built with, if any.
    pub http_proxy: Option<String>,
    /// Period of the appearance scheduler.
    pub spawn_interval: Duration,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
