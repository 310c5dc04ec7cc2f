mod forecast;
mod history;
mod lookup;
mod search;

pub use forecast::cmd_forecast;
pub use history::cmd_history;
pub use lookup::cmd_lookup;
pub use search::cmd_search;

use crate::clients::proxy::ProxyClient;
use crate::config::Config;
use crate::state::build_shared_http_client;

fn proxy_client(config: &Config) -> anyhow::Result<ProxyClient> {
    let http = build_shared_http_client(config.client.request_timeout_seconds.into())?;
    Ok(ProxyClient::new(http, &config.client.api_url))
}
