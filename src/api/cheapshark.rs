use crate::{traits::DealSource, Status};
use async_trait::async_trait;
use tracing::{instrument, trace};

/// Client of the CheapShark deals API.
pub struct CheapSharkApi {
    url: String,
    client: reqwest::Client,
}

impl CheapSharkApi {
    pub fn new(url: &str) -> CheapSharkApi {
        CheapSharkApi {
            url: url.trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        }
    }

    fn deals_uri(&self, title: &str) -> String {
        format!("{}{DEALS_SERVICE}?title={title}", self.url)
    }
}

impl Default for CheapSharkApi {
    fn default() -> Self {
        CheapSharkApi::new(CHEAPSHARK_HOST)
    }
}

#[async_trait]
impl DealSource for CheapSharkApi {
    fn id() -> String {
        String::from("cheapshark")
    }

    #[instrument(level = "trace", skip(self))]
    async fn search(&self, title: &str) -> Result<String, Status> {
        let uri = self.deals_uri(title);

        let resp = self.client.get(&uri).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Status::unavailable(format!(
                "deals request for '{title}' returned {status}"
            )));
        }

        let text = resp.text().await?;
        trace!("deals response: {} bytes", text.len());
        Ok(text)
    }
}

pub const CHEAPSHARK_HOST: &str = "https://www.cheapshark.com/api/1.0";
const DEALS_SERVICE: &str = "/deals";
