use dashboard::{FetchError, Fetcher, LocalBoxFuture};
use gloo_net::http::Request;

/// [`Fetcher`] backed by the browser's `fetch`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooFetcher;

impl Fetcher for GlooFetcher {
    fn fetch_text<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>> {
        Box::pin(async move {
            let transport = |e: gloo_net::Error| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            };

            let resp = Request::get(url).send().await.map_err(transport)?;
            if !resp.ok() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                    body,
                });
            }
            resp.text().await.map_err(transport)
        })
    }
}
