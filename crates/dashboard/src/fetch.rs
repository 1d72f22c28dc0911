//! The seam between the loader and whatever performs network I/O.
//!
//! The browser front end implements [`Fetcher`] on top of `fetch`; tests use
//! [`MemoryFetcher`].

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

/// Boxed future without a `Send` bound; browser futures are single-threaded.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} returned HTTP {status}{}", body_suffix(.body))]
    Status {
        url: String,
        status: u16,
        body: String,
    },
}

/// Longest body excerpt carried into a status message, in characters.
pub const BODY_EXCERPT_CHARS: usize = 200;

fn body_suffix(body: &str) -> String {
    let excerpt = body_excerpt(body);
    if excerpt.is_empty() {
        String::new()
    } else {
        format!(": {excerpt}")
    }
}

/// Visible text of an error body: markup removed, whitespace collapsed,
/// capped at [`BODY_EXCERPT_CHARS`].
fn body_excerpt(body: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for c in body.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => text.push(c),
        }
    }
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= BODY_EXCERPT_CHARS {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(BODY_EXCERPT_CHARS).collect();
    cut.push_str("...");
    cut
}

/// Retrieves a document as text.
///
/// Implementations must not retry or cache; a failure is reported once and
/// the caller gives up.
pub trait Fetcher {
    fn fetch_text<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>>;
}

/// Serves fixed responses keyed by URL. Unknown URLs fail like a 404.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    responses: BTreeMap<String, Result<String, FetchError>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Ok(body.into()));
        self
    }

    pub fn with_error(mut self, url: impl Into<String>, error: FetchError) -> Self {
        self.responses.insert(url.into(), Err(error));
        self
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch_text<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>> {
        let result = match self.responses.get(url) {
            Some(r) => r.clone(),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
                body: String::new(),
            }),
        };
        Box::pin(async move { result })
    }
}
