use formats::{Boundary, BoundaryError, Dataset, DatasetError, SanitizeRules};
use futures_util::future::try_join;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::context::DashboardContext;
use crate::fetch::{FetchError, Fetcher};

/// Why the dashboard could not start. The `Display` text is what the page
/// shows in place of the dashboard body.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to load policy data: {0}")]
    DatasetFetch(#[source] FetchError),
    #[error("Failed to load policy data: {0}")]
    DatasetParse(#[source] DatasetError),
    #[error("Failed to load boundary map: {0}")]
    BoundaryFetch(#[source] FetchError),
    #[error("Failed to load boundary map: {0}")]
    BoundaryParse(#[source] BoundaryError),
}

/// Both startup documents, parsed.
#[derive(Debug, Clone)]
pub struct LoadedSources {
    pub dataset: Dataset,
    pub boundary: Boundary,
}

async fn load_dataset(fetcher: &impl Fetcher, url: &str) -> Result<Dataset, LoadError> {
    let text = fetcher
        .fetch_text(url)
        .await
        .map_err(LoadError::DatasetFetch)?;
    let dataset = Dataset::from_json_str(&text).map_err(LoadError::DatasetParse)?;
    debug!(url, policies = dataset.policies.len(), "policy dataset loaded");
    Ok(dataset)
}

async fn load_boundary(fetcher: &impl Fetcher, url: &str) -> Result<Boundary, LoadError> {
    let text = fetcher
        .fetch_text(url)
        .await
        .map_err(LoadError::BoundaryFetch)?;
    let boundary = Boundary::from_geojson_str(&text).map_err(LoadError::BoundaryParse)?;
    debug!(url, regions = boundary.len(), "boundary loaded");
    Ok(boundary)
}

/// Fetches the dataset and the boundary concurrently. The first failure
/// aborts the whole load; there is no retry.
pub async fn load_sources(
    fetcher: &impl Fetcher,
    config: &DashboardConfig,
) -> Result<LoadedSources, LoadError> {
    let (dataset, boundary) = try_join(
        load_dataset(fetcher, &config.dataset_url),
        load_boundary(fetcher, &config.boundary_url),
    )
    .await?;
    Ok(LoadedSources { dataset, boundary })
}

/// Loads both documents and builds the dashboard context from them.
pub async fn load_dashboard(
    fetcher: &impl Fetcher,
    config: &DashboardConfig,
) -> Result<DashboardContext, LoadError> {
    let sources = load_sources(fetcher, config).await?;
    let context =
        DashboardContext::new(sources.dataset, &sources.boundary, &SanitizeRules::default());
    info!(
        policies = context.engine().len(),
        regions = context.boundary().len(),
        "dashboard ready"
    );
    Ok(context)
}
