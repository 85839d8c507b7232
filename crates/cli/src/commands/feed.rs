use std::sync::Arc;

use anyhow::{Context, Result};
use seamart_api::FeedClient;
use seamart_core::{ClientConfig, FilterSet};
use seamart_service::{FeedController, LoadOutcome, ServiceError};

use super::print_json;

fn client(config: &ClientConfig) -> Result<Arc<FeedClient>> {
    Ok(Arc::new(FeedClient::from_config(config)?))
}

pub(crate) async fn run_feed(config: &ClientConfig, filter: Option<String>, pages: u32) -> Result<()> {
    let filters: FilterSet = match filter.as_deref() {
        Some(raw) => raw.parse().with_context(|| format!("invalid --filter '{raw}'"))?,
        None => FilterSet::new(),
    };
    let controller = FeedController::new(client(config)?, config.page_size);

    let mut outcome = controller.set_filters(filters).await.map(|_| ());
    for _ in 1..pages.max(1) {
        if outcome.is_err() {
            break;
        }
        match controller.load_more().await {
            Ok(LoadOutcome::Skipped) => break,
            Ok(_) => {},
            Err(e) => outcome = Err(e),
        }
    }

    print_json(&controller.view().await)?;
    outcome.map_err(report)
}

fn report(err: ServiceError) -> anyhow::Error {
    if err.is_transient() {
        tracing::warn!(error = %err, "Request failed, retrying may help");
    }
    err.into()
}

pub(crate) async fn run_search(config: &ClientConfig, query: &str) -> Result<()> {
    let client = client(config)?;
    let controller = FeedController::new(client.clone(), config.page_size).with_search(client);
    let outcome = controller.search(query).await;
    print_json(&controller.view().await)?;
    outcome.map(|_| ()).map_err(report)
}

pub(crate) async fn run_item(config: &ClientConfig, id: &str) -> Result<()> {
    let item = client(config)?.fetch_item(id).await?;
    print_json(&item)
}
