use std::sync::Arc;

use anyhow::Result;
use seamart_api::FeedClient;
use seamart_core::{BasketItem, ClientConfig};
use seamart_service::{BasketService, ErrorNotice};
use seamart_storage::SqliteStore;
use serde::Serialize;

use super::print_json;
use crate::BasketAction;

#[derive(Serialize)]
struct BasketSummary {
    items: Vec<BasketItem>,
    total_quantity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<ErrorNotice>,
}

pub(crate) async fn run_basket(config: &ClientConfig, action: BasketAction) -> Result<()> {
    let store = SqliteStore::open(&config.database_path())?;
    let service = BasketService::new(Arc::new(store));
    service.load().await;

    let outcome = apply(config, &service, action).await;

    print_json(&BasketSummary {
        items: service.items().await,
        total_quantity: service.total_quantity().await,
        notice: service.notice().await,
    })?;
    outcome
}

async fn apply(config: &ClientConfig, service: &BasketService, action: BasketAction) -> Result<()> {
    match action {
        BasketAction::List => {},
        BasketAction::Add { id, quantity } => {
            let item = FeedClient::from_config(config)?.fetch_item(&id).await?;
            let name = item.display_name(&config.locale).to_owned();
            let total = service.add(item, quantity).await?;
            tracing::info!(item = %id, name = %name, total, "Basket updated");
        },
        BasketAction::Set { id, quantity } => service.set_quantity(&id, quantity).await?,
        BasketAction::Remove { id } => {
            if !service.remove(&id).await? {
                tracing::warn!(item = %id, "Item was not in the basket");
            }
        },
        BasketAction::Clear => service.clear().await?,
    }
    Ok(())
}
