//! AWS Lambda handler for product search
//!
//! Payload: a JSON `SearchRequest`. Response: the JSON `SearchPage`, or
//! `{"error": ..., "kind": "invalid_query"}` for bad input. Catalog failures
//! fail the invocation.
//!
//! Environment:
//! - `SAVINGS_CATALOG_PATH`  catalog file (defaults to the bundled catalog)
//! - `SAVINGS_ENGINE_CONFIG` optional engine config file

use anyhow::Context;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use std::env;
use std::sync::Arc;

use savings_ranker::product::DEFAULT_CATALOG_PATH;
use savings_ranker::{EngineConfig, InMemoryCatalog, SearchEngine, SearchError, SearchRequest};

const CATALOG_ENV: &str = "SAVINGS_CATALOG_PATH";
const CONFIG_ENV: &str = "SAVINGS_ENGINE_CONFIG";

fn build_engine() -> anyhow::Result<SearchEngine<InMemoryCatalog>> {
    let catalog_path = env::var(CATALOG_ENV).unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string());
    let catalog = InMemoryCatalog::from_path(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path))?;

    let config = match env::var(CONFIG_ENV) {
        Ok(path) => EngineConfig::load(&path).with_context(|| format!("loading engine config {}", path))?,
        Err(_) => EngineConfig::default(),
    };

    log::info!("Search handler ready with {} products", catalog.len());
    Ok(SearchEngine::with_config(catalog, config))
}

fn invalid(message: impl std::fmt::Display) -> Value {
    json!({ "error": message.to_string(), "kind": "invalid_query" })
}

/// Map one payload to its response body; bad input becomes an error body
fn respond(engine: &SearchEngine<InMemoryCatalog>, payload: Value) -> Result<Value, Error> {
    let request: SearchRequest = match serde_json::from_value(payload) {
        Ok(request) => request,
        Err(e) => return Ok(invalid(e)),
    };

    match engine.search(&request) {
        Ok(page) => Ok(serde_json::to_value(&page)?),
        Err(e @ SearchError::InvalidQuery(_)) => Ok(invalid(e)),
        Err(e) => Err(e.into()),
    }
}

async fn handle(engine: &SearchEngine<InMemoryCatalog>, payload: Value) -> Result<Value, Error> {
    respond(engine, payload).map_err(|e| {
        log::error!("Search failed: {}", e);
        e
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let engine = Arc::new(build_engine()?);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let engine = Arc::clone(&engine);
        async move { handle(&engine, event.payload).await }
    }))
    .await
}
