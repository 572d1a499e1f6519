// src/registry.rs

use anyhow::{Context, Result};
use futures::{stream::FuturesUnordered, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};
use tokio::time::sleep;
use tracing::{debug, error, warn};
use url::Url;

/// Knowledge-graph API root used to test whether a dcid is already defined.
pub const DEFAULT_API_ROOT: &str = "https://autopush.api.datacommons.org";

/// The node API rejects very large dcid lists; stay under its limit.
const MAX_BATCH: usize = 450;
const MAX_CONCURRENCY: usize = 3;
const MAX_RETRIES: u32 = 3;
const BACKOFF_MS: u64 = 500;

#[derive(Serialize)]
struct PropertyValuesRequest<'a> {
    dcids: &'a [String],
    property: &'static str,
    direction: &'static str,
}

#[derive(Deserialize)]
struct PropertyValuesResponse {
    /// JSON-encoded map from dcid to its property values.
    #[serde(default)]
    payload: String,
}

/// Ask the registry which of `dcids` are already defined. Returns a map from
/// dcid to whether it exists. Batches are issued concurrently and retried
/// independently; any batch failing after retries fails the whole check.
pub async fn check_dcid_existence(
    client: &Client,
    api_root: &str,
    dcids: &[String],
) -> Result<HashMap<String, bool>> {
    let endpoint = Url::parse(api_root)
        .with_context(|| format!("parsing API root {}", api_root))?
        .join("node/property-values")?;

    let mut tasks = FuturesUnordered::new();
    let mut status = HashMap::with_capacity(dcids.len());

    for batch in dcids.chunks(MAX_BATCH) {
        tasks.push(check_batch(client.clone(), endpoint.clone(), batch.to_vec()));

        // throttle concurrency
        if tasks.len() >= MAX_CONCURRENCY {
            if let Some(res) = tasks.next().await {
                status.extend(res?);
            }
        }
    }

    // drain remaining batches
    while let Some(res) = tasks.next().await {
        status.extend(res?);
    }

    Ok(status)
}

/// Identifiers the registry reported as absent, alphabetically sorted.
pub fn missing_dcids(status: &HashMap<String, bool>) -> Vec<String> {
    let mut missing: Vec<String> = status
        .iter()
        .filter(|(_, exists)| !**exists)
        .map(|(dcid, _)| dcid.clone())
        .collect();
    missing.sort();
    missing
}

async fn check_batch(
    client: Client,
    endpoint: Url,
    batch: Vec<String>,
) -> Result<HashMap<String, bool>> {
    let resp = post_with_retry(&client, &endpoint, &batch).await?;
    existence_from_payload(&resp.payload, &batch)
}

/// The payload is a JSON map keyed by dcid; a dcid exists iff its entry
/// carries any values. Absent keys count as missing.
fn existence_from_payload(payload: &str, batch: &[String]) -> Result<HashMap<String, bool>> {
    let nodes: HashMap<String, serde_json::Value> =
        serde_json::from_str(payload).context("decoding node/property-values payload")?;

    let mut out = HashMap::with_capacity(batch.len());
    for dcid in batch {
        let exists = match nodes.get(dcid) {
            Some(serde_json::Value::Object(map)) => !map.is_empty(),
            Some(serde_json::Value::Array(values)) => !values.is_empty(),
            Some(serde_json::Value::Null) | None => false,
            Some(_) => true,
        };
        debug!(dcid = %dcid, exists, "existence check");
        out.insert(dcid.clone(), exists);
    }
    Ok(out)
}

async fn post_with_retry(
    client: &Client,
    endpoint: &Url,
    dcids: &[String],
) -> Result<PropertyValuesResponse> {
    let request = PropertyValuesRequest {
        dcids,
        property: "typeOf",
        direction: "out",
    };

    let mut attempts = 0;
    loop {
        match post_core(client, endpoint, &request).await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempts < MAX_RETRIES => {
                attempts += 1;
                let backoff = BACKOFF_MS * 2u64.pow(attempts - 1);
                warn!(%endpoint, attempt = attempts, delay_ms = backoff, error = %e, "Retrying");
                sleep(Duration::from_millis(backoff)).await;
            }
            Err(e) => {
                error!(%endpoint, error = %e, "Exhausted retries");
                return Err(e);
            }
        }
    }
}

async fn post_core(
    client: &Client,
    endpoint: &Url,
    request: &PropertyValuesRequest<'_>,
) -> Result<PropertyValuesResponse> {
    Ok(client
        .post(endpoint.clone())
        .json(request)
        .send()
        .await
        .with_context(|| format!("POST {} failed", endpoint))?
        .error_for_status()
        .with_context(|| format!("Non-success status from {}", endpoint))?
        .json::<PropertyValuesResponse>()
        .await
        .with_context(|| format!("Decoding response from {}", endpoint))?)
}
