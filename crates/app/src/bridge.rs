//! Echo endpoint for notification payloads posted to `…/send-data`.

use actix_web::{HttpRequest, HttpResponse, web::Bytes};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::data::MessageResponse;

pub(crate) const SEND_DATA_SUFFIX: &str = "/send-data";

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct BridgeResponse {
    pub(crate) status: &'static str,
    pub(crate) received_data: Value,
}

pub(crate) fn intercepts(path: &str) -> bool {
    path.ends_with(SEND_DATA_SUFFIX)
}

pub(crate) fn acknowledge(received_data: Value) -> BridgeResponse {
    BridgeResponse {
        status: "success",
        received_data,
    }
}

/// Parse the body as JSON, log it and echo it back.
pub(crate) fn handle(req: &HttpRequest, body: &Bytes) -> HttpResponse {
    metrics::counter!("bridge_requests_total").increment(1);
    match serde_json::from_slice::<Value>(body) {
        Ok(payload) => {
            info!("Received data on {}: {payload}", req.path());
            HttpResponse::Ok().json(acknowledge(payload))
        }
        Err(err) => {
            warn!("Rejected {} payload: {err}", req.path());
            HttpResponse::BadRequest().json(MessageResponse::new("Invalid JSON payload"))
        }
    }
}
