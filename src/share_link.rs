//! Share links for a draw.
//!
//! Two forms exist: `?s=<snapshot id>` pointing at a stored snapshot, and
//! `?shared=<payload>` carrying the dishes themselves as base64url JSON.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use thiserror::Error;

use crate::entities;

pub const SNAPSHOT_PARAM: &str = "s";
pub const INLINE_PARAM: &str = "shared";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareLinkKind {
    Snapshot(entities::ShareSnapshotId),
    Inline,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareLink {
    pub url: String,
    pub kind: ShareLinkKind,
}

/// What a URL asks the app to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareQuery {
    Snapshot(entities::ShareSnapshotId),
    Inline(String),
}

#[derive(Error, Debug)]
pub enum InlinePayloadError {
    #[error("payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not a dish list: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn snapshot_url(base_url: &str, id: &entities::ShareSnapshotId) -> String {
    with_param(base_url, SNAPSHOT_PARAM, id.as_str())
}

pub fn inline_url(base_url: &str, dishes: &[entities::SharedDish]) -> Result<String, InlinePayloadError> {
    Ok(with_param(base_url, INLINE_PARAM, &encode_inline_payload(dishes)?))
}

pub fn encode_inline_payload(dishes: &[entities::SharedDish]) -> Result<String, InlinePayloadError> {
    let json = serde_json::to_vec(dishes)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

pub fn decode_inline_payload(payload: &str) -> Result<Vec<entities::SharedDish>, InlinePayloadError> {
    // padded payloads are accepted, including a percent-encoded '='
    let mut payload = payload.trim();
    loop {
        if let Some(rest) = payload.strip_suffix('=') {
            payload = rest;
        } else if let Some(rest) = payload.strip_suffix("%3D").or_else(|| payload.strip_suffix("%3d")) {
            payload = rest;
        } else {
            break;
        }
    }
    let json = URL_SAFE_NO_PAD.decode(payload)?;
    Ok(serde_json::from_slice(&json)?)
}

/// Reads the share parameters of `url`. `s` wins over `shared`.
pub fn parse_share_query(url: &str) -> Option<ShareQuery> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or_default();
    let params = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .collect::<Vec<_>>();

    let lookup = |name: &str| {
        params
            .iter()
            .find(|(key, value)| *key == name && !value.is_empty())
            .map(|(_, value)| value.to_string())
    };

    if let Some(id) = lookup(SNAPSHOT_PARAM) {
        Some(ShareQuery::Snapshot(entities::ShareSnapshotId::from(id)))
    } else {
        lookup(INLINE_PARAM).map(ShareQuery::Inline)
    }
}

fn with_param(base_url: &str, name: &str, value: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", base_url, separator, name, value)
}
