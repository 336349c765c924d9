use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

/// Errors raised by the node and its HTTP surface.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Some elements of a transaction are missing: {}", .0.join(", "))]
    MissingTransactionFields(Vec<&'static str>),

    #[error("no nodes supplied")]
    NoNodes,

    #[error("invalid node address: {0}")]
    InvalidNodeAddress(String),

    #[error("peer {peer} unreachable: {source}")]
    PeerUnreachable {
        peer: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("peer {peer} returned a malformed chain: {reason}")]
    MalformedPeerResponse { peer: String, reason: String },

    #[error("mining failed: {0}")]
    Mining(String),
}

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingTransactionFields(_) | Self::NoNodes | Self::InvalidNodeAddress(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::PeerUnreachable { .. } | Self::MalformedPeerResponse { .. } => {
                StatusCode::BAD_GATEWAY
            }
            Self::Mining(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
