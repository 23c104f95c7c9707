//! A ledger bookkeeping service.
//!
//! Records monetary transactions between a sender and a recipient and serves
//! them over a JSON REST API. Transactions can be listed, summed, have their
//! value updated and be soft-deleted. Soft-deleted transactions stay in the
//! database but are hidden from every public read.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod routing;
pub mod stores;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use database_id::TransactionId;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{NewTransaction, StoredTransaction, Transaction};

/// How long in-flight requests are given to finish once a shutdown signal arrives.
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested transaction does not exist or has been soft-deleted.
    ///
    /// Clients should treat this as final for the given ID, retrying will not
    /// change the outcome.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The ID in the request path did not match the ID in the request body.
    ///
    /// Raised before the store is touched, so the store is left unchanged.
    #[error("the ID in the URL ({path_id}) must match the ID in the request body ({body_id:?})")]
    IdMismatch {
        /// The ID taken from the request path.
        path_id: TransactionId,
        /// The ID found in the request body, if any.
        body_id: Option<TransactionId>,
    },

    /// A transaction was created with an empty sender or recipient.
    ///
    /// The string names the offending field.
    #[error("{0} cannot be empty")]
    EmptyParty(&'static str),

    /// Summing the active transactions exceeded the range of a decimal.
    #[error("the sum of all transactions is too large to represent")]
    SumOverflow,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn render_error(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => render_error(StatusCode::NOT_FOUND, self.to_string()),
            Error::IdMismatch { .. } | Error::EmptyParty(_) => {
                render_error(StatusCode::BAD_REQUEST, self.to_string())
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        }
    }
}

#[cfg(test)]
mod error_response_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn not_found_is_404() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_failures_are_400() {
        let mismatch = Error::IdMismatch {
            path_id: 1,
            body_id: Some(2),
        };

        assert_eq!(mismatch.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::EmptyParty("sender").into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_failures_are_500() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            Error::DatabaseLockError.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn other_sql_errors_map_to_sql_error() {
        assert_eq!(
            Error::from(rusqlite::Error::InvalidQuery),
            Error::SqlError(rusqlite::Error::InvalidQuery)
        );
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }
}
