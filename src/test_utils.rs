#![allow(missing_docs)]

use std::str::FromStr;

use axum_test::TestServer;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    build_router,
    stores::sqlite::{SQLAppState, create_app_state},
};

#[track_caller]
pub(crate) fn decimal(text: &str) -> Decimal {
    Decimal::from_str(text).expect("Could not parse decimal")
}

#[track_caller]
pub(crate) fn must_create_test_state() -> SQLAppState {
    let connection =
        Connection::open_in_memory().expect("Could not open database in memory.");

    create_app_state(connection).expect("Could not initialize database.")
}

#[track_caller]
pub(crate) fn must_create_test_server(state: SQLAppState) -> TestServer {
    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}
