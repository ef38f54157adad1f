//! Test Helpers

use crate::gateway::{GatewayError, MockCatalogGateway};

/// A gateway that fails the test on any write.
pub(crate) fn read_only_gateway() -> MockCatalogGateway {
    let mut gateway = MockCatalogGateway::new();

    gateway.expect_insert_service().never();
    gateway.expect_update_service().never();
    gateway.expect_delete_service().never();
    gateway.expect_reorder_services().never();
    gateway.expect_insert_bundle().never();
    gateway.expect_update_bundle().never();
    gateway.expect_delete_bundle().never();
    gateway.expect_save_settings().never();

    gateway
}

/// A gateway that fails the test on any read.
pub(crate) fn write_only_gateway() -> MockCatalogGateway {
    let mut gateway = MockCatalogGateway::new();

    gateway.expect_list_services().never();
    gateway.expect_list_bundles().never();
    gateway.expect_fetch_settings().never();

    gateway
}

/// The store refusing a write.
pub(crate) fn rejection() -> GatewayError {
    GatewayError::Rejected {
        status: 403,
        code: Some("42501".to_string()),
        message: "new row violates row-level security policy".to_string(),
    }
}
