//! Admin service
//!
//! Mutations are applied to the local catalog first, then written to the
//! store. A rejected write reverts the local change, including any scope
//! entries purged with a deleted service, and surfaces
//! [`AdminError::Rejected`].

use std::sync::Arc;

use jobstack::{
    bundles::{Bundle, BundleDraft, BundleId},
    catalog::{Change, CatalogError, Undo},
    services::{Service, ServiceData, ServiceId},
    settings::SiteSettings,
};
use rust_decimal::Decimal;
use tracing::{error, info};

use crate::{
    admin::{errors::AdminError, gate::Authorized},
    gateway::{CatalogGateway, GatewayError},
    state::AppState,
};

#[derive(Clone)]
pub struct AdminService {
    gateway: Arc<dyn CatalogGateway>,
}

impl std::fmt::Debug for AdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminService").finish_non_exhaustive()
    }
}

impl AdminService {
    #[must_use]
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self { gateway }
    }

    /// Add a service at the end of the catalog.
    ///
    /// # Errors
    ///
    /// - [`AdminError::MissingRequiredData`]: the name is blank or the price is zero.
    /// - [`AdminError::Rejected`]: the store refused the insert.
    pub async fn add_service(
        &self,
        _: &Authorized,
        state: &mut AppState,
        data: ServiceData,
    ) -> Result<Service, AdminError> {
        check_service(&data)?;

        let provisional = state.catalog.provisional_service_id();
        let sort_order = state.catalog.next_sort_order();
        let change = Change::AddService(Service::new(provisional, sort_order, data.clone()));
        let undo = state.catalog.apply(change, &mut state.scope)?;

        match self.gateway.insert_service(sort_order, data).await {
            Ok(confirmed) => {
                state.catalog.confirm_service(provisional, confirmed.clone())?;

                info!(id = %confirmed.id, name = confirmed.name(), "service added");

                Ok(confirmed)
            }
            Err(source) => Err(rollback(state, undo, "add service", source)),
        }
    }

    /// Replace a service's content.
    ///
    /// # Errors
    ///
    /// - [`AdminError::MissingRequiredData`]: the name is blank or the price is zero.
    /// - [`AdminError::Catalog`]: no service has this id.
    /// - [`AdminError::Rejected`]: the store refused the update.
    pub async fn edit_service(
        &self,
        _: &Authorized,
        state: &mut AppState,
        id: ServiceId,
        data: ServiceData,
    ) -> Result<Service, AdminError> {
        check_service(&data)?;

        let undo = state
            .catalog
            .apply(Change::EditService(id, data.clone()), &mut state.scope)?;

        match self.gateway.update_service(id, data).await {
            Ok(confirmed) => {
                state.catalog.confirm_service(id, confirmed.clone())?;

                Ok(confirmed)
            }
            Err(source) => Err(rollback(state, undo, "edit service", source)),
        }
    }

    /// Delete a service and every scope entry carrying its id.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Catalog`]: no service has this id.
    /// - [`AdminError::Rejected`]: the store refused the delete.
    pub async fn delete_service(
        &self,
        _: &Authorized,
        state: &mut AppState,
        id: ServiceId,
    ) -> Result<(), AdminError> {
        let undo = state
            .catalog
            .apply(Change::DeleteService(id), &mut state.scope)?;

        match self.gateway.delete_service(id).await {
            Ok(()) => {
                info!(%id, "service deleted");

                Ok(())
            }
            Err(source) => Err(rollback(state, undo, "delete service", source)),
        }
    }

    /// Add a bundle priced against the current services.
    ///
    /// # Errors
    ///
    /// - [`AdminError::MissingRequiredData`]: the name is blank, the discount
    ///   is zero or no member is listed.
    /// - [`AdminError::Catalog`]: the price could not be computed.
    /// - [`AdminError::Rejected`]: the store refused the insert.
    pub async fn add_bundle(
        &self,
        _: &Authorized,
        state: &mut AppState,
        draft: BundleDraft,
    ) -> Result<Bundle, AdminError> {
        check_bundle(&draft)?;

        let data = draft
            .price(state.catalog.services())
            .map_err(CatalogError::from)?;
        let provisional = state.catalog.provisional_bundle_id();
        let change = Change::AddBundle(Bundle::new(provisional, data.clone()));
        let undo = state.catalog.apply(change, &mut state.scope)?;

        match self.gateway.insert_bundle(data).await {
            Ok(confirmed) => {
                state.catalog.confirm_bundle(provisional, confirmed.clone())?;

                info!(id = %confirmed.id, name = confirmed.name(), "bundle added");

                Ok(confirmed)
            }
            Err(source) => Err(rollback(state, undo, "add bundle", source)),
        }
    }

    /// Replace a bundle, repricing it against the current services.
    ///
    /// # Errors
    ///
    /// - [`AdminError::MissingRequiredData`]: see [`AdminService::add_bundle`].
    /// - [`AdminError::Catalog`]: no bundle has this id.
    /// - [`AdminError::Rejected`]: the store refused the update.
    pub async fn edit_bundle(
        &self,
        _: &Authorized,
        state: &mut AppState,
        id: BundleId,
        draft: BundleDraft,
    ) -> Result<Bundle, AdminError> {
        check_bundle(&draft)?;

        let data = draft
            .price(state.catalog.services())
            .map_err(CatalogError::from)?;
        let undo = state
            .catalog
            .apply(Change::EditBundle(id, data.clone()), &mut state.scope)?;

        match self.gateway.update_bundle(id, data).await {
            Ok(confirmed) => {
                state.catalog.confirm_bundle(id, confirmed.clone())?;

                Ok(confirmed)
            }
            Err(source) => Err(rollback(state, undo, "edit bundle", source)),
        }
    }

    /// Delete a bundle. Scope entries copied from it are kept.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Catalog`]: no bundle has this id.
    /// - [`AdminError::Rejected`]: the store refused the delete.
    pub async fn delete_bundle(
        &self,
        _: &Authorized,
        state: &mut AppState,
        id: BundleId,
    ) -> Result<(), AdminError> {
        let undo = state
            .catalog
            .apply(Change::DeleteBundle(id), &mut state.scope)?;

        match self.gateway.delete_bundle(id).await {
            Ok(()) => {
                info!(%id, "bundle deleted");

                Ok(())
            }
            Err(source) => Err(rollback(state, undo, "delete bundle", source)),
        }
    }

    /// Put services in `order`, renumber them from zero and persist every
    /// position in one bulk write.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Catalog`]: `order` is not a permutation of the services.
    /// - [`AdminError::Rejected`]: the store refused the write.
    pub async fn reorder(
        &self,
        _: &Authorized,
        state: &mut AppState,
        order: Vec<ServiceId>,
    ) -> Result<(), AdminError> {
        let undo = state
            .catalog
            .apply(Change::Reorder(order), &mut state.scope)?;

        match self
            .gateway
            .reorder_services(state.catalog.sort_orders())
            .await
        {
            Ok(()) => Ok(()),
            Err(source) => Err(rollback(state, undo, "reorder services", source)),
        }
    }

    /// Drag the service at position `from` to position `to`.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Catalog`]: either position is outside the catalog.
    /// - [`AdminError::Rejected`]: the store refused the write.
    pub async fn move_service(
        &self,
        authorized: &Authorized,
        state: &mut AppState,
        from: usize,
        to: usize,
    ) -> Result<(), AdminError> {
        let order = state.catalog.move_service(from, to)?;

        if from == to {
            return Ok(());
        }

        self.reorder(authorized, state, order).await
    }

    /// Replace the settings wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Rejected`] if the store refused the write.
    pub async fn update_settings(
        &self,
        _: &Authorized,
        state: &mut AppState,
        settings: SiteSettings,
    ) -> Result<(), AdminError> {
        let undo = state
            .catalog
            .apply(Change::UpdateSettings(settings.clone()), &mut state.scope)?;

        match self.gateway.save_settings(settings).await {
            Ok(()) => {
                info!("settings saved");

                Ok(())
            }
            Err(source) => Err(rollback(state, undo, "save settings", source)),
        }
    }

    /// Change one setting, named in either store or app form.
    ///
    /// # Errors
    ///
    /// - [`AdminError::UnknownSetting`]: no setting has this name.
    /// - [`AdminError::Rejected`]: the store refused the write.
    pub async fn set_setting(
        &self,
        authorized: &Authorized,
        state: &mut AppState,
        name: &str,
        value: &str,
    ) -> Result<(), AdminError> {
        let settings = state
            .catalog
            .settings()
            .with_field(name, value)?
            .ok_or_else(|| AdminError::UnknownSetting(name.to_string()))?;

        self.update_settings(authorized, state, settings).await
    }
}

fn check_service(data: &ServiceData) -> Result<(), AdminError> {
    if data.name.trim().is_empty() {
        return Err(AdminError::MissingRequiredData("name"));
    }

    if data.price == Decimal::ZERO {
        return Err(AdminError::MissingRequiredData("price"));
    }

    Ok(())
}

fn check_bundle(draft: &BundleDraft) -> Result<(), AdminError> {
    if draft.name.trim().is_empty() {
        return Err(AdminError::MissingRequiredData("name"));
    }

    if draft.discount == Decimal::ZERO {
        return Err(AdminError::MissingRequiredData("discount"));
    }

    if draft.service_ids.is_empty() {
        return Err(AdminError::MissingRequiredData("services"));
    }

    Ok(())
}

fn rollback(
    state: &mut AppState,
    undo: Undo,
    operation: &'static str,
    source: GatewayError,
) -> AdminError {
    error!(%source, operation, "store rejected write, reverting");

    state.catalog.revert(undo, &mut state.scope);

    AdminError::Rejected { operation, source }
}

#[cfg(test)]
mod tests {
    use jobstack::{
        bundles::BundlePricePolicy,
        catalog::Catalog,
        defaults::Defaults,
    };
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        admin::AdminGate,
        test::helpers::{rejection, write_only_gateway},
    };

    use super::*;

    fn state() -> TestResult<AppState> {
        let defaults = Defaults::builtin()?;

        Ok(AppState::new(
            Catalog::new(defaults.services, defaults.bundles, defaults.settings),
            BundlePricePolicy::FrozenAtCreation,
        ))
    }

    fn ids(state: &AppState) -> Vec<i64> {
        state
            .catalog
            .services()
            .iter()
            .map(|service| service.id.into_i64())
            .collect()
    }

    #[tokio::test]
    async fn added_service_takes_the_store_identifier() -> TestResult {
        let mut state = state()?;
        let mut gateway = write_only_gateway();

        gateway
            .expect_insert_service()
            .once()
            .withf(|sort_order, data| *sort_order == 4 && data.name == "Audit")
            .return_once(|sort_order, data| Ok(Service::new(ServiceId::new(42), sort_order, data)));

        let admin = AdminService::new(Arc::new(gateway));

        let added = admin
            .add_service(
                &AdminGate::authorized(),
                &mut state,
                ServiceData::new("Audit", Decimal::from(900)),
            )
            .await?;

        assert_eq!(added.id, ServiceId::new(42));
        assert_eq!(ids(&state), vec![1, 2, 3, 4, 42]);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_insert_removes_the_provisional_service() -> TestResult {
        let mut state = state()?;
        let mut gateway = write_only_gateway();

        gateway
            .expect_insert_service()
            .once()
            .return_once(|_, _| Err(rejection()));

        let admin = AdminService::new(Arc::new(gateway));

        let result = admin
            .add_service(
                &AdminGate::authorized(),
                &mut state,
                ServiceData::new("Audit", Decimal::from(900)),
            )
            .await;

        assert!(
            matches!(
                result,
                Err(AdminError::Rejected {
                    operation: "add service",
                    ..
                })
            ),
            "expected Rejected, got {result:?}"
        );
        assert_eq!(ids(&state), vec![1, 2, 3, 4]);

        Ok(())
    }

    #[tokio::test]
    async fn blank_name_and_zero_price_are_refused_locally() -> TestResult {
        let mut state = state()?;
        let admin = AdminService::new(Arc::new(write_only_gateway()));

        let blank = admin
            .add_service(
                &AdminGate::authorized(),
                &mut state,
                ServiceData::new("  ", Decimal::from(900)),
            )
            .await;
        let free = admin
            .add_service(
                &AdminGate::authorized(),
                &mut state,
                ServiceData::new("Audit", Decimal::ZERO),
            )
            .await;

        assert!(
            matches!(blank, Err(AdminError::MissingRequiredData("name"))),
            "expected MissingRequiredData, got {blank:?}"
        );
        assert!(
            matches!(free, Err(AdminError::MissingRequiredData("price"))),
            "expected MissingRequiredData, got {free:?}"
        );
        assert_eq!(ids(&state), vec![1, 2, 3, 4]);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_edit_restores_the_previous_content() -> TestResult {
        let mut state = state()?;
        let before = state.catalog.service(ServiceId::new(2)).cloned();
        let mut gateway = write_only_gateway();

        gateway
            .expect_update_service()
            .once()
            .return_once(|_, _| Err(rejection()));

        let admin = AdminService::new(Arc::new(gateway));

        let result = admin
            .edit_service(
                &AdminGate::authorized(),
                &mut state,
                ServiceId::new(2),
                ServiceData::new("Renamed", Decimal::from(1)),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(state.catalog.service(ServiceId::new(2)).cloned(), before);

        Ok(())
    }

    #[tokio::test]
    async fn delete_purges_scope_and_rejection_restores_it() -> TestResult {
        let mut state = state()?;
        state.add_service_to_scope(ServiceId::new(3))?;
        state.add_bundle_to_scope(BundleId::new(1))?;
        state.add_service_to_scope(ServiceId::new(3))?;

        let mut gateway = write_only_gateway();

        gateway
            .expect_delete_service()
            .once()
            .withf(|id| *id == ServiceId::new(3))
            .return_once(|_| Err(rejection()));

        let admin = AdminService::new(Arc::new(gateway));

        let result = admin
            .delete_service(&AdminGate::authorized(), &mut state, ServiceId::new(3))
            .await;

        assert!(result.is_err());
        assert_eq!(ids(&state), vec![1, 2, 3, 4]);
        assert_eq!(state.scope.len(), 3);
        assert_eq!(state.scope.total()?, Decimal::from(3455));

        Ok(())
    }

    #[tokio::test]
    async fn confirmed_delete_keeps_entries_with_other_ids() -> TestResult {
        let mut state = state()?;
        state.add_service_to_scope(ServiceId::new(3))?;
        state.add_bundle_to_scope(BundleId::new(1))?;

        let mut gateway = write_only_gateway();

        gateway
            .expect_delete_service()
            .once()
            .return_once(|_| Ok(()));

        let admin = AdminService::new(Arc::new(gateway));

        admin
            .delete_service(&AdminGate::authorized(), &mut state, ServiceId::new(3))
            .await?;

        assert_eq!(ids(&state), vec![1, 2, 4]);
        assert_eq!(state.scope.len(), 1);
        assert_eq!(state.scope.total()?, Decimal::from(1755));

        Ok(())
    }

    #[tokio::test]
    async fn confirmed_delete_drops_bundle_entries_sharing_the_id() -> TestResult {
        let mut state = state()?;
        state.add_service_to_scope(ServiceId::new(1))?;
        state.add_bundle_to_scope(BundleId::new(1))?;

        let mut gateway = write_only_gateway();

        gateway
            .expect_delete_service()
            .once()
            .return_once(|_| Ok(()));

        let admin = AdminService::new(Arc::new(gateway));

        admin
            .delete_service(&AdminGate::authorized(), &mut state, ServiceId::new(1))
            .await?;

        assert!(state.scope.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn added_bundle_is_priced_from_its_members() -> TestResult {
        let mut state = state()?;
        let mut gateway = write_only_gateway();

        gateway
            .expect_insert_bundle()
            .once()
            .withf(|data| data.price == Decimal::from(1955))
            .return_once(|data| Ok(Bundle::new(BundleId::new(7), data)));

        let admin = AdminService::new(Arc::new(gateway));

        let bundle = admin
            .add_bundle(
                &AdminGate::authorized(),
                &mut state,
                BundleDraft {
                    name: "Full Funnel".to_string(),
                    description: String::new(),
                    discount: Decimal::from(15),
                    service_ids: smallvec![ServiceId::new(2), ServiceId::new(4), ServiceId::new(99)],
                },
            )
            .await?;

        assert_eq!(bundle.id, BundleId::new(7));
        assert!(state.catalog.bundle(BundleId::new(7)).is_some());

        Ok(())
    }

    #[tokio::test]
    async fn bundle_without_members_is_refused() -> TestResult {
        let mut state = state()?;
        let admin = AdminService::new(Arc::new(write_only_gateway()));

        let result = admin
            .add_bundle(
                &AdminGate::authorized(),
                &mut state,
                BundleDraft {
                    name: "Empty".to_string(),
                    description: String::new(),
                    discount: Decimal::from(10),
                    service_ids: smallvec![],
                },
            )
            .await;

        assert!(
            matches!(result, Err(AdminError::MissingRequiredData("services"))),
            "expected MissingRequiredData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn rejected_bundle_delete_puts_it_back_in_place() -> TestResult {
        let mut state = state()?;
        let before: Vec<Bundle> = state.catalog.bundles().to_vec();
        let mut gateway = write_only_gateway();

        gateway
            .expect_delete_bundle()
            .once()
            .return_once(|_| Err(rejection()));

        let admin = AdminService::new(Arc::new(gateway));

        let result = admin
            .delete_bundle(&AdminGate::authorized(), &mut state, BundleId::new(1))
            .await;

        assert!(result.is_err());
        assert_eq!(state.catalog.bundles(), before.as_slice());

        Ok(())
    }

    #[tokio::test]
    async fn edited_bundle_is_repriced() -> TestResult {
        let mut state = state()?;
        let mut gateway = write_only_gateway();

        gateway
            .expect_update_bundle()
            .once()
            .withf(|id, data| *id == BundleId::new(2) && data.price == Decimal::from(1920))
            .return_once(|id, data| Ok(Bundle::new(id, data)));

        let admin = AdminService::new(Arc::new(gateway));

        admin
            .edit_bundle(
                &AdminGate::authorized(),
                &mut state,
                BundleId::new(2),
                BundleDraft {
                    name: "Sales Acceleration Bundle".to_string(),
                    description: String::new(),
                    discount: Decimal::from(20),
                    service_ids: smallvec![ServiceId::new(1), ServiceId::new(4)],
                },
            )
            .await?;

        assert_eq!(
            state.catalog.bundle(BundleId::new(2)).map(Bundle::price),
            Some(Decimal::from(1920))
        );

        Ok(())
    }

    #[tokio::test]
    async fn reorder_persists_every_position() -> TestResult {
        let mut state = state()?;
        let mut gateway = write_only_gateway();

        gateway
            .expect_reorder_services()
            .once()
            .withf(|order| {
                order
                    == &[
                        (ServiceId::new(3), 0),
                        (ServiceId::new(1), 1),
                        (ServiceId::new(4), 2),
                        (ServiceId::new(2), 3),
                    ]
            })
            .return_once(|_| Ok(()));

        let admin = AdminService::new(Arc::new(gateway));

        admin
            .reorder(
                &AdminGate::authorized(),
                &mut state,
                vec![
                    ServiceId::new(3),
                    ServiceId::new(1),
                    ServiceId::new(4),
                    ServiceId::new(2),
                ],
            )
            .await?;

        assert_eq!(ids(&state), vec![3, 1, 4, 2]);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_reorder_restores_the_old_order() -> TestResult {
        let mut state = state()?;
        let before = state.catalog.sort_orders();
        let mut gateway = write_only_gateway();

        gateway
            .expect_reorder_services()
            .once()
            .return_once(|_| Err(rejection()));

        let admin = AdminService::new(Arc::new(gateway));

        let result = admin
            .move_service(&AdminGate::authorized(), &mut state, 0, 3)
            .await;

        assert!(result.is_err());
        assert_eq!(state.catalog.sort_orders(), before);

        Ok(())
    }

    #[tokio::test]
    async fn moving_onto_the_same_position_writes_nothing() -> TestResult {
        let mut state = state()?;
        let mut gateway = write_only_gateway();

        gateway.expect_reorder_services().never();

        let admin = AdminService::new(Arc::new(gateway));

        admin
            .move_service(&AdminGate::authorized(), &mut state, 2, 2)
            .await?;

        let out_of_range = admin
            .move_service(&AdminGate::authorized(), &mut state, 0, 9)
            .await;

        assert!(
            matches!(
                out_of_range,
                Err(AdminError::Catalog(CatalogError::OutOfRange { .. }))
            ),
            "expected OutOfRange, got {out_of_range:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn setting_by_store_name_saves_the_whole_record() -> TestResult {
        let mut state = state()?;
        let mut gateway = write_only_gateway();

        gateway
            .expect_save_settings()
            .once()
            .withf(|settings| settings.site_title == "Ship It")
            .return_once(|_| Ok(()));

        let admin = AdminService::new(Arc::new(gateway));

        admin
            .set_setting(&AdminGate::authorized(), &mut state, "site_title", "Ship It")
            .await?;

        assert_eq!(state.catalog.settings().site_title, "Ship It");

        Ok(())
    }

    #[tokio::test]
    async fn rejected_settings_save_restores_the_old_record() -> TestResult {
        let mut state = state()?;
        let before = state.catalog.settings().clone();
        let mut gateway = write_only_gateway();

        gateway
            .expect_save_settings()
            .once()
            .return_once(|_| Err(rejection()));

        let admin = AdminService::new(Arc::new(gateway));

        let result = admin
            .set_setting(&AdminGate::authorized(), &mut state, "heroHeadline", "New")
            .await;

        assert!(
            matches!(
                result,
                Err(AdminError::Rejected {
                    operation: "save settings",
                    ..
                })
            ),
            "expected Rejected, got {result:?}"
        );
        assert_eq!(state.catalog.settings(), &before);

        let unknown = admin
            .set_setting(&AdminGate::authorized(), &mut state, "favicon", "x")
            .await;

        assert!(
            matches!(unknown, Err(AdminError::UnknownSetting(_))),
            "expected UnknownSetting, got {unknown:?}"
        );

        Ok(())
    }
}
