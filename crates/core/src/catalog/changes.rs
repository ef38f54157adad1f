//! Catalog Changes
//!
//! Every admin edit is a [`Change`] applied locally before the store hears
//! about it. Applying returns an [`Undo`] that puts the catalog and scope back
//! exactly as they were should the store reject the write.

use rustc_hash::FxHashSet;

use crate::{
    bundles::{Bundle, BundleData, BundleId},
    catalog::{Catalog, CatalogError},
    scope::{PurgedItems, Scope},
    services::{Service, ServiceData, ServiceId},
    settings::SiteSettings,
};

/// A local edit to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Append a service, usually under a provisional id.
    AddService(Service),

    /// Replace a service's content, keeping its id and position.
    EditService(ServiceId, ServiceData),

    /// Remove a service and every scope entry carrying its id.
    DeleteService(ServiceId),

    /// Append a bundle, usually under a provisional id.
    AddBundle(Bundle),

    /// Replace a bundle's content.
    EditBundle(BundleId, BundleData),

    /// Remove a bundle. Scope entries copied from it stay.
    DeleteBundle(BundleId),

    /// Put services in the given order and renumber their sort positions.
    Reorder(Vec<ServiceId>),

    /// Replace the settings wholesale.
    UpdateSettings(SiteSettings),
}

/// The inverse of an applied [`Change`].
#[derive(Debug, Clone, PartialEq)]
pub enum Undo {
    /// Remove an added service.
    RemoveService(ServiceId),

    /// Put back a service's previous content.
    ReplaceService(Service),

    /// Reinsert a deleted service and the scope entries purged with it.
    InsertService {
        /// Former position
        index: usize,

        /// The deleted service
        service: Service,

        /// Scope entries removed alongside it
        purged: PurgedItems,
    },

    /// Remove an added bundle.
    RemoveBundle(BundleId),

    /// Put back a bundle's previous content.
    ReplaceBundle(Bundle),

    /// Reinsert a deleted bundle.
    InsertBundle {
        /// Former position
        index: usize,

        /// The deleted bundle
        bundle: Bundle,
    },

    /// Put back the previous service order.
    RestoreOrder(Vec<Service>),

    /// Put back the previous settings.
    RestoreSettings(SiteSettings),
}

impl Catalog {
    /// Apply `change` locally.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnknownService`] / [`CatalogError::UnknownBundle`]:
    ///   the change names an item that is not in the catalog.
    /// - [`CatalogError::NotAPermutation`]: a reorder does not list every
    ///   service exactly once.
    pub fn apply(&mut self, change: Change, scope: &mut Scope) -> Result<Undo, CatalogError> {
        match change {
            Change::AddService(service) => {
                let id = service.id;
                self.services.push(service);

                Ok(Undo::RemoveService(id))
            }
            Change::EditService(id, data) => {
                let slot = self
                    .services
                    .iter_mut()
                    .find(|service| service.id == id)
                    .ok_or(CatalogError::UnknownService(id))?;
                let previous = slot.clone();
                slot.data = data;

                Ok(Undo::ReplaceService(previous))
            }
            Change::DeleteService(id) => {
                let index = self.service_index(id)?;
                let service = self.services.remove(index);
                let purged = scope.purge_service(id);

                Ok(Undo::InsertService {
                    index,
                    service,
                    purged,
                })
            }
            Change::AddBundle(bundle) => {
                let id = bundle.id;
                self.bundles.push(bundle);

                Ok(Undo::RemoveBundle(id))
            }
            Change::EditBundle(id, data) => {
                let slot = self
                    .bundles
                    .iter_mut()
                    .find(|bundle| bundle.id == id)
                    .ok_or(CatalogError::UnknownBundle(id))?;
                let previous = slot.clone();
                slot.data = data;

                Ok(Undo::ReplaceBundle(previous))
            }
            Change::DeleteBundle(id) => {
                let index = self.bundle_index(id)?;
                let bundle = self.bundles.remove(index);

                Ok(Undo::InsertBundle { index, bundle })
            }
            Change::Reorder(order) => self.reorder(&order),
            Change::UpdateSettings(settings) => {
                let previous = std::mem::replace(&mut self.settings, settings);

                Ok(Undo::RestoreSettings(previous))
            }
        }
    }

    /// Revert a change previously applied with [`Catalog::apply`].
    ///
    /// Reverting an item that has since disappeared is a no-op.
    pub fn revert(&mut self, undo: Undo, scope: &mut Scope) {
        match undo {
            Undo::RemoveService(id) => self.services.retain(|service| service.id != id),
            Undo::ReplaceService(previous) => {
                if let Some(slot) = self.services.iter_mut().find(|s| s.id == previous.id) {
                    *slot = previous;
                }
            }
            Undo::InsertService {
                index,
                service,
                purged,
            } => {
                let index = index.min(self.services.len());
                self.services.insert(index, service);
                scope.restore(purged);
            }
            Undo::RemoveBundle(id) => self.bundles.retain(|bundle| bundle.id != id),
            Undo::ReplaceBundle(previous) => {
                if let Some(slot) = self.bundles.iter_mut().find(|b| b.id == previous.id) {
                    *slot = previous;
                }
            }
            Undo::InsertBundle { index, bundle } => {
                let index = index.min(self.bundles.len());
                self.bundles.insert(index, bundle);
            }
            Undo::RestoreOrder(services) => self.services = services,
            Undo::RestoreSettings(settings) => self.settings = settings,
        }
    }

    fn reorder(&mut self, order: &[ServiceId]) -> Result<Undo, CatalogError> {
        let unique: FxHashSet<ServiceId> = order.iter().copied().collect();

        if order.len() != self.services.len() || unique.len() != order.len() {
            return Err(CatalogError::NotAPermutation);
        }

        let mut reordered = Vec::with_capacity(order.len());

        for (position, id) in order.iter().enumerate() {
            let mut service = self
                .service(*id)
                .cloned()
                .ok_or(CatalogError::NotAPermutation)?;

            service.sort_order = i64::try_from(position).unwrap_or(i64::MAX);
            reordered.push(service);
        }

        let previous = std::mem::replace(&mut self.services, reordered);

        Ok(Undo::RestoreOrder(previous))
    }
}
