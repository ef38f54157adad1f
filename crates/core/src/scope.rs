//! Scope
//!
//! The shopper's working selection. Entries are snapshots taken when they
//! were added; later catalog edits never reach them.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    bundles::{Bundle, BundleId},
    pricing::{PricingError, total_price},
    services::{Service, ServiceId},
};

/// Tag distinguishing repeated additions of the same catalog item.
///
/// Time-ordered, so entries sort in the order they were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeItemId(Uuid);

impl ScopeItemId {
    /// A fresh tag.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Display for ScopeItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for ScopeItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// The catalog item an entry was copied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogRef {
    /// A service
    Service(ServiceId),

    /// A bundle
    Bundle(BundleId),
}

impl CatalogRef {
    /// The bare catalog id, whichever collection it belongs to.
    pub fn raw_id(self) -> i64 {
        match self {
            Self::Service(id) => id.into_i64(),
            Self::Bundle(id) => id.into_i64(),
        }
    }
}

/// The copied catalog item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScopeSnapshot {
    /// Copy of a service
    Service(Service),

    /// Copy of a bundle
    Bundle(Bundle),
}

/// A single entry in the scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeItem {
    unique_id: ScopeItemId,
    is_bundle: bool,
    #[serde(flatten)]
    snapshot: ScopeSnapshot,
}

impl ScopeItem {
    fn new(snapshot: ScopeSnapshot) -> Self {
        Self {
            unique_id: ScopeItemId::generate(),
            is_bundle: matches!(snapshot, ScopeSnapshot::Bundle(_)),
            snapshot,
        }
    }

    /// The entry's tag.
    pub fn unique_id(&self) -> ScopeItemId {
        self.unique_id
    }

    /// Whether the entry was copied from a bundle.
    pub fn is_bundle(&self) -> bool {
        self.is_bundle
    }

    /// The copied item.
    pub fn snapshot(&self) -> &ScopeSnapshot {
        &self.snapshot
    }

    /// Name at the time the entry was added.
    pub fn name(&self) -> &str {
        match &self.snapshot {
            ScopeSnapshot::Service(service) => service.name(),
            ScopeSnapshot::Bundle(bundle) => bundle.name(),
        }
    }

    /// Price at the time the entry was added.
    pub fn price(&self) -> Decimal {
        match &self.snapshot {
            ScopeSnapshot::Service(service) => service.price(),
            ScopeSnapshot::Bundle(bundle) => bundle.price(),
        }
    }

    /// The catalog item the entry was copied from.
    pub fn catalog_ref(&self) -> CatalogRef {
        match &self.snapshot {
            ScopeSnapshot::Service(service) => CatalogRef::Service(service.id),
            ScopeSnapshot::Bundle(bundle) => CatalogRef::Bundle(bundle.id),
        }
    }
}

/// Entries removed by [`Scope::purge_service`], with their former positions.
pub type PurgedItems = Vec<(usize, ScopeItem)>;

/// An ordered selection of services and bundles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    items: Vec<ScopeItem>,
}

impl Scope {
    /// An empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of `service`. The same service may be added repeatedly.
    pub fn add_service(&mut self, service: &Service) -> ScopeItemId {
        self.push(ScopeSnapshot::Service(service.clone()))
    }

    /// Append a copy of `bundle`.
    pub fn add_bundle(&mut self, bundle: &Bundle) -> ScopeItemId {
        self.push(ScopeSnapshot::Bundle(bundle.clone()))
    }

    fn push(&mut self, snapshot: ScopeSnapshot) -> ScopeItemId {
        let item = ScopeItem::new(snapshot);
        let id = item.unique_id;

        self.items.push(item);

        id
    }

    /// Remove the entry tagged `unique_id`, if present.
    pub fn remove(&mut self, unique_id: ScopeItemId) -> Option<ScopeItem> {
        let position = self
            .items
            .iter()
            .position(|item| item.unique_id == unique_id)?;

        Some(self.items.remove(position))
    }

    /// Sum of entry prices, recomputed on every call.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the sum cannot be represented.
    pub fn total(&self) -> Result<Decimal, PricingError> {
        total_price(self.items.iter().map(ScopeItem::price))
    }

    /// Remove every entry whose copied catalog id equals `id`.
    ///
    /// Entries carry the bare id of the item they were copied from, so a
    /// bundle entry with the same numeric id goes too.
    pub fn purge_service(&mut self, id: ServiceId) -> PurgedItems {
        let mut purged = Vec::new();
        let mut kept = Vec::with_capacity(self.items.len());

        for (index, item) in self.items.drain(..).enumerate() {
            if item.catalog_ref().raw_id() == id.into_i64() {
                purged.push((index, item));
            } else {
                kept.push(item);
            }
        }

        self.items = kept;

        purged
    }

    /// Put purged entries back at their former positions.
    pub fn restore(&mut self, purged: PurgedItems) {
        for (index, item) in purged {
            let index = index.min(self.items.len());
            self.items.insert(index, item);
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Entries in the order they were added.
    pub fn items(&self) -> &[ScopeItem] {
        &self.items
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the scope has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
