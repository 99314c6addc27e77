//! Customer onboarding: the write path and the two read paths.
//!
//! Writes assign an id, stamp the record, seal it and hand it to the store.
//! Reads fetch sealed records and reveal them for the caller's role. The role
//! label is taken verbatim from the request layer; unknown or empty labels
//! get the most restrictive view.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::Utc;
use slog::{error, info, o, warn, Logger};
use uuid::Uuid;

use crate::{
    config::VaultConfig,
    error::{PiiError, ServiceError, StoreError},
    masking::Role,
    models::Customer,
    pipeline::{Masked, Sealed},
    schema,
    traverse::PiiEngine,
};

/// Persistence for sealed customers.
///
/// Implementations only ever see ciphertext in sensitive fields. Lookup keys
/// (`id`, `partner_id`) are not sensitive and are stored in clear.
pub trait CustomerStore: Send + Sync {
    fn insert(&self, customer: Sealed<Customer>) -> Result<(), StoreError>;

    fn find_by_id(&self, id: &str) -> Result<Option<Sealed<Customer>>, StoreError>;

    /// All customers of a partner, in id order.
    fn find_by_partner_id(&self, partner_id: &str) -> Result<Vec<Sealed<Customer>>, StoreError>;
}

/// A process-local store keyed by customer id.
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    customers: RwLock<BTreeMap<String, Sealed<Customer>>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored customers. A poisoned lock is `Unavailable`, as for
    /// every other store operation.
    pub fn len(&self) -> Result<usize, StoreError> {
        let customers = self.customers.read().map_err(|_| StoreError::Unavailable)?;
        Ok(customers.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl CustomerStore for InMemoryCustomerStore {
    fn insert(&self, customer: Sealed<Customer>) -> Result<(), StoreError> {
        let mut customers = self.customers.write().map_err(|_| StoreError::Unavailable)?;
        let id = customer.as_stored().id.clone();
        if customers.contains_key(&id) {
            return Err(StoreError::Duplicate(id));
        }
        customers.insert(id, customer);
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Sealed<Customer>>, StoreError> {
        let customers = self.customers.read().map_err(|_| StoreError::Unavailable)?;
        Ok(customers.get(id).cloned())
    }

    fn find_by_partner_id(&self, partner_id: &str) -> Result<Vec<Sealed<Customer>>, StoreError> {
        let customers = self.customers.read().map_err(|_| StoreError::Unavailable)?;
        Ok(customers
            .values()
            .filter(|customer| customer.as_stored().partner_id == partner_id)
            .cloned()
            .collect())
    }
}

/// Onboarding operations over a [`CustomerStore`].
pub struct OnboardingService<S> {
    store: S,
    config: VaultConfig,
    engine: PiiEngine,
    logger: Logger,
}

impl<S: CustomerStore> OnboardingService<S> {
    /// Builds the service, rejecting an invalid `Customer` schema up front.
    pub fn new(store: S, config: VaultConfig, logger: Logger) -> Result<Self, ServiceError> {
        if let Err(err) = schema::validate::<Customer>() {
            slog::crit!(logger, "customer schema is invalid"; "error" => %err);
            return Err(err.into());
        }
        Ok(Self {
            store,
            config,
            engine: PiiEngine::new(logger.clone()),
            logger,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Seals and stores a new customer, returning its id.
    ///
    /// An empty id is replaced by a fresh UUID v4.
    pub fn create_customer(&self, mut customer: Customer) -> Result<String, ServiceError> {
        let log = self.logger.new(o!("operation" => "create_customer"));

        if customer.id.is_empty() {
            customer.id = Uuid::new_v4().to_string();
        }
        let now = Utc::now();
        customer.created_date = now;
        customer.modified_date = now;
        let id = customer.id.clone();

        info!(log, "creating customer"; "customer_id" => &id, "partner_id" => &customer.partner_id);

        let sealed = self
            .engine
            .seal(customer, self.config.expose_key())
            .map_err(|err| processing_failed(&log, &id, &err))?;

        self.store.insert(sealed).map_err(|err| {
            error!(log, "failed to store customer"; "customer_id" => &id, "error" => %err);
            err
        })?;

        info!(log, "customer created"; "customer_id" => &id);
        Ok(id)
    }

    /// Fetches one customer and reveals it for `role`.
    pub fn get_customer(&self, id: &str, role: &str) -> Result<Masked<Customer>, ServiceError> {
        let log = self.logger.new(o!("operation" => "get_customer"));
        let role = Role::from_label(role);
        info!(log, "fetching customer"; "customer_id" => id, "role" => %role);

        let Some(sealed) = self.store.find_by_id(id)? else {
            warn!(log, "customer not found"; "customer_id" => id);
            return Err(ServiceError::NotFound);
        };

        let masked = self
            .engine
            .reveal(sealed, self.config.expose_key(), role)
            .map_err(|err| processing_failed(&log, id, &err))?;

        info!(log, "customer retrieved"; "customer_id" => id);
        Ok(masked)
    }

    /// Fetches every customer of a partner and reveals each for `role`.
    ///
    /// A partner with no customers yields an empty list.
    pub fn get_customers_by_partner_id(
        &self,
        partner_id: &str,
        role: &str,
    ) -> Result<Vec<Masked<Customer>>, ServiceError> {
        let log = self
            .logger
            .new(o!("operation" => "get_customers_by_partner_id"));
        if partner_id.is_empty() {
            warn!(log, "partner id missing");
            return Err(ServiceError::InvalidRequest("partner id is required"));
        }
        let role = Role::from_label(role);
        info!(log, "fetching customers"; "partner_id" => partner_id, "role" => %role);

        let customers = self
            .store
            .find_by_partner_id(partner_id)?
            .into_iter()
            .map(|sealed| {
                let id = sealed.as_stored().id.clone();
                self.engine
                    .reveal(sealed, self.config.expose_key(), role)
                    .map_err(|err| processing_failed(&log, &id, &err))
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(log, "customers retrieved"; "partner_id" => partner_id, "count" => customers.len());
        Ok(customers)
    }
}

/// Logs the failing field for operators and returns the opaque error.
fn processing_failed(log: &Logger, customer_id: &str, err: &PiiError) -> ServiceError {
    error!(log, "failed to process customer pii";
        "customer_id" => customer_id,
        "error" => %err
    );
    ServiceError::ProcessingFailed
}
