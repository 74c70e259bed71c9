//! Startup wiring.
//!
//! The dispatcher and handler set are built exactly once here, before the
//! server starts taking requests, and shared by reference afterwards. Only
//! the store connection handles cross requests; the dispatcher itself is
//! immutable once built.

use std::sync::Arc;

use intake_core::{EventDispatcher, RECORD_CREATED};
use intake_db_memory::MemoryRecordStore;
use intake_db_postgres::PostgresRecordStore;
use intake_storage::RecordStore;
use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::hooks::{LogRecordCreated, PersistRecord, ReplicateRecord};
use crate::usecases::{CreatePatientRegister, GetPatientRegister};

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub create_patient_register: Arc<CreatePatientRegister>,
    pub get_patient_register: Arc<GetPatientRegister>,
}

/// Build stores, dispatcher and use cases from configuration.
///
/// Subscription order is the delivery order: logging, then the primary
/// write, then the replica write.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let (primary, replica) = build_stores(cfg).await?;

    let mut dispatcher = EventDispatcher::new();
    dispatcher.subscribe(RECORD_CREATED, Arc::new(LogRecordCreated::new()));
    dispatcher.subscribe(RECORD_CREATED, Arc::new(PersistRecord::new(primary.clone())));
    dispatcher.subscribe(
        RECORD_CREATED,
        Arc::new(ReplicateRecord::new(replica.clone())),
    );
    let dispatcher = Arc::new(dispatcher);

    info!(
        backend = primary.backend_name(),
        handlers = dispatcher.handler_count(RECORD_CREATED),
        "Event dispatcher initialized"
    );

    Ok(AppState {
        create_patient_register: Arc::new(CreatePatientRegister::new(dispatcher)),
        // reads go to the replica; writes fan out through the dispatcher
        get_patient_register: Arc::new(GetPatientRegister::new(replica)),
    })
}

async fn build_stores(
    cfg: &AppConfig,
) -> anyhow::Result<(Arc<dyn RecordStore>, Arc<dyn RecordStore>)> {
    match cfg.storage.backend {
        StorageBackend::Memory => Ok((
            Arc::new(MemoryRecordStore::new()),
            Arc::new(MemoryRecordStore::new()),
        )),
        StorageBackend::Postgres => {
            let primary = PostgresRecordStore::new(&cfg.storage.primary).await?;
            let replica = PostgresRecordStore::new(&cfg.storage.replica).await?;
            Ok((Arc::new(primary), Arc::new(replica)))
        }
    }
}
