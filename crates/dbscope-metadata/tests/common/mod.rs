//! Shared fixtures for metadata service tests

use dbscope_connection::{ConnectionRegistry, DatabaseConnections, SavedConnection};
use dbscope_core::{
    DatabaseStructure, ForeignKey, ForeignKeyAction, ForeignKeyColumn, FunctionStructure,
    ProcedureStructure, TableStructure, TriggerStructure, ViewStructure,
};
use dbscope_drivers::{DriverRegistry, MemoryDriver};
use dbscope_metadata::MetadataService;
use std::sync::Arc;
use uuid::Uuid;

pub struct Fixture {
    pub service: MetadataService,
    pub conid: Uuid,
    pub driver: Arc<MemoryDriver>,
}

/// Build a service over a memory driver serving `structure` as database
/// `database` on one saved connection.
pub fn service_with(database: &str, structure: DatabaseStructure) -> Fixture {
    let driver = Arc::new(MemoryDriver::new());
    driver
        .add_database(database, structure)
        .expect("fixture snapshot should be valid");

    let drivers = Arc::new(DriverRegistry::new());
    drivers.register(driver.clone());

    let registry = Arc::new(ConnectionRegistry::new());
    let saved = SavedConnection::new("fixture", "memory");
    let conid = saved.id;
    registry.add(saved);

    let connections = Arc::new(DatabaseConnections::new(drivers, registry));
    Fixture {
        service: MetadataService::new(connections),
        conid,
        driver,
    }
}

pub fn table(schema: Option<&str>, name: &str) -> TableStructure {
    TableStructure::new(schema.map(Into::into), name)
}

pub fn view(schema: Option<&str>, name: &str) -> ViewStructure {
    let mut view = ViewStructure::new(schema.map(Into::into), name);
    view.definition = Some(format!("SELECT * FROM {name}_base"));
    view
}

pub fn procedure(schema: Option<&str>, name: &str) -> ProcedureStructure {
    ProcedureStructure::new(schema.map(Into::into), name)
}

pub fn function(schema: Option<&str>, name: &str) -> FunctionStructure {
    FunctionStructure::new(schema.map(Into::into), name)
}

pub fn trigger(schema: Option<&str>, name: &str, table: &str) -> TriggerStructure {
    TriggerStructure::new(schema.map(Into::into), name, table)
}

/// Foreign key on `from` pointing at `to`, single column pair `id -> id`
pub fn foreign_key(
    name: &str,
    from: (Option<&str>, &str),
    to: (Option<&str>, &str),
) -> ForeignKey {
    ForeignKey {
        constraint_name: Some(name.into()),
        schema_name: from.0.map(Into::into),
        pure_name: from.1.into(),
        ref_schema_name: to.0.map(Into::into),
        ref_table_name: to.1.into(),
        columns: vec![ForeignKeyColumn {
            column_name: format!("{}_id", to.1),
            ref_column_name: "id".into(),
        }],
        update_action: ForeignKeyAction::NoAction,
        delete_action: ForeignKeyAction::NoAction,
    }
}
