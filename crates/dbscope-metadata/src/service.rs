//! Metadata service

use crate::{
    DatabaseParams, MetadataError, MetadataResult, NamedObjectParams, ObjectList, TableMetadata,
};
use dbscope_connection::DatabaseConnections;
use dbscope_core::{NamedStructure, ObjectName, ViewStructure};
use std::sync::Arc;

/// Serves the metadata operations on top of the opened-connection cache.
///
/// Every operation resolves its `(conid, database)` pair through
/// `ensure_opened` and reads the handle's structure snapshot; nothing here
/// talks to an engine directly.
pub struct MetadataService {
    connections: Arc<DatabaseConnections>,
}

impl MetadataService {
    pub fn new(connections: Arc<DatabaseConnections>) -> Self {
        Self { connections }
    }

    /// The underlying opened-connection cache
    pub fn connections(&self) -> &Arc<DatabaseConnections> {
        &self.connections
    }

    /// List all schema objects of a database, one ordered list per kind.
    ///
    /// Each list is sorted by `schema_name + "." + pure_name` so the output is
    /// deterministic regardless of the engine's iteration order.
    #[tracing::instrument(skip(self, params), fields(conid = %params.conid, database = %params.database))]
    pub async fn list_objects(&self, params: &DatabaseParams) -> MetadataResult<ObjectList> {
        let opened = self
            .connections
            .ensure_opened(params.conid, &params.database)
            .await?;
        let structure = opened.structure();

        let list = ObjectList {
            tables: object_names(&structure.tables),
            views: object_names(&structure.views),
            procedures: object_names(&structure.procedures),
            functions: object_names(&structure.functions),
            triggers: object_names(&structure.triggers),
        };

        tracing::debug!(
            tables = list.tables.len(),
            views = list.views.len(),
            procedures = list.procedures.len(),
            functions = list.functions.len(),
            triggers = list.triggers.len(),
            "listed objects"
        );
        Ok(list)
    }

    /// Full descriptor of one table plus the foreign keys targeting it.
    ///
    /// The dependency list is computed by scanning every table's foreign keys
    /// in the snapshot; the snapshot is in memory, so the O(total foreign
    /// keys) scan is acceptable.
    #[tracing::instrument(skip(self, params), fields(conid = %params.conid, database = %params.database, table = %params.qualified_name()))]
    pub async fn table_info(&self, params: &NamedObjectParams) -> MetadataResult<TableMetadata> {
        let opened = self
            .connections
            .ensure_opened(params.conid, &params.database)
            .await?;
        let structure = opened.structure();

        let table = structure
            .find_table(params.schema_name.as_deref(), &params.pure_name)
            .ok_or_else(|| MetadataError::TableNotFound(params.qualified_name()))?
            .clone();

        let dependencies =
            structure.dependencies_of(params.schema_name.as_deref(), &params.pure_name);

        tracing::debug!(dependencies = dependencies.len(), "table info resolved");
        Ok(TableMetadata {
            table,
            dependencies,
        })
    }

    /// Full descriptor of one view
    #[tracing::instrument(skip(self, params), fields(conid = %params.conid, database = %params.database, view = %params.qualified_name()))]
    pub async fn view_info(&self, params: &NamedObjectParams) -> MetadataResult<ViewStructure> {
        let opened = self
            .connections
            .ensure_opened(params.conid, &params.database)
            .await?;

        opened
            .structure()
            .find_view(params.schema_name.as_deref(), &params.pure_name)
            .cloned()
            .ok_or_else(|| MetadataError::ViewNotFound(params.qualified_name()))
    }
}

/// Project a slice of snapshot objects onto ordered `(schema_name, pure_name)`
/// pairs
fn object_names<T: NamedStructure>(items: &[T]) -> Vec<ObjectName> {
    let mut names: Vec<ObjectName> = items.iter().map(NamedStructure::object_name).collect();
    names.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbscope_core::TableStructure;

    #[test]
    fn object_names_sort_by_schema_dot_name() {
        let tables = vec![
            TableStructure::new(Some("b".into()), "X"),
            TableStructure::new(Some("a".into()), "Y"),
        ];
        let names = object_names(&tables);
        assert_eq!(names[0], ObjectName::with_schema("a", "Y"));
        assert_eq!(names[1], ObjectName::with_schema("b", "X"));
    }

    #[test]
    fn schemaless_objects_sort_before_schema_qualified_ones() {
        let tables = vec![
            TableStructure::new(Some("a".into()), "t"),
            TableStructure::new(None, "z"),
        ];
        let names = object_names(&tables);
        // "" + "." + "z" < "a.t"
        assert_eq!(names[0], ObjectName::new("z"));
    }
}
