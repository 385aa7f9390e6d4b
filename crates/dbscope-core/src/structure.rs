//! Structure snapshot model
//!
//! A `DatabaseStructure` is an in-memory description of one database's schema
//! objects. Every object is identified by its `(schema_name, pure_name)` pair;
//! within one snapshot that pair is unique per object kind. Snapshots are
//! immutable once loaded and shared between readers.
//!
//! All types serialize in camelCase, matching the wire shapes consumed by the
//! tool's clients.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identity of a schema object: `(schema_name, pure_name)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectName {
    /// Schema the object lives in, if the engine has schemas
    pub schema_name: Option<String>,
    /// Object name without schema qualification
    pub pure_name: String,
}

impl ObjectName {
    /// Create an object name without a schema
    pub fn new(pure_name: impl Into<String>) -> Self {
        Self {
            schema_name: None,
            pure_name: pure_name.into(),
        }
    }

    /// Create an object name with a schema
    pub fn with_schema(schema_name: impl Into<String>, pure_name: impl Into<String>) -> Self {
        Self {
            schema_name: Some(schema_name.into()),
            pure_name: pure_name.into(),
        }
    }

    /// Key used for the deterministic listing order:
    /// `schema_name + "." + pure_name`, with a missing schema contributing the
    /// empty string. Comparison is lexicographic and case-sensitive.
    pub fn sort_key(&self) -> String {
        format!(
            "{}.{}",
            self.schema_name.as_deref().unwrap_or_default(),
            self.pure_name
        )
    }

    /// Display name: `schema.name` or just `name`
    pub fn qualified_name(&self) -> String {
        match &self.schema_name {
            Some(schema) => format!("{}.{}", schema, self.pure_name),
            None => self.pure_name.clone(),
        }
    }

    /// Check identity against an optional schema and a name
    pub fn matches(&self, schema_name: Option<&str>, pure_name: &str) -> bool {
        self.schema_name.as_deref() == schema_name && self.pure_name == pure_name
    }
}

/// Implemented by every snapshot object kind so listings can be built
/// generically from the `(schema_name, pure_name)` identity.
pub trait NamedStructure {
    fn schema_name(&self) -> Option<&str>;
    fn pure_name(&self) -> &str;

    fn object_name(&self) -> ObjectName {
        ObjectName {
            schema_name: self.schema_name().map(Into::into),
            pure_name: self.pure_name().into(),
        }
    }

    fn matches(&self, schema_name: Option<&str>, pure_name: &str) -> bool {
        self.schema_name() == schema_name && self.pure_name() == pure_name
    }
}

macro_rules! impl_named_structure {
    ($($ty:ty),* $(,)?) => {
        $(impl NamedStructure for $ty {
            fn schema_name(&self) -> Option<&str> {
                self.schema_name.as_deref()
            }

            fn pure_name(&self) -> &str {
                &self.pure_name
            }
        })*
    };
}

impl_named_structure!(
    ObjectName,
    TableStructure,
    ViewStructure,
    ProcedureStructure,
    FunctionStructure,
    TriggerStructure,
);

/// Column of a table or view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStructure {
    pub column_name: String,
    pub data_type: String,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub auto_increment: bool,
    pub default_value: Option<String>,
    pub comment: Option<String>,
}

impl ColumnStructure {
    pub fn new(column_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: data_type.into(),
            not_null: false,
            auto_increment: false,
            default_value: None,
            comment: None,
        }
    }
}

/// Primary key of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKey {
    pub constraint_name: Option<String>,
    pub columns: Vec<String>,
}

/// Referential action of a foreign key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForeignKeyAction {
    #[default]
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

/// One column pair of a foreign key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyColumn {
    pub column_name: String,
    pub ref_column_name: String,
}

/// Foreign key record
///
/// `(schema_name, pure_name)` is the owning table; `(ref_schema_name,
/// ref_table_name)` is the reference target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    pub constraint_name: Option<String>,
    pub schema_name: Option<String>,
    pub pure_name: String,
    pub ref_schema_name: Option<String>,
    pub ref_table_name: String,
    pub columns: Vec<ForeignKeyColumn>,
    #[serde(default)]
    pub update_action: ForeignKeyAction,
    #[serde(default)]
    pub delete_action: ForeignKeyAction,
}

impl ForeignKey {
    /// Does this foreign key point at the given table?
    pub fn references(&self, schema_name: Option<&str>, pure_name: &str) -> bool {
        self.ref_schema_name.as_deref() == schema_name && self.ref_table_name == pure_name
    }
}

/// Table descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStructure {
    pub schema_name: Option<String>,
    pub pure_name: String,
    #[serde(default)]
    pub columns: Vec<ColumnStructure>,
    pub primary_key: Option<PrimaryKey>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    pub comment: Option<String>,
}

impl TableStructure {
    pub fn new(schema_name: Option<String>, pure_name: impl Into<String>) -> Self {
        Self {
            schema_name,
            pure_name: pure_name.into(),
            columns: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
            comment: None,
        }
    }
}

/// View descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewStructure {
    pub schema_name: Option<String>,
    pub pure_name: String,
    #[serde(default)]
    pub columns: Vec<ColumnStructure>,
    /// SQL definition, when the engine exposes it
    pub definition: Option<String>,
}

impl ViewStructure {
    pub fn new(schema_name: Option<String>, pure_name: impl Into<String>) -> Self {
        Self {
            schema_name,
            pure_name: pure_name.into(),
            columns: Vec::new(),
            definition: None,
        }
    }
}

/// Parameter direction of a routine parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParameterMode {
    #[default]
    In,
    Out,
    InOut,
}

/// Parameter of a procedure or function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineParameter {
    pub name: Option<String>,
    pub data_type: String,
    #[serde(default)]
    pub mode: ParameterMode,
}

/// Stored procedure descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureStructure {
    pub schema_name: Option<String>,
    pub pure_name: String,
    #[serde(default)]
    pub parameters: Vec<RoutineParameter>,
    pub definition: Option<String>,
}

impl ProcedureStructure {
    pub fn new(schema_name: Option<String>, pure_name: impl Into<String>) -> Self {
        Self {
            schema_name,
            pure_name: pure_name.into(),
            parameters: Vec::new(),
            definition: None,
        }
    }
}

/// Function descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionStructure {
    pub schema_name: Option<String>,
    pub pure_name: String,
    #[serde(default)]
    pub parameters: Vec<RoutineParameter>,
    pub return_type: Option<String>,
    pub definition: Option<String>,
}

impl FunctionStructure {
    pub fn new(schema_name: Option<String>, pure_name: impl Into<String>) -> Self {
        Self {
            schema_name,
            pure_name: pure_name.into(),
            parameters: Vec::new(),
            return_type: None,
            definition: None,
        }
    }
}

/// Trigger timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

/// Trigger event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
}

/// Trigger descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerStructure {
    pub schema_name: Option<String>,
    pub pure_name: String,
    /// Table the trigger fires on
    pub table_name: String,
    pub timing: Option<TriggerTiming>,
    #[serde(default)]
    pub events: Vec<TriggerEvent>,
    pub definition: Option<String>,
}

impl TriggerStructure {
    pub fn new(
        schema_name: Option<String>,
        pure_name: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            schema_name,
            pure_name: pure_name.into(),
            table_name: table_name.into(),
            timing: None,
            events: Vec::new(),
            definition: None,
        }
    }
}

/// Structure snapshot of one database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStructure {
    #[serde(default)]
    pub tables: Vec<TableStructure>,
    #[serde(default)]
    pub views: Vec<ViewStructure>,
    #[serde(default)]
    pub procedures: Vec<ProcedureStructure>,
    #[serde(default)]
    pub functions: Vec<FunctionStructure>,
    #[serde(default)]
    pub triggers: Vec<TriggerStructure>,
}

impl DatabaseStructure {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a table by its `(schema_name, pure_name)` identity
    pub fn find_table(
        &self,
        schema_name: Option<&str>,
        pure_name: &str,
    ) -> Option<&TableStructure> {
        self.tables
            .iter()
            .find(|t| t.matches(schema_name, pure_name))
    }

    /// Find a view by its `(schema_name, pure_name)` identity
    pub fn find_view(&self, schema_name: Option<&str>, pure_name: &str) -> Option<&ViewStructure> {
        self.views
            .iter()
            .find(|v| v.matches(schema_name, pure_name))
    }

    /// Foreign keys from *any* table in the snapshot whose reference target is
    /// the given table. Scans every table's foreign key list.
    pub fn dependencies_of(&self, schema_name: Option<&str>, pure_name: &str) -> Vec<ForeignKey> {
        self.tables
            .iter()
            .flat_map(|t| t.foreign_keys.iter())
            .filter(|fk| fk.references(schema_name, pure_name))
            .cloned()
            .collect()
    }

    /// Total number of objects across all kinds
    pub fn object_count(&self) -> usize {
        self.tables.len()
            + self.views.len()
            + self.procedures.len()
            + self.functions.len()
            + self.triggers.len()
    }

    /// Verify the per-kind uniqueness of `(schema_name, pure_name)` pairs.
    /// Returns the kind and qualified name of the first duplicate found.
    pub fn first_duplicate(&self) -> Option<(&'static str, String)> {
        fn check<'a, T: NamedStructure>(
            kind: &'static str,
            items: impl Iterator<Item = &'a T>,
        ) -> Option<(&'static str, String)>
        where
            T: 'a,
        {
            let mut seen = HashSet::new();
            for item in items {
                let name = item.object_name();
                if !seen.insert(name.clone()) {
                    return Some((kind, name.qualified_name()));
                }
            }
            None
        }

        check("table", self.tables.iter())
            .or_else(|| check("view", self.views.iter()))
            .or_else(|| check("procedure", self.procedures.iter()))
            .or_else(|| check("function", self.functions.iter()))
            .or_else(|| check("trigger", self.triggers.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(schema: Option<&str>, name: &str) -> TableStructure {
        TableStructure::new(schema.map(Into::into), name)
    }

    #[test]
    fn sort_key_uses_empty_string_for_missing_schema() {
        let named = ObjectName::new("users");
        let qualified = ObjectName::with_schema("public", "users");
        assert_eq!(named.sort_key(), ".users");
        assert_eq!(qualified.sort_key(), "public.users");
    }

    #[test]
    fn sort_key_is_case_sensitive() {
        let upper = ObjectName::with_schema("S", "A");
        let lower = ObjectName::with_schema("s", "a");
        assert!(upper.sort_key() < lower.sort_key());
    }

    #[test]
    fn find_table_matches_schema_and_name() {
        let structure = DatabaseStructure {
            tables: vec![table(Some("s"), "users"), table(None, "users")],
            ..Default::default()
        };

        let found = structure.find_table(Some("s"), "users").unwrap();
        assert_eq!(found.schema_name.as_deref(), Some("s"));

        let bare = structure.find_table(None, "users").unwrap();
        assert_eq!(bare.schema_name, None);

        assert!(structure.find_table(Some("other"), "users").is_none());
    }

    #[test]
    fn dependencies_scan_all_tables() {
        let mut orders = table(Some("s"), "orders");
        orders.foreign_keys.push(ForeignKey {
            constraint_name: Some("fk_orders_users".into()),
            schema_name: Some("s".into()),
            pure_name: "orders".into(),
            ref_schema_name: Some("s".into()),
            ref_table_name: "users".into(),
            columns: vec![ForeignKeyColumn {
                column_name: "user_id".into(),
                ref_column_name: "id".into(),
            }],
            update_action: ForeignKeyAction::NoAction,
            delete_action: ForeignKeyAction::Cascade,
        });
        let mut audit = table(Some("audit"), "events");
        audit.foreign_keys.push(ForeignKey {
            constraint_name: Some("fk_events_users".into()),
            schema_name: Some("audit".into()),
            pure_name: "events".into(),
            ref_schema_name: Some("s".into()),
            ref_table_name: "users".into(),
            columns: Vec::new(),
            update_action: ForeignKeyAction::default(),
            delete_action: ForeignKeyAction::default(),
        });

        let structure = DatabaseStructure {
            tables: vec![table(Some("s"), "users"), orders, audit],
            ..Default::default()
        };

        let deps = structure.dependencies_of(Some("s"), "users");
        assert_eq!(deps.len(), 2);
        assert!(deps.iter().all(|fk| fk.references(Some("s"), "users")));

        assert!(structure.dependencies_of(Some("s"), "orders").is_empty());
    }

    #[test]
    fn first_duplicate_detects_repeated_identity_per_kind() {
        let structure = DatabaseStructure {
            tables: vec![table(Some("s"), "users"), table(Some("s"), "users")],
            ..Default::default()
        };
        assert_eq!(
            structure.first_duplicate(),
            Some(("table", "s.users".to_string()))
        );

        // Same name in a different kind is not a duplicate
        let mixed = DatabaseStructure {
            tables: vec![table(Some("s"), "users")],
            views: vec![ViewStructure::new(Some("s".into()), "users")],
            ..Default::default()
        };
        assert_eq!(mixed.first_duplicate(), None);
    }

    #[test]
    fn structure_serializes_in_camel_case() {
        let fk = ForeignKey {
            constraint_name: None,
            schema_name: Some("s".into()),
            pure_name: "orders".into(),
            ref_schema_name: Some("s".into()),
            ref_table_name: "users".into(),
            columns: Vec::new(),
            update_action: ForeignKeyAction::default(),
            delete_action: ForeignKeyAction::default(),
        };
        let value = serde_json::to_value(&fk).unwrap();
        assert_eq!(value["pureName"], "orders");
        assert_eq!(value["refTableName"], "users");
        assert_eq!(value["refSchemaName"], "s");
    }
}
