//! Parameter and response shapes of the metadata operations

use dbscope_core::{ForeignKey, ObjectName, TableStructure};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parameters of operations scoped to one database
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseParams {
    /// Saved-connection id
    pub conid: Uuid,
    /// Database name on that connection
    pub database: String,
}

/// Parameters of operations addressing one schema object
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedObjectParams {
    pub conid: Uuid,
    pub database: String,
    #[serde(default)]
    pub schema_name: Option<String>,
    pub pure_name: String,
}

impl NamedObjectParams {
    /// Display name of the addressed object
    pub fn qualified_name(&self) -> String {
        match &self.schema_name {
            Some(schema) => format!("{}.{}", schema, self.pure_name),
            None => self.pure_name.clone(),
        }
    }
}

/// Response of `list_objects`: one ordered name list per object kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectList {
    pub tables: Vec<ObjectName>,
    pub views: Vec<ObjectName>,
    pub procedures: Vec<ObjectName>,
    pub functions: Vec<ObjectName>,
    pub triggers: Vec<ObjectName>,
}

/// Response of `table_info`: the table descriptor merged with the foreign
/// keys (from any table in the database) targeting it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    #[serde(flatten)]
    pub table: TableStructure,
    pub dependencies: Vec<ForeignKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_object_params_deserialize_from_wire_shape() {
        let conid = Uuid::new_v4();
        let json = format!(
            r#"{{"conid":"{conid}","database":"app","schemaName":"s","pureName":"users"}}"#
        );
        let params: NamedObjectParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params.conid, conid);
        assert_eq!(params.schema_name.as_deref(), Some("s"));
        assert_eq!(params.qualified_name(), "s.users");
    }

    #[test]
    fn schema_name_is_optional() {
        let conid = Uuid::new_v4();
        let json = format!(r#"{{"conid":"{conid}","database":"app","pureName":"users"}}"#);
        let params: NamedObjectParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params.schema_name, None);
        assert_eq!(params.qualified_name(), "users");
    }

    #[test]
    fn table_metadata_flattens_the_descriptor() {
        let meta = TableMetadata {
            table: TableStructure::new(Some("s".into()), "users"),
            dependencies: Vec::new(),
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["pureName"], "users");
        assert_eq!(value["schemaName"], "s");
        assert!(value["dependencies"].as_array().unwrap().is_empty());
    }
}
