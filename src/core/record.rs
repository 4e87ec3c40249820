use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable, backend-assigned record identifier.
pub type RecordId = String;

/// A record as the engine sees it: a stable identifier plus whatever fields
/// the external data model carries (name, email, role, ...).
///
/// The engine never interprets the fields; it only needs the full snapshot so
/// a staged record can be restored without a re-fetch. The fields are kept
/// flattened so the wire shape stays `{ "id": ..., "name": ..., ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// The creation payload for restoring this record: every field except the
    /// identifier. The backend assigns a new id on re-creation.
    pub fn fields_without_id(&self) -> Map<String, Value> {
        let mut fields = self.fields.clone();
        fields.remove("id");
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_stay_flattened() {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("Alice"));
        let record = Record::new("17", fields);

        let wire = serde_json::to_value(&record).unwrap();
        assert_eq!(wire, json!({ "id": "17", "name": "Alice" }));

        let back: Record = serde_json::from_value(wire).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_creation_payload_omits_id() {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("Bob"));
        fields.insert("id".to_string(), json!("stale"));
        let record = Record::new("42", fields);

        let payload = record.fields_without_id();
        assert!(!payload.contains_key("id"));
        assert_eq!(payload.get("name"), Some(&json!("Bob")));
    }
}
