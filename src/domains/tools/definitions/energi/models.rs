//! Response payloads returned by the Energinet Data Service API.
//!
//! The API is not schema-validated: every field defaults when missing so a
//! partial payload still decodes.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A single dataset row: column name to scalar value, in API order.
pub type Record = Map<String, Value>;

/// Body of `meta/dataset`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: Vec<DatasetSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetSummary {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

/// Body of `meta/{dataset}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetMetadataEnvelope {
    #[serde(default)]
    pub result: Option<DatasetMetadata>,
}

impl DatasetMetadataEnvelope {
    /// The metadata, unless the API returned nothing for the dataset.
    pub fn into_metadata(self) -> Option<DatasetMetadata> {
        self.result.filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetMetadata {
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Kept as a raw value; the API reports it as a number or a string.
    #[serde(default, rename = "recordCount")]
    pub record_count: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<ColumnInfo>,
    /// Remaining fields, only used to tell an empty object apart.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DatasetMetadata {
    fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.record_count.as_ref().is_none_or(Value::is_null)
            && self.columns.is_empty()
            && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub column_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

/// Body of `dataset/{dataset}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetRecords {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Vec<Record>,
}

/// Accept any scalar where text is expected; `null` reads as missing.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dataset_records_defaults() {
        let records: DatasetRecords = serde_json::from_value(json!({})).unwrap();
        assert_eq!(records.total, 0);
        assert!(records.records.is_empty());
    }

    #[test]
    fn test_record_keeps_key_order() {
        let records: DatasetRecords = serde_json::from_str(
            r#"{"total": 1, "records": [{"b": 1, "a": 2, "c": 3}]}"#,
        )
        .unwrap();
        let keys: Vec<_> = records.records[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let records: DatasetRecords =
            serde_json::from_value(json!({"total": null, "records": null})).unwrap();
        assert_eq!(records.total, 0);
        assert!(records.records.is_empty());

        let list: DatasetList =
            serde_json::from_value(json!({"result": [{"name": "CO2Emis", "description": 7}]}))
                .unwrap();
        assert_eq!(list.result[0].description.as_deref(), Some("7"));
    }

    #[test]
    fn test_empty_metadata_is_none() {
        let envelope: DatasetMetadataEnvelope =
            serde_json::from_value(json!({"result": {}})).unwrap();
        assert!(envelope.into_metadata().is_none());

        let envelope: DatasetMetadataEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.into_metadata().is_none());
    }

    #[test]
    fn test_metadata_decodes_columns() {
        let envelope: DatasetMetadataEnvelope = serde_json::from_value(json!({
            "result": {
                "description": "Spot prices",
                "recordCount": 1234,
                "columns": [{"name": "HourDK", "type": "datetime", "description": "Hour"}]
            }
        }))
        .unwrap();
        let metadata = envelope.into_metadata().unwrap();
        assert_eq!(metadata.description.as_deref(), Some("Spot prices"));
        assert_eq!(metadata.record_count, Some(json!(1234)));
        assert_eq!(metadata.columns[0].column_type.as_deref(), Some("datetime"));
    }
}
