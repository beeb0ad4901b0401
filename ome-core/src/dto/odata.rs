//! Shared OData envelope types

use serde::Deserialize;

/// OData collection envelope (`GET` on a collection endpoint).
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    #[serde(rename = "@odata.count", default)]
    pub count: i64,
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Body OME returns on a non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorInfo {
    pub code: String,
    pub message: String,
    #[serde(rename = "@Message.ExtendedInfo", default)]
    pub extended_info: Vec<ExtendedInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtendedInfo {
    pub message: String,
}

impl ApiErrorBody {
    /// Flattens the error body into one display string, preferring the
    /// extended messages when OME supplies them.
    pub fn to_message(&self) -> String {
        if self.error.extended_info.is_empty() {
            self.error.message.clone()
        } else {
            self.error
                .extended_info
                .iter()
                .map(|info| info.message.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        }
    }
}

/// Parses an OME timestamp ("2024-03-18 09:45:12.301") into UTC.
///
/// OME omits the timezone designator; timestamps are reported in the
/// appliance's UTC clock.
pub fn parse_ome_time(value: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ome_time() {
        let parsed = parse_ome_time("2024-03-18 09:45:12.301").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-18T09:45:12.301+00:00");

        let parsed = parse_ome_time("2024-03-18 09:45:12").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-18T09:45:12+00:00");

        assert!(parse_ome_time("not a time").is_none());
    }

    #[test]
    fn test_collection_envelope() {
        let body = r#"{"@odata.count": 2, "value": [1, 2]}"#;
        let collection: Collection<i64> = serde_json::from_str(body).unwrap();
        assert_eq!(collection.count, 2);
        assert_eq!(collection.value, vec![1, 2]);

        // count and value are both optional on the wire
        let collection: Collection<i64> = serde_json::from_str("{}").unwrap();
        assert_eq!(collection.count, 0);
        assert!(collection.value.is_empty());
    }

    #[test]
    fn test_error_body_message() {
        let body = r#"{
            "error": {
                "code": "Base.1.0.GeneralError",
                "message": "A general error has occurred.",
                "@Message.ExtendedInfo": [
                    {"Message": "Unable to update the settings."},
                    {"Message": "Job is already running."}
                ]
            }
        }"#;
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.to_message(),
            "Unable to update the settings.; Job is already running."
        );
    }
}
