//! Drug-label lookup against the openFDA `drug/label` endpoint.

use reqwest::{blocking::Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use medassist_contracts::{
    error::{AssistError, AssistResult, ServiceError},
    knowledge::DrugLabel,
};
use medassist_core::traits::LabelLookup;

use crate::{
    config::LabelConfig,
    http::{client, service_send_error},
};

pub struct OpenFdaLabels {
    endpoint: Url,
    timeout_secs: u64,
    client: Client,
}

impl OpenFdaLabels {
    pub fn new(config: &LabelConfig) -> AssistResult<Self> {
        Ok(Self {
            endpoint: Url::parse(&config.endpoint).map_err(|e| AssistError::ConfigError {
                reason: format!("invalid label endpoint '{}': {}", config.endpoint, e),
            })?,
            timeout_secs: config.timeout_secs,
            client: client(config.timeout_secs)?,
        })
    }
}

/// Search brand and generic names, first result only.
///
/// The two clauses are joined by a space, which the query serializer writes
/// as the `+` openFDA reads as OR.
pub fn label_url(endpoint: &Url, medication: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair(
            "search",
            &format!("openfda.brand_name:{medication} openfda.generic_name:{medication}"),
        )
        .append_pair("limit", "1");
    url
}

/// A string field, or the first element of an array field.
fn field(result: &Value, name: &str) -> String {
    match result.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .first()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

/// The first result's label fields; `None` when there are no results.
pub fn parse_label(body: &Value) -> Option<DrugLabel> {
    let result = body.get("results")?.get(0)?;
    Some(DrugLabel {
        purpose: field(result, "purpose"),
        indications: field(result, "indications_and_usage"),
        warnings: field(result, "warnings"),
        contraindications: field(result, "contraindications"),
        adverse_reactions: field(result, "adverse_reactions"),
    })
}

impl LabelLookup for OpenFdaLabels {
    fn lookup(&self, medication: &str) -> Result<Option<DrugLabel>, ServiceError> {
        let url = label_url(&self.endpoint, medication);
        debug!(url = %url, "looking up drug label");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| service_send_error(e, self.timeout_secs))?;

        // openFDA answers 404 when the search matches nothing.
        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => return Err(ServiceError::Status(status.as_u16())),
            _ => {}
        }

        let body: Value = response
            .json()
            .map_err(|e| ServiceError::InvalidBody(format!("failed to parse label response: {}", e)))?;
        Ok(parse_label(&body))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use reqwest::Url;

    use medassist_contracts::error::AssistError;

    use crate::config::LabelConfig;

    use super::{label_url, parse_label, OpenFdaLabels};

    fn endpoint() -> Url {
        Url::parse("https://api.fda.gov/drug/label.json").unwrap()
    }

    fn search(url: &Url) -> String {
        url.query_pairs().find(|(k, _)| k == "search").map(|(_, v)| v.into_owned()).unwrap()
    }

    #[test]
    fn test_label_url_searches_brand_and_generic() {
        let url = label_url(&endpoint(), "ibuprofen");
        assert_eq!(url.path(), "/drug/label.json");
        assert_eq!(search(&url), "openfda.brand_name:ibuprofen openfda.generic_name:ibuprofen");
        assert!(url.query().unwrap().contains("ibuprofen+openfda.generic_name"));
        assert!(url.query().unwrap().ends_with("&limit=1"));
    }

    #[test]
    fn test_label_url_escapes_reserved_characters() {
        let url = label_url(&endpoint(), "a+b&limit=50");
        let query = url.query().unwrap();
        assert!(query.contains("a%2Bb%26limit%3D50"));
        assert_eq!(url.query_pairs().filter(|(k, _)| k == "limit").count(), 1);
        assert_eq!(search(&url), "openfda.brand_name:a+b&limit=50 openfda.generic_name:a+b&limit=50");
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let config = LabelConfig { endpoint: "not a url".to_string(), ..LabelConfig::default() };
        assert!(matches!(OpenFdaLabels::new(&config), Err(AssistError::ConfigError { .. })));
    }

    #[test]
    fn test_parse_label_takes_first_array_element() {
        let body = json!({
            "results": [{
                "purpose": ["Pain reliever/fever reducer"],
                "indications_and_usage": ["temporarily relieves minor aches", "second"],
                "warnings": "Liver warning",
                "adverse_reactions": [],
            }]
        });

        let label = parse_label(&body).unwrap();
        assert_eq!(label.purpose, "Pain reliever/fever reducer");
        assert_eq!(label.indications, "temporarily relieves minor aches");
        assert_eq!(label.warnings, "Liver warning");
        assert!(label.contraindications.is_empty());
        assert!(label.adverse_reactions.is_empty());
    }

    #[test]
    fn test_parse_label_without_results() {
        assert!(parse_label(&json!({ "results": [] })).is_none());
        assert!(parse_label(&json!({ "error": { "code": "NOT_FOUND" } })).is_none());
    }
}
