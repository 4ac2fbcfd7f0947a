//! External triage service client (Infermedica-style `/triage`).

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use medassist_contracts::{
    error::{AssistResult, ServiceError},
    triage::{TriageLevel, TriageRequest},
};
use medassist_core::traits::TriageService;

use crate::{
    config::TriageServiceConfig,
    http::{client, service_send_error},
};

pub struct InfermedicaTriage {
    endpoint: String,
    app_id: String,
    app_key: String,
    timeout_secs: u64,
    client: Client,
}

impl InfermedicaTriage {
    /// `None` when either credential is missing.
    pub fn from_config(config: &TriageServiceConfig) -> AssistResult<Option<Self>> {
        let (Some(app_id), Some(app_key)) = (&config.app_id, &config.app_key) else {
            return Ok(None);
        };
        Ok(Some(Self {
            endpoint: config.endpoint.clone(),
            app_id: app_id.clone(),
            app_key: app_key.clone(),
            timeout_secs: config.timeout_secs,
            client: client(config.timeout_secs)?,
        }))
    }
}

/// Map the service's `triage_level`. Missing or unrecognized is `Unknown`.
pub fn parse_triage_level(body: &Value) -> TriageLevel {
    body.get("triage_level")
        .and_then(Value::as_str)
        .map(TriageLevel::from_service_label)
        .unwrap_or(TriageLevel::Unknown)
}

impl TriageService for InfermedicaTriage {
    fn assess(&self, request: &TriageRequest) -> Result<TriageLevel, ServiceError> {
        debug!(url = %self.endpoint, age = request.age.value, "calling triage service");

        let response = self
            .client
            .post(&self.endpoint)
            .header("App-Id", &self.app_id)
            .header("App-Key", &self.app_key)
            .json(request)
            .send()
            .map_err(|e| service_send_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .map_err(|e| ServiceError::InvalidBody(format!("failed to parse triage response: {}", e)))?;
        Ok(parse_triage_level(&body))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use medassist_contracts::triage::TriageLevel;

    use crate::config::TriageServiceConfig;

    use super::{parse_triage_level, InfermedicaTriage};

    #[test]
    fn test_parse_service_levels() {
        let cases = [
            ("emergency_ambulance", TriageLevel::Emergency),
            ("emergency", TriageLevel::Emergency),
            ("consultation_24", TriageLevel::DoctorVisit),
            ("consultation", TriageLevel::DoctorVisit),
            ("self_care", TriageLevel::SelfCare),
            ("something_new", TriageLevel::Unknown),
        ];
        for (label, expected) in cases {
            assert_eq!(parse_triage_level(&json!({ "triage_level": label })), expected, "{label}");
        }
    }

    #[test]
    fn test_missing_level_is_unknown() {
        assert_eq!(parse_triage_level(&json!({ "serious": [] })), TriageLevel::Unknown);
        assert_eq!(parse_triage_level(&json!({ "triage_level": 3 })), TriageLevel::Unknown);
    }

    #[test]
    fn test_missing_credentials_disable_service() {
        let mut config = TriageServiceConfig::default();
        config.app_id = Some("id".to_string());
        assert!(InfermedicaTriage::from_config(&config).unwrap().is_none());
    }
}
