//! Intervention catalogue endpoint

use aesthetic_core::domain::intervention::InterventionCatalog;
use reqwest::Method;

use crate::SimulationClient;
use crate::error::Result;

impl SimulationClient {
    /// Fetch the supported intervention types with their dose windows
    pub async fn list_interventions(&self) -> Result<InterventionCatalog> {
        let response = self.request(Method::GET, "/interventions").send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_interventions() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/interventions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "lips": { "name": "Lèvres", "min_dose": 0.5, "max_dose": 5.0, "unit": "ml" },
                "crow_feet": { "name": "Pattes d'oie", "min_dose": 5, "max_dose": 25, "unit": "unités" }
            })))
            .mount(&server)
            .await;

        let client = SimulationClient::new(server.uri());
        let catalog = client.list_interventions().await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog["lips"].dose_in_range(1.0));
        assert!(!catalog["crow_feet"].dose_in_range(30.0));
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/interventions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = SimulationClient::new(server.uri());
        let err = client.list_interventions().await.unwrap_err();
        assert!(matches!(err, crate::ClientError::ParseError(_)));
    }
}
