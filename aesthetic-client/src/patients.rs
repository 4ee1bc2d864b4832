//! Patient endpoints

use aesthetic_core::domain::patient::Patient;
use aesthetic_core::dto::patient::CreatePatient;
use reqwest::Method;

use crate::SimulationClient;
use crate::error::Result;

impl SimulationClient {
    /// Register a new anonymised patient
    pub async fn create_patient(&self, req: CreatePatient) -> Result<Patient> {
        let response = self
            .request(Method::POST, "/patients")
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List the most recent patients (the service caps the list at 50)
    pub async fn list_patients(&self) -> Result<Vec<Patient>> {
        let response = self.request(Method::GET, "/patients").send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aesthetic_core::domain::patient::{AgeRange, Gender, SkinType};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_patient_sends_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/patients"))
            .and(header("authorization", "Bearer tok-1"))
            .and(body_json(json!({ "age_range": "46-55", "gender": "M", "skin_type": "Mate" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 12,
                "anonymous_id": "PAT-0012",
                "age_range": "46-55",
                "gender": "M",
                "skin_type": "Mate",
                "created_at": "2024-02-01T10:00:00"
            })))
            .mount(&server)
            .await;

        let client = SimulationClient::new(server.uri()).with_token("tok-1");
        let patient = client
            .create_patient(CreatePatient {
                age_range: AgeRange::From46To55,
                gender: Gender::Male,
                skin_type: SkinType::Olive,
            })
            .await
            .unwrap();

        assert_eq!(patient.id, 12);
        assert_eq!(patient.anonymous_id, "PAT-0012");
    }

    #[tokio::test]
    async fn test_list_patients_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/patients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = SimulationClient::new(server.uri());
        assert!(client.list_patients().await.unwrap().is_empty());
    }
}
