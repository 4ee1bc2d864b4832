//! Simulation endpoints

use aesthetic_core::domain::simulation::{JobId, Simulation};
use aesthetic_core::dto::simulation::CreateSimulation;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use crate::SimulationClient;
use crate::error::{ClientError, Result};

impl SimulationClient {
    // =============================================================================
    // Simulation Lifecycle
    // =============================================================================

    /// Submit a new simulation
    ///
    /// The image is uploaded as multipart form data. The service answers
    /// immediately with the job in a non-terminal state; use the poller to
    /// watch it to completion.
    pub async fn create_simulation(&self, req: CreateSimulation) -> Result<Simulation> {
        let mime = req.image.content_type().ok_or_else(|| {
            ClientError::InvalidRequest(format!(
                "unsupported image type: {}",
                req.image.file_name
            ))
        })?;

        let image = Part::bytes(req.image.bytes)
            .file_name(req.image.file_name)
            .mime_str(mime)?;

        let form = Form::new()
            .text("patient_id", req.patient_id.to_string())
            .text("intervention_type", req.intervention_type)
            .text("dose", req.dose.to_string())
            .part("image", image);

        let response = self
            .request(Method::POST, "/simulations")
            .multipart(form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the current state of a simulation
    pub async fn get_simulation(&self, id: &JobId) -> Result<Simulation> {
        let response = self
            .request_item(Method::GET, "/simulations", id.as_str())?
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List the practitioner's simulations, most recent first
    pub async fn list_simulations(&self) -> Result<Vec<Simulation>> {
        let response = self.request(Method::GET, "/simulations").send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aesthetic_core::domain::simulation::SimulationStatus;
    use aesthetic_core::dto::simulation::ImageUpload;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_request(file_name: &str) -> CreateSimulation {
        CreateSimulation {
            patient_id: 3,
            intervention_type: "lips".to_string(),
            dose: 1.5,
            image: ImageUpload::new(file_name, vec![0xFF, 0xD8, 0xFF, 0xE0]),
        }
    }

    #[tokio::test]
    async fn test_create_simulation_multipart() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/simulations"))
            .and(header("authorization", "Bearer tok-1"))
            .and(body_string_contains("name=\"intervention_type\""))
            .and(body_string_contains("name=\"image\"; filename=\"face.jpg\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 77,
                "patient_id": 3,
                "intervention_type": "lips",
                "dose": 1.5,
                "status": "processing",
                "original_image_path": "uploads/x_original.jpg",
                "created_at": "2024-05-02T09:00:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SimulationClient::new(server.uri()).with_token("tok-1");
        let sim = client.create_simulation(create_request("face.jpg")).await.unwrap();

        assert_eq!(sim.id, JobId::from(77));
        assert_eq!(sim.status, SimulationStatus::Processing);
    }

    #[tokio::test]
    async fn test_create_simulation_rejects_unknown_image_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = SimulationClient::new(server.uri());
        let err = client
            .create_simulation(create_request("face.tiff"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_get_simulation() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/simulations/77"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 77,
                "status": "completed",
                "generated_image_path": "uploads/x_generated.jpg",
                "generation_time": 4.5,
                "created_at": "2024-05-02T09:00:00",
                "completed_at": "2024-05-02T09:00:04.500000"
            })))
            .mount(&server)
            .await;

        let client = SimulationClient::new(server.uri());
        let sim = client.get_simulation(&JobId::from(77)).await.unwrap();

        assert!(sim.is_terminal());
        assert_eq!(sim.generation_time, Some(4.5));
    }

    #[tokio::test]
    async fn test_get_simulation_escapes_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/simulations/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "status": "completed" })))
            .expect(0)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/simulations/a%2Fb%3Fc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "a/b?c", "status": "pending" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SimulationClient::new(server.uri());
        let sim = client.get_simulation(&JobId::from("a/b?c")).await.unwrap();
        assert_eq!(sim.id, JobId::from("a/b?c"));

        let err = client.get_simulation(&JobId::from("7?x=1")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_simulation_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/simulations/404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "detail": "Simulation non trouvée" })),
            )
            .mount(&server)
            .await;

        let client = SimulationClient::new(server.uri());
        let err = client.get_simulation(&JobId::from(404)).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_simulation_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/simulations/5"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream busy"))
            .mount(&server)
            .await;

        let client = SimulationClient::new(server.uri());
        let err = client.get_simulation(&JobId::from(5)).await.unwrap_err();

        assert!(err.is_server_error());
        assert!(err.to_string().contains("upstream busy"));
    }

    #[tokio::test]
    async fn test_list_simulations() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/simulations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 2, "status": "pending" },
                { "id": 1, "status": "failed" }
            ])))
            .mount(&server)
            .await;

        let client = SimulationClient::new(server.uri());
        let sims = client.list_simulations().await.unwrap();

        assert_eq!(sims.len(), 2);
        assert_eq!(sims[1].status, SimulationStatus::Failed);
    }
}
