use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::provider::LlmProvider;
use super::types::GenerateRequest;
use crate::core::errors::ApiError;

#[derive(Clone)]
pub struct OllamaProvider {
    base_url: String,
    client: Client,
}

impl OllamaProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn health_check(&self) -> Result<bool, ApiError> {
        let url = format!("{}/api/tags", self.base_url);
        let res = self.client.get(&url).send().await;
        match res {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    async fn generate(
        &self,
        request: GenerateRequest,
        model_id: &str,
    ) -> Result<String, ApiError> {
        let url = format!("{}/api/generate", self.base_url);

        let mut body = json!({
            "model": model_id,
            "prompt": request.prompt,
            "stream": false,
        });

        if let Some(t) = request.temperature {
            if let Some(obj) = body.as_object_mut() {
                obj.insert("options".to_string(), json!({ "temperature": t }));
            }
        }

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::internal)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!("Ollama generate error: {}", text)));
        }

        let payload: Value = res.json().await.map_err(ApiError::internal)?;

        let content = payload["response"].as_str().unwrap_or_default().to_string();

        Ok(content)
    }

    async fn embed(&self, inputs: &[String], model_id: &str) -> Result<Vec<Vec<f32>>, ApiError> {
        let url = format!("{}/api/embeddings", self.base_url);

        let mut embeddings = Vec::with_capacity(inputs.len());
        for input in inputs {
            let body = json!({
                "model": model_id,
                "prompt": input,
            });

            let res = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(ApiError::internal)?;

            if !res.status().is_success() {
                let text = res.text().await.unwrap_or_default();
                return Err(ApiError::Internal(format!("Ollama embed error: {}", text)));
            }

            let payload: Value = res.json().await.map_err(ApiError::internal)?;

            let vec: Vec<f32> = payload["embedding"]
                .as_array()
                .map(|vals| {
                    vals.iter()
                        .filter_map(|v| v.as_f64().map(|f| f as f32))
                        .collect()
                })
                .unwrap_or_default();

            if vec.is_empty() {
                return Err(ApiError::Internal(format!(
                    "Ollama returned an empty embedding for model '{}'",
                    model_id
                )));
            }

            embeddings.push(vec);
        }

        Ok(embeddings)
    }
}
