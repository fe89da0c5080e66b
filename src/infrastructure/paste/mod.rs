//! Paste client - shares text through an OpenStack-style paste service

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::PasteError;
use crate::domain::traits::PasteService;

#[derive(Serialize)]
struct PasteRequest<'a> {
    language: &'a str,
    code: &'a str,
    private: bool,
}

#[derive(Deserialize)]
struct PasteResponse {
    data: Option<serde_json::Value>,
    error: Option<String>,
}

/// Client for the lodgeit JSON API (paste.openstack.org and friends)
pub struct OpenStackPaste {
    client: Client,
    endpoint: String,
}

impl OpenStackPaste {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PasteService for OpenStackPaste {
    async fn create_paste(&self, contents: &str) -> Result<String, PasteError> {
        let url = format!("{}/json/?method=pastes.newPaste", self.endpoint);
        let request = PasteRequest {
            language: "text",
            code: contents,
            private: true,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(PasteError::Status(response.status().as_u16()));
        }

        let body: PasteResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(PasteError::Service(error));
        }
        match body.data {
            Some(serde_json::Value::String(id)) => Ok(format!("{}/show/{}", self.endpoint, id)),
            Some(serde_json::Value::Number(id)) => Ok(format!("{}/show/{}", self.endpoint, id)),
            _ => Err(PasteError::Service("response carried no paste id".to_string())),
        }
    }
}
