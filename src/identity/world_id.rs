// src/identity/world_id.rs
// World ID cloud verification: POST the proof to /api/v2/verify.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{ProofVerifier, VerificationOutcome, WorldIdProof};

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    #[serde(flatten)]
    proof: &'a WorldIdProof,
    app_id: &'a str,
    action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal: Option<&'a str>,
}

pub struct WorldIdClient {
    client: Client,
    base_url: String,
    app_id: String,
}

impl WorldIdClient {
    pub fn new(base_url: impl Into<String>, app_id: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build World ID HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
        })
    }

    pub fn verify_url(&self) -> String {
        format!("{}/api/v2/verify", self.base_url)
    }

    fn request<'a>(
        &'a self,
        proof: &'a WorldIdProof,
        action: &'a str,
        signal: Option<&'a str>,
    ) -> VerifyRequest<'a> {
        VerifyRequest {
            proof,
            app_id: &self.app_id,
            action,
            signal,
        }
    }
}

/// Interpret the verify endpoint's answer. Only a 2xx with `verified: true` passes.
pub fn outcome_from_response(status: StatusCode, body: &Value, nullifier_hash: &str) -> VerificationOutcome {
    if status.is_success() && body["verified"].as_bool() == Some(true) {
        return VerificationOutcome::Verified {
            nullifier_hash: nullifier_hash.to_string(),
        };
    }

    let code = body["code"]
        .as_str()
        .or_else(|| body["detail"].as_str())
        .unwrap_or("Unknown error")
        .to_string();
    VerificationOutcome::Rejected { code }
}

#[async_trait]
impl ProofVerifier for WorldIdClient {
    async fn verify(
        &self,
        proof: &WorldIdProof,
        action: &str,
        signal: Option<&str>,
    ) -> Result<VerificationOutcome> {
        let url = self.verify_url();
        debug!("Verifying World ID proof for action '{}' at {}", action, url);

        let response = self
            .client
            .post(&url)
            .json(&self.request(proof, action, signal))
            .send()
            .await
            .context("World ID verify request failed")?;

        let status = response.status();
        // error responses are not always JSON
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        let outcome = outcome_from_response(status, &body, &proof.nullifier_hash);
        match &outcome {
            VerificationOutcome::Verified { nullifier_hash } => {
                info!("World ID proof verified for {}", nullifier_hash);
            }
            VerificationOutcome::Rejected { code } => {
                warn!("World ID proof rejected ({}): {}", status, code);
            }
        }
        Ok(outcome)
    }
}
