// src/identity/mod.rs
// Proof-of-personhood verification. Handlers only see the trait so tests can
// swap in a local verifier.

pub mod world_id;

pub use world_id::WorldIdClient;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Proof payload as produced by the World ID widget. Field names match the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldIdProof {
    #[serde(default)]
    pub proof: String,
    #[serde(default)]
    pub merkle_root: String,
    #[serde(default)]
    pub nullifier_hash: String,
    #[serde(default)]
    pub verification_level: String,
}

impl WorldIdProof {
    /// All four fields must be present and non-empty.
    pub fn is_complete(&self) -> bool {
        [
            &self.proof,
            &self.merkle_root,
            &self.nullifier_hash,
            &self.verification_level,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified { nullifier_hash: String },
    Rejected { code: String },
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified { .. })
    }
}

#[async_trait]
pub trait ProofVerifier: Send + Sync {
    /// `Ok(Rejected)` for proofs the service refused; `Err` only for transport failures.
    async fn verify(
        &self,
        proof: &WorldIdProof,
        action: &str,
        signal: Option<&str>,
    ) -> Result<VerificationOutcome>;
}
