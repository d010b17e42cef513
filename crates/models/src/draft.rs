use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Opaque JSON object carried by a draft.
pub type DraftData = serde_json::Map<String, serde_json::Value>;

/// Path prefix used to build a draft's `iri`.
pub const IRI_PREFIX: &str = "/front/drafts";

/// One stored draft. Field names match the JSON wire format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Owner id, taken from the `X-People` header.
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub context: String,
    pub data: DraftData,
    pub created_at: String,
    pub iri: String,
}

impl Draft {
    /// Build a fresh draft, stamping `createdAt` and deriving `iri` from the context.
    pub fn new(id: i64, req: CreateDraftRequest, now: DateTime<Utc>) -> Self {
        let iri = draft_iri(&req.context);
        Self {
            id,
            kind: req.kind,
            context: req.context,
            data: req.data,
            created_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            iri,
        }
    }
}

pub fn draft_iri(context: &str) -> String {
    format!("{IRI_PREFIX}/{context}")
}

/// POST body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CreateDraftRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub context: String,
    pub data: DraftData,
}

impl CreateDraftRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.context.is_empty() {
            return Err(ModelError::Validation("context must not be empty".into()));
        }
        if self.context.contains('/') {
            return Err(ModelError::Validation("context must not contain '/'".into()));
        }
        Ok(())
    }
}

/// PUT body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateDraftRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: DraftData,
}

/// Fields an update may touch, addressed by `(id, context)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DraftUpdate {
    pub id: i64,
    pub context: String,
    pub kind: String,
    pub data: DraftData,
}

impl DraftUpdate {
    pub fn new(id: i64, context: impl Into<String>, req: UpdateDraftRequest) -> Self {
        Self { id, context: context.into(), kind: req.kind, data: req.data }
    }
}
