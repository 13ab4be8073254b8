//! Document vault endpoints (`vault/v1`)
//!
//! Ingestion is asynchronous: `upload` returns a presigned URL, the caller
//! PUTs the file there, then `ingest` starts processing and
//! `retrieve_object` reports its progress.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::client::LexvaultClient;
use crate::error::Result;
use crate::model::{ApiEnum, RawMap};

crate::wire_enum! {
    pub enum VaultStatus {
        Active => "active",
        Archived => "archived",
        Deleting => "deleting",
    }
}

crate::wire_enum! {
    pub enum IngestStatus {
        Pending => "pending",
        Processing => "processing",
        Completed => "completed",
        Failed => "failed",
    }
}

impl IngestStatus {
    /// No further status changes are expected
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

crate::wire_enum! {
    pub enum VaultSearchMethod {
        Vector => "vector",
        Hybrid => "hybrid",
        Fast => "fast",
        Graph => "graph",
    }
}

crate::api_model! {
    pub struct Vault => VaultBuilder {
        required id: String = "id";
        required name: String = "name";
        nullable description: String = "description";
        optional status: ApiEnum<VaultStatus> = "status";
        optional object_count: u64 = "objectCount";
        optional total_bytes: u64 = "totalBytes";
        optional enable_graph: bool = "enableGraph";
        optional created_at: DateTime<Utc> = "createdAt";
        optional updated_at: DateTime<Utc> = "updatedAt";
    }
}

crate::api_model! {
    pub struct VaultList => VaultListBuilder {
        required vaults: Vec<Vault> = "vaults";
        optional total: u64 = "total";
    }
}

crate::api_model! {
    pub struct VaultDeleteResponse => VaultDeleteResponseBuilder {
        optional success: bool = "success";
        optional deleted_objects: u64 = "deletedObjects";
    }
}

crate::api_model! {
    pub struct VaultObject => VaultObjectBuilder {
        required id: String = "id";
        required filename: String = "filename";
        optional content_type: String = "contentType";
        optional size_bytes: u64 = "sizeBytes";
        optional ingestion_status: ApiEnum<IngestStatus> = "ingestionStatus";
        optional page_count: u32 = "pageCount";
        optional chunk_count: u32 = "chunkCount";
        /// Caller-supplied metadata, passed through untouched
        optional metadata: RawMap = "metadata";
        nullable error: String = "error";
        optional created_at: DateTime<Utc> = "createdAt";
    }
}

crate::api_model! {
    pub struct VaultObjectList => VaultObjectListBuilder {
        required objects: Vec<VaultObject> = "objects";
        optional total: u64 = "total";
    }
}

crate::api_model! {
    pub struct UploadTarget => UploadTargetBuilder {
        required object_id: String = "objectId";
        /// Presigned URL accepting a single PUT of the file body
        required upload_url: String = "uploadUrl";
        optional expires_in: u64 = "expiresIn";
    }
}

crate::api_model! {
    pub struct IngestJob => IngestJobBuilder {
        required object_id: String = "objectId";
        required status: ApiEnum<IngestStatus> = "status";
        optional workflow_id: String = "workflowId";
        optional message: String = "message";
    }
}

crate::api_model! {
    pub struct VaultChunk => VaultChunkBuilder {
        required text: String = "text";
        required object_id: String = "objectId";
        optional filename: String = "filename";
        optional score: f64 = "score";
        optional page: u32 = "page";
    }
}

crate::api_model! {
    pub struct VaultSearchResponse => VaultSearchResponseBuilder {
        required chunks: Vec<VaultChunk> = "chunks";
        optional method: ApiEnum<VaultSearchMethod> = "method";
        /// Graph answers carry an arbitrary entity structure
        optional graph: Value = "graph";
    }
}

crate::api_params! {
    pub struct VaultCreateParams => VaultCreateParamsBuilder {
        method: POST,
        service: Vault,
        path: [],
        path_params: (),
        response: Vault,
        fields {
            body required name: String = "name";
            body optional description: String = "description";
            body optional enable_graph: bool = "enableGraph";
            header optional idempotency_key: String = "Idempotency-Key";
        }
    }
}

crate::api_params! {
    pub struct VaultListParams => VaultListParamsBuilder {
        method: GET,
        service: Vault,
        path: [],
        path_params: (),
        response: VaultList,
        fields {
            query optional limit: u32 = "limit";
            query optional offset: u32 = "offset";
            query optional status: ApiEnum<VaultStatus> = "status";
        }
    }
}

crate::api_params! {
    pub struct VaultRetrieveParams => VaultRetrieveParamsBuilder {
        method: GET,
        service: Vault,
        path: [id],
        path_params: (id),
        response: Vault,
        fields {}
    }
}

crate::api_params! {
    /// Partial update: omitted fields are left unchanged, a `None`
    /// description clears it
    pub struct VaultUpdateParams => VaultUpdateParamsBuilder {
        method: PATCH,
        service: Vault,
        path: [id],
        path_params: (id),
        response: Vault,
        fields {
            body optional name: String = "name";
            body nullable description: String = "description";
            body optional enable_graph: bool = "enableGraph";
        }
    }
}

crate::api_params! {
    pub struct VaultDeleteParams => VaultDeleteParamsBuilder {
        method: DELETE,
        service: Vault,
        path: [id],
        path_params: (id),
        response: VaultDeleteResponse,
        fields {
            /// Delete even when objects are still ingesting
            query optional force: bool = "force";
        }
    }
}

crate::api_params! {
    pub struct VaultSearchParams => VaultSearchParamsBuilder {
        method: POST,
        service: Vault,
        path: [id, "search"],
        path_params: (id),
        response: VaultSearchResponse,
        fields {
            body required query: String = "query";
            body optional search_method: ApiEnum<VaultSearchMethod> = "method";
            body optional top_k: u32 = "topK";
            body optional object_ids: Vec<String> = "objectIds";
        }
    }
}

crate::api_params! {
    pub struct VaultUploadParams => VaultUploadParamsBuilder {
        method: POST,
        service: Vault,
        path: [id, "upload"],
        path_params: (id),
        response: UploadTarget,
        fields {
            body required filename: String = "filename";
            body required content_type: String = "contentType";
            body optional size_bytes: u64 = "sizeBytes";
            body optional metadata: RawMap = "metadata";
            body optional auto_index: bool = "autoIndex";
            header optional idempotency_key: String = "Idempotency-Key";
        }
    }
}

crate::api_params! {
    pub struct VaultIngestParams => VaultIngestParamsBuilder {
        method: POST,
        service: Vault,
        path: [id, "ingest", object_id],
        path_params: (id, object_id),
        response: IngestJob,
        fields {}
    }
}

crate::api_params! {
    pub struct VaultObjectRetrieveParams => VaultObjectRetrieveParamsBuilder {
        method: GET,
        service: Vault,
        path: [id, "objects", object_id],
        path_params: (id, object_id),
        response: VaultObject,
        fields {}
    }
}

crate::api_params! {
    pub struct VaultObjectListParams => VaultObjectListParamsBuilder {
        method: GET,
        service: Vault,
        path: [id, "objects"],
        path_params: (id),
        response: VaultObjectList,
        fields {
            query optional limit: u32 = "limit";
            query optional offset: u32 = "offset";
            query optional ingestion_status: ApiEnum<IngestStatus> = "ingestionStatus";
        }
    }
}

pub struct VaultService<'a> {
    client: &'a LexvaultClient,
}

impl<'a> VaultService<'a> {
    pub(crate) fn new(client: &'a LexvaultClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, params: &VaultCreateParams) -> Result<Vault> {
        self.client.execute(params).await
    }

    pub async fn list(&self, params: &VaultListParams) -> Result<VaultList> {
        self.client.execute(params).await
    }

    pub async fn retrieve(&self, params: &VaultRetrieveParams) -> Result<Vault> {
        self.client.execute(params).await
    }

    pub async fn update(&self, params: &VaultUpdateParams) -> Result<Vault> {
        self.client.execute(params).await
    }

    pub async fn delete(&self, params: &VaultDeleteParams) -> Result<VaultDeleteResponse> {
        self.client.execute(params).await
    }

    pub async fn search(&self, params: &VaultSearchParams) -> Result<VaultSearchResponse> {
        self.client.execute(params).await
    }

    pub async fn upload(&self, params: &VaultUploadParams) -> Result<UploadTarget> {
        self.client.execute(params).await
    }

    pub async fn ingest(&self, params: &VaultIngestParams) -> Result<IngestJob> {
        self.client.execute(params).await
    }

    pub async fn retrieve_object(&self, params: &VaultObjectRetrieveParams) -> Result<VaultObject> {
        self.client.execute(params).await
    }

    pub async fn list_objects(&self, params: &VaultObjectListParams) -> Result<VaultObjectList> {
        self.client.execute(params).await
    }
}
