use qdrant_client::{
    config::QdrantConfig,
    qdrant::{
        point_id::PointIdOptions, with_payload_selector::SelectorOptions, CreateCollection,
        Distance, PointId, PointStruct, SearchPoints, UpsertPoints, Value, VectorParams,
        VectorsConfig, WithPayloadSelector,
    },
    Qdrant,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Gemini embedding-001 vectors.
pub const EMBEDDING_DIM: u64 = 768;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub text: String,
    pub chunk_index: i64,
    pub score: f32,
}

/// One similarity index per processed document, backed by the external
/// Qdrant service. The collection is UUID-named and dropped when the next
/// document replaces it, so nothing outlives the session.
#[derive(Clone)]
pub struct ChunkIndex {
    client: Arc<Qdrant>,
    collection: String,
}

async fn connect(url: &str) -> Result<Qdrant, IndexError> {
    // Qdrant serves gRPC on 6334; rewrite the common REST port.
    let clean_url = if url.contains("://") {
        url.split("://").nth(1).unwrap_or(url).to_string()
    } else {
        url.to_string()
    };
    let grpc_url = if clean_url.ends_with(":6333") {
        clean_url.replace(":6333", ":6334")
    } else {
        clean_url
    };
    let url_with_scheme = format!("http://{}", grpc_url);
    log::info!("Connecting to Qdrant at {}", url_with_scheme);

    let mut config = QdrantConfig::from_url(&url_with_scheme);
    config.check_compatibility = false;
    config.timeout = Duration::from_secs(30);
    config.connect_timeout = Duration::from_secs(10);

    let client = Qdrant::new(config).map_err(|e| IndexError::Connection(e.to_string()))?;

    client
        .list_collections()
        .await
        .map_err(|e| IndexError::Connection(format!("Failed to connect to Qdrant: {}", e)))?;

    Ok(client)
}

impl ChunkIndex {
    /// Connect and create a fresh, uniquely named collection.
    pub async fn create(url: &str) -> Result<Self, IndexError> {
        let client = connect(url).await?;
        let collection = format!("doc_{}", Uuid::new_v4().simple());

        let vectors_config = VectorsConfig {
            config: Some(qdrant_client::qdrant::vectors_config::Config::Params(
                VectorParams {
                    size: EMBEDDING_DIM,
                    distance: Distance::Cosine.into(),
                    ..Default::default()
                },
            )),
        };

        client
            .create_collection(CreateCollection {
                collection_name: collection.clone(),
                vectors_config: Some(vectors_config),
                ..Default::default()
            })
            .await
            .map_err(|e| IndexError::Operation(e.to_string()))?;

        log::info!("Created chunk collection {}", collection);

        Ok(Self {
            client: Arc::new(client),
            collection,
        })
    }

    pub async fn add_chunk(
        &self,
        text: &str,
        chunk_index: usize,
        embedding: Vec<f32>,
    ) -> Result<String, IndexError> {
        let point_id = Uuid::new_v4().to_string();

        let mut payload = HashMap::new();
        payload.insert("text".to_string(), Value::from(text.to_string()));
        payload.insert("chunk".to_string(), Value::from(chunk_index as i64));

        let point = PointStruct {
            id: Some(PointId {
                point_id_options: Some(PointIdOptions::Uuid(point_id.clone())),
            }),
            vectors: Some(embedding.into()),
            payload,
        };

        self.client
            .upsert_points(UpsertPoints {
                collection_name: self.collection.clone(),
                points: vec![point],
                ..Default::default()
            })
            .await
            .map_err(|e| IndexError::Operation(e.to_string()))?;

        Ok(point_id)
    }

    pub async fn search(
        &self,
        query_vector: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<ScoredChunk>, IndexError> {
        let request = SearchPoints {
            collection_name: self.collection.clone(),
            vector: query_vector,
            limit,
            with_payload: Some(WithPayloadSelector {
                selector_options: Some(SelectorOptions::Enable(true)),
            }),
            ..Default::default()
        };

        let results = self
            .client
            .search_points(request)
            .await
            .map_err(|e| IndexError::Operation(e.to_string()))?;

        let chunks = results
            .result
            .into_iter()
            .map(|point| {
                let text = point
                    .payload
                    .get("text")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                let chunk_index = point
                    .payload
                    .get("chunk")
                    .and_then(|v| match v.kind {
                        Some(qdrant_client::qdrant::value::Kind::IntegerValue(i)) => Some(i),
                        _ => None,
                    })
                    .unwrap_or(0);
                ScoredChunk {
                    text,
                    chunk_index,
                    score: point.score,
                }
            })
            .collect();

        Ok(chunks)
    }

    /// Drop the backing collection. Called when a new document replaces this
    /// one; the index is not meant to survive it.
    pub async fn destroy(&self) -> Result<(), IndexError> {
        self.client
            .delete_collection(self.collection.clone())
            .await
            .map_err(|e| IndexError::Operation(e.to_string()))?;
        log::info!("Dropped chunk collection {}", self.collection);
        Ok(())
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}
