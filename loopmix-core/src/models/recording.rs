use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single immutable artifact assembled from all retained chunks once
/// recording stops. Held in memory only; never written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedRecording {
    pub id: String,
    /// Negotiated media type, e.g. `audio/webm;codecs=opus`.
    pub mime_type: String,
    pub data: Vec<u8>,
    /// Number of non-empty chunks consolidated, in arrival order.
    pub chunk_count: usize,
    /// The recording window that produced this blob.
    pub window_ms: u64,
    pub created_at: DateTime<Utc>,
}

impl FinalizedRecording {
    /// Consolidate chunks, in arrival order, into one blob.
    pub fn from_chunks(mime_type: &str, chunks: Vec<Vec<u8>>, window_ms: u64) -> Self {
        let chunk_count = chunks.len();
        let mut data = Vec::with_capacity(chunks.iter().map(Vec::len).sum());
        for chunk in chunks {
            data.extend_from_slice(&chunk);
        }
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            mime_type: mime_type.to_string(),
            data,
            chunk_count,
            window_ms,
            created_at: Utc::now(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Serializable summary without the payload.
    pub fn info(&self) -> RecordingInfo {
        RecordingInfo {
            id: self.id.clone(),
            mime_type: self.mime_type.clone(),
            size_bytes: self.data.len(),
            chunk_count: self.chunk_count,
            window_ms: self.window_ms,
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// Metadata exported for UI display or host-process logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingInfo {
    pub id: String,
    pub mime_type: String,
    pub size_bytes: usize,
    pub chunk_count: usize,
    pub window_ms: u64,
    pub created_at: String,
}
