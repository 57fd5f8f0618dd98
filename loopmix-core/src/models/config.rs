use super::media::DisplaySource;

/// Default recording window: the product records 10 seconds of the mix.
pub const DEFAULT_RECORDING_MS: u64 = 10_000;

/// Sample rate of the mixing graph.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// Preferred encoder format. Sessions fail fast if the host cannot produce
/// it; there is no silent fallback to an unverified default.
pub const PREFERRED_MIME_TYPE: &str = "audio/webm;codecs=opus";

/// Policy for choosing the display source backing loopback capture.
///
/// The intent is "pick some valid screen"; which one is a policy decision,
/// not a hardcoded index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceSelector {
    /// First source the host reports.
    #[default]
    First,
    /// Source with a specific id.
    ById(String),
    /// Source whose name matches exactly.
    ByName(String),
}

impl SourceSelector {
    pub fn select<'a>(&self, sources: &'a [DisplaySource]) -> Option<&'a DisplaySource> {
        match self {
            Self::First => sources.first(),
            Self::ById(id) => sources.iter().find(|source| &source.id == id),
            Self::ByName(name) => sources.iter().find(|source| &source.name == name),
        }
    }
}

/// Configuration for a capture-record-loop session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Specific microphone device id, or None for the host default.
    pub mic_device_id: Option<String>,

    /// Recording window in milliseconds.
    pub recording_ms: u64,

    /// Mixing graph sample rate in Hz.
    pub sample_rate: u32,

    /// Encoder MIME type to negotiate. Unsupported formats abort the session.
    pub mime_type: String,

    /// Display source selection policy for loopback capture.
    pub source_selector: SourceSelector,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.recording_ms == 0 {
            return Err("recording window must be positive".into());
        }
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if self.mime_type.trim().is_empty() {
            return Err("mime type must not be empty".into());
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mic_device_id: None,
            recording_ms: DEFAULT_RECORDING_MS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            mime_type: PREFERRED_MIME_TYPE.to_string(),
            source_selector: SourceSelector::default(),
        }
    }
}
