use std::fmt;

/// Media the scene depends on but can run without.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetId {
    Audio,
    AudioContext,
    Video,
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetId::Audio => "audio",
            AssetId::AudioContext => "audio context",
            AssetId::Video => "video",
        };
        f.write_str(name)
    }
}

/// A media asset failed to load or start. Never fatal to the frame loop.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("failed to load {asset}: {cause}")]
pub struct AssetLoadFailure {
    pub asset: AssetId,
    pub cause: String,
}

impl AssetLoadFailure {
    pub fn new(asset: AssetId, cause: impl fmt::Display) -> Self {
        Self {
            asset,
            cause: cause.to_string(),
        }
    }
}
