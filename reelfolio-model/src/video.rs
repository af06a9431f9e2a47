/// Reference to a video on one of the supported hosts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "id", rename_all = "lowercase")
)]
pub enum VideoRef {
    Vimeo(String),
    YouTube(String),
}

impl VideoRef {
    pub fn id(&self) -> &str {
        match self {
            VideoRef::Vimeo(id) | VideoRef::YouTube(id) => id,
        }
    }

    pub fn host(&self) -> &'static str {
        match self {
            VideoRef::Vimeo(_) => "vimeo",
            VideoRef::YouTube(_) => "youtube",
        }
    }
}

/// A video listed from the account's Vimeo library.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VimeoVideo {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub link: String,
    /// Seconds.
    pub duration: u64,
    pub release_time: Option<String>,
}
