use chrono::{DateTime, Utc};
use crate::error::VoiceError;
use serde::{Deserialize, Serialize};

/// Transfer state of a file attached to a chat item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileStatus {
    #[default]
    NotStarted,
    SendingTransfer {
        progress: u64,
        total: u64,
    },
    ReceivingInvitation,
    ReceivingAccepted,
    ReceivingTransfer {
        progress: u64,
        total: u64,
    },
    Complete,
    Failed,
    Cancelled,
}

impl FileStatus {
    /// Inbound transfer that has not finished yet (invited, accepted or in flight).
    pub fn is_inbound_pending(&self) -> bool {
        matches!(
            self,
            FileStatus::ReceivingInvitation
                | FileStatus::ReceivingAccepted
                | FileStatus::ReceivingTransfer { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub file_id: i64,
    pub file_name: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub loaded: bool,
    #[serde(default)]
    pub status: FileStatus,
}

/// Path that can be handed to the player, if the file is available locally.
pub fn loaded_file_path(file: &FileDescriptor) -> Option<String> {
    if !file.loaded {
        return None;
    }
    file.file_path
        .as_ref()
        .map(|path| path.trim())
        .filter(|path| !path.is_empty())
        .map(str::to_string)
}

/// [`loaded_file_path`] for callers that report the failure.
pub fn playable_path(file: &FileDescriptor) -> Result<String, VoiceError> {
    loaded_file_path(file).ok_or(VoiceError::MissingPath)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMeta {
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub edited: bool,
    #[serde(default)]
    pub ttl_secs: Option<u32>,
    #[serde(default)]
    pub delete_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemContent {
    Text,
    Voice {
        duration_secs: u32,
        #[serde(default)]
        file: Option<FileDescriptor>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatItem {
    pub id: i64,
    pub sent: bool,
    #[serde(default)]
    pub text: Option<String>,
    pub meta: ItemMeta,
    pub content: ItemContent,
}

impl ChatItem {
    pub fn has_text(&self) -> bool {
        self.text
            .as_ref()
            .map(|text| !text.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Format whole seconds as `m:ss`. Minutes never roll over into hours.
pub fn format_duration(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

/// Same as [`format_duration`], truncating milliseconds to whole seconds.
pub fn format_duration_ms(millis: u64) -> String {
    format_duration(u32::try_from(millis / 1000).unwrap_or(u32::MAX))
}
