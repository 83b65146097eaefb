use crate::error::VoiceError;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "voicenote.settings";
#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_ROW: &str = "voice_settings";

/// What the player does once a voice message plays to the end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum FinishBehavior {
    /// Stop, rewind to 0 and let the scrubber hide again.
    #[default]
    ResetToStart,
    /// Stop and keep the position at the end of the track.
    HoldAtEnd,
}

/// Voice bubble settings stored alongside the rest of the app state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub theme: String,
    pub ring_stroke_px: f64,
    pub indicator_size_px: u32,
    pub duration_font_px: u32,
    pub long_press_ms: u64,
    pub play_confirm_ms: u64,
    pub poll_interval_ms: u64,
    pub finish_behavior: FinishBehavior,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            ring_stroke_px: 3.0,
            indicator_size_px: 56,
            duration_font_px: 16,
            long_press_ms: 500,
            play_confirm_ms: 1500,
            poll_interval_ms: 200,
            finish_behavior: FinishBehavior::ResetToStart,
        }
    }
}

impl VoiceSettings {
    /// Clamp values that would break the layout or the polling loop.
    pub fn normalized(mut self) -> Self {
        if !self.ring_stroke_px.is_finite() || self.ring_stroke_px <= 0.0 {
            self.ring_stroke_px = 3.0;
        }
        self.indicator_size_px = self.indicator_size_px.clamp(32, 96);
        self.ring_stroke_px = self.ring_stroke_px.min(self.indicator_size_px as f64 / 4.0);
        self.duration_font_px = self.duration_font_px.clamp(10, 28);
        self.long_press_ms = self.long_press_ms.clamp(250, 2000);
        self.play_confirm_ms = self.play_confirm_ms.clamp(300, 10_000);
        self.poll_interval_ms = self.poll_interval_ms.clamp(50, 1000);
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn initialize_database() -> Result<(), VoiceError> {
    let conn = get_db_connection()?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn initialize_database() -> Result<(), VoiceError> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_settings(settings: VoiceSettings) -> Result<(), VoiceError> {
    let conn = get_db_connection()?;
    let settings_json = serde_json::to_string(&settings)?;
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        [SETTINGS_ROW, settings_json.as_str()],
    )?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn save_settings(settings: VoiceSettings) -> Result<(), VoiceError> {
    LocalStorage::set(SETTINGS_KEY, settings)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_settings() -> Result<VoiceSettings, VoiceError> {
    let conn = get_db_connection()?;
    let result: Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM settings WHERE key = ?1",
        [SETTINGS_ROW],
        |row: &rusqlite::Row| row.get(0),
    );

    match result {
        Ok(json) => parse_settings(&json),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(VoiceSettings::default()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn load_settings() -> Result<VoiceSettings, VoiceError> {
    match LocalStorage::get::<VoiceSettings>(SETTINGS_KEY) {
        Ok(settings) => Ok(settings.normalized()),
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(VoiceSettings::default()),
        Err(e) => Err(e.into()),
    }
}

pub fn parse_settings(json: &str) -> Result<VoiceSettings, VoiceError> {
    let settings: VoiceSettings = serde_json::from_str(json)?;
    Ok(settings.normalized())
}

#[cfg(not(target_arch = "wasm32"))]
fn get_db_connection() -> Result<rusqlite::Connection, VoiceError> {
    let data_dir = dirs::data_dir()
        .map(|dir| dir.join("voicenote"))
        .unwrap_or_else(|| std::path::PathBuf::from(".voicenote"));
    std::fs::create_dir_all(&data_dir)
        .map_err(|e| VoiceError::Storage(format!("Failed to create data dir: {e}")))?;

    rusqlite::Connection::open(data_dir.join("voicenote.db"))
        .map_err(|e| VoiceError::Storage(format!("Failed to open database: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = parse_settings(r#"{ "long_press_ms": 800 }"#).unwrap();
        assert_eq!(settings.long_press_ms, 800);
        assert_eq!(settings.poll_interval_ms, 200);
        assert_eq!(settings.finish_behavior, FinishBehavior::ResetToStart);
    }

    #[test]
    fn finish_behavior_round_trips_by_name() {
        let settings = parse_settings(r#"{ "finish_behavior": "HoldAtEnd" }"#).unwrap();
        assert_eq!(settings.finish_behavior, FinishBehavior::HoldAtEnd);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let settings = parse_settings(
            r#"{ "poll_interval_ms": 1, "long_press_ms": 60000, "ring_stroke_px": -2.0 }"#,
        )
        .unwrap();
        assert_eq!(settings.poll_interval_ms, 50);
        assert_eq!(settings.long_press_ms, 2000);
        assert_eq!(settings.ring_stroke_px, 3.0);
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            parse_settings("{ broken"),
            Err(VoiceError::Serialization(_))
        ));
    }
}
