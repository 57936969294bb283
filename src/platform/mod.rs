//! Platform glue
//!
//! Pure helpers (user-agent classification, config loading) live here so
//! they can be tested natively. The browser-only pieces are in [`canvas`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use serde_json::Value;

use crate::error::ConfigResult;
use crate::settings::{DisplayClass, GameConfig};

/// DOM id of the optional JSON config blob
pub const CONFIG_ELEMENT_ID: &str = "game-config";
/// DOM id of the touch-button container shown on phones
pub const CONTROLS_ELEMENT_ID: &str = "controls";

const MOBILE_MARKERS: [&str; 5] = ["mobi", "android", "iphone", "ipod", "tablet"];

/// Whether a user-agent string names a phone or tablet
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_MARKERS.iter().any(|m| ua.contains(m))
}

pub fn display_for_user_agent(user_agent: &str) -> DisplayClass {
    if is_mobile_user_agent(user_agent) {
        DisplayClass::Compact
    } else {
        DisplayClass::Full
    }
}

/// Overlay a JSON object onto the defaults for `detected`
///
/// Keys absent from the blob keep their defaults, so `display` falls back to
/// the detected class rather than the serde default.
pub fn parse_config(json: &str, detected: DisplayClass) -> ConfigResult<GameConfig> {
    let overrides: Value = serde_json::from_str(json)?;
    let mut merged = serde_json::to_value(GameConfig::for_display(detected))?;
    if let (Value::Object(base), Value::Object(extra)) = (&mut merged, overrides) {
        base.extend(extra);
    }
    let config: GameConfig = serde_json::from_value(merged)?;
    config.validate()?;
    Ok(config)
}

/// Config from an optional page blob, falling back to defaults on error
pub fn load_config(json: Option<&str>, detected: DisplayClass) -> GameConfig {
    let Some(json) = json.map(str::trim).filter(|s| !s.is_empty()) else {
        return GameConfig::for_display(detected);
    };
    match parse_config(json, detected) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring page config: {}", e);
            GameConfig::for_display(detected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agents() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
        let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8)";
        let desktop = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0";
        assert!(is_mobile_user_agent(iphone));
        assert!(is_mobile_user_agent(android));
        assert!(is_mobile_user_agent("some TABLET browser"));
        assert!(!is_mobile_user_agent(desktop));
        assert_eq!(display_for_user_agent(iphone), DisplayClass::Compact);
        assert_eq!(display_for_user_agent(desktop), DisplayClass::Full);
    }

    #[test]
    fn test_partial_config_keeps_detected_display() {
        let config = load_config(Some(r#"{ "drop_cooldown_ms": 500 }"#), DisplayClass::Compact);
        assert_eq!(config.drop_cooldown_ms, 500.0);
        assert_eq!(config.display, DisplayClass::Compact);
        assert_eq!(config.queue_depth, crate::consts::QUEUE_DEPTH);
    }

    #[test]
    fn test_explicit_display_wins() {
        let config = load_config(Some(r#"{ "display": "Full" }"#), DisplayClass::Compact);
        assert_eq!(config.display, DisplayClass::Full);
    }

    #[test]
    fn test_bad_config_falls_back() {
        let detected = DisplayClass::Compact;
        assert_eq!(load_config(None, detected), GameConfig::for_display(detected));
        assert_eq!(load_config(Some("  "), detected), GameConfig::for_display(detected));
        assert_eq!(load_config(Some("{ nope"), detected), GameConfig::for_display(detected));
        assert_eq!(
            load_config(Some(r#"{ "restitution": 3.0 }"#), detected),
            GameConfig::for_display(detected)
        );
        assert!(parse_config(r#"{ "move_speed": -1 }"#, detected).is_err());
    }
}
