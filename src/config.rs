//! Viewer settings.
//!
//! Settings serialize as camelCase JSON. Every field has a default, so a partial
//! object such as `{"scaleMax": 4}` only overrides what it names.

use crate::error::ViewerError;
use crate::state::zoom::ScaleLimits;
use serde::{Deserialize, Serialize};

/// localStorage key the demo page persists settings under.
pub const SETTINGS_STORAGE_KEY: &str = "lightbox_settings";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerSettings {
    /// CSS transition used while animating (open, close, release snap).
    pub transition_start: String,
    /// CSS transition restored once an animation has finished.
    pub transition_end: String,
    pub scale_max: f64,
    pub scale_min: f64,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            transition_start: "0.2s ease-in-out".to_string(),
            transition_end: "0.0s ease-in-out".to_string(),
            scale_max: 6.0,
            scale_min: 1.0,
        }
    }
}

impl ViewerSettings {
    /// Parse and validate a (possibly partial) JSON settings object.
    pub fn from_json(raw: &str) -> Result<Self, ViewerError> {
        let settings: ViewerSettings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ViewerError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ViewerError> {
        if !self.scale_min.is_finite() || self.scale_min <= 0.0 {
            return Err(ViewerError::InvalidSettings {
                message: format!("scaleMin must be a positive number, got {}", self.scale_min),
            });
        }
        if !self.scale_max.is_finite() || self.scale_max < self.scale_min {
            return Err(ViewerError::InvalidSettings {
                message: format!(
                    "scaleMax must be a number >= scaleMin ({}), got {}",
                    self.scale_min, self.scale_max
                ),
            });
        }
        Ok(())
    }

    pub fn limits(&self) -> ScaleLimits {
        ScaleLimits::new(self.scale_min, self.scale_max)
    }

    pub fn transition(&self, which: crate::model::Transition) -> &str {
        match which {
            crate::model::Transition::Start => &self.transition_start,
            crate::model::Transition::End => &self.transition_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transition;

    #[test]
    fn defaults_match_documented_values() {
        let s = ViewerSettings::default();
        assert_eq!(s.scale_min, 1.0);
        assert_eq!(s.scale_max, 6.0);
        assert_eq!(s.transition(Transition::Start), "0.2s ease-in-out");
        assert_eq!(s.transition(Transition::End), "0.0s ease-in-out");
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let s = ViewerSettings::from_json(r#"{"scaleMax": 4, "transitionStart": "0.3s linear"}"#)
            .unwrap();
        assert_eq!(s.scale_max, 4.0);
        assert_eq!(s.scale_min, 1.0);
        assert_eq!(s.transition_start, "0.3s linear");
        assert_eq!(s.transition_end, "0.0s ease-in-out");
    }

    #[test]
    fn json_round_trips_camel_case() {
        let json = ViewerSettings::default().to_json().unwrap();
        assert!(json.contains("\"scaleMin\":1.0"));
        assert!(json.contains("\"transitionEnd\""));
    }

    #[test]
    fn rejects_inverted_limits() {
        let err = ViewerSettings::from_json(r#"{"scaleMin": 3, "scaleMax": 2}"#).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidSettings { .. }));
    }

    #[test]
    fn rejects_non_positive_minimum() {
        let err = ViewerSettings::from_json(r#"{"scaleMin": 0}"#).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidSettings { .. }));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = ViewerSettings::from_json("{scaleMin").unwrap_err();
        assert!(matches!(err, ViewerError::Json(_)));
    }
}
