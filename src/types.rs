// Strong typing over strings. Newtypes for slide ids and timer handles.
// Slide records are validated once, at the data-loading boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

/// Slide identifier, stable across re-renders. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlideId(u32);

impl SlideId {
    pub fn new(id: u32) -> Self {
        SlideId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of the single repeating tick timer. The host passes it back with every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerHandle(u32);

impl TimerHandle {
    pub fn new(raw: u32) -> Self {
        TimerHandle(raw)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub(crate) fn next(&self) -> Self {
        TimerHandle(self.0.wrapping_add(1))
    }
}

/// One carousel entry.
///
/// Construct with [`SlideItem::new`] or deserialize; both reject empty alt text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SlideRecord")]
pub struct SlideItem {
    id: SlideId,
    image: String,
    title: String,
    description: String,
    alt: String,
}

impl SlideItem {
    pub fn new(
        id: SlideId,
        image: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        alt: impl Into<String>,
    ) -> Result<Self, CarouselError> {
        let alt = alt.into();
        if alt.trim().is_empty() {
            return Err(CarouselError::MissingAltText { id });
        }

        Ok(SlideItem {
            id,
            image: image.into(),
            title: title.into(),
            description: description.into(),
            alt,
        })
    }

    pub fn id(&self) -> SlideId {
        self.id
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }
}

/// Unvalidated slide record as it arrives from the data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideRecord {
    pub id: SlideId,
    pub image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub alt: String,
}

impl TryFrom<SlideRecord> for SlideItem {
    type Error = CarouselError;

    fn try_from(record: SlideRecord) -> Result<Self, Self::Error> {
        SlideItem::new(
            record.id,
            record.image,
            record.title,
            record.description,
            record.alt,
        )
    }
}

/// Carousel configuration passed from JS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Seconds between automatic advances.
    #[serde(default = "default_autoplay_period")]
    pub autoplay_period_secs: u32,
    #[serde(default = "default_true")]
    pub autoplay_enabled: bool,
    /// Minimum horizontal drag distance that counts as a swipe.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    /// Interval of the repeating tick timer (milliseconds).
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u32,
}

fn default_autoplay_period() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_swipe_threshold() -> f64 {
    50.0
}

fn default_tick_interval() -> u32 {
    1000
}

impl Default for CarouselConfig {
    fn default() -> Self {
        CarouselConfig {
            autoplay_period_secs: default_autoplay_period(),
            autoplay_enabled: true,
            swipe_threshold: default_swipe_threshold(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl CarouselConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CarouselError> {
        let config: CarouselConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.autoplay_period_secs == 0 {
            return Err(CarouselError::InvalidConfig(
                "autoplay_period_secs must be at least 1".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(CarouselError::InvalidConfig(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(CarouselError::InvalidConfig(format!(
                "swipe_threshold must be a non-negative number, got {}",
                self.swipe_threshold
            )));
        }
        Ok(())
    }
}

/// Which host regions the page supplied. Only `root` is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HostSurfaces {
    pub root: bool,
    pub track: bool,
    pub dots: bool,
    pub details: bool,
    pub countdown: bool,
    pub loader: bool,
}

impl HostSurfaces {
    pub fn all() -> Self {
        HostSurfaces {
            root: true,
            track: true,
            dots: true,
            details: true,
            countdown: true,
            loader: true,
        }
    }

    pub fn none() -> Self {
        HostSurfaces::default()
    }
}

/// Bounding box of the carousel root relative to the window (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewportRect {
    pub top: f64,
    pub bottom: f64,
    pub viewport_height: f64,
}

impl ViewportRect {
    pub fn new(top: f64, bottom: f64, viewport_height: f64) -> Self {
        ViewportRect {
            top,
            bottom,
            viewport_height,
        }
    }
}

/// Answers whether the carousel root is currently within the visible viewport.
pub trait ViewportProbe {
    fn is_in_view(&self) -> bool;
}

impl ViewportProbe for bool {
    fn is_in_view(&self) -> bool {
        *self
    }
}

impl ViewportProbe for ViewportRect {
    /// Any vertical overlap with the window counts as visible.
    fn is_in_view(&self) -> bool {
        self.top < self.viewport_height && self.bottom > 0.0
    }
}

/// Read-only view of the carousel state for hosts and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselSnapshot {
    pub mounted: bool,
    pub dead: bool,
    pub slide_ids: Vec<SlideId>,
    pub current_index: Option<usize>,
    pub autoplay_enabled: bool,
    pub is_paused: bool,
    pub seconds_remaining: u32,
    pub autoplay_period_secs: u32,
    pub live_timer: Option<TimerHandle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_requires_alt_text() {
        let err = SlideItem::new(SlideId::new(1), "a.jpg", "A", "first", "   ").unwrap_err();
        assert!(matches!(err, CarouselError::MissingAltText { id } if id == SlideId::new(1)));
    }

    #[test]
    fn slide_deserialize_validates() {
        let ok = r#"{"id":1,"image":"a.jpg","title":"A","description":"d","alt":"alt"}"#;
        let slide: SlideItem = serde_json::from_str(ok).unwrap();
        assert_eq!(slide.id(), SlideId::new(1));
        assert_eq!(slide.alt(), "alt");

        let missing_alt = r#"{"id":2,"image":"b.jpg","title":"B","description":"d"}"#;
        assert!(serde_json::from_str::<SlideItem>(missing_alt).is_err());
    }

    #[test]
    fn config_defaults() {
        let config = CarouselConfig::from_json("{}").unwrap();
        assert_eq!(config, CarouselConfig::default());
        assert_eq!(config.autoplay_period_secs, 5);
        assert_eq!(config.swipe_threshold, 50.0);
    }

    #[test]
    fn config_rejects_zero_period() {
        let err = CarouselConfig::from_json(r#"{"autoplay_period_secs":0}"#).unwrap_err();
        assert!(matches!(err, CarouselError::InvalidConfig(_)));
    }

    #[test]
    fn host_surfaces_default_to_absent() {
        let surfaces: HostSurfaces = serde_json::from_str(r#"{"root":true,"track":true}"#).unwrap();
        assert!(surfaces.root && surfaces.track);
        assert!(!surfaces.dots && !surfaces.loader);
    }

    #[test]
    fn viewport_rect_visibility() {
        assert!(ViewportRect::new(100.0, 500.0, 800.0).is_in_view());
        assert!(ViewportRect::new(-300.0, 10.0, 800.0).is_in_view());
        assert!(!ViewportRect::new(900.0, 1300.0, 800.0).is_in_view());
        assert!(!ViewportRect::new(-600.0, 0.0, 800.0).is_in_view());
    }
}
