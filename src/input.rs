// Input events from the page and the touch swipe tracker.
// Every channel ends in a carousel operation; nothing here touches the slide index.

use serde::{Deserialize, Serialize};

/// Single input event forwarded by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    /// Click on indicator `index`. Signed and nullable on the wire so a bad
    /// `data-index` from the page is just an out-of-range index.
    DotClick {
        #[serde(default)]
        index: Option<i64>,
    },
    PrevClick,
    NextClick,
    /// Key name as reported by the browser (e.g. `"ArrowLeft"`).
    KeyDown { key: String },
    PointerEnter,
    PointerLeave,
    /// First touch point, horizontal client coordinate.
    TouchStart { x: f64 },
    TouchMove { x: f64 },
    TouchEnd,
}

/// Arrow keys the carousel responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
}

impl ArrowKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(ArrowKey::Left),
            "ArrowRight" => Some(ArrowKey::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SwipeDirection {
    /// Finger moved left: show the next slide.
    Next,
    /// Finger moved right: show the previous slide.
    Previous,
}

/// Outcome of a touch end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SwipeEnd {
    /// No touch was in progress.
    NotTracking,
    /// Drag shorter than the threshold.
    Tap,
    Swipe(SwipeDirection),
}

/// Tracks one touch drag between start and end.
#[derive(Debug, Clone, Default)]
pub(crate) struct SwipeTracker {
    drag: Option<Drag>,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: f64,
    current_x: f64,
}

impl SwipeTracker {
    pub fn new() -> Self {
        SwipeTracker { drag: None }
    }

    pub fn begin(&mut self, x: f64) {
        self.drag = Some(Drag {
            start_x: x,
            current_x: x,
        });
    }

    /// Moves without a preceding start are ignored.
    pub fn update(&mut self, x: f64) {
        if let Some(drag) = self.drag.as_mut() {
            drag.current_x = x;
        }
    }

    /// Finish the drag. Only a distance strictly greater than `threshold` is a swipe.
    pub fn finish(&mut self, threshold: f64) -> SwipeEnd {
        let Some(drag) = self.drag.take() else {
            return SwipeEnd::NotTracking;
        };

        let delta = drag.start_x - drag.current_x;
        if delta.abs() > threshold {
            if delta > 0.0 {
                SwipeEnd::Swipe(SwipeDirection::Next)
            } else {
                SwipeEnd::Swipe(SwipeDirection::Previous)
            }
        } else {
            SwipeEnd::Tap
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftward_drag_is_next() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(300.0);
        tracker.update(240.0);
        assert_eq!(tracker.finish(50.0), SwipeEnd::Swipe(SwipeDirection::Next));
        assert_eq!(tracker.finish(50.0), SwipeEnd::NotTracking);
    }

    #[test]
    fn rightward_drag_is_previous() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(100.0);
        tracker.update(200.0);
        assert_eq!(
            tracker.finish(50.0),
            SwipeEnd::Swipe(SwipeDirection::Previous)
        );
    }

    #[test]
    fn short_drag_is_tap() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(100.0);
        tracker.update(70.0);
        assert_eq!(tracker.finish(50.0), SwipeEnd::Tap);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(100.0);
        tracker.update(50.0);
        assert_eq!(tracker.finish(50.0), SwipeEnd::Tap);
    }

    #[test]
    fn touch_without_move_is_tap() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(100.0);
        assert_eq!(tracker.finish(50.0), SwipeEnd::Tap);
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut tracker = SwipeTracker::new();
        tracker.update(10.0);
        assert_eq!(tracker.finish(50.0), SwipeEnd::NotTracking);
    }

    #[test]
    fn arrow_keys_parse() {
        assert_eq!(ArrowKey::from_key("ArrowLeft"), Some(ArrowKey::Left));
        assert_eq!(ArrowKey::from_key("ArrowRight"), Some(ArrowKey::Right));
        assert_eq!(ArrowKey::from_key("Enter"), None);
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[{"type":"TouchStart","x":12.5},{"type":"KeyDown","key":"ArrowRight"},{"type":"TouchEnd"}]"#,
        )
        .unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], InputEvent::TouchStart { x: 12.5 });
        assert_eq!(events[2], InputEvent::TouchEnd);
    }

    #[test]
    fn dot_click_accepts_negative_and_null_index() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[{"type":"DotClick","index":-1},{"type":"DotClick","index":null},{"type":"DotClick"}]"#,
        )
        .unwrap();
        assert_eq!(events[0], InputEvent::DotClick { index: Some(-1) });
        assert_eq!(events[1], InputEvent::DotClick { index: None });
        assert_eq!(events[2], InputEvent::DotClick { index: None });
    }
}
