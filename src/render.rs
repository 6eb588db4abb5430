// Host commands and slide markup.
// The engine never touches the DOM: every visible change leaves as a HostCommand
// that the page applies to the surface it names.

use serde::{Deserialize, Serialize};

use crate::types::{SlideItem, TimerHandle};

/// Delay before the loading overlay starts fading, after the first render.
pub const LOADER_DELAY_MS: u32 = 500;
/// Duration of the loading overlay fade.
pub const LOADER_FADE_MS: u32 = 300;

pub const ACTIVE_DOT_CLASS: &str =
    "carousel-dot w-3 h-3 rounded-full transition-all duration-300 bg-soft-blue-600 scale-125";
pub const INACTIVE_DOT_CLASS: &str =
    "carousel-dot w-3 h-3 rounded-full transition-all duration-300 bg-soft-blue-300 hover:bg-soft-blue-400";

/// Single instruction for the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Replace the track contents with one fragment per slide.
    RenderTrack { markup: String },
    /// Shift the track so the slide at `index` is visible (`translateX(-offset_percent%)`).
    TranslateTrack { offset_percent: usize },
    /// Replace the indicator row.
    RenderDots { markup: String },
    /// Mark indicator `index` active and every other indicator inactive.
    SetActiveDot { index: usize },
    /// Current slide metadata. `position` is 1-based.
    UpdateDetails {
        title: String,
        description: String,
        position: usize,
        total: usize,
    },
    /// Blank the details region (no slides).
    ClearDetails,
    UpdateCountdown { seconds: u32 },
    /// Fade the loading overlay out after `delay_ms`, then hide it.
    HideLoader { delay_ms: u32, fade_ms: u32 },
    /// Start a repeating interval and pass `handle` back with each tick.
    ArmTimer { handle: TimerHandle, interval_ms: u32 },
    /// Clear the interval started for `handle`.
    CancelTimer { handle: TimerHandle },
}

/// Track markup: one slide fragment per item, in sequence order.
/// Only the first image loads eagerly.
pub fn track_markup(slides: &[SlideItem]) -> String {
    let mut markup = String::new();

    for (index, slide) in slides.iter().enumerate() {
        let loading = if index == 0 { "eager" } else { "lazy" };
        markup.push_str(&format!(
            concat!(
                "<div class=\"carousel-slide min-w-full relative\" data-slide-id=\"{id}\">",
                "<div class=\"h-48 sm:h-56 md:h-64 lg:h-72 relative overflow-hidden\">",
                "<img src=\"{src}\" alt=\"{alt}\" ",
                "class=\"w-full h-full object-cover object-center\" ",
                "loading=\"{loading}\" data-index=\"{index}\">",
                "</div></div>"
            ),
            id = slide.id(),
            src = escape_html(slide.image()),
            alt = escape_html(slide.alt()),
            loading = loading,
            index = index,
        ));
    }

    markup
}

/// Indicator markup: one button per slide, the one at `active` distinguished.
pub fn dots_markup(count: usize, active: Option<usize>) -> String {
    let mut markup = String::new();

    for index in 0..count {
        let is_active = active == Some(index);
        let class = if is_active {
            ACTIVE_DOT_CLASS
        } else {
            INACTIVE_DOT_CLASS
        };
        markup.push_str(&format!(
            "<button class=\"{class}\" data-index=\"{index}\" aria-label=\"Go to slide {position}\" aria-current=\"{is_active}\"></button>",
            class = class,
            index = index,
            position = index + 1,
            is_active = is_active,
        ));
    }

    markup
}

/// Details for the slide at `index`.
pub fn details(slides: &[SlideItem], index: usize) -> Option<HostCommand> {
    slides.get(index).map(|slide| HostCommand::UpdateDetails {
        title: slide.title().to_string(),
        description: slide.description().to_string(),
        position: index + 1,
        total: slides.len(),
    })
}

/// Escape text for use inside element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
