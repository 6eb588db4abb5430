// Carousel state machine: slide sequence, current index, autoplay countdown, input arbitration.
// All navigation funnels through go_to_slide so manual input always resets the countdown.
// Boundary misuse (bad index, empty sequence, missing root, dead instance) is a silent no-op.

use log::{debug, trace};

use crate::autoplay::{Autoplay, CountdownStep};
use crate::input::{ArrowKey, InputEvent, SwipeDirection, SwipeEnd, SwipeTracker};
use crate::render::{self, HostCommand, LOADER_DELAY_MS, LOADER_FADE_MS};
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Unmounted,
    Mounted,
    /// Terminal. Slides and index are kept but nothing mutates them again.
    Dead,
}

/// One mounted carousel. Output is queued as [`HostCommand`]s; drain with
/// [`Carousel::take_commands`].
#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    surfaces: HostSurfaces,
    slides: Vec<SlideItem>,
    /// `None` while the sequence is empty.
    current: Option<usize>,
    autoplay: Autoplay,
    swipe: SwipeTracker,
    lifecycle: Lifecycle,
    commands: Vec<HostCommand>,
}

impl Carousel {
    pub fn new(config: CarouselConfig) -> Self {
        let autoplay = Autoplay::new(config.autoplay_period_secs, config.autoplay_enabled);
        Carousel {
            config,
            surfaces: HostSurfaces::none(),
            slides: Vec::new(),
            current: None,
            autoplay,
            swipe: SwipeTracker::new(),
            lifecycle: Lifecycle::Unmounted,
            commands: Vec::new(),
        }
    }

    /// Mount onto the host surfaces, render once, and start autoplay.
    ///
    /// Without a root surface this does nothing. Duplicate ids after the first are dropped.
    pub fn mount(&mut self, slides: Vec<SlideItem>, surfaces: HostSurfaces) {
        if self.lifecycle != Lifecycle::Unmounted {
            debug!("mount ignored: carousel is {:?}", self.lifecycle);
            return;
        }
        if !surfaces.root {
            debug!("mount ignored: no root surface");
            return;
        }

        self.surfaces = surfaces;
        self.slides = Vec::with_capacity(slides.len());
        for slide in slides {
            if self.position_of(slide.id()).is_some() {
                debug!("dropping duplicate slide {}", slide.id());
                continue;
            }
            self.slides.push(slide);
        }
        self.current = if self.slides.is_empty() { None } else { Some(0) };
        self.lifecycle = Lifecycle::Mounted;
        debug!("mounted with {} slides", self.slides.len());

        self.render_all();
        if self.surfaces.loader {
            self.commands.push(HostCommand::HideLoader {
                delay_ms: LOADER_DELAY_MS,
                fade_ms: LOADER_FADE_MS,
            });
        }
        if self.current.is_some() {
            self.restart_autoplay();
        }
    }

    /// Show the slide at `index` and restart the countdown. Out-of-range indices are ignored.
    pub fn go_to_slide(&mut self, index: usize) {
        if !self.is_mounted() {
            trace!("go_to_slide({}) ignored: not mounted", index);
            return;
        }
        if index >= self.slides.len() {
            debug!(
                "go_to_slide({}) ignored: {} slides",
                index,
                self.slides.len()
            );
            return;
        }

        self.current = Some(index);
        self.emit_position(index);
        self.restart_autoplay();
    }

    pub fn advance(&mut self) {
        if let Some(index) = self.current {
            self.go_to_slide((index + 1) % self.slides.len());
        }
    }

    pub fn retreat(&mut self) {
        if let Some(index) = self.current {
            let len = self.slides.len();
            self.go_to_slide((index + len - 1) % len);
        }
    }

    /// Freeze the countdown. The timer keeps running; ticks become no-ops.
    pub fn pause(&mut self) {
        if self.is_mounted() && self.autoplay.pause() {
            trace!("autoplay paused at {}s", self.autoplay.seconds_remaining());
        }
    }

    /// Continue the countdown from where it was paused.
    pub fn resume(&mut self) {
        if self.is_mounted() && self.autoplay.resume() {
            trace!("autoplay resumed at {}s", self.autoplay.seconds_remaining());
        }
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        if !self.is_mounted() || self.autoplay.is_enabled() == enabled {
            return;
        }

        self.autoplay.set_enabled(enabled);
        if enabled {
            if self.current.is_some() {
                self.restart_autoplay();
            }
        } else {
            self.cancel_timer();
            self.autoplay.reset_countdown();
            self.emit_countdown(self.autoplay.seconds_remaining());
        }
    }

    /// Append a slide. The first slide of an empty carousel becomes current.
    pub fn add_slide(&mut self, item: SlideItem) {
        if !self.is_mounted() {
            return;
        }
        if self.position_of(item.id()).is_some() {
            debug!("add_slide ignored: slide {} already present", item.id());
            return;
        }

        self.slides.push(item);
        let activated = self.current.is_none();
        if activated {
            self.current = Some(0);
        }
        self.render_all();
        if activated {
            self.restart_autoplay();
        }
    }

    /// Remove a slide by id, clamping the current index into the shorter sequence.
    pub fn remove_slide(&mut self, id: SlideId) {
        if !self.is_mounted() {
            return;
        }
        let Some(position) = self.position_of(id) else {
            debug!("remove_slide ignored: no slide {}", id);
            return;
        };

        self.slides.remove(position);
        if self.slides.is_empty() {
            self.current = None;
            self.cancel_timer();
            self.autoplay.reset_countdown();
            debug!("carousel is empty");
        } else if let Some(index) = self.current {
            self.current = Some(index.min(self.slides.len() - 1));
        }
        self.render_all();
    }

    /// Cancel the timer and stop responding to anything.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Mounted {
            self.cancel_timer();
        }
        self.lifecycle = Lifecycle::Dead;
        debug!("unmounted");
    }

    /// One tick of the repeating timer identified by `handle`.
    ///
    /// Stale handles, paused carousels, and off-screen carousels leave the countdown untouched.
    pub fn tick(&mut self, handle: TimerHandle, viewport: &impl ViewportProbe) {
        if !self.is_mounted() || !self.autoplay.is_live(handle) {
            trace!("tick {:?} ignored", handle);
            return;
        }
        if self.current.is_none() || self.autoplay.is_paused() || !viewport.is_in_view() {
            return;
        }

        match self.autoplay.step() {
            CountdownStep::Expired => self.advance(),
            CountdownStep::Remaining(seconds) => self.emit_countdown(seconds),
        }
    }

    /// Route one input event to the matching operation.
    pub fn handle_input(&mut self, event: InputEvent, viewport: &impl ViewportProbe) {
        if !self.is_mounted() {
            return;
        }

        match event {
            InputEvent::DotClick { index } => {
                match index.and_then(|index| usize::try_from(index).ok()) {
                    Some(index) => self.go_to_slide(index),
                    None => debug!("dot click ignored: index {:?}", index),
                }
            }
            InputEvent::PrevClick => self.retreat(),
            InputEvent::NextClick => self.advance(),
            InputEvent::KeyDown { key } => {
                // Off-screen carousels ignore the keyboard.
                if !viewport.is_in_view() {
                    return;
                }
                match ArrowKey::from_key(&key) {
                    Some(ArrowKey::Left) => self.retreat(),
                    Some(ArrowKey::Right) => self.advance(),
                    None => {}
                }
            }
            InputEvent::PointerEnter => self.pause(),
            InputEvent::PointerLeave => self.resume(),
            InputEvent::TouchStart { x } => {
                self.swipe.begin(x);
                self.pause();
            }
            InputEvent::TouchMove { x } => self.swipe.update(x),
            InputEvent::TouchEnd => match self.swipe.finish(self.config.swipe_threshold) {
                SwipeEnd::NotTracking => {}
                SwipeEnd::Tap => self.resume(),
                SwipeEnd::Swipe(direction) => {
                    match direction {
                        SwipeDirection::Next => self.advance(),
                        SwipeDirection::Previous => self.retreat(),
                    }
                    self.resume();
                }
            },
        }
    }

    /// Drain queued host commands in emission order.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[SlideItem] {
        &self.slides
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_slide(&self) -> Option<&SlideItem> {
        self.current.and_then(|index| self.slides.get(index))
    }

    pub fn is_paused(&self) -> bool {
        self.autoplay.is_paused()
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.autoplay.seconds_remaining()
    }

    pub fn live_timer(&self) -> Option<TimerHandle> {
        self.autoplay.live_handle()
    }

    /// Id for a new slide that arrives without one: one past the largest id held.
    pub fn next_slide_id(&self) -> SlideId {
        let next = self
            .slides
            .iter()
            .map(|slide| slide.id().as_u32())
            .max()
            .map_or(1, |max| max.saturating_add(1));
        SlideId::new(next)
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            mounted: self.is_mounted(),
            dead: self.lifecycle == Lifecycle::Dead,
            slide_ids: self.slides.iter().map(SlideItem::id).collect(),
            current_index: self.current,
            autoplay_enabled: self.autoplay.is_enabled(),
            is_paused: self.autoplay.is_paused(),
            seconds_remaining: self.autoplay.seconds_remaining(),
            autoplay_period_secs: self.autoplay.period_secs(),
            live_timer: self.autoplay.live_handle(),
        }
    }

    fn position_of(&self, id: SlideId) -> Option<usize> {
        self.slides.iter().position(|slide| slide.id() == id)
    }

    /// Reset the countdown and, when autoplay is on, replace the live timer.
    fn restart_autoplay(&mut self) {
        if self.autoplay.is_enabled() {
            let rearm = self.autoplay.rearm();
            if let Some(handle) = rearm.cancelled {
                self.commands.push(HostCommand::CancelTimer { handle });
            }
            self.commands.push(HostCommand::ArmTimer {
                handle: rearm.armed,
                interval_ms: self.config.tick_interval_ms,
            });
        } else {
            self.autoplay.reset_countdown();
        }
        self.emit_countdown(self.autoplay.seconds_remaining());
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.autoplay.cancel() {
            self.commands.push(HostCommand::CancelTimer { handle });
        }
    }

    fn render_all(&mut self) {
        if self.surfaces.track {
            self.commands.push(HostCommand::RenderTrack {
                markup: render::track_markup(&self.slides),
            });
        }
        if self.surfaces.dots {
            self.commands.push(HostCommand::RenderDots {
                markup: render::dots_markup(self.slides.len(), self.current),
            });
        }

        match self.current {
            Some(index) => {
                if self.surfaces.track {
                    self.commands.push(HostCommand::TranslateTrack {
                        offset_percent: index * 100,
                    });
                }
                self.emit_details(index);
            }
            None => {
                if self.surfaces.track {
                    self.commands
                        .push(HostCommand::TranslateTrack { offset_percent: 0 });
                }
                if self.surfaces.details {
                    self.commands.push(HostCommand::ClearDetails);
                }
            }
        }
    }

    fn emit_position(&mut self, index: usize) {
        if self.surfaces.track {
            self.commands.push(HostCommand::TranslateTrack {
                offset_percent: index * 100,
            });
        }
        if self.surfaces.dots {
            self.commands.push(HostCommand::SetActiveDot { index });
        }
        self.emit_details(index);
    }

    fn emit_details(&mut self, index: usize) {
        if !self.surfaces.details {
            return;
        }
        if let Some(command) = render::details(&self.slides, index) {
            self.commands.push(command);
        }
    }

    fn emit_countdown(&mut self, seconds: u32) {
        if self.surfaces.countdown {
            self.commands.push(HostCommand::UpdateCountdown { seconds });
        }
    }
}
