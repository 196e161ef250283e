//! Transport controls over a rendered animation.
//!
//! The player never touches markup. It drives whatever animatable root the
//! [`PreviewSurface`] exposes, the way a page drives `SVGSVGElement::pauseAnimations`.

use tokio::time::Instant;

use crate::markup::{SvgRoot, find_svg_root, harden};

/// Native timing controls of an embedded animation.
pub trait AnimationTimeline: Send {
    fn pause_animations(&mut self);
    fn unpause_animations(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    fn current_time(&self) -> f64;
    fn animations_paused(&self) -> bool;
}

/// A rendered container that may or may not hold an animatable root.
pub trait PreviewSurface {
    fn animatable_root(&mut self) -> Option<&mut dyn AnimationTimeline>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
}

#[derive(Debug, Clone)]
pub struct PreviewPlayer {
    state: PlaybackState,
}

impl Default for PreviewPlayer {
    fn default() -> Self {
        PreviewPlayer {
            state: PlaybackState::Playing,
        }
    }
}

impl PreviewPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Called whenever a new result is shown on `surface`. Fresh results always start
    /// playing from zero, whatever the previous result was left at.
    pub fn load_result<S>(&mut self, surface: &mut S) -> PlaybackState
    where
        S: PreviewSurface + ?Sized,
    {
        self.state = PlaybackState::Playing;
        if let Some(root) = surface.animatable_root() {
            root.set_current_time(0.0);
            root.unpause_animations();
        }
        self.state
    }

    /// Pauses a playing animation or resumes a paused one. No-op without a root.
    pub fn toggle_play<S>(&mut self, surface: &mut S) -> PlaybackState
    where
        S: PreviewSurface + ?Sized,
    {
        let Some(root) = surface.animatable_root() else {
            return self.state;
        };

        self.state = match self.state {
            PlaybackState::Playing => {
                root.pause_animations();
                PlaybackState::Paused
            }
            PlaybackState::Paused => {
                root.unpause_animations();
                PlaybackState::Playing
            }
        };
        self.state
    }

    /// Rewinds to zero and resumes. Ends playing whatever the prior state was.
    pub fn reset<S>(&mut self, surface: &mut S) -> PlaybackState
    where
        S: PreviewSurface + ?Sized,
    {
        let Some(root) = surface.animatable_root() else {
            return self.state;
        };

        root.set_current_time(0.0);
        root.unpause_animations();
        self.state = PlaybackState::Playing;
        self.state
    }
}

/// Document clock of a rendered SVG, started on render.
#[derive(Debug, Clone)]
pub struct DocumentTimeline {
    offset: f64,
    running_since: Option<Instant>,
}

impl DocumentTimeline {
    pub fn started() -> Self {
        DocumentTimeline {
            offset: 0.0,
            running_since: Some(Instant::now()),
        }
    }
}

impl AnimationTimeline for DocumentTimeline {
    fn pause_animations(&mut self) {
        self.offset = self.current_time();
        self.running_since = None;
    }

    fn unpause_animations(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.offset = seconds.max(0.0);
        if self.running_since.is_some() {
            self.running_since = Some(Instant::now());
        }
    }

    fn current_time(&self) -> f64 {
        let running = self
            .running_since
            .map(|since| since.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        self.offset + running
    }

    fn animations_paused(&self) -> bool {
        self.running_since.is_none()
    }
}

/// Generated markup after hardening, with its animatable root if one was found.
#[derive(Debug, Clone)]
pub struct RenderedPreview {
    markup: String,
    root: Option<SvgRoot>,
    timeline: Option<DocumentTimeline>,
}

impl RenderedPreview {
    pub fn render(markup: &str) -> Self {
        let markup = harden(markup);
        let root = find_svg_root(&markup);
        if root.is_none() {
            tracing::warn!("Preview has no <svg> root, transport controls are disabled");
        }
        let timeline = root.as_ref().map(|_| DocumentTimeline::started());

        RenderedPreview {
            markup,
            root,
            timeline,
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn root(&self) -> Option<&SvgRoot> {
        self.root.as_ref()
    }

    pub fn is_animatable(&self) -> bool {
        self.timeline.is_some()
    }

    pub fn timeline(&self) -> Option<&DocumentTimeline> {
        self.timeline.as_ref()
    }
}

impl PreviewSurface for RenderedPreview {
    fn animatable_root(&mut self) -> Option<&mut dyn AnimationTimeline> {
        self.timeline
            .as_mut()
            .map(|timeline| timeline as &mut dyn AnimationTimeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SVG: &str = "<svg viewBox='0 0 200 200'><circle r='5'/></svg>";

    #[test]
    fn new_results_start_playing() {
        let mut player = PreviewPlayer::new();
        let mut preview = RenderedPreview::render(SVG);
        player.toggle_play(&mut preview);
        assert_eq!(player.state(), PlaybackState::Paused);

        let mut next = RenderedPreview::render(SVG);
        assert_eq!(player.load_result(&mut next), PlaybackState::Playing);
        assert!(!next.timeline().unwrap().animations_paused());
    }

    #[tokio::test(start_paused = true)]
    async fn loading_into_a_paused_surface_rewinds_and_resumes() {
        let mut player = PreviewPlayer::new();
        let mut preview = RenderedPreview::render(SVG);
        tokio::time::advance(Duration::from_secs(3)).await;
        player.toggle_play(&mut preview);

        player.load_result(&mut preview);
        assert!(player.is_playing());
        let timeline = preview.timeline().unwrap();
        assert!(!timeline.animations_paused());
        assert_eq!(timeline.current_time(), 0.0);
    }

    #[test]
    fn loading_a_result_without_root_still_plays() {
        let mut player = PreviewPlayer::new();
        let mut preview = RenderedPreview::render("Sorry, I can't help with that.");
        assert_eq!(player.load_result(&mut preview), PlaybackState::Playing);
    }

    #[test]
    fn toggle_drives_the_timeline() {
        let mut player = PreviewPlayer::new();
        let mut preview = RenderedPreview::render(SVG);

        assert_eq!(player.toggle_play(&mut preview), PlaybackState::Paused);
        assert!(preview.timeline().unwrap().animations_paused());

        assert_eq!(player.toggle_play(&mut preview), PlaybackState::Playing);
        assert!(!preview.timeline().unwrap().animations_paused());
    }

    #[test]
    fn reset_after_pause_ends_playing() {
        let mut player = PreviewPlayer::new();
        let mut preview = RenderedPreview::render(SVG);

        player.toggle_play(&mut preview);
        assert_eq!(player.reset(&mut preview), PlaybackState::Playing);
        assert!(!preview.timeline().unwrap().animations_paused());
    }

    #[test]
    fn reset_while_playing_stays_playing() {
        let mut player = PreviewPlayer::new();
        let mut preview = RenderedPreview::render(SVG);

        assert_eq!(player.reset(&mut preview), PlaybackState::Playing);
        assert!(player.is_playing());
    }

    #[test]
    fn controls_are_noops_without_root() {
        let mut player = PreviewPlayer::new();
        let mut preview = RenderedPreview::render("Sorry, I can't help with that.");
        assert!(!preview.is_animatable());

        assert_eq!(player.toggle_play(&mut preview), PlaybackState::Playing);
        assert_eq!(player.reset(&mut preview), PlaybackState::Playing);
    }

    #[test]
    fn render_hardens_markup() {
        let preview = RenderedPreview::render("<svg onload='x()'><script>x()</script></svg>");
        assert_eq!(preview.markup(), "<svg></svg>");
        assert!(preview.root().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn timeline_tracks_time_and_seeks() {
        let mut timeline = DocumentTimeline::started();
        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(timeline.current_time(), 3.0);

        timeline.pause_animations();
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(timeline.current_time(), 3.0);

        timeline.set_current_time(0.0);
        assert_eq!(timeline.current_time(), 0.0);

        timeline.unpause_animations();
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(timeline.current_time(), 2.0);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_rewinds_the_clock() {
        let mut player = PreviewPlayer::new();
        let mut preview = RenderedPreview::render(SVG);
        tokio::time::advance(Duration::from_secs(4)).await;

        player.reset(&mut preview);
        assert_eq!(preview.timeline().unwrap().current_time(), 0.0);
    }
}
