//! Playback controls for a step trace.

use std::fmt;
use std::time::Duration;

use algoviz_trace::{Algorithm, Step, StepTrace, TraceInput};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{clamp_period, PlaybackConfig};
use crate::error::{Error, Result};
use crate::narration::{Narrator, Silent};
use crate::render::{Renderer, VizKind};

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// No trace loaded
    Idle,
    /// Trace loaded, position fixed
    Stopped,
    /// Advancing on every timer tick
    Playing,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Stopped => "stopped",
            PlaybackState::Playing => "playing",
        })
    }
}

/// Playback controller for one step trace.
///
/// Owns the trace and a cursor into it. Every position change renders the
/// new step before the call returns. The controller holds no timer itself;
/// whoever drives autoplay calls [`Playback::tick`] once per period.
pub struct Playback<R: Renderer, N: Narrator = Silent> {
    trace: Option<StepTrace>,
    position: usize,
    state: PlaybackState,
    config: PlaybackConfig,
    renderer: R,
    narrator: N,
}

impl<R: Renderer> Playback<R, Silent> {
    /// Create a controller without speech.
    pub fn new(renderer: R, config: PlaybackConfig) -> Self {
        Self::with_narrator(renderer, Silent, config)
    }
}

impl<R: Renderer, N: Narrator> Playback<R, N> {
    /// Create a controller that speaks through `narrator`.
    pub fn with_narrator(renderer: R, narrator: N, config: PlaybackConfig) -> Self {
        let config = config.with_step_period(config.step_period);
        Self {
            trace: None,
            position: 0,
            state: PlaybackState::Idle,
            config,
            renderer,
            narrator,
        }
    }

    /// Get the current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Get the current step index.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the loaded trace, if any.
    pub fn trace(&self) -> Option<&StepTrace> {
        self.trace.as_ref()
    }

    /// The step at the cursor.
    pub fn current_step(&self) -> Option<&Step> {
        self.trace.as_ref()?.get(self.position)
    }

    /// Get the autoplay period.
    pub fn period(&self) -> Duration {
        self.config.step_period
    }

    /// Get the active visualization kind.
    pub fn viz_kind(&self) -> VizKind {
        self.config.viz_kind
    }

    /// Get the current settings.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Get the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Get the narrator.
    pub fn narrator(&self) -> &N {
        &self.narrator
    }

    /// Replace the trace, stop, and show its first step.
    ///
    /// Works from any state. Speech for the old trace is cancelled.
    pub fn load(&mut self, trace: StepTrace) -> &Step {
        info!(
            algorithm = %trace.algorithm(),
            steps = trace.len(),
            "loaded trace"
        );
        self.narrator.cancel();
        self.position = 0;
        self.state = PlaybackState::Stopped;
        let trace = self.trace.insert(trace);
        let step = trace.first();
        self.renderer.render(step, self.config.viz_kind);
        step
    }

    /// Run `algorithm` over `input` and load the resulting trace.
    ///
    /// On a generator error the current trace and position are kept.
    pub fn load_input(&mut self, algorithm: Algorithm, input: &TraceInput) -> Result<&Step> {
        let trace = algorithm.generate(input)?;
        Ok(self.load(trace))
    }

    /// Start autoplay.
    ///
    /// At the last position the cursor first wraps to 0 and the first step
    /// is shown. Already playing is a no-op.
    pub fn play(&mut self) -> Result<()> {
        let last = self.last_index()?;
        if self.state == PlaybackState::Playing {
            return Ok(());
        }
        if self.position >= last {
            self.position = 0;
            self.show(false);
        }
        self.state = PlaybackState::Playing;
        info!(position = self.position, "playback started");
        Ok(())
    }

    /// Stop autoplay, keeping the current position.
    pub fn pause(&mut self) -> Result<()> {
        self.last_index()?;
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Stopped;
            info!(position = self.position, "playback paused");
        }
        Ok(())
    }

    /// Move one step forward. `Ok(None)` at the last step.
    pub fn step_forward(&mut self) -> Result<Option<&Step>> {
        let last = self.require_stopped("step_forward")?;
        if self.position >= last {
            return Ok(None);
        }
        self.position += 1;
        let narrate = self.config.narrate;
        Ok(self.show(narrate))
    }

    /// Move one step back. `Ok(None)` at the first step.
    pub fn step_backward(&mut self) -> Result<Option<&Step>> {
        self.require_stopped("step_backward")?;
        if self.position == 0 {
            return Ok(None);
        }
        self.position -= 1;
        let narrate = self.config.narrate;
        Ok(self.show(narrate))
    }

    /// Jump to `position`, clamped to the trace.
    ///
    /// Allowed while playing; landing on the last step stops playback.
    pub fn seek(&mut self, position: usize) -> Result<&Step> {
        let last = self.last_index()?;
        self.position = position.min(last);
        if self.state == PlaybackState::Playing && self.position == last {
            self.finish();
        }
        let narrate = self.config.narrate && self.state == PlaybackState::Stopped;
        self.show(narrate).ok_or(Error::NoTrace)
    }

    /// Advance one step if playing.
    ///
    /// Ticks outside `Playing` are ignored, so a timer that fires after a
    /// pause or reload cannot move the cursor.
    pub fn tick(&mut self) -> Option<&Step> {
        if self.state != PlaybackState::Playing {
            debug!(state = %self.state, "ignoring tick");
            return None;
        }
        let last = self.trace.as_ref()?.last_index();
        if self.position >= last {
            self.finish();
            return None;
        }
        self.position += 1;
        if self.position == last {
            self.finish();
        }
        self.show(false)
    }

    /// Set the autoplay period, clamped to the supported range.
    pub fn set_period(&mut self, period: Duration) -> Duration {
        self.config.step_period = clamp_period(period);
        debug!(period_ms = self.config.step_period.as_millis() as u64, "step period changed");
        self.config.step_period
    }

    /// Change how steps are drawn and redraw the current step.
    pub fn set_viz_kind(&mut self, kind: VizKind) {
        self.config.viz_kind = kind;
        self.show(false);
    }

    pub fn set_narration(&mut self, narrate: bool) {
        self.config.narrate = narrate;
        if !narrate {
            self.narrator.cancel();
        }
    }

    /// Speak the walkthrough for `algorithm`, or stop it if speech is running.
    ///
    /// Returns whether speech was started.
    pub fn toggle_explanation(&mut self, algorithm: Algorithm) -> bool {
        if self.narrator.is_speaking() {
            self.narrator.cancel();
            false
        } else {
            self.narrator.speak(algorithm.explanation());
            true
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(self)
    }

    /// Fraction of the trace already shown, from 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        match &self.trace {
            Some(trace) if trace.len() > 1 => self.position as f64 / trace.last_index() as f64,
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    fn last_index(&self) -> Result<usize> {
        self.trace
            .as_ref()
            .map(StepTrace::last_index)
            .ok_or(Error::NoTrace)
    }

    fn require_stopped(&self, operation: &'static str) -> Result<usize> {
        let last = self.last_index()?;
        if self.state == PlaybackState::Playing {
            warn!(operation, "rejected while playing");
            return Err(Error::InvalidState {
                expected: "stopped",
                actual: self.state.to_string(),
            });
        }
        Ok(last)
    }

    fn finish(&mut self) {
        self.state = PlaybackState::Stopped;
        info!(position = self.position, "playback finished");
    }

    /// Render the step at the cursor, optionally speaking its action.
    fn show(&mut self, narrate: bool) -> Option<&Step> {
        let step = self.trace.as_ref()?.get(self.position)?;
        self.renderer.render(step, self.config.viz_kind);
        if narrate {
            self.narrator.cancel();
            self.narrator.speak(&step.action);
        }
        Some(step)
    }
}

impl<R: Renderer, N: Narrator> Drop for Playback<R, N> {
    fn drop(&mut self) {
        self.narrator.cancel();
    }
}

/// Snapshot of controller state for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub position: usize,
    pub len: usize,
    pub state: PlaybackState,
    pub period_ms: u64,
    pub progress: f64,
    pub viz_kind: VizKind,
}

impl<R: Renderer, N: Narrator> From<&Playback<R, N>> for PlaybackStatus {
    fn from(playback: &Playback<R, N>) -> Self {
        Self {
            position: playback.position,
            len: playback.trace.as_ref().map_or(0, StepTrace::len),
            state: playback.state,
            period_ms: playback.config.step_period.as_millis() as u64,
            progress: playback.progress(),
            viz_kind: playback.config.viz_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_trace::{bubble_sort, linear_search};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records `(action, kind)` for every render call.
    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<(String, VizKind)>>>);

    impl Recorder {
        fn count(&self) -> usize {
            self.0.borrow().len()
        }

        fn last(&self) -> Option<(String, VizKind)> {
            self.0.borrow().last().cloned()
        }
    }

    impl Renderer for Recorder {
        fn render(&mut self, step: &Step, kind: VizKind) {
            self.0.borrow_mut().push((step.action.clone(), kind));
        }
    }

    #[derive(Default, Clone)]
    struct Voice {
        spoken: Rc<RefCell<Vec<String>>>,
        speaking: Rc<RefCell<bool>>,
        cancels: Rc<RefCell<usize>>,
    }

    impl Narrator for Voice {
        fn speak(&mut self, text: &str) {
            self.spoken.borrow_mut().push(text.to_string());
            *self.speaking.borrow_mut() = true;
        }

        fn cancel(&mut self) {
            *self.speaking.borrow_mut() = false;
            *self.cancels.borrow_mut() += 1;
        }

        fn is_speaking(&self) -> bool {
            *self.speaking.borrow()
        }
    }

    fn trace(len: usize) -> StepTrace {
        // Linear search for a missing target: one compare per value plus "not found".
        let values: Vec<f64> = (0..len.saturating_sub(1)).map(|v| v as f64).collect();
        let trace = linear_search(&values, -1.0).unwrap();
        assert_eq!(trace.len(), len);
        trace
    }

    fn loaded(len: usize) -> (Playback<Recorder>, Recorder) {
        let recorder = Recorder::default();
        let mut playback = Playback::new(recorder.clone(), PlaybackConfig::default());
        playback.load(trace(len));
        (playback, recorder)
    }

    #[test]
    fn playback_starts_idle() {
        let mut playback = Playback::new(Recorder::default(), PlaybackConfig::default());
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(playback.current_step().is_none());
        assert!(matches!(playback.play(), Err(Error::NoTrace)));
        assert!(matches!(playback.step_forward(), Err(Error::NoTrace)));
        assert!(playback.tick().is_none());
    }

    #[test]
    fn load_renders_first_step() {
        let (playback, recorder) = loaded(4);
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(playback.position(), 0);
        assert_eq!(recorder.count(), 1);
        assert_eq!(recorder.last().unwrap().0, "Comparing 0 with target -1");
    }

    #[test]
    fn load_input_generates_then_loads() {
        let (mut playback, recorder) = loaded(3);
        let step = playback
            .load_input(Algorithm::BubbleSort, &TraceInput::Array(vec![2.0, 1.0]))
            .unwrap();
        assert_eq!(step.action, "Comparing 2 and 1");
        assert_eq!(playback.trace().unwrap().algorithm(), Algorithm::BubbleSort);
        assert_eq!(recorder.count(), 2);
    }

    #[test]
    fn load_input_mismatch_keeps_current_trace() {
        let (mut playback, recorder) = loaded(3);
        playback.step_forward().unwrap();

        let err = playback
            .load_input(Algorithm::Dijkstra, &TraceInput::Array(vec![1.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Trace(algoviz_trace::Error::InputMismatch {
                algorithm: Algorithm::Dijkstra,
                ..
            })
        ));
        assert_eq!(playback.trace().unwrap().algorithm(), Algorithm::LinearSearch);
        assert_eq!(playback.position(), 1);
        assert_eq!(recorder.count(), 2);
    }

    #[test]
    fn load_is_idempotent() {
        let (mut playback, _) = loaded(5);
        playback.seek(3).unwrap();

        playback.load(trace(5));
        assert_eq!(playback.position(), 0);
        playback.seek(4).unwrap();
        playback.load(trace(5));
        assert_eq!(playback.position(), 0);
        assert_eq!(playback.state(), PlaybackState::Stopped);
    }

    #[test]
    fn load_while_playing_stops() {
        let (mut playback, _) = loaded(5);
        playback.play().unwrap();
        playback.tick();
        playback.load(trace(3));
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(playback.position(), 0);
    }

    #[test]
    fn step_forward_and_back_clamp() {
        let (mut playback, recorder) = loaded(3);

        assert!(playback.step_backward().unwrap().is_none());
        assert_eq!(playback.position(), 0);

        assert!(playback.step_forward().unwrap().is_some());
        assert!(playback.step_forward().unwrap().is_some());
        assert_eq!(playback.position(), 2);

        let renders = recorder.count();
        assert!(playback.step_forward().unwrap().is_none());
        assert_eq!(playback.position(), 2);
        assert_eq!(recorder.count(), renders, "no-op must not render");

        let back = playback.step_backward().unwrap().unwrap();
        assert_eq!(back.action, "Comparing 1 with target -1");
    }

    #[test]
    fn manual_steps_rejected_while_playing() {
        let (mut playback, _) = loaded(4);
        playback.play().unwrap();
        let err = playback.step_forward().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidState { expected: "stopped", ref actual } if actual == "playing"
        ));
        assert!(playback.step_backward().is_err());
    }

    #[test]
    fn play_runs_to_end_then_stops() {
        let (mut playback, recorder) = loaded(4);
        playback.play().unwrap();
        assert_eq!(playback.state(), PlaybackState::Playing);

        let mut ticks = 0;
        while playback.tick().is_some() {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
        assert_eq!(playback.position(), 3);
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(recorder.last().unwrap().0, "Target not found");

        // Stopped at the end: forward is a no-op.
        assert!(playback.step_forward().unwrap().is_none());
        assert_eq!(playback.position(), 3);
    }

    #[test]
    fn play_at_end_restarts() {
        let (mut playback, recorder) = loaded(3);
        playback.seek(2).unwrap();
        let renders = recorder.count();

        playback.play().unwrap();
        assert_eq!(playback.position(), 0);
        assert_eq!(playback.state(), PlaybackState::Playing);
        assert_eq!(recorder.count(), renders + 1);
    }

    #[test]
    fn single_step_trace_finishes_on_first_tick() {
        let (mut playback, _) = loaded(1);
        playback.play().unwrap();
        assert!(playback.tick().is_none());
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(playback.progress(), 1.0);
    }

    #[test]
    fn pause_keeps_position_and_ignores_ticks() {
        let (mut playback, _) = loaded(5);
        playback.play().unwrap();
        playback.tick();
        playback.pause().unwrap();

        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert!(playback.tick().is_none());
        assert_eq!(playback.position(), 1);

        // Pausing when stopped is harmless.
        playback.pause().unwrap();
        assert_eq!(playback.state(), PlaybackState::Stopped);
    }

    #[test]
    fn seek_clamps_to_bounds() {
        let (mut playback, _) = loaded(10);
        assert_eq!(playback.seek(5).unwrap().action, "Comparing 5 with target -1");
        playback.seek(100).unwrap();
        assert_eq!(playback.position(), 9);
        playback.seek(0).unwrap();
        assert_eq!(playback.position(), 0);
    }

    #[test]
    fn seek_to_end_while_playing_stops() {
        let (mut playback, _) = loaded(6);
        playback.play().unwrap();
        playback.seek(2).unwrap();
        assert_eq!(playback.state(), PlaybackState::Playing);
        playback.seek(99).unwrap();
        assert_eq!(playback.state(), PlaybackState::Stopped);
    }

    #[test]
    fn viz_kind_change_rerenders() {
        let (mut playback, recorder) = loaded(3);
        playback.set_viz_kind(VizKind::Pie);
        assert_eq!(recorder.count(), 2);
        assert_eq!(recorder.last().unwrap().1, VizKind::Pie);
    }

    #[test]
    fn period_is_clamped() {
        let (mut playback, _) = loaded(3);
        assert_eq!(playback.set_period(Duration::from_millis(20)), Duration::from_millis(100));
        assert_eq!(playback.set_period(Duration::from_millis(750)), Duration::from_millis(750));
        assert_eq!(playback.status().period_ms, 750);
    }

    #[test]
    fn status_reports_progress() {
        let (mut playback, _) = loaded(5);
        playback.seek(2).unwrap();

        let status = playback.status();
        assert_eq!(status.position, 2);
        assert_eq!(status.len, 5);
        assert_eq!(status.state, PlaybackState::Stopped);
        assert_eq!(status.progress, 0.5);
        assert_eq!(status.viz_kind, VizKind::Bars);
    }

    #[test]
    fn narration_follows_manual_steps_only() {
        let voice = Voice::default();
        let config = PlaybackConfig::default().with_narration(true);
        let mut playback = Playback::with_narrator(Recorder::default(), voice.clone(), config);
        playback.load(bubble_sort(&[2.0, 1.0, 3.0]).unwrap());

        playback.step_forward().unwrap();
        assert_eq!(voice.spoken.borrow().as_slice(), ["Swapping 2 and 1"]);

        playback.play().unwrap();
        playback.tick();
        assert_eq!(voice.spoken.borrow().len(), 1);
    }

    #[test]
    fn toggle_explanation_speaks_then_cancels() {
        let voice = Voice::default();
        let mut playback = Playback::with_narrator(Recorder::default(), voice.clone(), PlaybackConfig::default());

        assert!(playback.toggle_explanation(Algorithm::HeapSort));
        assert!(voice.is_speaking());
        assert!(voice.spoken.borrow()[0].starts_with("Heap Sort."));

        assert!(!playback.toggle_explanation(Algorithm::HeapSort));
        assert!(!voice.is_speaking());
    }

    #[test]
    fn load_and_drop_cancel_speech() {
        let voice = Voice::default();
        let mut playback = Playback::with_narrator(Recorder::default(), voice.clone(), PlaybackConfig::default());
        playback.toggle_explanation(Algorithm::Dfs);

        playback.load(trace(2));
        assert!(!voice.is_speaking());

        playback.toggle_explanation(Algorithm::Dfs);
        let cancels = *voice.cancels.borrow();
        drop(playback);
        assert!(!voice.is_speaking());
        assert_eq!(*voice.cancels.borrow(), cancels + 1);
    }
}
