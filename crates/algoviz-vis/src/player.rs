//! Timer-driven autoplay.
//!
//! A [`Player`] task owns one [`Playback`] and the autoplay timer. All access
//! goes through a cloneable [`PlayerHandle`]; commands are applied one at a
//! time, in order, between timer ticks.

use std::future::pending;
use std::time::Duration;

use algoviz_trace::{Algorithm, StepTrace};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::info;

use crate::error::{Error, Result};
use crate::narration::Narrator;
use crate::playback::{Playback, PlaybackState, PlaybackStatus};
use crate::render::{Renderer, VizKind};

const COMMAND_BUFFER: usize = 32;

type Reply<T> = oneshot::Sender<Result<T>>;

#[derive(Debug)]
enum Control {
    Load(StepTrace),
    Play,
    Pause,
    StepForward,
    StepBackward,
    Seek(usize),
    SetPeriod(Duration),
    SetVizKind(VizKind),
    Status,
}

#[derive(Debug)]
enum Command {
    Control(Control, Reply<PlaybackStatus>),
    ToggleExplanation(Algorithm, Reply<bool>),
}

/// Running autoplay timer and the period it was built with.
struct Timer {
    interval: Interval,
    period: Duration,
}

impl Timer {
    fn start(period: Duration) -> Self {
        // First tick one full period from now, not immediately.
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, period }
    }
}

/// Autoplay task owning a [`Playback`].
pub struct Player<R: Renderer, N: Narrator> {
    playback: Playback<R, N>,
    commands: mpsc::Receiver<Command>,
    timer: Option<Timer>,
}

impl<R, N> Player<R, N>
where
    R: Renderer + Send + 'static,
    N: Narrator + Send + 'static,
{
    /// Move `playback` into a new task.
    ///
    /// The task ends once every handle is dropped; the controller is dropped
    /// with it, which cancels the timer and any speech.
    pub fn spawn(playback: Playback<R, N>) -> (PlayerHandle, JoinHandle<()>) {
        let (tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let player = Self {
            playback,
            commands,
            timer: None,
        };
        let task = tokio::spawn(player.run());
        (PlayerHandle { tx }, task)
    }

    async fn run(mut self) {
        info!("player started");
        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else { break };
                    self.handle(command);
                }
                _ = next_tick(&mut self.timer) => {
                    self.playback.tick();
                }
            }
            self.sync_timer();
        }
        info!("player stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Control(control, reply) => {
                let result = self.apply(control).map(|()| self.playback.status());
                // The caller may have stopped waiting.
                let _ = reply.send(result);
            }
            Command::ToggleExplanation(algorithm, reply) => {
                let _ = reply.send(Ok(self.playback.toggle_explanation(algorithm)));
            }
        }
    }

    fn apply(&mut self, control: Control) -> Result<()> {
        match control {
            Control::Load(trace) => {
                self.playback.load(trace);
            }
            Control::Play => self.playback.play()?,
            Control::Pause => self.playback.pause()?,
            Control::StepForward => {
                self.playback.step_forward()?;
            }
            Control::StepBackward => {
                self.playback.step_backward()?;
            }
            Control::Seek(position) => {
                self.playback.seek(position)?;
            }
            Control::SetPeriod(period) => {
                self.playback.set_period(period);
            }
            Control::SetVizKind(kind) => self.playback.set_viz_kind(kind),
            Control::Status => {}
        }
        Ok(())
    }

    /// Keep exactly one timer alive while playing, at the current period.
    fn sync_timer(&mut self) {
        let period = self.playback.period();
        let playing = self.playback.state() == PlaybackState::Playing;
        match (playing, self.timer.as_ref().map(|t| t.period)) {
            (true, Some(current)) if current == period => {}
            (true, _) => self.timer = Some(Timer::start(period)),
            (false, _) => self.timer = None,
        }
    }
}

async fn next_tick(timer: &mut Option<Timer>) {
    match timer {
        Some(timer) => {
            timer.interval.tick().await;
        }
        None => pending().await,
    }
}

/// Cloneable handle to a running [`Player`].
///
/// Every call waits until the player has applied it and returns the
/// resulting status.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    tx: mpsc::Sender<Command>,
}

impl PlayerHandle {
    async fn control(&self, control: Control) -> Result<PlaybackStatus> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Control(control, reply))
            .await
            .map_err(|_| Error::PlayerClosed)?;
        rx.await.map_err(|_| Error::PlayerClosed)?
    }

    /// Load a trace. Any pending autoplay tick is cancelled.
    pub async fn load(&self, trace: StepTrace) -> Result<PlaybackStatus> {
        self.control(Control::Load(trace)).await
    }

    /// Start autoplay, restarting from the first step at the end.
    pub async fn play(&self) -> Result<PlaybackStatus> {
        self.control(Control::Play).await
    }

    /// Pause autoplay and drop the pending tick.
    pub async fn pause(&self) -> Result<PlaybackStatus> {
        self.control(Control::Pause).await
    }

    /// Move one step forward. Fails while playing.
    pub async fn step_forward(&self) -> Result<PlaybackStatus> {
        self.control(Control::StepForward).await
    }

    /// Move one step back. Fails while playing.
    pub async fn step_backward(&self) -> Result<PlaybackStatus> {
        self.control(Control::StepBackward).await
    }

    /// Jump to a position, clamped to the trace.
    pub async fn seek(&self, position: usize) -> Result<PlaybackStatus> {
        self.control(Control::Seek(position)).await
    }

    /// Change the autoplay period. Takes effect from the next tick.
    pub async fn set_period(&self, period: Duration) -> Result<PlaybackStatus> {
        self.control(Control::SetPeriod(period)).await
    }

    /// Switch the visualization and redraw the current step.
    pub async fn set_viz_kind(&self, kind: VizKind) -> Result<PlaybackStatus> {
        self.control(Control::SetVizKind(kind)).await
    }

    /// Get the current playback status.
    pub async fn status(&self) -> Result<PlaybackStatus> {
        self.control(Control::Status).await
    }

    /// Start or stop the spoken explanation of `algorithm`.
    pub async fn toggle_explanation(&self, algorithm: Algorithm) -> Result<bool> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::ToggleExplanation(algorithm, reply))
            .await
            .map_err(|_| Error::PlayerClosed)?;
        rx.await.map_err(|_| Error::PlayerClosed)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaybackConfig;
    use crate::narration::Silent;
    use algoviz_trace::{linear_search, Step};
    use std::sync::{Arc, Mutex};
    use tokio::time::sleep;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[derive(Default, Clone)]
    struct Frames(Arc<Mutex<Vec<String>>>);

    impl Frames {
        fn actions(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Renderer for Frames {
        fn render(&mut self, step: &Step, _kind: VizKind) {
            self.0.lock().unwrap().push(step.action.clone());
        }
    }

    /// Trace of exactly `len` steps over values `0..len-1`.
    fn trace(len: usize) -> StepTrace {
        let values: Vec<f64> = (0..len - 1).map(|v| v as f64).collect();
        linear_search(&values, -1.0).unwrap()
    }

    fn spawn() -> (PlayerHandle, Frames) {
        init_tracing();
        let frames = Frames::default();
        let playback: Playback<Frames, Silent> =
            Playback::new(frames.clone(), PlaybackConfig::default());
        let (handle, _task) = Player::spawn(playback);
        (handle, frames)
    }

    const PERIOD: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn autoplay_advances_once_per_period() {
        let (player, _) = spawn();
        player.load(trace(4)).await.unwrap();
        player.play().await.unwrap();

        sleep(PERIOD / 2).await;
        assert_eq!(player.status().await.unwrap().position, 0);

        sleep(PERIOD).await;
        assert_eq!(player.status().await.unwrap().position, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_stops_at_last_step() {
        let (player, frames) = spawn();
        player.load(trace(4)).await.unwrap();
        player.play().await.unwrap();

        sleep(PERIOD * 10).await;
        let status = player.status().await.unwrap();
        assert_eq!(status.position, 3);
        assert_eq!(status.state, PlaybackState::Stopped);
        assert_eq!(frames.actions().len(), 4);
        assert_eq!(frames.actions().last().unwrap(), "Target not found");
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_pending_tick() {
        let (player, _) = spawn();
        player.load(trace(8)).await.unwrap();
        player.play().await.unwrap();

        sleep(PERIOD + PERIOD / 5).await;
        let paused = player.pause().await.unwrap();
        assert_eq!(paused.position, 1);

        sleep(PERIOD * 10).await;
        let status = player.status().await.unwrap();
        assert_eq!(status.position, 1);
        assert_eq!(status.state, PlaybackState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn reload_discards_stale_timer() {
        let (player, frames) = spawn();
        player.load(trace(10)).await.unwrap();
        player.play().await.unwrap();
        sleep(PERIOD * 2 + PERIOD / 5).await;

        let reloaded = player.load(trace(5)).await.unwrap();
        assert_eq!(reloaded.position, 0);
        assert_eq!(reloaded.len, 5);
        let rendered = frames.actions().len();

        sleep(PERIOD * 10).await;
        assert_eq!(player.status().await.unwrap().position, 0);
        assert_eq!(frames.actions().len(), rendered);
    }

    #[tokio::test(start_paused = true)]
    async fn replay_after_reload_starts_a_fresh_period() {
        let (player, _) = spawn();
        player.load(trace(10)).await.unwrap();
        player.play().await.unwrap();
        sleep(PERIOD + PERIOD / 2).await;

        player.load(trace(10)).await.unwrap();
        player.play().await.unwrap();

        // The old schedule would have ticked PERIOD/2 from here.
        sleep(PERIOD * 3 / 5).await;
        assert_eq!(player.status().await.unwrap().position, 0);
        sleep(PERIOD / 2).await;
        assert_eq!(player.status().await.unwrap().position, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn period_change_applies_while_playing() {
        let (player, _) = spawn();
        player.load(trace(20)).await.unwrap();
        player.play().await.unwrap();

        let status = player.set_period(Duration::from_millis(100)).await.unwrap();
        assert_eq!(status.period_ms, 100);

        sleep(Duration::from_millis(450)).await;
        assert_eq!(player.status().await.unwrap().position, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_step_rejected_while_playing() {
        let (player, _) = spawn();
        player.load(trace(5)).await.unwrap();
        player.play().await.unwrap();

        assert!(matches!(
            player.step_forward().await,
            Err(Error::InvalidState { .. })
        ));

        player.pause().await.unwrap();
        let status = player.step_forward().await.unwrap();
        assert_eq!(status.position, 1);
        let status = player.step_backward().await.unwrap();
        assert_eq!(status.position, 0);
    }

    #[tokio::test]
    async fn commands_before_load_fail() {
        let (player, _) = spawn();
        assert!(matches!(player.play().await, Err(Error::NoTrace)));
        assert_eq!(player.status().await.unwrap().state, PlaybackState::Idle);
    }

    #[tokio::test]
    async fn closed_player_is_reported() {
        init_tracing();
        let playback = Playback::new(Frames::default(), PlaybackConfig::default());
        let (player, task) = Player::spawn(playback);
        task.abort();
        let _ = task.await;

        assert!(matches!(player.status().await, Err(Error::PlayerClosed)));
    }

    #[tokio::test]
    async fn dropping_handles_ends_task() {
        let playback = Playback::new(Frames::default(), PlaybackConfig::default());
        let (player, task) = Player::spawn(playback);
        let clone = player.clone();
        drop(player);
        clone.seek(0).await.unwrap_err();
        drop(clone);
        task.await.unwrap();
    }
}
