//! Algorithm Trace Playback
//!
//! Steps through a generated [`algoviz_trace::StepTrace`] with transport
//! controls and draws every position change.
//!
//! # Architecture
//!
//! - **Playback**: synchronous state machine owning the trace and cursor
//! - **Player**: tokio task driving autoplay from an interval timer
//! - **Renderer**: injected drawing backend, called on every position change
//! - **Scene**: bar, line, pie and graph geometry for one step
//! - **Narrator**: injected speech capability for spoken actions and explanations
//!
//! # Usage
//!
//! ```ignore
//! let trace = Algorithm::QuickSort.generate(&input)?;
//! let mut playback = Playback::new(SceneRenderer::default(), PlaybackConfig::from_env()?);
//! playback.load(trace);
//!
//! let (player, _task) = Player::spawn(playback);
//! player.play().await?;
//! ```

mod config;
mod error;
mod narration;
mod playback;
mod player;
mod render;
mod scene;

pub use config::{PlaybackConfig, DEFAULT_STEP_PERIOD, MAX_STEP_PERIOD, MIN_STEP_PERIOD};
pub use error::{Error, Result};
pub use narration::{Narrator, Silent};
pub use playback::{Playback, PlaybackState, PlaybackStatus};
pub use player::{Player, PlayerHandle};
pub use render::{Renderer, SceneRenderer, VizKind};
pub use scene::{Bar, EdgeMark, Highlight, NodeMark, Point, Scene, Slice, Viewport, BAR_GAP, NODE_RADIUS};

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_trace::{Algorithm, TraceInput};

    #[test]
    fn scene_renderer_tracks_playback() {
        let trace = Algorithm::MergeSort
            .generate(&TraceInput::Array(vec![4.0, 2.0, 3.0, 1.0]))
            .unwrap();
        let len = trace.len();
        let mut playback = Playback::new(SceneRenderer::default(), PlaybackConfig::default());
        playback.load(trace);

        while playback.step_forward().unwrap().is_some() {}
        assert_eq!(playback.position(), len - 1);
        assert_eq!(playback.renderer().frames(), len as u64);

        let Some(Scene::Bars { bars }) = playback.renderer().scene() else {
            panic!("expected bars");
        };
        let values: Vec<f64> = bars.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn status_serializes_for_display() {
        let playback = Playback::new(SceneRenderer::default(), PlaybackConfig::default());
        let json = serde_json::to_value(playback.status()).unwrap();
        assert_eq!(json["state"], "idle");
        assert_eq!(json["viz_kind"], "bars");
        assert_eq!(json["period_ms"], 500);
    }
}
