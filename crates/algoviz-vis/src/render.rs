//! Rendering adapter interface.

use std::fmt;
use std::str::FromStr;

use algoviz_trace::Step;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::scene::{Scene, Viewport};

/// How a step is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VizKind {
    #[default]
    Bars,
    Line,
    Pie,
    Graph,
}

impl VizKind {
    pub const ALL: [VizKind; 4] = [VizKind::Bars, VizKind::Line, VizKind::Pie, VizKind::Graph];

    pub fn as_str(&self) -> &'static str {
        match self {
            VizKind::Bars => "bars",
            VizKind::Line => "line",
            VizKind::Pie => "pie",
            VizKind::Graph => "graph",
        }
    }
}

impl fmt::Display for VizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VizKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        VizKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| Error::InvalidConfig {
                key: "viz_kind",
                value: s.to_string(),
            })
    }
}

/// Draws one step. Called synchronously on every position change.
///
/// Each call redraws the surface from scratch; there is no diffing contract.
pub trait Renderer {
    fn render(&mut self, step: &Step, kind: VizKind);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, step: &Step, kind: VizKind) {
        (**self).render(step, kind);
    }
}

/// Renderer that lays each step out as a [`Scene`] and keeps the latest one.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    viewport: Viewport,
    scene: Option<Scene>,
    frames: u64,
}

impl SceneRenderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scene: None,
            frames: 0,
        }
    }

    /// The most recently drawn scene.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Number of render calls so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for SceneRenderer {
    fn render(&mut self, step: &Step, kind: VizKind) {
        self.scene = Some(Scene::build(step, kind, self.viewport));
        self.frames += 1;
    }
}
