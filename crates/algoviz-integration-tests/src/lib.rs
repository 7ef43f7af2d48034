//! Shared fixtures for the end-to-end tests in `tests/`.

use std::sync::{Arc, Mutex};

use algoviz_trace::Step;
use algoviz_vis::{Renderer, VizKind};

/// Renderer that keeps every step it was asked to draw.
#[derive(Debug, Default, Clone)]
pub struct FrameLog {
    frames: Arc<Mutex<Vec<(Step, VizKind)>>>,
}

impl FrameLog {
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn actions(&self) -> Vec<String> {
        self.lock().iter().map(|(step, _)| step.action.clone()).collect()
    }

    pub fn last(&self) -> Option<(Step, VizKind)> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Step, VizKind)>> {
        // A poisoned log only means another test thread panicked mid-push.
        self.frames.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Renderer for FrameLog {
    fn render(&mut self, step: &Step, kind: VizKind) {
        self.lock().push((step.clone(), kind));
    }
}
