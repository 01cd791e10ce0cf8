use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::assets::loader::AssetLoader;
use crate::edit::state::EditState;
use crate::render::compositor::Compositor;
use crate::render::layers::RenderReport;
use crate::render::surface::{DrawSurface, FrameRGBA};

/// A finished preview published by [`LivePreview`].
#[derive(Clone, Debug)]
pub struct PreviewFrame {
    /// 1-based sequence number of the edit this frame renders. Superseded edits never publish,
    /// so published generations may skip numbers.
    pub generation: u64,
    /// Per-layer outcome.
    pub report: RenderReport,
    /// Rasterized pixels.
    pub frame: FrameRGBA,
}

type FrameSlot = Option<Arc<PreviewFrame>>;

/// Background task that re-renders whenever the edit state changes.
///
/// A render still loading images when a newer edit arrives is dropped, which cancels its
/// fetches before it has drawn anything. Dropping the handle aborts the task.
pub struct LivePreview {
    edits: watch::Sender<EditState>,
    frames: watch::Receiver<FrameSlot>,
    task: Option<JoinHandle<()>>,
}

impl LivePreview {
    /// Start rendering `initial` on the current tokio runtime.
    pub fn spawn<S, L>(compositor: Compositor<S, L>, initial: EditState) -> Self
    where
        S: DrawSurface + Send + 'static,
        L: AssetLoader + 'static,
    {
        let (edits_tx, edits_rx) = watch::channel(initial);
        let (frames_tx, frames_rx) = watch::channel(None);
        let task = tokio::spawn(run_preview(compositor, edits_rx, frames_tx));
        Self {
            edits: edits_tx,
            frames: frames_rx,
            task: Some(task),
        }
    }

    /// Replace the edit state and schedule a redraw.
    pub fn update(&self, edit: EditState) {
        self.edits.send_replace(edit);
    }

    /// Modify the edit state in place and schedule a redraw.
    pub fn edit(&self, f: impl FnOnce(&mut EditState)) {
        self.edits.send_modify(f);
    }

    /// Current edit state.
    pub fn current_edit(&self) -> EditState {
        self.edits.borrow().clone()
    }

    /// Most recently published frame.
    pub fn latest(&self) -> Option<Arc<PreviewFrame>> {
        self.frames.borrow().clone()
    }

    /// Receiver notified on every published frame.
    pub fn subscribe(&self) -> watch::Receiver<FrameSlot> {
        self.frames.clone()
    }

    /// Stop the task and wait for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            if let Err(e) = task.await
                && !e.is_cancelled()
            {
                tracing::warn!(error = %e, "preview task failed");
            }
        }
    }
}

impl Drop for LivePreview {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Render loop behind [`LivePreview`]; usable directly by hosts that drive their own tasks.
///
/// Returns once the edit sender is dropped.
pub async fn run_preview<S, L>(
    mut compositor: Compositor<S, L>,
    mut edits: watch::Receiver<EditState>,
    frames: watch::Sender<FrameSlot>,
) where
    S: DrawSurface,
    L: AssetLoader,
{
    let mut generation = 0u64;
    loop {
        let edit = edits.borrow_and_update().clone();
        generation += 1;

        tokio::select! {
            report = compositor.render(&edit) => {
                match compositor.surface_mut().snapshot() {
                    Ok(frame) => {
                        frames.send_replace(Some(Arc::new(PreviewFrame {
                            generation,
                            report,
                            frame,
                        })));
                    }
                    Err(e) => tracing::warn!(generation, error = %e, "snapshot failed"),
                }
                if edits.changed().await.is_err() {
                    break;
                }
            }
            changed = edits.changed() => {
                if changed.is_err() {
                    break;
                }
                tracing::debug!(generation, "render superseded by a newer edit");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
