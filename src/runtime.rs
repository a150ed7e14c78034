use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use kurukuru_core::{BuildError, CoreState, PuzzleAction};
use rand::rngs::StdRng;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::PlayConfig;
use crate::svg_view::SvgSurface;

#[derive(Debug, thiserror::Error)]
pub(crate) enum RuntimeError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Build(#[from] BuildError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) frames: u64,
    pub(crate) captured: u64,
    pub(crate) moves: u32,
    pub(crate) solved: bool,
}

/// One frame at a time: scripted input, update, draw. Owns the state so the
/// draw step only ever sees a shared borrow.
pub(crate) struct FrameRunner {
    state: CoreState,
    script: VecDeque<PuzzleAction>,
    rng: StdRng,
    canvas_px: u32,
    capture_every: u64,
    key_every: u64,
    frame: u64,
}

impl FrameRunner {
    pub(crate) fn new(
        state: CoreState,
        script: Vec<PuzzleAction>,
        rng: StdRng,
        config: &PlayConfig,
    ) -> Self {
        Self {
            state,
            script: script.into(),
            rng,
            canvas_px: config.canvas_px,
            capture_every: config.capture_every.max(1),
            key_every: config.key_every.max(1),
            frame: 0,
        }
    }

    pub(crate) fn state(&self) -> &CoreState {
        &self.state
    }

    pub(crate) fn frame(&self) -> u64 {
        self.frame
    }

    pub(crate) fn pending_keys(&self) -> usize {
        self.script.len()
    }

    /// Runs one frame and returns the SVG document when this frame is
    /// captured.
    pub(crate) fn tick(&mut self, now_ms: f64) -> Result<Option<String>, BuildError> {
        let frame = self.frame;
        self.frame += 1;
        if frame % self.key_every == 0 {
            if let Some(action) = self.script.pop_front() {
                let changed = self.state.apply(action, now_ms, &mut self.rng)?;
                debug!(frame, ?action, changed, "scripted input");
            }
        }
        self.update(now_ms);
        if frame % self.capture_every != 0 {
            return Ok(None);
        }
        let mut surface = SvgSurface::new(self.canvas_px);
        self.state.puzzle().draw(&mut surface, now_ms);
        Ok(Some(surface.finish()))
    }

    // Sticker positions are derived from the clock on draw.
    fn update(&mut self, _now_ms: f64) {}
}

pub(crate) fn frame_path(out_dir: &Path, frame: u64) -> PathBuf {
    out_dir.join(format!("frame_{frame:05}.svg"))
}

pub(crate) async fn run(
    mut runner: FrameRunner,
    config: &PlayConfig,
) -> Result<RunSummary, RuntimeError> {
    std::fs::create_dir_all(&config.out_dir).map_err(|source| RuntimeError::Io {
        path: config.out_dir.clone(),
        source,
    })?;
    let mut ticker = interval(Duration::from_millis(config.frame_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let start = Instant::now();
    let mut captured = 0;
    info!(
        frames = config.frames,
        frame_ms = config.frame_ms,
        out_dir = %config.out_dir.display(),
        "starting frame loop"
    );
    while runner.frame() < config.frames {
        ticker.tick().await;
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;
        let frame = runner.frame();
        if let Some(svg) = runner.tick(now_ms)? {
            let path = frame_path(&config.out_dir, frame);
            std::fs::write(&path, svg).map_err(|source| RuntimeError::Io { path, source })?;
            captured += 1;
        }
    }
    if runner.pending_keys() > 0 {
        debug!(left = runner.pending_keys(), "frames ran out before the key script");
    }
    let puzzle = runner.state().puzzle();
    let summary = RunSummary {
        frames: runner.frame(),
        captured,
        moves: runner.state().moves(),
        solved: puzzle.is_solved(),
    };
    info!(
        puzzle = %puzzle.name(),
        frames = summary.frames,
        captured = summary.captured,
        moves = summary.moves,
        solved = summary.solved,
        "frame loop finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use kurukuru_core::Catalog;
    use rand::SeedableRng;

    use super::*;
    use crate::input::parse_script;

    fn config(out_dir: PathBuf) -> PlayConfig {
        PlayConfig {
            puzzle: "two-swap".to_string(),
            keys: "1".to_string(),
            frame_ms: 1,
            frames: 6,
            capture_every: 3,
            key_every: 2,
            out_dir,
            canvas_px: 128,
            seed: Some(7),
        }
    }

    fn runner(keys: &str, config: &PlayConfig) -> FrameRunner {
        let catalog = Catalog::builtin().unwrap();
        let index = catalog.index_by_slug(&config.puzzle).unwrap();
        let state = CoreState::with_selection(catalog, index).unwrap();
        FrameRunner::new(state, parse_script(keys), StdRng::seed_from_u64(7), config)
    }

    #[test]
    fn keys_fire_on_their_frames() {
        let config = config(PathBuf::from("unused"));
        let mut runner = runner("11", &config);
        runner.tick(0.0).unwrap();
        assert_eq!(runner.state().moves(), 1);
        assert!(!runner.state().puzzle().is_solved());
        runner.tick(10.0).unwrap();
        assert_eq!(runner.state().moves(), 1);
        runner.tick(20.0).unwrap();
        assert_eq!(runner.state().moves(), 2);
        assert!(runner.state().puzzle().is_solved());
        assert_eq!(runner.pending_keys(), 0);
    }

    #[test]
    fn captures_every_nth_frame() {
        let config = config(PathBuf::from("unused"));
        let mut runner = runner("", &config);
        let captured: Vec<bool> = (0..6)
            .map(|frame| runner.tick(frame as f64).unwrap().is_some())
            .collect();
        assert_eq!(captured, vec![true, false, false, true, false, false]);
    }

    #[test]
    fn captured_frame_is_svg_with_puzzle_name() {
        let config = config(PathBuf::from("unused"));
        let mut runner = runner("", &config);
        let svg = runner.tick(0.0).unwrap().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">Two Swap</text>"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn frame_paths_are_zero_padded() {
        let path = frame_path(Path::new("out"), 42);
        assert_eq!(path, Path::new("out").join("frame_00042.svg"));
    }

    #[tokio::test]
    async fn run_writes_captured_frames() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path().join("frames"));
        let runner = runner("1", &config);
        let summary = run(runner, &config).await.unwrap();
        assert_eq!(summary.frames, 6);
        assert_eq!(summary.captured, 2);
        assert_eq!(summary.moves, 1);
        assert!(config.out_dir.join("frame_00000.svg").exists());
        assert!(config.out_dir.join("frame_00003.svg").exists());
        assert!(!config.out_dir.join("frame_00001.svg").exists());
    }
}
