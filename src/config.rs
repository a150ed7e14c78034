use std::path::PathBuf;

use clap::Args;
use kurukuru_core::{Catalog, DEFAULT_PUZZLE_SLUG};

pub(crate) const FRAME_MS_DEFAULT: u64 = 10;
pub(crate) const FRAMES_DEFAULT: u64 = 600;
pub(crate) const CAPTURE_EVERY_DEFAULT: u64 = 10;
pub(crate) const KEY_EVERY_DEFAULT: u64 = 150;
pub(crate) const CANVAS_PX_DEFAULT: u32 = 640;
pub(crate) const CANVAS_PX_MIN: u32 = 64;
pub(crate) const CANVAS_PX_MAX: u32 = 8192;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
    #[error("canvas size {0} is outside {min}..={max}", min = CANVAS_PX_MIN, max = CANVAS_PX_MAX)]
    CanvasSize(u32),
    #[error("unknown puzzle {slug:?}; available: {available}")]
    UnknownPuzzle { slug: String, available: String },
    #[error("invalid seed {raw:?}: {source}")]
    Seed {
        raw: String,
        source: std::num::ParseIntError,
    },
}

#[derive(Args, Debug, Clone)]
pub(crate) struct PlayArgs {
    /// Catalog slug of the puzzle to open.
    #[arg(long, env = "KURUKURU_PUZZLE", default_value = DEFAULT_PUZZLE_SLUG)]
    pub(crate) puzzle: String,
    /// Keys to press, one per character: 1-9/0 apply, shift inverts, r s n p.
    #[arg(long, env = "KURUKURU_KEYS", default_value = "")]
    pub(crate) keys: String,
    #[arg(long, env = "KURUKURU_FRAME_MS", default_value_t = FRAME_MS_DEFAULT)]
    pub(crate) frame_ms: u64,
    #[arg(long, default_value_t = FRAMES_DEFAULT)]
    pub(crate) frames: u64,
    #[arg(long, default_value_t = CAPTURE_EVERY_DEFAULT)]
    pub(crate) capture_every: u64,
    /// Frames between scripted key presses.
    #[arg(long, default_value_t = KEY_EVERY_DEFAULT)]
    pub(crate) key_every: u64,
    #[arg(long, env = "KURUKURU_OUT_DIR", default_value = "frames")]
    pub(crate) out_dir: PathBuf,
    #[arg(long, env = "KURUKURU_CANVAS_PX", default_value_t = CANVAS_PX_DEFAULT)]
    pub(crate) canvas_px: u32,
    /// Decimal or 0x-prefixed hex.
    #[arg(long, env = "KURUKURU_SEED")]
    pub(crate) seed: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlayConfig {
    pub(crate) puzzle: String,
    pub(crate) keys: String,
    pub(crate) frame_ms: u64,
    pub(crate) frames: u64,
    pub(crate) capture_every: u64,
    pub(crate) key_every: u64,
    pub(crate) out_dir: PathBuf,
    pub(crate) canvas_px: u32,
    pub(crate) seed: Option<u64>,
}

impl PlayConfig {
    pub(crate) fn from_args(args: PlayArgs) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("frame-ms", args.frame_ms),
            ("capture-every", args.capture_every),
            ("key-every", args.key_every),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { name });
            }
        }
        if !(CANVAS_PX_MIN..=CANVAS_PX_MAX).contains(&args.canvas_px) {
            return Err(ConfigError::CanvasSize(args.canvas_px));
        }
        let seed = match args.seed.as_deref() {
            Some(raw) => Some(parse_seed_arg(raw)?),
            None => None,
        };
        Ok(Self {
            puzzle: args.puzzle,
            keys: args.keys,
            frame_ms: args.frame_ms,
            frames: args.frames,
            capture_every: args.capture_every,
            key_every: args.key_every,
            out_dir: args.out_dir,
            canvas_px: args.canvas_px,
            seed,
        })
    }
}

/// Catalog index for `slug`, or an error naming every known slug.
pub(crate) fn resolve_puzzle(catalog: &Catalog, slug: &str) -> Result<usize, ConfigError> {
    catalog
        .index_by_slug(slug)
        .ok_or_else(|| ConfigError::UnknownPuzzle {
            slug: slug.to_string(),
            available: catalog
                .iter()
                .map(|entry| entry.slug.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

pub(crate) fn parse_seed_arg(raw: &str) -> Result<u64, ConfigError> {
    let trimmed = raw.trim();
    let parsed = if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)
    } else {
        trimmed.parse::<u64>()
    };
    parsed.map_err(|source| ConfigError::Seed {
        raw: raw.to_string(),
        source,
    })
}
