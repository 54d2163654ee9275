//! Headless viewer binary.
//!
//! Usage:
//!   cargo run -p flycam_client -- [--config viewer.json] [--frames 120]
//!       [--dt 0.016] [--script "w,w,h,,l,esc"] [--log-file log/flycam.log]
//!
//! Each comma-separated script entry holds the keys pressed during one frame
//! (h/l yaw, k/j pitch, u/o roll, w/a/s/d/q/e move, `esc` quits). The script
//! repeats until `--frames` frames have run. Rendering goes to a no-op
//! backend; camera state is logged.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use flycam_client::{input::KeyBindings, log, FrameOutcome, Viewer};
use flycam_shared::{config::ViewerConfig, render::NullRenderer};
use tracing::info;

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    frames: u32,
    dt: f32,
    script: String,
    log_file: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            frames: 120,
            dt: 1.0 / 60.0,
            script: String::new(),
            log_file: None,
        }
    }
}

fn parse_args() -> anyhow::Result<Args> {
    let mut out = Args::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                out.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--frames" if i + 1 < args.len() => {
                out.frames = args[i + 1].parse().context("parse --frames")?;
                i += 2;
            }
            "--dt" if i + 1 < args.len() => {
                out.dt = args[i + 1].parse().context("parse --dt")?;
                i += 2;
            }
            "--script" if i + 1 < args.len() => {
                out.script = args[i + 1].clone();
                i += 2;
            }
            "--log-file" if i + 1 < args.len() => {
                out.log_file = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            _ => i += 1,
        }
    }
    Ok(out)
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    let cfg = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    let log_file = args.log_file.clone().unwrap_or_else(|| cfg.log_file.clone());
    log::init(Some(&log_file))?;

    info!(frames = args.frames, dt = args.dt, log_file = %log_file.display(), "Starting viewer");

    let script = KeyBindings::default().parse_script(&args.script);
    let mut viewer = Viewer::new(cfg, NullRenderer);

    for (frame, actions) in (0..args.frames).zip(script.iter().copied().cycle()) {
        if viewer.frame(args.dt, actions)? == FrameOutcome::Quit {
            break;
        }
        if frame % 30 == 0 {
            let cam = viewer.camera();
            info!(
                frame,
                position = %cam.position(),
                forward = %cam.forward(),
                orientation = %cam.orientation(),
                "Camera"
            );
        }
    }

    let cam = viewer.camera();
    info!(
        frames = viewer.frames(),
        position = %cam.position(),
        orientation = %cam.orientation(),
        "Viewer finished"
    );
    println!("view matrix:\n{}", cam.view());
    Ok(())
}
