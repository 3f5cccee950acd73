//! `crane-swing` binary: opens the viewer, or runs headless for a fixed
//! number of frames.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crane_swing::{
    assets::FsAssetLoader,
    error::CraneError,
    frame::{
        FixedRateDriver, FrameLoop, HeadlessTarget, SystemClock, TickControl,
        TickDriver,
    },
    options::Options,
    Viewer,
};

/// How long a headless run waits for each model before ticking anyway.
const ASSET_WAIT: Duration = Duration::from_secs(10);

const USAGE: &str = "Usage: crane-swing [options.toml] [--headless FRAMES]";

struct Args {
    options_path: Option<String>,
    headless_frames: Option<u64>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        options_path: None,
        headless_frames: None,
    };
    while let Some(arg) = args.next() {
        if arg == "--headless" {
            let frames = args
                .next()
                .ok_or_else(|| "--headless needs a frame count".to_owned())?;
            let frames = frames
                .parse()
                .map_err(|e| format!("bad frame count {frames:?}: {e}"))?;
            parsed.headless_frames = Some(frames);
        } else if parsed.options_path.is_none() && !arg.starts_with("--") {
            parsed.options_path = Some(arg);
        } else {
            return Err(format!("unexpected argument {arg:?}"));
        }
    }
    Ok(parsed)
}

fn run_headless(options: Options, frames: u64) -> Result<(), CraneError> {
    let target_fps = options.timing.target_fps;
    let mut frame_loop =
        FrameLoop::new(options, SystemClock, HeadlessTarget::default(), 16.0 / 9.0)?;
    frame_loop.start_loading(Arc::new(FsAssetLoader))?;
    let pending = frame_loop.wait_for_assets(ASSET_WAIT)?;
    if pending > 0 {
        log::warn!("{pending} model(s) still loading after {ASSET_WAIT:?}");
    }

    let report_every = u64::from(target_fps.max(1));
    let mut driver = FixedRateDriver::new(target_fps, Some(frames));
    let ran = driver.drive(&mut |frame| {
        frame_loop.tick()?;
        if frame % report_every == 0 {
            log::info!(
                "frame {frame}: angle {:.5} rad | {}",
                frame_loop.state().pendulum.angle,
                frame_loop.readout()
            );
        }
        Ok(TickControl::Continue)
    })?;

    log::info!("ran {ran} frames at {:.1} fps", driver.fps());
    for failure in frame_loop.asset_failures() {
        log::warn!("{} never loaded: {}", failure.kind, failure.message);
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!("{USAGE}");
            std::process::exit(2);
        }
    };

    let options = match &args.options_path {
        Some(path) => match Options::load(Path::new(path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let result = match args.headless_frames {
        Some(frames) => run_headless(options, frames),
        None => Viewer::builder().with_options(options).build().run(),
    };
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
