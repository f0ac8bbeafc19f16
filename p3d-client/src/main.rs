use anyhow::Context;
use p3d_core::{DemoConfig, FrameLoop};

use crate::{
    abs::App,
    render::pyramid::{DemoWindow, PyramidRenderer},
};

mod abs;
mod logging;
mod render;

fn main() {
    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(&DemoConfig::default()) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            log::error!("{e:#}");
            std::process::exit(1);
        }
    }
}

/// Sets everything up, runs the frame loop until the window closes and tears
/// down in reverse order. Every setup failure is fatal.
fn run(config: &DemoConfig) -> anyhow::Result<()> {
    let mut app = App::new(&config.window).context("Error creating window")?;

    let (width, height) = app.drawable_size();
    log::info!(
        "Opened {}x{} window, framebuffer {width}x{height}",
        config.window.width,
        config.window.height
    );

    let renderer = PyramidRenderer::new(&app.gl, &config.scene, (width, height))
        .context("Error setting up the pyramid")?;

    let mut frame_loop = FrameLoop::new(config, width, height);
    let Ok(stats) = frame_loop.run(&mut DemoWindow::new(&mut app, &renderer));

    log::info!(
        "Rendered {} frames in {:.2?} ({:.1} fps)",
        stats.frames,
        stats.elapsed,
        stats.average_fps()
    );

    // GL objects go before the context that owns them.
    drop(renderer);
    drop(app);

    Ok(())
}
