use std::{path::PathBuf, process::ExitCode, time::Instant};

use glow::HasContext;
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
};

use hello_gl::{abs::App, config::Config, logging, render::CubeScene};

fn main() -> ExitCode {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let (config, loaded_from) = match Config::load(config_path.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.log) {
        eprintln!("Failed to initialize logging: {e}");
    }
    match &loaded_from {
        Some(path) => log::info!("using config {}", path.display()),
        None => log::info!("no config file found, using defaults"),
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Runs the demo until the window is closed. Errors have already been logged where they
/// were detected.
fn run(config: &Config) -> Result<(), String> {
    let mut app = App::new(&config.window)?;

    let mut viewport = app.drawable_size();
    unsafe {
        app.gl.enable(glow::DEPTH_TEST);
        app.gl.viewport(0, 0, viewport.width as i32, viewport.height as i32);
    }

    let scene = CubeScene::new(&app.gl, config)?;
    let start = Instant::now();

    'running: loop {
        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..) | WindowEvent::Resized(..),
                    ..
                } => {
                    let (width, height) = app.window.drawable_size();
                    if (width, height) != (viewport.width, viewport.height) {
                        log::info!("window size changed: {width}x{height}");
                        viewport.width = width;
                        viewport.height = height;
                        unsafe {
                            app.gl.viewport(0, 0, width as i32, height as i32);
                        }
                    }
                }
                _ => {}
            }
        }

        scene.render(start.elapsed().as_secs_f32(), viewport);
        app.window.gl_swap_window();
    }

    log::info!("shutting down");
    Ok(())
}
