//! Torus Frame - renders one frame of a rotating torus to a `.mem` file
//!
//! Usage: `torus-frame [OUTPUT]`
//!
//! Every other setting comes from `config/default.toml`, `config/user.toml`
//! and `TORUS_*` environment variables.

use std::process::ExitCode;

use torus_frame::config::AppConfig;
use torus_frame::mem_file;
use torus_render::{Frame, RenderError, Renderer};

fn main() -> ExitCode {
    let output_arg = std::env::args().nth(1);

    let loaded = AppConfig::load_with_output("config", output_arg.as_deref());
    let log_level = loaded
        .as_ref()
        .map(|config| config.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Initialize logging (RUST_LOG still wins)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        let mut config = AppConfig::default();
        if let Some(path) = output_arg {
            config.output.path = path;
        }
        config
    });

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let params = config.to_frame_params();
    log::info!(
        "Rendering {}x{} frame: A={}, B={}, R1={}, R2={}, K2={}",
        params.width,
        params.height,
        params.angle_a,
        params.angle_b,
        params.tube_radius,
        params.revolution_radius,
        params.viewer_distance,
    );

    let renderer = Renderer::new(params)?;
    let frame = render(&renderer, config.render.parallel)?;

    mem_file::save_mem(&frame, &config.output.path)?;
    log::info!(
        "Wrote {} ({} pixels, {} lit)",
        config.output.path,
        frame.codes().len(),
        frame.lit_pixels(),
    );

    if config.output.preview {
        print!("{}", frame.to_ascii(renderer.params().max_code));
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn render(renderer: &Renderer, parallel: bool) -> Result<Frame, RenderError> {
    let (buffer, _) = if parallel {
        renderer.render_parallel()?
    } else {
        renderer.render()?
    };
    Ok(buffer.into_frame())
}

#[cfg(not(feature = "parallel"))]
fn render(renderer: &Renderer, parallel: bool) -> Result<Frame, RenderError> {
    if parallel {
        log::debug!("Built without the `parallel` feature; rendering sequentially");
    }
    let (buffer, _) = renderer.render()?;
    Ok(buffer.into_frame())
}
