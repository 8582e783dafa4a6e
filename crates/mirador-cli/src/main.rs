//! Mirador: command-line front end for the viewer pipeline.
//!
//! Decodes one image, runs it through the geometric, grading and mirror
//! stages, fits the result into a viewport and optionally writes the
//! display raster back out. A JSON report of the sizes goes to stdout;
//! logs go to stderr.

mod args;
mod config;
mod image_loader;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mirador_core::{ConfigHandle, PipelineError, Placement, Raster, ScrollState, Size, ViewerPipeline};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::args::{CliArgs, USAGE};
use crate::config::AppConfig;
use crate::image_loader::{ImageLoadError, load_image, placeholder, save_image};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Image(#[from] ImageLoadError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Summary printed after a run.
#[derive(Debug, Serialize)]
struct Report {
    input: PathBuf,
    output: Option<PathBuf>,
    placeholder: bool,
    original: Size,
    working: Size,
    display: Size,
    viewport: Size,
    fitted: Option<Size>,
    placement: Option<Placement>,
}

fn main() -> ExitCode {
    logging::init();

    let args = match CliArgs::parse(pico_args::Arguments::from_env()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "mirador failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    let app = AppConfig::resolve(args);
    let pipeline_config = ConfigHandle::new(app.viewer_config()?);

    let (raster, is_placeholder) = match load_image(&args.input) {
        Ok(raster) => (raster, false),
        Err(err) if args.placeholder_on_error => {
            warn!(input = %args.input.display(), %err, "showing placeholder");
            (placeholder(), true)
        }
        Err(err) => return Err(err.into()),
    };

    let mut pipeline = ViewerPipeline::new(pipeline_config);
    load_with_edits(&mut pipeline, raster, args)?;

    let fit = pipeline.fit(app.viewport, &ScrollState::default());
    if let Some(fit) = &fit {
        info!(size = %fit.size, viewport = %app.viewport, placement = ?fit.placement, "display fitted");
    }

    let report = Report {
        input: args.input.clone(),
        output: args.output.clone(),
        placeholder: is_placeholder,
        original: size_of(pipeline.original()),
        working: size_of(pipeline.working()),
        display: size_of(pipeline.display()),
        viewport: app.viewport,
        fitted: fit.map(|f| f.size),
        placement: fit.map(|f| f.placement),
    };

    if let Some(path) = &args.output {
        write_display(&pipeline, path)?;
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Load `raster` and rebuild it with the configured per-image edits.
///
/// Loading resets rotation, flips and crop, so the ones read from the
/// configuration file are put back first and the command-line edits go on
/// top of them.
fn load_with_edits(
    pipeline: &mut ViewerPipeline,
    raster: Raster,
    args: &CliArgs,
) -> Result<(), PipelineError> {
    let configured = pipeline.config().snapshot();
    pipeline.load(raster, args.orientation)?;
    pipeline.config().update(|config| {
        config.transform = configured.transform;
        config.crop = configured.crop;
        args.apply(config);
    });
    pipeline.refresh()?;
    Ok(())
}

fn write_display(pipeline: &ViewerPipeline, path: &Path) -> Result<(), ImageLoadError> {
    let Some(shown) = pipeline.display() else {
        return Ok(());
    };
    save_image(shown, path)?;
    info!(path = %path.display(), size = %shown.size(), "display raster written");
    Ok(())
}

fn size_of(raster: Option<&Raster>) -> Size {
    raster.map(|r| r.size()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirador_core::{MirrorLayout, ViewerConfig};

    fn pipeline_from_json(json: &str) -> ViewerPipeline {
        ViewerPipeline::new(ConfigHandle::new(ViewerConfig::from_json(json).unwrap()))
    }

    #[test]
    fn test_config_file_crop_and_rotation_survive_load() {
        let mut pipeline = pipeline_from_json(
            r#"{"crop":{"left":10,"width":10},"transform":{"rotation":90.0}}"#,
        );
        load_with_edits(&mut pipeline, placeholder(), &CliArgs::default()).unwrap();

        // Rotated first, then 10 columns trimmed from each side.
        assert_eq!(pipeline.working().unwrap().size(), Size::new(108, 128));
        let config = pipeline.config().snapshot();
        assert_eq!(config.crop.left, 10);
        assert_eq!(config.transform.rotation, 90.0);
    }

    #[test]
    fn test_command_line_edits_override_config_file() {
        let mut pipeline = pipeline_from_json(r#"{"transform":{"rotation":90.0}}"#);
        let args = CliArgs {
            rotate: Some(0.0),
            mirror: Some(MirrorLayout::Dual),
            ..CliArgs::default()
        };
        load_with_edits(&mut pipeline, Raster::filled(6, 4, [1, 2, 3, 255]), &args).unwrap();
        assert_eq!(pipeline.working().unwrap().size(), Size::new(6, 4));
        assert_eq!(pipeline.display().unwrap().size(), Size::new(12, 4));
    }

    #[test]
    fn test_write_display_saves_the_mirrored_canvas() {
        let path = std::env::temp_dir().join(format!("mirador-main-{}-out.png", std::process::id()));
        let mut pipeline = pipeline_from_json(r#"{"mirror":"dual"}"#);
        load_with_edits(&mut pipeline, Raster::filled(5, 3, [40, 80, 120, 255]), &CliArgs::default())
            .unwrap();
        write_display(&pipeline, &path).unwrap();

        let written = image_loader::load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(written.size(), Size::new(10, 3));
        assert_eq!(written.pixel(9, 2), [40, 80, 120, 255]);
    }

    #[test]
    fn test_write_display_without_image_is_a_no_op() {
        let path = std::env::temp_dir().join(format!("mirador-main-{}-none.png", std::process::id()));
        write_display(&ViewerPipeline::default(), &path).unwrap();
        assert!(!path.exists());
    }
}
