//! Command-line flags.

use std::ffi::OsString;
use std::path::PathBuf;

use mirador_core::{MirrorLayout, Orientation, Size, ViewerConfig};

pub const USAGE: &str = "\
usage: mirador <INPUT> [options]

  -o, --output FILE          write the display raster to FILE
  --config FILE              viewer configuration (JSON)
  --viewport WxH             viewport used for the zoom fit
  --orientation N            EXIF orientation tag of the input (1-8)
  --rotate DEG               clockwise rotation in degrees
  --flip-h, --flip-v         mirror after rotating
  --mirror LAYOUT            none | dual | triple | quad | vdual
  --hue N                    hue shift (or target hue with --colorize)
  --saturation N             saturation percent
  --lightness N              lightness percent
  --colorize                 replace the hue instead of rotating it
  --placeholder-on-error     show a placeholder when the input cannot be decoded
";

#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    #[error(transparent)]
    Parse(#[from] pico_args::Error),
    #[error("unexpected arguments: {0:?}")]
    Unexpected(Vec<OsString>),
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub viewport: Option<Size>,
    pub orientation: Orientation,
    pub rotate: Option<f32>,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub mirror: Option<MirrorLayout>,
    pub hue: Option<i32>,
    pub saturation: Option<i32>,
    pub lightness: Option<i32>,
    pub colorize: bool,
    pub placeholder_on_error: bool,
}

impl CliArgs {
    pub fn parse(mut args: pico_args::Arguments) -> Result<Self, ArgsError> {
        let orientation: Option<u16> = args.opt_value_from_str("--orientation")?;
        let parsed = Self {
            output: args.opt_value_from_str(["-o", "--output"])?,
            config: args.opt_value_from_str("--config")?,
            viewport: args.opt_value_from_fn("--viewport", parse_size)?,
            orientation: orientation.map_or(Orientation::Normal, Orientation::from_exif),
            rotate: args.opt_value_from_str("--rotate")?,
            flip_horizontal: args.contains("--flip-h"),
            flip_vertical: args.contains("--flip-v"),
            mirror: args.opt_value_from_fn("--mirror", parse_mirror)?,
            hue: args.opt_value_from_str("--hue")?,
            saturation: args.opt_value_from_str("--saturation")?,
            lightness: args.opt_value_from_str("--lightness")?,
            colorize: args.contains("--colorize"),
            placeholder_on_error: args.contains("--placeholder-on-error"),
            input: args.free_from_str()?,
        };

        let rest = args.finish();
        if !rest.is_empty() {
            return Err(ArgsError::Unexpected(rest));
        }
        Ok(parsed)
    }

    /// Write the per-run edits into `config`.
    ///
    /// Any color flag switches the grading stage on.
    pub fn apply(&self, config: &mut ViewerConfig) {
        if let Some(degrees) = self.rotate {
            config.transform.rotation = degrees;
        }
        config.transform.flip_horizontal |= self.flip_horizontal;
        config.transform.flip_vertical |= self.flip_vertical;
        if let Some(layout) = self.mirror {
            config.mirror = layout;
        }

        let grading = &mut config.grading;
        if let Some(hue) = self.hue {
            grading.hue = hue;
        }
        if let Some(saturation) = self.saturation {
            grading.saturation = saturation;
        }
        if let Some(lightness) = self.lightness {
            grading.lightness = lightness;
        }
        grading.colorize |= self.colorize;

        if self.colorize
            || self.hue.is_some()
            || self.saturation.is_some()
            || self.lightness.is_some()
        {
            config.grading_enabled = true;
        }
    }
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let parse = |v: &str| v.trim().parse::<u32>().map_err(|e| format!("{v:?}: {e}"));
    let size = Size::new(parse(w)?, parse(h)?);
    if size.is_empty() {
        return Err(format!("viewport {size} is empty"));
    }
    Ok(size)
}

fn parse_mirror(s: &str) -> Result<MirrorLayout, String> {
    match s.to_ascii_lowercase().as_str() {
        "none" => Ok(MirrorLayout::None),
        "dual" => Ok(MirrorLayout::Dual),
        "triple" => Ok(MirrorLayout::Triple),
        "quad" => Ok(MirrorLayout::Quad),
        "vdual" | "vertical_dual" => Ok(MirrorLayout::VerticalDual),
        other => Err(format!("unknown mirror layout {other:?}")),
    }
}
