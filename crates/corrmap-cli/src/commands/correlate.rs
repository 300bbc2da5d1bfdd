use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use corrmap_core::consts::DEFAULT_SMOOTHING_RADIUS;
use corrmap_core::pipeline::config::{
    AnalysisConfig, ExportConfig, ImageFormatChoice, SmoothingConfig,
};
use corrmap_core::roi::Roi;

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Tiff,
    Png,
}

impl From<FormatArg> for ImageFormatChoice {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Tiff => Self::Tiff,
            FormatArg::Png => Self::Png,
        }
    }
}

#[derive(Args)]
pub struct CorrelateArgs {
    /// Input SER file, TIFF stack or directory of frames
    pub file: PathBuf,

    /// Seed pixel as X,Y (column,row); repeat for several maps
    #[arg(long = "seed", value_parser = parse_point)]
    pub seeds: Vec<Roi>,

    /// Rectangular region as X,Y,W,H; its centroid becomes the seed
    #[arg(long = "rect", value_parser = parse_rect)]
    pub rects: Vec<Roi>,

    /// Elliptical region as X,Y,W,H (bounding box)
    #[arg(long = "oval", value_parser = parse_oval)]
    pub ovals: Vec<Roi>,

    /// Mean filter radius in pixels
    #[arg(long, default_value_t = DEFAULT_SMOOTHING_RADIUS)]
    pub radius: f32,

    /// Skip smoothing
    #[arg(long)]
    pub no_smooth: bool,

    /// Also write the residual volume as a multi-page float TIFF
    #[arg(long)]
    pub export_residuals: bool,

    /// Also write scaled preview images in this format
    #[arg(long, value_enum)]
    pub preview: Option<FormatArg>,

    /// Output directory
    #[arg(short, long, default_value = "corrmap-out")]
    pub output: PathBuf,
}

pub fn run(args: &CorrelateArgs) -> Result<()> {
    let config = build_config_from_args(args)?;
    super::pipeline::execute(&config)
}

pub fn build_config_from_args(args: &CorrelateArgs) -> Result<AnalysisConfig> {
    let regions: Vec<Roi> = args
        .seeds
        .iter()
        .chain(&args.rects)
        .chain(&args.ovals)
        .cloned()
        .collect();
    if regions.is_empty() {
        bail!("No seed given: use --seed X,Y, --rect X,Y,W,H or --oval X,Y,W,H");
    }

    Ok(AnalysisConfig {
        input: args.file.clone(),
        output_dir: args.output.clone(),
        smoothing: if args.no_smooth {
            None
        } else {
            Some(SmoothingConfig {
                radius: args.radius,
            })
        },
        regions,
        export: ExportConfig {
            residuals: args.export_residuals,
            preview: args.preview.map(Into::into),
        },
    })
}

fn parse_numbers<const N: usize>(s: &str) -> std::result::Result<[usize; N], String> {
    let parts: Vec<usize> = s
        .split(',')
        .map(|p| p.trim().parse::<usize>().map_err(|e| format!("'{p}': {e}")))
        .collect::<std::result::Result<_, _>>()?;
    parts
        .try_into()
        .map_err(|v: Vec<usize>| format!("expected {} comma-separated values, got {}", N, v.len()))
}

fn parse_point(s: &str) -> std::result::Result<Roi, String> {
    let [x, y] = parse_numbers::<2>(s)?;
    Ok(Roi::Point { x, y })
}

fn parse_rect(s: &str) -> std::result::Result<Roi, String> {
    let [x, y, width, height] = parse_numbers::<4>(s)?;
    Ok(Roi::Rect {
        x,
        y,
        width,
        height,
    })
}

fn parse_oval(s: &str) -> std::result::Result<Roi, String> {
    let [x, y, width, height] = parse_numbers::<4>(s)?;
    Ok(Roi::Oval {
        x,
        y,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3, 7").unwrap(), Roi::Point { x: 3, y: 7 });
        assert!(parse_point("3").is_err());
        assert!(parse_point("3,a").is_err());
    }

    #[test]
    fn test_parse_rect() {
        assert_eq!(
            parse_rect("1,2,3,4").unwrap(),
            Roi::Rect {
                x: 1,
                y: 2,
                width: 3,
                height: 4
            }
        );
        assert!(parse_rect("1,2,3").is_err());
    }
}
