use corrmap_core::consts::DEFAULT_SMOOTHING_RADIUS;
use corrmap_core::pipeline::config::{AnalysisConfig, ExportConfig, ImageFormatChoice};
use corrmap_core::pipeline::PipelineStage;
use corrmap_core::roi::Roi;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_smoothing_radius() {
    let config = AnalysisConfig::default();
    assert_eq!(config.smoothing.unwrap().radius, DEFAULT_SMOOTHING_RADIUS);
    assert!(config.regions.is_empty());
}

#[test]
fn test_default_export() {
    let export = ExportConfig::default();
    assert!(!export.residuals);
    assert_eq!(export.preview, None);
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn test_image_format_display() {
    assert_eq!(format!("{}", ImageFormatChoice::Tiff), "TIFF (16-bit)");
    assert_eq!(format!("{}", ImageFormatChoice::Png), "PNG (8-bit)");
    assert_eq!(ImageFormatChoice::Png.extension(), "png");
}

#[test]
fn test_pipeline_stage_display() {
    assert_eq!(format!("{}", PipelineStage::Residuals), "Residual volume");
    assert_eq!(format!("{}", PipelineStage::Correlation), "Correlating");
}

#[test]
fn test_roi_display() {
    let roi = Roi::Rect {
        x: 1,
        y: 2,
        width: 3,
        height: 4,
    };
    assert_eq!(format!("{roi}"), "Rect 3x4 at (1, 2)");
    assert_eq!(format!("{}", Roi::Points(vec![(0, 0), (1, 1)])), "2 point(s)");
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_config_json_roundtrip() {
    let mut config = AnalysisConfig::default();
    config.regions = vec![
        Roi::Point { x: 3, y: 4 },
        Roi::Oval {
            x: 0,
            y: 0,
            width: 5,
            height: 3,
        },
    ];
    config.export.residuals = true;

    let json = serde_json::to_string(&config).unwrap();
    let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.regions, config.regions);
    assert!(back.export.residuals);
    assert_eq!(back.input, config.input);
}

#[test]
fn test_config_optional_sections() {
    let json = r#"{ "input": "a.ser", "output_dir": "out", "smoothing": null }"#;
    let config: AnalysisConfig = serde_json::from_str(json).unwrap();
    assert!(config.smoothing.is_none());
    assert!(config.regions.is_empty());
    assert_eq!(config.export.preview, None);
}

#[test]
fn test_toml_without_smoothing_keeps_default_radius() {
    let toml_str = r#"
        input = "stack.tiff"
        output_dir = "out"

        [[regions]]
        Point = { x = 3, y = 4 }
    "#;
    let config: AnalysisConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.smoothing.unwrap().radius, DEFAULT_SMOOTHING_RADIUS);
    assert_eq!(config.regions, vec![Roi::Point { x: 3, y: 4 }]);
}

#[test]
fn test_toml_zero_radius_and_preview() {
    let toml_str = r#"
        input = "stack.tiff"
        output_dir = "out"

        [smoothing]
        radius = 0.0

        [export]
        residuals = true
        preview = "Png"
    "#;
    let config: AnalysisConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.smoothing.unwrap().radius, 0.0);
    assert!(config.export.residuals);
    assert_eq!(config.export.preview, Some(ImageFormatChoice::Png));
}

#[test]
fn test_default_config_toml_roundtrip() {
    let config = AnalysisConfig::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    let back: AnalysisConfig = toml::from_str(&toml_str).unwrap();
    assert_eq!(back.smoothing.unwrap().radius, DEFAULT_SMOOTHING_RADIUS);
    assert_eq!(back.export.preview, None);
}
