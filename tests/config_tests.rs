use caption_canvas::config::Configuration;
use std::path::PathBuf;

#[test]
fn parse_empty_config_uses_defaults() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    assert_eq!(cfg.canvas.width, 400);
    assert_eq!(cfg.canvas.height, 400);
    assert_eq!(cfg.canvas.background, [0, 0, 0]);
    assert_eq!(cfg.caption.fill, [255, 255, 255]);
    assert_eq!(cfg.speech.volume, 100);
    assert!(cfg.speech.voice.is_none());
    assert!(cfg.caption.font_path.is_none());
}

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
canvas:
  width: 512
  height: 512
  background: [16, 16, 16]
caption:
  font-path: "/fonts/impact.ttf"
  font-fraction: 0.12
  stroke-fraction: 0.05
speech:
  voice: "English_(America)"
  volume: 40
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.canvas.width, 512);
    assert_eq!(cfg.canvas.background, [16, 16, 16]);
    assert_eq!(cfg.caption.font_path, Some(PathBuf::from("/fonts/impact.ttf")));
    assert!((cfg.caption.font_fraction - 0.12).abs() < f32::EPSILON);
    assert!((cfg.caption.stroke_fraction - 0.05).abs() < f32::EPSILON);
    assert_eq!(cfg.speech.voice.as_deref(), Some("English_(America)"));
    assert_eq!(cfg.speech.volume, 40);
}

#[test]
fn validated_rejects_zero_canvas() {
    let yaml = r#"
canvas:
  width: 0
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let err = cfg.validated().unwrap_err();
    assert!(err.to_string().contains("canvas width"));
}

#[test]
fn validated_rejects_out_of_range_volume() {
    let yaml = r#"
speech:
  volume: 101
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert!(cfg.validated().is_err());
}

#[test]
fn validated_rejects_oversized_font_fraction() {
    let yaml = r#"
caption:
  font-fraction: 1.5
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert!(cfg.validated().is_err());
}

#[test]
fn validated_accepts_defaults() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    assert!(cfg.validated().is_ok());
}

#[test]
fn style_resolution_scales_with_canvas_height() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    let style = cfg.caption.style_for(400);
    assert!((style.font_px - 40.0).abs() < f32::EPSILON);
    assert!((style.stroke_px - 3.2).abs() < 1e-4);
    assert!((style.margin_px - 16.0).abs() < f32::EPSILON);
}

#[test]
fn from_yaml_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "canvas:\n  width: 640\n  height: 640\n").unwrap();
    let cfg = Configuration::from_yaml_file(&path).unwrap().validated().unwrap();
    assert_eq!((cfg.canvas.width, cfg.canvas.height), (640, 640));
}

#[test]
fn from_yaml_file_missing_is_an_error() {
    assert!(Configuration::from_yaml_file("/definitely/not/here.yaml").is_err());
}
