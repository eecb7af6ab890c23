use egui_timegrid::{ConfigError, GridColors, GridConfig, TimeSig};
use pretty_assertions::assert_eq;

#[test]
fn empty_file_uses_defaults() {
    let config = GridConfig::from_toml("").unwrap();
    assert_eq!(config, GridConfig::default());
    assert_eq!(config.engine().time_sig(), TimeSig::new(4, 4));
    assert_eq!(config.engine().quantize(), 16);
    assert_eq!(config.engine().minimum_spacing(), 24.0);
}

#[test]
fn partial_file_overrides_fields() {
    let config = GridConfig::from_toml(
        r#"
        numerator = 7
        denominator = 8
        quantize = 32
        no_snap = true

        [colors]
        bar = [255, 0, 0]
        "#,
    )
    .unwrap();

    let engine = config.engine();
    assert_eq!(engine.time_sig(), TimeSig::new(7, 8));
    assert_eq!(engine.quantize(), 32);
    assert!(engine.is_no_snap_mode());
    assert_eq!(engine.pixels_per_quarter_note(), 64.0);
    assert_eq!(
        config.colors,
        GridColors {
            bar: [255, 0, 0],
            ..GridColors::default()
        }
    );
}

#[test]
fn invalid_values_are_clamped_by_the_engine() {
    let config = GridConfig::from_toml("numerator = 0\nquantize = -8\nminimum_spacing = -1.0").unwrap();
    let engine = config.engine();
    assert_eq!(engine.time_sig(), TimeSig::new(1, 4));
    assert_eq!(engine.quantize(), 1);
    assert_eq!(engine.minimum_spacing(), 0.0);
}

#[test]
fn malformed_toml_is_rejected() {
    let err = GridConfig::from_toml("numerator = \"four\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("invalid grid config"));
}

#[test]
fn missing_file_reports_its_path() {
    let err = GridConfig::read("/definitely/not/here/grid.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here/grid.toml"));
}

#[test]
fn round_trips_through_toml() {
    let config = GridConfig {
        numerator: 3,
        quantize: 64,
        ..GridConfig::default()
    };
    let source = toml::to_string(&config).unwrap();
    assert_eq!(GridConfig::from_toml(&source).unwrap(), config);
}
