use atoll_runtime::{MAX_RADIUS, RuntimeConfig};
use atoll_world::ConfigError;

#[test]
fn defaults_match_streaming_contract() {
    let cfg = RuntimeConfig::default();
    assert_eq!(cfg.streaming.render_radius, 2);
    assert_eq!(cfg.streaming.unload_margin, 2);
    assert_eq!(cfg.streaming.max_remesh_per_tick, 2);
    assert_eq!(cfg.streaming.initial_radius, 6);
    assert_eq!(cfg.edits.sprout_chance, 0.05);
}

#[test]
fn partial_tables_keep_other_defaults() {
    let cfg = RuntimeConfig::from_toml_str(
        r#"
        [island]
        sea_level = 40

        [streaming]
        render_radius = 4

        [edits]
        sprout_chance = 0.5
        "#,
    )
    .unwrap();
    assert_eq!(cfg.streaming.render_radius, 4);
    assert_eq!(cfg.streaming.unload_margin, 2);
    assert_eq!(cfg.edits.sprout_chance, 0.5);
    assert_eq!(cfg.edits.yellow_flower_below, 0.2);
}

#[test]
fn out_of_range_values_are_rejected() {
    let err = RuntimeConfig::from_toml_str("[edits]\nsprout_chance = 1.5\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    let err = RuntimeConfig::from_toml_str("[streaming]\nrender_radius = -1\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    let err = RuntimeConfig::from_toml_str("[streaming]\nrender_radius = \"far\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_remesh_budget_is_rejected() {
    let err = RuntimeConfig::from_toml_str("[streaming]\nmax_remesh_per_tick = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(RuntimeConfig::from_toml_str("[streaming]\nmax_remesh_per_tick = 1\n").is_ok());
}

#[test]
fn radii_are_bounded() {
    let ok = format!("[streaming]\nrender_radius = {MAX_RADIUS}\nunload_margin = {MAX_RADIUS}\n");
    assert!(RuntimeConfig::from_toml_str(&ok).is_ok());
    for key in ["render_radius", "unload_margin", "initial_radius"] {
        let toml = format!("[streaming]\n{key} = {}\n", i32::MAX);
        let err = RuntimeConfig::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains(key)), "{key}: {err}");
    }

    // overrides applied after parsing go through the same check
    let mut cfg = RuntimeConfig::default();
    cfg.streaming.render_radius = MAX_RADIUS + 1;
    assert!(cfg.validate().is_err());
}

#[test]
fn bundled_config_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/atoll.toml");
    let text = std::fs::read_to_string(&path).unwrap();
    let cfg = RuntimeConfig::from_toml_str(&text).unwrap();
    assert_eq!(cfg.streaming.render_radius, 2);
}
