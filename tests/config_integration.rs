//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files, environment variables and
//! the command-line output override.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use torus_frame::config::AppConfig;
use torus_render::Rounding;

/// Helper to create a config directory holding `user.toml`
fn temp_config_dir(name: &str, user_toml: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("torus_frame_config_tests").join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::copy("config/default.toml", dir.join("default.toml")).unwrap();
    fs::write(dir.join("user.toml"), user_toml).unwrap();
    dir
}

#[test]
#[serial]
fn test_default_file_is_reference_frame() {
    let config = AppConfig::load().unwrap();
    assert_eq!(config.frame.width, 160);
    assert_eq!(config.frame.height, 120);
    assert_eq!(config.to_frame_params(), torus_render::FrameParams::default());
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("TORUS_VIEW__ANGLE_A", "0.5");
    std::env::set_var("TORUS_SHADING__ROUNDING", "truncate");
    let config = AppConfig::load();
    std::env::remove_var("TORUS_VIEW__ANGLE_A");
    std::env::remove_var("TORUS_SHADING__ROUNDING");

    let config = config.unwrap();
    assert_eq!(config.view.angle_a, 0.5);
    assert_eq!(config.shading.rounding, Rounding::Truncate);
    assert_eq!(config.view.angle_b, 1.0);
}

#[test]
#[serial]
fn test_user_config_overrides_default() {
    let dir = temp_config_dir("user_override", "[frame]\nwidth = 64\n");
    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.frame.width, 64);
    assert_eq!(config.frame.height, 120);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_env_beats_user_config() {
    let dir = temp_config_dir("env_beats_user", "[frame]\nwidth = 64\n");
    std::env::set_var("TORUS_FRAME__WIDTH", "32");
    let config = AppConfig::load_from(&dir);
    std::env::remove_var("TORUS_FRAME__WIDTH");

    assert_eq!(config.unwrap().frame.width, 32);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_output_argument_beats_everything() {
    std::env::set_var("TORUS_OUTPUT__PATH", "from_env.mem");
    let config = AppConfig::load_with_output("config", Some("from_cli.mem"));
    std::env::remove_var("TORUS_OUTPUT__PATH");
    assert_eq!(config.unwrap().output.path, "from_cli.mem");

    let config = AppConfig::load_with_output("config", None).unwrap();
    assert_eq!(config.output.path, "donut_data.mem");
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.sampling.phi_step, 0.02);
}

#[test]
#[serial]
fn test_invalid_value_is_config_error() {
    let dir = temp_config_dir("invalid_value", "[shading]\nrounding = \"sideways\"\n");
    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
    let _ = fs::remove_dir_all(&dir);
}
