use envstamp::{
  api::layout::RepoLayout,
  commands::render::build_values,
  config::{self, StampConfig},
};
use std::{
  collections::HashMap,
  fs::{self, File},
  io::Write,
  path::PathBuf,
};

#[test]
fn loads_config_and_absolutizes_paths() {
  let temp_dir = tempfile::tempdir().expect("should create temp dir");
  let config_path = temp_dir.path().join("envstamp.toml");

  let mut file = File::create(&config_path).expect("should create config file");
  writeln!(
    file,
    r#"
version_file = "meta/VERSION"
env_file = "/etc/app/.env.production"

[values]
region = "eu-1"
"#
  )
  .expect("should write config file");

  let config = StampConfig::from_file(&config_path).expect("should load config");

  assert_eq!(
    config.version_file.expect("version_file should be set"),
    temp_dir.path().join("meta/VERSION")
  );
  assert_eq!(
    config.env_file.expect("env_file should be set"),
    PathBuf::from("/etc/app/.env.production")
  );
  assert_eq!(
    config.values.expect("values should be set"),
    HashMap::from([("region".to_string(), "eu-1".to_string())])
  );
}

#[test]
fn rejects_unknown_keys() {
  let temp_dir = tempfile::tempdir().expect("should create temp dir");
  let config_path = temp_dir.path().join("envstamp.toml");
  fs::write(&config_path, "verison_file = \"VERSION\"\n").expect("should write config file");

  assert!(StampConfig::from_file(&config_path).is_err());
}

#[test]
fn load_without_config_file_uses_defaults() {
  let temp_dir = tempfile::tempdir().expect("should create temp dir");

  let config = config::load(None, temp_dir.path()).expect("should load defaults");

  assert_eq!(config, StampConfig::default());
}

#[test]
fn load_picks_up_config_at_root() {
  let temp_dir = tempfile::tempdir().expect("should create temp dir");
  fs::write(
    temp_dir.path().join("envstamp.toml"),
    "env_file = \"deploy/.env\"\n",
  )
  .expect("should write config file");

  let config = config::load(None, temp_dir.path()).expect("should load config");

  assert_eq!(config.env_file, Some(temp_dir.path().join("deploy/.env")));
}

#[test]
fn explicit_config_path_must_exist() {
  let temp_dir = tempfile::tempdir().expect("should create temp dir");

  let result = config::load(
    Some(temp_dir.path().join("missing.toml")),
    temp_dir.path(),
  );

  assert!(result.is_err());
}

#[test]
fn merges_configs_with_overlay_priority() {
  let base = StampConfig {
    version_file: Some(PathBuf::from("base_version")),
    env_file: Some(PathBuf::from("base_env")),
    values: Some(HashMap::from([
      ("region".to_string(), "base".to_string()),
      ("tier".to_string(), "gold".to_string()),
    ])),
  };

  let overlay = StampConfig {
    version_file: Some(PathBuf::from("overlay_version")),
    env_file: None,
    values: Some(HashMap::from([
      ("region".to_string(), "overlay".to_string()),
      ("zone".to_string(), "b".to_string()),
    ])),
  };

  let merged = StampConfig::merge(&base, &overlay);

  assert_eq!(
    merged.version_file.unwrap(),
    PathBuf::from("overlay_version")
  );
  assert_eq!(merged.env_file.unwrap(), PathBuf::from("base_env"));
  assert_eq!(
    HashMap::from([
      ("region".to_string(), "overlay".to_string()),
      ("tier".to_string(), "gold".to_string()),
      ("zone".to_string(), "b".to_string()),
    ]),
    merged.values.unwrap()
  );
}

#[test]
fn applies_overrides_relative_to_root() {
  let layout = RepoLayout::new("/repo");
  let config = StampConfig {
    version_file: Some(PathBuf::from("meta/VERSION")),
    env_file: Some(PathBuf::from("/srv/.env")),
    values: None,
  };

  let layout = config.apply_to(layout);

  assert_eq!(layout.root, PathBuf::from("/repo"));
  assert_eq!(layout.version_file, PathBuf::from("/repo/meta/VERSION"));
  assert_eq!(layout.env_file, PathBuf::from("/srv/.env"));
}

#[test]
fn default_layout_uses_fixed_names() {
  let layout = RepoLayout::new("/repo");

  assert_eq!(layout.version_file, PathBuf::from("/repo/VERSION"));
  assert_eq!(layout.env_file, PathBuf::from("/repo/.env.production"));
}

#[test]
fn version_file_wins_over_configured_build_version() {
  let configured = HashMap::from([
    ("build_version".to_string(), "stale".to_string()),
    ("region".to_string(), "eu-1".to_string()),
  ]);

  let values = build_values("1.2.3", Some(&configured));

  assert_eq!(values.get("build_version").map(String::as_str), Some("1.2.3"));
  assert_eq!(values.get("region").map(String::as_str), Some("eu-1"));
}
