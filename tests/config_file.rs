//
//  scribe-cli
//  tests/config_file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::time::Duration;

use scribe_cli::config::{Config, DEFAULT_BASE_URL};
use tempfile::TempDir;

#[test]
fn missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
}

#[test]
fn saved_values_survive_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.set("api.base_url", "https://scribe.example.com/").unwrap();
    config.set("api.upload_timeout_secs", "600").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.api.base_url, "https://scribe.example.com");
    assert_eq!(loaded.api.upload_timeout(), Duration::from_secs(600));
    assert_eq!(loaded.api.timeout(), Duration::from_secs(30));
}

#[test]
fn hand_written_partial_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[core]\noutput = \"json\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.core.output, "json");
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
}

#[test]
fn malformed_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api\nbase_url = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("config.toml"));
}
