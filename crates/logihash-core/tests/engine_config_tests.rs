//! Engine Config Tests
//!
//! Loading engine configuration from TOML files and reproducing digests from
//! a pinned salt table.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::io::Write;

use common::Point;
use logihash_core::{EngineConfig, HashEngine, LogiHashError, LogicalType, TypeDecl};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_pinned_config_from_file() {
    let file = write_config("initial_salts = 4\nsalts = [11, -7]\n");

    let config = EngineConfig::load(file.path()).unwrap();
    assert_eq!(config.initial_salts, 4);
    assert_eq!(config.salts, Some(vec![11, -7]));

    let engine = HashEngine::from_config(&config).unwrap();
    assert_eq!(engine.salts().len(), 4);
    assert_eq!(engine.salts().get(0).unwrap(), 11);
    assert_eq!(engine.salts().get(1).unwrap(), -7);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, LogiHashError::Io { message } if message.contains("absent.toml")));
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let file = write_config("initial_salts = \"many\"\n");
    let err = EngineConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, LogiHashError::Serialization { .. }));
}

#[test]
fn test_zero_pinned_salt_in_file_is_rejected() {
    let file = write_config("salts = [1, 2, 0]\n");
    let err = EngineConfig::load(file.path()).unwrap_err();
    assert_eq!(err, LogiHashError::ZeroSalt { position: 2 });
}

#[test]
fn test_pinned_config_reproduces_digests_across_engines() {
    // GIVEN two engines built independently from the same pinned config
    let file = write_config("salts = [285764410, -1880307357]\n");
    let config = EngineConfig::load(file.path()).unwrap();
    let first = HashEngine::from_config(&config).unwrap();
    let second = HashEngine::from_config(&config).unwrap();

    let ty_a = first
        .register(LogicalType::builder(TypeDecl::new("Point", ["x", "y"])))
        .unwrap();
    let ty_b = second
        .register(LogicalType::builder(TypeDecl::new("Point", ["x", "y"])))
        .unwrap();

    // THEN they agree on every digest
    let a = Point::new(&ty_a, 3, 4);
    let b = Point::new(&ty_b, 3, 4);
    assert_eq!(
        first.compute_hash(&a).unwrap(),
        second.compute_hash(&b).unwrap()
    );
}

#[test]
fn test_rendered_config_loads_back() {
    let engine = HashEngine::new().unwrap();
    let config = EngineConfig::pinned(engine.salts().snapshot().as_slice().to_vec());
    let file = write_config(&config.to_toml_string().unwrap());

    let loaded = EngineConfig::load(file.path()).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.initial_salts, 128);
}
