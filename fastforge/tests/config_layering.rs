//! Configuration precedence: defaults < file < environment
//!
//! Kept in its own test binary because it sets process environment variables.

use std::fs;
use std::path::PathBuf;

use fastforge::config::CONFIG_FILE_NAME;
use fastforge::{GeneratorConfig, Scaffolder};
use tempfile::TempDir;

#[test]
fn test_environment_overrides_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        "marker_suffix = \".j2\"\n\n[layout]\nrouter_name = \"router\"\nservices = \"svc\"\n",
    )
    .unwrap();

    let from_file = GeneratorConfig::load(temp_dir.path()).unwrap();
    assert_eq!(from_file.marker_suffix, ".j2");
    assert_eq!(from_file.layout.router_name, "router");
    assert_eq!(from_file.layout.models, PathBuf::from("models"));

    std::env::set_var("FASTFORGE_LAYOUT__ROUTER_NAME", "v1_router");
    let layered = GeneratorConfig::load(temp_dir.path()).unwrap();
    std::env::remove_var("FASTFORGE_LAYOUT__ROUTER_NAME");

    assert_eq!(layered.layout.router_name, "v1_router");
    assert_eq!(layered.layout.services, PathBuf::from("svc"));
    assert_eq!(layered.marker_suffix, ".j2");

    // The loaded layout drives generation.
    let project = TempDir::new().unwrap();
    Scaffolder::new(layered)
        .generate_component("api", "post", project.path())
        .unwrap();
    let router = fs::read_to_string(project.path().join("api/api_v1/api.py")).unwrap();
    assert!(router.contains("v1_router = APIRouter()"));
    assert!(router.contains("v1_router.include_router(post.router"));
}
