//! Command-line behaviour: exit codes and files on disk

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn fastforge(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fastforge"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run fastforge")
}

#[test]
fn test_create_standard_project() {
    let temp = TempDir::new().unwrap();
    let out = fastforge(&["create", "My Blog"], temp.path());

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let project = temp.path().join("my_blog");
    assert!(project.join("main.py").is_file());
    assert!(project.join("app/api/api_v1/api.py").is_file());
    assert!(project.join("alembic.ini").is_file());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Next steps"));
}

#[test]
fn test_create_with_output_and_template() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("work");
    fs::create_dir(&target).unwrap();

    let out = fastforge(
        &["create", "shop", "-o", target.to_str().unwrap(), "-t", "basic"],
        temp.path(),
    );

    assert!(out.status.success());
    assert!(target.join("shop/main.py").is_file());
    assert!(!target.join("shop/alembic.ini").exists());
}

#[test]
fn test_create_rejects_unknown_template() {
    let temp = TempDir::new().unwrap();
    let out = fastforge(&["create", "shop", "-t", "deluxe"], temp.path());

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("deluxe"));
    assert!(!temp.path().join("shop").exists());
}

#[test]
fn test_create_fails_when_directory_exists() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("shop")).unwrap();
    fs::write(temp.path().join("shop/keep.txt"), "mine").unwrap();

    let out = fastforge(&["create", "shop"], temp.path());

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));
    assert_eq!(
        fs::read_to_string(temp.path().join("shop/keep.txt")).unwrap(),
        "mine"
    );
}

#[test]
fn test_generate_components_in_project() {
    let temp = TempDir::new().unwrap();
    assert!(fastforge(&["create", "blog"], temp.path()).status.success());
    let project = temp.path().join("blog");

    for kind in ["model", "api", "service"] {
        let out = fastforge(&["generate", kind, "post"], &project);
        assert!(out.status.success(), "{kind}: {}", String::from_utf8_lossy(&out.stderr));
    }

    assert!(project.join("app/models/post.py").is_file());
    assert!(project.join("app/schemas/post.py").is_file());
    assert!(project.join("app/services/post_service.py").is_file());
    assert!(project.join("app/api/api_v1/endpoints/post.py").is_file());

    let router = fs::read_to_string(project.join("app/api/api_v1/api.py")).unwrap();
    assert_eq!(router.matches("include_router(post.router").count(), 1);

    // Second run leaves the aggregators alone.
    let out = fastforge(&["generate", "api", "post"], &project);
    assert!(out.status.success());
    let again = fs::read_to_string(project.join("app/api/api_v1/api.py")).unwrap();
    assert_eq!(router, again);
}

#[test]
fn test_generate_rejects_unknown_kind() {
    let temp = TempDir::new().unwrap();
    let out = fastforge(&["generate", "widget", "post"], temp.path());

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("widget"));
    assert!(stderr.contains("model, api, service, migration"));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_init_migration_appends_requirement() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("requirements.txt"), "fastapi\n").unwrap();
    fs::create_dir_all(temp.path().join("app/core")).unwrap();
    fs::write(
        temp.path().join("app/core/config.py"),
        "class Settings:\n    DATABASE_URL: str = \"sqlite:///./app.db\"\n",
    )
    .unwrap();

    let out = fastforge(&["init-migration"], temp.path());

    assert!(out.status.success());
    assert!(temp.path().join("alembic.ini").is_file());
    assert!(temp.path().join("migrations/env.py").is_file());
    let requirements = fs::read_to_string(temp.path().join("requirements.txt")).unwrap();
    assert!(requirements.contains("alembic"));
    let settings = fs::read_to_string(temp.path().join("app/core/config.py")).unwrap();
    assert!(settings.contains("    DB_ECHO: bool = False\n"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let out = fastforge(
        &["--config", "absent.toml", "generate", "model", "post"],
        temp.path(),
    );

    assert!(!out.status.success());
    assert!(!temp.path().join("models").exists());
}

#[test]
fn test_config_file_changes_layout() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("fastforge.toml"),
        "[layout]\nmodels = \"db/tables\"\n",
    )
    .unwrap();

    let out = fastforge(&["generate", "model", "post"], temp.path());

    assert!(out.status.success());
    assert!(temp.path().join("db/tables/post.py").is_file());
}
