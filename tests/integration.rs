// Integration testing can be done either by calling library functions directly or by invoking your CLI as a subprocess.
use expresso::{api, config::Config, prompt::Answers};
use std::fs;

fn answers(typed: bool) -> Answers {
    Answers {
        project: "my-api".to_string(),
        author: "ada".to_string(),
        repository: None,
        typed,
    }
}

#[test]
fn scaffold_materializes_the_full_javascript_tree() {
    let root = tempfile::tempdir().unwrap();
    let target = root.path().join("my-api");

    api::scaffold(&answers(false), &target, &Config::default()).unwrap();

    for path in [
        "package.json",
        "server.js",
        "routes/index.js",
        "controllers/index.js",
        "models/index.js",
        "middlewares/errorHandlers.js",
        "db/setup.sql",
        ".env.development",
        ".env.test",
        ".env.production",
        ".env.example",
        "endpoints.md",
    ] {
        assert!(target.join(path).is_file(), "missing {path}");
    }

    assert!(target.join("public").is_dir());
    assert!(target.join(".git").is_dir());

    let manifest = fs::read_to_string(target.join("package.json")).unwrap();
    assert!(manifest.contains(r#""name": "my-api""#));
    assert!(manifest.contains(r#""author": "ada""#));

    let ignore = fs::read_to_string(target.join(".gitignore")).unwrap();
    assert_eq!(ignore, "node_modules/\n.env.*\n");
}

#[test]
fn typed_variant_scaffolds_the_typescript_tree() {
    let root = tempfile::tempdir().unwrap();
    let target = root.path().join("my-api");

    api::scaffold(&answers(true), &target, &Config::default()).unwrap();

    assert!(target.join("server.ts").is_file());
    assert!(target.join("tsconfig.json").is_file());
    assert!(target.join("middlewares/errorHandlers.ts").is_file());
    assert!(!target.join("server.js").exists());
}

#[test]
fn rerunning_scaffold_preserves_user_edits() {
    let root = tempfile::tempdir().unwrap();
    let target = root.path().join("my-api");
    let config = Config::default();

    api::scaffold(&answers(false), &target, &config).unwrap();

    fs::write(target.join("server.js"), "// customized\n").unwrap();

    api::scaffold(&answers(false), &target, &config).unwrap();

    let server = fs::read_to_string(target.join("server.js")).unwrap();
    assert_eq!(server, "// customized\n");
}

#[test]
fn scaffold_with_remote_registers_origin() {
    let root = tempfile::tempdir().unwrap();
    let target = root.path().join("my-api");

    let mut with_remote = answers(false);
    with_remote.repository = Some("gh:ada/my-api".to_string());

    api::scaffold(&with_remote, &target, &Config::default()).unwrap();

    let repository = git2::Repository::open(&target).unwrap();
    let origin = repository.find_remote("origin").unwrap();
    assert_eq!(origin.url(), Some("https://github.com/ada/my-api.git"));

    let manifest = fs::read_to_string(target.join("package.json")).unwrap();
    assert!(manifest.contains(r#""url": "https://github.com/ada/my-api.git""#));
}

#[test]
fn help_lists_the_new_subcommand() {
    let mut cmd = assert_cmd::Command::cargo_bin("expresso").unwrap();

    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("new"));
}

#[test]
fn new_help_mentions_skip_install() {
    let mut cmd = assert_cmd::Command::cargo_bin("expresso").unwrap();

    cmd.arg("new").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("skip-install"));
}
