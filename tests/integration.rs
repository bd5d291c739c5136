//! Integration tests for commentscan


use harness::{TestRepo, commentscan, run_commentscan};
use predicates::prelude::*;

fn sample_repo() -> TestRepo {
    let repo = TestRepo::with_git();
    repo.add_file("src/app.js", "// TODO: fix\nconst a = 1;\n");
    repo.add_file("src/style.css", "/* theme */\nbody {}\n");
    repo.add_file("main.py", "# entry\nprint(1)\n");
    repo
}

#[test]
fn test_local_scan_output() {
    let repo = sample_repo();

    let (stdout, _stderr, success) = run_commentscan(repo.path(), &["local"]);
    assert!(success, "commentscan should succeed");
    assert_eq!(
        stdout,
        "main.py\n    # entry\nsrc/app.js\n    // TODO: fix\nsrc/style.css\n    /* theme */\n\n\
         3 comments in 3 files (3 scanned, 0 skipped)\n"
    );
}

#[test]
fn test_local_query_filters_comments() {
    let repo = sample_repo();

    commentscan(repo.path())
        .args(["local", "-q", "todo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("// TODO: fix"))
        .stdout(predicate::str::contains("theme").not())
        .stdout(predicate::str::contains(
            "1 comment matching \"todo\" in 1 file",
        ));
}

#[test]
fn test_gitignore_filtering() {
    let repo = sample_repo();
    repo.add_file(".gitignore", "build/\n");
    repo.add_file("build/bundle.js", "// generated bundle");

    let (stdout, _stderr, success) = run_commentscan(repo.path(), &["local"]);
    assert!(success);
    assert!(
        !stdout.contains("bundle"),
        "ignored directory should not be scanned: {}",
        stdout
    );
}

#[test]
fn test_show_all_flag() {
    let repo = sample_repo();
    repo.add_file(".gitignore", "build/\n");
    repo.add_file("build/bundle.js", "// generated bundle");

    let (stdout, _stderr, success) = run_commentscan(repo.path(), &["local", "-a"]);
    assert!(success);
    assert!(stdout.contains("build/bundle.js"), "-a should scan ignored files: {}", stdout);
    assert!(!stdout.contains(".git/"), ".git contents are never scanned: {}", stdout);
}

#[test]
fn test_builtin_ignore_list() {
    let repo = sample_repo();
    repo.add_file("package-lock.json", "// not scanned");
    repo.add_file("logo.png", "// not an image either");

    let (stdout, _stderr, success) = run_commentscan(repo.path(), &["local"]);
    assert!(success);
    assert!(!stdout.contains("package-lock.json"));
    assert!(!stdout.contains("logo.png"));
    assert!(stdout.contains("(3 scanned, 2 skipped)"), "{}", stdout);
}

#[test]
fn test_ignore_pattern_flag() {
    let repo = sample_repo();

    let (stdout, _stderr, success) =
        run_commentscan(repo.path(), &["local", "-I", "*.css", "-I", "main.py"]);
    assert!(success);
    assert!(stdout.contains("src/app.js"));
    assert!(!stdout.contains("style.css"));
    assert!(!stdout.contains("main.py"));
}

#[test]
fn test_json_output() {
    let repo = sample_repo();

    let (stdout, _stderr, success) =
        run_commentscan(repo.path(), &["local", "--json", "-q", "TODO"]);
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["query"], "TODO");
    assert_eq!(json["files_scanned"], 3);
    assert_eq!(json["files"][0]["path"], "src/app.js");
    assert_eq!(json["files"][0]["extension"], "js");
    assert_eq!(json["files"][0]["comments"][0], "// TODO: fix");
}

#[test]
fn test_full_comment_flag() {
    let repo = TestRepo::new();
    repo.add_file("lib.js", "/* first line\n   second line */\n");

    let (stdout, _stderr, _) = run_commentscan(repo.path(), &["local"]);
    assert!(stdout.contains("    /* first line\n"));
    assert!(!stdout.contains("second line"));

    let (stdout, _stderr, success) = run_commentscan(repo.path(), &["local", "-f"]);
    assert!(success);
    assert!(stdout.contains("    /* first line\n       second line */\n"), "{}", stdout);
}

#[test]
fn test_max_file_size() {
    let repo = TestRepo::new();
    repo.add_file("small.js", "// small");
    repo.add_file("big.js", &format!("// big\n{}", "x".repeat(4096)));

    let (stdout, _stderr, success) =
        run_commentscan(repo.path(), &["local", "--max-file-size", "1K"]);
    assert!(success);
    assert!(stdout.contains("small.js"));
    assert!(!stdout.contains("big.js"));
    assert!(stdout.contains("(1 scanned, 1 skipped)"), "{}", stdout);
}

#[test]
fn test_sequential_and_parallel_agree() {
    let repo = TestRepo::new();
    repo.add_js_files(40);

    let (sequential, _, ok1) = run_commentscan(repo.path(), &["local", "-j", "1"]);
    let (parallel, _, ok2) = run_commentscan(repo.path(), &["local", "-j", "4"]);
    assert!(ok1 && ok2);
    assert_eq!(sequential, parallel);
    assert!(sequential.contains("80 comments in 40 files"));
}

#[test]
fn test_detect_command() {
    let repo = TestRepo::new();
    repo.add_file("index.html", "<p>hi</p>\n<!-- note -->\n");

    commentscan(repo.path())
        .args(["detect", "index.html"])
        .assert()
        .success()
        .stdout("<!-- note -->\n");
}

#[test]
fn test_detect_from_stdin() {
    let repo = TestRepo::new();

    commentscan(repo.path())
        .args(["detect", "-", "--ext", "py"])
        .write_stdin("x = 1  # trailing\n\"\"\"doc\"\"\"\n")
        .assert()
        .success()
        .stdout("\"\"\"doc\"\"\"\n");
}

#[test]
fn test_detect_multiple_files_json() {
    let repo = TestRepo::new();
    repo.add_file("a.css", "/* a */");
    repo.add_file("b.scss", "// not css\n/* b */");

    let (stdout, _stderr, success) =
        run_commentscan(repo.path(), &["detect", "a.css", "b.scss", "--json"]);
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json[0]["comments"], serde_json::json!(["/* a */"]));
    assert_eq!(json[1]["extension"], "scss");
    assert_eq!(json[1]["comments"], serde_json::json!(["/* b */"]));
}

#[test]
fn test_github_home_and_about_need_no_network() {
    let repo = TestRepo::new();

    commentscan(repo.path())
        .args(["github"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Home\n"));

    commentscan(repo.path())
        .args(["github", "/about/"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("About\n"));
}

#[test]
fn test_github_unknown_route() {
    let repo = TestRepo::new();

    commentscan(repo.path())
        .args(["github", "a/b/c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error 404"))
        .stderr(predicate::str::contains("commentscan: invalid route 'a/b/c'"));
}

#[test]
fn test_version_flag() {
    let repo = TestRepo::new();

    commentscan(repo.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("commentscan"));
}

#[test]
fn test_detect_list_rules() {
    let repo = TestRepo::new();

    commentscan(repo.path())
        .args(["detect", "--list-rules"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "cjs: line-comment, block-comment\ncss: block-comment\n",
        ))
        .stdout(predicate::str::contains("py: hash, triple-quoted\n"))
        .stdout(predicate::str::ends_with(
            "*: line-comment, block-comment, templated-markup, hash, triple-quoted, html-markup\n",
        ));
}

#[test]
fn test_detect_list_rules_json() {
    let repo = TestRepo::new();

    let (stdout, _stderr, success) =
        run_commentscan(repo.path(), &["detect", "--list-rules", "--json"]);
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["jsx"], serde_json::json!(["templated-markup"]));
    assert_eq!(json["php"][0], "hash");
    assert_eq!(json["*"].as_array().map(Vec::len), Some(6));
}
