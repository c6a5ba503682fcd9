mod common;

use pypkgkit::ignore::find_project_files;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn selected(root: &std::path::Path) -> Vec<PathBuf> {
    find_project_files(root)
        .unwrap()
        .into_iter()
        .map(|path| path.strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

#[test]
fn test_find_project_files_on_template() {
    let temp_dir = TempDir::new().unwrap();
    common::write_template(temp_dir.path());
    fs::create_dir_all(temp_dir.path().join(".git")).unwrap();
    fs::write(temp_dir.path().join(".git/config"), "python_package_template").unwrap();
    fs::create_dir_all(temp_dir.path().join("python_package_template/__pycache__")).unwrap();
    fs::write(
        temp_dir.path().join("python_package_template/__pycache__/main.cpython-312.pyc"),
        "x",
    )
    .unwrap();

    let files = selected(temp_dir.path());
    let has = |p: &str| files.contains(&PathBuf::from(p));

    assert!(has("pyproject.toml"));
    assert!(has("README.md"));
    assert!(has(".github/workflows/ci.yml"));
    assert!(has("python_package_template/main.py"));
    assert!(has("tests/test_main.py"));

    assert!(!has("uv.lock"));
    assert!(!has("CHANGELOG.md"));
    assert!(!has("scripts/init.py"));
    assert!(!has("scripts/init.sh"));
    assert!(!has("docs/logo.png"));
    assert!(!has("tests/template/test_template_structure.py"));
    assert!(!has("cli/pyproject.toml"));
    assert!(!has(".git/config"));
    assert!(files.iter().all(|f| !f.to_string_lossy().contains("__pycache__")));
}

#[test]
fn test_nested_template_dir_is_not_excluded() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("docs/tests/template");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("page.md"), "text").unwrap();

    assert_eq!(
        selected(temp_dir.path()),
        vec![PathBuf::from("docs/tests/template/page.md")]
    );
}
