use pypkgkit::error::Error;
use pypkgkit::naming::{to_kebab, to_snake, to_title, ProjectIdentity};
use pypkgkit::validation::{
    validate_author_name, validate_description, validate_email, validate_github_owner,
    validate_name,
};

fn message(result: pypkgkit::error::Result<()>) -> String {
    match result {
        Err(Error::ValidationError(message)) => message,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn test_valid_names() {
    for name in ["a", "my-pkg", "my_pkg", "pkg2", "a-b_c9"] {
        assert!(validate_name(name).is_ok(), "{name}");
    }
}

#[test]
fn test_invalid_name_shape() {
    for name in ["My-Pkg", "1pkg", "pkg-", "pkg_", "-pkg", "my pkg", "", "pkg.name"] {
        let msg = message(validate_name(name));
        assert!(msg.starts_with("Invalid package name"), "{name}: {msg}");
    }
}

#[test]
fn test_template_default_name_rejected() {
    for name in ["python-package-template", "python_package_template"] {
        assert!(message(validate_name(name)).contains("template default"));
    }
}

#[test]
fn test_stdlib_shadowing_rejected() {
    let msg = message(validate_name("json"));
    assert!(msg.contains("shadow"));
    assert!(msg.contains("'json'"));

    // Only the snake form is compared.
    assert!(validate_name("json-tools").is_ok());
    assert!(validate_name("sqlite3").is_err());
}

#[test]
fn test_email() {
    assert!(validate_email("jane@example.com").is_ok());
    assert!(validate_email("a@b").is_ok());
    assert!(message(validate_email("jane.example.com")).contains("must contain @"));
    assert!(message(validate_email("jane@example.com\nBcc: x")).contains("single line"));
}

#[test]
fn test_github_owner() {
    for owner in ["jane", "Jane-Doe", "org42", "a"] {
        assert!(validate_github_owner(owner).is_ok(), "{owner}");
    }
    for owner in ["-jane", "jane-", "jane_doe", "jane doe", ""] {
        assert!(validate_github_owner(owner).is_err(), "{owner}");
    }
}

#[test]
fn test_author_and_description() {
    assert!(validate_author_name("Jane \"JD\" Doe").is_ok());
    assert!(validate_author_name("Jane\rDoe").is_err());
    assert!(validate_description("Does things").is_ok());
    assert!(message(validate_description("   ")).contains("cannot be empty"));
    assert!(validate_description("one\ntwo").is_err());
}

#[test]
fn test_name_variants() {
    assert_eq!(to_snake("my-cool-pkg"), "my_cool_pkg");
    assert_eq!(to_kebab("my_cool_pkg"), "my-cool-pkg");
    assert_eq!(to_title("my_cool-pkg"), "My Cool Pkg");

    let id = ProjectIdentity::derive("data-tools", "acme");
    assert_eq!(id.snake_name, "data_tools");
    assert_eq!(id.title_name, "Data Tools");
    assert_eq!(id.repo_path, "acme/data-tools");
}
