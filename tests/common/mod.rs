#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use pypkgkit::error::{Error, Result};
use pypkgkit::fetcher::ReleaseSource;
use pypkgkit::license::{offline_licenses, LicenseRecord, LicenseSource};
use pypkgkit::prompt::{Prompter, Validator};
use pypkgkit::runner::{CommandOutput, CommandRunner};

pub const PYPROJECT: &str = r#"[project]
name = "python-package-template"
version = "1.5.0"
description = "A production-ready template for starting new Python packages."
authors = [
    { name = "Michael Ellis", email = "michaelellis003@gmail.com" },
]
license = {text = "Apache-2.0"}
keywords = ["template", "python", "uv", "ruff", "pyright"]
classifiers = [
    "License :: OSI Approved :: Apache Software License",
    "Programming Language :: Python :: 3",
]

[project.urls]
Homepage = "https://github.com/michaelellis003/uv-python-template"
Documentation = "https://michaelellis003.github.io/uv-python-template"

[tool.hatch.build.targets.wheel]
packages = ["python_package_template"]

[tool.uv]
# TODO: Update the --upgrade-package list when dependencies change
dev-dependencies = []
"#;

pub const README: &str = "# Python Package Template

[![CI](https://github.com/michaelellis003/uv-python-template/actions/workflows/ci.yml/badge.svg)](https://github.com/michaelellis003/uv-python-template/actions)
[![codecov](https://codecov.io/gh/michaelellis003/uv-python-template/graph/badge.svg)](https://codecov.io/gh/michaelellis003/uv-python-template)

A production-ready template for starting new Python packages. Clone it, rename a few things, and start building \u{2014} dependency management, linting, type checking, testing, and CI/CD are already wired up.

<!-- TEMPLATE-ONLY-START -->
## Using this template
Run `uv run --script ./scripts/init.py` after cloning.
<!-- TEMPLATE-ONLY-END -->

## Project Structure

```
\u{251c}\u{2500}\u{2500} python_package_template/   # Package source (rename this)
\u{251c}\u{2500}\u{2500} scripts/init.sh            # Interactive initialization wrapper
\u{251c}\u{2500}\u{2500} tests/e2e/                 # E2E tests
\u{2514}\u{2500}\u{2500} tests/test_main.py
```

## Publishing

Run `uv run --script ./scripts/init.py --pypi` to enable publishing (or uncomment
the `PYPI-START`/`PYPI-END` block in `release.yml` manually).

## CI

### On Push to Main and Pull Request (e2e.yml)
Runs the Docker e2e suite.

### Release
Semantic release on merge.

## License

Apache-2.0 license (configurable via init.py)
";

pub const CLAUDE_MD: &str = "# CLAUDE.md

<!-- TEMPLATE-ONLY-START -->
This is the Python Package Template repository.
<!-- TEMPLATE-ONLY-END -->

## Structure

\u{251c}\u{2500}\u{2500} scripts/init.py        # Interactive initialization
\u{251c}\u{2500}\u{2500} tests/template/        # Template structure tests
\u{251c}\u{2500}\u{2500} python_package_template/

Apache-2.0 license (configurable via init.py)
";

pub const PRE_COMMIT: &str = "repos:
  - repo: https://github.com/astral-sh/ruff-pre-commit
    rev: v0.9.0
    hooks:
      - id: ruff
  # Keep rev in sync with ruff version
  - repo: local
    hooks:
      - id: pyright
        name: pyright
        entry: uv run pyright
        language: system
        types: [python]
";

pub const RELEASE_YML: &str = "name: Release
on:
  push:
    branches: [main]
jobs:
  release:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      # Run init.py with --pypi, or uncomment the block below.
      # PYPI-START
      # - name: Publish to PyPI
      #   uses: pypa/gh-action-pypi-publish@release/v1
      #
      # PYPI-END
";

pub const CI_YML: &str = "name: CI
on: [push]
jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - run: uv run pytest

  # CLI package
  cli-tests:
    runs-on: ubuntu-latest
    steps:
      - run: cd cli && uv run pytest

  ci-pass:
    needs: [test, cli-tests]
    runs-on: ubuntu-latest
    steps:
      - run: echo ok
";

pub const RECIPE: &str = "package:
  name: python-package-template
about:
  summary: A production-ready template for starting new Python packages.
  license: Apache-2.0
extra:
  recipe-maintainers:
    - michaelellis003
";

pub const CODE_STYLE: &str = "# Code Style

## License Headers

- After running `init.py` with a license selection, all `.py` files
  will have SPDX license headers and an `insert-license` pre-commit
  hook enforces them on new files.
- Place after shebang (if present), before module docstring.
- Format:
  ```python
  # Copyright YYYY Author Name
  # SPDX-License-Identifier: LICENSE-ID
  ```
- The template repo itself does not ship with headers \u{2014} they are
  generated by `init.py` based on the selected license.

## Imports

- Absolute imports only.
";

pub const TESTING_MD: &str = "# Testing

## Template Tests

- Tests under `tests/template/` are automatically removed when the project is initialized.

## Fixtures

- Prefer `tmp_path`.
";

pub const LOGO_BYTES: &[u8] = b"\x89PNG\r\n\x1a\npython_package_template\x00\xff";

/// Files of a miniature uv-python-template release.
pub fn template_files() -> Vec<(&'static str, Vec<u8>)> {
    let text = |s: &str| s.as_bytes().to_vec();
    vec![
        ("pyproject.toml", text(PYPROJECT)),
        ("README.md", text(README)),
        ("CLAUDE.md", text(CLAUDE_MD)),
        ("CHANGELOG.md", text("# CHANGELOG\n\n## v1.5.0\n- Everything\n")),
        ("LICENSE", text("Apache License\nVersion 2.0, January 2004\n")),
        ("uv.lock", text("[[package]]\nname = \"python-package-template\"\n")),
        (".pre-commit-config.yaml", text(PRE_COMMIT)),
        (".dockerignore", text(".venv\n")),
        (".github/CODEOWNERS", text("* @michaelellis003\n")),
        (".github/workflows/release.yml", text(RELEASE_YML)),
        (".github/workflows/ci.yml", text(CI_YML)),
        (".github/workflows/e2e.yml", text("name: e2e\n")),
        (".github/workflows/cli-release.yml", text("name: cli-release\n")),
        (".claude/rules/code-style.md", text(CODE_STYLE)),
        (".claude/rules/testing.md", text(TESTING_MD)),
        ("recipe/meta.yaml", text(RECIPE)),
        (
            "docs/index.md",
            text("# Python Package Template\n\nTemplate docs.\n"),
        ),
        (
            "docs/publishing.md",
            text(
                "# Publishing\n\n1. To enable PyPI, run `uv run --script ./scripts/init.py --pypi`,\n   or manually uncomment the block.\n",
            ),
        ),
        ("docs/logo.png", LOGO_BYTES.to_vec()),
        (
            "python_package_template/__init__.py",
            text("\"\"\"Python Package Template.\"\"\"\n"),
        ),
        (
            "python_package_template/main.py",
            text("def hello() -> str:\n    \"\"\"Greet from python-package-template.\"\"\"\n    return \"hello\"\n"),
        ),
        (
            "python_package_template/__main__.py",
            text("#!/usr/bin/env python\nfrom python_package_template.main import hello\n\nprint(hello())\n"),
        ),
        (
            "tests/test_main.py",
            text("from python_package_template.main import hello\n\n\ndef test_hello():\n    assert hello() == \"hello\"\n"),
        ),
        (
            "tests/template/test_template_structure.py",
            text("import python_package_template\n"),
        ),
        ("tests/e2e/run-e2e.sh", text("#!/bin/sh\ndocker build .\n")),
        ("scripts/init.py", text("print('init michaelellis003')\n")),
        ("scripts/init.sh", text("#!/bin/sh\nuv run scripts/init.py\n")),
        ("cli/pyproject.toml", text("[project]\nname = \"pypkgkit\"\n# michaelellis003\n")),
    ]
}

/// Writes the miniature template into `root`.
pub fn write_template(root: &Path) {
    for (relative, content) in template_files() {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

pub fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

/// Packs a directory as `{top}/...` into a gzip-compressed tarball.
pub fn pack_dir(src: &Path, top: &str, dest: &Path) {
    let file = fs::File::create(dest).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    builder.append_dir_all(top, src).unwrap();
    builder.into_inner().unwrap().finish().unwrap();
}

/// Builds a tarball from raw `(path, content)` members without any path checks.
pub fn pack_raw(members: &[(&str, &[u8])], dest: &Path) {
    let file = fs::File::create(dest).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (path, content) in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        {
            let name = &mut header.as_old_mut().name;
            name[..path.len()].copy_from_slice(path.as_bytes());
        }
        header.set_cksum();
        builder.append(&header, *content).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

/// Serves a prebuilt archive.
pub struct FakeReleases {
    pub tag: Result<String>,
    pub archive: Option<PathBuf>,
    pub downloads: RefCell<Vec<String>>,
}

impl FakeReleases {
    pub fn serving(archive: PathBuf) -> Self {
        Self {
            tag: Ok("v9.9.9".to_string()),
            archive: Some(archive),
            downloads: RefCell::new(Vec::new()),
        }
    }

    pub fn rate_limited() -> Self {
        Self {
            tag: Err(Error::RateLimited),
            archive: None,
            downloads: RefCell::new(Vec::new()),
        }
    }
}

impl ReleaseSource for FakeReleases {
    fn latest_tag(&self) -> Result<String> {
        match &self.tag {
            Ok(tag) => Ok(tag.clone()),
            Err(Error::RateLimited) => Err(Error::RateLimited),
            Err(e) => Err(Error::ApiError(e.to_string())),
        }
    }

    fn download(&self, tag: &str, dest: &Path) -> Result<()> {
        self.downloads.borrow_mut().push(tag.to_string());
        let archive = self
            .archive
            .as_ref()
            .ok_or_else(|| Error::DownloadError("no archive".to_string()))?;
        fs::copy(archive, dest)?;
        Ok(())
    }
}

/// Fails the test on any network use.
pub struct Unreachable;

impl ReleaseSource for Unreachable {
    fn latest_tag(&self) -> Result<String> {
        panic!("latest_tag must not be called");
    }

    fn download(&self, _tag: &str, _dest: &Path) -> Result<()> {
        panic!("download must not be called");
    }
}

impl LicenseSource for Unreachable {
    fn catalog(&self) -> Result<Vec<LicenseRecord>> {
        panic!("catalog must not be called");
    }

    fn body(&self, _key: &str) -> Result<String> {
        panic!("body must not be called");
    }
}

impl CommandRunner for Unreachable {
    fn run(&self, program: &str, _: &[&str], _: Option<&Path>, _: Option<&str>) -> Result<CommandOutput> {
        panic!("{program} must not be run");
    }
}

pub const MIT_BODY: &str = "MIT License\n\nCopyright (c) [year] [fullname]\n\nPermission is hereby granted...";

/// Offline catalog plus an MIT text; `offline` makes every call fail.
pub struct FakeLicenses {
    pub offline: bool,
}

impl LicenseSource for FakeLicenses {
    fn catalog(&self) -> Result<Vec<LicenseRecord>> {
        if self.offline {
            return Err(Error::NetworkError("offline".to_string()));
        }
        let mut records = offline_licenses();
        records.push(LicenseRecord::new("wtfpl", "Do What The F*ck You Want To Public License"));
        Ok(records)
    }

    fn body(&self, key: &str) -> Result<String> {
        match (self.offline, key) {
            (false, "mit") => Ok(MIT_BODY.to_string()),
            _ => Err(Error::NetworkError("offline".to_string())),
        }
    }
}

/// A recorded command: program, arguments and stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub line: String,
    pub stdin: Option<String>,
}

/// Records commands; lines starting with a `failing` prefix fail, and
/// `responses` supply stdout by prefix.
#[derive(Default)]
pub struct FakeRunner {
    pub calls: RefCell<Vec<Call>>,
    pub failing: Vec<&'static str>,
    pub missing: Vec<&'static str>,
    pub responses: Vec<(&'static str, &'static str)>,
}

impl FakeRunner {
    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.line.clone()).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        _cwd: Option<&Path>,
        stdin: Option<&str>,
    ) -> Result<CommandOutput> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(Call {
            line: line.clone(),
            stdin: stdin.map(str::to_string),
        });
        if self.missing.contains(&program) {
            return Err(Error::ToolMissing {
                tool: program.to_string(),
                hint: String::new(),
            });
        }
        if self.failing.iter().any(|prefix| line.starts_with(prefix)) {
            return Ok(CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: "boom".to_string(),
            });
        }
        let stdout = self
            .responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix))
            .map(|(_, out)| out.to_string())
            .unwrap_or_default();
        Ok(CommandOutput {
            success: true,
            stdout,
            stderr: String::new(),
        })
    }
}

/// One scripted prompt answer.
#[derive(Debug, Clone)]
pub enum Answer {
    Text(&'static str),
    Confirm(bool),
    Select(usize),
}

/// Replays answers in order and records every prompt label.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: RefCell<VecDeque<Answer>>,
    pub labels: RefCell<Vec<String>>,
    pub rejections: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            ..Default::default()
        }
    }

    fn next(&self, label: &str) -> Answer {
        self.labels.borrow_mut().push(label.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for '{label}'"))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, label: &str, default: Option<&str>, validate: Validator) -> Result<String> {
        loop {
            let Answer::Text(raw) = self.next(label) else {
                panic!("expected a text answer for '{label}'");
            };
            let value = match (raw.trim(), default) {
                ("", Some(default)) => default.to_string(),
                (value, _) => value.to_string(),
            };
            match validate(&value) {
                Ok(()) if !value.is_empty() => return Ok(value),
                Ok(()) => self.rejections.borrow_mut().push("empty".to_string()),
                Err(e) => self.rejections.borrow_mut().push(e.to_string()),
            }
        }
    }

    fn confirm(&self, label: &str, _default: bool) -> Result<bool> {
        match self.next(label) {
            Answer::Confirm(value) => Ok(value),
            other => panic!("expected a confirm answer for '{label}', got {other:?}"),
        }
    }

    fn select(&self, label: &str, items: &[String], _default: usize) -> Result<usize> {
        match self.next(label) {
            Answer::Select(index) => {
                assert!(index < items.len(), "choice {index} out of range");
                Ok(index)
            }
            other => panic!("expected a select answer for '{label}', got {other:?}"),
        }
    }
}
