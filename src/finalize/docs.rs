//! Documentation rewrites: template-only marker sections and references to
//! the template's own initialization script.

use std::fs;

use serde_json::json;

use super::{edit_file, remove_lines, Context, Outcome};
use crate::constants::{CLAUDE_MD, MARKER_END, MARKER_START, README, RELEASE_WORKFLOW};
use crate::error::Result;
use crate::renderer::{DOCS_INDEX, GETTING_STARTED, LICENSE_HEADERS, PROJECT_BLURB};
use crate::substitution::replace_if_exists;

const PUBLISHING_DOC: &str = "docs/publishing.md";
const DOCS_INDEX_FILE: &str = "docs/index.md";
const TESTING_RULES: &str = ".claude/rules/testing.md";
const CODE_STYLE_RULES: &str = ".claude/rules/code-style.md";

const TEMPLATE_LICENSE_SENTENCE: &str = "Apache-2.0 license (configurable via init.py)";

const TEMPLATE_LICENSE_HEADERS: &str = "## License Headers

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
  generated by `init.py` based on the selected license.";

/// Replaces everything from the start marker line through the end marker
/// line with `replacement`. Text outside the markers is kept verbatim.
pub fn replace_marker_section(content: &str, replacement: &str) -> String {
    let replacement = replacement.trim_end_matches('\n');
    let mut result = Vec::new();
    let mut skipping = false;
    for line in content.split('\n') {
        if line.contains(MARKER_START) {
            skipping = true;
            result.push(replacement);
            continue;
        }
        if line.contains(MARKER_END) {
            skipping = false;
            continue;
        }
        if !skipping {
            result.push(line);
        }
    }
    result.join("\n")
}

pub(super) fn template_sections(ctx: &Context) -> Result<Outcome> {
    let id = &ctx.config.identity;
    let context = json!({
        "repo_path": id.repo_path,
        "kebab_name": id.kebab_name,
        "title_name": id.title_name,
        "description": ctx.config.description,
        "spdx": ctx.config.spdx_id(),
    });

    let getting_started = ctx.renderer.render(GETTING_STARTED, &context)?;
    edit_file(&ctx.root.join(README), |content| {
        replace_marker_section(content, &getting_started)
    })?;

    let blurb = ctx.renderer.render(PROJECT_BLURB, &context)?;
    edit_file(&ctx.root.join(CLAUDE_MD), |content| {
        replace_marker_section(content, &blurb)
    })?;
    Ok(Outcome::Clean)
}

fn is_init_diagram_line(line: &str) -> bool {
    (line.contains("init.sh") || line.contains("init.py"))
        && (line.contains("Interactive") || line.contains("initialization"))
}

/// Drops the `## Template Tests` section, up to the next `## ` heading.
fn strip_template_tests_section(content: &str) -> String {
    let mut result = Vec::new();
    let mut skipping = false;
    for line in content.split('\n') {
        if line.trim() == "## Template Tests" {
            skipping = true;
            continue;
        }
        if skipping && line.starts_with("## ") {
            skipping = false;
        }
        if !skipping {
            result.push(line);
        }
    }
    result.join("\n")
}

pub(super) fn init_references(ctx: &Context) -> Result<Outcome> {
    let root = ctx.root;
    let spdx = ctx.config.spdx_id();

    replace_if_exists(
        &root.join(PUBLISHING_DOC),
        "run `uv run --script ./scripts/init.py --pypi`,\n   or manually uncomment",
        "manually uncomment",
    )?;
    replace_if_exists(
        &root.join(RELEASE_WORKFLOW),
        "Run init.py with --pypi, or uncomment",
        "Uncomment",
    )?;

    let readme = root.join(README);
    replace_if_exists(
        &readme,
        "Run `uv run --script ./scripts/init.py --pypi` to enable publishing (or uncomment",
        "Uncomment",
    )?;
    replace_if_exists(
        &readme,
        "the `PYPI-START`/`PYPI-END` block in `release.yml` manually).",
        "the `PYPI-START`/`PYPI-END` block in `release.yml`.",
    )?;
    let claude_md = root.join(CLAUDE_MD);
    for doc in [&readme, &claude_md] {
        replace_if_exists(doc, TEMPLATE_LICENSE_SENTENCE, &format!("{spdx} license"))?;
        edit_file(doc, |content| remove_lines(content, is_init_diagram_line))?;
    }

    let id = &ctx.config.identity;
    let docs_index = root.join(DOCS_INDEX_FILE);
    if docs_index.is_file() {
        let index = ctx.renderer.render(
            DOCS_INDEX,
            &json!({
                "title_name": id.title_name,
                "description": ctx.config.description,
                "repo_path": id.repo_path,
                "kebab_name": id.kebab_name,
            }),
        )?;
        fs::write(&docs_index, index)?;
    }

    edit_file(&root.join(TESTING_RULES), strip_template_tests_section)?;

    let section = ctx.renderer.render(
        LICENSE_HEADERS,
        &json!({ "licensed": ctx.config.has_custom_license() }),
    )?;
    replace_if_exists(
        &root.join(CODE_STYLE_RULES),
        TEMPLATE_LICENSE_HEADERS,
        section.trim_end_matches('\n'),
    )?;

    ctx.output.step("Rewrote project documentation");
    Ok(Outcome::Clean)
}
