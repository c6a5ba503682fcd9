use std::fs;

use regex::Regex;

use super::{Context, Outcome};
use crate::constants::{PYPI_END, PYPI_START, RELEASE_WORKFLOW};
use crate::error::Result;

/// Uncomments the lines between the PyPI markers and drops the markers.
///
/// One `# ` prefix is removed per line; lines left holding only `#` are dropped.
pub fn uncomment_pypi_block(content: &str) -> Result<String> {
    let bare_comment = Regex::new(r"^(\s*)#$")?;
    let commented = Regex::new(r"^(\s*)# ")?;

    let mut result = Vec::new();
    let mut inside = false;
    for line in content.split('\n') {
        if line.contains(PYPI_START) {
            inside = true;
            continue;
        }
        if line.contains(PYPI_END) {
            inside = false;
            continue;
        }
        if !inside {
            result.push(line.to_string());
        } else if !bare_comment.is_match(line) {
            result.push(commented.replace(line, "${1}").into_owned());
        }
    }
    Ok(result.join("\n"))
}

pub(super) fn enable_pypi(ctx: &Context) -> Result<Outcome> {
    if !ctx.config.enable_pypi {
        return Ok(Outcome::Clean);
    }
    let path = ctx.root.join(RELEASE_WORKFLOW);
    if !path.is_file() {
        return Ok(Outcome::Clean);
    }
    let content = fs::read_to_string(&path)?;
    fs::write(&path, uncomment_pypi_block(&content)?)?;
    ctx.output.step("Enabled PyPI publishing in release.yml");
    Ok(Outcome::Clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncomment_pypi_block() {
        let content = "steps:\n      # PYPI-START\n      # - name: Publish\n      #\n      #   run: uv publish\n      # PYPI-END\n      # keep me";
        assert_eq!(
            uncomment_pypi_block(content).unwrap(),
            "steps:\n      - name: Publish\n        run: uv publish\n      # keep me"
        );
    }
}
