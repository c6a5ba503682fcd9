//! Clack-style progress output.
//!
//! Whether colours are used is decided once, when the [`Output`] is built,
//! and never looked up again.

use console::Style;

const BAR: &str = "\u{2502}";
const BAR_START: &str = "\u{250c}";
const BAR_END: &str = "\u{2514}";
const BAR_T: &str = "\u{251c}";
const RULE: &str = "\u{2500}";
const CHECK: &str = "\u{2714}";
const CROSS: &str = "\u{2716}";
const WARNING: &str = "\u{25b2}";

/// Writes user-facing progress lines.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    color: bool,
}

impl Output {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn style(&self) -> Style {
        Style::new().force_styling(self.color)
    }

    fn dim(&self, text: &str) -> String {
        self.style().dim().apply_to(text).to_string()
    }

    /// Prints the welcome banner.
    pub fn welcome(&self, version: &str) {
        println!();
        println!("  {}", self.style().bold().apply_to(format!("pypkgkit v{version}")));
        println!(
            "  {}",
            self.dim("Create a production-ready Python package in seconds.")
        );
        println!();
    }

    /// `┌  text`
    pub fn intro(&self, text: &str) {
        println!("{}  {}", self.dim(BAR_START), self.style().bold().apply_to(text));
        self.bar();
    }

    /// `└  text`
    pub fn outro(&self, text: &str) {
        println!("{}  {}", self.dim(BAR_END), self.style().green().apply_to(text));
    }

    pub fn bar(&self) {
        println!("{}", self.dim(BAR));
    }

    pub fn divider(&self) {
        println!("{}{}", self.dim(BAR_T), self.dim(&RULE.repeat(36)));
    }

    pub fn field(&self, label: &str, value: &str) {
        println!(
            "{}  {:<16}{}",
            self.dim(BAR),
            format!("{label}:"),
            self.style().cyan().apply_to(value)
        );
    }

    pub fn step(&self, text: &str) {
        println!("{}  {} {text}", self.dim(BAR), self.style().green().apply_to(CHECK));
    }

    pub fn warning(&self, text: &str) {
        let yellow = self.style().yellow();
        println!("{}  {} {}", self.dim(BAR), yellow.apply_to(WARNING), yellow.apply_to(text));
    }

    /// Error lines go to stderr.
    pub fn error(&self, text: &str) {
        let red = self.style().red();
        eprintln!("{}  {} {}", self.dim(BAR), red.apply_to(CROSS), red.apply_to(text));
    }

    pub fn next_steps(&self, items: &[String]) {
        println!();
        println!("   {}", self.style().bold().apply_to("Next steps"));
        for (i, item) in items.iter().enumerate() {
            println!("   {} {item}", self.dim(&format!("{}.", i + 1)));
        }
        println!();
    }
}
