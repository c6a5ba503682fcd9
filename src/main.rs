//! pypkgkit's main application entry point.
//! Parses the command line, wires the real network, subprocess and prompt
//! implementations into the scaffolder and maps the outcome to an exit code.

use std::io::IsTerminal;

use pypkgkit::{
    cli::{get_args, NewArgs},
    error::{default_error_handler, Error, Result},
    fetcher::GitHubReleases,
    license::GitHubLicenses,
    logger::init_logger,
    output::Output,
    prompt::{DialoguerPrompter, Prompter},
    runner::SystemRunner,
    scaffold::{print_summary, scaffold, Services},
    settings::Settings,
};

/// Main application entry point.
fn main() {
    let (args, verbose) = get_args();
    init_logger(verbose);

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => default_error_handler(err, false),
    };

    if let Err(e) = ctrlc::set_handler(|| std::process::exit(Error::Interrupted.exit_code())) {
        log::warn!("Could not install the interrupt handler: {e}");
    }

    match run(args, &settings) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => default_error_handler(err, settings.debug),
    }
}

/// Runs `pypkgkit new`.
///
/// # Returns
/// * `Result<bool>` - Whether the project was created without warnings
fn run(args: NewArgs, settings: &Settings) -> Result<bool> {
    let output = Output::new(settings.color);
    output.welcome(env!("CARGO_PKG_VERSION"));

    let request = args.into_request();
    let interactive = request.inputs.needs_prompts() && std::io::stdin().is_terminal();
    let prompter = DialoguerPrompter;

    let releases = GitHubReleases::new(settings);
    let licenses = GitHubLicenses::new(settings);
    let services = Services {
        releases: &releases,
        licenses: &licenses,
        runner: &SystemRunner,
        prompter: interactive.then_some(&prompter as &dyn Prompter),
        output: &output,
    };

    let report = scaffold(&request, &services)?;
    print_summary(&report, &output);
    Ok(report.is_clean())
}
