use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::args::CovgrCli;
use crate::coverage::profile::read_profile;
use crate::coverage::report::render_report;
use crate::error::CovgrError;
use crate::gopkg;
use crate::gopkg::PackageIndex;
use crate::process;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Installs a SIGINT handler so an interrupt cannot kill the process
/// before the temp profile is removed. The `go test` child shares the
/// foreground process group and dies with the signal; the interrupted
/// run then takes the message-less exit-1 path.
pub fn install_interrupt_handler() -> Result<(), CovgrError> {
    ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst)).map_err(|e| {
        CovgrError::InterruptHandler {
            message: e.to_string(),
        }
    })
}

fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Entry point behind `main`: pre-flight the toolchain, canonicalize the
/// package specs, then run the covered test suite and render the report
/// into `out`.
pub fn run_with_cli(cli: &CovgrCli, out: &mut dyn Write) -> Result<(), CovgrError> {
    gopkg::ensure_go_available()?;
    let specs = cli.packages_or_default();
    let pkgs = gopkg::canonical_packages(&specs, cli.verbose)?;
    run_cover(&pkgs, &cli.test_args, cli.all, cli.verbose, out)
}

/// Runs `go test` under count-mode coverage into a temporary profile,
/// then renders the per-function report. The temp file is removed on
/// every path; a removal failure is only surfaced when nothing else went
/// wrong first.
pub fn run_cover(
    pkgs: &[String],
    extra_args: &[String],
    all: bool,
    verbose: bool,
    out: &mut dyn Write,
) -> Result<(), CovgrError> {
    let profile_path = tempfile::Builder::new()
        .prefix("covgr")
        .suffix(".cover")
        .tempfile()
        .map_err(|source| CovgrError::Io {
            path: std::env::temp_dir(),
            source,
        })?
        .into_temp_path();
    let display_path = profile_path.to_path_buf();

    let result = test_and_report(pkgs, extra_args, all, verbose, &profile_path, out);
    let cleanup = profile_path.close();
    let settled = settle_cleanup(result, cleanup, &display_path);
    // An interrupt needs no second message, whatever else happened.
    if interrupted() {
        return Err(CovgrError::Silent);
    }
    settled
}

pub(crate) fn settle_cleanup(
    result: Result<(), CovgrError>,
    cleanup: std::io::Result<()>,
    profile_path: &Path,
) -> Result<(), CovgrError> {
    match (result, cleanup) {
        (Err(err), _) => Err(err),
        (Ok(()), Err(source)) => Err(CovgrError::Io {
            path: profile_path.to_path_buf(),
            source,
        }),
        (Ok(()), Ok(())) => Ok(()),
    }
}

pub(crate) fn test_outcome(success: bool, interrupted: bool) -> Result<(), CovgrError> {
    if interrupted || !success {
        return Err(CovgrError::Silent);
    }
    Ok(())
}

fn test_and_report(
    pkgs: &[String],
    extra_args: &[String],
    all: bool,
    verbose: bool,
    profile_path: &Path,
    out: &mut dyn Write,
) -> Result<(), CovgrError> {
    let mut args: Vec<String> = vec![
        "test".to_string(),
        "-covermode=count".to_string(),
        "-coverprofile".to_string(),
        profile_path.display().to_string(),
    ];
    args.extend(extra_args.iter().cloned());
    args.extend(pkgs.iter().cloned());

    let output = process::go(&args, verbose)
        .unchecked()
        .run()
        .map_err(|source| CovgrError::Io {
            path: profile_path.to_path_buf(),
            source,
        })?;
    // A signal-killed child also reports an unsuccessful status.
    test_outcome(output.status.success(), interrupted())?;

    let profiles = read_profile(profile_path)?;
    let index = PackageIndex::from_profiles(&profiles, verbose)?;
    render_report(&profiles, &index, all, out)
}
