//! Package and file resolution through the Go toolchain.
//!
//! Profile entries name files by import path (`example.com/pkg/file.go`),
//! not by filesystem location. `go list -e -json` over the distinct
//! package directories yields the import-path -> on-disk-directory map
//! needed to read the sources back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::coverage::model::{FuncExtent, Profile};
use crate::coverage::report::FuncResolver;
use crate::error::CovgrError;
use crate::gosrc;
use crate::process;

pub fn ensure_go_available() -> Result<(), CovgrError> {
    which::which("go").map(|_| ()).map_err(|_| CovgrError::GoMissing)
}

/// Canonicalizes user-supplied package specs via
/// `go list -f '{{.ImportPath}}'`, sorted. An empty result (or a failed
/// listing) is a user-facing error raised before any test run starts;
/// go's own diagnostics have already reached stderr.
pub fn canonical_packages(specs: &[String], verbose: bool) -> Result<Vec<String>, CovgrError> {
    let mut args: Vec<String> = vec![
        "list".to_string(),
        "-f".to_string(),
        "{{.ImportPath}}".to_string(),
    ];
    args.extend(specs.iter().cloned());
    let out = process::go(&args, verbose)
        .stdout_capture()
        .unchecked()
        .run()
        .map_err(|source| CovgrError::Io {
            path: PathBuf::from("go"),
            source,
        })?;
    if !out.status.success() {
        return Err(CovgrError::InvalidPackages);
    }
    let mut pkgs: Vec<String> = String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    if pkgs.is_empty() {
        return Err(CovgrError::InvalidPackages);
    }
    pkgs.sort();
    Ok(pkgs)
}

#[derive(Debug, Deserialize)]
struct GoListPackage {
    #[serde(rename = "Dir", default)]
    dir: String,
    #[serde(rename = "ImportPath", default)]
    import_path: String,
    #[serde(rename = "Error", default)]
    error: Option<GoListError>,
}

#[derive(Debug, Deserialize)]
struct GoListError {
    #[serde(rename = "Err", default)]
    err: String,
}

/// Import-path directory -> on-disk directory, built once per run.
#[derive(Debug, Default)]
pub struct PackageIndex {
    dirs: BTreeMap<String, PathBuf>,
}

impl PackageIndex {
    /// Collects the distinct import-path directories named by the
    /// profiles and resolves them in a single `go list` call. Entries
    /// that already exist on disk (absolute or relative paths) need no
    /// resolution and are skipped.
    pub fn from_profiles(profiles: &[Profile], verbose: bool) -> Result<Self, CovgrError> {
        let mut wanted: Vec<String> = vec![];
        for profile in profiles {
            let name = profile.file_name.as_str();
            if Path::new(name).is_absolute()
                || name.starts_with('.')
                || std::fs::metadata(name).is_ok()
            {
                continue;
            }
            let Some((dir, _)) = name.rsplit_once('/') else {
                continue;
            };
            if !wanted.iter().any(|d| d == dir) {
                wanted.push(dir.to_string());
            }
        }
        let mut dirs = BTreeMap::new();
        if wanted.is_empty() {
            return Ok(PackageIndex { dirs });
        }

        let mut args: Vec<String> =
            vec!["list".to_string(), "-e".to_string(), "-json".to_string()];
        args.extend(wanted);
        let out = process::go(&args, verbose)
            .stdout_capture()
            .unchecked()
            .run()
            .map_err(|source| CovgrError::Io {
                path: PathBuf::from("go"),
                source,
            })?;
        if !out.status.success() {
            return Err(CovgrError::GoListFailed {
                message: format!("exit status {}", out.status.code().unwrap_or(-1)),
            });
        }
        for record in serde_json::Deserializer::from_slice(&out.stdout).into_iter::<GoListPackage>()
        {
            let pkg = record.map_err(|e| CovgrError::GoListFailed {
                message: e.to_string(),
            })?;
            // Broken packages (-e keeps them in the listing) surface
            // later as missing files, with the file name for context.
            if let Some(err) = &pkg.error {
                if verbose {
                    eprintln!("covgr: go list: {}: {}", pkg.import_path, err.err);
                }
                continue;
            }
            if pkg.import_path.is_empty() || pkg.dir.is_empty() {
                continue;
            }
            dirs.insert(pkg.import_path, PathBuf::from(pkg.dir));
        }
        Ok(PackageIndex { dirs })
    }

    /// Maps a profile file name to a readable path: as-is when it exists
    /// on disk, otherwise through the package directory map.
    pub fn find_file(&self, file_name: &str) -> Result<PathBuf, CovgrError> {
        let direct = Path::new(file_name);
        if std::fs::metadata(direct).is_ok() {
            return Ok(direct.to_path_buf());
        }
        let resolved = file_name
            .rsplit_once('/')
            .and_then(|(dir, base)| self.dirs.get(dir).map(|root| root.join(base)));
        resolved.ok_or_else(|| CovgrError::MissingFile {
            file: file_name.to_string(),
        })
    }
}

impl FuncResolver for PackageIndex {
    fn resolve(&self, file_name: &str) -> Result<Vec<FuncExtent>, CovgrError> {
        let path = self.find_file(file_name)?;
        gosrc::find_funcs(&path)
    }
}
