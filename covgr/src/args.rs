use clap::Parser;

#[derive(Debug, Clone, Parser, Default)]
#[command(
    name = "covgr",
    version,
    about = "Runs go test under coverage and reports per-function coverage with uncovered line ranges."
)]
pub struct CovgrCli {
    /// List every function, including fully covered ones, and show full
    /// file paths.
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Echo the underlying go commands to stderr.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Package specs to test; defaults to the package in the current
    /// directory.
    pub packages: Vec<String>,

    /// Arguments after `--` are passed to `go test` unchanged.
    #[arg(last = true)]
    pub test_args: Vec<String>,
}

impl CovgrCli {
    pub fn packages_or_default(&self) -> Vec<String> {
        if self.packages.is_empty() {
            vec![".".to_string()]
        } else {
            self.packages.clone()
        }
    }
}

pub fn parse_args<I>(argv: I) -> Result<CovgrCli, clap::Error>
where
    I: IntoIterator<Item = String>,
{
    CovgrCli::try_parse_from(argv)
}
