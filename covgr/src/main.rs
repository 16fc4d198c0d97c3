use covgr::error::CovgrError;

fn main() {
    let cli = match covgr::args::parse_args(std::env::args()) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    if let Err(err) = covgr::run::install_interrupt_handler() {
        eprintln!("covgr: {err}");
        std::process::exit(1);
    }

    let mut stdout = std::io::stdout().lock();
    match covgr::run::run_with_cli(&cli, &mut stdout) {
        Ok(()) => {}
        Err(CovgrError::Silent) => std::process::exit(1),
        Err(err) => {
            eprintln!("covgr: {err}");
            std::process::exit(1);
        }
    }
}
