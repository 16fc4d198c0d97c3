use duct::cmd as duct_cmd;

/// Builds a `go` invocation, echoing it to stderr in verbose mode. The
/// returned expression inherits stdio by default, so test output streams
/// through to the terminal as it is produced; callers capture stdout
/// only where it must be parsed.
pub fn go(args: &[String], verbose: bool) -> duct::Expression {
    if verbose {
        eprintln!("covgr: go {}", args.join(" "));
    }
    duct_cmd("go", args.iter().map(String::as_str))
}
