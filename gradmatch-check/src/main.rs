use gradmatch_check::logging::init_logging;
use gradmatch_check::report::write_report;
use gradmatch_check::{run, CheckConfig, CheckError};
use std::io::{self, Write};

fn main() -> Result<(), CheckError> {
    init_logging();
    let config = CheckConfig::default();
    let result = run(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&result, &mut out)?;
    out.flush()?;

    if !result.verification.all_match() {
        log::warn!("at least one gradient comparison failed");
    }
    Ok(())
}
