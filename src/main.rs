use std::io;
use std::process::ExitCode;

use strum::VariantArray;

use vmf_fit::config::Target;
use vmf_fit::opts::Opts;
use vmf_fit::{emit, fit};

fn main() -> ExitCode {
    let opts = Opts::parse();

    env_logger::Builder::new()
        .filter_level(opts.log_level)
        .init();

    let targets = if opts.targets.is_empty() {
        Target::VARIANTS
    } else {
        opts.targets.as_slice()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for &target in targets {
        let config = target.config();

        let result = match fit::fit(&config) {
            Ok(result) => result,
            Err(err) => {
                eprintln!("error: {target}: {err}");

                return ExitCode::FAILURE;
            }
        };

        if let Err(err) = emit::write_report(&mut out, &config, &result) {
            eprintln!("error: {err}");

            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
