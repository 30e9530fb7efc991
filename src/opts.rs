use argh::FromArgs;
use log::LevelFilter;

use crate::config::Target;

/// Minimax coefficient generator for vectorized exp and tanh kernels.
#[derive(FromArgs)]
pub struct Opts {
    /// target functions to fit (exp-v1, exp-v2, tanh; default: all)
    #[argh(positional)]
    pub targets: Vec<Target>,

    /// logging level
    #[argh(option, long = "log", default = "LevelFilter::Warn")]
    pub log_level: LevelFilter,
}

impl Opts {
    /// Parse options from `env::args`.
    pub fn parse() -> Opts {
        argh::from_env()
    }
}
