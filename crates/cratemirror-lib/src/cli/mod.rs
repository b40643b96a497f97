mod args;
mod mirror;
mod params;
mod resolved_command;

pub use args::{Args, MirrorCommand, parse_args};
pub use mirror::run_mirror;
pub use params::MirrorParams;
pub use resolved_command::{DEFAULT_OUTPUT_DIR, DEFAULT_REGISTRY, resolve_command};
