mod check;
mod context;
mod generate;

pub use check::{run_check, run_check_impl};
pub use context::{Diagnostics, color_choice_to_mode, load_config};
pub use generate::{run_generate, run_generate_impl};
