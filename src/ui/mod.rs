//! Console output with CI fallback
//!
//! `cliclack` intro/outro/step formatting in interactive terminals,
//! plain prefixed lines everywhere else. The copy phase gets an
//! `indicatif` progress bar in interactive mode.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{
    intro, note, outro_error, outro_success, pause, remark, step_info, step_ok, step_warn,
};
pub use progress::CopyProgress;
