//! CLI command handlers, one file per command.

mod completions;
mod nav;
mod normalize;
mod page;
mod submit;

pub use completions::run_completions;
pub use nav::run_nav;
pub use normalize::{run_normalize_url, run_parse_list};
pub use page::run_page;
pub use submit::{run_submit, LeadArgs};
