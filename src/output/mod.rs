mod report;
mod writer;

pub use report::{read_summaries, MarginRecovery};
pub use writer::write_summaries;
