mod errors;
mod runner;

pub use errors::PipelineError;
pub use runner::Pipeline;
