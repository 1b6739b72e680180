// Application Layer - Pipeline, probe harness and the standard checks

pub mod checks;
pub mod constants;
pub mod pipeline;
pub mod probe;

// Re-exports
pub use checks::standard_plan;
pub use pipeline::{
    check_fn, Check, CheckDefinition, CheckEnv, CheckOutcome, CheckPlan, PipelineExecutor,
    PipelineSettings, RunContext,
};
pub use probe::{ProbeHarness, ProbeOutcome, ProbeSession};
