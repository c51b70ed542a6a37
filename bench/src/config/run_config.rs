use json_value::impl_json;

/// Scenario parameters for one harness run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Seed for the document generator; equal seeds give equal documents.
    pub seed: u64,
    /// Number of random documents generated per run.
    pub documents: usize,
    /// Maximum container nesting inside a generated document.
    pub max_depth: usize,
    /// Maximum number of elements or members per generated container.
    pub max_width: usize,
    /// Depth of the nested array fed to the iterative parser.
    pub nesting_depth: usize,
    /// Length in bytes of the long float literal.
    pub float_literal_bytes: usize,
    /// Passes over the document set when measuring throughput.
    pub throughput_rounds: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            seed: 20240611,
            documents: 200,
            max_depth: 6,
            max_width: 8,
            nesting_depth: 100_000,
            float_literal_bytes: 1 << 20,
            throughput_rounds: 5,
        }
    }
}

impl_json! {
    RunConfig {
        seed: u64,
        documents: usize,
        max_depth: usize,
        max_width: usize,
        nesting_depth: usize,
        float_literal_bytes: usize,
        throughput_rounds: usize,
    }
}
