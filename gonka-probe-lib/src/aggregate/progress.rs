/// A trait for reporting the progress of an aggregation run.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Fetching", "Extracting").
    fn set_phase(&self, phase: &str);

    /// Report that the fetch of `source` finished, `completed` of `total` so far.
    fn source_finished(&self, completed: u64, total: u64, source: &str);

    /// Finish and clear the progress indicator.
    fn done(&self);
}
