use std::io::Write;

/// The process environment a command runs against.
///
/// Commands never touch stdout, stderr or the exit status directly, so the whole CLI can be
/// driven from tests.
pub trait Host: Send + Sync {
    /// Sink for reports and informational messages.
    fn output(&mut self) -> impl Write;

    /// Sink for usage errors and diagnostics.
    fn error(&mut self) -> impl Write;

    /// End the run with `code`. Hosts that are not a real process may record the code and return.
    fn exit(&mut self, code: i32);
}

#[cfg(test)]
pub struct TestHost {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub const fn new() -> Self {
        Self {
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: None,
        }
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.stdout
    }

    fn error(&mut self) -> impl Write {
        &mut self.stderr
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
