//! Shell configuration.

/// Default interactive prompt.
pub const DEFAULT_PROMPT: &str = "> ";

/// Configuration for a shell session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Prompt written before each line is read.
    pub prompt: String,

    /// Whether to write the prompt at all.
    pub show_prompt: bool,

    /// Whether the first failed command ends the session.
    pub stop_on_error: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            show_prompt: true,
            stop_on_error: false,
        }
    }
}

impl ShellConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for running a script: no prompt, stop on first error.
    #[must_use]
    pub fn script() -> Self {
        Self::new().show_prompt(false).stop_on_error(true)
    }

    /// Sets the prompt text.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets whether the prompt is written.
    #[must_use]
    pub fn show_prompt(mut self, value: bool) -> Self {
        self.show_prompt = value;
        self
    }

    /// Sets whether the first failed command ends the session.
    #[must_use]
    pub fn stop_on_error(mut self, value: bool) -> Self {
        self.stop_on_error = value;
        self
    }
}
