use termcolor::ColorChoice;

/// The color configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum ColorConfig {
    /// Colorize if the output stream is a terminal.
    Auto,
    /// Always colorize the output.
    Always,
    /// Never colorize the output.
    Never,
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig::Auto
    }
}

impl ColorConfig {
    pub(crate) fn choice(self) -> ColorChoice {
        match self {
            ColorConfig::Auto => ColorChoice::Auto,
            ColorConfig::Always => ColorChoice::Always,
            ColorConfig::Never => ColorChoice::Never,
        }
    }
}

/// Settings of a test run.
///
/// Test binaries take no command line arguments, so this is the only
/// way to tune the output of a run.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Config {
    /// The coloring of the console output.
    pub color: ColorConfig,

    /// Whether passing checks are written to the diagnostic stream as well.
    pub verbose: bool,
}

impl Config {
    /// Specify the coloring of the console output.
    pub fn color(self, color: ColorConfig) -> Self {
        Self { color, ..self }
    }

    /// Specify whether passing checks are reported.
    pub fn verbose(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }
}
