//! Output configuration types

use termcolor::ColorChoice;

/// Configuration for output formatting.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Colorize names and the header line
    pub use_color: bool,
}

impl OutputConfig {
    /// Color choice for a `termcolor` stream.
    ///
    /// Terminal detection has already happened by the time this is built, so
    /// the stream is told exactly what to do instead of sniffing again.
    pub fn color_choice(&self) -> ColorChoice {
        if self.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        }
    }
}
