//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including per-field details.
    Verbose,
    /// Show headers, status and results.
    #[default]
    Normal,
    /// Show results only.
    Quiet,
    /// Show nothing except errors and machine-readable output.
    Silent,
}

impl OutputMode {
    /// Mode selected by `--verbose` and the number of `--quiet` flags.
    /// Quiet wins over verbose.
    pub fn from_flags(verbose: bool, quiet: u8) -> Self {
        match quiet {
            0 if verbose => Self::Verbose,
            0 => Self::Normal,
            1 => Self::Quiet,
            _ => Self::Silent,
        }
    }

    /// Check if this mode shows headers and field listings.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
