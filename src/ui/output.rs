//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Progress plus each replaced key.
    Verbose,
    /// Progress and status.
    #[default]
    Normal,
    /// Only per-file results, warnings and errors.
    Quiet,
}

impl OutputMode {
    /// Pick the mode from the `--quiet` and `--verbose` flags. Quiet wins.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows progress lines and banners.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_from_flags() {
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Normal);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(true, false), OutputMode::Quiet);
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Quiet);
    }

    #[test]
    fn output_mode_shows_progress() {
        assert!(OutputMode::Verbose.shows_progress());
        assert!(OutputMode::Normal.shows_progress());
        assert!(!OutputMode::Quiet.shows_progress());
    }

    #[test]
    fn output_mode_default() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }
}
