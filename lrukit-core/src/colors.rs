use crate::scenario::Outcome;

/// Dependency-injection seam for outcome color mapping.
///
/// Implement this trait to provide custom color themes (e.g. a
/// colour-blind-friendly palette).  The built-in implementation is
/// [`DefaultTheme`].
pub trait ColorTheme: Send + Sync {
    /// Terminal color name accepted by the `colored` crate (e.g. `"green"`).
    fn terminal_color(&self, outcome: Outcome) -> &'static str;
}

/// Green for passing steps, red for failing ones.
pub struct DefaultTheme;

impl ColorTheme for DefaultTheme {
    fn terminal_color(&self, outcome: Outcome) -> &'static str {
        match outcome {
            Outcome::Pass => "green",
            Outcome::Fail => "red",
        }
    }
}

impl Outcome {
    /// Terminal color name for use with the `colored` crate (delegates to [`DefaultTheme`]).
    pub fn terminal_color(self) -> &'static str {
        DefaultTheme.terminal_color(self)
    }
}
