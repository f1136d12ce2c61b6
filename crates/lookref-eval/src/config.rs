/// Knobs that change how the lookup & reference functions behave.
///
/// The defaults reproduce the host application's documented behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalConfig {
    /// Treat `*`, `?` and `~` in a text target as wildcards during exact
    /// matching.
    pub wildcards: bool,
    /// Share compiled wildcard patterns across calls.
    pub wildcard_cache: bool,
    /// Search mode for VLOOKUP/HLOOKUP when `range_lookup` is omitted.
    pub vlookup_approximate_default: bool,
    /// When set, relative R1C1 text without a current cell is `#REF!`.
    /// When cleared it resolves against `A1`.
    pub r1c1_relative_origin_required: bool,
}

impl EvalConfig {
    pub const DEFAULT: EvalConfig = EvalConfig {
        wildcards: true,
        wildcard_cache: true,
        vlookup_approximate_default: true,
        r1c1_relative_origin_required: true,
    };
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
