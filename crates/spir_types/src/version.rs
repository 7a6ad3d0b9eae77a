use std::str::FromStr;

/// Defines the SPIR version which signatures are mangled for.
///
/// The version only decides which type kinds can be encoded at all; the
/// encoding of supported types is identical across versions.
#[derive(Hash, Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpirVersion {
    /// SPIR 1.2, matching OpenCL C 1.2.
    Spir12,

    /// SPIR 2.0, matching OpenCL C 2.0.
    #[default]
    Spir20,
}

impl SpirVersion {
    /// All known versions, from oldest to newest.
    pub const ALL: [SpirVersion; 2] = [SpirVersion::Spir12, SpirVersion::Spir20];

    /// Gets the display string of the version, as used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            SpirVersion::Spir12 => "SPIR 1.2",
            SpirVersion::Spir20 => "SPIR 2.0",
        }
    }

    /// Determines whether this version is able to encode something which
    /// was introduced in `required`.
    #[inline]
    pub fn supports(self, required: SpirVersion) -> bool {
        self >= required
    }
}

impl std::fmt::Display for SpirVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpirVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_prefix("SPIR")
            .or_else(|| trimmed.strip_prefix("spir"))
            .unwrap_or(trimmed)
            .trim();

        match trimmed {
            "1.2" | "12" => Ok(SpirVersion::Spir12),
            "2.0" | "20" => Ok(SpirVersion::Spir20),
            _ => Err(format!("unknown SPIR version `{s}`, expected `1.2` or `2.0`")),
        }
    }
}
