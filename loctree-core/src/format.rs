//! The closed set of supported file formats.
//!
//! Decode/encode behavior lives in `loctree-codecs`; this module only knows
//! how formats relate to file extensions and CLI strings.

use std::fmt;
use std::str::FromStr;

/// A supported translation file format.
///
/// `Json` and `Flat` share the `.json` extension: `Json` round-trips nested
/// objects through dotted keys, `Flat` produces a single-level object with
/// dotted keys kept literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Flat,
    Yaml,
    Csv,
}

impl Format {
    pub const ALL: &'static [Format] = &[Format::Json, Format::Flat, Format::Yaml, Format::Csv];

    /// Canonical file extension, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json | Format::Flat => ".json",
            Format::Yaml => ".yaml",
            Format::Csv => ".csv",
        }
    }

    /// Formats a file with the given extension (dot included) may hold.
    /// Unrecognized extensions map to an empty slice.
    pub fn for_extension(ext: &str) -> &'static [Format] {
        match ext {
            ".json" => &[Format::Json, Format::Flat],
            ".yaml" | ".yml" => &[Format::Yaml],
            ".csv" => &[Format::Csv],
            _ => &[],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Flat => "flat",
            Format::Yaml => "yaml",
            Format::Csv => "csv",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "flat" => Ok(Format::Flat),
            "yaml" | "yml" => Ok(Format::Yaml),
            "csv" => Ok(Format::Csv),
            other => Err(format!(
                "{other} is not a valid format! expected: json, flat, yaml, csv"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_roundtrip() {
        for format in Format::ALL {
            assert!(
                Format::for_extension(format.extension()).contains(format),
                "{format} must be reachable from its own extension"
            );
        }
    }

    #[test]
    fn json_extension_covers_both_json_formats() {
        assert_eq!(Format::for_extension(".json"), &[Format::Json, Format::Flat]);
    }

    #[test]
    fn unknown_extension_is_empty() {
        assert!(Format::for_extension(".po").is_empty());
        assert!(Format::for_extension("").is_empty());
    }

    #[test]
    fn parse_known_and_unknown() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("YAML".parse::<Format>().unwrap(), Format::Yaml);
        let err = "gettext".parse::<Format>().unwrap_err();
        assert!(err.contains("is not a valid format"));
    }
}
