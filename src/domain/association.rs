//! Platform/region associations and the line format they are parsed from.
//!
//! Each non-empty line has the form `<platform name>:<region>[,<region>...]`,
//! e.g. `VKontakte:/ru,/ua,/by,/kz`. Regions may carry one leading `/`.

use thiserror::Error;
use tracing::{instrument, trace};

/// Character separating the platform name from its region list.
pub const NAME_SEPARATOR: char = ':';

/// Character separating regions within one line.
pub const REGION_SEPARATOR: char = ',';

/// Optional leading character of a region token (`/ru`).
pub const PATH_SEPARATOR: char = '/';

/// A single (platform, region) pair extracted from input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Association {
    pub platform_name: String,
    /// Normalized region key (no leading `/`)
    pub region: String,
}

impl Association {
    pub fn new(platform_name: impl Into<String>, region: impl AsRef<str>) -> Self {
        Self {
            platform_name: platform_name.into(),
            region: normalize_region(region.as_ref()).to_string(),
        }
    }
}

/// Non-fatal anomaly found while parsing. The offending line or token is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    #[error("line {line_number}: missing ':' separator: {line}")]
    MissingSeparator { line_number: usize, line: String },

    #[error("line {line_number}: empty platform name: {line}")]
    EmptyPlatformName { line_number: usize, line: String },

    #[error("line {line_number}: empty region for platform {platform_name}")]
    EmptyRegion {
        line_number: usize,
        platform_name: String,
    },
}

/// Result of parsing a whole input document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    /// Associations in line order, then token order within each line
    pub associations: Vec<Association>,
    pub warnings: Vec<ParseWarning>,
}

/// Strip surrounding whitespace and a single leading `/` from a region key.
///
/// `/ru` → `ru`, ` ru ` → `ru`. Inner separators are kept (`ru/msk` stays as is).
pub fn normalize_region(path: &str) -> &str {
    let trimmed = path.trim();
    trimmed.strip_prefix(PATH_SEPARATOR).unwrap_or(trimmed)
}

/// Parse platform lists into an ordered association sequence.
///
/// Blank lines are skipped silently; malformed lines and empty tokens are
/// skipped and reported in [`ParsedInput::warnings`].
#[instrument(level = "debug", skip(content))]
pub fn parse_associations(content: &str) -> ParsedInput {
    let mut parsed = ParsedInput::default();

    for (idx, raw_line) in content.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            continue;
        }

        let Some((name, regions)) = line.split_once(NAME_SEPARATOR) else {
            parsed.warnings.push(ParseWarning::MissingSeparator {
                line_number,
                line: line.to_string(),
            });
            continue;
        };

        let platform_name = name.trim();
        if platform_name.is_empty() {
            parsed.warnings.push(ParseWarning::EmptyPlatformName {
                line_number,
                line: line.to_string(),
            });
            continue;
        }

        for token in regions.split(REGION_SEPARATOR) {
            let region = normalize_region(token);
            if region.is_empty() {
                parsed.warnings.push(ParseWarning::EmptyRegion {
                    line_number,
                    platform_name: platform_name.to_string(),
                });
                continue;
            }
            trace!(platform_name, region, "association");
            parsed.associations.push(Association {
                platform_name: platform_name.to_string(),
                region: region.to_string(),
            });
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/ru", "ru")]
    #[case("ru", "ru")]
    #[case("  /ua ", "ua")]
    #[case("//ru", "/ru")]
    #[case("/ru/msk", "ru/msk")]
    #[case("/", "")]
    fn test_normalize_region(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_region(input), expected);
    }

    #[test]
    fn test_association_new_normalizes_region() {
        let association = Association::new("Google Ads", "/com");
        assert_eq!(association.platform_name, "Google Ads");
        assert_eq!(association.region, "com");
    }

    #[test]
    fn test_parse_keeps_colons_after_first_in_regions() {
        let parsed = parse_associations("Ads:/a:b");
        assert_eq!(parsed.associations, vec![Association::new("Ads", "a:b")]);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_parse_accepts_crlf_line_endings() {
        let parsed = parse_associations("A:/ru\r\nB:/ua\r\n");
        assert_eq!(
            parsed.associations,
            vec![Association::new("A", "ru"), Association::new("B", "ua")]
        );
    }

    #[test]
    fn test_warning_display_names_line() {
        let warning = ParseWarning::MissingSeparator {
            line_number: 3,
            line: "garbage".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "line 3: missing ':' separator: garbage"
        );
    }
}
