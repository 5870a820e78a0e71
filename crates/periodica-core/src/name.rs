//! Display-name parsing: vendor prefix + canonical short name.

use regex::Regex;
use std::sync::OnceLock;

/// Fallback vendor qualifier when the display name carries none.
pub const DEFAULT_PREFIX: &str = "AWS";

/// A display name split into its vendor qualifier and canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub prefix: String,
    pub name: String,
}

static VENDOR_RE: OnceLock<Regex> = OnceLock::new();

/// Split a raw display name into `(prefix, clean name)`.
///
/// Strips one leading `AWS`/`Amazon` token (defaulting the prefix to
/// `AWS`), truncates at the first `(` to drop qualifiers like
/// `"(Preview)"`, and trims. Total: inputs it cannot improve come back
/// as-is.
pub fn parse(raw: &str) -> ParsedName {
    let re = VENDOR_RE.get_or_init(|| Regex::new(r"^(AWS|Amazon)?\s*(.*)$").unwrap());

    let (prefix, rest) = match re.captures(raw) {
        Some(caps) => {
            let prefix = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PREFIX);
            let rest = caps.get(2).map(|m| m.as_str()).unwrap_or(raw);
            (prefix, rest)
        }
        // `(.*)` always matches a single line; multi-line garbage falls
        // back to the raw string with the default prefix.
        None => (DEFAULT_PREFIX, raw),
    };

    let name = rest.split('(').next().unwrap_or(rest).trim();

    ParsedName {
        prefix: prefix.to_string(),
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_amazon_prefix_and_parenthetical() {
        let p = parse("Amazon Elastic Compute Cloud (EC2)");
        assert_eq!(p.prefix, "Amazon");
        assert_eq!(p.name, "Elastic Compute Cloud");
    }

    #[test]
    fn splits_aws_prefix() {
        let p = parse("AWS Lambda");
        assert_eq!(p.prefix, "AWS");
        assert_eq!(p.name, "Lambda");
    }

    #[test]
    fn defaults_prefix_when_absent() {
        let p = parse("Elastic Load Balancing");
        assert_eq!(p.prefix, "AWS");
        assert_eq!(p.name, "Elastic Load Balancing");
    }

    #[test]
    fn prefix_without_space_still_strips() {
        let p = parse("AWSThinkbox Deadline");
        assert_eq!(p.prefix, "AWS");
        assert_eq!(p.name, "Thinkbox Deadline");
    }

    #[test]
    fn empty_input_yields_empty_name() {
        let p = parse("");
        assert_eq!(p.prefix, "AWS");
        assert_eq!(p.name, "");
    }

    #[test]
    fn bare_vendor_token_yields_empty_name() {
        let p = parse("Amazon");
        assert_eq!(p.prefix, "Amazon");
        assert_eq!(p.name, "");
    }

    #[test]
    fn only_parenthetical_yields_empty_name() {
        let p = parse("(Preview)");
        assert_eq!(p.prefix, "AWS");
        assert_eq!(p.name, "");
    }
}
