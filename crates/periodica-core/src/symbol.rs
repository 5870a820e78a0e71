//! Symbol allocation: short, unique, element-style display codes.
//!
//! Policy, in order:
//! 1. curated reserved overrides (names whose generated symbol would be
//!    poor or ambiguous),
//! 2. a two-letter candidate generated from the name's word pool
//!    (initials first, then word tails, favoring `He`-style symbols whose
//!    first letter is an initial),
//! 3. a single-letter / suffixed fallback for names yielding too few
//!    usable characters.
//!
//! Allocation order matters: earlier names get the shorter, more natural
//! symbols. The registry is run-scoped state threaded through one pipeline
//! invocation.

use crate::report::Diagnostic;
use std::collections::HashMap;

/// Curated overrides: symbol → canonical name. Single-letter, numeric and
/// three-letter symbols live here because the generator would never (or
/// badly) produce them.
pub const RESERVED_SYMBOLS: &[(&str, &str)] = &[
    ("Mx", "Apache MXNet on AWS"),
    ("Tf", "TensorFlow on AWS"),
    ("Eks", "Elastic Container Service for Kubernetes"),
    ("Ecs", "Elastic Container Service"),
    ("Db", "DocumentDB"),
    ("53", "Route 53"),
    ("X", "X-Ray"),
    ("Ami", "Deep Learning AMIs"),
    ("Phd", "Personal Health Dashboard"),
    ("Cs", "CloudSearch"),
    ("L", "Lambda"),
    ("S3", "Simple Storage Service"),
    ("A", "Athena"),
    ("Vpc", "VPC"),
    ("Ec2", "EC2"),
    ("C9", "Cloud9"),
    ("Gt", "SageMaker Ground Truth"),
    ("Sns", "Simple Notification Service"),
    ("Sqs", "Simple Queue Service"),
    ("Hsm", "CloudHSM"),
    ("Ebs", "Elastic Block Store"),
    ("Cli", "Command Line Interface"),
    ("Cf", "CloudFront"),
    ("Cm", "Cloud Map"),
    ("Gl", "S3 Glacier"),
    ("Sdk", "Tools and SDKs"),
    ("Lx", "Lex"),
    ("M", "Macie"),
    ("K", "Managed Streaming for Kafka"),
    ("Emr", "EMR"),
    ("F", "Fargate"),
];

/// Suffix sequence for the single-letter fallback: `a`–`z`, `A`–`Z`, `1`–`3`.
fn fallback_suffixes() -> impl Iterator<Item = char> {
    ('a'..='z').chain('A'..='Z').chain('1'..='3')
}

/// Run-scoped symbol registry: `symbol → name` plus the reverse map.
#[derive(Debug, Clone, Default)]
pub struct SymbolRegistry {
    by_symbol: HashMap<String, String>,
    by_name: HashMap<String, String>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbol already allocated for `name`, if any.
    pub fn symbol_for(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Name holding `symbol`, if any.
    pub fn holder_of(&self, symbol: &str) -> Option<&str> {
        self.by_symbol.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    /// Allocate a unique symbol for `name`, reserving it in the registry.
    ///
    /// Re-allocating a name returns its existing symbol. Returns the empty
    /// string only when the candidate pool is empty and every fallback is
    /// taken; that case is always recorded in `diagnostics`.
    pub fn allocate(&mut self, name: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
        if let Some(existing) = self.by_name.get(name) {
            return existing.clone();
        }

        if let Some(reserved) = reserved_symbol(name) {
            match self.by_symbol.get(reserved) {
                None => {
                    self.reserve(reserved.to_string(), name);
                    return reserved.to_string();
                }
                Some(held_by) => {
                    // First-seen keeps the reserved symbol; this claimant
                    // falls through to generated allocation.
                    diagnostics.push(Diagnostic::ReservedCollision {
                        name: name.to_string(),
                        symbol: reserved.to_string(),
                        held_by: held_by.clone(),
                    });
                }
            }
        }

        let pool = candidate_pool(name);

        // Primary: first char from the pool (upper) + any later pool char
        // (lower), first free pair wins.
        for (i, first) in pool.iter().enumerate() {
            let first = first.to_ascii_uppercase();
            for second in &pool[i + 1..] {
                let candidate = format!("{}{}", first, second.to_ascii_lowercase());
                if !self.by_symbol.contains_key(&candidate) {
                    self.reserve(candidate.clone(), name);
                    return candidate;
                }
            }
        }

        // Fallback for names yielding 0–1 usable characters.
        if let Some(&first) = pool.first() {
            let single = first.to_ascii_uppercase().to_string();
            if !self.by_symbol.contains_key(&single) {
                self.reserve(single.clone(), name);
                return single;
            }
            for suffix in fallback_suffixes() {
                let candidate = format!("{single}{suffix}");
                if !self.by_symbol.contains_key(&candidate) {
                    self.reserve(candidate.clone(), name);
                    return candidate;
                }
            }
        }

        diagnostics.push(Diagnostic::SymbolExhausted {
            name: name.to_string(),
        });
        String::new()
    }

    fn reserve(&mut self, symbol: String, name: &str) {
        self.by_name.insert(name.to_string(), symbol.clone());
        self.by_symbol.insert(symbol, name.to_string());
    }
}

/// Reserved symbol for `name`, if the override table has one.
fn reserved_symbol(name: &str) -> Option<&'static str> {
    RESERVED_SYMBOLS
        .iter()
        .find(|(_, reserved_name)| *reserved_name == name)
        .map(|(symbol, _)| *symbol)
}

/// Build the candidate character pool: strip decorative punctuation, split
/// on spaces, drop filler words (entirely lowercase), then take every
/// word's first character followed by every word's tail characters.
fn candidate_pool(name: &str) -> Vec<char> {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '&' | ',' | '-' | '/' | '.'))
        .collect();

    let words: Vec<&str> = cleaned
        .split(' ')
        .filter(|w| !w.is_empty() && !is_filler(w))
        .collect();

    let mut pool: Vec<char> = words.iter().filter_map(|w| w.chars().next()).collect();
    for word in &words {
        pool.extend(word.chars().skip(1));
    }
    pool
}

/// A filler word has at least one cased character and no uppercase ones
/// ("for", "on"). All-digit tokens like "53" are not fillers.
fn is_filler(word: &str) -> bool {
    let mut has_lower = false;
    for c in word.chars() {
        if c.is_uppercase() {
            return false;
        }
        if c.is_lowercase() {
            has_lower = true;
        }
    }
    has_lower
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocate(registry: &mut SymbolRegistry, name: &str) -> String {
        let mut diagnostics = Vec::new();
        let symbol = registry.allocate(name, &mut diagnostics);
        assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");
        symbol
    }

    #[test]
    fn reserved_names_use_their_override() {
        let mut registry = SymbolRegistry::new();
        assert_eq!(allocate(&mut registry, "Lambda"), "L");
        assert_eq!(allocate(&mut registry, "Simple Storage Service"), "S3");
        assert_eq!(allocate(&mut registry, "Route 53"), "53");
    }

    #[test]
    fn generated_symbols_start_with_the_initial() {
        let mut registry = SymbolRegistry::new();
        let aurora = allocate(&mut registry, "Aurora");
        let amplify = allocate(&mut registry, "Amplify");
        assert_ne!(aurora, amplify);
        assert!(aurora.starts_with('A'), "aurora={aurora}");
        assert!(amplify.starts_with('A'), "amplify={amplify}");
        assert_eq!(aurora.len(), 2);
        assert_eq!(amplify.len(), 2);
    }

    #[test]
    fn second_letter_comes_from_later_in_the_pool() {
        let mut registry = SymbolRegistry::new();
        // Pool for "Elastic Beanstalk": E, B, lastic..., eanstalk...
        assert_eq!(allocate(&mut registry, "Elastic Beanstalk"), "Eb");
    }

    #[test]
    fn filler_words_are_ignored() {
        let mut registry = SymbolRegistry::new();
        // "for" and "on" contribute no candidates.
        assert_eq!(allocate(&mut registry, "Tools for Xz on Cloud"), "Tx");
    }

    #[test]
    fn reallocation_is_idempotent() {
        let mut registry = SymbolRegistry::new();
        let first = allocate(&mut registry, "Neptune");
        let second = allocate(&mut registry, "Neptune");
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn one_character_pool_takes_the_single_letter() {
        let mut registry = SymbolRegistry::new();
        // No two-character pair exists for a one-character pool.
        assert_eq!(allocate(&mut registry, "Q"), "Q");
    }

    #[test]
    fn single_letter_collision_takes_fallback_suffixes() {
        let mut registry = SymbolRegistry::new();
        assert_eq!(allocate(&mut registry, "B"), "B");
        // Distinct name, same one-character pool: suffix sequence kicks in.
        assert_eq!(allocate(&mut registry, "B."), "Ba");
        assert_eq!(allocate(&mut registry, "B/"), "Bb");
    }

    #[test]
    fn empty_pool_is_diagnosed_not_hidden() {
        let mut registry = SymbolRegistry::new();
        let mut diagnostics = Vec::new();
        let symbol = registry.allocate("for on", &mut diagnostics);
        assert_eq!(symbol, "");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::SymbolExhausted {
                name: "for on".to_string()
            }]
        );
    }

    #[test]
    fn reserved_collision_falls_through_to_generation() {
        let mut registry = SymbolRegistry::new();
        let mut diagnostics = Vec::new();
        // Claim "L" by hand, then ask for the reserved holder.
        registry.reserve("L".to_string(), "Lighthouse");
        let symbol = registry.allocate("Lambda", &mut diagnostics);
        assert_ne!(symbol, "L");
        assert!(!symbol.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics[0],
            Diagnostic::ReservedCollision { symbol, .. } if symbol == "L"
        ));
    }

    #[test]
    fn all_distinct_over_a_crowded_prefix() {
        let mut registry = SymbolRegistry::new();
        let names = ["Connect", "Comprehend", "Cognito", "CodeBuild", "CodeDeploy"];
        let mut seen = std::collections::HashSet::new();
        for name in names {
            let symbol = allocate(&mut registry, name);
            assert!(seen.insert(symbol.clone()), "duplicate symbol {symbol}");
        }
    }
}
