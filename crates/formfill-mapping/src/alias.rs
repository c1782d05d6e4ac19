//! Concept alias groups for field-name inference
//!
//! The alias table is explicit immutable configuration handed to the
//! engine at construction, so the engine stays testable and instantiable
//! with per-jurisdiction variants.

use serde::{Deserialize, Serialize};

/// One concept with the naming variants that should resolve to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasGroup {
    /// Canonical concept name (must match a field-table canonical name)
    pub concept: String,

    /// Accepted naming variants, compared after normalization
    pub aliases: Vec<String>,
}

/// Ordered list of alias groups
///
/// Declaration order is the tie-break rule: when two groups match an input
/// key with equally long aliases, the earlier-declared group wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable {
    groups: Vec<AliasGroup>,
}

impl AliasTable {
    /// Create a table from explicit groups
    pub fn new(groups: Vec<AliasGroup>) -> Self {
        Self { groups }
    }

    /// The built-in alias table covering common tax-form naming conventions
    pub fn builtin() -> Self {
        fn group(concept: &str, aliases: &[&str]) -> AliasGroup {
            AliasGroup {
                concept: concept.to_string(),
                aliases: aliases.iter().map(|s| s.to_string()).collect(),
            }
        }

        Self::new(vec![
            group(
                "taxpayer_name",
                &[
                    "taxpayer_name",
                    "primary_name",
                    "employee_name",
                    "legal_name",
                    "full_name",
                    "fullname",
                    "name",
                ],
            ),
            group("spouse_name", &["spouse_name", "spouse"]),
            group(
                "address",
                &[
                    "street_address",
                    "home_address",
                    "mailing_address",
                    "address",
                    "addr",
                ],
            ),
            group(
                "ssn",
                &[
                    "social_security_number",
                    "social_security",
                    "taxpayer_id",
                    "ssn",
                    "tin",
                ],
            ),
            group(
                "wages",
                &[
                    "gross_income",
                    "total_income",
                    "compensation",
                    "earnings",
                    "income",
                    "salary",
                    "wages",
                ],
            ),
            group(
                "federal_withholding",
                &[
                    "federal_tax_withheld",
                    "federal_withholding",
                    "fed_withholding",
                    "tax_withheld",
                    "withholding",
                ],
            ),
            group(
                "employer_name",
                &["employer_name", "business_name", "employer", "company"],
            ),
            group(
                "phone",
                &["phone_number", "daytime_phone", "telephone", "phone"],
            ),
            group("email", &["email_address", "e_mail", "email"]),
        ])
    }

    /// Resolve an input key to a concept
    ///
    /// An alias matches when the whole normalized key equals the normalized
    /// alias, or when a multi-word alias appears as consecutive words of the
    /// key. Single-word aliases never match inside a longer key, so a
    /// qualified key like `state_withholding` cannot fall into the generic
    /// `withholding` group. The longest matching alias wins; ties break by
    /// group declaration order, so resolution is fully deterministic.
    /// `accept` filters which concepts are currently eligible.
    pub fn resolve<F>(&self, key: &str, accept: F) -> Option<&str>
    where
        F: Fn(&str) -> bool,
    {
        let key_norm = normalize_key(key);
        if key_norm.is_empty() {
            return None;
        }
        let key_tokens = tokenize(key);

        let mut best: Option<(usize, usize)> = None; // (alias len, group idx)
        for (group_idx, group) in self.groups.iter().enumerate() {
            if !accept(&group.concept) {
                continue;
            }
            for alias in &group.aliases {
                let alias_norm = normalize_key(alias);
                if alias_norm.is_empty()
                    || !alias_matches(&key_norm, &key_tokens, alias, &alias_norm)
                {
                    continue;
                }
                let candidate = (alias_norm.len(), group_idx);
                let wins = match best {
                    None => true,
                    // Longer alias wins; equal lengths fall to the earlier group
                    Some((len, idx)) => {
                        candidate.0 > len || (candidate.0 == len && group_idx < idx)
                    }
                };
                if wins {
                    best = Some(candidate);
                }
            }
        }

        best.map(|(_, idx)| self.groups[idx].concept.as_str())
    }

    /// Number of groups in the table
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the table has no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Normalize a field key for comparison: lower-case, separators and
/// punctuation stripped
pub(crate) fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Split a key into lower-cased words at separator characters
fn tokenize(key: &str) -> Vec<String> {
    key.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_lowercase())
        .collect()
}

/// Whether an alias matches a key: whole-key equality, or a multi-word
/// alias appearing as consecutive words of the key
fn alias_matches(key_norm: &str, key_tokens: &[String], alias: &str, alias_norm: &str) -> bool {
    if key_norm == alias_norm {
        return true;
    }
    let alias_tokens = tokenize(alias);
    alias_tokens.len() >= 2
        && key_tokens
            .windows(alias_tokens.len())
            .any(|window| window == alias_tokens.as_slice())
}
