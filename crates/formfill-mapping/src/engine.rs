//! The two-phase field mapping engine

use crate::alias::AliasTable;
use formfill_domain::{FieldMappingResult, FieldSlot, FieldValue, FormDefinition, SplitPolicy};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Maps semantic field maps onto a form's internal field identifiers
///
/// Construction takes the alias table explicitly; there is no global
/// mapping state, so alternate catalogs (per-jurisdiction alias variants)
/// are just another engine instance.
pub struct MappingEngine {
    aliases: AliasTable,
}

impl MappingEngine {
    /// Create an engine with the given alias table
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    /// Create an engine with the built-in alias table
    pub fn with_builtin_aliases() -> Self {
        Self::new(AliasTable::builtin())
    }

    /// Map input fields onto the form's target identifiers
    ///
    /// Deterministic and idempotent: identical arguments always produce an
    /// identical result, and the function has no side effects.
    pub fn map_fields(
        &self,
        form: &FormDefinition,
        input: &BTreeMap<String, FieldValue>,
    ) -> FieldMappingResult {
        let mut assignments: BTreeMap<String, FieldValue> = BTreeMap::new();
        let mut filled_canonicals: HashSet<&str> = HashSet::new();
        let mut remaining: Vec<&String> = Vec::new();

        // Phase 1: exact canonical-name matches
        for (key, value) in input {
            match form.slot(key) {
                Some(slot) => {
                    assign_slot(slot, value, &mut assignments);
                    filled_canonicals.insert(slot.canonical.as_str());
                }
                None => remaining.push(key),
            }
        }

        // Phase 2: alias inference over the leftovers
        let mut unmapped_fields = Vec::new();
        for key in remaining {
            let resolved = self.aliases.resolve(key, |concept| {
                form.has_canonical(concept) && !filled_canonicals.contains(concept)
            });

            match resolved.and_then(|concept| form.slot(concept)) {
                Some(slot) => {
                    debug!(input_key = %key, concept = %slot.canonical, "inferred field mapping");
                    assign_slot(slot, &input[key], &mut assignments);
                    filled_canonicals.insert(slot.canonical.as_str());
                }
                None => unmapped_fields.push(key.clone()),
            }
        }

        let unused_targets = form
            .target_ids()
            .filter(|id| !assignments.contains_key(*id))
            .map(str::to_string)
            .collect();

        FieldMappingResult {
            assignments,
            unmapped_fields,
            unused_targets,
        }
    }
}

impl Default for MappingEngine {
    fn default() -> Self {
        Self::with_builtin_aliases()
    }
}

/// Fan a value out across a slot's target ids per its split policy
fn assign_slot(slot: &FieldSlot, value: &FieldValue, assignments: &mut BTreeMap<String, FieldValue>) {
    match (slot.split, value) {
        (SplitPolicy::WhitespaceParts, FieldValue::Text(text)) if slot.targets.len() > 1 => {
            let parts: Vec<&str> = text.split_whitespace().collect();
            for (idx, target) in slot.targets.iter().enumerate() {
                let part = if idx + 1 == slot.targets.len() {
                    // Surplus parts join into the last target
                    parts.get(idx..).map(|rest| rest.join(" "))
                } else {
                    parts.get(idx).map(|p| p.to_string())
                };
                match part {
                    Some(p) if !p.is_empty() => {
                        assignments.insert(target.clone(), FieldValue::Text(p));
                    }
                    _ => {}
                }
            }
        }
        _ => {
            for target in &slot.targets {
                assignments.insert(target.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_domain::FormCategory;

    fn form_1040ish() -> FormDefinition {
        FormDefinition {
            form_type: "1040".to_string(),
            category: FormCategory::Federal,
            template_ref: "templates/f1040.pdf".to_string(),
            field_table: vec![
                FieldSlot {
                    canonical: "taxpayer_name".to_string(),
                    targets: vec!["f1_first".to_string(), "f1_last".to_string()],
                    split: SplitPolicy::WhitespaceParts,
                },
                FieldSlot::single("address", "f1_address"),
                FieldSlot::single("ssn", "f1_ssn"),
                FieldSlot::single("wages", "f1_line1a"),
                FieldSlot::single("federal_withholding", "f1_line25a"),
            ],
        }
    }

    fn input(pairs: &[(&str, FieldValue)]) -> BTreeMap<String, FieldValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_exact_phase_round_trip() {
        let engine = MappingEngine::with_builtin_aliases();
        let form = form_1040ish();
        let fields = input(&[
            ("wages", FieldValue::Amount(48500.0)),
            ("federal_withholding", FieldValue::Amount(6835.0)),
            ("ssn", FieldValue::Text("123-45-6789".into())),
            ("address", FieldValue::Text("123 Main St".into())),
            ("taxpayer_name", FieldValue::Text("Jane Smith".into())),
        ]);

        let result = engine.map_fields(&form, &fields);

        // Canonical names declared by the form map completely
        assert!(result.unmapped_fields.is_empty());
        assert!(result.unused_targets.is_empty());
        assert_eq!(result.assignments["f1_line1a"], FieldValue::Amount(48500.0));
        assert_eq!(result.assignments["f1_first"], FieldValue::Text("Jane".into()));
        assert_eq!(result.assignments["f1_last"], FieldValue::Text("Smith".into()));
    }

    #[test]
    fn test_inference_phase() {
        let engine = MappingEngine::with_builtin_aliases();
        let form = form_1040ish();
        let fields = input(&[
            ("primary_name", FieldValue::Text("Jane Smith".into())),
            ("home_address", FieldValue::Text("123 Main St".into())),
        ]);

        let result = engine.map_fields(&form, &fields);

        assert!(result.unmapped_fields.is_empty());
        assert_eq!(result.assignments["f1_first"], FieldValue::Text("Jane".into()));
        assert_eq!(result.assignments["f1_last"], FieldValue::Text("Smith".into()));
        assert_eq!(
            result.assignments["f1_address"],
            FieldValue::Text("123 Main St".into())
        );
    }

    #[test]
    fn test_exact_blocks_inference_for_same_slot() {
        let engine = MappingEngine::with_builtin_aliases();
        let form = form_1040ish();
        let fields = input(&[
            ("wages", FieldValue::Amount(100.0)),
            // Would infer to wages, but that slot is taken by phase 1
            ("salary", FieldValue::Amount(999.0)),
        ]);

        let result = engine.map_fields(&form, &fields);

        assert_eq!(result.assignments["f1_line1a"], FieldValue::Amount(100.0));
        assert_eq!(result.unmapped_fields, vec!["salary".to_string()]);
    }

    #[test]
    fn test_unmapped_and_unused_reported() {
        let engine = MappingEngine::with_builtin_aliases();
        let form = form_1040ish();
        let fields = input(&[
            ("wages", FieldValue::Amount(100.0)),
            ("favorite_color", FieldValue::Text("blue".into())),
        ]);

        let result = engine.map_fields(&form, &fields);

        assert_eq!(result.unmapped_fields, vec!["favorite_color".to_string()]);
        // Every target untouched by both phases is reported
        assert!(result.unused_targets.contains(&"f1_ssn".to_string()));
        assert!(result.unused_targets.contains(&"f1_first".to_string()));
        assert!(!result.unused_targets.contains(&"f1_line1a".to_string()));
    }

    #[test]
    fn test_qualified_field_not_misassigned() {
        let engine = MappingEngine::with_builtin_aliases();
        let form = form_1040ish();
        // A state amount must not land in the federal withholding box
        let fields = input(&[("state_withholding", FieldValue::Amount(2100.0))]);

        let result = engine.map_fields(&form, &fields);
        assert!(!result.assignments.contains_key("f1_line25a"));
        assert_eq!(result.unmapped_fields, vec!["state_withholding".to_string()]);
    }

    #[test]
    fn test_concept_absent_from_form_is_unmapped() {
        let engine = MappingEngine::with_builtin_aliases();
        let form = form_1040ish();
        // Resolves to the email concept, but this form declares no email slot
        let fields = input(&[("email_address", FieldValue::Text("j@x.com".into()))]);

        let result = engine.map_fields(&form, &fields);
        assert_eq!(result.unmapped_fields, vec!["email_address".to_string()]);
    }

    #[test]
    fn test_three_part_name_joins_surplus_into_last() {
        let engine = MappingEngine::with_builtin_aliases();
        let form = form_1040ish();
        let fields = input(&[("taxpayer_name", FieldValue::Text("Jane Ann Smith".into()))]);

        let result = engine.map_fields(&form, &fields);
        assert_eq!(result.assignments["f1_first"], FieldValue::Text("Jane".into()));
        assert_eq!(
            result.assignments["f1_last"],
            FieldValue::Text("Ann Smith".into())
        );
    }

    #[test]
    fn test_single_part_name_leaves_last_empty() {
        let engine = MappingEngine::with_builtin_aliases();
        let form = form_1040ish();
        let fields = input(&[("taxpayer_name", FieldValue::Text("Prince".into()))]);

        let result = engine.map_fields(&form, &fields);
        assert_eq!(result.assignments["f1_first"], FieldValue::Text("Prince".into()));
        assert!(!result.assignments.contains_key("f1_last"));
        assert!(result.unused_targets.contains(&"f1_last".to_string()));
    }

    #[test]
    fn test_mapping_deterministic_and_idempotent() {
        let engine = MappingEngine::with_builtin_aliases();
        let form = form_1040ish();
        let fields = input(&[
            ("primary_name", FieldValue::Text("Jane Smith".into())),
            ("salary", FieldValue::Amount(48500.0)),
            ("mystery", FieldValue::Text("?".into())),
        ]);

        let a = engine.map_fields(&form, &fields);
        let b = engine.map_fields(&form, &fields);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input() {
        let engine = MappingEngine::with_builtin_aliases();
        let form = form_1040ish();
        let result = engine.map_fields(&form, &BTreeMap::new());

        assert!(result.assignments.is_empty());
        assert!(result.unmapped_fields.is_empty());
        assert_eq!(result.unused_targets.len(), 6);
    }
}
