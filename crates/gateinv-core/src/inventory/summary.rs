//! Corpus-wide aggregation of gate and config metadata.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::resolver::ResolvedValue;

use super::entry::ConfigEntry;

/// Coarse type of a dynamic config field.
///
/// Variants are declared in the order of their serialized names so the
/// derived `Ord` matches sorted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Bool,
    Cycle,
    Dict,
    List,
    Null,
    Number,
    ResourceRef,
    String,
    Unset,
}

impl TypeTag {
    pub fn of(value: &ResolvedValue) -> Self {
        match value {
            ResolvedValue::Null => TypeTag::Null,
            ResolvedValue::Bool(_) => TypeTag::Bool,
            ResolvedValue::Number(_) | ResolvedValue::RawPassthrough(_) => TypeTag::Number,
            ResolvedValue::String(_) => TypeTag::String,
            ResolvedValue::List(_) => TypeTag::List,
            ResolvedValue::Map(_) => TypeTag::Dict,
            ResolvedValue::ResourceRef { .. } => TypeTag::ResourceRef,
            ResolvedValue::Cycle => TypeTag::Cycle,
            ResolvedValue::Unset => TypeTag::Unset,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Bool => "bool",
            TypeTag::Cycle => "cycle",
            TypeTag::Dict => "dict",
            TypeTag::List => "list",
            TypeTag::Null => "null",
            TypeTag::Number => "number",
            TypeTag::ResourceRef => "resource_ref",
            TypeTag::String => "string",
            TypeTag::Unset => "unset",
        }
    }
}

/// Everything observed about one dynamic config across the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicConfigSummary {
    pub keys: BTreeSet<String>,
    pub groups: BTreeSet<String>,
    pub rule_ids: BTreeSet<String>,
    pub value_types: BTreeMap<String, BTreeSet<TypeTag>>,
}

impl DynamicConfigSummary {
    fn merge(&mut self, other: DynamicConfigSummary) {
        self.keys.extend(other.keys);
        self.groups.extend(other.groups);
        self.rule_ids.extend(other.rule_ids);
        for (key, tags) in other.value_types {
            self.value_types.entry(key).or_default().extend(tags);
        }
    }
}

/// Aggregated inventory: boolean gates and map-valued dynamic configs.
///
/// Built per document with [`InventorySummary::summarize`] and folded
/// together with [`InventorySummary::merge`]. Merging is a plain set union,
/// so the order in which documents are merged never changes the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub feature_gates: BTreeMap<String, BTreeSet<bool>>,
    pub dynamic_configs: BTreeMap<String, DynamicConfigSummary>,
}

impl InventorySummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summarize<'e, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'e ConfigEntry>,
    {
        let mut summary = Self::new();
        for entry in entries {
            summary.observe(entry);
        }
        summary
    }

    /// Record one entry. Values that are neither booleans nor maps are ignored.
    pub fn observe(&mut self, entry: &ConfigEntry) {
        match &entry.value {
            ResolvedValue::Bool(b) => {
                self.feature_gates
                    .entry(entry.name.clone())
                    .or_default()
                    .insert(*b);
            }
            ResolvedValue::Map(fields) => {
                let config = self.dynamic_configs.entry(entry.name.clone()).or_default();
                for (key, value) in fields.iter() {
                    config.keys.insert(key.clone());
                    config
                        .value_types
                        .entry(key.clone())
                        .or_default()
                        .insert(TypeTag::of(value));
                }
                config.groups.extend(entry.group.iter().cloned());
                config.rule_ids.extend(entry.rule_id.iter().cloned());
            }
            _ => {}
        }
    }

    pub fn merge(&mut self, other: InventorySummary) {
        for (name, values) in other.feature_gates {
            self.feature_gates.entry(name).or_default().extend(values);
        }
        for (name, config) in other.dynamic_configs {
            self.dynamic_configs.entry(name).or_default().merge(config);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.feature_gates.is_empty() && self.dynamic_configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(name: &str, value: ResolvedValue) -> ConfigEntry {
        ConfigEntry {
            name: name.to_string(),
            value,
            group: None,
            rule_id: None,
        }
    }

    fn config(name: &str, fields: &[(&str, ResolvedValue)], group: Option<&str>) -> ConfigEntry {
        ConfigEntry {
            name: name.to_string(),
            value: ResolvedValue::map(
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ),
            group: group.map(String::from),
            rule_id: group.map(|g| format!("rule-{g}")),
        }
    }

    #[test]
    fn booleans_become_gates() {
        let entries = [
            entry("1", true.into()),
            entry("2", false.into()),
            entry("3", "text".into()),
        ];
        let summary = InventorySummary::summarize(&entries);
        assert_eq!(summary.feature_gates["1"], BTreeSet::from([true]));
        assert_eq!(summary.feature_gates["2"], BTreeSet::from([false]));
        assert!(!summary.feature_gates.contains_key("3"));
        assert!(summary.dynamic_configs.is_empty());
    }

    #[test]
    fn maps_become_dynamic_configs() {
        let entries = [config(
            "10",
            &[
                ("flag", true.into()),
                ("label", "x".into()),
                ("nested", ResolvedValue::map(BTreeMap::new())),
                ("items", ResolvedValue::list(vec![])),
                ("missing", ResolvedValue::Null),
                ("asset", ResolvedValue::ResourceRef { index: 3 }),
            ],
            Some("control"),
        )];
        let summary = InventorySummary::summarize(&entries);
        let cfg = &summary.dynamic_configs["10"];
        assert_eq!(cfg.keys.len(), 6);
        assert_eq!(cfg.groups, BTreeSet::from(["control".to_string()]));
        assert_eq!(cfg.rule_ids, BTreeSet::from(["rule-control".to_string()]));
        assert_eq!(cfg.value_types["flag"], BTreeSet::from([TypeTag::Bool]));
        assert_eq!(cfg.value_types["nested"], BTreeSet::from([TypeTag::Dict]));
        assert_eq!(cfg.value_types["asset"], BTreeSet::from([TypeTag::ResourceRef]));
    }

    #[test]
    fn type_tags_cover_resolver_variants() {
        assert_eq!(TypeTag::of(&ResolvedValue::Cycle).as_str(), "cycle");
        assert_eq!(TypeTag::of(&ResolvedValue::Unset).as_str(), "unset");
        assert_eq!(TypeTag::of(&ResolvedValue::RawPassthrough(99.into())).as_str(), "number");
        assert_eq!(
            TypeTag::of(&ResolvedValue::Number(serde_json::Number::from_f64(0.5).unwrap())),
            TypeTag::Number
        );
    }

    #[test]
    fn type_tag_order_matches_names() {
        let tags = [
            TypeTag::Unset,
            TypeTag::String,
            TypeTag::ResourceRef,
            TypeTag::Number,
            TypeTag::Null,
            TypeTag::List,
            TypeTag::Dict,
            TypeTag::Cycle,
            TypeTag::Bool,
        ];
        let by_ord: Vec<_> = BTreeSet::from(tags).into_iter().map(TypeTag::as_str).collect();
        let mut by_name: Vec<_> = tags.iter().map(|t| t.as_str()).collect();
        by_name.sort();
        assert_eq!(by_ord, by_name);
        for tag in tags {
            assert_eq!(serde_json::to_value(tag).unwrap(), json!(tag.as_str()));
        }
    }

    #[test]
    fn observations_accumulate_as_sets() {
        let mut summary = InventorySummary::new();
        summary.observe(&entry("1", true.into()));
        summary.observe(&entry("1", false.into()));
        summary.observe(&entry("1", true.into()));
        summary.observe(&config("2", &[("k", true.into())], Some("a")));
        summary.observe(&config("2", &[("k", "s".into()), ("j", ResolvedValue::Null)], Some("b")));
        assert_eq!(summary.feature_gates["1"], BTreeSet::from([false, true]));
        let cfg = &summary.dynamic_configs["2"];
        assert_eq!(cfg.value_types["k"], BTreeSet::from([TypeTag::Bool, TypeTag::String]));
        assert_eq!(cfg.groups.len(), 2);
        assert_eq!(cfg.keys, BTreeSet::from(["j".to_string(), "k".to_string()]));
    }

    fn sample_sets() -> (Vec<ConfigEntry>, Vec<ConfigEntry>, Vec<ConfigEntry>) {
        (
            vec![
                entry("1", true.into()),
                config("5", &[("a", true.into())], Some("g1")),
            ],
            vec![
                entry("1", false.into()),
                entry("2", true.into()),
                config("5", &[("a", "x".into()), ("b", ResolvedValue::Null)], None),
            ],
            vec![
                config("5", &[("c", ResolvedValue::list(vec![]))], Some("g2")),
                config("6", &[], None),
                entry("2", true.into()),
            ],
        )
    }

    #[test]
    fn merge_equals_summary_of_concatenation() {
        let (a, b, _) = sample_sets();
        let mut merged = InventorySummary::summarize(&a);
        merged.merge(InventorySummary::summarize(&b));
        let combined = InventorySummary::summarize(a.iter().chain(b.iter()));
        assert_eq!(merged, combined);
    }

    #[test]
    fn merge_is_associative_and_commutative() {
        let (a, b, c) = sample_sets();
        let (sa, sb, sc) = (
            InventorySummary::summarize(&a),
            InventorySummary::summarize(&b),
            InventorySummary::summarize(&c),
        );

        let mut left = sa.clone();
        left.merge(sb.clone());
        left.merge(sc.clone());

        let mut bc = sb.clone();
        bc.merge(sc.clone());
        let mut right = sa.clone();
        right.merge(bc);

        let mut reversed = sc;
        reversed.merge(sb);
        reversed.merge(sa);

        assert_eq!(left, right);
        assert_eq!(left, reversed);
    }

    #[test]
    fn empty_summary() {
        let mut summary = InventorySummary::new();
        assert!(summary.is_empty());
        summary.merge(InventorySummary::new());
        assert!(summary.is_empty());
        summary.observe(&entry("1", ResolvedValue::Unset));
        assert!(summary.is_empty());
    }

    #[test]
    fn serialized_shape() {
        let entries = [
            entry("200", true.into()),
            entry("200", false.into()),
            config(
                "100",
                &[
                    ("b", ResolvedValue::Number(serde_json::Number::from_f64(1.5).unwrap())),
                    ("a", true.into()),
                ],
                Some("grp"),
            ),
        ];
        let summary = InventorySummary::summarize(&entries);
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "feature_gates": {"200": [false, true]},
                "dynamic_configs": {
                    "100": {
                        "keys": ["a", "b"],
                        "groups": ["grp"],
                        "rule_ids": ["rule-grp"],
                        "value_types": {"a": ["bool"], "b": ["number"]}
                    }
                }
            })
        );
    }
}
