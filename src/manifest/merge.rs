//! Environment merging and legacy JRE configuration handling

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Legacy key carrying JRE selection; consumed, never exposed.
pub const JRE_CONFIG_KEY: &str = "JBP_CONFIG_OPEN_JDK_JRE";

fn jre_version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"version\s*:\s*['"]?\s*(\d+)"#).expect("JRE version pattern is valid")
    })
}

/// Folds `incoming` into `acc`; keys already present keep their value.
///
/// Returns the keys that were newly added, in input order.
pub fn merge_into<I>(acc: &mut BTreeMap<String, String>, incoming: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut added = Vec::new();
    for (key, value) in incoming {
        if acc.contains_key(&key) {
            continue;
        }
        added.push(key.clone());
        acc.insert(key, value);
    }
    added
}

/// First-writer-wins merge over an ordered list of environment maps.
pub fn merge_environments<I, E>(sources: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = E>,
    E: IntoIterator<Item = (String, String)>,
{
    sources.into_iter().fold(BTreeMap::new(), |mut acc, env| {
        merge_into(&mut acc, env);
        acc
    })
}

/// Removes the JRE key from `pairs`, returning the remaining entries and the
/// raw JRE configuration if it was present.
pub fn split_jre_config(pairs: Vec<(String, String)>) -> (Vec<(String, String)>, Option<String>) {
    let mut jre = None;
    let rest = pairs
        .into_iter()
        .filter_map(|(key, value)| {
            if key == JRE_CONFIG_KEY {
                jre.get_or_insert(value);
                None
            } else {
                Some((key, value))
            }
        })
        .collect();
    (rest, jre)
}

/// Major version token from a `version: <N>` fragment.
pub fn jre_major_version(config: &str) -> Option<String> {
    jre_version_pattern()
        .captures(config)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
