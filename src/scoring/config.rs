use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::record::{Medium, Unit};

/// Version tag of the built-in conversion table.
///
/// Bump whenever a multiplier in [`ConversionTable::default`] changes so that
/// snapshots ranked under an older table can be told apart.
pub const DEFAULT_CONVERSION_VERSION: &str = "2017.1";

/// Page-equivalent multipliers per medium and unit.
///
/// `score = quantity * media[medium][unit]`. Pairs absent from the table are
/// not convertible.
///
/// Example YAML:
/// ```yaml
/// conversion:
///   version: "2017.1"
///   media:
///     book:
///       pages: 1.0
///       characters: 0.0025
///     game:
///       minutes: 0.5
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConversionTable {
    /// Identifier of this set of multipliers
    pub version: String,

    /// medium -> unit -> multiplier
    #[serde(default, deserialize_with = "deserialize_media")]
    pub media: BTreeMap<Medium, BTreeMap<Unit, f64>>,
}

impl ConversionTable {
    /// Build a table from `(medium, unit, multiplier)` triples
    pub fn from_pairs<I, M, U>(version: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (M, U, f64)>,
        M: Into<Medium>,
        U: Into<Unit>,
    {
        let mut media: BTreeMap<Medium, BTreeMap<Unit, f64>> = BTreeMap::new();
        for (medium, unit, multiplier) in pairs {
            media
                .entry(medium.into())
                .or_default()
                .insert(unit.into().canonical(), multiplier);
        }
        Self {
            version: version.to_string(),
            media,
        }
    }

    /// Look up the multiplier for a `(medium, unit)` pair
    pub fn multiplier(&self, medium: Medium, unit: &Unit) -> Option<f64> {
        self.media.get(&medium).and_then(|units| units.get(unit)).copied()
    }
}

impl Default for ConversionTable {
    fn default() -> Self {
        Self::from_pairs(
            DEFAULT_CONVERSION_VERSION,
            [
                (Medium::Book, Unit::Pages, 1.0),
                (Medium::Book, Unit::Characters, 0.0025),
                (Medium::Manga, Unit::Pages, 0.2),
                (Medium::Game, Unit::Minutes, 0.5),
                (Medium::Game, Unit::Characters, 0.0025),
                (Medium::Anime, Unit::Episodes, 2.0),
                (Medium::Anime, Unit::Minutes, 0.1),
                (Medium::Drama, Unit::Episodes, 4.0),
                (Medium::Drama, Unit::Minutes, 0.1),
                (Medium::Other, Unit::Pages, 1.0),
                (Medium::Other, Unit::Characters, 0.0025),
                (Medium::Other, Unit::Minutes, 0.1),
            ],
        )
    }
}

/// Resolve a YAML medium label, refusing labels that would silently fold
/// into `other`.
fn medium_key(label: &str) -> Result<Medium, String> {
    let medium = Medium::parse(label);
    if medium == Medium::Other && label.trim().to_lowercase() != Medium::Other.as_str() {
        return Err(format!("unknown medium '{}' (list it under 'other')", label));
    }
    Ok(medium)
}

fn unit_key(label: &str) -> Result<Unit, String> {
    Ok(Unit::parse(label))
}

/// Re-key a map read with raw string keys, collecting every unknown label and
/// every pair of labels that resolve to the same key.
fn rekey<K, V>(
    path: &str,
    raw: BTreeMap<String, V>,
    resolve: impl Fn(&str) -> Result<K, String>,
    errors: &mut Vec<String>,
) -> BTreeMap<K, V>
where
    K: Ord + Clone,
{
    let mut keyed = BTreeMap::new();
    let mut seen: BTreeMap<K, String> = BTreeMap::new();
    for (label, value) in raw {
        let key = match resolve(&label) {
            Ok(key) => key,
            Err(e) => {
                errors.push(format!("{}: {}", path, e));
                continue;
            }
        };
        if let Some(first) = seen.get(&key) {
            errors.push(format!(
                "{}: '{}' and '{}' name the same entry",
                path, first, label
            ));
            continue;
        }
        seen.insert(key.clone(), label);
        keyed.insert(key, value);
    }
    keyed
}

fn deserialize_media<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<Medium, BTreeMap<Unit, f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, BTreeMap<String, f64>>::deserialize(deserializer)?;
    let mut errors = Vec::new();
    let media = rekey("conversion.media", raw, medium_key, &mut errors)
        .into_iter()
        .map(|(medium, units)| {
            let path = format!("conversion.media.{}", medium);
            (medium, rekey(&path, units, unit_key, &mut errors))
        })
        .collect();

    if errors.is_empty() {
        Ok(media)
    } else {
        Err(serde::de::Error::custom(errors.join("; ")))
    }
}

/// Deserialize a map keyed by medium label with the same strictness as the
/// conversion table.
pub(crate) fn deserialize_medium_keys<'de, D, V>(
    deserializer: D,
) -> Result<BTreeMap<Medium, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let raw = BTreeMap::<String, V>::deserialize(deserializer)?;
    let mut errors = Vec::new();
    let keyed = rekey("source.units", raw, medium_key, &mut errors);
    if errors.is_empty() {
        Ok(keyed)
    } else {
        Err(serde::de::Error::custom(errors.join("; ")))
    }
}
