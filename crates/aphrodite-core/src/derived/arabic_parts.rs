//! Arabic Parts (Lots).
//!
//! A part is `base + add - subtract` over named longitudes. Formulas may
//! reference other parts, so they are resolved along an explicit dependency
//! graph in topological order.

use crate::config::PartFormula;
use crate::error::{ChartError, ChartResult};
use crate::math::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArabicPart {
    pub name: String,
    pub longitude: f64,
    /// References actually used for the chart's sect: (base, add, subtract)
    pub terms: (String, String, String),
}

/// Compute a single part from three longitudes
pub fn part_longitude(base: f64, add: f64, subtract: f64) -> f64 {
    normalize_degrees(base + add - subtract)
}

/// Resolve every formula against `pool` (points, angles, `Cusp N` entries).
///
/// A name present in the pool is always taken from the pool; anything else
/// must be another formula. Missing references and cycles fail with
/// [`ChartError::UnresolvableDependency`] naming the parts involved. Parts are
/// returned in the order the formulas were given.
pub fn resolve_parts(
    pool: &HashMap<String, f64>,
    formulas: &[PartFormula],
    is_day_chart: bool,
) -> ChartResult<Vec<ArabicPart>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, formula) in formulas.iter().enumerate() {
        if pool.contains_key(&formula.name) {
            return Err(ChartError::MalformedInput(format!(
                "part name {} shadows an existing point",
                formula.name
            )));
        }
        if index.insert(formula.name.as_str(), i).is_some() {
            return Err(ChartError::MalformedInput(format!("duplicate part formula {}", formula.name)));
        }
    }

    // edges: dependency -> dependents
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); formulas.len()];
    let mut in_degree = vec![0usize; formulas.len()];
    let mut missing: Vec<String> = Vec::new();

    for (i, formula) in formulas.iter().enumerate() {
        let mut seen = HashSet::new();
        for reference in formula.references() {
            if pool.contains_key(reference) || !seen.insert(reference) {
                continue;
            }
            match index.get(reference) {
                Some(&dep) => {
                    dependents[dep].push(i);
                    in_degree[i] += 1;
                }
                None => missing.push(formula.name.clone()),
            }
        }
    }
    if !missing.is_empty() {
        missing.dedup();
        return Err(ChartError::UnresolvableDependency {
            detail: "reference to an unknown point".to_string(),
            names: missing,
        });
    }

    // Kahn
    let mut queue: VecDeque<usize> = (0..formulas.len()).filter(|i| in_degree[*i] == 0).collect();
    let mut resolved: HashMap<&str, f64> = HashMap::new();
    let mut parts: Vec<Option<ArabicPart>> = vec![None; formulas.len()];

    while let Some(i) = queue.pop_front() {
        let formula = &formulas[i];
        let (base, add, subtract) = formula.terms(is_day_chart);
        let lookup = |name: &str| pool.get(name).copied().or_else(|| resolved.get(name).copied());
        let (Some(b), Some(a), Some(s)) = (lookup(base), lookup(add), lookup(subtract)) else {
            return Err(ChartError::UnresolvableDependency {
                detail: "reference resolved out of order".to_string(),
                names: vec![formula.name.clone()],
            });
        };
        let longitude = part_longitude(b, a, s);
        resolved.insert(formula.name.as_str(), longitude);
        parts[i] = Some(ArabicPart {
            name: formula.name.clone(),
            longitude,
            terms: (base.to_string(), add.to_string(), subtract.to_string()),
        });
        for &next in &dependents[i] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if resolved.len() < formulas.len() {
        let names = formulas
            .iter()
            .enumerate()
            .filter(|(i, _)| parts[*i].is_none())
            .map(|(_, f)| f.name.clone())
            .collect();
        return Err(ChartError::UnresolvableDependency {
            detail: "circular part formulas".to_string(),
            names,
        });
    }

    Ok(parts.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_parts;
    use crate::error::ErrorKind;

    fn pool() -> HashMap<String, f64> {
        [
            ("Ascendant", 10.0),
            ("Sun", 100.0),
            ("Moon", 200.0),
            ("Mercury", 90.0),
            ("Venus", 120.0),
            ("Mars", 300.0),
            ("Jupiter", 45.0),
            ("Saturn", 250.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn test_fortune_day_and_night() {
        let formulas = vec![PartFormula::new("Fortune", "Moon", "Sun", true)];
        let day = resolve_parts(&pool(), &formulas, true).unwrap();
        assert!((day[0].longitude - 110.0).abs() < 1e-9);
        let night = resolve_parts(&pool(), &formulas, false).unwrap();
        assert!((night[0].longitude - 270.0).abs() < 1e-9);
        assert_eq!(night[0].terms.1, "Sun");
    }

    #[test]
    fn test_parts_referencing_parts_in_any_order() {
        let formulas = vec![
            PartFormula::new("Courage", "Fortune", "Mars", true),
            PartFormula::new("Fortune", "Moon", "Sun", true),
        ];
        let parts = resolve_parts(&pool(), &formulas, true).unwrap();
        assert_eq!(parts[0].name, "Courage");
        // 10 + 110 - 300
        assert!((parts[0].longitude - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_parts_resolve() {
        let parts = resolve_parts(&pool(), &default_parts(), true).unwrap();
        assert_eq!(parts.len(), default_parts().len());
    }

    #[test]
    fn test_cycle_fails_fast() {
        let formulas = vec![
            PartFormula::new("A", "B", "Sun", false),
            PartFormula::new("B", "A", "Moon", false),
            PartFormula::new("Fortune", "Moon", "Sun", true),
        ];
        let err = resolve_parts(&pool(), &formulas, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvableDependency);
        match err {
            ChartError::UnresolvableDependency { names, .. } => assert_eq!(names, vec!["A", "B"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_reference() {
        let formulas = vec![PartFormula::new("Lot of Pluto", "Pluto", "Sun", false)];
        let err = resolve_parts(&pool(), &formulas, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvableDependency);
    }
}
