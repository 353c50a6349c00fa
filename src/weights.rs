use crate::models::{AnalysisError, WeightPolicy};

/// Modules assessed 60% final exam / 40% continuous assessment.
const SIXTY_FORTY: [&str; 6] = ["IT1010", "IT1050", "IT1090", "IT2020", "IT2050", "IT2060"];

/// Modules assessed 50/50.
const FIFTY_FIFTY: [&str; 8] = [
    "IT1020", "IT1030", "IT1040", "IT1060", "IT1080", "IT1100", "IT2030", "IT2040",
];

/// Resolves the CA/final weight split for a module. Known modules resolve
/// from the static tables; anything else requires an explicit CA weight
/// percentage from the caller. No split is ever assumed for an
/// unrecognized module.
pub fn resolve(module_code: &str, ca_override: Option<i64>) -> Result<WeightPolicy, AnalysisError> {
    if SIXTY_FORTY.contains(&module_code) {
        Ok(WeightPolicy {
            ca_weight: 0.4,
            final_weight: 0.6,
        })
    } else if FIFTY_FIFTY.contains(&module_code) {
        Ok(WeightPolicy {
            ca_weight: 0.5,
            final_weight: 0.5,
        })
    } else if let Some(percent) = ca_override {
        from_ca_percent(percent)
    } else {
        Err(AnalysisError::UnrecognizedModule(module_code.to_string()))
    }
}

fn from_ca_percent(percent: i64) -> Result<WeightPolicy, AnalysisError> {
    if !(0..=100).contains(&percent) {
        return Err(AnalysisError::InvalidWeight(percent));
    }
    let ca_weight = percent as f64 / 100.0;
    Ok(WeightPolicy {
        ca_weight,
        final_weight: 1.0 - ca_weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sixty_forty_module_resolves() {
        let policy = resolve("IT1010", None).unwrap();
        assert_eq!(policy.ca_weight, 0.4);
        assert_eq!(policy.final_weight, 0.6);
    }

    #[test]
    fn known_fifty_fifty_module_resolves() {
        let policy = resolve("IT2040", None).unwrap();
        assert_eq!(policy.ca_weight, 0.5);
        assert_eq!(policy.final_weight, 0.5);
    }

    #[test]
    fn unrecognized_module_requires_override() {
        let err = resolve("IT9999", None).unwrap_err();
        assert!(matches!(err, AnalysisError::UnrecognizedModule(code) if code == "IT9999"));
    }

    #[test]
    fn override_derives_complementary_final_weight() {
        let policy = resolve("IT9999", Some(30)).unwrap();
        assert!((policy.ca_weight - 0.3).abs() < 1e-12);
        assert!((policy.final_weight - 0.7).abs() < 1e-12);
    }

    #[test]
    fn table_wins_over_override_for_known_modules() {
        let policy = resolve("IT1010", Some(50)).unwrap();
        assert_eq!(policy.ca_weight, 0.4);
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        assert!(matches!(
            resolve("IT9999", Some(130)).unwrap_err(),
            AnalysisError::InvalidWeight(130)
        ));
        assert!(matches!(
            resolve("IT9999", Some(-5)).unwrap_err(),
            AnalysisError::InvalidWeight(-5)
        ));
    }
}
