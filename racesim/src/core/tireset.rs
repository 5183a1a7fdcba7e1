use crate::error::{RaceSimError, RaceSimResult};
use helpers::general::clamp_pct;
use serde::Deserialize;
use std::collections::HashMap;
use std::rc::Rc;

/// (-) Lap time increase per percent of tire wear.
pub const TIRE_WEAR_PENALTY_PER_PCT: f64 = 0.001;

/// * `grip_factor` - (-) Lap time multiplier of the compound, 1.0 is the baseline (medium)
/// * `degr_rate` - (-) Multiplier on the tire wear accumulated per lap, 1.0 is the baseline
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TireCompoundPars {
    pub grip_factor: f64,
    pub degr_rate: f64,
}

/// TireConfig maps compound names to their parameters, e.g. `"soft" -> {0.98, 1.3}`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct TireConfig {
    pub compounds: HashMap<String, TireCompoundPars>,
}

impl Default for TireConfig {
    fn default() -> Self {
        let mut compounds = HashMap::with_capacity(3);
        compounds.insert(
            "soft".to_owned(),
            TireCompoundPars {
                grip_factor: 0.98,
                degr_rate: 1.3,
            },
        );
        compounds.insert(
            "medium".to_owned(),
            TireCompoundPars {
                grip_factor: 1.0,
                degr_rate: 1.0,
            },
        );
        compounds.insert(
            "hard".to_owned(),
            TireCompoundPars {
                grip_factor: 1.02,
                degr_rate: 0.7,
            },
        );
        TireConfig { compounds }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TireCompound {
    pub name: String,
    pub grip_factor: f64,
    pub degr_rate: f64,
}

impl TireCompound {
    pub fn new(name: &str, grip_factor: f64, degr_rate: f64) -> RaceSimResult<TireCompound> {
        if !(grip_factor.is_finite() && grip_factor >= 0.0) {
            return Err(RaceSimError::InvalidTireCompound(format!(
                "grip factor of {} must be a non-negative number, but is {}",
                name, grip_factor
            )));
        }
        if !(degr_rate.is_finite() && degr_rate >= 0.0) {
            return Err(RaceSimError::InvalidTireCompound(format!(
                "degradation rate of {} must be a non-negative number, but is {}",
                name, degr_rate
            )));
        }

        Ok(TireCompound {
            name: name.to_owned(),
            grip_factor,
            degr_rate,
        })
    }
}

/// TireCatalogue holds every compound exactly once. Cars share the compounds by reference.
#[derive(Debug, Clone)]
pub struct TireCatalogue {
    compounds: HashMap<String, Rc<TireCompound>>,
}

impl TireCatalogue {
    pub fn new(tire_config: &TireConfig) -> RaceSimResult<TireCatalogue> {
        let mut compounds = HashMap::with_capacity(tire_config.compounds.len());

        for (name, pars) in tire_config.compounds.iter() {
            let name = name.to_lowercase();
            let compound = TireCompound::new(&name, pars.grip_factor, pars.degr_rate)?;
            compounds.insert(name, Rc::new(compound));
        }

        Ok(TireCatalogue { compounds })
    }

    /// The method returns the shared compound for the given name (case-insensitive).
    pub fn get(&self, name: &str) -> RaceSimResult<Rc<TireCompound>> {
        self.compounds
            .get(&name.to_lowercase())
            .map(Rc::clone)
            .ok_or_else(|| RaceSimError::InvalidTireCompound(format!("unknown compound {}", name)))
    }
}

/// Tireset is the set of tires currently mounted on a car.
#[derive(Debug, Clone)]
pub struct Tireset {
    pub compound: Rc<TireCompound>,
    pub wear: f64,
    pub age_cur_stint: u32,
}

impl Tireset {
    pub fn new(compound: Rc<TireCompound>) -> Tireset {
        Tireset {
            compound,
            wear: 0.0,
            age_cur_stint: 0,
        }
    }

    /// drive_lap adds the lap's wear and increases the stint age by one lap.
    pub fn drive_lap(&mut self, wear_delta: f64) {
        self.wear = clamp_pct(self.wear + wear_delta);
        self.age_cur_stint += 1;
    }

    /// t_factor_wear returns the lap time multiplier caused by the current tire wear.
    pub fn t_factor_wear(&self) -> f64 {
        1.0 + self.wear * TIRE_WEAR_PENALTY_PER_PCT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn catalogue_shares_compounds() {
        let catalogue = TireCatalogue::new(&TireConfig::default()).unwrap();
        let a = catalogue.get("soft").unwrap();
        let b = catalogue.get("SOFT").unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_abs_diff_eq!(catalogue.get("medium").unwrap().grip_factor, 1.0);
    }

    #[test]
    fn unknown_compound_is_rejected() {
        let catalogue = TireCatalogue::new(&TireConfig::default()).unwrap();
        assert!(matches!(
            catalogue.get("ultrasoft"),
            Err(RaceSimError::InvalidTireCompound(_))
        ));
    }

    #[test]
    fn negative_grip_is_rejected() {
        assert!(TireCompound::new("broken", -0.5, 1.0).is_err());
        assert!(TireCompound::new("broken", f64::NAN, 1.0).is_err());
        assert!(TireCompound::new("broken", 1.0, -1.0).is_err());
    }

    #[test]
    fn wear_is_clamped_and_penalised() {
        let compound = Rc::new(TireCompound::new("medium", 1.0, 1.0).unwrap());
        let mut tireset = Tireset::new(compound);
        assert_abs_diff_eq!(tireset.t_factor_wear(), 1.0);

        tireset.drive_lap(40.0);
        assert_abs_diff_eq!(tireset.t_factor_wear(), 1.04);

        tireset.drive_lap(80.0);
        assert_abs_diff_eq!(tireset.wear, 100.0);
        assert_eq!(tireset.age_cur_stint, 2);
    }
}
