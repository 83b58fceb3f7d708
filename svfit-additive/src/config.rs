use std::fs::read_to_string;
use std::ops::Deref;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostic::ConfigWarning;
use crate::event::Event;

///
/// Fitness assigned to a feature hit by each event, as a fraction of the feature's
/// `noImpact` baseline.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EventFitness {
    pub gap: f64,
    pub snv: f64,
    pub insertion: f64,
    pub deletion: f64,
    pub duplication: f64,
    pub inversion: f64,
    pub breakend: f64,
}

impl EventFitness {
    pub fn get(&self, event: Event) -> f64 {
        match event {
            Event::Gap => self.gap,
            Event::Snv => self.snv,
            Event::Insertion => self.insertion,
            Event::Deletion => self.deletion,
            Event::Duplication => self.duplication,
            Event::Inversion => self.inversion,
            Event::Breakend => self.breakend,
        }
    }

    fn values(&self) -> [(&'static str, f64); 7] {
        [
            ("gap", self.gap),
            ("snv", self.snv),
            ("insertion", self.insertion),
            ("deletion", self.deletion),
            ("duplication", self.duplication),
            ("inversion", self.inversion),
            ("breakend", self.breakend),
        ]
    }
}

impl Default for EventFitness {
    fn default() -> Self {
        EventFitness {
            gap: 1.,
            snv: 0.85,
            insertion: 0.1,
            deletion: 0.,
            duplication: 0.,
            inversion: 0.,
            breakend: 0.,
        }
    }
}

/// Fitness tiers of insertions landing in coding sequence.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InsertionFitness {
    /// The insertion point is not on a codon boundary.
    pub frame_breaking: f64,
    /// On a codon boundary, but the inserted length is not a multiple of 3.
    pub frameshift_at_codon_boundary: f64,
    /// On a codon boundary, and the inserted length is a multiple of 3.
    pub in_frame: f64,
}

impl Default for InsertionFitness {
    fn default() -> Self {
        InsertionFitness {
            frame_breaking: 0.1,
            frameshift_at_codon_boundary: 0.5,
            in_frame: 0.8,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ImpactConfig {
    pub promoter_length: u32,
    pub promoter_fitness_gain: f64,
    pub intronic_acceptor_padding: u32,
    pub intronic_donor_padding: u32,
    pub gene_event_fitness: EventFitness,
    pub enhancer_event_fitness: EventFitness,
    pub insertion: InsertionFitness,
    /// Untouched reference added around the outer ends of a route.
    pub flank_length: u32,
    pub mode_of_inheritance_factor: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        ImpactConfig {
            promoter_length: 2_000,
            promoter_fitness_gain: 0.6,
            intronic_acceptor_padding: 25,
            intronic_donor_padding: 6,
            gene_event_fitness: EventFitness::default(),
            enhancer_event_fitness: EventFitness::default(),
            insertion: InsertionFitness::default(),
            flank_length: 100_000,
            mode_of_inheritance_factor: 0.5,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value {value} of `{field}`: must be a number in [0, 1]")]
    InvalidFraction { field: String, value: f64 },
    #[error("Invalid value {value} of `{field}`: must be a non-negative number")]
    InvalidValue { field: String, value: f64 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

fn check_fraction(field: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && (0. ..=1.).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidFraction {
            field: field.to_string(),
            value,
        })
    }
}

impl ImpactConfig {
    ///
    /// Check the configuration before any scoring happens.
    ///
    /// Fitness fractions must lie in `[0, 1]`. A promoter fitness gain above 1 is
    /// clipped to 1 and reported as a [`ConfigWarning`] instead of failing.
    ///
    pub fn validate(mut self) -> ConfigResult<(ValidatedConfig, Vec<ConfigWarning>)> {
        for (table, fitness) in [
            ("gene_event_fitness", &self.gene_event_fitness),
            ("enhancer_event_fitness", &self.enhancer_event_fitness),
        ] {
            for (event, value) in fitness.values() {
                check_fraction(&format!("{}.{}", table, event), value)?;
            }
        }
        check_fraction("insertion.frame_breaking", self.insertion.frame_breaking)?;
        check_fraction(
            "insertion.frameshift_at_codon_boundary",
            self.insertion.frameshift_at_codon_boundary,
        )?;
        check_fraction("insertion.in_frame", self.insertion.in_frame)?;
        check_fraction("mode_of_inheritance_factor", self.mode_of_inheritance_factor)?;

        let gain = self.promoter_fitness_gain;
        if !gain.is_finite() || gain < 0. {
            return Err(ConfigError::InvalidValue {
                field: "promoter_fitness_gain".to_string(),
                value: gain,
            });
        }

        let mut warnings = vec![];
        if gain > 1. {
            let warning = ConfigWarning::PromoterFitnessGainClipped { value: gain };
            log::warn!("{}", warning);
            warnings.push(warning);
            self.promoter_fitness_gain = 1.;
        }

        Ok((ValidatedConfig(self), warnings))
    }
}

impl TryFrom<&Path> for ImpactConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

///
/// An [`ImpactConfig`] that went through [`ImpactConfig::validate`]. Calculators only
/// accept this type.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig(ImpactConfig);

impl ValidatedConfig {
    pub fn into_inner(self) -> ImpactConfig {
        self.0
    }
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        ValidatedConfig(ImpactConfig::default())
    }
}

impl Deref for ValidatedConfig {
    type Target = ImpactConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
