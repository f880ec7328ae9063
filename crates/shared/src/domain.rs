use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FeatureDomainError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(SessionId);
id_newtype!(RecordId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageId {
    Welcome,
    Login,
    Dashboard,
    Predict,
    Reports,
    Tips,
    Settings,
}

impl PageId {
    pub const ALL: [PageId; 7] = [
        PageId::Welcome,
        PageId::Login,
        PageId::Dashboard,
        PageId::Predict,
        PageId::Reports,
        PageId::Tips,
        PageId::Settings,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeId {
    #[default]
    Dark,
    Light,
    Blue,
    Green,
}

impl ThemeId {
    pub const ALL: [ThemeId; 4] = [ThemeId::Dark, ThemeId::Light, ThemeId::Blue, ThemeId::Green];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleId {
    #[default]
    English,
    Hindi,
    Spanish,
}

impl LocaleId {
    pub const ALL: [LocaleId; 3] = [LocaleId::English, LocaleId::Hindi, LocaleId::Spanish];
}

pub const FONT_SIZE_MIN: u8 = 12;
pub const FONT_SIZE_MAX: u8 = 20;
pub const FONT_SIZE_DEFAULT: u8 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: ThemeId,
    pub locale: LocaleId,
    pub font_size: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemeId::Dark,
            locale: LocaleId::English,
            font_size: FONT_SIZE_DEFAULT,
        }
    }
}

/// The 13 clinical inputs, in the order the oracle consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Age,
    Sex,
    Cp,
    Trestbps,
    Chol,
    Fbs,
    Restecg,
    Thalach,
    Exang,
    Oldpeak,
    Slope,
    Ca,
    Thal,
}

pub const FEATURE_COUNT: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureDomain {
    Integer { min: i32, max: i32 },
    Real { min: f64, max: f64 },
    /// Enumerated codes `0..=max`.
    Code { max: u8 },
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Age,
        Feature::Sex,
        Feature::Cp,
        Feature::Trestbps,
        Feature::Chol,
        Feature::Fbs,
        Feature::Restecg,
        Feature::Thalach,
        Feature::Exang,
        Feature::Oldpeak,
        Feature::Slope,
        Feature::Ca,
        Feature::Thal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Age => "age",
            Feature::Sex => "sex",
            Feature::Cp => "cp",
            Feature::Trestbps => "trestbps",
            Feature::Chol => "chol",
            Feature::Fbs => "fbs",
            Feature::Restecg => "restecg",
            Feature::Thalach => "thalach",
            Feature::Exang => "exang",
            Feature::Oldpeak => "oldpeak",
            Feature::Slope => "slope",
            Feature::Ca => "ca",
            Feature::Thal => "thal",
        }
    }

    pub fn domain(self) -> FeatureDomain {
        match self {
            Feature::Age => FeatureDomain::Integer { min: 1, max: 120 },
            Feature::Trestbps => FeatureDomain::Integer { min: 50, max: 250 },
            Feature::Chol => FeatureDomain::Integer { min: 100, max: 600 },
            Feature::Thalach => FeatureDomain::Integer { min: 60, max: 220 },
            Feature::Oldpeak => FeatureDomain::Real { min: 0.0, max: 6.2 },
            Feature::Sex | Feature::Fbs | Feature::Exang => FeatureDomain::Code { max: 1 },
            Feature::Restecg | Feature::Slope | Feature::Thal => FeatureDomain::Code { max: 2 },
            Feature::Cp | Feature::Ca => FeatureDomain::Code { max: 3 },
        }
    }

    pub fn is_enumerated(self) -> bool {
        matches!(self.domain(), FeatureDomain::Code { .. })
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub age: i32,
    pub sex: u8,
    pub cp: u8,
    pub trestbps: i32,
    pub chol: i32,
    pub fbs: u8,
    pub restecg: u8,
    pub thalach: i32,
    pub exang: u8,
    pub oldpeak: f64,
    pub slope: u8,
    pub ca: u8,
    pub thal: u8,
}

impl FeatureVector {
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Age => f64::from(self.age),
            Feature::Sex => f64::from(self.sex),
            Feature::Cp => f64::from(self.cp),
            Feature::Trestbps => f64::from(self.trestbps),
            Feature::Chol => f64::from(self.chol),
            Feature::Fbs => f64::from(self.fbs),
            Feature::Restecg => f64::from(self.restecg),
            Feature::Thalach => f64::from(self.thalach),
            Feature::Exang => f64::from(self.exang),
            Feature::Oldpeak => self.oldpeak,
            Feature::Slope => f64::from(self.slope),
            Feature::Ca => f64::from(self.ca),
            Feature::Thal => f64::from(self.thal),
        }
    }

    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        Feature::ALL.map(|feature| self.value(feature))
    }

    /// Text form of a single value; integers print without a fraction and
    /// `oldpeak` always keeps at least one decimal place.
    pub fn display_value(&self, feature: Feature) -> String {
        match feature.domain() {
            FeatureDomain::Real { .. } => {
                let value = self.value(feature);
                if value.fract() == 0.0 {
                    format!("{value:.1}")
                } else {
                    value.to_string()
                }
            }
            _ => format!("{}", self.value(feature) as i64),
        }
    }

    pub fn validate(&self) -> Result<(), FeatureDomainError> {
        for feature in Feature::ALL {
            let value = self.value(feature);
            let in_range = match feature.domain() {
                FeatureDomain::Integer { min, max } => {
                    value >= f64::from(min) && value <= f64::from(max)
                }
                FeatureDomain::Real { min, max } => value.is_finite() && value >= min && value <= max,
                FeatureDomain::Code { max } => value <= f64::from(max),
            };
            if !in_range {
                return Err(FeatureDomainError {
                    feature,
                    value: self.display_value(feature),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: RecordId,
    pub identity: String,
    pub timestamp: DateTime<Utc>,
    pub is_high_risk: bool,
    pub confidence: f64,
    pub features: FeatureVector,
}
