//! NASA POWER parameter codes understood by the estimator, and the threshold rules
//! attached to them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A daily parameter recognised by the estimator.
///
/// Serialized as the provider's parameter code (e.g. `"T2M"`).
///
/// # Examples
///
/// ```
/// use seasonal_weather::Parameter;
///
/// assert_eq!(Parameter::from_code("RH2M"), Some(Parameter::Humidity));
/// assert_eq!(Parameter::WindSpeed.code(), "WS2M");
/// assert_eq!(Parameter::from_code("WD2M"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Parameter {
    #[serde(rename = "T2M")]
    Temperature,
    #[serde(rename = "T2M_MAX")]
    TemperatureMax,
    #[serde(rename = "T2M_MIN")]
    TemperatureMin,
    #[serde(rename = "PRECTOTCORR")]
    Precipitation,
    #[serde(rename = "WS2M")]
    WindSpeed,
    #[serde(rename = "RH2M")]
    Humidity,
    #[serde(rename = "T2MWET")]
    WetBulbTemperature,
    #[serde(rename = "IMERG_PRECLIQUID_PROB")]
    LiquidPrecipitationProbability,
    #[serde(rename = "CLRSKY_SFC_SW_DWN")]
    ClearSkyIrradiance,
}

const TEMPERATURE_RULES: &[ThresholdRule] = &[
    ThresholdRule::new(Condition::VeryHot, Comparison::Above),
    ThresholdRule::new(Condition::VeryCold, Comparison::Below),
];
const WIND_RULES: &[ThresholdRule] = &[ThresholdRule::new(Condition::VeryWindy, Comparison::Above)];
const PRECIPITATION_RULES: &[ThresholdRule] =
    &[ThresholdRule::new(Condition::VeryWet, Comparison::Above)];
const HUMIDITY_RULES: &[ThresholdRule] = &[ThresholdRule::new(
    Condition::VeryUncomfortable,
    Comparison::Above,
)];

impl Parameter {
    pub const ALL: [Parameter; 9] = [
        Parameter::Temperature,
        Parameter::TemperatureMax,
        Parameter::TemperatureMin,
        Parameter::Precipitation,
        Parameter::WindSpeed,
        Parameter::Humidity,
        Parameter::WetBulbTemperature,
        Parameter::LiquidPrecipitationProbability,
        Parameter::ClearSkyIrradiance,
    ];

    /// The code used by the provider for this parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Parameter::Temperature => "T2M",
            Parameter::TemperatureMax => "T2M_MAX",
            Parameter::TemperatureMin => "T2M_MIN",
            Parameter::Precipitation => "PRECTOTCORR",
            Parameter::WindSpeed => "WS2M",
            Parameter::Humidity => "RH2M",
            Parameter::WetBulbTemperature => "T2MWET",
            Parameter::LiquidPrecipitationProbability => "IMERG_PRECLIQUID_PROB",
            Parameter::ClearSkyIrradiance => "CLRSKY_SFC_SW_DWN",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Parameter::Temperature => "Air Temperature at 2 meters (°C)",
            Parameter::TemperatureMax => "Daily Maximum Temperature (°C)",
            Parameter::TemperatureMin => "Daily Minimum Temperature (°C)",
            Parameter::Precipitation => "Corrected Total Precipitation (mm/day)",
            Parameter::WindSpeed => "Wind Speed at 2 meters (m/s)",
            Parameter::Humidity => "Relative Humidity at 2 meters (%)",
            Parameter::WetBulbTemperature => "Wet-bulb Temperature at 2 meters (°C)",
            Parameter::LiquidPrecipitationProbability => "Probability of Liquid Precipitation",
            Parameter::ClearSkyIrradiance => "Clear-sky irradiance",
        }
    }

    /// Looks up a parameter by its exact provider code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    /// Exceedance conditions computed from this parameter's samples.
    ///
    /// Only the mean and maximum temperature, wind speed, precipitation and humidity carry rules.
    pub fn threshold_rules(&self) -> &'static [ThresholdRule] {
        match self {
            Parameter::Temperature | Parameter::TemperatureMax => TEMPERATURE_RULES,
            Parameter::WindSpeed => WIND_RULES,
            Parameter::Precipitation => PRECIPITATION_RULES,
            Parameter::Humidity => HUMIDITY_RULES,
            Parameter::TemperatureMin
            | Parameter::WetBulbTemperature
            | Parameter::LiquidPrecipitationProbability
            | Parameter::ClearSkyIrradiance => &[],
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A named "very" condition whose probability is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    VeryHot,
    VeryCold,
    VeryWindy,
    VeryWet,
    VeryUncomfortable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Strictly greater than the limit.
    Above,
    /// Strictly less than the limit.
    Below,
}

impl Comparison {
    pub fn crosses(&self, value: f64, limit: f64) -> bool {
        match self {
            Comparison::Above => value > limit,
            Comparison::Below => value < limit,
        }
    }
}

/// Pairs a condition with the direction a sample has to cross its configured limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdRule {
    pub condition: Condition,
    pub comparison: Comparison,
}

impl ThresholdRule {
    pub const fn new(condition: Condition, comparison: Comparison) -> Self {
        Self {
            condition,
            comparison,
        }
    }
}

/// The set of parameters a deployment accepts in requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterCatalog {
    parameters: Vec<Parameter>,
}

impl ParameterCatalog {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn contains(&self, parameter: Parameter) -> bool {
        self.parameters.contains(&parameter)
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Splits requested codes into catalog parameters (request order, duplicates removed)
    /// and the codes that were not recognised.
    pub fn resolve<S: AsRef<str>>(&self, codes: &[S]) -> (Vec<Parameter>, Vec<String>) {
        let mut accepted: Vec<Parameter> = Vec::with_capacity(codes.len());
        let mut rejected = Vec::new();
        for code in codes {
            let code = code.as_ref();
            match Parameter::from_code(code).filter(|p| self.contains(*p)) {
                Some(parameter) if !accepted.contains(&parameter) => accepted.push(parameter),
                Some(_) => {}
                None => rejected.push(code.to_string()),
            }
        }
        (accepted, rejected)
    }
}

impl Default for ParameterCatalog {
    fn default() -> Self {
        Self::new(Parameter::ALL.to_vec())
    }
}
