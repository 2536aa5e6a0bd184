use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::numeric::{parse_float_prefix, parse_int_prefix};

/// Housing types the price predictor is trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HousingType {
    #[serde(rename = "연립다세대")]
    Villa,
    #[serde(rename = "오피스텔")]
    Officetel,
}

impl HousingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HousingType::Villa => "연립다세대",
            HousingType::Officetel => "오피스텔",
        }
    }
}

impl FromStr for HousingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "연립다세대" => Ok(HousingType::Villa),
            "오피스텔" => Ok(HousingType::Officetel),
            other => Err(format!("unknown housing type: {other}")),
        }
    }
}

impl fmt::Display for HousingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Jeonse (lump-sum deposit) or wolse (monthly rent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentType {
    #[serde(rename = "전세")]
    Jeonse,
    #[serde(rename = "월세")]
    Wolse,
}

impl RentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentType::Jeonse => "전세",
            RentType::Wolse => "월세",
        }
    }
}

impl FromStr for RentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "전세" => Ok(RentType::Jeonse),
            "월세" => Ok(RentType::Wolse),
            other => Err(format!("unknown rent type: {other}")),
        }
    }
}

impl fmt::Display for RentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text of the predict form, exactly as typed
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionForm {
    pub address: String,
    pub area: String,
    pub floor: String,
    pub year_built: String,
    pub housing_type: String,
    pub rent_type: String,
}

impl Default for PredictionForm {
    /// Text inputs start empty, selects on their first option
    fn default() -> Self {
        Self {
            address: String::new(),
            area: String::new(),
            floor: String::new(),
            year_built: String::new(),
            housing_type: HousingType::Villa.to_string(),
            rent_type: RentType::Jeonse.to_string(),
        }
    }
}

impl PredictionForm {
    /// Build the wire payload. Only the address is trimmed; numeric fields
    /// that fail to parse are carried as `None` and sent as `null`.
    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            address: self.address.trim().to_string(),
            area: parse_float_prefix(&self.area).filter(|v| v.is_finite()),
            floor: parse_int_prefix(&self.floor),
            year_built: parse_int_prefix(&self.year_built),
            housing_type: self.housing_type.clone(),
            rent_type: self.rent_type.clone(),
        }
    }
}

/// Body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub address: String,
    pub area: Option<f64>,
    pub floor: Option<i64>,
    pub year_built: Option<i64>,
    pub housing_type: String,
    pub rent_type: String,
}

/// Success body of `POST /predict`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub deposit_pred: f64,
    pub monthly_pred: f64,
}
