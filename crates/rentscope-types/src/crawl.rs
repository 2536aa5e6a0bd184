use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::numeric::format_js_number;

/// Property category searched on the transaction registry (`tp`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    #[serde(rename = "아파트")]
    Apartment,
    #[serde(rename = "연립다세대")]
    Villa,
    #[serde(rename = "단독다가구")]
    Detached,
    #[serde(rename = "오피스텔")]
    Officetel,
}

impl SearchMode {
    pub const ALL: [SearchMode; 4] = [
        SearchMode::Apartment,
        SearchMode::Villa,
        SearchMode::Detached,
        SearchMode::Officetel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Apartment => "아파트",
            SearchMode::Villa => "연립다세대",
            SearchMode::Detached => "단독다가구",
            SearchMode::Officetel => "오피스텔",
        }
    }
}

/// How the location is addressed (`addr`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressMode {
    /// Lot-number address
    #[serde(rename = "지번")]
    Jibun,
    /// Road-name address
    #[serde(rename = "도로명")]
    Road,
}

impl AddressMode {
    pub const ALL: [AddressMode; 2] = [AddressMode::Jibun, AddressMode::Road];

    pub fn as_str(&self) -> &'static str {
        match self {
            AddressMode::Jibun => "지번",
            AddressMode::Road => "도로명",
        }
    }
}

/// A radio group whose checked value could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSelection {
    pub group: &'static str,
    pub value: Option<String>,
}

impl fmt::Display for UnknownSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "'{}' 선택값이 올바르지 않습니다: {}", self.group, value),
            None => write!(f, "'{}' 항목을 선택해주세요", self.group),
        }
    }
}

impl std::error::Error for UnknownSelection {}

macro_rules! radio_from_str {
    ($ty:ty, $group:literal) => {
        impl FromStr for $ty {
            type Err = UnknownSelection;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|mode| mode.as_str() == s)
                    .ok_or_else(|| UnknownSelection {
                        group: $group,
                        value: Some(s.to_string()),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

radio_from_str!(SearchMode, "tp");
radio_from_str!(AddressMode, "addrType");

/// Raw crawl form: radio selections may be missing, text fields are sent as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlForm {
    pub search_mode: Option<String>,
    pub address_mode: Option<String>,
    pub sido: String,
    pub sigungu: String,
    pub road: String,
    pub bldg: String,
}

impl CrawlForm {
    /// Resolve both radio groups. Fails on the first group with no usable value.
    pub fn to_request(&self) -> Result<CrawlRequest, UnknownSelection> {
        let search_mode = resolve(self.search_mode.as_deref(), "tp")?;
        let address_mode = resolve(self.address_mode.as_deref(), "addrType")?;

        Ok(CrawlRequest {
            search_mode,
            address_mode,
            sido: self.sido.clone(),
            sigungu: self.sigungu.clone(),
            road: self.road.clone(),
            bldg: self.bldg.clone(),
        })
    }
}

fn resolve<T>(value: Option<&str>, group: &'static str) -> Result<T, UnknownSelection>
where
    T: FromStr<Err = UnknownSelection>,
{
    match value {
        Some(v) => v.parse(),
        None => Err(UnknownSelection { group, value: None }),
    }
}

/// Body of `POST /api/crawl`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlRequest {
    #[serde(rename = "tp")]
    pub search_mode: SearchMode,
    #[serde(rename = "addr")]
    pub address_mode: AddressMode,
    pub sido: String,
    pub sigungu: String,
    pub road: String,
    pub bldg: String,
}

/// Table cells arrive as either text or bare numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => write!(f, "{i}"),
                (_, Some(u), _) => write!(f, "{u}"),
                (_, _, Some(v)) => f.write_str(&format_js_number(v)),
                _ => write!(f, "{n}"),
            },
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One rental transaction. Keys are the registry's own column labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlResultRow {
    #[serde(rename = "전용면적(m^2)", default)]
    pub area_m2: Option<CellValue>,
    #[serde(rename = "계약기간", default)]
    pub contract_term: Option<CellValue>,
    #[serde(rename = "보증금(만원)", default)]
    pub deposit_manwon: Option<CellValue>,
    #[serde(rename = "월세(만원)", default)]
    pub monthly_manwon: Option<CellValue>,
    #[serde(rename = "계약구분", default)]
    pub contract_type: Option<CellValue>,

    #[serde(rename = "계약일", default, skip_serializing_if = "Option::is_none")]
    pub contract_date: Option<CellValue>,
    #[serde(rename = "종전보증금(만원)", default, skip_serializing_if = "Option::is_none")]
    pub previous_deposit_manwon: Option<CellValue>,
    #[serde(rename = "종전월세(만원)", default, skip_serializing_if = "Option::is_none")]
    pub previous_monthly_manwon: Option<CellValue>,
}

impl CrawlResultRow {
    /// Cells in display order: area, term, deposit, monthly rent, contract type
    pub fn cells(&self) -> [String; 5] {
        [
            &self.area_m2,
            &self.contract_term,
            &self.deposit_manwon,
            &self.monthly_manwon,
            &self.contract_type,
        ]
        .map(|cell| cell.as_ref().map(ToString::to_string).unwrap_or_default())
    }
}

/// Success body of `POST /api/crawl`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlResponse {
    #[serde(default)]
    pub result: Option<Vec<CrawlResultRow>>,
}

impl CrawlResponse {
    /// Rows to render; absent, null and empty lists are all "no results"
    pub fn rows(&self) -> &[CrawlResultRow] {
        self.result.as_deref().unwrap_or_default()
    }
}
