use serde::{Deserialize, Serialize};

/// Visible lifecycle state of one controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequestUiState {
    #[default]
    Idle,
    Busy,
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Text typed into a predict form field
    PredictInput { field: PredictField, value: String },
    /// Text typed into a crawl form field
    CrawlInput { field: CrawlField, value: String },
    /// Radio button checked in one of the crawl groups
    CrawlSelect { field: CrawlField, value: String },
    /// A trigger button was clicked
    Click(Trigger),
    /// Print the current form contents
    Dump,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Predict,
    Crawl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictField {
    Address,
    Area,
    Floor,
    YearBuilt,
    HousingType,
    RentType,
}

impl PredictField {
    /// Element id on the page
    pub fn from_id(id: &str) -> Option<Self> {
        Some(match id {
            "address" => PredictField::Address,
            "area" => PredictField::Area,
            "floor" => PredictField::Floor,
            "year_built" => PredictField::YearBuilt,
            "housing_type" => PredictField::HousingType,
            "rent_type" => PredictField::RentType,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlField {
    SearchMode,
    AddressMode,
    Sido,
    Sigungu,
    Road,
    Bldg,
}

impl CrawlField {
    /// Element id (or radio group name) on the page
    pub fn from_id(id: &str) -> Option<Self> {
        Some(match id {
            "tp" => CrawlField::SearchMode,
            "addrType" => CrawlField::AddressMode,
            "sido" => CrawlField::Sido,
            "sigungu" => CrawlField::Sigungu,
            "road" => CrawlField::Road,
            "bldg" => CrawlField::Bldg,
            _ => return None,
        })
    }

    pub fn is_radio(&self) -> bool {
        matches!(self, CrawlField::SearchMode | CrawlField::AddressMode)
    }
}
