use std::fmt;

use rentscope_types::{CrawlForm, PredictionForm};

use crate::error::RenderError;
use crate::format::group_thousands;

/// Reads the predict form at trigger time
pub trait PredictionInput: Send + Sync {
    fn read_form(&self) -> PredictionForm;
}

/// The predict result region. Every outcome replaces its whole content.
pub trait PredictionOutput: Send + Sync {
    fn render(&self, display: PredictionDisplay);
}

/// Content of the predict result region
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionDisplay {
    /// Address was empty
    AddressPrompt,
    Loading,
    Estimate { deposit: f64, monthly: f64 },
    Failed,
}

/// Unit appended to both predicted amounts (10,000 KRW)
pub const PRICE_UNIT: &str = "만원";

impl fmt::Display for PredictionDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionDisplay::AddressPrompt => f.write_str("❗ 주소를 입력해주세요."),
            PredictionDisplay::Loading => f.write_str("⏳ 예측 중..."),
            PredictionDisplay::Estimate { deposit, monthly } => write!(
                f,
                "💰 보증금 예측: {} {PRICE_UNIT}\n🧾 월세 예측: {} {PRICE_UNIT}",
                group_thousands(*deposit),
                group_thousands(*monthly),
            ),
            PredictionDisplay::Failed => f.write_str("❌ 예측 실패 (서버/네트워크 오류)"),
        }
    }
}

/// Reads the crawl form at trigger time
pub trait CrawlInput: Send + Sync {
    fn read_form(&self) -> CrawlForm;
}

/// Widgets the crawl controller drives
pub trait CrawlOutput: Send + Sync {
    fn set_trigger(&self, appearance: &TriggerAppearance);
    fn set_loading_visible(&self, visible: bool);
    fn clear_rows(&self);
    fn append_row(&self, row: TableRow) -> Result<(), RenderError>;
    fn set_result_area_visible(&self, visible: bool);
    /// Blocking, user-acknowledged message
    fn alert(&self, message: &str);
}

/// Enabled state, label and background color of a trigger button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerAppearance {
    pub enabled: bool,
    pub label: String,
    pub color: String,
}

impl TriggerAppearance {
    pub fn idle() -> Self {
        Self {
            enabled: true,
            label: "검색".to_string(),
            color: "#4CAF50".to_string(),
        }
    }

    pub fn searching() -> Self {
        Self {
            enabled: false,
            label: "검색 중...".to_string(),
            color: "#ff4d4d".to_string(),
        }
    }
}

/// Number of columns in the crawl result table
pub const RESULT_COLUMNS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    /// Area, contract term, deposit, monthly rent, contract type
    Cells([String; RESULT_COLUMNS]),
    /// One centered cell spanning `colspan` columns
    Notice { text: String, colspan: usize },
}

impl TableRow {
    pub fn no_results() -> Self {
        TableRow::Notice {
            text: "검색 결과가 없습니다".to_string(),
            colspan: RESULT_COLUMNS,
        }
    }
}
