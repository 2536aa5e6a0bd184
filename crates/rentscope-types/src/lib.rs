pub mod crawl;
pub mod numeric;
pub mod predict;
pub mod types;

pub use crawl::{
    AddressMode, CellValue, CrawlForm, CrawlRequest, CrawlResponse, CrawlResultRow, SearchMode,
    UnknownSelection,
};
pub use predict::{HousingType, PredictionForm, PredictionRequest, PredictionResult, RentType};
pub use types::{AppEvent, CrawlField, PredictField, RequestUiState, Trigger};
