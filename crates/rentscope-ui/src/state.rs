use std::sync::{Mutex, PoisonError};

use rentscope_core::{CrawlInput, PredictionInput};
use rentscope_types::{CrawlField, CrawlForm, PredictField, PredictionForm};

/// Page form fields, shared between the event loop (which edits them) and
/// the controllers (which read them when a trigger fires)
#[derive(Default)]
pub struct FormState {
    predict: Mutex<PredictionForm>,
    crawl: Mutex<CrawlForm>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_predict(&self, field: PredictField, value: String) {
        let mut form = self.predict.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = match field {
            PredictField::Address => &mut form.address,
            PredictField::Area => &mut form.area,
            PredictField::Floor => &mut form.floor,
            PredictField::YearBuilt => &mut form.year_built,
            PredictField::HousingType => &mut form.housing_type,
            PredictField::RentType => &mut form.rent_type,
        };
        *slot = value;
    }

    /// Text fields take the value as typed; radio groups record the checked value
    pub fn set_crawl(&self, field: CrawlField, value: String) {
        let mut form = self.crawl.lock().unwrap_or_else(PoisonError::into_inner);
        match field {
            CrawlField::SearchMode => form.search_mode = Some(value),
            CrawlField::AddressMode => form.address_mode = Some(value),
            CrawlField::Sido => form.sido = value,
            CrawlField::Sigungu => form.sigungu = value,
            CrawlField::Road => form.road = value,
            CrawlField::Bldg => form.bldg = value,
        }
    }

    pub fn predict_form(&self) -> PredictionForm {
        self.predict
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn crawl_form(&self) -> CrawlForm {
        self.crawl
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PredictionInput for FormState {
    fn read_form(&self) -> PredictionForm {
        self.predict_form()
    }
}

impl CrawlInput for FormState {
    fn read_form(&self) -> CrawlForm {
        self.crawl_form()
    }
}
