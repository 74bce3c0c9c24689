use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::screening::{
    screening_router, ScoringResult, ScreeningConfig, ScreeningEngine,
};

pub(super) const STRONG_RESUME: &str = "Jordan Pike\n\
Pooler, GA 31322\n\
Combo Welder / Fitter\n\
\n\
Macaljon Inc., Savannah GA\n\
Welder/Fitter, March 2014 \u{2013} Present\n\
Flux core and MIG on carbon steel and stainless storage tanks built to API 650.\n\
Blueprint reading, tape measure, grinder, torch, plasma.\n\
OSHA 10 certified. AWS D1.1 3G/4G.\n";

pub(super) const TENURED_RESUME: &str =
    "10 years welding experience. stainless steel. tig and mig work. blueprint reading. osha certified.";

pub(super) const PROMISING_RESUME: &str =
    "3 years flux core and mig welding on carbon steel and stainless. blueprint, tape measure. osha.";

pub(super) const MACALJON_RESUME: &str = "Worked at Macaljon from 2015 to 2020 as a welder";

pub(super) const CLAIMED_TENURE_RESUME: &str =
    "15+ years in the trade as a pipe welder.\nAWS certification issued 2010 - 2012";

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn engine() -> ScreeningEngine {
    ScreeningEngine::new(ScreeningConfig::default()).expect("default rubric is valid")
}

pub(super) fn score(text: &str) -> ScoringResult {
    engine().score_as_of(text, today())
}

pub(super) fn screening_router_with_engine(engine: ScreeningEngine) -> axum::Router {
    screening_router(Arc::new(engine))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
