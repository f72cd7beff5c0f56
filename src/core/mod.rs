pub mod aggregator;
pub mod correction_factor;
pub mod envelope;
pub mod fenestration;
pub mod formula;
pub mod model;
pub mod orientation;
pub mod ottv;
pub mod units;
