// Domain layer: models, the ROI estimator and ports. No transport or storage
// dependencies.

pub mod model;
pub mod ports;
pub mod roi;
