pub mod price_service;
pub mod aggregate_service;
pub mod chart_service;
pub mod pipeline_service;
