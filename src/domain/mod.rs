// Domain layer - Traffic categories, time ranges and chart data
pub mod category;
pub mod time_range;
pub mod traffic;
