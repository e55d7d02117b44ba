pub mod anti_join;
pub mod coalesce;
pub mod foreign;
