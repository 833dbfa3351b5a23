mod history;

pub use history::RasterHistory;
