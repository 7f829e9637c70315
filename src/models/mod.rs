mod price_history;
mod window;

pub use {price_history::PriceHistory, window::Window};
