pub mod console;
pub mod places;
pub mod popup;
