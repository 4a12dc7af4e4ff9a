pub mod blockize;
pub mod format;
pub mod xpm;
