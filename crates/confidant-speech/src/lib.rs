pub mod speak;

pub use speak::{strip_markup, Speaker, SystemSpeaker};
