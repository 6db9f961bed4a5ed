pub mod audio;
pub mod card;
pub mod config;
pub mod demo;
pub mod prelude;
pub mod runtime;
pub mod ticker;
pub mod tone;
pub mod visual;

pub use card::PlayerCard;
pub use config::PlayerConfig;
