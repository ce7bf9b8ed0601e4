pub mod ascii;
pub mod cli;
pub mod clock;
pub mod config;
pub mod elapsed;
pub mod logging;
pub mod occasion;
pub mod particles;
pub mod presenter;
pub mod snapshot;
pub mod svg;
pub mod terminal;
