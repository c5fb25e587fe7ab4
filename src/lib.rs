pub mod cli;
pub mod error;

pub mod commands {
    pub mod convert;
    pub use convert::{convert, ConvertSummary};
}

pub mod core {
    pub mod projector;
    pub mod record;
    pub mod schema;
    pub mod selector;
}

pub mod io {
    pub mod readers;
    pub mod sites_reader;
    pub mod table_writer;
}

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
