pub mod attribute;
pub mod init;
pub mod settings;
pub mod summary;

pub use attribute::handle_attribute;
pub use init::init_config;
pub use settings::ReportSettings;
pub use summary::handle_summary;
