pub mod load;
pub mod types;

pub use load::{
    apply_data_dir_defaults, get_kroviz_data_dir, load_default, load_explicit, load_from_path,
};
pub use types::{AppConfig, BackendConfig, CaptureConfig, LoggingConfig};
