use log::info;
use once_cell::sync::OnceCell;

static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initializes `env_logger` once per process. Level is taken from `RUST_LOG`.
///
/// A logger installed by someone else is left in place.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        match env_logger::builder().is_test(false).try_init() {
            Ok(_) => info!("gradmatch logger initialized."),
            Err(e) => eprintln!("Failed to initialize logger: {}. Logging might not work as expected.", e),
        };
    });
}
