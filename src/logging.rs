use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::error::AppError;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "wrap-snake.log";

/// Routes `log` records to `path`; the terminal itself belongs to the game screen.
///
/// `LevelFilter::Off` skips creating the file entirely.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    if level == LevelFilter::Off {
        return Ok(());
    }

    let file = File::create(path)?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use log::LevelFilter;

    use super::init;

    #[test]
    fn disabled_logging_creates_no_file() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("wrap-snake-log-off-{nanos}.log"));

        init(&path, LevelFilter::Off).expect("disabled logging should succeed");

        assert!(!path.exists());
    }
}
