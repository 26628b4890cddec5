use {
    log::{LevelFilter, Log, Metadata, Record},
    std::{
        fs::{self, File, OpenOptions},
        io::Write,
        path::PathBuf,
        sync::Mutex,
        time::{SystemTime, UNIX_EPOCH},
    },
};

const SECONDS_PER_DAY: u64 = 86_400;

/// Where log lines go and how verbose they are.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Directory for dated log files. `None` logs to stdout.
    pub dir: Option<PathBuf>,
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: None,
            level: default_level(),
        }
    }
}

impl LogConfig {
    /// Read `MIRROR_LOG_DIR` and `MIRROR_LOG_LEVEL`.
    ///
    /// Unknown level names fall back to the build default (Debug for debug
    /// builds, Info for release builds).
    pub fn from_env() -> Self {
        let dir = std::env::var_os("MIRROR_LOG_DIR").map(PathBuf::from);
        let level = std::env::var("MIRROR_LOG_LEVEL")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(default_level);
        Self { dir, level }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }
}

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn format_record(record: &Record) -> String {
    format!(
        "{} [{}] [thread:{:?}] {}:{} - {}",
        format_timestamp(),
        record.level(),
        std::thread::current().id(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

/// Logger that prints every record to stdout.
pub struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        println!("{}", format_record(record));
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

struct FileLoggerState {
    dir: PathBuf,
    current_date: String,
    file: File,
}

/// Logger that appends to `<dir>/<YYYY-MM-DD>.log` and switches files when
/// the UTC date changes.
pub struct FileLogger {
    state: Mutex<FileLoggerState>,
}

fn open_dated(dir: &std::path::Path, date: &str) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(format!("{date}.log")))
}

impl FileLogger {
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let current_date = format_today();
        let file = open_dated(&dir, &current_date)?;
        Ok(Self {
            state: Mutex::new(FileLoggerState {
                dir,
                current_date,
                file,
            }),
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let today = format_today();
        if today != state.current_date {
            match open_dated(&state.dir, &today) {
                Ok(file) => {
                    state.file = file;
                    state.current_date = today;
                }
                // keep writing to the old file
                Err(error) => eprintln!("Failed to roll log file over to {today}: {error}"),
            }
        }

        let line = format_record(record);
        if let Err(error) = writeln!(state.file, "{line}") {
            eprintln!("Failed to write to log file: {error}");
            eprintln!("{line}");
        }
    }

    fn flush(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.file.flush().ok();
    }
}

/// Install the process-wide logger described by `config`.
///
/// Only the first successful call has an effect; later calls are ignored so
/// tests and binaries can both call this freely. Fails only when the log
/// directory cannot be created.
pub fn init_logger(config: &LogConfig) -> std::io::Result<()> {
    let installed = match &config.dir {
        Some(dir) => {
            let logger: &'static FileLogger = Box::leak(Box::new(FileLogger::new(dir)?));
            log::set_logger(logger).is_ok()
        }
        None => {
            static STDOUT: StdoutLogger = StdoutLogger;
            log::set_logger(&STDOUT).is_ok()
        }
    };
    if installed {
        log::set_max_level(config.level);
    }
    Ok(())
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp() -> String {
    let secs = unix_seconds();
    let (year, month, day) = civil_from_days((secs / SECONDS_PER_DAY) as i64);
    let time_of_day = secs % SECONDS_PER_DAY;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Current UTC date as `YYYY-MM-DD`.
pub fn format_today() -> String {
    let (year, month, day) = civil_from_days((unix_seconds() / SECONDS_PER_DAY) as i64);
    format!("{year:04}-{month:02}-{day:02}")
}

// Days since 1970-01-01 to (year, month, day), Howard Hinnant's algorithm.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    (if m <= 2 { y + 1 } else { y }, m, d)
}
