// 日志工具模块
//
// 封装 flexi_logger 的初始化和关闭操作，确保异步日志正确 flush

use crate::config::LogConfig;
use flexi_logger::{
    detailed_format, Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming,
    WriteMode,
};
use std::sync::Mutex;

/// 全局日志句柄，用于程序退出时 flush
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = Mutex::new(None);

const DEFAULT_BASENAME: &str = "dbgrant";

/// 配置中的文件名为空时回落到服务名
fn basename(config: &LogConfig) -> &str {
    match config.file.trim() {
        "" => DEFAULT_BASENAME,
        name => name,
    }
}

/// 初始化日志系统
///
/// 级别取 `RUST_LOG`，未设置时使用 `[log] level`。警告及以上同时输出到 stderr。
///
/// # Examples
/// ```no_run
/// use dbgrant::config::Config;
/// use dbgrant::utils::logging;
///
/// let config = Config::default();
/// logging::init(&config.log).expect("日志初始化失败");
/// ```
pub fn init(config: &LogConfig) -> Result<(), flexi_logger::FlexiLoggerError> {
    let basename = basename(config);
    let handle = Logger::try_with_env_or_str(&config.level)?
        .log_to_file(
            FileSpec::default()
                .basename(basename)
                .directory(&config.dir),
        )
        .format_for_files(detailed_format)
        .duplicate_to_stderr(Duplicate::Warn)
        .rotate(
            Criterion::Size(config.max_file_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.max_files),
        )
        .write_mode(WriteMode::Async)
        .append()
        .start()?;

    if let Ok(mut guard) = LOGGER_HANDLE.lock() {
        *guard = Some(handle);
    }

    log::info!(
        "dbgrant {} 日志已写入 {}/{}",
        env!("CARGO_PKG_VERSION"),
        config.dir,
        basename
    );
    Ok(())
}

/// 刷新并关闭日志系统
///
/// 全局 logger 无法注销，关闭后把最大级别降为 Off，之后的日志调用直接丢弃
pub fn shutdown() {
    if let Ok(mut guard) = LOGGER_HANDLE.lock() {
        if let Some(handle) = guard.take() {
            log::info!("日志系统关闭");
            handle.flush();
            log::set_max_level(log::LevelFilter::Off);
        }
    }
}

/// 检查日志系统是否已初始化
pub fn is_initialized() -> bool {
    LOGGER_HANDLE
        .lock()
        .map(|guard| guard.is_some())
        .unwrap_or(false)
}
