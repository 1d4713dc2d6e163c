use std::path::PathBuf;

/// The backend serves its WebSocket on this port of the host it runs on.
pub const BACKEND_WS_PORT: u16 = 8080;
const BACKEND_HOST: &str = "127.0.0.1";

const APP_DIR: &str = "mpv-remote";

pub fn default_backend_url() -> String {
    format!("ws://{}:{}", BACKEND_HOST, BACKEND_WS_PORT)
}

pub fn data_dir() -> PathBuf {
    // ~/.local/share/mpv-remote on macOS too, for a single layout everywhere
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn log_path() -> PathBuf {
    data_dir().join("mpv-remote.log")
}
