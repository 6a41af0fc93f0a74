mod authenticator;
mod config;
mod error;
mod logging;
mod models;
mod storage;
mod store;
mod ui;

use std::error::Error as _;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;

use crate::authenticator::MockAuthenticator;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::storage::FilePreferenceStore;
use crate::store::Store;
use crate::ui::{App, render};

const APP_DIR: &str = "studynotes";
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 配置文件路径 (~/.config/studynotes/config.toml)
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(AppConfig::filename()))
}

/// 获取数据目录路径 (~/.local/share/studynotes/)
fn get_data_dir(config: &AppConfig) -> Result<PathBuf, AppError> {
    let data_dir = match config.data_dir_override() {
        Some(dir) => dir,
        None => dirs::data_dir().ok_or(AppError::NoDataDir)?.join(APP_DIR),
    };

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn real_main() -> Result<(), AppError> {
    let config = match config_path() {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };
    let data_dir = get_data_dir(&config)?;
    logging::init_tracing(&config.logging, &data_dir)?;

    let prefs = FilePreferenceStore::in_dir(&data_dir);
    info!(path = %prefs.path().display(), "theme preference location");

    // 创建应用状态
    let store = Store::new(Box::new(prefs));
    let mut app = App::new(store, MockAuthenticator::new(config.auth.delay()));

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exiting");
    result.map_err(AppError::from)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        if app.poll_auth() {
            app.request_redraw();
        }
        if app.take_redraw() {
            terminal.draw(|f| render(f, app))?;
        }

        // 轮询以便后台认证结果能及时显示
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if ui::handle_key_event(app, key.code) {
                    break;
                }
            }
            Event::Resize(..) => app.request_redraw(),
            _ => {}
        }
    }
    Ok(())
}
