use iced::widget::{column, row};
use iced::{window, Element, Size, Subscription, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;

mod config;
mod error;
mod render;
mod state;
mod ui;

#[cfg(test)]
mod test_utils;

use config::Config;
use error::{Severity, ViewerError};
use render::pdf::PdfiumRasterizer;
use render::Renderer;
use state::data::CanvasSize;
use state::viewer::Viewer;

/// Main application state
struct DocumentViewer {
    /// Library, selection, zoom and canvas contents
    viewer: Viewer,
    config: Config,
    /// Status line shown under the toolbar
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Load Files"
    LoadFiles,
    /// User clicked an entry in the file list
    FileSelected(usize),
    /// "< Prev" / "Next >"
    Navigate(i64),
    ZoomIn,
    ZoomOut,
    SaveLibrary,
    LoadLibrary,
    RemoveFile,
    /// Animation timer fired
    AnimationTick,
    /// The main window changed size
    WindowResized(Size),
    CloseRequested(window::Id),
}

impl DocumentViewer {
    /// Create a new instance of the application
    fn new(config: Config) -> (Self, Task<Message>) {
        let rasterizer = PdfiumRasterizer::new(config.pdfium_library.as_deref());
        let renderer = Renderer::new(Box::new(rasterizer), config.fit_mode, config.frame_delay());
        let canvas = canvas_size(&config, Size::new(config.window_width, config.window_height));

        tracing::info!("🎨 Document Viewer initialized, canvas {}x{}", canvas.width, canvas.height);

        (
            DocumentViewer {
                viewer: Viewer::new(renderer, canvas),
                config,
                status: "Ready. Load files or a library to begin.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LoadFiles => {
                let picked = FileDialog::new()
                    .set_title("Select files")
                    .add_filter("JPEG files", &["jpg", "jpeg"])
                    .add_filter("PNG files", &["png"])
                    .add_filter("GIF files", &["gif"])
                    .add_filter("PDF files", &["pdf"])
                    .add_filter("All files", &["*"])
                    .pick_files();

                if let Some(paths) = picked {
                    let paths: Vec<String> = paths
                        .iter()
                        .map(|path| path.to_string_lossy().into_owned())
                        .collect();
                    let result = self.viewer.add_files(paths);
                    self.finish(result);
                    return self.reveal_selection();
                }
            }
            Message::FileSelected(index) => {
                let result = self.viewer.select(index);
                self.finish(result);
            }
            Message::Navigate(delta) => {
                let result = self.viewer.navigate(delta);
                self.finish(result);
                return self.reveal_selection();
            }
            Message::ZoomIn => {
                let result = self.viewer.zoom(self.config.zoom_in_factor);
                self.finish(result);
            }
            Message::ZoomOut => {
                let result = self.viewer.zoom(self.config.zoom_out_factor);
                self.finish(result);
            }
            Message::SaveLibrary => {
                let picked = FileDialog::new()
                    .set_title("Save Library")
                    .set_file_name("library.json")
                    .add_filter("JSON files", &["json"])
                    .save_file();

                if let Some(path) = picked {
                    let path = with_json_extension(path);
                    match self.viewer.save_library(&path) {
                        Ok(()) => {
                            self.status = format!("Library saved to {}", path.display());
                            show_dialog(MessageLevel::Info, "Success", "Library saved successfully.");
                        }
                        Err(e) => self.report(&e),
                    }
                }
            }
            Message::LoadLibrary => {
                let picked = FileDialog::new()
                    .set_title("Load Library")
                    .add_filter("JSON files", &["json"])
                    .pick_file();

                if let Some(path) = picked {
                    match self.viewer.load_library(&path) {
                        Ok(()) => {
                            self.status = format!(
                                "Loaded {} files from {}",
                                self.viewer.library().len(),
                                path.display()
                            );
                        }
                        Err(e) => self.report(&e),
                    }
                }
            }
            Message::RemoveFile => match self.viewer.remove_selected() {
                Ok(()) => {
                    self.refresh_status();
                    show_dialog(MessageLevel::Info, "Success", "Selected file(s) removed.");
                }
                Err(e) => self.report(&e),
            },
            Message::AnimationTick => {
                self.viewer.tick();
            }
            Message::WindowResized(size) => {
                let canvas = canvas_size(&self.config, size);
                if canvas == self.viewer.canvas_size() {
                    return Task::none();
                }
                let result = self.viewer.resize_canvas(canvas);
                if let Err(e) = result {
                    // Resizes arrive in bursts, so only the status line reports them
                    tracing::warn!("Re-render after resize failed: {}", e);
                    self.status = e.to_string();
                }
            }
            Message::CloseRequested(_id) => {
                self.viewer.shutdown();
                return iced::exit();
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let sidebar = ui::sidebar::file_list(
            self.viewer.library(),
            self.viewer.current_index(),
            self.config.sidebar_width,
        );
        let canvas = ui::canvas::document_canvas(self.viewer.visible_frames(), self.viewer.scroll_extent());

        column![ui::toolbar::toolbar(&self.status), row![sidebar, canvas]].into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
            window::close_requests().map(Message::CloseRequested),
        ];

        // Only one frame timer exists, and only while an animation is scheduled
        if let Some(delay) = self.viewer.animation_delay() {
            subscriptions.push(iced::time::every(delay).map(|_| Message::AnimationTick));
        }

        Subscription::batch(subscriptions)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Record the outcome of an action that changes what is displayed
    fn finish(&mut self, result: Result<(), ViewerError>) {
        match result {
            Ok(()) => self.refresh_status(),
            Err(e) => self.report(&e),
        }
    }

    fn refresh_status(&mut self) {
        let zoom = self.viewer.zoom_level() * 100.0;
        self.status = match self.viewer.current_index() {
            Some(index) => format!(
                "{} ({}/{}) at {:.0}%{}",
                self.viewer.library().display_name(index).unwrap_or_default(),
                index + 1,
                self.viewer.library().len(),
                zoom,
                if self.viewer.is_animating() { ", animated" } else { "" }
            ),
            None if self.viewer.is_empty() => "Library is empty.".to_string(),
            None => format!("{} files, none selected, zoom {:.0}%", self.viewer.library().len(), zoom),
        };
    }

    /// Log an error and show it to the user
    fn report(&mut self, error: &ViewerError) {
        let level = match error.severity() {
            Severity::Warning => {
                tracing::warn!("{}", error);
                MessageLevel::Warning
            }
            Severity::Error => {
                tracing::error!("{}", error);
                MessageLevel::Error
            }
        };
        self.status = error.to_string();
        show_dialog(level, error.title(), &error.to_string());
    }

    fn reveal_selection(&self) -> Task<Message> {
        ui::sidebar::reveal(self.viewer.library(), self.viewer.current_index())
    }
}

/// Canvas area left once the sidebar and toolbar are taken out of the window
fn canvas_size(config: &Config, window: Size) -> CanvasSize {
    CanvasSize::new(
        (window.width - config.sidebar_width).max(1.0) as u32,
        (window.height - config.toolbar_height).max(1.0) as u32,
    )
}

fn with_json_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("json")
    }
}

fn show_dialog(level: MessageLevel, title: &str, description: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Set up logging to stdout and to a log file in the user data directory
fn setup_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("document-viewer").join("logs"));
    init_logging(logs_dir)
}

/// Install the global subscriber, with a file layer only when `logs_dir` can be created
fn init_logging(logs_dir: Option<PathBuf>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use std::fs::OpenOptions;
    use std::io::Write;
    use tracing_subscriber::prelude::*;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,document_viewer=debug"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true);

    let logs_dir = logs_dir.filter(|dir| std::fs::create_dir_all(dir).is_ok());

    // Without a log directory the file layer is absent and only stdout is used
    let (file_layer, guard) = match &logs_dir {
        Some(logs_dir) => {
            // Separate sessions in the appended log file
            let log_file_path = logs_dir.join("document-viewer.log");
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_file_path) {
                let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let separator = "=".repeat(80);
                let _ = writeln!(
                    file,
                    "\n{}\n=== New Session Started at {} ===\n{}",
                    separator, timestamp, separator
                );
            }

            let file_appender = tracing_appender::rolling::never(logs_dir, "document-viewer.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_level(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    match logs_dir {
        Some(dir) => tracing::debug!("📝 Logging to {}", dir.join("document-viewer.log").display()),
        None => tracing::warn!("Could not create log directory, logging to stdout only"),
    }
    guard
}

fn main() -> iced::Result {
    // Keep the guard alive for the duration of the program
    let _log_guard = setup_logging();

    let config = Config::load();
    let window = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        exit_on_close_request: false,
        ..window::Settings::default()
    };

    iced::application("Document Viewer", DocumentViewer::update, DocumentViewer::view)
        .subscription(DocumentViewer::subscription)
        .theme(DocumentViewer::theme)
        .window(window)
        .centered()
        .run_with(move || DocumentViewer::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_canvas_size_subtracts_chrome() {
        let config = Config::default();
        let canvas = canvas_size(&config, Size::new(1000.0, 600.0));
        assert_eq!(
            canvas,
            CanvasSize::new(
                (1000.0 - config.sidebar_width) as u32,
                (600.0 - config.toolbar_height) as u32
            )
        );
        assert_eq!(canvas_size(&config, Size::new(10.0, 10.0)), CanvasSize::new(1, 1));
    }

    #[test]
    fn test_logging_writes_session_header_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let logs_dir = dir.path().join("logs");

        let guard = init_logging(Some(logs_dir.clone()));
        assert!(guard.is_some());
        tracing::warn!("logging test event");
        drop(guard);

        let log = std::fs::read_to_string(logs_dir.join("document-viewer.log")).unwrap();
        assert!(log.contains("=== New Session Started at"));
        assert!(log.contains("logging test event"));
    }

    #[test]
    fn test_status_line_marks_running_animation() {
        let dir = tempfile::tempdir().unwrap();
        let gif = dir.path().join("spin.gif");
        test_utils::write_gif(&gif, 3, 10, 10);

        let (mut app, _task) = DocumentViewer::new(Config::default());
        let result = app.viewer.add_files([gif.to_string_lossy().into_owned()]);
        app.finish(result);
        assert_eq!(app.status, "spin.gif (1/1) at 100%, animated");
    }

    #[test]
    fn test_json_extension_is_added_when_missing() {
        assert_eq!(with_json_extension(PathBuf::from("lib")), Path::new("lib.json"));
        assert_eq!(with_json_extension(PathBuf::from("lib.txt")), Path::new("lib.txt"));
    }
}
