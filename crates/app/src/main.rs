//! Tango - screen and region capture to PNG

#[cfg(target_os = "macos")]
mod ui;

#[cfg(target_os = "macos")]
fn main() -> anyhow::Result<()> {
    use app::{AppConfig, Orchestrator};
    use capture::macos::MacCapture;
    use eframe::egui;
    use ui::TangoApp;

    init_logging();

    let config = AppConfig::default();
    let orchestrator = Orchestrator::new(
        config.clone(),
        Box::new(MacCapture::new()),
        Box::new(MacCapture::new()),
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0])
            .with_title("Tango")
            .with_resizable(true),
        ..Default::default()
    };

    log::info!("Starting Tango");
    eframe::run_native(
        "Tango",
        native_options,
        Box::new(|cc| Ok(Box::new(TangoApp::new(cc, orchestrator)))),
    )
    .map_err(|e| anyhow::anyhow!("UI failed: {}", e))?;

    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn main() -> anyhow::Result<()> {
    init_logging();
    log::error!("Tango captures through the macOS screen capture APIs and cannot run on this platform");
    anyhow::bail!("unsupported platform")
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
