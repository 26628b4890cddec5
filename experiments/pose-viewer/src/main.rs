use {
    minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions},
    mirror_base::init_logger,
    mirror_infer::Preloader,
    pose_viewer::{Viewer, ViewerConfig, landmarker_loader},
    std::time::{Duration, Instant},
};

const WINDOW_WIDTH: usize = 1280;
const WINDOW_HEIGHT: usize = 480;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ViewerConfig::from_env_and_args()?;
    init_logger(&config.log)?;

    // the model starts loading before the window or camera exist
    let preloader = Preloader::new();
    preloader.preload(landmarker_loader(
        config.model_path.clone(),
        config.device.clone(),
    ));

    log::info!("Pose Mirror");
    log::info!("Camera: {}, device: {}", config.camera, config.device);

    // create display window
    let mut window = Window::new(
        "Pose Mirror",
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    let mut viewer = Viewer::new(config, preloader, WINDOW_WIDTH, WINDOW_HEIGHT);
    viewer.start();

    let mut title = String::new();
    log::info!("Starting display loop...");
    while window.is_open() && !window.is_key_down(Key::Escape) {
        // keys and mouse
        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            viewer.toggle_camera();
        }
        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            viewer.retry();
        }
        viewer.drag(
            window.get_mouse_pos(MouseMode::Discard),
            window.get_mouse_down(MouseButton::Left),
        );
        if let Some((_, delta)) = window.get_scroll_wheel() {
            viewer.scroll(delta);
        }
        let (width, height) = window.get_size();
        viewer.resize(width, height);

        // camera frame and detection; the frame wait paces the loop
        let was_running = viewer.is_running();
        viewer.step().await;
        if !was_running {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        // status line
        let next_title = viewer.title();
        if next_title != title {
            window.set_title(&next_title);
            title = next_title;
        }

        // display, or just pump window events when it's too early
        match viewer.render(Instant::now()) {
            Some(screen) => {
                window.update_with_buffer(screen.pixels(), screen.width(), screen.height())?
            }
            None => window.update(),
        }
    }

    viewer.stop();
    log::info!("Pose Mirror exiting");
    Ok(())
}
