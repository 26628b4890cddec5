use {
    crate::{
        Layout, Pipeline, Status, ViewerConfig, draw_frame, draw_scene, start_pipeline,
        window_title,
    },
    mirror_camera::Camera,
    mirror_image::Image,
    mirror_infer::{JointAngles, PoseLandmarker, Preloader},
    mirror_scene::{
        BACKGROUND_COLOR, DETECTION_INTERVAL, FrameThrottle, Framebuffer, OrbitCamera,
        RENDER_INTERVAL, Renderer, Skeleton,
    },
    std::{
        f32::consts::TAU,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::{Duration, Instant},
    },
    tokio::task::JoinHandle,
};

/// How long `step` waits for a frame before handing control back to the
/// window.
pub const FRAME_TIMEOUT: Duration = Duration::from_millis(100);

/// Zoom factor per wheel notch.
pub const ZOOM_STEP: f32 = 0.95;

/// Everything the viewer does apart from talking to the window: the camera
/// state machine, detection, the 3D scene and the composed screen buffer.
pub struct Viewer {
    config: ViewerConfig,
    preloader: Preloader<PoseLandmarker>,
    status: Status,
    starting: Option<JoinHandle<Result<Pipeline, String>>>,
    loading_model: Arc<AtomicBool>,
    pipeline: Option<Pipeline>,
    epoch: Instant,
    detect_throttle: FrameThrottle,
    render_throttle: FrameThrottle,
    skeleton: Skeleton,
    angles: Option<JointAngles>,
    last_frame: Option<Image>,
    orbit: OrbitCamera,
    renderer: Renderer,
    scene: Framebuffer,
    screen: Framebuffer,
    layout: Layout,
    drag_from: Option<(f32, f32)>,
}

impl Viewer {
    /// A stopped viewer drawing into a `width` x `height` screen. Call
    /// [`Viewer::start`] to bring up the camera.
    pub fn new(
        config: ViewerConfig,
        preloader: Preloader<PoseLandmarker>,
        width: usize,
        height: usize,
    ) -> Self {
        let layout = Layout::new(width, height);
        Self {
            config,
            preloader,
            status: Status::Preparing,
            starting: None,
            loading_model: Arc::new(AtomicBool::new(false)),
            pipeline: None,
            epoch: Instant::now(),
            detect_throttle: FrameThrottle::new(DETECTION_INTERVAL),
            render_throttle: FrameThrottle::new(RENDER_INTERVAL),
            skeleton: Skeleton::new(),
            angles: None,
            last_frame: None,
            orbit: OrbitCamera::new(layout.scene.width, layout.scene.height),
            renderer: Renderer::default(),
            scene: Framebuffer::new(layout.scene.width, layout.scene.height),
            screen: Framebuffer::new(width, height),
            layout,
            drag_from: None,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn angles(&self) -> Option<&JointAngles> {
        self.angles.as_ref()
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    /// The camera is running or on its way up.
    pub fn is_running(&self) -> bool {
        self.pipeline.is_some() || self.starting.is_some()
    }

    pub fn title(&self) -> String {
        window_title(&self.status, self.angles.as_ref())
    }

    /// Kick off model acquisition and camera open in the background. Does
    /// nothing while a camera is running or starting.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        log::info!("Starting camera {}", self.config.camera);
        self.status = Status::Preparing;
        // the start task clears this once it holds a model
        self.loading_model.store(true, Ordering::Release);
        self.starting = Some(tokio::spawn(start_pipeline(
            self.preloader.clone(),
            self.config.clone(),
            Arc::clone(&self.loading_model),
        )));
    }

    /// Drop the camera, which stops capture, and forget the smoothing state.
    /// The model stays loaded.
    pub fn stop(&mut self) {
        if let Some(handle) = self.starting.take() {
            handle.abort();
        }
        if let Some(pipeline) = self.pipeline.take() {
            if let Ok(mut landmarker) = pipeline.landmarker.try_lock() {
                landmarker.reset();
            }
            log::info!("Camera stopped");
        }
        self.last_frame = None;
        self.status = Status::Stopped;
    }

    /// `Space`: stop a running camera, start a stopped one. An error needs
    /// an explicit [`Viewer::retry`].
    pub fn toggle_camera(&mut self) {
        if self.is_running() {
            self.stop();
        } else if !matches!(self.status, Status::Error(_)) {
            self.start();
        }
    }

    /// `R`: start again after an error. Returns whether a start was issued.
    pub fn retry(&mut self) -> bool {
        if !matches!(self.status, Status::Error(_)) {
            return false;
        }
        log::info!("Retrying after error");
        self.start();
        true
    }

    fn fail(&mut self, message: String) {
        log::error!("{message}");
        self.pipeline = None;
        self.last_frame = None;
        self.status = Status::Error(message);
    }

    /// Advance a pending start: update the busy status while it runs, then
    /// move to `Connected` or `Error`.
    pub async fn poll_start(&mut self) {
        let Some(handle) = &self.starting else {
            return;
        };
        if !handle.is_finished() {
            let loading = self.loading_model.load(Ordering::Acquire) || self.preloader.is_loading();
            self.status = if loading {
                Status::LoadingModel
            } else {
                Status::StartingCamera
            };
            return;
        }
        let Some(handle) = self.starting.take() else {
            return;
        };
        match handle.await {
            Ok(Ok(pipeline)) => {
                log::info!("Camera connected");
                self.pipeline = Some(pipeline);
                self.detect_throttle.reset();
                self.status = Status::Connected;
            }
            Ok(Err(message)) => self.fail(message),
            Err(e) => self.fail(format!("start task failed: {e}")),
        }
    }

    /// One turn of the loop body: finish a pending start, then take a frame
    /// and run detection on it if the camera is up.
    pub async fn step(&mut self) {
        self.poll_start().await;
        if self.status.is_busy() {
            return;
        }
        let Some(pipeline) = &mut self.pipeline else {
            return;
        };

        // wait for the next frame, but not forever
        let received = tokio::time::timeout(FRAME_TIMEOUT, pipeline.camera.recv()).await;
        let frame = match received {
            Ok(Ok(frame)) => frame,
            Ok(Err(e)) => {
                self.fail(format!("camera: {e}"));
                return;
            }
            Err(_) => return,
        };

        // detection runs at its own, lower rate
        if self.detect_throttle.try_accept(Instant::now()) {
            let detection = pipeline
                .landmarker
                .lock()
                .await
                .detect_for_video(&frame, self.epoch.elapsed());
            match detection {
                Ok(Some(pose)) => {
                    // a new pose replaces the whole scene
                    self.skeleton.rebuild(&pose);
                    self.angles = pose.joint_angles;
                    match pose.to_json() {
                        Ok(json) => log::trace!("pose {json}"),
                        Err(e) => log::warn!("Cannot serialize pose: {e}"),
                    }
                }
                // no pose: the previous skeleton stays on screen
                Ok(None) => {}
                Err(e) => log::warn!("Detection failed: {e}"),
            }
        }
        self.last_frame = Some(frame);
    }

    /// Left-button drag over the 3D view orbits the camera. `pos` is the
    /// mouse position in window pixels.
    pub fn drag(&mut self, pos: Option<(f32, f32)>, pressed: bool) {
        let scene_left = self.layout.scene.x as f32;
        match pos {
            Some(pos) if pressed => {
                if let Some((x, y)) = self.drag_from {
                    // a drag across the full height turns a whole circle
                    let height = self.layout.scene.height.max(1) as f32;
                    self.orbit
                        .rotate(-TAU * (pos.0 - x) / height, -TAU * (pos.1 - y) / height);
                    self.drag_from = Some(pos);
                } else if pos.0 >= scene_left {
                    self.drag_from = Some(pos);
                }
            }
            _ => self.drag_from = None,
        }
    }

    /// Wheel up dollies in, wheel down dollies out.
    pub fn scroll(&mut self, delta: f32) {
        if delta > 0.0 {
            self.orbit.dolly(ZOOM_STEP);
        } else if delta < 0.0 {
            self.orbit.dolly(1.0 / ZOOM_STEP);
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) == (self.screen.width(), self.screen.height()) {
            return;
        }
        log::debug!("Window resized to {width}x{height}");
        self.layout = Layout::new(width, height);
        self.screen.resize(width, height);
        self.scene.resize(self.layout.scene.width, self.layout.scene.height);
        self.orbit.resize(self.layout.scene.width, self.layout.scene.height);
    }

    /// Compose the camera view and the 3D view. Returns `None` when the
    /// render throttle says this frame is too early.
    pub fn render(&mut self, now: Instant) -> Option<&Framebuffer> {
        if !self.render_throttle.try_accept(now) {
            return None;
        }

        self.orbit.update();
        self.renderer.render(&self.skeleton, &self.orbit, &mut self.scene);
        self.screen.clear(BACKGROUND_COLOR);
        if let Some(frame) = &self.last_frame {
            if let Err(e) = draw_frame(&mut self.screen, frame, self.layout.camera, 0) {
                log::warn!("Cannot draw camera frame: {e}");
            }
        }
        draw_scene(&mut self.screen, &self.scene, self.layout.scene);
        Some(&self.screen)
    }
}
