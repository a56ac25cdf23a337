//! Standalone demo window backed by winit.
//!
//! ```no_run
//! # use derrick::viewer::{Demo, Viewer};
//! Viewer::builder()
//!     .with_demo(Demo::Carousel)
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{fmt, str::FromStr, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    carousel::CarouselSession,
    error::DerrickError,
    gpu::{mesh_renderer::MeshRenderer, render_context::RenderContext},
    input::InputEvent,
    options::Options,
    scene::{
        carousel::{carousel_frame, CarouselMeshes},
        crane::{crane_frame, CraneMeshes},
        MeshLibrary, SceneFrame,
    },
    session::CraneSession,
    util::frame_timing::FrameTiming,
};

/// Which demo scene the viewer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Demo {
    /// Tower crane with cargo markers and collision recovery.
    #[default]
    Crane,
    /// Rotating column with rings and parametric surfaces.
    Carousel,
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Crane => "crane",
            Self::Carousel => "carousel",
        })
    }
}

impl FromStr for Demo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crane" => Ok(Self::Crane),
            "carousel" => Ok(Self::Carousel),
            other => Err(format!("unknown demo '{other}'")),
        }
    }
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    demo: Demo,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            demo: Demo::default(),
            options: None,
            title: "Derrick".into(),
        }
    }

    /// Select the demo scene.
    #[must_use]
    pub fn with_demo(mut self, demo: Demo) -> Self {
        self.demo = demo;
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            demo: self.demo,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window running one demo scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    demo: Demo,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Fails when the scene configuration is rejected or the event loop
    /// cannot start.
    pub fn run(self) -> Result<(), DerrickError> {
        // Reject bad configurations before a window ever opens.
        let scene = DemoScene::new(self.demo, &self.options)?;

        let event_loop =
            EventLoop::new().map_err(|e| DerrickError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            gpu: None,
            scene,
            timing: FrameTiming::new(),
            title: self.title,
        };
        event_loop
            .run_app(&mut app)
            .map_err(|e| DerrickError::Viewer(e.to_string()))
    }
}

// ── Scenes ───────────────────────────────────────────────────────────────

/// The running demo session.
enum DemoScene {
    Crane(CraneSession),
    Carousel(CarouselSession),
}

/// Mesh handles registered for the running demo.
enum DemoMeshes {
    Crane(CraneMeshes),
    Carousel(CarouselMeshes),
}

impl DemoScene {
    fn new(demo: Demo, options: &Options) -> Result<Self, DerrickError> {
        Ok(match demo {
            Demo::Crane => Self::Crane(CraneSession::new(options)?),
            Demo::Carousel => Self::Carousel(CarouselSession::new(options)?),
        })
    }

    fn register_meshes(&self, library: &mut MeshLibrary) -> DemoMeshes {
        match self {
            Self::Crane(_) => DemoMeshes::Crane(CraneMeshes::register(library)),
            Self::Carousel(_) => {
                DemoMeshes::Carousel(CarouselMeshes::register(library))
            }
        }
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match self {
            Self::Crane(session) => session.handle_input(event),
            Self::Carousel(session) => session.handle_input(event),
        }
    }

    fn tick(&mut self, dt: f32) {
        match self {
            Self::Crane(session) => session.tick(dt),
            Self::Carousel(session) => session.tick(dt),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        match self {
            Self::Crane(session) => session.resize(width, height),
            Self::Carousel(session) => session.resize(width, height),
        }
    }

    fn frame(&self, meshes: &DemoMeshes) -> Option<SceneFrame> {
        match (self, meshes) {
            (Self::Crane(session), DemoMeshes::Crane(meshes)) => {
                Some(crane_frame(session, meshes))
            }
            (Self::Carousel(session), DemoMeshes::Carousel(meshes)) => {
                Some(carousel_frame(session, meshes))
            }
            _ => None,
        }
    }

    fn status(&self) -> String {
        match self {
            Self::Crane(session) => session.hud().to_string(),
            Self::Carousel(session) => session.status().to_string(),
        }
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// GPU state created once the window exists.
struct GpuState {
    context: RenderContext,
    renderer: MeshRenderer,
    meshes: DemoMeshes,
}

struct ViewerApp {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    scene: DemoScene,
    timing: FrameTiming,
    title: String,
}

/// Convert a winit wheel delta to [`InputEvent::Scroll`]'s convention.
///
/// winit reports positive y when the wheel rolls away from the user;
/// `Scroll` is positive toward the user, so rolling away zooms in.
fn scroll_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) * 0.01,
    }
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn redraw(&mut self) {
        let (Some(window), Some(gpu)) = (&self.window, &mut self.gpu) else {
            return;
        };

        let dt = self.timing.tick();
        self.scene.tick(dt);

        if let Some(frame) = self.scene.frame(&gpu.meshes) {
            match gpu.renderer.render(&gpu.context, &frame) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                    gpu.context.reconfigure();
                }
                Err(e) => log::error!("render error: {e:?}"),
            }
        }

        window.set_title(&format!(
            "{} | {} | {:.0} fps",
            self.title,
            self.scene.status(),
            self.timing.fps()
        ));
        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let (width, height) = viewport_size(window.inner_size());
        let context = match pollster::block_on(RenderContext::new(
            window.clone(),
            (width, height),
        )) {
            Ok(context) => context,
            Err(e) => {
                log::error!("Failed to initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };

        let mut library = MeshLibrary::new();
        let meshes = self.scene.register_meshes(&mut library);
        let renderer = MeshRenderer::new(&context, &library);
        self.scene.resize(width, height);

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(GpuState {
            context,
            renderer,
            meshes,
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                let (width, height) = viewport_size(size);
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(width, height);
                    gpu.renderer.resize(&gpu.context);
                }
                self.scene.resize(width, height);
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(input) = InputEvent::from_winit_key(&event) {
                    self.scene.handle_input(&input);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = scroll_delta(delta);
                self.scene.handle_input(&InputEvent::Scroll { delta });
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_names_parse() {
        assert_eq!("crane".parse::<Demo>(), Ok(Demo::Crane));
        assert_eq!("carousel".parse::<Demo>(), Ok(Demo::Carousel));
        assert!("tower".parse::<Demo>().is_err());
        assert_eq!(Demo::Carousel.to_string(), "carousel");
    }

    #[test]
    fn wheel_away_from_user_zooms_in() {
        let away = scroll_delta(MouseScrollDelta::LineDelta(0.0, 1.0));
        assert_eq!(away, -1.0);
        let pixels = scroll_delta(MouseScrollDelta::PixelDelta(
            winit::dpi::PhysicalPosition::new(0.0, 50.0),
        ));
        assert!((pixels + 0.5).abs() < 1e-6);

        let mut scene = match DemoScene::new(Demo::Crane, &Options::default())
        {
            Ok(scene) => scene,
            Err(e) => panic!("default options must build: {e}"),
        };
        scene.handle_input(&InputEvent::Scroll { delta: away });
        let DemoScene::Crane(session) = &scene else {
            panic!("crane demo expected");
        };
        assert!(session.cameras().current().zoom > 1.0);
    }

    #[test]
    fn scenes_build_from_default_options() {
        let options = Options::default();
        for demo in [Demo::Crane, Demo::Carousel] {
            let scene = DemoScene::new(demo, &options);
            assert!(scene.is_ok());
        }
    }

    #[test]
    fn mismatched_meshes_produce_no_frame() {
        let options = Options::default();
        let mut library = MeshLibrary::new();
        let crane = DemoScene::new(Demo::Crane, &options);
        let carousel = DemoScene::new(Demo::Carousel, &options);
        let (Ok(crane), Ok(carousel)) = (crane, carousel) else {
            panic!("default options must build");
        };
        let crane_meshes = crane.register_meshes(&mut library);
        assert!(crane.frame(&crane_meshes).is_some());
        assert!(carousel.frame(&crane_meshes).is_none());
    }
}
