use std::{thread, time::Duration};
use platform::{input::Input, time::Counter, Surface};
use crate::{config::EngineConfig, error::EngineError, render::Canvas};

/// What the frame loop does after an update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
    /// Leave the loop and run `Game::on_window_create` again.
    Reload,
}

/// Hooks a concrete game supplies to the engine.
pub trait Game {
    fn on_window_create(&mut self, canvas: &mut Canvas) -> anyhow::Result<()>;

    /// Called once per frame, before the canvas is presented.
    fn on_window_update(&mut self, canvas: &mut Canvas, input: &Input, delta_time: f32) -> Flow;
}

/// Owns the surface, the off-screen canvas and the loop state.
pub struct Engine<S: Surface> {
    surface: S,
    canvas: Canvas,
    input: Input,
    frame_time: Option<Duration>,
    running: bool,
}

#[cfg(windows)]
impl Engine<platform::window::Window> {
    /// Creates the Win32 window described by `config`, still hidden.
    pub fn open(config: &EngineConfig) -> Result<Self, EngineError> {
        let window = platform::window::Window::create(
            &config.title,
            config.x,
            config.y,
            config.width,
            config.height,
        )?;
        Self::with_surface(window, config)
    }
}

impl<S: Surface> Engine<S> {
    /// The canvas takes the surface's client size, not the configured one.
    pub fn with_surface(surface: S, config: &EngineConfig) -> Result<Self, EngineError> {
        let (width, height) = surface.dimensions();
        let canvas = Canvas::new(width, height)?;
        Ok(Self {
            surface,
            canvas,
            input: Input::default(),
            frame_time: config.frame_time(),
            running: false,
        })
    }

    pub fn width(&self) -> i32 { self.canvas.width() }
    pub fn height(&self) -> i32 { self.canvas.height() }

    pub fn canvas(&self) -> &Canvas { &self.canvas }
    pub fn canvas_mut(&mut self) -> &mut Canvas { &mut self.canvas }
    pub fn surface(&self) -> &S { &self.surface }
    pub fn input(&self) -> &Input { &self.input }

    pub fn is_running(&self) -> bool { self.running }

    /// The loop exits at the top of its next iteration.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn create<G: Game + ?Sized>(&mut self, game: &mut G) -> Result<(), EngineError> {
        game.on_window_create(&mut self.canvas)?;
        Ok(())
    }

    pub fn reload<G: Game + ?Sized>(&mut self, game: &mut G) -> Result<(), EngineError> {
        log::debug!("reloading game");
        self.stop();
        self.create(game)
    }

    /// Shows the surface and runs the frame loop on the calling thread.
    ///
    /// Returns `Flow::Reload` if the loop ended on a reload request (the create
    /// hook has already run again) and `Flow::Stop` otherwise.
    pub fn show<G: Game + ?Sized>(&mut self, game: &mut G) -> Result<Flow, EngineError> {
        self.surface.show();
        self.running = true;
        log::info!("frame loop started on a {}x{} canvas", self.width(), self.height());

        let mut frame_counter = Counter::start();
        let mut frames: u64 = 0;
        let mut flow = Flow::Stop;
        while self.running {
            let delta_time = frame_counter.lap().as_secs() as f32;

            if !self.surface.pump(&mut self.input)? {
                log::info!("surface closed");
                flow = Flow::Stop;
                self.stop();
                break;
            }

            flow = game.on_window_update(&mut self.canvas, &self.input, delta_time);
            self.surface.present(self.canvas.buffer())?;
            frames += 1;
            log::trace!("frame {}: dt {:.3} ms", frames, delta_time * 1000.0);

            match flow {
                Flow::Continue => self.throttle(&frame_counter),
                Flow::Stop => self.stop(),
                Flow::Reload => self.reload(game)?,
            }
        }

        log::info!("frame loop finished after {} frames", frames);
        Ok(flow)
    }

    fn throttle(&self, frame_counter: &Counter) {
        if let Some(frame_time) = self.frame_time {
            let elapsed = frame_counter.elapsed().as_duration();
            if elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::HeadlessSurface;
    use crate::error::ConfigError;

    struct Counting {
        created: usize,
        updates: usize,
        stop_after: usize,
    }

    impl Game for Counting {
        fn on_window_create(&mut self, canvas: &mut Canvas) -> anyhow::Result<()> {
            self.created += 1;
            canvas.clear(0x0020_2020u32);
            Ok(())
        }

        fn on_window_update(&mut self, _canvas: &mut Canvas, _input: &Input, delta_time: f32) -> Flow {
            assert!(delta_time >= 0.0);
            self.updates += 1;
            if self.updates >= self.stop_after { Flow::Stop } else { Flow::Continue }
        }
    }

    fn unthrottled() -> EngineConfig {
        EngineConfig { target_fps: 0, ..EngineConfig::default() }
    }

    #[test]
    fn canvas_follows_surface_size() {
        let engine = Engine::with_surface(HeadlessSurface::new(32, 16), &EngineConfig::default()).unwrap();
        assert_eq!((engine.width(), engine.height()), (32, 16));
        assert!(!engine.is_running());
    }

    #[test]
    fn invalid_surface_size_is_an_error() {
        let result = Engine::with_surface(HeadlessSurface::new(0, 16), &EngineConfig::default());
        assert!(matches!(result, Err(EngineError::Platform(_))));
    }

    #[test]
    fn stop_from_update_ends_loop() {
        let mut engine = Engine::with_surface(HeadlessSurface::new(4, 4), &unthrottled()).unwrap();
        let mut game = Counting { created: 0, updates: 0, stop_after: 3 };

        engine.create(&mut game).unwrap();
        let flow = engine.show(&mut game).unwrap();

        assert_eq!(flow, Flow::Stop);
        assert_eq!(game.created, 1);
        assert_eq!(game.updates, 3);
        assert_eq!(engine.surface().frames_presented(), 3);
        assert!(engine.surface().is_shown());
        assert!(!engine.is_running());
        assert_eq!(engine.canvas().pixel(0, 0), 0x0020_2020);
    }

    #[test]
    fn config_errors_convert_to_engine_errors() {
        let err = EngineError::from(EngineConfig::from_toml("width = -1").unwrap_err());
        assert!(matches!(err, EngineError::Config(ConfigError::InvalidDimensions { width: -1, height: 600 })));
        assert_eq!(err.to_string(), "config has invalid window dimensions -1x600");
    }

    #[test]
    fn create_errors_are_hook_errors() {
        struct Broken;
        impl Game for Broken {
            fn on_window_create(&mut self, _canvas: &mut Canvas) -> anyhow::Result<()> {
                anyhow::bail!("missing assets")
            }
            fn on_window_update(&mut self, _: &mut Canvas, _: &Input, _: f32) -> Flow {
                Flow::Stop
            }
        }

        let mut engine = Engine::with_surface(HeadlessSurface::new(4, 4), &unthrottled()).unwrap();
        let err = engine.create(&mut Broken).unwrap_err();
        assert!(matches!(err, EngineError::Hook(_)));
        assert_eq!(err.to_string(), "missing assets");
    }
}
