//! Terminal frontend for the softras rasterizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use softras_core::math::DEPTH_SCALE;
use softras_core::{
    draw_line, Camera, FrameStats, Framebuffer, HashedColors, Mesh, Rasterizer, RotationState,
    Transform,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod renderer;
pub mod snapshot;

pub use config::{ConfigError, ViewerConfig};
pub use renderer::HalfBlockPresenter;

const DEBUG_LINE_START: u32 = 0xFFFF_0000;
const DEBUG_LINE_END: u32 = 0x0000_FFFF;

/// Render one complete frame into `fb`.
///
/// Clears color and depth, draws the diagonal debug line if enabled, then
/// rasterizes `mesh` rotated by `rotation` as seen from `camera`.
pub fn render_frame(
    fb: &mut Framebuffer,
    mesh: &Mesh,
    rotation: &RotationState,
    camera: &Camera,
    config: &ViewerConfig,
    rasterizer: &Rasterizer<HashedColors>,
) -> FrameStats {
    fb.clear(config.clear_color, DEPTH_SCALE);

    if config.debug_line {
        let (w, h) = (fb.width() as i32, fb.height() as i32);
        draw_line(fb, 0, 0, w - 1, h - 1, DEBUG_LINE_START, DEBUG_LINE_END);
    }

    let model = Transform::rotation_matrix(rotation);
    let mvp = Transform::mvp_matrix(&model, &camera.view_matrix(), &camera.projection_matrix());
    rasterizer.render_mesh(fb, mesh, &mvp)
}

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    Quit,
    /// Rotation deltas in radians around x, y and z.
    Rotate(f32, f32, f32),
}

/// Map a key event to a command. Only presses count; release and repeat
/// events are ignored.
pub fn key_command(key: &KeyEvent) -> Option<KeyCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyCommand::Quit,
        KeyCode::Char('w') | KeyCode::Up => KeyCommand::Rotate(0.1, 0.0, 0.0),
        KeyCode::Char('s') | KeyCode::Down => KeyCommand::Rotate(-0.1, 0.0, 0.0),
        KeyCode::Char('a') | KeyCode::Left => KeyCommand::Rotate(0.0, -0.1, 0.0),
        KeyCode::Char('d') | KeyCode::Right => KeyCommand::Rotate(0.0, 0.1, 0.0),
        KeyCode::Char('e') => KeyCommand::Rotate(0.0, 0.0, 0.1),
        KeyCode::Char('r') => KeyCommand::Rotate(0.0, 0.0, -0.1),
        _ => return None,
    };
    Some(command)
}

/// Interactive viewer: renders into a framebuffer sized to the terminal.
pub struct TerminalApp {
    mesh: Mesh,
    config: ViewerConfig,
    rotation: RotationState,
    camera: Camera,
    framebuffer: Framebuffer,
    rasterizer: Rasterizer<HashedColors>,
    presenter: HalfBlockPresenter,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    frame_time: Duration,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: ViewerConfig) -> anyhow::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let presenter = HalfBlockPresenter::new(cols as usize, rows as usize);
        let (width, height) = presenter.native_size();

        Ok(Self {
            mesh,
            camera: config.camera(width, height),
            config,
            rotation: RotationState::new(0.3, 0.3, 0.0),
            framebuffer: Framebuffer::new(width, height)?,
            rasterizer: Rasterizer::new(HashedColors),
            presenter,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            frame_time: Duration::ZERO,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / u64::from(self.config.target_fps.max(1)));

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }
            if !self.running {
                break;
            }

            self.update();
            let stats = render_frame(
                &mut self.framebuffer,
                &self.mesh,
                &self.rotation,
                &self.camera,
                &self.config,
                &self.rasterizer,
            );
            self.frame_time = frame_start.elapsed();
            log::trace!("frame: {:?} in {:?}", stats, self.frame_time);
            self.present()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> anyhow::Result<()> {
        match event {
            Event::Key(key) => match key_command(&key) {
                Some(KeyCommand::Quit) => self.running = false,
                Some(KeyCommand::Rotate(dx, dy, dz)) => self.rotation.rotate(dx, dy, dz),
                None => {}
            },
            Event::Resize(cols, rows) => self.resize(cols as usize, rows as usize)?,
            _ => {}
        }
        Ok(())
    }

    /// Runs between frames, never during one.
    fn resize(&mut self, cols: usize, rows: usize) -> anyhow::Result<()> {
        self.presenter.resize(cols, rows);
        let (width, height) = self.presenter.native_size();
        self.framebuffer.resize(width, height)?;
        self.camera.set_aspect(width, height);
        execute!(stdout(), terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn update(&mut self) {
        let [dx, dy, dz] = self.config.spin;
        self.rotation.rotate(dx, dy, dz);
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        self.presenter.draw(&self.framebuffer, &mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "softras [w={},h={},t={}ms] {:.1} fps | WASD/Arrows=Rotate E/R=Roll Q=Quit",
                self.framebuffer.width(),
                self.framebuffer.height(),
                self.frame_time.as_millis(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()
    }
}
