use std::{env, path::Path, rc::Rc};
use anyhow::{bail, Context};
use engine::{
    geom::V2i,
    platform::{
        input::{Input, KBKey, MouseKey},
        Surface,
    },
    render::DEFAULT_TEXT_SCALE,
    Animation, AudioSource, Canvas, Color, DrawSelf, Engine, EngineConfig, EngineError, Flow, Game, GameObject, Load,
    ObjectState, Process, Save, Sprite, Weapon, WeaponType,
};

const CONFIG_FILE: &str = "tde.toml";
const HAND_SPRITE: &str = "sprites/hand.spr";
const PLAYER_SPEED: f32 = 120.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.as_slice() {
        [] => run(),
        [command, input, output] if command == "convert" => convert(input, output),
        _ => bail!("usage: tde [convert <image.png> <sprite.spr>]"),
    }
}

/// Turns a square PNG into a sprite file.
fn convert(input: &str, output: &str) -> anyhow::Result<()> {
    let sprite = Sprite::load_png(input).with_context(|| format!("reading {}", input))?;
    sprite.save(output).with_context(|| format!("writing {}", output))?;
    log::info!("converted {} ({}x{}) to {}", input, sprite.width(), sprite.height(), output);
    Ok(())
}

fn load_config() -> Result<EngineConfig, EngineError> {
    if Path::new(CONFIG_FILE).exists() {
        log::info!("loading settings from {}", CONFIG_FILE);
        Ok(EngineConfig::load(CONFIG_FILE)?)
    } else {
        log::info!("{} not found, using default settings", CONFIG_FILE);
        Ok(EngineConfig::default())
    }
}

fn run() -> anyhow::Result<()> {
    let config = load_config()?;

    #[cfg(windows)]
    let engine = Engine::open(&config)?;

    #[cfg(not(windows))]
    let engine = {
        const HEADLESS_FRAMES: usize = 300;
        log::warn!("no window backend on this platform, running {} frames headless", HEADLESS_FRAMES);
        let surface = engine::platform::HeadlessSurface::new(config.width, config.height)
            .with_frame_limit(HEADLESS_FRAMES);
        Engine::with_surface(surface, &config)?
    };

    run_demo(engine)
}

fn run_demo<S: Surface>(mut engine: Engine<S>) -> anyhow::Result<()> {
    let mut demo = Demo::new();
    engine.create(&mut demo)?;
    while engine.show(&mut demo)? == Flow::Reload {}
    Ok(())
}

struct Pistol {
    weapon: Weapon,
}

impl DrawSelf for Pistol {
    fn weapon(&self) -> &Weapon { &self.weapon }
    fn weapon_mut(&mut self) -> &mut Weapon { &mut self.weapon }

    fn draw_self(
        &mut self,
        canvas: &mut Canvas,
        fov: i32,
        current_sprite: Option<&Sprite>,
        is_hand_drawn: &mut bool,
        player_positions: &mut Vec<V2i>,
    ) {
        let size = canvas.height() * fov / 360;
        let x = (canvas.width() - size) / 2;
        let y = canvas.height() - size;
        if let Some(sprite) = current_sprite {
            canvas.draw_sprite(x, y, size, size, sprite);
            *is_hand_drawn = true;
        }
        player_positions.push(V2i::new(x + size / 2, y));
    }
}

/// Drifts toward the player and switches to attacking when close.
struct Target {
    object: GameObject,
}

impl Process for Target {
    fn object(&self) -> &GameObject { &self.object }
    fn object_mut(&mut self) -> &mut GameObject { &mut self.object }

    fn process(&mut self, distance_to_player: f32, fov: i32, player: &GameObject) {
        if distance_to_player < fov as f32 / 4.0 {
            self.object.set_current_state(ObjectState::Attack);
            return;
        }
        self.object.set_current_state(ObjectState::Walk);
        if distance_to_player > 0.0 {
            let to_player = player.position() - self.object.position();
            self.object.x += to_player.x / distance_to_player * self.object.vx;
            self.object.y += to_player.y / distance_to_player * self.object.vy;
        }
    }
}

struct Demo {
    player: GameObject,
    target: Target,
    pistol: Pistol,
    fov: i32,
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl Demo {
    fn new() -> Self {
        Self {
            player: GameObject::new(0.0, 0.0, PLAYER_SPEED, PLAYER_SPEED),
            target: Target { object: GameObject::new(0.0, 0.0, 0.5, 0.5) },
            pistol: Pistol { weapon: Weapon::new(WeaponType::FireArm) },
            fov: 90,
            frames: 0,
            elapsed: 0.0,
            fps: 0.0,
        }
    }

    fn muzzle_flash() -> Sprite {
        let mut sprite = Sprite::with_dimensions(8, 8);
        for i in 0..8 {
            sprite.set_pixel(i, i, Color::YELLOW.into());
            sprite.set_pixel(7 - i, i, Color::RED.into());
        }
        sprite
    }

    fn update_fps(&mut self, delta_time: f32) {
        self.frames += 1;
        self.elapsed += delta_time;
        if self.elapsed >= 1.0 {
            self.fps = self.frames as f32 / self.elapsed;
            log::debug!("{:.1} fps", self.fps);
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }
}

impl Game for Demo {
    fn on_window_create(&mut self, canvas: &mut Canvas) -> anyhow::Result<()> {
        let (width, height) = (canvas.width() as f32, canvas.height() as f32);
        self.player.x = width / 2.0;
        self.player.y = height / 2.0;
        self.player.set_current_state(ObjectState::Idle);
        self.player.insert_audio(ObjectState::Attack, AudioSource::new("sounds/shot.wav"));
        self.target.object.x = 0.0;
        self.target.object.y = 0.0;
        self.target.object.set_current_state(ObjectState::Idle);

        let mut idle = Animation::new();
        idle.assign_frame(Rc::new(Sprite::from_file(HAND_SPRITE)));
        let mut attack = Animation::new();
        attack.assign_frame(Rc::new(Self::muzzle_flash()));

        let weapon = self.pistol.weapon_mut();
        weapon.insert_animation(ObjectState::Idle, Rc::new(idle));
        weapon.insert_animation(ObjectState::Attack, Rc::new(attack));
        weapon.on_mouse_button_down(ObjectState::Idle);

        canvas.clear(Color::BLACK);
        Ok(())
    }

    fn on_window_update(&mut self, canvas: &mut Canvas, input: &Input, delta_time: f32) -> Flow {
        if input.keyboard[KBKey::Escape].pressed() {
            return Flow::Stop;
        }
        if input.keyboard[KBKey::F5].pressed() {
            return Flow::Reload;
        }
        self.update_fps(delta_time);

        let keys = &input.keyboard;
        let axis = |neg: KBKey, pos: KBKey| keys[pos].is_down() as i32 as f32 - keys[neg].is_down() as i32 as f32;
        self.player.x += axis(KBKey::A, KBKey::D) * self.player.vx * delta_time;
        self.player.y += axis(KBKey::W, KBKey::S) * self.player.vy * delta_time;

        let distance = self.player.position().distance(self.target.object.position());
        self.target.process(distance, self.fov, &self.player);

        let weapon = self.pistol.weapon_mut();
        if input.mouse[MouseKey::LB].pressed() {
            weapon.on_mouse_button_down(ObjectState::Attack);
            if let Some(sound) = self.player.audio(ObjectState::Attack) {
                sound.play();
            }
        } else if input.mouse[MouseKey::LB].released() {
            weapon.on_mouse_button_down(ObjectState::Idle);
        }

        canvas.clear(Color::from_rgb8(0x20, 0x20, 0x28));

        let (mx, my) = input.mouse.pos();
        canvas.set_line(mx - 6, my, mx + 6, my, Color::GREEN);
        canvas.set_line(mx, my - 6, mx, my + 6, Color::GREEN);

        let (px, py) = (self.player.x as i32, self.player.y as i32);
        canvas.fill_rect((px - 4, py - 4), (px + 4, py + 4), Color::BLUE);
        let (tx, ty) = (self.target.object.x as i32, self.target.object.y as i32);
        let target_color = match self.target.object.current_state() {
            ObjectState::Attack => Color::RED,
            _ => Color::PURPLE,
        };
        canvas.fill_rect((tx - 4, ty - 4), (tx + 4, ty + 4), target_color);
        canvas.set_line(px, py, tx, ty, Color::GREY);

        let sprite = self
            .pistol
            .weapon()
            .current_animation()
            .and_then(|animation| animation.play(64, 64, delta_time, 1.0, true));
        let mut is_hand_drawn = false;
        let mut player_positions = Vec::new();
        self.pistol.draw_self(canvas, self.fov, sprite.as_deref(), &mut is_hand_drawn, &mut player_positions);

        let status = format!("{:.0} fps\nhand: {}", self.fps, if is_hand_drawn { "yes" } else { "no" });
        canvas.draw_text_line(8, 8, &status, Color::WHITE, DEFAULT_TEXT_SCALE - 1);

        Flow::Continue
    }
}
