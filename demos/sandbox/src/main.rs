//! Headless sandbox: boots the engine from a JSON config, runs a menu scene
//! into a side-scrolling scene for a few frames and logs every canvas call.

use glam::Vec2;
use glint_engine::{
    Alignment, Canvas, CanvasRenderer, Color, Context, EngineConfig, FrameClock, GameObject,
    InputEvent, ParallaxComponent, Rect, Scene, SceneHook, SceneManager, Sprite, SpriteComponent,
    TextureHandle, TextureManifest, TransformComponent,
};

const CONFIG_JSON: &str = r#"{
    "window_title": "glint sandbox",
    "window_size": [1280, 720],
    "logical_size": [640, 360],
    "camera_size": [640.0, 360.0],
    "target_fps": 60,
    "input_mappings": {
        "start": [13, 32],
        "quit": [27]
    }
}"#;

const MANIFEST_JSON: &str = r#"{
    "textures": [
        { "id": "hero", "path": "assets/hero.png", "size": [64.0, 64.0] },
        { "id": "hills", "path": "assets/hills.png", "size": [512.0, 360.0] },
        { "id": "logo", "path": "assets/logo.png", "size": [256.0, 96.0] }
    ]
}"#;

/// Stand-in for a real window surface: prints what would be drawn.
struct LoggingCanvas {
    size: Vec2,
    blits: u32,
}

impl LoggingCanvas {
    fn new(size: Vec2) -> Self {
        Self { size, blits: 0 }
    }
}

impl Canvas for LoggingCanvas {
    fn clear(&mut self, color: Color) {
        self.blits = 0;
        log::debug!("clear {}x{} to {:?}", self.size.x, self.size.y, color);
    }

    fn blit(
        &mut self,
        texture: TextureHandle,
        src: Rect,
        dst: Rect,
        rotation_degrees: f32,
        flip: bool,
    ) {
        self.blits += 1;
        log::debug!(
            "blit tex {} src ({:.0},{:.0} {:.0}x{:.0}) -> dst ({:.1},{:.1} {:.0}x{:.0}) rot {rotation_degrees} flip {flip}",
            texture.0,
            src.position.x,
            src.position.y,
            src.size.x,
            src.size.y,
            dst.position.x,
            dst.position.y,
            dst.size.x,
            dst.size.y,
        );
    }

    fn present(&mut self) {
        log::info!("present: {} blit(s)", self.blits);
    }
}

/// Title screen: a centered logo until the start action fires.
struct MenuHook;

impl SceneHook for MenuHook {
    fn on_init(&mut self, scene: &mut Scene, ctx: &mut Context) {
        let mut logo = GameObject::new(ctx, "logo");
        logo.add_component(
            SpriteComponent::from_texture("logo", Alignment::Center),
            ctx,
        );
        if let Some(transform) = logo.get_component_mut::<TransformComponent>() {
            transform.set_position(Vec2::new(320.0, 140.0));
        }
        scene.add_object(logo);
    }

    fn on_update(&mut self, _dt: f32, _scene: &mut Scene, ctx: &mut Context) {
        if ctx.input().was_action_pressed("start") {
            log::info!("start pressed, switching to the level");
            ctx.request_replace_scene(level_scene());
        }
        if ctx.input().was_action_pressed("quit") {
            ctx.input_mut().request_quit();
        }
    }
}

/// Side-scroller slice: parallax hills behind a hero the camera follows.
struct LevelHook;

impl LevelHook {
    const HERO_SPEED: f32 = 120.0;
}

impl SceneHook for LevelHook {
    fn on_init(&mut self, scene: &mut Scene, ctx: &mut Context) {
        ctx.camera_mut()
            .set_limit_bounds(Rect::new(0.0, 0.0, 4096.0, 360.0));

        let mut hills = GameObject::new(ctx, "hills");
        hills.add_component(TransformComponent::new(Vec2::ZERO), ctx);
        hills.add_component(
            ParallaxComponent::new(Sprite::new("hills"), Vec2::new(0.3, 0.0))
                .with_repeat(true, false),
            ctx,
        );
        scene.add_object(hills);

        let mut hero = GameObject::new(ctx, "hero");
        hero.add_component(
            SpriteComponent::from_texture("hero", Alignment::BottomCenter),
            ctx,
        );
        if let Some(transform) = hero.get_component_mut::<TransformComponent>() {
            transform.set_position(Vec2::new(96.0, 296.0));
        }
        scene.add_object(hero);
    }

    fn on_update(&mut self, dt: f32, scene: &mut Scene, ctx: &mut Context) {
        let mut hero_position = None;
        if let Some(hero) = scene.find_object_by_name_mut("hero") {
            if let Some(transform) = hero.get_component_mut::<TransformComponent>() {
                transform.translate(Vec2::new(Self::HERO_SPEED * dt, 0.0));
                hero_position = Some(transform.position());
            }
        }
        if let Some(position) = hero_position {
            ctx.camera_mut().follow(position, dt);
        }
        if ctx.input().was_action_pressed("quit") {
            ctx.input_mut().request_quit();
        }
    }

    fn on_render(&mut self, _scene: &mut Scene, ctx: &mut Context) {
        log::debug!("camera at {:?}", ctx.camera().position());
    }
}

fn level_scene() -> Scene {
    Scene::new("level").with_hook(LevelHook)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = EngineConfig::from_json(CONFIG_JSON)?;
    let canvas = LoggingCanvas::new(Vec2::new(
        config.logical_size[0] as f32,
        config.logical_size[1] as f32,
    ));
    let renderer = CanvasRenderer::new(Box::new(canvas));
    let mut ctx = Context::from_config(Box::new(renderer), &config);

    let manifest = TextureManifest::from_json(MANIFEST_JSON)?;
    let loaded = ctx.resources_mut().load_manifest(&manifest);
    log::info!("cached {loaded} texture(s)");

    let mut scenes = SceneManager::new();
    scenes.push(Scene::new("menu").with_hook(MenuHook), &mut ctx);

    let mut clock = FrameClock::new(config.target_fps);
    let frame_budget = clock.frame_budget() as f64;

    for frame in 0..240u32 {
        // A real runner reads the platform clock and event queue here.
        clock.advance(frame as f64 * frame_budget);
        if frame == 30 {
            ctx.input_mut().push(InputEvent::KeyDown { key_code: 32 });
        }
        if frame == 31 {
            ctx.input_mut().push(InputEvent::KeyUp { key_code: 32 });
        }
        if frame == 200 {
            ctx.input_mut().push(InputEvent::KeyDown { key_code: 27 });
        }

        ctx.input_mut().update();
        scenes.handle_input(&mut ctx);
        scenes.update(clock.delta_seconds(), &mut ctx);
        if ctx.input().should_quit() {
            log::info!("quit requested on frame {frame}");
            break;
        }

        ctx.set_draw_color(Color::rgb(24, 32, 48));
        ctx.clear_screen();
        scenes.render(&mut ctx);
        ctx.present();
    }

    scenes.shutdown(&mut ctx);
    Ok(())
}
