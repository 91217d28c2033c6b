//! Demo driver: window, camera controls, and presentation blit
//!
//! Everything the library treats as an external collaborator lives here:
//! the macroquad window/event loop supplies camera deltas and frame ticks,
//! a RON scene file stands in for the mesh loader, and the composited pixel
//! buffer is uploaded to a texture for display.
//!
//! Controls: WASD + E/Q to move, scroll to zoom (fov), 1/2/3 to toggle
//! faces/edges/vertices, T for the debug overlay, P to save a screenshot.

use macroquad::prelude::{
    clear_background, draw_text, draw_texture_ex, get_frame_time, is_key_down, is_key_pressed,
    mouse_wheel, next_frame, screen_height, screen_width, vec2, Color as ScreenColor, Conf,
    DrawTextureParams, FilterMode, KeyCode, Texture2D,
};

use softraster::math::{Rotation, Vec3};
use softraster::scene::{load_scene, Scene};
use softraster::transform::Transform;
use softraster::{FrameContext, Framebuffer, DEFAULT_HEIGHT, DEFAULT_WIDTH, VERSION};

const SCENE_PATH: &str = "assets/scenes/demo.ron";
const MODEL_SPIN_DEG_PER_SEC: f32 = 20.0;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("softraster v{}", VERSION),
        window_width: DEFAULT_WIDTH as i32,
        window_height: DEFAULT_HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let scene = match load_scene(SCENE_PATH) {
        Ok(scene) => {
            log::info!("loaded {} ({} triangles)", SCENE_PATH, scene.triangles.len());
            scene
        }
        Err(e) => {
            log::info!("{}: {}, using built-in demo scene", SCENE_PATH, e);
            Scene::demo()
        }
    };

    let mut fb = match Framebuffer::new(DEFAULT_WIDTH, DEFAULT_HEIGHT) {
        Ok(fb) => fb,
        Err(e) => {
            log::error!("framebuffer allocation failed: {}", e);
            std::process::exit(1);
        }
    };
    fb.set_background(scene.background);
    fb.camera_mut().move_to(scene.camera_position);
    fb.camera_mut().set_fov(scene.fov_deg);

    let mut ctx = FrameContext::new();
    let mut show_overlay = true;
    let mut model_angle = 0.0f32;

    loop {
        let dt = get_frame_time();

        // Forward window resizes; a rejected size keeps the previous buffer
        let (sw, sh) = (screen_width() as i32, screen_height() as i32);
        if sw != fb.width() as i32 || sh != fb.height() as i32 {
            if let Err(e) = fb.set_size(sw, sh) {
                log::debug!("resize skipped: {}", e);
            }
        }

        // Collect this frame's camera deltas
        let mut dir = Vec3::ZERO;
        if is_key_down(KeyCode::W) {
            dir.z += 1.0;
        }
        if is_key_down(KeyCode::S) {
            dir.z -= 1.0;
        }
        if is_key_down(KeyCode::D) {
            dir.x += 1.0;
        }
        if is_key_down(KeyCode::A) {
            dir.x -= 1.0;
        }
        if is_key_down(KeyCode::E) {
            dir.y += 1.0;
        }
        if is_key_down(KeyCode::Q) {
            dir.y -= 1.0;
        }
        ctx.input.move_dir = dir;
        ctx.input.fov_delta = -mouse_wheel().1 / 24.0;

        if is_key_pressed(KeyCode::Key1) {
            ctx.options.draw_faces = !ctx.options.draw_faces;
        }
        if is_key_pressed(KeyCode::Key2) {
            ctx.options.draw_edges = !ctx.options.draw_edges;
        }
        if is_key_pressed(KeyCode::Key3) {
            ctx.options.draw_vertices = !ctx.options.draw_vertices;
        }
        if is_key_pressed(KeyCode::T) {
            show_overlay = !show_overlay;
        }

        // Spin the model
        model_angle = (model_angle + MODEL_SPIN_DEG_PER_SEC * dt) % 360.0;
        fb.set_model(Transform {
            rotation: Rotation::new(Vec3::Y, model_angle),
            ..Transform::IDENTITY
        });

        // clear -> apply input -> render
        fb.clear();
        ctx.apply(&mut fb, dt);
        fb.render(&scene.triangles, &ctx.options);

        #[cfg(not(target_arch = "wasm32"))]
        if is_key_pressed(KeyCode::P) {
            match image::save_buffer(
                "screenshot.png",
                fb.pixels(),
                fb.width() as u32,
                fb.height() as u32,
                image::ExtendedColorType::Rgba8,
            ) {
                Ok(()) => log::info!("saved screenshot.png"),
                Err(e) => log::error!("screenshot failed: {}", e),
            }
        }

        // Blit the flat pixel buffer
        clear_background(ScreenColor::from_rgba(0, 0, 0, 255));
        let texture = Texture2D::from_rgba8(fb.width() as u16, fb.height() as u16, fb.pixels());
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            ScreenColor::from_rgba(255, 255, 255, 255),
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        if show_overlay {
            let cam = fb.camera();
            let pos = cam.transform().translation;
            let text_color = ScreenColor::from_rgba(200, 200, 200, 255);
            draw_text(
                &format!(
                    "cam ({:.1}, {:.1}, {:.1})  fov {:.1}  tris {}",
                    pos.x,
                    pos.y,
                    pos.z,
                    cam.fov(),
                    scene.triangles.len()
                ),
                10.0,
                20.0,
                16.0,
                text_color,
            );
            let mut y = 40.0;
            for line in format!("MVP:\n{}", fb.mvp_matrix()).lines() {
                draw_text(line, 10.0, y, 14.0, text_color);
                y += 14.0;
            }
        }

        next_frame().await;
    }
}
