use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::assets::resources::{ResourceManager, TextureHandle};
use crate::math::Rect;
use crate::renderer::camera::Camera;
use crate::renderer::sprite::Sprite;
use crate::renderer::traits::{parallax_span, Color, Renderer, RendererError};

/// Opaque handle to a compiled sprite pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineHandle(pub u32);

/// Pipeline factory the platform layer implements. Consumed once when the
/// retained backend is built.
pub trait GpuDevice {
    fn create_sprite_pipeline(&mut self) -> Result<PipelineHandle, RendererError>;
}

/// Per-frame submission point. `false` means the frame was not presented.
pub trait GpuQueue {
    fn submit(&mut self, packet: &FramePacket) -> bool;
}

/// Per-instance sprite data in the shape the sprite pipeline consumes.
/// 10 floats = 40 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Screen-space X of the top-left corner.
    pub x: f32,
    /// Screen-space Y of the top-left corner.
    pub y: f32,
    /// Scaled width in pixels.
    pub w: f32,
    /// Scaled height in pixels.
    pub h: f32,
    /// Texture-space UV of the top-left corner.
    pub u0: f32,
    pub v0: f32,
    /// Texture-space UV of the bottom-right corner.
    pub u1: f32,
    pub v1: f32,
    /// Rotation in degrees around the top-left corner.
    pub rotation: f32,
    /// 1.0 mirrors horizontally, 0.0 draws as-is.
    pub flip: f32,
}

impl SpriteInstance {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Consecutive instances sharing one texture binding. Runs preserve call
/// order; no reordering or cross-run batching happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRun {
    pub texture: TextureHandle,
    pub start: u32,
    pub count: u32,
}

/// Everything one frame submits: pipeline, clear color, instance data and
/// the texture runs that slice it.
#[derive(Debug, Clone)]
pub struct FramePacket {
    pub pipeline: PipelineHandle,
    pub clear_color: Color,
    pub instances: Vec<SpriteInstance>,
    pub runs: Vec<DrawRun>,
}

/// Retained backend: buffers a frame's draw calls into a [`FramePacket`]
/// and submits it at `present`.
///
/// `clear_screen` opens the frame and captures the clear color; draw calls
/// outside an open frame warn and are dropped, since nothing would resolve
/// them. A rejected submission is logged and the frame is lost, the next
/// `clear_screen` starts clean.
pub struct GpuRenderer {
    queue: Box<dyn GpuQueue>,
    pipeline: PipelineHandle,
    draw_color: Color,
    frame: Option<FramePacket>,
}

impl GpuRenderer {
    pub fn new(
        device: &mut dyn GpuDevice,
        queue: Box<dyn GpuQueue>,
    ) -> Result<Self, RendererError> {
        let pipeline = match device.create_sprite_pipeline() {
            Ok(pipeline) => pipeline,
            Err(err) => {
                log::error!("sprite pipeline creation failed: {err}");
                return Err(err);
            }
        };
        Ok(Self {
            queue,
            pipeline,
            draw_color: Color::BLACK,
            frame: None,
        })
    }

    /// UVs for a source rectangle inside a texture of `full_size` pixels.
    /// Falls back to the whole texture when the size is not resolvable.
    fn uv_rect(src: Option<Rect>, full_size: Vec2) -> (Vec2, Vec2) {
        match src {
            Some(rect) if full_size.x > 0.0 && full_size.y > 0.0 => {
                (rect.min() / full_size, rect.max() / full_size)
            }
            _ => (Vec2::ZERO, Vec2::ONE),
        }
    }

    fn push_instance(
        &mut self,
        texture: TextureHandle,
        dst: Rect,
        uv: (Vec2, Vec2),
        rotation_degrees: f32,
        flip: bool,
    ) {
        let Some(frame) = self.frame.as_mut() else {
            return;
        };
        let start = frame.instances.len() as u32;
        frame.instances.push(SpriteInstance {
            x: dst.position.x,
            y: dst.position.y,
            w: dst.size.x,
            h: dst.size.y,
            u0: uv.0.x,
            v0: uv.0.y,
            u1: uv.1.x,
            v1: uv.1.y,
            rotation: rotation_degrees,
            flip: if flip { 1.0 } else { 0.0 },
        });
        match frame.runs.last_mut() {
            Some(run) if run.texture == texture => run.count += 1,
            _ => frame.runs.push(DrawRun {
                texture,
                start,
                count: 1,
            }),
        }
    }

    /// Texture handle, optional source rect and unscaled draw size.
    fn resolve(
        resources: &ResourceManager,
        sprite: &Sprite,
    ) -> Option<(TextureHandle, (Vec2, Vec2), Vec2)> {
        let Some(handle) = resources.texture(&sprite.texture_id) else {
            log::error!("draw: texture '{}' is not cached", sprite.texture_id);
            return None;
        };
        let full_size = resources.texture_size(&sprite.texture_id);
        let size = match sprite.source_rect {
            Some(rect) => rect.size,
            None => full_size,
        };
        Some((handle, Self::uv_rect(sprite.source_rect, full_size), size))
    }

    fn frame_is_open(&self, call: &str) -> bool {
        if self.frame.is_none() {
            log::warn!("{call}: no open frame, call dropped (clear_screen starts one)");
            return false;
        }
        true
    }
}

impl Renderer for GpuRenderer {
    fn clear_screen(&mut self) {
        if self.frame.is_some() {
            log::warn!("clear_screen: frame already open, discarding its draws");
        }
        self.frame = Some(FramePacket {
            pipeline: self.pipeline,
            clear_color: self.draw_color,
            instances: Vec::with_capacity(32),
            runs: Vec::with_capacity(32),
        });
    }

    fn draw_sprite(
        &mut self,
        camera: &Camera,
        resources: &ResourceManager,
        sprite: &Sprite,
        position: Vec2,
        scale: Vec2,
        rotation_degrees: f32,
    ) {
        if !self.frame_is_open("draw_sprite") {
            return;
        }
        let Some((handle, uv, size)) = Self::resolve(resources, sprite) else {
            return;
        };
        let dst = Rect::from_parts(camera.world_to_screen(position), size * scale);
        if !camera.is_rect_visible(dst) {
            return;
        }
        self.push_instance(handle, dst, uv, rotation_degrees, sprite.flipped);
    }

    fn draw_parallax(
        &mut self,
        camera: &Camera,
        resources: &ResourceManager,
        sprite: &Sprite,
        position: Vec2,
        scroll_factor: Vec2,
        repeat: (bool, bool),
        scale: Vec2,
    ) {
        if !self.frame_is_open("draw_parallax") {
            return;
        }
        let Some((handle, uv, size)) = Self::resolve(resources, sprite) else {
            return;
        };
        let scaled = size * scale;
        if scaled.x <= 0.0 || scaled.y <= 0.0 {
            log::debug!(
                "draw_parallax: '{}' has no resolvable size yet",
                sprite.texture_id
            );
            return;
        }
        let anchor = camera.world_to_screen_parallax(position, scroll_factor);
        let viewport = camera.viewport_size();
        let (x0, x1) = parallax_span(anchor.x, scaled.x, viewport.x, repeat.0);
        let (y0, y1) = parallax_span(anchor.y, scaled.y, viewport.y, repeat.1);

        let mut y = y0;
        while y < y1 {
            let mut x = x0;
            while x < x1 {
                let dst = Rect::from_parts(Vec2::new(x, y), scaled);
                if camera.is_rect_visible(dst) {
                    self.push_instance(handle, dst, uv, 0.0, sprite.flipped);
                }
                x += scaled.x;
            }
            y += scaled.y;
        }
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn present(&mut self) {
        let Some(packet) = self.frame.take() else {
            log::warn!("present: no open frame");
            return;
        };
        if !self.queue.submit(&packet) {
            log::error!(
                "frame submission failed, dropping {} instance(s)",
                packet.instances.len()
            );
        }
    }
}
