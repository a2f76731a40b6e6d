//! Decoration draw calls.
//!
//! Each entry point is a self-contained draw: it derives a projection for
//! its box, builds the decoration mesh, writes uniforms, and issues one
//! scissored draw per damage rect against the already-bound render pass.
//! The renderer keeps no per-frame state, so calls may be repeated and
//! reordered freely within a frame.

use wgpu::util::DeviceExt;

use mullion_core::{DamageRegion, Mat3, OutputTransform, Rect};
use mullion_style::{Edge, ScalarProperty, Style, VectorProperty};

use crate::mesh::{decoration_mesh, unit_quad, DecorationVertex, MESH_VERTEX_COUNT, VERTICES_PER_QUAD};
use crate::pipelines::{DecorationUniforms, RenderContext, TextureUniforms};

/// Channel layout of a content texture, selecting the sampling pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureKind {
    /// Platform-native (imported) texture.
    External,
    /// Opaque buffer; alpha is ignored.
    Rgb,
    Rgba,
}

/// A borrowed content texture with its channel-layout metadata. The
/// renderer never takes ownership of the texture.
#[derive(Clone, Copy)]
pub struct ContentTexture<'a> {
    pub view: &'a wgpu::TextureView,
    pub kind: TextureKind,
}

/// Everything one decoration draw needs, bundled per call and never
/// persisted.
///
/// `rect` is the element's border box in logical pixels; the render entry
/// points apply the style's translation and the output scale themselves.
/// Damage rects are in output device coordinates and must already be
/// clamped to the render target.
pub struct RenderRequest<'a> {
    pub damage: &'a DamageRegion,
    pub style: &'a Style,
    pub rect: Rect,
    pub texture: Option<ContentTexture<'a>>,
    pub transform: OutputTransform,
    pub scale: f32,
}

impl RenderRequest<'_> {
    /// The target box in device pixels: translated by the style's
    /// translation, then output-scaled.
    fn device_rect(&self) -> Rect {
        let mut rect = Rect {
            x: self.rect.x + self.style.scalar(ScalarProperty::TranslationX),
            y: self.rect.y + self.style.scalar(ScalarProperty::TranslationY),
            width: self.rect.width,
            height: self.rect.height,
        };
        rect.scale(self.scale);
        rect
    }

    fn projection(&self, rect: &Rect, projection: &Mat3) -> Mat3 {
        let rotation = self.style.scalar(ScalarProperty::Rotation);
        Mat3::project_box(rect, self.transform, rotation, projection)
    }
}

impl RenderContext {
    /// Draws the drop shadow behind a decorated element.
    ///
    /// The effective corner radius grows by the blur so the shadow's falloff
    /// keeps its softness proportional to the requested blur regardless of
    /// the configured radius.
    pub fn render_shadow(
        &self,
        device: &wgpu::Device,
        pass: &mut wgpu::RenderPass<'_>,
        request: &RenderRequest<'_>,
        projection: &Mat3,
    ) {
        let style = request.style;
        let rect = request.device_rect();
        let shadow_color = *style.vector4(VectorProperty::ShadowColor);
        let radius_px = style.vector4(VectorProperty::BorderRadius);
        let blur_px = style.scalar(ScalarProperty::ShadowBlur);

        // Blur as a proportion of the blurred corner radius. Only exact when
        // all four corners share one radius.
        let blur = 0.5 * blur_px / (blur_px + radius_px[0]).max(f32::EPSILON);
        let outline = 1.0 - blur;
        let scale = request.scale;
        let radius = [
            2.0 * scale * (blur_px + radius_px[Edge::Top as usize]) / rect.height,
            2.0 * scale * (blur_px + radius_px[Edge::Right as usize]) / rect.width,
            2.0 * scale * (blur_px + radius_px[Edge::Bottom as usize]) / rect.height,
            2.0 * scale * (blur_px + radius_px[Edge::Left as usize]) / rect.width,
        ];
        self.draw_decoration(
            device,
            pass,
            request,
            &rect,
            projection,
            shadow_color,
            radius,
            [0.0, 0.0],
            outline,
            blur,
        );
    }

    /// Draws the border ring.
    pub fn render_border(
        &self,
        device: &wgpu::Device,
        pass: &mut wgpu::RenderPass<'_>,
        request: &RenderRequest<'_>,
        projection: &Mat3,
    ) {
        let style = request.style;
        let rect = request.device_rect();
        let color = *style.vector4(VectorProperty::BorderColor);
        let radius_px = style.vector4(VectorProperty::BorderRadius);
        let scale = request.scale;
        let radius = [
            2.0 * scale * radius_px[Edge::Top as usize] / rect.height,
            2.0 * scale * radius_px[Edge::Right as usize] / rect.width,
            2.0 * scale * radius_px[Edge::Bottom as usize] / rect.height,
            2.0 * scale * radius_px[Edge::Left as usize] / rect.width,
        ];
        self.draw_decoration(
            device,
            pass,
            request,
            &rect,
            projection,
            color,
            radius,
            [0.0, 0.0],
            1.0,
            anti_alias_blur(radius_px[0]),
        );
    }

    /// Draws the background fill. Its corner radius shrinks by half the
    /// border width per edge so the fill's rounded edge meets the border's
    /// inner edge exactly (the border is centered on the boundary).
    pub fn render_background(
        &self,
        device: &wgpu::Device,
        pass: &mut wgpu::RenderPass<'_>,
        request: &RenderRequest<'_>,
        projection: &Mat3,
    ) {
        let style = request.style;
        let rect = request.device_rect();
        let bg_color = *style.vector4(VectorProperty::BackgroundColor);
        let width = style.vector4(VectorProperty::BorderWidth);
        let radius_px = style.vector4(VectorProperty::BorderRadius);
        let scale = request.scale;
        let edge = |e: Edge| radius_px[e as usize] - 0.5 * width[e as usize];
        let radius = [
            2.0 * scale * edge(Edge::Top) / rect.height,
            2.0 * scale * edge(Edge::Right) / rect.width,
            2.0 * scale * edge(Edge::Bottom) / rect.height,
            2.0 * scale * edge(Edge::Left) / rect.width,
        ];
        self.draw_decoration(
            device,
            pass,
            request,
            &rect,
            projection,
            bg_color,
            radius,
            [0.0, 0.0],
            1.0,
            anti_alias_blur(radius_px[0]),
        );
    }

    /// Draws the window surface as a textured quad, with the pipeline
    /// picked by the texture's channel layout. A no-op for requests without
    /// a texture.
    pub fn render_content(
        &self,
        device: &wgpu::Device,
        pass: &mut wgpu::RenderPass<'_>,
        request: &RenderRequest<'_>,
        projection: &Mat3,
    ) {
        let Some(texture) = request.texture else {
            return;
        };
        if request.damage.is_empty() {
            return;
        }

        let rect = request.device_rect();
        let matrix = request.projection(&rect, projection);

        // Unset opacity means fully opaque; tint channels are premultiplied.
        let opacity = request.style.scalar(ScalarProperty::Opacity);
        let alpha = if opacity < 0.0 { 1.0 } else { opacity.min(1.0) };
        let uniforms = TextureUniforms {
            proj: matrix.to_gpu_columns(),
            tint: [alpha; 4],
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("content uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("content bind group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let pipeline = match texture.kind {
            TextureKind::External => &self.external_pipeline,
            TextureKind::Rgb => &self.rgb_pipeline,
            TextureKind::Rgba => &self.rgba_pipeline,
        };

        let vertices = unit_quad();
        let vertex_buffer = vertex_buffer(device, &vertices);

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        draw_damaged(pass, request.damage, VERTICES_PER_QUAD as u32);
    }

    /// Shared body of the shadow/border/background draws.
    #[allow(clippy::too_many_arguments)]
    fn draw_decoration(
        &self,
        device: &wgpu::Device,
        pass: &mut wgpu::RenderPass<'_>,
        request: &RenderRequest<'_>,
        rect: &Rect,
        projection: &Mat3,
        fg_color: [f32; 4],
        corner_radius: [f32; 4],
        corner_shift: [f32; 2],
        outline: f32,
        blur: f32,
    ) {
        if request.damage.is_empty() {
            return;
        }

        let matrix = request.projection(rect, projection);
        let uniforms = DecorationUniforms {
            proj: matrix.to_gpu_columns(),
            fg_color,
            bg_color: [0.0; 4],
            outline,
            blur,
            _pad: [0.0; 2],
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("decoration uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("decoration bind group"),
            layout: &self.decoration_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let vertices = decoration_mesh(corner_radius, corner_shift);
        let vertex_buffer = vertex_buffer(device, &vertices);

        pass.set_pipeline(&self.decoration_pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        draw_damaged(pass, request.damage, MESH_VERTEX_COUNT as u32);
    }
}

/// A near-zero blur that anti-aliases a hard edge without visible
/// softening. Zero would alias; the denominator clamp keeps a degenerate
/// radius from blowing the band up instead of erroring.
fn anti_alias_blur(radius_px: f32) -> f32 {
    0.25 / radius_px.max(0.25)
}

fn vertex_buffer(device: &wgpu::Device, vertices: &[DecorationVertex]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("decoration mesh"),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

/// Issues one scissored draw per damage rect.
fn draw_damaged(pass: &mut wgpu::RenderPass<'_>, damage: &DamageRegion, vertex_count: u32) {
    for rect in damage.rects() {
        let x = rect.x.max(0);
        let y = rect.y.max(0);
        let width = rect.width - (x - rect.x);
        let height = rect.height - (y - rect.y);
        if width <= 0 || height <= 0 {
            continue;
        }
        pass.set_scissor_rect(x as u32, y as u32, width as u32, height as u32);
        pass.draw(0..vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mullion_core::IntRect;
    use std::time::Duration;

    fn styled() -> Style {
        let mut style = Style::new();
        style.set_vector4(VectorProperty::BorderRadius, [3.0; 4]);
        style.set_vector4(VectorProperty::BorderWidth, [1.0; 4]);
        style.set_scalar(ScalarProperty::TranslationX, 4.0);
        style.set_scalar(ScalarProperty::TranslationY, 6.0);
        style.animate(Duration::ZERO);
        style
    }

    #[test]
    fn device_rect_applies_translation_then_scale() {
        let style = styled();
        let damage = DamageRegion::new();
        let request = RenderRequest {
            damage: &damage,
            style: &style,
            rect: Rect::new(10.0, 20.0, 100.0, 50.0),
            texture: None,
            transform: OutputTransform::Normal,
            scale: 2.0,
        };
        assert_eq!(request.device_rect(), Rect::new(28.0, 52.0, 200.0, 100.0));
    }

    #[test]
    fn anti_alias_blur_is_small_and_finite() {
        assert_eq!(anti_alias_blur(3.0), 0.25 / 3.0);
        // Degenerate zero radius stays finite.
        assert_eq!(anti_alias_blur(0.0), 1.0);
    }

    #[test]
    fn shadow_blur_outline_relation() {
        // blur_ratio = 0.5 * blur / (blur + radius); outline complements it.
        let blur_px = 20.0f32;
        let radius_px = 20.0f32;
        let blur = 0.5 * blur_px / (blur_px + radius_px);
        assert_eq!(blur, 0.25);
        assert_eq!(1.0 - blur, 0.75);
    }

    #[test]
    fn negative_damage_rects_are_skipped_by_clamping() {
        // The clamp math mirrors draw_damaged: a rect fully left of the
        // target clamps to non-positive width.
        let rect = IntRect::new(-10, 0, 5, 5);
        let x = rect.x.max(0);
        let width = rect.width - (x - rect.x);
        assert!(width <= 0);
    }
}
