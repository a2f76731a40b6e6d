//! WGSL sources for the decoration pipelines.
//!
//! All four modules share the same vertex stage: project the mesh position
//! by a 3x3 matrix, pass the texture coordinate through. Only the fragment
//! stages differ per program kind (a test below pins the vertex stages to
//! byte equality).
//!
//! The decoration fragment computes coverage analytically instead of
//! sampling a precomputed blur lookup table: the distance from the texture-
//! space origin is thresholded against an `outline` radius with a `blur`
//! half-width. With the mesh's texcoord layout this yields anti-aliased
//! rounded corners, and a soft gaussian-looking falloff when blur is large.

/// Vertex stage text, for the shared-stage test.
#[cfg(test)]
pub(crate) const VERTEX_STAGE: &str = "
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) texcoord: vec2<f32>,
}

@vertex
fn vs_main(
    @location(0) pos: vec2<f32>,
    @location(1) texcoord: vec2<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    let projected = u.proj * vec3<f32>(pos, 1.0);
    out.position = vec4<f32>(projected.xy, 0.0, 1.0);
    out.texcoord = texcoord;
    return out;
}
";

/// Fragment colors are premultiplied alpha.
pub const DECORATION_SHADER: &str = "
struct DecorationUniforms {
    proj: mat3x3<f32>,
    fg_color: vec4<f32>,
    bg_color: vec4<f32>,
    outline: f32,
    blur: f32,
}

@group(0) @binding(0) var<uniform> u: DecorationUniforms;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) texcoord: vec2<f32>,
}

@vertex
fn vs_main(
    @location(0) pos: vec2<f32>,
    @location(1) texcoord: vec2<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    let projected = u.proj * vec3<f32>(pos, 1.0);
    out.position = vec4<f32>(projected.xy, 0.0, 1.0);
    out.texcoord = texcoord;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.texcoord);
    let coverage = 1.0 - smoothstep(u.outline - u.blur, u.outline + u.blur, dist);
    return u.fg_color * coverage + u.bg_color * (1.0 - coverage);
}
";

/// Shared declarations of the three texture modules.
#[cfg(test)]
pub(crate) const TEXTURE_PRELUDE: &str = "
struct TextureUniforms {
    proj: mat3x3<f32>,
    tint: vec4<f32>,
}

@group(0) @binding(0) var<uniform> u: TextureUniforms;
@group(0) @binding(1) var tex: texture_2d<f32>;
@group(0) @binding(2) var tex_sampler: sampler;
";

pub const RGBA_TEXTURE_SHADER: &str = "
struct TextureUniforms {
    proj: mat3x3<f32>,
    tint: vec4<f32>,
}

@group(0) @binding(0) var<uniform> u: TextureUniforms;
@group(0) @binding(1) var tex: texture_2d<f32>;
@group(0) @binding(2) var tex_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) texcoord: vec2<f32>,
}

@vertex
fn vs_main(
    @location(0) pos: vec2<f32>,
    @location(1) texcoord: vec2<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    let projected = u.proj * vec3<f32>(pos, 1.0);
    out.position = vec4<f32>(projected.xy, 0.0, 1.0);
    out.texcoord = texcoord;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(tex, tex_sampler, in.texcoord) * u.tint;
}
";

/// Samples an opaque buffer; the alpha channel is forced to one before the
/// tint applies.
pub const RGB_TEXTURE_SHADER: &str = "
struct TextureUniforms {
    proj: mat3x3<f32>,
    tint: vec4<f32>,
}

@group(0) @binding(0) var<uniform> u: TextureUniforms;
@group(0) @binding(1) var tex: texture_2d<f32>;
@group(0) @binding(2) var tex_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) texcoord: vec2<f32>,
}

@vertex
fn vs_main(
    @location(0) pos: vec2<f32>,
    @location(1) texcoord: vec2<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    let projected = u.proj * vec3<f32>(pos, 1.0);
    out.position = vec4<f32>(projected.xy, 0.0, 1.0);
    out.texcoord = texcoord;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let rgb = textureSample(tex, tex_sampler, in.texcoord).rgb;
    return vec4<f32>(rgb, 1.0) * u.tint;
}
";

/// Platform-native (dmabuf-imported) textures reach wgpu as ordinary 2D
/// textures, so this stage samples a 2D binding; it stays a separate module
/// so platform backends can substitute their own sampling logic without
/// touching the pipeline set.
pub const EXTERNAL_TEXTURE_SHADER: &str = "
struct TextureUniforms {
    proj: mat3x3<f32>,
    tint: vec4<f32>,
}

@group(0) @binding(0) var<uniform> u: TextureUniforms;
@group(0) @binding(1) var tex: texture_2d<f32>;
@group(0) @binding(2) var tex_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) texcoord: vec2<f32>,
}

@vertex
fn vs_main(
    @location(0) pos: vec2<f32>,
    @location(1) texcoord: vec2<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    let projected = u.proj * vec3<f32>(pos, 1.0);
    out.position = vec4<f32>(projected.xy, 0.0, 1.0);
    out.texcoord = texcoord;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(tex, tex_sampler, in.texcoord) * u.tint;
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_module_embeds_the_shared_vertex_stage() {
        for source in [
            DECORATION_SHADER,
            RGBA_TEXTURE_SHADER,
            RGB_TEXTURE_SHADER,
            EXTERNAL_TEXTURE_SHADER,
        ] {
            assert!(source.contains(VERTEX_STAGE.trim()));
        }
    }

    #[test]
    fn texture_modules_share_their_bindings() {
        for source in [
            RGBA_TEXTURE_SHADER,
            RGB_TEXTURE_SHADER,
            EXTERNAL_TEXTURE_SHADER,
        ] {
            assert!(source.contains(TEXTURE_PRELUDE.trim()));
        }
    }
}
