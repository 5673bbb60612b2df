//! WGSL program implementing the illumination contract on the GPU.
//!
//! Must stay in agreement with the pure reference in [`crate::shading`].

pub(crate) const SHADER: &str = r#"
struct GlobalUniform {
    projection: mat4x4<f32>,
    view: mat4x4<f32>,
    global_rotation: mat4x4<f32>,
    camera_position: vec4<f32>,
    light_position: vec4<f32>,
    light_color: vec4<f32>,
    // xyz = spotlight direction, w = cutoff cosine
    spot_direction: vec4<f32>,
    // x = light on, y = tint on, z = spotlight on, w = normal debug
    flags: vec4<i32>,
}

struct ObjectConstants {
    model: mat4x4<f32>,
    color: vec4<f32>,
    // x = material selector: -2 flat, -1 UV, 0..2 texture unit
    selector: vec4<i32>,
}

@group(0) @binding(0)
var<uniform> globals: GlobalUniform;

@group(1) @binding(0)
var<uniform> object: ObjectConstants;

@group(2) @binding(0)
var tex_sampler: sampler;
@group(2) @binding(1)
var texture0: texture_2d<f32>;
@group(2) @binding(2)
var texture1: texture_2d<f32>;
@group(2) @binding(3)
var texture2: texture_2d<f32>;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world_pos = object.model * vec4<f32>(input.position, 1.0);
    out.position = globals.projection * globals.view * globals.global_rotation * world_pos;
    out.world_pos = world_pos.xyz;
    out.normal = input.normal;
    out.uv = input.uv;
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let sample0 = textureSample(texture0, tex_sampler, input.uv);
    let sample1 = textureSample(texture1, tex_sampler, input.uv);
    let sample2 = textureSample(texture2, tex_sampler, input.uv);

    if (globals.flags.w == 1) {
        return vec4<f32>((normalize(input.normal) + vec3<f32>(1.0)) * 0.5, 1.0);
    }

    var base: vec4<f32>;
    let selector = object.selector.x;
    if (selector == -2) {
        base = object.color;
    } else if (selector == -1) {
        base = vec4<f32>(input.uv, 1.0, 1.0);
    } else if (selector == 0) {
        base = sample0;
    } else if (selector == 1) {
        base = sample1;
    } else if (selector == 2) {
        base = sample2;
    } else {
        base = vec4<f32>(1.0, 0.2, 0.2, 1.0);
    }

    if (globals.flags.x == 0) {
        return base;
    }

    let n = normalize(input.normal);
    let l = normalize(globals.light_position.xyz - input.world_pos);
    let n_dot_l = max(dot(n, l), 0.0);
    let ambient = 0.3 * base.rgb;
    let diffuse = base.rgb * n_dot_l;
    let e = normalize(globals.camera_position.xyz - input.world_pos);
    let r = reflect(-l, n);
    let specular = pow(max(dot(e, r), 0.0), 100.0);

    var total = ambient + diffuse + vec3<f32>(specular);
    if (globals.flags.y == 1) {
        total *= globals.light_color.rgb;
    }

    if (globals.flags.z == 1) {
        let spot_factor = dot(l, -normalize(globals.spot_direction.xyz));
        if (spot_factor > globals.spot_direction.w) {
            var spot = 0.2 * base.rgb + diffuse + vec3<f32>(specular);
            if (globals.flags.y == 1) {
                spot *= globals.light_color.rgb;
            }
            total += spot;
        }
    }

    return vec4<f32>(total, base.a);
}
"#;
