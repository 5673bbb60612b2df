//! Reference implementation of the per-pixel illumination contract.
//!
//! The WGSL fragment stage in [`crate::render`] implements the same
//! algorithm on the GPU; the two must agree branch for branch. Keeping
//! the formula here as plain math lets the lighting model be exercised
//! without any graphics context.

use glam::{Vec2, Vec3, Vec4};

use crate::scene::{LightState, Material};

/// Base color used when a material selects a texture unit that does not
/// exist.
pub const FALLBACK_COLOR: Vec4 = Vec4::new(1.0, 0.2, 0.2, 1.0);

/// Highest texture unit the shading contract knows about.
pub const MAX_TEXTURE_UNIT: u32 = 2;

const AMBIENT_FACTOR: f32 = 0.3;
const SPOT_AMBIENT_FACTOR: f32 = 0.2;
const SPECULAR_EXPONENT: f32 = 100.0;

/// Interpolated per-pixel surface inputs.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub normal: Vec3,
    /// Surface position in world space (model transform applied).
    pub position: Vec3,
    pub uv: Vec2,
}

/// Resolves the pre-lighting base color for a fragment.
///
/// Priority: normal-debug display, flat color, UV-as-color, texture
/// sample, fallback for an unknown selector.
pub fn base_color<F>(material: Material, fragment: &Fragment, normal_debug: bool, sample: F) -> Vec4
where
    F: FnOnce(u32, Vec2) -> Vec4,
{
    if normal_debug {
        return ((fragment.normal.normalize() + 1.0) * 0.5).extend(1.0);
    }
    match material {
        Material::Flat(color) => color,
        Material::UvDebug => Vec4::new(fragment.uv.x, fragment.uv.y, 1.0, 1.0),
        Material::Texture(unit) if unit <= MAX_TEXTURE_UNIT => sample(unit, fragment.uv),
        Material::Texture(_) => FALLBACK_COLOR,
    }
}

/// Applies the point-light and spotlight terms to a resolved base color.
///
/// With the light off the base color passes through untouched. The
/// spotlight reuses the point-light position as its origin and
/// contributes strictly additively, and only past the hard cosine
/// cutoff. The output alpha is always the base alpha.
pub fn illuminate(base: Vec4, fragment: &Fragment, light: &LightState, camera_pos: Vec3) -> Vec4 {
    if !light.light_on {
        return base;
    }

    let rgb = base.truncate();
    let n = fragment.normal.normalize();
    let l = (light.position - fragment.position).normalize();
    let n_dot_l = n.dot(l).max(0.0);

    let ambient = AMBIENT_FACTOR * rgb;
    let diffuse = rgb * n_dot_l;
    let e = (camera_pos - fragment.position).normalize();
    let r = reflect(-l, n);
    let specular = e.dot(r).max(0.0).powf(SPECULAR_EXPONENT);

    let mut total = ambient + diffuse + Vec3::splat(specular);
    if light.tint_on {
        total *= light.color;
    }

    if light.spot_on {
        // Same origin as the point light, so L, diffuse and specular carry over.
        let spot_factor = l.dot(-light.spot_direction.normalize());
        if spot_factor > light.spot_cutoff {
            let mut spot = SPOT_AMBIENT_FACTOR * rgb + diffuse + Vec3::splat(specular);
            if light.tint_on {
                spot *= light.color;
            }
            total += spot;
        }
    }

    total.extend(base.w)
}

/// Full contract: resolve the base color, then light it. Normal-debug
/// mode bypasses lighting entirely.
pub fn shade<F>(
    material: Material,
    fragment: &Fragment,
    light: &LightState,
    camera_pos: Vec3,
    sample: F,
) -> Vec4
where
    F: FnOnce(u32, Vec2) -> Vec4,
{
    let base = base_color(material, fragment, light.normal_debug, sample);
    if light.normal_debug {
        return base;
    }
    illuminate(base, fragment, light, camera_pos)
}

fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment() -> Fragment {
        Fragment {
            normal: Vec3::Y,
            position: Vec3::ZERO,
            uv: Vec2::new(0.25, 0.75),
        }
    }

    fn no_sample(_: u32, _: Vec2) -> Vec4 {
        panic!("texture sample not expected for this material");
    }

    #[test]
    fn light_off_passes_the_base_color_through() {
        let light = LightState {
            light_on: false,
            ..LightState::default()
        };
        let base = Vec4::new(0.2, 0.4, 0.6, 0.5);
        let shaded = shade(
            Material::Flat(base),
            &fragment(),
            &light,
            Vec3::new(3.0, 1.0, -2.0),
            no_sample,
        );
        assert_eq!(shaded, base);
    }

    #[test]
    fn normal_debug_ignores_all_lighting_state() {
        for light_on in [false, true] {
            let light = LightState {
                normal_debug: true,
                light_on,
                spot_on: true,
                ..LightState::default()
            };
            let frag = Fragment {
                normal: Vec3::new(0.0, 0.0, -2.0),
                ..fragment()
            };
            let shaded = shade(Material::UvDebug, &frag, &light, Vec3::ZERO, no_sample);
            assert_eq!(shaded, Vec4::new(0.5, 0.5, 0.0, 1.0));
        }
    }

    #[test]
    fn uv_debug_maps_uv_to_red_green() {
        let light = LightState {
            light_on: false,
            ..LightState::default()
        };
        let shaded = shade(Material::UvDebug, &fragment(), &light, Vec3::ZERO, no_sample);
        assert_eq!(shaded, Vec4::new(0.25, 0.75, 1.0, 1.0));
    }

    #[test]
    fn texture_materials_sample_their_unit() {
        let light = LightState {
            light_on: false,
            ..LightState::default()
        };
        let shaded = shade(
            Material::Texture(2),
            &fragment(),
            &light,
            Vec3::ZERO,
            |unit, uv| {
                assert_eq!(unit, 2);
                assert_eq!(uv, Vec2::new(0.25, 0.75));
                Vec4::new(0.1, 0.2, 0.3, 1.0)
            },
        );
        assert_eq!(shaded, Vec4::new(0.1, 0.2, 0.3, 1.0));
    }

    #[test]
    fn unknown_texture_unit_falls_back() {
        let light = LightState {
            light_on: false,
            ..LightState::default()
        };
        let shaded = shade(Material::Texture(7), &fragment(), &light, Vec3::ZERO, no_sample);
        assert_eq!(shaded, FALLBACK_COLOR);
    }

    #[test]
    fn ambient_survives_a_light_behind_the_surface() {
        let light = LightState {
            position: Vec3::new(0.0, -5.0, 0.0),
            tint_on: false,
            ..LightState::default()
        };
        let base = Vec4::new(1.0, 0.5, 0.0, 1.0);
        let lit = illuminate(base, &fragment(), &light, Vec3::new(0.0, 3.0, 0.0));
        // Diffuse and specular vanish; 0.3 * base remains.
        assert!((lit.truncate() - 0.3 * base.truncate()).length() < 1e-4);
        assert_eq!(lit.w, 1.0);
    }

    #[test]
    fn tint_scales_the_summed_terms() {
        let base = Vec4::new(0.5, 0.5, 0.5, 1.0);
        let camera = Vec3::new(0.0, 4.0, 0.0);
        let untinted = illuminate(
            base,
            &fragment(),
            &LightState {
                tint_on: false,
                ..LightState::default()
            },
            camera,
        );
        let tinted = illuminate(
            base,
            &fragment(),
            &LightState {
                tint_on: true,
                color: Vec3::new(0.5, 1.0, 2.0),
                ..LightState::default()
            },
            camera,
        );
        let expected = untinted.truncate() * Vec3::new(0.5, 1.0, 2.0);
        assert!((tinted.truncate() - expected).length() < 1e-4);
    }

    #[test]
    fn spotlight_is_additive_and_gated_by_the_cutoff() {
        let base = Vec4::new(0.3, 0.6, 0.9, 1.0);
        let camera = Vec3::new(0.0, 4.0, 0.0);
        // Light directly above the fragment, spot cone pointing down:
        // L = (0,1,0), spot factor = dot(L, -dir) = 1 > 0.7.
        let inside = LightState {
            position: Vec3::new(0.0, 2.0, 0.0),
            spot_on: true,
            ..LightState::default()
        };
        let without = LightState {
            spot_on: false,
            ..inside.clone()
        };
        let lit_inside = illuminate(base, &fragment(), &inside, camera);
        let lit_without = illuminate(base, &fragment(), &without, camera);
        assert!(lit_inside.x > lit_without.x);
        assert!(lit_inside.y > lit_without.y);
        assert!(lit_inside.z > lit_without.z);

        // Swing the cone sideways: spot factor drops to 0, contribution
        // must vanish exactly.
        let outside = LightState {
            spot_direction: Vec3::X,
            ..inside
        };
        let lit_outside = illuminate(base, &fragment(), &outside, camera);
        assert_eq!(lit_outside, lit_without);
    }

    #[test]
    fn alpha_always_comes_from_the_base_color() {
        let base = Vec4::new(0.9, 0.9, 0.9, 0.25);
        let lit = illuminate(base, &fragment(), &LightState::default(), Vec3::Y * 5.0);
        assert_eq!(lit.w, 0.25);
    }
}
