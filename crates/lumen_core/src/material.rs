//! Phong materials and their inheritance through surface hierarchies.

use std::sync::Arc;

use crate::{color, Color, Pigment};

/// Surface appearance: a pigment plus Phong, reflection and refraction terms.
#[derive(Clone, Debug)]
pub struct Material {
    /// Base color source
    pub pigment: Pigment,

    /// Light reflected regardless of direction (0-1)
    pub ambient: f64,

    /// Lambertian term (0-1)
    pub diffuse: f64,

    /// Highlight strength (0-1)
    pub specular: f64,

    /// Highlight tightness; larger is smaller and sharper
    pub shininess: f64,

    /// Mirror contribution (0 = matte, 1 = perfect mirror)
    pub reflective: f64,

    /// Refracted contribution (0 = opaque, 1 = fully transparent)
    pub transparency: f64,

    /// Index of refraction (1.0 = vacuum, 1.5 = glass, 2.42 = diamond)
    pub refractive_index: f64,
}

impl Material {
    /// The material of any surface that never received one.
    pub const DEFAULT: Material = Material {
        pigment: Pigment::solid(color::WHITE),
        ambient: 0.1,
        diffuse: 0.9,
        specular: 0.9,
        shininess: 200.0,
        reflective: 0.0,
        transparency: 0.0,
        refractive_index: 1.0,
    };

    /// Create a default material with a solid color.
    pub fn new(color: Color) -> Self {
        Self {
            pigment: Pigment::Solid(color),
            ..Self::DEFAULT
        }
    }

    /// Set the pigment.
    pub fn with_pigment(mut self, pigment: impl Into<Pigment>) -> Self {
        self.pigment = pigment.into();
        self
    }

    /// Set the Phong coefficients.
    pub fn with_phong(mut self, ambient: f64, diffuse: f64, specular: f64, shininess: f64) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    /// Set the ambient coefficient.
    pub fn with_ambient(mut self, ambient: f64) -> Self {
        self.ambient = ambient;
        self
    }

    /// Set the mirror contribution, clamped to [0, 1].
    pub fn with_reflective(mut self, reflective: f64) -> Self {
        self.reflective = reflective.clamp(0.0, 1.0);
        self
    }

    /// Set the transparency, clamped to [0, 1].
    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency.clamp(0.0, 1.0);
        self
    }

    /// Set the index of refraction. Must be positive.
    pub fn with_refractive_index(mut self, refractive_index: f64) -> Self {
        self.refractive_index = refractive_index;
        self
    }

    /// Shorthand for a clear glass material.
    pub fn glass() -> Self {
        Self::default()
            .with_transparency(1.0)
            .with_refractive_index(1.5)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Static default instance, handed out for surfaces without a material.
static DEFAULT_MATERIAL: Material = Material::DEFAULT;

/// How a surface came by its material.
///
/// Groups and CSG nodes push their material down to descendants once the
/// hierarchy is assembled. Only `Unset` and `Inherited` slots accept a
/// pushed material; an `Explicit` one is never overwritten, so the push-down
/// can be repeated without changing the outcome.
#[derive(Clone, Debug, Default)]
pub enum MaterialBinding {
    /// No material yet; shades with [`Material::DEFAULT`].
    #[default]
    Unset,
    /// Received from the nearest ancestor with a material.
    Inherited(Arc<Material>),
    /// Set directly on this surface.
    Explicit(Arc<Material>),
}

impl MaterialBinding {
    /// The material to shade with.
    pub fn resolve(&self) -> &Material {
        match self {
            MaterialBinding::Unset => &DEFAULT_MATERIAL,
            MaterialBinding::Inherited(m) | MaterialBinding::Explicit(m) => m,
        }
    }

    /// The material this surface passes on to its descendants, if any.
    pub fn shared(&self) -> Option<&Arc<Material>> {
        match self {
            MaterialBinding::Unset => None,
            MaterialBinding::Inherited(m) | MaterialBinding::Explicit(m) => Some(m),
        }
    }

    /// True if the material was set directly on this surface.
    pub fn is_explicit(&self) -> bool {
        matches!(self, MaterialBinding::Explicit(_))
    }

    /// Accept an ancestor's material unless one was set explicitly.
    pub fn inherit(&mut self, material: &Arc<Material>) {
        if !self.is_explicit() {
            *self = MaterialBinding::Inherited(Arc::clone(material));
        }
    }
}
