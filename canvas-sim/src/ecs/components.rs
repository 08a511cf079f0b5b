// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Concrete components
//!
//! This module provides the built-in component payloads: the physics body
//! that integrates forces into motion, colliders, and render shapes.
//! Every constructor validates its arguments and fails with
//! [`ComponentError::InvalidComponentArgs`] instead of substituting a
//! default, so a component that exists is always well formed.

use crate::ecs::component::UpdateContext;
use crate::ecs::Vector;
use crate::error::{ComponentError, ComponentResult};
use crate::integration;

/// Flavour of physics body; both occupy the same registry slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Rigid body
    Rigid,
    /// Soft body (integrates identically for now)
    Soft,
}

/// Physics body: accumulates force and integrates it into motion each tick
///
/// # Examples
///
/// ```
/// use canvas_sim::ecs::components::PhysicsBody;
/// use canvas_sim::ecs::Vector;
///
/// let mut body = PhysicsBody::rigid(2.0).unwrap();
/// body.add_force(Vector::new(4.0, 0.0)).unwrap();
/// assert_eq!(body.force(), Vector::new(4.0, 0.0));
///
/// assert!(PhysicsBody::rigid(0.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    kind: BodyKind,
    velocity: Vector,
    acceleration: Vector,
    force: Vector,
    mass: f64,
}

impl PhysicsBody {
    /// Create a body at rest with the given mass
    ///
    /// Fails if the mass is not positive and finite, since integration
    /// divides by it.
    pub fn new(kind: BodyKind, mass: f64) -> ComponentResult<Self> {
        let body = PhysicsBody {
            kind,
            velocity: Vector::zero(),
            acceleration: Vector::zero(),
            force: Vector::zero(),
            mass,
        };
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(ComponentError::invalid_args(
                body.name(),
                format!("mass must be positive and finite, got {}", mass),
            ));
        }
        Ok(body)
    }

    /// Create a rigid body
    pub fn rigid(mass: f64) -> ComponentResult<Self> {
        Self::new(BodyKind::Rigid, mass)
    }

    /// Create a soft body
    pub fn soft(mass: f64) -> ComponentResult<Self> {
        Self::new(BodyKind::Soft, mass)
    }

    /// Concrete component name
    pub fn name(&self) -> &'static str {
        match self.kind {
            BodyKind::Rigid => "RigidBody",
            BodyKind::Soft => "SoftBody",
        }
    }

    /// Body flavour
    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Current velocity
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// Overwrite the velocity
    ///
    /// Fails on a non-finite vector, leaving the velocity unchanged.
    pub fn set_velocity(&mut self, velocity: Vector) -> ComponentResult<()> {
        self.check_finite("velocity", velocity)?;
        self.velocity = velocity;
        Ok(())
    }

    /// Acceleration derived during the latest update
    pub fn acceleration(&self) -> Vector {
        self.acceleration
    }

    /// Force accumulated since the latest update
    pub fn force(&self) -> Vector {
        self.force
    }

    /// Mass; always positive
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Accumulate a force to be consumed by the next update
    ///
    /// Fails on a non-finite vector, leaving the accumulated force unchanged.
    pub fn add_force(&mut self, force: Vector) -> ComponentResult<()> {
        self.check_finite("force", force)?;
        self.force.add(force);
        Ok(())
    }

    /// Integrate one tick, moving the owner's position
    pub fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        integration::step(
            self,
            ctx.position,
            ctx.delta,
            ctx.settings.gravity,
            ctx.settings.integration,
        );
    }

    pub(crate) fn apply_gravity(&mut self, gravity: f64) {
        self.force.y += gravity * self.mass;
    }

    pub(crate) fn update_acceleration(&mut self) {
        self.acceleration = self.force / self.mass;
    }

    pub(crate) fn update_velocity(&mut self, dt: f64) {
        self.velocity += self.acceleration * dt;
    }

    pub(crate) fn reset_force(&mut self) {
        self.force.reset();
    }

    fn check_finite(&self, what: &str, value: Vector) -> ComponentResult<()> {
        if value.is_valid() {
            Ok(())
        } else {
            Err(ComponentError::invalid_args(
                self.name(),
                format!("{} must be finite, got {}", what, value),
            ))
        }
    }
}

/// RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque colour from channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Colour with explicit alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque grey of the given brightness
    pub const fn grey(value: u8) -> Self {
        Color::rgb(value, value, value)
    }

    /// Opaque white
    pub const fn white() -> Self {
        Color::grey(255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::white()
    }
}

/// Geometry shared by colliders and drawable shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle centred on the owner
    Rect {
        /// Width
        width: f64,
        /// Height
        height: f64,
    },
    /// Circle centred on the owner
    Circle {
        /// Radius
        radius: f64,
    },
    /// Axis-aligned ellipse centred on the owner
    Ellipse {
        /// Width
        width: f64,
        /// Height
        height: f64,
    },
    /// Polygon with vertices relative to the owner
    Polygon {
        /// Vertices in winding order
        vertices: Vec<Vector>,
    },
}

impl Shape {
    fn validate(&self, component: &'static str) -> ComponentResult<()> {
        match self {
            Shape::Rect { width, height } | Shape::Ellipse { width, height } => {
                check_dimension(component, "width", *width)?;
                check_dimension(component, "height", *height)
            }
            Shape::Circle { radius } => check_dimension(component, "radius", *radius),
            Shape::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(ComponentError::invalid_args(
                        component,
                        format!("polygon needs at least 3 vertices, got {}", vertices.len()),
                    ));
                }
                if let Some(bad) = vertices.iter().find(|v| !v.is_valid()) {
                    return Err(ComponentError::invalid_args(
                        component,
                        format!("vertex {} is not finite", bad),
                    ));
                }
                Ok(())
            }
        }
    }
}

fn check_dimension(component: &'static str, field: &str, value: f64) -> ComponentResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ComponentError::invalid_args(
            component,
            format!("{} must be positive and finite, got {}", field, value),
        ))
    }
}

/// Collision shape placeholder
///
/// Colliders only carry geometry. Detection and response are left to a
/// [`CollisionResolver`](crate::collab::CollisionResolver).
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    shape: Shape,
}

impl Collider {
    /// Create a collider from validated geometry
    pub fn new(shape: Shape) -> ComponentResult<Self> {
        shape.validate(collider_name(&shape))?;
        Ok(Collider { shape })
    }

    /// Rectangle collider
    pub fn rectangle(width: f64, height: f64) -> ComponentResult<Self> {
        Self::new(Shape::Rect { width, height })
    }

    /// Circle collider
    pub fn circle(radius: f64) -> ComponentResult<Self> {
        Self::new(Shape::Circle { radius })
    }

    /// Ellipse collider
    pub fn ellipse(width: f64, height: f64) -> ComponentResult<Self> {
        Self::new(Shape::Ellipse { width, height })
    }

    /// Polygon collider
    pub fn polygon(vertices: Vec<Vector>) -> ComponentResult<Self> {
        Self::new(Shape::Polygon { vertices })
    }

    /// Collision geometry
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Concrete component name
    pub fn name(&self) -> &'static str {
        collider_name(&self.shape)
    }
}

fn collider_name(shape: &Shape) -> &'static str {
    match shape {
        Shape::Rect { .. } => "RectangleCollider",
        Shape::Circle { .. } => "CircleCollider",
        Shape::Ellipse { .. } => "EllipseCollider",
        Shape::Polygon { .. } => "PolygonCollider",
    }
}

/// What a render component draws
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Image referenced by path or URL; loading is the renderer's job
    Sprite {
        /// Image source
        source: String,
    },
    /// Text label
    Text {
        /// Label contents; may be empty
        text: String,
    },
    /// Filled geometric shape
    Shape(Shape),
}

/// Drawable attached to an object
///
/// Colour is optional at construction and defaults to white.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderShape {
    visual: Visual,
    color: Color,
}

impl RenderShape {
    /// Create a render component from a validated visual
    pub fn new(visual: Visual, color: Option<Color>) -> ComponentResult<Self> {
        let name = render_name(&visual);
        match &visual {
            Visual::Sprite { source } if source.trim().is_empty() => {
                return Err(ComponentError::invalid_args(name, "sprite source must not be empty"));
            }
            Visual::Shape(shape) => shape.validate(name)?,
            _ => {}
        }
        Ok(RenderShape {
            visual,
            color: color.unwrap_or_default(),
        })
    }

    /// Sprite from an image source
    pub fn sprite(source: impl Into<String>) -> ComponentResult<Self> {
        Self::new(Visual::Sprite { source: source.into() }, None)
    }

    /// Text label
    pub fn text(text: impl Into<String>) -> ComponentResult<Self> {
        Self::new(Visual::Text { text: text.into() }, None)
    }

    /// Filled rectangle
    pub fn rect(width: f64, height: f64, color: Option<Color>) -> ComponentResult<Self> {
        Self::new(Visual::Shape(Shape::Rect { width, height }), color)
    }

    /// Filled circle
    pub fn circle(radius: f64, color: Option<Color>) -> ComponentResult<Self> {
        Self::new(Visual::Shape(Shape::Circle { radius }), color)
    }

    /// Filled ellipse
    pub fn ellipse(width: f64, height: f64, color: Option<Color>) -> ComponentResult<Self> {
        Self::new(Visual::Shape(Shape::Ellipse { width, height }), color)
    }

    /// Filled polygon
    pub fn polygon(vertices: Vec<Vector>, color: Option<Color>) -> ComponentResult<Self> {
        Self::new(Visual::Shape(Shape::Polygon { vertices }), color)
    }

    /// What is drawn
    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    /// Fill colour
    pub fn color(&self) -> Color {
        self.color
    }

    /// Change the fill colour
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Replace the label of a text component
    ///
    /// Fails for any other visual.
    pub fn set_text(&mut self, text: impl Into<String>) -> ComponentResult<()> {
        match &mut self.visual {
            Visual::Text { text: current } => {
                *current = text.into();
                Ok(())
            }
            _ => Err(ComponentError::invalid_args(
                self.name(),
                "set_text is only valid on text renders",
            )),
        }
    }

    /// Concrete component name
    pub fn name(&self) -> &'static str {
        render_name(&self.visual)
    }
}

fn render_name(visual: &Visual) -> &'static str {
    match visual {
        Visual::Sprite { .. } => "SpriteRender",
        Visual::Text { .. } => "TextRender",
        Visual::Shape(Shape::Rect { .. }) => "RectRender",
        Visual::Shape(Shape::Circle { .. }) => "CircleRender",
        Visual::Shape(Shape::Ellipse { .. }) => "EllipseRender",
        Visual::Shape(Shape::Polygon { .. }) => "PolygonRender",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vector> {
        vec![
            Vector::new(0.0, 0.0),
            Vector::new(1.0, 0.0),
            Vector::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_body_starts_at_rest() {
        let body = PhysicsBody::rigid(3.0).unwrap();
        assert_eq!(body.mass(), 3.0);
        assert!(body.velocity().is_zero());
        assert!(body.acceleration().is_zero());
        assert!(body.force().is_zero());
        assert_eq!(body.kind(), BodyKind::Rigid);
    }

    #[test]
    fn test_body_rejects_bad_mass() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = PhysicsBody::soft(mass).unwrap_err();
            assert!(matches!(
                err,
                ComponentError::InvalidComponentArgs { component: "SoftBody", .. }
            ));
        }
    }

    #[test]
    fn test_forces_accumulate() {
        let mut body = PhysicsBody::rigid(1.0).unwrap();
        body.add_force(Vector::new(1.0, 2.0)).unwrap();
        body.add_force(Vector::new(-3.0, 1.0)).unwrap();
        assert_eq!(body.force(), Vector::new(-2.0, 3.0));
    }

    #[test]
    fn test_non_finite_force_and_velocity_rejected() {
        let mut body = PhysicsBody::rigid(1.0).unwrap();
        body.add_force(Vector::new(2.0, 0.0)).unwrap();

        let err = body.add_force(Vector::new(f64::INFINITY, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            ComponentError::InvalidComponentArgs { component: "RigidBody", .. }
        ));
        assert!(body.add_force(Vector::new(0.0, f64::NAN)).is_err());
        assert_eq!(body.force(), Vector::new(2.0, 0.0));

        assert!(body.set_velocity(Vector::new(f64::NAN, 1.0)).is_err());
        assert!(body.velocity().is_zero());
        body.set_velocity(Vector::new(1.0, 1.0)).unwrap();
        assert_eq!(body.velocity(), Vector::new(1.0, 1.0));
    }

    #[test]
    fn test_collider_validation() {
        assert!(Collider::rectangle(10.0, 5.0).is_ok());
        assert!(Collider::circle(0.0).is_err());
        assert!(Collider::ellipse(4.0, -1.0).is_err());
        assert!(Collider::polygon(triangle()).is_ok());
        assert!(Collider::polygon(triangle()[..2].to_vec()).is_err());

        let err = Collider::circle(f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            ComponentError::InvalidComponentArgs { component: "CircleCollider", .. }
        ));
    }

    #[test]
    fn test_polygon_rejects_non_finite_vertex() {
        let mut vertices = triangle();
        vertices.push(Vector::new(f64::NAN, 0.0));
        assert!(Collider::polygon(vertices).is_err());
    }

    #[test]
    fn test_render_defaults_to_white() {
        let shape = RenderShape::circle(5.0, None).unwrap();
        assert_eq!(shape.color(), Color::white());
        assert_eq!(shape.name(), "CircleRender");

        let red = RenderShape::rect(2.0, 3.0, Some(Color::rgb(255, 0, 0))).unwrap();
        assert_eq!(red.color(), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_render_rejects_missing_dimensions() {
        assert!(RenderShape::rect(0.0, 3.0, None).is_err());
        assert!(RenderShape::ellipse(3.0, 0.0, None).is_err());
        assert!(RenderShape::sprite("   ").is_err());
        assert!(RenderShape::polygon(Vec::new(), None).is_err());
    }

    #[test]
    fn test_text_render() {
        let mut label = RenderShape::text("").unwrap();
        label.set_text("score: 10").unwrap();
        assert_eq!(
            label.visual(),
            &Visual::Text {
                text: "score: 10".to_string()
            }
        );

        let mut sprite = RenderShape::sprite("ship.png").unwrap();
        assert!(sprite.set_text("nope").is_err());
    }
}
