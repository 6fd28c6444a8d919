// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape and text descriptions handed to a [`GeometryCache`](crate::GeometryCache).

use kurbo::Point;

/// How a shape's vertex list is assembled into primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveMode {
    /// Independent line segments, two vertices each.
    Lines,
    /// Triangle strip.
    TriangleStrip,
    /// Triangle fan around the first vertex.
    TriangleFan,
}

/// Draw-state bucket a buffer is drawn with.
///
/// Groups are drawn in declaration order, each with one batched call, and
/// text is drawn after all of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrawGroup {
    /// Opaque fills.
    Plain,
    /// Alpha-blended lines.
    Outline,
    /// Additively blended data plots.
    Additive,
    /// Fills shaded by a dedicated program (the color wheel).
    Shader,
}

impl DrawGroup {
    /// All groups, in draw order.
    pub const ALL: [Self; 4] = [Self::Plain, Self::Outline, Self::Additive, Self::Shader];

    /// Picks the group for a shape key.
    ///
    /// Keys containing `outline` are blended, keys containing `wheel` use the
    /// shader group, keys containing `additive` are added; everything else is
    /// plain. The checks run in that order.
    ///
    /// ```
    /// use understory_geometry::DrawGroup;
    ///
    /// assert_eq!(DrawGroup::for_key("roundoutline0"), DrawGroup::Outline);
    /// assert_eq!(DrawGroup::for_key("wheel"), DrawGroup::Shader);
    /// assert_eq!(DrawGroup::for_key("additive_histogram1"), DrawGroup::Additive);
    /// assert_eq!(DrawGroup::for_key("roundbase0"), DrawGroup::Plain);
    /// ```
    #[must_use]
    pub fn for_key(key: &str) -> Self {
        if key.contains("outline") {
            Self::Outline
        } else if key.contains("wheel") {
            Self::Shader
        } else if key.contains("additive") {
            Self::Additive
        } else {
            Self::Plain
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Plain => 0,
            Self::Outline => 1,
            Self::Additive => 2,
            Self::Shader => 3,
        }
    }
}

/// A named vertex list with per-vertex colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Stable identifier within the owning cache.
    pub key: String,
    /// Primitive assembly.
    pub mode: PrimitiveMode,
    /// Vertex positions in window pixels, `y` up.
    pub vertices: Vec<[f32; 2]>,
    /// One RGBA color per vertex.
    pub colors: Vec<[f32; 4]>,
    /// Optional per-vertex texture coordinates.
    pub tex_coords: Option<Vec<[f32; 2]>>,
}

impl Shape {
    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the shape has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Group this shape's key maps to.
    #[must_use]
    pub fn group(&self) -> DrawGroup {
        DrawGroup::for_key(&self.key)
    }
}

/// Horizontal alignment of a [`TextRun`] relative to its origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Origin is the left end of the baseline.
    #[default]
    Left,
    /// Origin is the middle of the baseline.
    Center,
}

/// Caret and selection inside an editable [`TextRun`], as byte offsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextCaret {
    /// Caret position.
    pub position: usize,
    /// Other end of the selection; equal to `position` when nothing is selected.
    pub mark: usize,
}

/// A line of text drawn after all shape groups.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// The text.
    pub text: String,
    /// Baseline origin in window pixels.
    pub origin: Point,
    /// Alignment relative to `origin`.
    pub anchor: TextAnchor,
    /// RGBA color.
    pub color: [f32; 4],
    /// Font size in points.
    pub size: f32,
    /// Available width; text past it may be clipped by the backend.
    pub width: Option<f64>,
    /// Visible caret, while the text is being edited.
    pub caret: Option<TextCaret>,
}

/// Everything one widget paints: shapes plus text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeList {
    /// Shapes, keyed by [`Shape::key`].
    pub shapes: Vec<Shape>,
    /// Text runs, drawn in order.
    pub texts: Vec<TextRun>,
}

impl ShapeList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shape.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Appends a text run.
    pub fn push_text(&mut self, run: TextRun) {
        self.texts.push(run);
    }

    /// Appends everything from `other`.
    pub fn extend(&mut self, other: Self) {
        self.shapes.extend(other.shapes);
        self.texts.extend(other.texts);
    }

    /// Returns `true` if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.texts.is_empty()
    }
}
