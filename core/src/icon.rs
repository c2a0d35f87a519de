use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shape {
    Diamond,
    Square,
    Triangle,
    Circle,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Self::Diamond, Self::Square, Self::Triangle, Self::Circle];
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Cyan,
    Magenta,
    Gray,
    Chocolate,
}

impl Color {
    pub const ALL: [Color; 4] = [Self::Cyan, Self::Magenta, Self::Gray, Self::Chocolate];

    /// CSS color keyword
    pub const fn css_name(self) -> &'static str {
        use Color::*;
        match self {
            Cyan => "cyan",
            Magenta => "magenta",
            Gray => "gray",
            Chocolate => "chocolate",
        }
    }
}

/// What a tile hides, two tiles match when their icons are equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IconSpec {
    pub shape: Shape,
    pub color: Color,
}

impl IconSpec {
    pub const fn new(shape: Shape, color: Color) -> Self {
        Self { shape, color }
    }
}

/// Cartesian product of `shapes` and `colors`, shape-major.
pub fn icon_product(shapes: &[Shape], colors: &[Color]) -> Vec<IconSpec> {
    shapes
        .iter()
        .flat_map(|&shape| colors.iter().map(move |&color| IconSpec::new(shape, color)))
        .collect()
}

/// Removes repeated entries keeping the first occurrence.
pub(crate) fn dedup_ordered<T: PartialEq + Copy>(items: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len());
    for &item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
