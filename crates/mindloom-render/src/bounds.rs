use serde::{Deserialize, Serialize};

use crate::model::PositionedNode;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    /// Box enclosing every node's box (center ± half extent).
    pub fn from_nodes(nodes: &[PositionedNode]) -> Option<Self> {
        Self::from_points(
            nodes
                .iter()
                .flat_map(|n| [(n.left(), n.top()), (n.right(), n.bottom())]),
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Translates `nodes` so their tight bounding box starts at `(margin, margin)` and returns the
/// canvas size: that box plus one margin on each far edge.
///
/// Box sizes are untouched; only centers move.
pub fn normalize_bounds(nodes: &mut [PositionedNode], margin: f64) -> (f64, f64) {
    let Some(bounds) = Bounds::from_nodes(nodes) else {
        return (margin * 2.0, margin * 2.0);
    };

    let shift_x = margin - bounds.min_x;
    let shift_y = margin - bounds.min_y;
    for n in nodes.iter_mut() {
        n.x += shift_x;
        n.y += shift_y;
    }

    (
        bounds.width() + margin * 2.0,
        bounds.height() + margin * 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;

    fn node(id: u32, x: f64, y: f64, width: f64, height: f64) -> PositionedNode {
        PositionedNode {
            id: NodeId(id),
            title: String::new(),
            lines: vec![String::new()],
            depth: 0,
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn normalize_moves_min_corner_to_margin() {
        let mut nodes = vec![
            node(0, 0.0, 0.0, 100.0, 40.0),
            node(1, -420.0, -80.0, 200.0, 60.0),
            node(2, 420.0, 90.0, 150.0, 40.0),
        ];
        let (w, h) = normalize_bounds(&mut nodes, 10.0);

        let b = Bounds::from_nodes(&nodes).unwrap();
        assert_eq!(b.min_x, 10.0);
        assert_eq!(b.min_y, 10.0);
        // x: [-520, 495], y: [-110, 110]
        assert_eq!(w, 1015.0 + 20.0);
        assert_eq!(h, 220.0 + 20.0);
        assert_eq!(b.max_x + 10.0, w);
        assert_eq!(b.max_y + 10.0, h);

        assert_eq!((nodes[1].width, nodes[1].height), (200.0, 60.0));
    }

    #[test]
    fn normalize_of_nothing_is_just_margins() {
        assert_eq!(normalize_bounds(&mut [], 5.0), (10.0, 10.0));
    }
}
