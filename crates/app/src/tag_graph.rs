//! Layout for the tag constellation: every distinct journal tag becomes a
//! node sized by frequency, with an edge between every pair.

use egui::{Pos2, Vec2};
use rand::Rng;
use std::collections::BTreeMap;

/// Height used when the containing panel reports no usable height.
pub const FALLBACK_HEIGHT: f32 = 400.0;

#[derive(Debug, Clone)]
pub struct TagNode {
    pub tag: String,
    pub weight: usize,
    pub pos: Pos2,
}

#[derive(Debug, Clone)]
pub struct TagGraphLayout {
    pub nodes: Vec<TagNode>,
    pub size: Vec2,
}

/// Node radius scales with frequency, clamped to 10..=40.
pub fn node_radius(weight: usize) -> f32 {
    (weight as f32 * 5.0).clamp(10.0, 40.0)
}

impl TagGraphLayout {
    /// Scatter one node per tag uniformly inside a 200-unit square
    /// centered on the surface center. Positions are random on purpose;
    /// the caller regenerates on journal changes and resizes.
    pub fn generate(
        frequencies: &BTreeMap<String, usize>,
        width: f32,
        height: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let height = if height <= 0.0 { FALLBACK_HEIGHT } else { height };
        let center = Pos2::new(width / 2.0, height / 2.0);
        let nodes = frequencies
            .iter()
            .map(|(tag, &weight)| TagNode {
                tag: tag.clone(),
                weight,
                pos: center
                    + Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)),
            })
            .collect();
        Self {
            nodes,
            size: Vec2::new(width, height),
        }
    }

    /// Every unordered node pair, for edge drawing.
    pub fn edges(&self) -> impl Iterator<Item = (&TagNode, &TagNode)> {
        self.nodes.iter().enumerate().flat_map(move |(i, a)| {
            self.nodes[i + 1..].iter().map(move |b| (a, b))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn freqs(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
        pairs.iter().map(|(t, n)| (t.to_string(), *n)).collect()
    }

    #[test]
    fn test_node_radius_clamped() {
        assert_eq!(node_radius(1), 10.0);
        assert_eq!(node_radius(3), 15.0);
        assert_eq!(node_radius(100), 40.0);
    }

    #[test]
    fn test_positions_within_centered_square() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout =
            TagGraphLayout::generate(&freqs(&[("a", 1), ("b", 2), ("c", 3)]), 800.0, 600.0, &mut rng);
        for node in &layout.nodes {
            assert!((node.pos.x - 400.0).abs() <= 100.0);
            assert!((node.pos.y - 300.0).abs() <= 100.0);
        }
    }

    #[test]
    fn test_zero_height_falls_back() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = TagGraphLayout::generate(&freqs(&[("a", 1)]), 800.0, 0.0, &mut rng);
        assert_eq!(layout.size.y, FALLBACK_HEIGHT);
        assert_eq!(layout.size.x, 800.0);
    }

    #[test]
    fn test_single_tag_has_no_edges() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = TagGraphLayout::generate(&freqs(&[("solo", 4)]), 800.0, 600.0, &mut rng);
        assert_eq!(layout.nodes.len(), 1);
        assert_eq!(layout.edges().count(), 0);
    }

    #[test]
    fn test_complete_graph_edge_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = TagGraphLayout::generate(
            &freqs(&[("a", 1), ("b", 1), ("c", 1), ("d", 1)]),
            800.0,
            600.0,
            &mut rng,
        );
        // 4 nodes -> C(4,2) edges
        assert_eq!(layout.edges().count(), 6);
    }

    #[test]
    fn test_empty_frequencies_yield_no_nodes() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = TagGraphLayout::generate(&BTreeMap::new(), 800.0, 600.0, &mut rng);
        assert!(layout.nodes.is_empty());
    }
}
