//! The tag constellation: journal tags as a complete graph, node size
//! following tag frequency.

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Sense, Stroke, Vec2};

use shared::journal::compute_tag_frequencies;

use crate::tag_graph::{node_radius, TagGraphLayout, FALLBACK_HEIGHT};
use crate::types::AppState;

const LABEL_COLOR: Color32 = Color32::from_rgb(0xE0, 0xE0, 0xE0);

fn edge_color() -> Color32 {
    Color32::from_rgba_unmultiplied(48, 195, 195, 51)
}

fn node_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(55, 23, 110, 204)
}

fn node_stroke() -> Color32 {
    Color32::from_rgba_unmultiplied(176, 38, 255, 128)
}

pub fn draw(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Construct Constellation");
    ui.add_space(4.0);

    let avail = ui.available_size();
    let width = avail.x.max(1.0);
    let height = if avail.y <= 0.0 { FALLBACK_HEIGHT } else { avail.y };
    let size = Vec2::new(width, height);

    // Positions are random; only re-scatter when the journal changed or
    // the surface was resized, otherwise the graph would jitter every
    // frame.
    let stale = match &state.constellation_cache {
        Some((revision, cached_size, _)) => {
            *revision != state.journal_revision
                || (cached_size.x - size.x).abs() >= 1.0
                || (cached_size.y - size.y).abs() >= 1.0
        }
        None => true,
    };
    if stale {
        let freqs = compute_tag_frequencies(&state.journal_entries);
        let layout =
            TagGraphLayout::generate(&freqs, size.x, size.y, &mut rand::thread_rng());
        state.constellation_cache = Some((state.journal_revision, size, layout));
    }

    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let Some((_, _, layout)) = &state.constellation_cache else { return };

    if layout.nodes.is_empty() {
        painter.text(
            origin + size / 2.0,
            Align2::CENTER_CENTER,
            "Add tags to journal entries to map the shadow.",
            FontId::proportional(14.0),
            Color32::from_gray(0x88),
        );
        return;
    }

    // Edges first so nodes paint over them.
    for (a, b) in layout.edges() {
        painter.line_segment(
            [origin + a.pos.to_vec2(), origin + b.pos.to_vec2()],
            Stroke::new(1.0, edge_color()),
        );
    }

    for node in &layout.nodes {
        let center: Pos2 = origin + node.pos.to_vec2();
        let radius = node_radius(node.weight);
        painter.circle(center, radius, node_fill(), Stroke::new(2.0, node_stroke()));
        painter.text(
            Pos2::new(center.x, center.y + radius + 15.0),
            Align2::CENTER_CENTER,
            &node.tag,
            FontId::proportional(12.0),
            LABEL_COLOR,
        );
    }
}
