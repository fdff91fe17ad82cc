//! Interactive desktop editor built on the keiro core.
//!
//! The heavy lifting (graph mutation, gestures, hit-testing, scene
//! building) lives in the library; this binary only routes egui pointer
//! input into the `FlowEditor` and paints the resulting `Scene`.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Vec2};
use keiro::prelude::*;

const SNAPSHOT_PATH: &str = "flow-export.json";
const STRUCTURE_PATH: &str = "flow-structure.json";

/// Stand-in bot registry; a real deployment feeds this from its backend.
const SAMPLE_BOTS: [(&str, &str, &str); 5] = [
    ("data-analyst", "Data Analyst Bot", "Processes data input"),
    ("content-writer", "Content Writer Bot", "Generates content"),
    ("api-integration", "API Integration Bot", "Handles API calls"),
    ("seo-optimizer", "SEO Optimizer Bot", "Optimizes for search"),
    ("image-generator", "Image Generator Bot", "Creates images"),
];

fn main() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "keiro flow editor",
        options,
        Box::new(|_cc| Ok(Box::new(EditorApp::new()))),
    )
}

struct EditorApp {
    editor: FlowEditor,
    flow_name: String,
    /// Insertion counter driving deterministic palette assignment.
    next_palette: usize,
    status: String,
}

impl EditorApp {
    fn new() -> Self {
        Self {
            editor: FlowEditor::new(Size::new(1200.0, 700.0)),
            flow_name: "Untitled Flow".to_string(),
            next_palette: 0,
            status: String::new(),
        }
    }

    fn sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Flow Builder");
        ui.small("Shift-drag between nodes to connect them.");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Name:");
            ui.text_edit_singleline(&mut self.flow_name);
        });

        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                self.status = match self.editor.export_visual().save(SNAPSHOT_PATH) {
                    Ok(()) => format!("Saved to {SNAPSHOT_PATH}"),
                    Err(e) => format!("Save failed: {e}"),
                };
            }
            if ui.button("Load").clicked() {
                self.status = match VisualSnapshot::from_file(SNAPSHOT_PATH)
                    .and_then(|snapshot| self.editor.import_visual(snapshot))
                {
                    Ok(()) => format!("Loaded {SNAPSHOT_PATH}"),
                    Err(e) => format!("Load failed: {e}"),
                };
            }
            if ui.button("Export structure").clicked() {
                let payload = self.editor.structure_payload("local", &self.flow_name);
                let json = serde_json::to_string_pretty(&payload)
                    .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"));
                self.status = match std::fs::write(STRUCTURE_PATH, json) {
                    Ok(()) => format!("Structure written to {STRUCTURE_PATH}"),
                    Err(e) => format!("Export failed: {e}"),
                };
            }
        });
        ui.separator();

        ui.heading("Available Bots");
        for (bot_id, name, description) in SAMPLE_BOTS {
            if ui.button(name).clicked() {
                self.editor
                    .add_node(bot_id, name, description, self.next_palette);
                self.next_palette += 1;
            }
        }
        ui.separator();

        match self.editor.selection().cloned() {
            Some(Selection::Node(node_id)) => {
                let label = self
                    .editor
                    .graph()
                    .node(&node_id)
                    .map(|n| n.label.clone())
                    .unwrap_or_default();
                ui.heading(format!("Node: {label}"));
                ui.horizontal(|ui| {
                    if ui.button("Remove").clicked() {
                        self.editor.remove_node(&node_id);
                    }
                    if ui.button("Duplicate").clicked() {
                        let _ = self.editor.duplicate_node(&node_id);
                    }
                });
                ui.separator();
            }
            Some(Selection::Edge(edge_id)) => {
                ui.heading("Link selected");
                if ui.button("Remove link").clicked() {
                    self.editor.remove_edge(&edge_id);
                }
                ui.separator();
            }
            None => {}
        }

        ui.heading("Flow Statistics");
        ui.label(format!("Nodes: {}", self.editor.graph().node_count()));
        ui.label(format!("Connections: {}", self.editor.graph().edge_count()));
        if ui.button("Clear flow").clicked() {
            self.editor.clear();
            self.next_palette = 0;
        }

        if !self.status.is_empty() {
            ui.separator();
            ui.small(self.status.as_str());
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, Sense::click_and_drag());
        let canvas_rect = response.rect;
        self.editor
            .resize_canvas(Size::new(canvas_rect.width(), canvas_rect.height()));

        let origin = canvas_rect.min;
        let to_local = |p: Pos2| Point::new(p.x - origin.x, p.y - origin.y);
        let to_screen = |p: Point| Pos2::new(p.x + origin.x, p.y + origin.y);

        let shift = ui.input(|i| i.modifiers.shift);
        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.editor.on_escape();
        }
        if response.drag_started() {
            if let Some(p) = response.interact_pointer_pos() {
                self.editor.on_pointer_down(to_local(p), shift);
            }
        } else if response.dragged() {
            if let Some(p) = response.interact_pointer_pos() {
                self.editor.on_pointer_move(to_local(p));
            }
        }
        if response.drag_stopped() {
            if let Some(p) = response.interact_pointer_pos() {
                self.editor.on_pointer_up(to_local(p));
            }
        }
        if response.clicked() {
            if let Some(p) = response.interact_pointer_pos() {
                self.editor.on_pointer_down(to_local(p), shift);
                self.editor.on_pointer_up(to_local(p));
            }
        } else if let Some(p) = response.hover_pos() {
            self.editor.on_pointer_move(to_local(p));
        }

        // Immediate mode repaints every frame, which satisfies the
        // redraw-on-mutation contract; just drain the flag.
        self.editor.take_redraw();
        let scene = Scene::build(&self.editor);

        painter.rect_filled(canvas_rect, 0.0, Color32::from_gray(248));
        draw_grid(&painter, canvas_rect, scene.grid_spacing);

        for edge in &scene.edges {
            draw_edge(&painter, origin, edge);
        }

        if let Some(pending) = &scene.pending {
            let points = [to_screen(pending.from), to_screen(pending.to)];
            let stroke = Stroke::new(2.0, Color32::from_rgb(0x3b, 0x82, 0xf6));
            painter.extend(Shape::dashed_line(&points, stroke, 5.0, 5.0));
        }

        for node in &scene.nodes {
            draw_node(&painter, origin, node);
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.sidebar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));
    }
}

fn color32(color: &Color) -> Color32 {
    color
        .rgb()
        .map(|(r, g, b)| Color32::from_rgb(r, g, b))
        .unwrap_or(Color32::GRAY)
}

fn draw_grid(painter: &egui::Painter, rect: egui::Rect, spacing: f32) {
    let stroke = Stroke::new(1.0, Color32::from_gray(229));
    let mut x = rect.min.x;
    while x < rect.max.x {
        painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
        x += spacing;
    }
    let mut y = rect.min.y;
    while y < rect.max.y {
        painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
        y += spacing;
    }
}

fn draw_edge(painter: &egui::Painter, origin: Pos2, edge: &EdgePath) {
    let to_screen =
        |p: Point| Pos2::new(p.x + origin.x, p.y + origin.y);
    let points = sample_bezier(
        to_screen(edge.from),
        to_screen(edge.control_from),
        to_screen(edge.control_to),
        to_screen(edge.to),
        32,
    );
    let width = if edge.selected { 3.5 } else { 2.0 };
    let stroke = Stroke::new(width, color32(&edge.color));
    if edge.dashed {
        painter.extend(Shape::dashed_line(&points, stroke, 8.0, 6.0));
    } else {
        painter.add(Shape::line(points.clone(), stroke));
    }
    draw_arrow_head(painter, &points, stroke.color);
}

/// Filled triangle at the end of the polyline, oriented along its last
/// segment.
fn draw_arrow_head(painter: &egui::Painter, points: &[Pos2], color: Color32) {
    if points.len() < 2 {
        return;
    }
    let tip = points[points.len() - 1];
    let prev = points[points.len() - 2];
    let dir = (tip - prev).normalized();
    let normal = Vec2::new(-dir.y, dir.x);
    let base = tip - dir * 10.0;
    painter.add(Shape::convex_polygon(
        vec![tip, base + normal * 6.0, base - normal * 6.0],
        color,
        Stroke::NONE,
    ));
}

fn draw_node(painter: &egui::Painter, origin: Pos2, node: &NodeSprite) {
    let min = Pos2::new(node.rect.origin.x + origin.x, node.rect.origin.y + origin.y);
    let rect = egui::Rect::from_min_size(
        min,
        Vec2::new(node.rect.size.width, node.rect.size.height),
    );
    painter.rect_filled(rect, 8.0, color32(&node.fill));
    painter.rect_stroke(rect, 8.0, Stroke::new(node.border_width, color32(&node.border)));

    painter.text(
        rect.center() - Vec2::new(0.0, 10.0),
        Align2::CENTER_CENTER,
        &node.title,
        FontId::proportional(14.0),
        Color32::WHITE,
    );
    if !node.subtitle.is_empty() {
        painter.text(
            rect.center() + Vec2::new(0.0, 8.0),
            Align2::CENTER_CENTER,
            &node.subtitle,
            FontId::proportional(11.0),
            Color32::from_gray(229),
        );
    }

    for anchor in node.anchors {
        painter.circle(
            Pos2::new(anchor.x + origin.x, anchor.y + origin.y),
            4.0,
            Color32::WHITE,
            Stroke::new(1.5, Color32::from_gray(55)),
        );
    }
}

/// Flattens a cubic bezier into a polyline, like the browser's
/// `bezierCurveTo` but painter-friendly.
fn sample_bezier(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, segments: usize) -> Vec<Pos2> {
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            Pos2::new(
                a * p0.x + b * p1.x + c * p2.x + d * p3.x,
                a * p0.y + b * p1.y + c * p2.y + d * p3.y,
            )
        })
        .collect()
}
