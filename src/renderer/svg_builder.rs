//! SVG builder: accumulates SVG elements and produces the final string.

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

pub(super) struct SvgBuilder {
    pub(super) elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgBuilder {
    pub(super) fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub(super) fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            x1, y1, x2, y2, color, width
        ));
    }

    pub(super) fn dashed_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, dash: &str) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-dasharray="{}"/>"#,
            x1, y1, x2, y2, color, dash
        ));
    }

    pub(super) fn rounded_rect(&mut self, w: f64, h: f64, radius: f64, stroke: &str, stroke_width: f64) {
        self.elements.push(format!(
            r#"<rect width="{:.1}" height="{:.1}" rx="{:.1}" fill="transparent" stroke="{}" stroke-width="{:.1}"/>"#,
            w, h, radius, stroke, stroke_width
        ));
    }

    pub(super) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.elements.push(format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
            cx, cy, r, fill
        ));
    }

    pub(super) fn ring(&mut self, cx: f64, cy: f64, r: f64, stroke: &str, stroke_width: f64) {
        self.elements.push(format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="transparent" stroke="{}" stroke-width="{:.1}"/>"#,
            cx, cy, r, stroke, stroke_width
        ));
    }

    pub(super) fn polyline(&mut self, points: &[(f64, f64)], stroke: &str, stroke_width: f64) {
        let points = points
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect::<Vec<_>>()
            .join(" ");
        self.elements.push(format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{:.1}" stroke-linejoin="round"/>"#,
            points, stroke, stroke_width
        ));
    }

    pub(super) fn text(&mut self, x: f64, y: f64, content: &str, size: f64, family: &str, fill: &str) {
        let escaped = content
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" font-family="{}" font-weight="bold" fill="{}">{}</text>"#,
            x, y, size, family, fill, escaped
        ));
    }
}
