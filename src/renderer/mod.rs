//! 2D canvas rendering
//!
//! Clears and redraws the whole scene every frame: a static vertical
//! gradient wash, then every live stone in list order. Paint order only
//! affects visual overlap; hit-testing prefers the newest stone on its own.
//!
//! The drawing half needs a browser canvas and is wasm-only; the geometry
//! helpers are platform-free.

#[cfg(target_arch = "wasm32")]
use crate::sim::Stone;

/// Corner radius for a stone body: 12% of the edge with a 4 px floor. The
/// level's shape variance perturbs it per stone, keyed off the stone's size
/// so the silhouette is stable frame to frame.
pub fn corner_radius(size: f32, variance: f32) -> f32 {
    let base = (size * 0.12).max(4.0);
    let wobble = (size * 0.37).fract() - 0.5;
    base * (1.0 + variance * wobble)
}

/// Border stroke width for a stone
pub fn border_width(size: f32) -> f32 {
    (size * 0.03).max(1.0)
}

/// Crack stroke width for a stone
pub fn crack_width(size: f32) -> f32 {
    (size * 0.02).max(1.0)
}

/// Canvas-2D scene painter (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct CanvasRenderer {
    ctx: web_sys::CanvasRenderingContext2d,
}

#[cfg(target_arch = "wasm32")]
impl CanvasRenderer {
    pub fn new(canvas: &web_sys::HtmlCanvasElement) -> Result<Self, wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("2d context unavailable"))?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Redraw the whole scene for the current frame
    pub fn render(&self, session: &crate::sim::Session) {
        let w = session.width as f64;
        let h = session.height as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);

        // Static wash: light at the top, fading dark toward the floor
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        let _ = gradient.add_color_stop(0.0, "rgba(255,255,255,0.03)");
        let _ = gradient.add_color_stop(1.0, "rgba(0,0,0,0.15)");
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        let style = crate::sim::style_for_level(session.level);
        for stone in &session.stones {
            self.draw_stone(stone, &style);
        }
    }

    fn draw_stone(&self, stone: &Stone, style: &crate::sim::LevelStyle) {
        let ctx = &self.ctx;
        let size = stone.size as f64;

        ctx.save();
        let _ = ctx.translate(stone.pos.x as f64, stone.pos.y as f64);
        let _ = ctx.rotate(stone.rotation as f64);

        // Body
        ctx.set_fill_style_str(stone.color);
        let radius = corner_radius(stone.size, style.shape_variance) as f64;
        self.round_rect(-size / 2.0, -size / 2.0, size, size, radius);
        ctx.fill();

        // Faint border
        ctx.set_line_width(border_width(stone.size) as f64);
        ctx.set_stroke_style_str(&format!("rgba(255,255,255,{})", style.border_alpha));
        ctx.stroke();

        // Two crack segments
        ctx.begin_path();
        ctx.set_line_width(crack_width(stone.size) as f64);
        ctx.set_stroke_style_str("rgba(255,255,255,0.05)");
        ctx.move_to(-size * 0.2, -size * 0.15);
        ctx.line_to(size * 0.1, size * 0.25);
        ctx.move_to(-size * 0.25, size * 0.2);
        ctx.line_to(size * 0.25, -size * 0.2);
        ctx.stroke();

        // Highlight glint on sparkle levels
        if style.sparkle {
            ctx.begin_path();
            ctx.set_fill_style_str("rgba(255,255,255,0.5)");
            let _ = ctx.arc(
                -size * 0.18,
                -size * 0.22,
                size * 0.05,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
        }

        ctx.restore();
    }

    /// Transient burst at a destroyed stone: one translucent filled circle,
    /// painted over the current frame only
    pub fn draw_burst(&self, hit: &crate::sim::PointerHit) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.begin_path();
        ctx.set_fill_style_str(hit.color);
        ctx.set_global_alpha(0.18);
        let _ = ctx.arc(
            hit.x as f64,
            hit.y as f64,
            hit.size as f64 * 0.8,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
        ctx.restore();
    }

    /// Rounded-rectangle path (the canvas API has no primitive for this)
    fn round_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = ctx.arc_to(x, y + h, x, y, r);
        let _ = ctx.arc_to(x, y, x + w, y, r);
        ctx.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_radius_has_a_floor() {
        // 12% of a tiny stone would be under 4 px
        assert_eq!(corner_radius(10.0, 0.0), 4.0);
        assert_eq!(corner_radius(100.0, 0.0), 12.0);
    }

    #[test]
    fn shape_variance_bounds_the_wobble() {
        let base = corner_radius(80.0, 0.0);
        let varied = corner_radius(80.0, 0.7);
        assert!(varied >= base * (1.0 - 0.35));
        assert!(varied <= base * (1.0 + 0.35));
    }

    #[test]
    fn stroke_widths_never_vanish() {
        assert_eq!(border_width(10.0), 1.0);
        assert!((border_width(200.0) - 6.0).abs() < 1e-6);
        assert_eq!(crack_width(10.0), 1.0);
        assert!((crack_width(200.0) - 4.0).abs() < 1e-6);
    }
}
