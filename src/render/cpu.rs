use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{Point, Rgba8},
    foundation::error::{BookstrokeError, BookstrokeResult},
    render::plan::{DrawOp, RenderPlan, TextAlign},
    render::text::LabelTypesetter,
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Rendered page pixels, row-major RGBA8.
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixels with alpha divided back out, as image files expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    pub fn save_png(&self, path: &Path) -> BookstrokeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Default)]
/// Executes [`RenderPlan`]s with `vello_cpu`.
pub struct CpuRenderer {
    frames: u64,
    labels: LabelTypesetter,
}

impl CpuRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer whose labels use the given TrueType/OpenType font instead of system fonts.
    pub fn with_font(font_bytes: Vec<u8>) -> BookstrokeResult<Self> {
        let mut renderer = Self::new();
        let family = renderer.labels.register_font(font_bytes)?;
        tracing::debug!(%family, "registered label font");
        Ok(renderer)
    }

    /// Family of the registered label font, if any.
    pub fn font_family(&self) -> Option<&str> {
        self.labels.family()
    }

    /// Plans rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    #[tracing::instrument(skip_all, fields(width = plan.canvas.width, height = plan.canvas.height, ops = plan.ops.len()))]
    pub fn render(&mut self, plan: &RenderPlan) -> BookstrokeResult<FrameRGBA> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| BookstrokeError::render("canvas width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| BookstrokeError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(BookstrokeError::render("canvas must be non-empty"));
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let bg = plan.background;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
        for op in &plan.ops {
            match op {
                DrawOp::FillPath { path, color } => {
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        color.r, color.g, color.b, color.a,
                    ));
                    ctx.fill_path(&bezpath_to_cpu(path));
                }
                DrawOp::Text {
                    text,
                    anchor,
                    size_px,
                    align,
                    color,
                } => {
                    draw_label(
                        &mut ctx,
                        &mut self.labels,
                        text,
                        *anchor,
                        *size_px,
                        *align,
                        *color,
                    );
                }
            }
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        self.frames += 1;
        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_label(
    ctx: &mut vello_cpu::RenderContext,
    labels: &mut LabelTypesetter,
    text: &str,
    anchor: Point,
    size_px: f32,
    align: TextAlign,
    color: Rgba8,
) {
    let layout = labels.layout(text, size_px, color);
    let (w, h) = (f64::from(layout.width()), f64::from(layout.height()));
    let origin = match align {
        TextAlign::RightMiddle => Point::new(anchor.x - w, anchor.y - h / 2.0),
        TextAlign::CenterTop => Point::new(anchor.x - w / 2.0, anchor.y),
    };

    ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    let mut runs = 0usize;
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let font = run.run().font();
            let cpu_font = labels.cpu_font(font.data.id(), font.data.data(), font.index);
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&cpu_font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
            runs += 1;
        }
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    if runs == 0 && !text.is_empty() {
        tracing::trace!(text, "label shaped to no glyphs, no usable font");
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &crate::foundation::core::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
