use std::{borrow::Cow, collections::HashMap};

use crate::{
    foundation::core::Rgba8,
    foundation::error::{BookstrokeError, BookstrokeResult},
};

/// Font stack used when no font file was registered.
const SYSTEM_STACK: &str = "sans-serif";

/// Shapes single-line labels with Parley.
///
/// A registered font takes precedence; otherwise the system sans-serif family is used. With
/// neither available a label shapes to no glyph runs and draws nothing.
pub(crate) struct LabelTypesetter {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family: Option<String>,
    cpu_fonts: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl Default for LabelTypesetter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LabelTypesetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelTypesetter")
            .field("family", &self.family)
            .field("cached_fonts", &self.cpu_fonts.len())
            .finish_non_exhaustive()
    }
}

impl LabelTypesetter {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family: None,
            cpu_fonts: HashMap::new(),
        }
    }

    /// Register font file bytes and use their first family for every label.
    pub(crate) fn register_font(&mut self, font_bytes: Vec<u8>) -> BookstrokeResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| BookstrokeError::config("no font families found in font data"))?;

        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BookstrokeError::config("registered font family has no name"))?
            .to_string();
        self.family = Some(name.clone());
        Ok(name)
    }

    pub(crate) fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    pub(crate) fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        color: Rgba8,
    ) -> parley::Layout<Rgba8> {
        let stack = self.family.clone().unwrap_or_else(|| SYSTEM_STACK.to_string());

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// `vello_cpu` handle for a shaped run's font, built once per font blob and face index.
    pub(crate) fn cpu_font(
        &mut self,
        blob_id: u64,
        bytes: &[u8],
        index: u32,
    ) -> vello_cpu::peniko::FontData {
        self.cpu_fonts
            .entry((blob_id, index))
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    index,
                )
            })
            .clone()
    }
}
