//! Splitting a combined shader resource into per-stage sources.

use crate::core::shader::stage::ShaderStageKind;

/// Lines containing this token switch the active stage.
pub const STAGE_MARKER: &str = "#shader";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    vertex: String,
    fragment: String,
}

impl ShaderSources {
    /// Splits `source` on stage marker lines.
    ///
    /// Marker lines are dropped, as is everything before the first marker and
    /// any marker naming neither stage. Every other line keeps its own
    /// terminator; a final line without one gets `\n`.
    #[must_use]
    pub fn split(source: &str) -> Self {
        let mut sources = Self::default();
        let mut active = None;

        for line in source.split_inclusive('\n') {
            if line.contains(STAGE_MARKER) {
                if let Some(kind) = ShaderStageKind::from_marker_line(line) {
                    active = Some(kind);
                }
                continue;
            }

            if let Some(kind) = active {
                let buffer = sources.stage_mut(kind);
                buffer.push_str(line);
                if !line.ends_with('\n') {
                    buffer.push('\n');
                }
            }
        }

        sources
    }

    #[must_use]
    pub fn stage(&self, kind: ShaderStageKind) -> &str {
        match kind {
            ShaderStageKind::Vertex => &self.vertex,
            ShaderStageKind::Fragment => &self.fragment,
        }
    }

    #[must_use]
    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    fn stage_mut(&mut self, kind: ShaderStageKind) -> &mut String {
        match kind {
            ShaderStageKind::Vertex => &mut self.vertex,
            ShaderStageKind::Fragment => &mut self.fragment,
        }
    }
}
