/// Global fill mode. Selects whether solid parts are rasterized as triangles
/// or as their edge lines. Outline passes are always wireframe.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    #[default]
    Filled,
    Wireframe,
}

impl RenderMode {
    pub const ALL: &'static [RenderMode] = &[RenderMode::Filled, RenderMode::Wireframe];

    pub fn label(self) -> &'static str {
        match self {
            Self::Filled => "Filled",
            Self::Wireframe => "Wireframe",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Filled => Self::Wireframe,
            Self::Wireframe => Self::Filled,
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
