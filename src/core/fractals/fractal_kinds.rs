use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FractalKinds {
    #[default]
    Mandelbrot,
    Julia,
}

impl FractalKinds {
    pub const ALL: &'static [Self] = &[Self::Mandelbrot, Self::Julia];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot set",
            Self::Julia => "Julia set",
        }
    }

    /// Whether the shader for this variant takes the Julia constant.
    #[must_use]
    pub const fn uses_julia_constant(self) -> bool {
        matches!(self, Self::Julia)
    }
}

impl fmt::Display for FractalKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
