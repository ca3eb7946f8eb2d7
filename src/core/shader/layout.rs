//! Reflection of a stage's uniform block into a name → location cache.
//!
//! Each program declares at most one uniform block, at `@group(0) @binding(0)`.
//! It is either a struct, whose named members become individually settable
//! uniforms, or a single scalar/vector/array variable addressed by the
//! variable's own name.

use std::collections::HashMap;

use naga::{AddressSpace, ArraySize, ResourceBinding, ScalarKind, TypeInner};

/// Uniform buffers are bound in 16 byte granules.
pub const UNIFORM_BUFFER_ALIGNMENT: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    F32,
    F64,
    I32,
    U32,
}

impl ScalarType {
    #[must_use]
    pub const fn width(self) -> u32 {
        match self {
            Self::F64 => 8,
            Self::F32 | Self::I32 | Self::U32 => 4,
        }
    }

    fn from_naga(scalar: naga::Scalar) -> Option<Self> {
        match (scalar.kind, scalar.width) {
            (ScalarKind::Float, 4) => Some(Self::F32),
            (ScalarKind::Float, 8) => Some(Self::F64),
            (ScalarKind::Sint, 4) => Some(Self::I32),
            (ScalarKind::Uint, 4) => Some(Self::U32),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayShape {
    pub len: u32,
    pub stride: u32,
}

/// Shape of one settable uniform: a scalar or vector, or a fixed-size array
/// of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformType {
    pub scalar: ScalarType,
    pub components: u8,
    pub array: Option<ArrayShape>,
}

impl UniformType {
    #[must_use]
    pub const fn scalar(scalar: ScalarType) -> Self {
        Self {
            scalar,
            components: 1,
            array: None,
        }
    }

    #[must_use]
    pub const fn vector(scalar: ScalarType, components: u8) -> Self {
        Self {
            scalar,
            components,
            array: None,
        }
    }

    #[must_use]
    pub const fn array(scalar: ScalarType, components: u8, shape: ArrayShape) -> Self {
        Self {
            scalar,
            components,
            array: Some(shape),
        }
    }

    /// Bytes covered by this uniform inside the block.
    #[must_use]
    pub const fn byte_len(&self) -> u32 {
        let element = self.scalar.width() * self.components as u32;
        match self.array {
            Some(shape) => shape.stride * shape.len,
            None => element,
        }
    }

    fn reflect(module: &naga::Module, ty: naga::Handle<naga::Type>) -> Option<Self> {
        match &module.types[ty].inner {
            TypeInner::Scalar(scalar) => Some(Self::scalar(ScalarType::from_naga(*scalar)?)),
            TypeInner::Vector { size, scalar } => Some(Self::vector(
                ScalarType::from_naga(*scalar)?,
                *size as u8,
            )),
            TypeInner::Array {
                base,
                size: ArraySize::Constant(len),
                stride,
            } => {
                let element = Self::reflect(module, *base)?;
                if element.array.is_some() {
                    return None;
                }
                Some(Self::array(
                    element.scalar,
                    element.components,
                    ArrayShape {
                        len: len.get(),
                        stride: *stride,
                    },
                ))
            }
            _ => None,
        }
    }
}

/// Where a named uniform lives inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLocation {
    pub offset: u32,
    pub ty: UniformType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniformLayout {
    size: u32,
    locations: HashMap<String, UniformLocation>,
}

impl UniformLayout {
    /// Builds a layout by hand. `size` is the unpadded block size.
    #[must_use]
    pub fn new(size: u32, locations: impl IntoIterator<Item = (String, UniformLocation)>) -> Self {
        Self {
            size,
            locations: locations.into_iter().collect(),
        }
    }

    /// Finds the stage's uniform block, if it declares one.
    ///
    /// Members of types that cannot be set from the host (matrices, nested
    /// structs, runtime-sized arrays) are left out of the layout, so writes to
    /// them are dropped like writes to unknown names.
    pub fn reflect(module: &naga::Module) -> Result<Option<Self>, String> {
        let mut uniform_globals = module
            .global_variables
            .iter()
            .filter(|(_, global)| global.space == AddressSpace::Uniform);

        let Some((_, global)) = uniform_globals.next() else {
            return Ok(None);
        };

        if uniform_globals.next().is_some() {
            return Err("only one uniform block per stage is supported".to_owned());
        }

        let global_name = global.name.clone().unwrap_or_default();

        if global.binding != Some(ResourceBinding { group: 0, binding: 0 }) {
            return Err(format!(
                "uniform `{global_name}` must be declared at @group(0) @binding(0)"
            ));
        }

        if let TypeInner::Struct { members, span } = &module.types[global.ty].inner {
            let locations = members.iter().filter_map(|member| {
                let name = member.name.clone()?;
                let ty = UniformType::reflect(module, member.ty)?;
                Some((
                    name,
                    UniformLocation {
                        offset: member.offset,
                        ty,
                    },
                ))
            });

            return Ok(Some(Self::new(*span, locations)));
        }

        let ty = UniformType::reflect(module, global.ty)
            .ok_or_else(|| format!("uniform `{global_name}` has an unsupported type"))?;

        Ok(Some(Self::new(
            ty.byte_len(),
            [(global_name, UniformLocation { offset: 0, ty })],
        )))
    }

    #[must_use]
    pub fn location(&self, name: &str) -> Option<UniformLocation> {
        self.locations.get(name).copied()
    }

    #[cfg(test)]
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Size of the GPU buffer backing this block.
    #[must_use]
    pub fn buffer_size(&self) -> u32 {
        self.size
            .max(1)
            .div_ceil(UNIFORM_BUFFER_ALIGNMENT)
            * UNIFORM_BUFFER_ALIGNMENT
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }
}
