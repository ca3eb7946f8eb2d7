//! Host-side staging for a program's uniform block.

use bytemuck::Pod;
use glam::{DVec2, DVec3, DVec4, Vec2, Vec3, Vec4};

use crate::core::shader::layout::{ScalarType, UniformLayout, UniformLocation};

/// A value handed to one of the typed uniform setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue<'a> {
    Float(f32),
    Float2(Vec2),
    Float3(Vec3),
    Float4(Vec4),
    Double(f64),
    Double2(DVec2),
    Double3(DVec3),
    Double4(DVec4),
    Int(i32),
    FloatArray(&'a [f32]),
    DoubleArray(&'a [f64]),
    IntArray(&'a [i32]),
}

enum Scalars<'a> {
    Inline { values: [f64; 4], len: usize, float: bool },
    Float32(&'a [f32]),
    Float64(&'a [f64]),
    Int32(&'a [i32]),
}

impl Scalars<'_> {
    fn inline(components: &[f64], float: bool) -> Self {
        let mut values = [0.0; 4];
        values[..components.len()].copy_from_slice(components);
        Self::Inline {
            values,
            len: components.len(),
            float,
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Inline { len, .. } => *len,
            Self::Float32(values) => values.len(),
            Self::Float64(values) => values.len(),
            Self::Int32(values) => values.len(),
        }
    }

    fn is_float(&self) -> bool {
        match self {
            Self::Inline { float, .. } => *float,
            Self::Float32(_) | Self::Float64(_) => true,
            Self::Int32(_) => false,
        }
    }

    fn as_f32(&self, index: usize) -> f32 {
        match self {
            Self::Inline { values, .. } => values[index] as f32,
            Self::Float32(values) => values[index],
            Self::Float64(values) => values[index] as f32,
            Self::Int32(values) => values[index] as f32,
        }
    }

    fn as_f64(&self, index: usize) -> f64 {
        match self {
            Self::Inline { values, .. } => values[index],
            Self::Float32(values) => f64::from(values[index]),
            Self::Float64(values) => values[index],
            Self::Int32(values) => f64::from(values[index]),
        }
    }

    fn as_i32(&self, index: usize) -> i32 {
        match self {
            Self::Inline { values, .. } => values[index] as i32,
            Self::Int32(values) => values[index],
            Self::Float32(values) => values[index] as i32,
            Self::Float64(values) => values[index] as i32,
        }
    }
}

impl UniformValue<'_> {
    fn scalars(&self) -> (Scalars<'_>, bool) {
        match *self {
            Self::Float(value) => (Scalars::inline(&[f64::from(value)], true), false),
            Self::Float2(value) => (Scalars::inline(&value.as_dvec2().to_array(), true), false),
            Self::Float3(value) => (Scalars::inline(&value.as_dvec3().to_array(), true), false),
            Self::Float4(value) => (Scalars::inline(&value.as_dvec4().to_array(), true), false),
            Self::Double(value) => (Scalars::inline(&[value], true), false),
            Self::Double2(value) => (Scalars::inline(&value.to_array(), true), false),
            Self::Double3(value) => (Scalars::inline(&value.to_array(), true), false),
            Self::Double4(value) => (Scalars::inline(&value.to_array(), true), false),
            Self::Int(value) => (Scalars::inline(&[f64::from(value)], false), false),
            Self::FloatArray(values) => (Scalars::Float32(values), true),
            Self::DoubleArray(values) => (Scalars::Float64(values), true),
            Self::IntArray(values) => (Scalars::Int32(values), true),
        }
    }
}

/// The bytes uploaded for a program's uniform block, plus the layout used to
/// address them by name.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBlock {
    layout: UniformLayout,
    bytes: Vec<u8>,
}

impl UniformBlock {
    #[must_use]
    pub fn new(layout: UniformLayout) -> Self {
        let bytes = vec![0; layout.buffer_size() as usize];
        Self { layout, bytes }
    }

    #[must_use]
    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes `value` into the uniform called `name`.
    ///
    /// Returns `false` and leaves the block untouched when the name is unknown
    /// or the value's shape does not fit the uniform: component counts must
    /// match, floats only go to float uniforms and ints to `i32` uniforms.
    /// Doubles written to `f32` uniforms are narrowed. Arrays fill elements in
    /// order and stop at the uniform's length.
    pub fn write(&mut self, name: &str, value: UniformValue<'_>) -> bool {
        let Some(location) = self.layout.location(name) else {
            log::trace!("dropping write to unknown uniform `{name}`");
            return false;
        };

        let (scalars, is_array) = value.scalars();

        if !Self::accepts(location, &scalars, is_array) {
            log::trace!("dropping write to uniform `{name}`: {value:?} does not match {:?}", location.ty);
            return false;
        }

        let components = usize::from(location.ty.components);
        let element_width = location.ty.scalar.width() as usize;

        match location.ty.array {
            None => {
                for component in 0..components {
                    let offset = location.offset as usize + component * element_width;
                    self.put_scalar(offset, location.ty.scalar, &scalars, component);
                }
            }
            Some(shape) => {
                let capacity = shape.len as usize * components;
                for index in 0..scalars.len().min(capacity) {
                    let element = index / components;
                    let component = index % components;
                    let offset = location.offset as usize
                        + element * shape.stride as usize
                        + component * element_width;
                    self.put_scalar(offset, location.ty.scalar, &scalars, index);
                }
            }
        }

        true
    }

    fn accepts(location: UniformLocation, scalars: &Scalars<'_>, is_array: bool) -> bool {
        let kind_matches = match location.ty.scalar {
            ScalarType::F32 | ScalarType::F64 => scalars.is_float(),
            ScalarType::I32 => !scalars.is_float(),
            ScalarType::U32 => false,
        };

        let shape_matches = match (location.ty.array, is_array) {
            (None, false) => scalars.len() == usize::from(location.ty.components),
            (Some(_), true) => true,
            _ => false,
        };

        kind_matches && shape_matches
    }

    fn put_scalar(&mut self, offset: usize, scalar: ScalarType, scalars: &Scalars<'_>, index: usize) {
        match scalar {
            ScalarType::F32 => self.put(offset, scalars.as_f32(index)),
            ScalarType::F64 => self.put(offset, scalars.as_f64(index)),
            ScalarType::I32 => self.put(offset, scalars.as_i32(index)),
            ScalarType::U32 => {}
        }
    }

    fn put<T: Pod>(&mut self, offset: usize, value: T) {
        let bytes = bytemuck::bytes_of(&value);
        if let Some(target) = self.bytes.get_mut(offset..offset + bytes.len()) {
            target.copy_from_slice(bytes);
        }
    }
}
