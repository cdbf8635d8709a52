//! Default shader-binding-slot table.
//!
//! Scripts address shader inputs by a fixed slot index (vertex position,
//! texcoords, MVP matrix, diffuse map ...). The table maps each slot to the
//! binding location the built-in sprite pipeline uses, or `-1` when the
//! pipeline has no such input. The host copies it into an owned array that
//! scripts may edit.

/// Number of entries in the table.
pub const MAX_SHADER_LOCATIONS: usize = 32;

/// Slot indices with a meaning in the built-in pipelines.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(usize)]
pub enum ShaderLocation {
    VertexPosition = 0,
    VertexTexcoord01 = 1,
    VertexTexcoord02 = 2,
    VertexNormal = 3,
    VertexTangent = 4,
    VertexColor = 5,
    MatrixMvp = 6,
    ColorDiffuse = 12,
    MapDiffuse = 15,
}

/// Returns the table for the built-in sprite pipeline.
///
/// Vertex inputs follow `sprite.wgsl` (`@location(n)`); uniforms and maps
/// use the bind group binding index.
pub fn default_shader_locations() -> [i32; MAX_SHADER_LOCATIONS] {
    let mut locs = [-1; MAX_SHADER_LOCATIONS];
    locs[ShaderLocation::VertexPosition as usize] = 0;
    locs[ShaderLocation::VertexTexcoord01 as usize] = 3;
    locs[ShaderLocation::VertexColor as usize] = 5;
    locs[ShaderLocation::MatrixMvp as usize] = 0;
    locs[ShaderLocation::ColorDiffuse as usize] = 5;
    locs[ShaderLocation::MapDiffuse as usize] = 0;
    locs
}
