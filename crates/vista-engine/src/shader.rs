//! WGSL front-end.
//!
//! Shaders are checked with naga before they reach wgpu, which would
//! otherwise report a broken module as an uncaptured (panicking) error.
//! A failed check is logged and the caller gets `None`: the program keeps
//! running, the affected renderer draws nothing.

use std::collections::BTreeSet;

use naga::valid::{Capabilities, ValidationError, ValidationFlags, Validator};

use crate::error::{ShaderStage, VistaError};

/// Vertex entry point every vista shader must define.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Fragment entry point every vista shader must define.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Checks that `source` compiles and that its two stages link.
///
/// - syntax/type errors and missing entry points are `ShaderCompile`
/// - a fragment input location the vertex stage never writes is `ShaderLink`
pub fn validate_wgsl(label: &str, source: &str) -> Result<(), VistaError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| VistaError::ShaderCompile {
        label: label.to_string(),
        stage: None,
        diagnostics: e.emit_to_string(source),
    })?;

    let vertex = find_entry(label, &module, ShaderStage::Vertex)?;
    let fragment = find_entry(label, &module, ShaderStage::Fragment)?;

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| {
            let stage = match e.as_inner() {
                ValidationError::EntryPoint { stage, .. } => map_stage(*stage),
                _ => None,
            };
            VistaError::ShaderCompile {
                label: label.to_string(),
                stage,
                diagnostics: e.to_string(),
            }
        })?;

    let written = vertex_output_locations(&module, vertex);
    let missing: Vec<u32> = fragment_input_locations(&module, fragment)
        .difference(&written)
        .copied()
        .collect();

    if !missing.is_empty() {
        return Err(VistaError::ShaderLink {
            label: label.to_string(),
            diagnostics: format!(
                "fragment input location(s) {missing:?} are not written by `{VERTEX_ENTRY}`"
            ),
        });
    }

    Ok(())
}

/// Validates `source` and creates the wgpu module, or logs and returns `None`.
pub fn create_checked_module(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Option<wgpu::ShaderModule> {
    if let Err(err) = validate_wgsl(label, source) {
        log::error!("{err}");
        return None;
    }

    Some(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    }))
}

fn map_stage(stage: naga::ShaderStage) -> Option<ShaderStage> {
    match stage {
        naga::ShaderStage::Vertex => Some(ShaderStage::Vertex),
        naga::ShaderStage::Fragment => Some(ShaderStage::Fragment),
        _ => None,
    }
}

fn find_entry<'m>(
    label: &str,
    module: &'m naga::Module,
    stage: ShaderStage,
) -> Result<&'m naga::EntryPoint, VistaError> {
    let name = match stage {
        ShaderStage::Vertex => VERTEX_ENTRY,
        ShaderStage::Fragment => FRAGMENT_ENTRY,
    };

    module
        .entry_points
        .iter()
        .find(|ep| ep.name == name && map_stage(ep.stage) == Some(stage))
        .ok_or_else(|| VistaError::ShaderCompile {
            label: label.to_string(),
            stage: Some(stage),
            diagnostics: format!("missing @{stage} entry point `{name}`"),
        })
}

fn location(binding: Option<&naga::Binding>) -> Option<u32> {
    match binding {
        Some(naga::Binding::Location { location, .. }) => Some(*location),
        _ => None,
    }
}

/// User locations carried by a value of type `ty` with an optional direct binding.
fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut BTreeSet<u32>,
) {
    if let Some(loc) = location(binding) {
        out.insert(loc);
        return;
    }

    if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
        out.extend(members.iter().filter_map(|m| location(m.binding.as_ref())));
    }
}

fn vertex_output_locations(module: &naga::Module, ep: &naga::EntryPoint) -> BTreeSet<u32> {
    let mut out = BTreeSet::new();
    if let Some(result) = &ep.function.result {
        collect_locations(module, result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

fn fragment_input_locations(module: &naga::Module, ep: &naga::EntryPoint) -> BTreeSet<u32> {
    let mut out = BTreeSet::new();
    for arg in &ep.function.arguments {
        collect_locations(module, arg.ty, arg.binding.as_ref(), &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) p: vec2<f32>) -> VsOut {
    var out: VsOut;
    out.pos = vec4<f32>(p, 0.0, 1.0);
    out.uv = p;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return vec4<f32>(in.uv, 0.0, 1.0);
}
"#;

    #[test]
    fn valid_program_passes() {
        assert_eq!(validate_wgsl("test", VALID), Ok(()));
    }

    #[test]
    fn shipped_shaders_pass() {
        assert_eq!(
            validate_wgsl("textured quad", crate::render::TEXTURED_QUAD_WGSL),
            Ok(())
        );
        assert_eq!(
            validate_wgsl("flat triangle", crate::render::FLAT_TRIANGLE_WGSL),
            Ok(())
        );
    }

    #[test]
    fn syntax_error_is_a_compile_failure_without_stage() {
        let err = validate_wgsl("broken", "fn vs_main( {").unwrap_err();
        assert!(matches!(err, VistaError::ShaderCompile { stage: None, .. }));
    }

    #[test]
    fn missing_fragment_entry_is_a_fragment_compile_failure() {
        let src = r#"
@vertex
fn vs_main(@location(0) p: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(p, 0.0, 1.0);
}
"#;
        let err = validate_wgsl("no fs", src).unwrap_err();
        assert!(matches!(
            err,
            VistaError::ShaderCompile { stage: Some(ShaderStage::Fragment), .. }
        ));
    }

    #[test]
    fn unmatched_fragment_input_is_a_link_failure() {
        let src = r#"
@vertex
fn vs_main(@location(0) p: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(p, 0.0, 1.0);
}

@fragment
fn fs_main(@location(1) c: vec4<f32>) -> @location(0) vec4<f32> {
    return c;
}
"#;
        let err = validate_wgsl("unlinked", src).unwrap_err();
        assert!(matches!(err, VistaError::ShaderLink { .. }));
    }
}
