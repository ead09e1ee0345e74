//! Checks that the Rust shader inputs and their WGSL declarations agree.

use std::mem::{offset_of, size_of};

use icosphere::shader::{SHADER_INPUTS_WGSL, VertexFormat, VertexStepMode};
use icosphere::{ConstantInput, InstanceInput, VertexInput};
use rstest::rstest;

/// Member offsets and total span of a WGSL struct, in declaration order.
fn wgsl_struct_layout(module: &naga::Module, name: &str) -> (Vec<(String, u32)>, u32) {
    let ty = module
        .types
        .iter()
        .map(|(_, ty)| ty)
        .find(|ty| ty.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("struct {name} not declared"));
    match &ty.inner {
        naga::TypeInner::Struct { members, span } => (
            members
                .iter()
                .map(|m| (m.name.clone().unwrap_or_default(), m.offset))
                .collect(),
            *span,
        ),
        other => panic!("{name} is not a struct: {other:?}"),
    }
}

fn parse() -> naga::Module {
    let module = naga::front::wgsl::parse_str(SHADER_INPUTS_WGSL).expect("WGSL should parse");
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .expect("WGSL should validate");
    module
}

#[rstest]
#[case::constant(
    "ConstantInput",
    size_of::<ConstantInput>(),
    vec![("eye", offset_of!(ConstantInput, eye))]
)]
#[case::instance(
    "InstanceInput",
    size_of::<InstanceInput>(),
    vec![
        ("model_matrix", offset_of!(InstanceInput, model_matrix)),
        ("normal_matrix", offset_of!(InstanceInput, normal_matrix)),
        (
            "model_view_projection_matrix",
            offset_of!(InstanceInput, model_view_projection_matrix),
        ),
        ("color", offset_of!(InstanceInput, color)),
        ("power", offset_of!(InstanceInput, power)),
    ]
)]
fn uniform_layout_matches_wgsl(
    #[case] name: &str,
    #[case] rust_size: usize,
    #[case] rust_members: Vec<(&str, usize)>,
) {
    let module = parse();
    let (members, span) = wgsl_struct_layout(&module, name);

    assert_eq!(span as usize, rust_size, "{name} size");
    let members: Vec<(&str, usize)> = members
        .iter()
        .map(|(n, offset)| (n.as_str(), *offset as usize))
        .collect();
    assert_eq!(members, rust_members);
}

#[test]
fn vertex_attributes_match_wgsl_locations() {
    let module = parse();
    let ty = module
        .types
        .iter()
        .map(|(_, ty)| ty)
        .find(|ty| ty.name.as_deref() == Some("VertexInput"))
        .expect("VertexInput declared");
    let naga::TypeInner::Struct { members, .. } = &ty.inner else {
        panic!("VertexInput is not a struct");
    };

    let locations: Vec<u32> = members
        .iter()
        .filter_map(|m| match m.binding {
            Some(naga::Binding::Location { location, .. }) => Some(location),
            _ => None,
        })
        .collect();

    let layout = VertexInput::layout();
    assert_eq!(layout.step_mode, VertexStepMode::Vertex);
    assert_eq!(
        layout.attributes.iter().map(|a| a.location).collect::<Vec<_>>(),
        locations
    );
    assert!(layout
        .attributes
        .iter()
        .all(|a| a.format == VertexFormat::Float32x3));
}

#[test]
fn mesh_vertex_bytes_use_vertex_input_stride() {
    let mesh = icosphere::create_icosphere(1).unwrap();
    let stride = VertexInput::layout().array_stride as usize;
    assert_eq!(mesh.vertex_bytes().len(), mesh.vertex_count() * stride);

    let first: &[f32] = bytemuck::cast_slice(&mesh.vertex_bytes()[..stride]);
    let vertex = mesh.vertices()[0];
    assert_eq!(first[..3], vertex.position.to_array());
    assert_eq!(first[3..], vertex.normal.to_array());
}
