//! Parses and validates the compositor shader standalone, so WGSL errors
//! fail in CI instead of at pipeline creation on someone's machine.

const SDF_SHADER: &str = include_str!("../src/render/shaders/sdf.wgsl");

fn parse() -> naga::Module {
    naga::front::wgsl::parse_str(SDF_SHADER)
        .unwrap_or_else(|e| panic!("WGSL parse error:\n{}", e.emit_to_string(SDF_SHADER)))
}

#[test]
fn sdf_shader_parses_and_validates() {
    let module = parse();

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .unwrap_or_else(|e| panic!("WGSL validation error:\n{}", e.emit_to_string(SDF_SHADER)));
}

#[test]
fn sdf_shader_exposes_both_fragment_variants() {
    let module = parse();
    let names: Vec<&str> = module
        .entry_points
        .iter()
        .map(|ep| ep.name.as_str())
        .collect();

    for expected in ["vs_main", "fs_main", "fs_main_aa"] {
        assert!(
            names.contains(&expected),
            "missing entry point {expected}, have {names:?}"
        );
    }
}
