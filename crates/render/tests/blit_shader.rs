use std::fs;
use std::path::Path;

fn validate_shader(path: &Path) -> naga::Module {
    let src = fs::read_to_string(path).expect("read shader");
    let module = match naga::front::wgsl::parse_str(&src) {
        Ok(m) => m,
        Err(e) => panic!("WGSL parsing error in {path:?}:\n{}", e.emit_to_string(&src)),
    };
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    if let Err(e) = validator.validate(&module) {
        panic!("WGSL validation error in {path:?}:\n{}", e.emit_to_string(&src));
    }
    module
}

#[test]
fn blit_shader_compiles() {
    let module = validate_shader(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src/blit.wgsl"));
    let entry_points: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert!(entry_points.contains(&"vs_main"));
    assert!(entry_points.contains(&"fs_main"));
}
