//! Pins the Rust uniform structs to the sizes their WGSL counterparts
//! occupy under the uniform address space layout rules. A mismatch
//! fails bind-group validation at draw time, so catch it here instead.

use naga::proc::Layouter;
use starview::camera::CameraUniform;
use starview::lighting::LightingUniform;
use starview::renderer::tonemap::TonemapParams;

fn wgsl_struct_size(source: &str, name: &str) -> usize {
    let module = naga::front::wgsl::parse_str(source).expect("shader parses");
    let mut layouter = Layouter::default();
    layouter.update(module.to_ctx()).expect("layout resolves");
    let (handle, _) = module
        .types
        .iter()
        .find(|(_, ty)| ty.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("struct {name} not found in shader"));
    layouter[handle].size as usize
}

#[test]
fn light_uniform_matches_scene_shader() {
    let size = wgsl_struct_size(
        include_str!("../assets/shaders/scene.wgsl"),
        "LightUniform",
    );
    assert_eq!(size, std::mem::size_of::<LightingUniform>());
}

#[test]
fn camera_uniform_matches_scene_shader() {
    let size = wgsl_struct_size(
        include_str!("../assets/shaders/scene.wgsl"),
        "CameraUniform",
    );
    assert_eq!(size, std::mem::size_of::<CameraUniform>());
}

#[test]
fn camera_uniform_matches_skybox_shader() {
    let size = wgsl_struct_size(
        include_str!("../assets/shaders/skybox.wgsl"),
        "CameraUniform",
    );
    assert_eq!(size, std::mem::size_of::<CameraUniform>());
}

#[test]
fn tonemap_params_matches_tonemap_shader() {
    let size = wgsl_struct_size(
        include_str!("../assets/shaders/tonemap.wgsl"),
        "TonemapParams",
    );
    assert_eq!(size, std::mem::size_of::<TonemapParams>());
}
