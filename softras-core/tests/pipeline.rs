use softras_core::math::{Vec2, Vec3, DEPTH_SCALE};
use softras_core::{
    draw_line, encode_vmodel, parse_vmodel, Camera, Framebuffer, HashedColors, Mesh, Rasterizer,
    SolidColors, Vertex,
};

fn cleared(width: usize, height: usize) -> Framebuffer {
    let mut fb = Framebuffer::new(width, height).unwrap();
    fb.clear(0, DEPTH_SCALE);
    fb
}

#[test]
fn cube_covers_image_center() {
    let mut fb = cleared(64, 64);
    let camera = Camera::new(64, 64);
    let cube = Mesh::cube(2.0);

    let stats = Rasterizer::new(HashedColors).render_mesh(&mut fb, &cube, &camera.view_projection());

    assert_eq!(stats.triangles_rasterized + stats.triangles_skipped, 12);
    assert!(stats.pixels_written > 0);
    let depth = fb.depth(32, 32).unwrap();
    assert!(depth > 0.0 && depth < DEPTH_SCALE, "depth {depth}");
    assert_ne!(fb.pixel(32, 32), Some(0));
    assert_eq!(fb.depth(0, 0), Some(DEPTH_SCALE));
    assert_eq!(fb.pixel(0, 0), Some(0));
}

#[test]
fn front_face_wins_over_back_face() {
    let camera = Camera::new(64, 64);
    let cube = Mesh::cube(2.0);

    // Only the +Z face (triangles 0 and 1) is visible head-on.
    let front = Mesh::new(cube.indices[..6].to_vec(), cube.vertices.clone());
    let mut reference = cleared(64, 64);
    Rasterizer::new(HashedColors).render_mesh(&mut reference, &front, &camera.view_projection());

    let mut fb = cleared(64, 64);
    Rasterizer::new(HashedColors).render_mesh(&mut fb, &cube, &camera.view_projection());

    assert_eq!(fb.pixel(32, 32), reference.pixel(32, 32));
    assert_eq!(fb.depth(32, 32), reference.depth(32, 32));
}

#[test]
fn decoded_mesh_renders_like_the_original() {
    let cube = Mesh::cube(2.0);
    let decoded = parse_vmodel(&encode_vmodel(&cube)).unwrap();
    assert_eq!(decoded, cube);

    let camera = Camera::new(48, 32);
    let mut a = cleared(48, 32);
    let mut b = cleared(48, 32);
    let rasterizer = Rasterizer::new(HashedColors);
    let sa = rasterizer.render_mesh(&mut a, &cube, &camera.view_projection());
    let sb = rasterizer.render_mesh(&mut b, &decoded, &camera.view_projection());

    assert_eq!(sa, sb);
    assert_eq!(a.color_pixels(), b.color_pixels());
}

#[test]
fn vertex_on_camera_plane_is_skipped() {
    let camera = Camera::new(32, 32);
    let mesh = Mesh::new(
        vec![0, 1, 2],
        vec![
            Vertex::from_position(camera.position.x, camera.position.y, camera.position.z),
            Vertex::from_position(1.0, 0.0, 0.0),
            Vertex::from_position(0.0, 1.0, 0.0),
        ],
    );
    let mut fb = cleared(32, 32);
    let stats = Rasterizer::new(HashedColors).render_mesh(&mut fb, &mesh, &camera.view_projection());

    assert_eq!(stats.triangles_skipped, 1);
    assert_eq!(stats.pixels_written, 0);
    assert!(fb.color_pixels().iter().all(|&c| c == 0));
}

#[test]
fn edge_on_triangle_is_skipped() {
    let camera = Camera::new(32, 32);
    // Lies in a plane containing the view direction.
    let mesh = Mesh::new(
        vec![0, 1, 2],
        vec![
            Vertex::new(Vec3::new(0.0, -1.0, 0.0), Vec3::x(), Vec2::zeros()),
            Vertex::new(Vec3::new(0.0, 1.0, 0.0), Vec3::x(), Vec2::zeros()),
            Vertex::new(Vec3::new(0.0, 0.0, -2.0), Vec3::x(), Vec2::zeros()),
        ],
    );
    let mut fb = cleared(32, 32);
    let stats = Rasterizer::new(SolidColors([0x00FFFFFF; 3])).render_mesh(
        &mut fb,
        &mesh,
        &camera.view_projection(),
    );
    assert_eq!(stats.triangles_skipped, 1);
    assert_eq!(stats.triangles_rasterized, 0);
}

#[test]
fn debug_line_draws_over_geometry() {
    let mut fb = cleared(64, 64);
    let camera = Camera::new(64, 64);
    Rasterizer::new(HashedColors).render_mesh(&mut fb, &Mesh::cube(2.0), &camera.view_projection());
    let depth_before = fb.depth(32, 32);

    draw_line(&mut fb, 0, 32, 63, 32, 0x00FFFFFF, 0x00FFFFFF);

    assert_eq!(fb.pixel(32, 32), Some(0x00FFFFFF));
    assert_eq!(fb.depth(32, 32), depth_before);
}
