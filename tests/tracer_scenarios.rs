//! Traversal scenarios on small hand-built maps.

use std::f32::consts::FRAC_PI_4;

use grid_raycaster::texture::map_texture;
use grid_raycaster::tracer::max_steps;
use grid_raycaster::{GridMap, Pose, Ray, Side, Trace, trace};

fn open_map_with_pillar() -> GridMap {
    let mut rows = vec![vec![0u8; 10]; 10];
    rows[5][5] = 1;
    GridMap::from_rows(&rows).unwrap()
}

#[test]
fn diagonal_ray_reaches_pillar_corner() {
    let map = open_map_with_pillar();
    let pose = Pose::new(1.5, 1.5, FRAC_PI_4);
    let ray = Ray::from_angle(pose.angle(), 0.0);

    let traced = trace(&map, &pose, &ray);
    let hit = traced.hit().expect("pillar is straight ahead");
    assert_eq!((hit.cell_x, hit.cell_y), (5, 5));
    // The ray meets the pillar exactly at its corner (5, 5)
    let expected = (3.5f32 * 3.5 * 2.0).sqrt();
    assert!(
        (hit.distance - expected).abs() < 1e-3,
        "distance {} expected {}",
        hit.distance,
        expected
    );
}

#[test]
fn ray_just_below_diagonal_strikes_west_face() {
    let map = open_map_with_pillar();
    // Aim at (5.0, 5.4) on the pillar's west face
    let angle = (5.4f32 - 1.5).atan2(5.0 - 1.5);
    let pose = Pose::new(1.5, 1.5, angle);
    let ray = Ray::from_angle(angle, 0.0);

    let hit = *trace(&map, &pose, &ray).hit().unwrap();
    assert_eq!((hit.cell_x, hit.cell_y), (5, 5));
    assert_eq!(hit.side, Side::X);
    let expected = (3.5f32 * 3.5 + 3.9 * 3.9).sqrt();
    assert!((hit.distance - expected).abs() < 1e-4);

    // Contact y = 5.4, seen travelling +x, so the column is mirrored
    let tex = map_texture(&pose, &ray, &hit);
    assert!((tex.u - 0.6).abs() < 1e-4, "u = {}", tex.u);
    assert!(!tex.shaded);
}

#[test]
fn ray_just_above_diagonal_strikes_north_face() {
    let map = open_map_with_pillar();
    // Aim at (5.4, 5.0) on the face towards decreasing y
    let angle = (5.0f32 - 1.5).atan2(5.4 - 1.5);
    let pose = Pose::new(1.5, 1.5, angle);
    let ray = Ray::from_angle(angle, 0.0);

    let hit = *trace(&map, &pose, &ray).hit().unwrap();
    assert_eq!(hit.side, Side::Y);
    let tex = map_texture(&pose, &ray, &hit);
    assert!((tex.u - 0.4).abs() < 1e-4, "u = {}", tex.u);
    assert!(tex.shaded);
}

#[test]
fn axis_parallel_rays_only_cross_vertical_lines() {
    // Walls only in the first and last columns
    let mut rows = vec![vec![0u8; 10]; 5];
    for row in rows.iter_mut() {
        row[0] = 1;
        row[9] = 1;
    }
    let map = GridMap::from_rows(&rows).unwrap();

    let east = Ray::from_angle(0.0, 0.0);
    assert_eq!(east.direction_y, 0.0);
    let west = Ray {
        direction_x: -1.0,
        direction_y: 0.0,
        angle: std::f32::consts::PI,
        relative_angle: 0.0,
    };

    for &y in &[0.5f32, 1.0, 2.25, 3.999, 4.5] {
        for &x in &[1.0f32, 2.3, 5.5, 8.75] {
            let pose = Pose::new(x, y, 0.0);

            let traced = trace(&map, &pose, &east);
            let hit = traced.hit().unwrap();
            assert_eq!(hit.side, Side::X);
            assert_eq!(hit.cell_x, 9);
            assert!((hit.distance - (9.0 - x)).abs() < 1e-5);
            // One step per column crossed: y was never advanced
            assert_eq!(traced.steps(), 9 - x.floor() as usize);

            let traced = trace(&map, &pose, &west);
            let hit = traced.hit().unwrap();
            assert_eq!(hit.side, Side::X);
            assert_eq!(hit.cell_x, 0);
            assert!((hit.distance - (x - 1.0)).abs() < 1e-5);
            assert_eq!(traced.steps(), x.floor() as usize);
        }
    }
}

#[test]
fn empty_map_misses_within_step_cap() {
    let map = GridMap::from_rows(&[[0u8; 10]; 10]).unwrap();
    let cap = max_steps(&map);
    for i in 0..360 {
        let angle = (i as f32).to_radians();
        for &(x, y) in &[(0.5f32, 0.5f32), (5.0, 5.0), (9.9, 0.1), (3.3, 7.7)] {
            let pose = Pose::new(x, y, angle);
            let traced = trace(&map, &pose, &Ray::from_angle(angle, 0.0));
            assert!(matches!(traced, Trace::Miss { .. }));
            assert!(traced.steps() <= cap);
        }
    }
}

#[test]
fn mirroring_is_complementary_across_a_shared_face() {
    // Wall cells left of x = 5 in one map, right of it in the other, so the
    // same grid line is seen from both directions.
    let mut west_rows = vec![vec![0u8; 12]; 8];
    let mut east_rows = west_rows.clone();
    for y in 0..8 {
        east_rows[y][5] = 1;
        west_rows[y][4] = 1;
    }
    let facing_east = GridMap::from_rows(&east_rows).unwrap();
    let facing_west = GridMap::from_rows(&west_rows).unwrap();

    let slope = 0.65f32;
    let len = (1.0 + slope * slope).sqrt();

    let from_west = Pose::new(3.0, 2.0, 0.0);
    let ray_east = Ray {
        direction_x: 1.0 / len,
        direction_y: slope / len,
        angle: slope.atan(),
        relative_angle: 0.0,
    };
    let from_east = Pose::new(7.0, 2.0, 0.0);
    let ray_west = Ray {
        direction_x: -1.0 / len,
        direction_y: slope / len,
        angle: std::f32::consts::PI - slope.atan(),
        relative_angle: 0.0,
    };

    let a = *trace(&facing_east, &from_west, &ray_east).hit().unwrap();
    let b = *trace(&facing_west, &from_east, &ray_west).hit().unwrap();
    assert_eq!((a.side, b.side), (Side::X, Side::X));
    assert_eq!((a.cell_x, b.cell_x), (5, 4));
    assert!((a.distance - b.distance).abs() < 1e-5);

    let ua = map_texture(&from_west, &ray_east, &a).u;
    let ub = map_texture(&from_east, &ray_west, &b).u;
    assert!((ub - 0.3).abs() < 1e-4, "u = {ub}");
    assert!((ua + ub - 1.0).abs() < 1e-4, "{ua} + {ub}");
}
