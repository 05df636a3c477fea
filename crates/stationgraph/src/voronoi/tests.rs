use super::*;
use crate::station::{PointSet, Station, StationId};
use crate::GraphError;
use nalgebra::{vector, Vector2};

fn id(n: u64) -> StationId {
    StationId::Num(n)
}

fn hexagon_with_center() -> Vec<Station> {
    let mut stations = vec![Station::new(0u64, 0.0, 0.0, 10)];
    for k in 0..6u64 {
        let th = std::f64::consts::PI / 3.0 * k as f64;
        stations.push(Station::new(k + 1, th.cos(), th.sin(), 10));
    }
    stations
}

#[test]
fn center_of_hexagon_gets_bounded_hexagonal_cell() {
    let ps = PointSet::from_stations(&hexagon_with_center());
    let part = voronoi_partition(&ps).unwrap();
    assert_eq!(part.len(), 7);
    assert_eq!(part.unbounded_count(), 6);
    let cell = part.get(&id(0)).unwrap();
    assert!(!cell.unbounded);
    assert!(cell.rays.is_none());
    assert_eq!(cell.vertices.len(), 6);
    // all vertices at the circumradius 1/sqrt(3) of the unit equilateral triangles
    let r = 1.0 / 3.0f64.sqrt();
    for v in &cell.vertices {
        assert!((v.norm() - r).abs() < 1e-9);
    }
    // CCW ring: positive area equal to a regular hexagon of circumradius r
    let area = cell.area().unwrap();
    let expected = 1.5 * 3.0f64.sqrt() * r * r;
    assert!((area - expected).abs() < 1e-9);
}

#[test]
fn unit_square_cells_are_unbounded_with_outward_rays() {
    let stations = vec![
        Station::new(1u64, 0.0, 0.0, 10),
        Station::new(2u64, 1.0, 0.0, 20),
        Station::new(3u64, 1.0, 1.0, 30),
        Station::new(4u64, 0.0, 1.0, 5),
    ];
    let ps = PointSet::from_stations(&stations);
    let part = voronoi_partition(&ps).unwrap();
    assert_eq!(part.len(), 4);
    let center = vector![0.5, 0.5];
    for cell in part.cells.values() {
        assert!(cell.unbounded);
        assert!(cell.area().is_none());
        // cocircular corners: both circumcenters coincide at the center
        assert_eq!(cell.vertices.len(), 1);
        assert!((cell.vertices[0] - center).norm() < 1e-12);
    }
    // station 1 at the origin: rays go down (between 1 and 2) and left (between 1 and 4)
    let [first, last] = part.get(&id(1)).unwrap().rays.unwrap();
    assert!((first - vector![0.0, -1.0]).norm() < 1e-12);
    assert!((last - vector![-1.0, 0.0]).norm() < 1e-12);
}

#[test]
fn rays_point_away_from_the_point_cloud() {
    let ps = PointSet::from_stations(&hexagon_with_center());
    let part = voronoi_partition(&ps).unwrap();
    for k in 1..=6u64 {
        let cell = part.get(&id(k)).unwrap();
        let site: Vector2<f64> = ps.position_of(&id(k)).unwrap();
        let [first, last] = cell.rays.unwrap();
        // the hull is centered on the origin, so rays of hull cells head outward
        assert!(first.dot(&site) > 0.0);
        assert!(last.dot(&site) > 0.0);
        assert!((first.norm() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn failure_modes_match_triangulation() {
    let two = vec![Station::new(1u64, 0.0, 0.0, 1), Station::new(2u64, 1.0, 1.0, 1)];
    assert!(matches!(
        voronoi_partition(&PointSet::from_stations(&two)),
        Err(GraphError::InsufficientData { found: 2, .. })
    ));
    let line: Vec<_> = (0..4u64).map(|k| Station::new(k, k as f64, 0.0, 1)).collect();
    assert!(matches!(
        voronoi_partition(&PointSet::from_stations(&line)),
        Err(GraphError::DegenerateGeometry { .. })
    ));
}

#[test]
fn coincident_station_has_no_cell() {
    let mut stations = hexagon_with_center();
    stations.push(Station::new(50u64, 0.0, 0.0, 3));
    let part = voronoi_partition(&PointSet::from_stations(&stations)).unwrap();
    assert!(part.get(&id(50)).is_none());
    assert_eq!(part.coincident.len(), 1);
    assert_eq!(part.coincident[0].merged_into, id(0));
}

#[test]
fn thin_triangles_still_get_cells() {
    // station 2 sits 1e-8 above the long base: an extreme sliver that the
    // exact triangulation accepts
    let stations = vec![
        Station::new(1u64, 0.0, 0.0, 1),
        Station::new(2u64, 1e8, 1e-8, 1),
        Station::new(3u64, 2e8, 0.0, 1),
        Station::new(4u64, 1e8, 5e7, 1),
    ];
    let ps = PointSet::from_stations(&stations);
    let dg = crate::triangulation::build_delaunay_graph(&ps).unwrap();
    assert_eq!(dg.triangles.len(), 3);
    let part = voronoi_partition(&ps).unwrap();
    assert_eq!(part.len(), 4);
    // station 2 lies inside the hull by 1e-8, so its cell closes
    let inner = part.get(&id(2)).unwrap();
    assert!(!inner.unbounded);
    assert_eq!(inner.vertices.len(), 3);
    assert_eq!(part.unbounded_count(), 3);
    for cell in part.cells.values() {
        assert!(cell.vertices.iter().all(|v| v.x.is_finite() && v.y.is_finite()));
        assert_eq!(cell.unbounded, cell.rays.is_some());
    }
    // the sliver's circumcenter lies far below the base
    let far = part
        .cells
        .values()
        .flat_map(|c| c.vertices.iter())
        .any(|v| v.y < -1e20);
    assert!(far);
}
