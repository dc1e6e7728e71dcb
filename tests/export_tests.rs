use cadastre_viewer::io::coordinates::{export_to_path, write_coordinates};
use cadastre_viewer::{AoiCollector, AoiPoint};

#[test]
fn test_export_three_points_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coordonnees.csv");
    let mut aoi = AoiCollector::new();
    aoi.add(5.25, -4.0);
    aoi.add(5.3, -4.1);
    aoi.add(5.35, -4.2);

    let rows = export_to_path(&path, aoi.points()).unwrap();

    assert_eq!(rows, 3);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Longitude,Latitude,ID\n-4,5.25,0\n-4.1,5.3,1\n-4.2,5.35,2\n"
    );
}

#[test]
fn test_ids_continue_after_clear() {
    let mut aoi = AoiCollector::new();
    aoi.add(1.0, 2.0);
    aoi.clear();
    aoi.add(3.0, 4.0);

    let mut buffer = Vec::new();
    write_coordinates(&mut buffer, aoi.points()).unwrap();

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "Longitude,Latitude,ID\n4,3,1\n"
    );
}

#[test]
fn test_infinite_coordinate_exports_header_only() {
    let points = [
        AoiPoint {
            id: 0,
            latitude: 5.25,
            longitude: -4.0,
        },
        AoiPoint {
            id: 1,
            latitude: f64::INFINITY,
            longitude: -4.0,
        },
    ];
    let mut buffer = Vec::new();

    assert_eq!(write_coordinates(&mut buffer, &points).unwrap(), 0);
    assert_eq!(String::from_utf8(buffer).unwrap(), "Longitude,Latitude,ID\n");
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fehlt").join("aoi.csv");
    assert!(export_to_path(&path, &[]).is_err());
}
