//! End-to-end properties of the four indicator calculators on synthetic
//! rasters: missing-resource sentinels, area conservation, unit
//! conversion round trips and sentinel invariance.

use approx::assert_relative_eq;
use geo_types::{polygon, Geometry};
use geozonal_core::{Feature, FeatureCollection, GeoTransform, Raster, RasterStack, Value};
use geozonal_engines::{parse_statistics, Aoi, Engine, ProcessingMode, Statistic, ZonalOutput};
use geozonal_indicators::{
    drought_wetness, landcover_class_area, soil_properties, travel_time,
};

fn square(size: f64) -> Geometry<f64> {
    Geometry::Polygon(polygon![
        (x: 0.0, y: 0.0),
        (x: size, y: 0.0),
        (x: size, y: size),
        (x: 0.0, y: size),
    ])
}

fn layer(values: &[f64], rows: usize, cols: usize, transform: GeoTransform) -> Raster<f64> {
    let mut r = Raster::from_vec(values.to_vec(), rows, cols).unwrap();
    r.set_transform(transform);
    r
}

#[test]
fn absent_resource_yields_no_data_for_every_indicator() {
    let feature = Feature::new(square(1.0));
    let stats = [Statistic::Mean];

    assert!(drought_wetness(Aoi::Asset(&feature), None, &stats, Engine::Zonal)
        .unwrap()
        .is_none());
    assert!(landcover_class_area(&feature, None).unwrap().is_none());
    assert!(soil_properties(&feature, None, &stats, Engine::Extract)
        .unwrap()
        .is_none());
    assert!(travel_time(&feature, None, &stats, Engine::ExactExtract)
        .unwrap()
        .is_none());
}

#[test]
fn landcover_two_years_three_classes() {
    // 2x2 grid of 500m cells: 25 ha each, 100 ha total, fully covered by
    // the AOI. Codes 0, 111 and 200 are present.
    let transform = GeoTransform::new(0.0, 1000.0, 500.0, -500.0);
    let y2016 = layer(&[0.0, 111.0, 200.0, 111.0], 2, 2, transform);
    let y2017 = layer(&[0.0, 0.0, 200.0, 111.0], 2, 2, transform);

    let stack = RasterStack::from_layers([
        ("landcover_2016.tif".to_string(), y2016),
        ("landcover_2017.tif".to_string(), y2017),
    ])
    .unwrap();

    let feature = Feature::new(square(1000.0));
    let table = landcover_class_area(&feature, Some(&stack)).unwrap().unwrap();

    // 2 layers x 3 distinct codes
    assert_eq!(table.nrows(), 6);
    assert_eq!(table.names(), vec!["classes", "year", "area", "percentage"]);

    let area = table.require_column("area").unwrap().as_f64();
    let pct = table.require_column("percentage").unwrap().as_f64();

    // per-year totals: 100 ha and shares summing to 1
    for year_rows in [0..3, 3..6] {
        let a: f64 = area[year_rows.clone()].iter().sum();
        let p: f64 = pct[year_rows].iter().sum();
        assert_relative_eq!(a, 100.0, epsilon = 1e-6);
        assert_relative_eq!(p, 1.0, epsilon = 1e-9);
    }

    // codes are sorted, so rows are no_data, closed forest, open sea
    assert_eq!(table.get(0, "classes").unwrap().as_str(), Some("no_data"));
    assert_eq!(table.get(2, "classes").unwrap().as_str(), Some("open_sea"));
    assert_eq!(table.get(0, "year"), Some(&Value::Int(2016)));
    assert_eq!(table.get(3, "year"), Some(&Value::Int(2017)));

    // 2016: one 25 ha cell of no_data, two of closed forest, one of sea
    assert_relative_eq!(area[0], 25.0, epsilon = 1e-6);
    assert_relative_eq!(area[1], 50.0, epsilon = 1e-6);
    assert_relative_eq!(area[2], 25.0, epsilon = 1e-6);
}

#[test]
fn soil_conversion_to_conventional_units() {
    // clay_0-5cm_mean.tif with every covered cell at 123 storage units
    // and conversion divisor 10
    let transform = GeoTransform::new(0.0, 2.0, 1.0, -1.0);
    let stack = RasterStack::from_layers([(
        "clay_0-5cm_mean.tif".to_string(),
        layer(&[123.0; 4], 2, 2, transform),
    )])
    .unwrap();

    let feature = Feature::new(square(2.0));
    let table = soil_properties(&feature, Some(&stack), &[Statistic::Mean], Engine::Extract)
        .unwrap()
        .unwrap();

    assert_eq!(table.get(0, "layer").unwrap().as_str(), Some("clay"));
    assert_eq!(table.get(0, "depth").unwrap().as_str(), Some("0-5cm"));
    assert_eq!(table.get(0, "stat").unwrap().as_str(), Some("mean"));
    assert_relative_eq!(table.get(0, "mean").unwrap().as_f64().unwrap(), 12.3);
}

#[test]
fn string_tokens_drive_a_full_run() {
    // The caller-facing path: string tokens parsed up front, then one
    // portfolio drought run
    let stats = parse_statistics(&["mean", "min", "max"]).unwrap();
    let engine = Engine::parse("exactextract").unwrap();
    let mode = ProcessingMode::parse("portfolio").unwrap();
    assert_eq!(mode, ProcessingMode::Portfolio);

    let transform = GeoTransform::new(0.0, 4.0, 1.0, -1.0);
    let stack = RasterStack::from_layers([
        ("wet_20190301.tif".to_string(), layer(&[2.0; 16], 4, 4, transform)),
        ("wet_20190401.tif".to_string(), layer(&[6.0; 16], 4, 4, transform)),
    ])
    .unwrap();

    let collection: FeatureCollection = [square(2.0), square(4.0)]
        .into_iter()
        .map(Feature::new)
        .collect();

    let out = drought_wetness(Aoi::Portfolio(&collection), Some(&stack), &stats, engine)
        .unwrap()
        .unwrap();

    let ZonalOutput::Portfolio(tables) = out else {
        panic!("expected portfolio output");
    };
    assert_eq!(tables.len(), 2);
    for table in &tables {
        assert_eq!(table.nrows(), stack.len());
        assert_eq!(table.names(), vec!["mean", "min", "max", "date"]);
        assert_relative_eq!(table.get(1, "mean").unwrap().as_f64().unwrap(), 6.0);
        assert!(!table.get(0, "date").unwrap().is_null());
    }
}

#[test]
fn unknown_tokens_fail_before_any_computation() {
    assert!(parse_statistics(&["mean", "average"]).is_err());
    assert!(Engine::parse("terra").is_err());
    assert!(ProcessingMode::parse("bulk").is_err());
}

#[test]
fn traveltime_sentinel_and_band_labels() {
    let transform = GeoTransform::new(0.0, 2.0, 1.0, -1.0);
    let stack = RasterStack::from_layers([
        (
            "access-5k_10k.tif".to_string(),
            layer(&[30.0, 45.0, 65535.0, 15.0], 2, 2, transform),
        ),
        (
            "access-50k_100k.tif".to_string(),
            layer(&[90.0, 120.0, 70000.0, 60.0], 2, 2, transform),
        ),
    ])
    .unwrap();

    let feature = Feature::new(square(2.0));
    let table = travel_time(
        &feature,
        Some(&stack),
        &[Statistic::Mean, Statistic::Median],
        Engine::Zonal,
    )
    .unwrap()
    .unwrap();

    assert_eq!(table.nrows(), 2);
    assert_eq!(table.get(0, "distance").unwrap().as_str(), Some("5k_10k"));
    assert_eq!(table.get(1, "distance").unwrap().as_str(), Some("50k_100k"));

    // sentinels removed: means over the three valid cells
    assert_relative_eq!(
        table.get(0, "mean").unwrap().as_f64().unwrap(),
        (30.0 + 45.0 + 15.0) / 3.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        table.get(1, "median").unwrap().as_f64().unwrap(),
        90.0,
        epsilon = 1e-9
    );
}
