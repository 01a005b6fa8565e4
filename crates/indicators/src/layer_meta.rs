//! Layer-name metadata extraction
//!
//! Upstream data acquisition encodes metadata in raster layer names:
//! dates as 8 contiguous digits, years as 4, soil layers as
//! `property_depth_stat.tif`, travel-time layers as `*-<band>.tif`.
//! Every naming convention is parsed here and nowhere else, returning
//! structured records. Names that violate a hard convention fail with a
//! descriptive error; date/year tokens degrade to `None` because a
//! missing date is expected in the wild.

use chrono::NaiveDate;
use geozonal_core::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"\d{8}").expect("valid date pattern");
    static ref YEAR_RE: Regex = Regex::new(r"\d{4}").expect("valid year pattern");
}

/// Strip a trailing `.tif` / `.tiff` extension
fn strip_extension(name: &str) -> &str {
    name.strip_suffix(".tif")
        .or_else(|| name.strip_suffix(".tiff"))
        .unwrap_or(name)
}

/// Parse a `YYYYMMDD` date from the first 8 contiguous digits of a layer
/// name. Names without such a token, or with digits that do not form a
/// calendar date, yield `None`.
pub fn parse_layer_date(name: &str) -> Option<NaiveDate> {
    let digits = DATE_RE.find(name)?.as_str();
    let year: i32 = digits[0..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a 4-digit year from the first 4 contiguous digits of a layer name
pub fn parse_layer_year(name: &str) -> Option<i32> {
    YEAR_RE.find(name)?.as_str().parse().ok()
}

/// Structured soil layer name: `{property}_{depth}_{stat}.tif`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoilLayerMeta {
    /// Soil property, e.g. `clay`
    pub property: String,
    /// Depth interval, e.g. `0-5cm`
    pub depth: String,
    /// Model statistic, e.g. `mean` or `Q0.5`
    pub stat: String,
}

/// Parse a soil layer name.
///
/// The name must split into exactly three underscore-delimited tokens
/// after the extension is stripped; anything else would silently mislabel
/// downstream columns, so it is a hard error.
pub fn parse_soil_layer(name: &str) -> Result<SoilLayerMeta> {
    let stem = strip_extension(name);
    let tokens: Vec<&str> = stem.split('_').collect();
    if tokens.len() != 3 || tokens.iter().any(|t| t.is_empty()) {
        return Err(Error::MalformedLayerName {
            name: name.to_string(),
            reason: format!(
                "expected 3 underscore-delimited tokens (property_depth_stat), found {}",
                tokens.len()
            ),
        });
    }
    Ok(SoilLayerMeta {
        property: tokens[0].to_string(),
        depth: tokens[1].to_string(),
        stat: tokens[2].to_string(),
    })
}

/// Parse the distance band of a travel-time layer name: the text between
/// the last `-` and the `.tif` suffix
pub fn parse_distance_band(name: &str) -> Result<String> {
    let stem = strip_extension(name);
    match stem.rsplit_once('-') {
        Some((_, band)) if !band.is_empty() => Ok(band.to_string()),
        _ => Err(Error::MalformedLayerName {
            name: name.to_string(),
            reason: "expected a '-<band>' distance token before the extension".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layer_date() {
        let date = parse_layer_date("wetness_20200115.tif").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 1, 15).unwrap());
    }

    #[test]
    fn test_date_without_digits_is_none() {
        assert!(parse_layer_date("wetness_monthly.tif").is_none());
        // 8 digits that are not a calendar date
        assert!(parse_layer_date("wetness_20201340.tif").is_none());
        // too few digits
        assert!(parse_layer_date("wetness_2020.tif").is_none());
    }

    #[test]
    fn test_parse_layer_year() {
        assert_eq!(parse_layer_year("landcover_2016.tif"), Some(2016));
        assert_eq!(parse_layer_year("no-year.tif"), None);
        // an 8-digit date yields its leading year
        assert_eq!(parse_layer_year("x_20200115"), Some(2020));
    }

    #[test]
    fn test_parse_soil_layer() {
        let meta = parse_soil_layer("clay_0-5cm_mean.tif").unwrap();
        assert_eq!(
            meta,
            SoilLayerMeta {
                property: "clay".into(),
                depth: "0-5cm".into(),
                stat: "mean".into(),
            }
        );
    }

    #[test]
    fn test_soil_layer_wrong_token_count() {
        for name in ["clay_mean.tif", "clay_0-5cm_mean_extra.tif", "clay.tif"] {
            let err = parse_soil_layer(name).unwrap_err();
            let msg = format!("{err}");
            assert!(msg.contains(name), "message should name the layer: {msg}");
            assert!(msg.contains("underscore"), "message should explain: {msg}");
        }
    }

    #[test]
    fn test_parse_distance_band() {
        assert_eq!(
            parse_distance_band("traveltime-5k_10k.tif").unwrap(),
            "5k_10k"
        );
        assert_eq!(
            parse_distance_band("cities-large-50k_100k.tif").unwrap(),
            "50k_100k"
        );
    }

    #[test]
    fn test_distance_band_missing_delimiter() {
        assert!(parse_distance_band("traveltime.tif").is_err());
        assert!(parse_distance_band("traveltime-.tif").is_err());
    }
}
