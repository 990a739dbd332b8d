use chrono::{Datelike, Duration, NaiveDate, Utc};
use lazy_static::lazy_static;
use shared::{ForecastPoint, PricePoint, PricePrediction};
use std::collections::HashMap;
use std::f32::consts::TAU;

const FORECAST_DAYS: i64 = 7;

struct CropInfo {
    base_price: f32,
    variety: &'static str,
    market: &'static str,
    // Offsets the seasonal curve so crops do not peak together.
    phase: f32,
}

lazy_static! {
    static ref CROPS: HashMap<&'static str, CropInfo> = {
        let mut table = HashMap::new();
        table.insert("wheat", CropInfo { base_price: 2100.0, variety: "Sharbati", market: "Azadpur Mandi", phase: 0.0 });
        table.insert("rice", CropInfo { base_price: 2800.0, variety: "Basmati", market: "Azadpur Mandi", phase: 0.9 });
        table.insert("maize", CropInfo { base_price: 1850.0, variety: "Hybrid Yellow", market: "Ghazipur Mandi", phase: 1.7 });
        table.insert("tomato", CropInfo { base_price: 1600.0, variety: "Desi", market: "Okhla Mandi", phase: 2.6 });
        table.insert("potato", CropInfo { base_price: 1200.0, variety: "Kufri Jyoti", market: "Azadpur Mandi", phase: 3.4 });
        table.insert("onion", CropInfo { base_price: 1500.0, variety: "Nashik Red", market: "Okhla Mandi", phase: 4.2 });
        table
    };
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Price per quintal on a given date: seasonal swing plus a shorter ripple,
/// both functions of the calendar date only, so the series is reproducible.
fn price_on(info: &CropInfo, date: NaiveDate) -> f32 {
    let day = date.ordinal() as f32;
    let seasonal = 0.06 * (TAU * day / 365.0 + info.phase).sin();
    let ripple = 0.015 * (day * 0.9 + 2.0 * info.phase).sin();
    round2(info.base_price * (1.0 + seasonal + ripple))
}

pub fn historical_prices(crop_id: &str, days: u32) -> Option<Vec<PricePoint>> {
    let info = CROPS.get(crop_id.to_lowercase().as_str())?;
    let today = Utc::now().date_naive();
    let days = days.clamp(1, 365) as i64;

    let series = (0..days)
        .map(|offset| {
            let date = today - Duration::days(days - offset);
            PricePoint {
                date: date.format("%Y-%m-%d").to_string(),
                price: price_on(info, date),
                market: info.market.to_string(),
                variety: info.variety.to_string(),
            }
        })
        .collect();
    Some(series)
}

pub fn predict(crop_id: &str, location: &str) -> Option<PricePrediction> {
    let crop_key = crop_id.to_lowercase();
    let info = CROPS.get(crop_key.as_str())?;
    let historical = historical_prices(crop_id, 30)?;
    let today = Utc::now().date_naive();

    let forecast: Vec<ForecastPoint> = (1..=FORECAST_DAYS)
        .map(|offset| {
            let date = today + Duration::days(offset);
            let predicted = price_on(info, date);
            // Uncertainty widens with horizon.
            let spread = predicted * (0.01 + 0.004 * offset as f32);
            ForecastPoint {
                date: date.format("%Y-%m-%d").to_string(),
                predicted_price: predicted,
                lower_bound: round2(predicted - spread),
                upper_bound: round2(predicted + spread),
            }
        })
        .collect();

    let insights = build_insights(&crop_key, &historical, &forecast);

    Some(PricePrediction {
        success: true,
        crop: crop_id.to_string(),
        location: location.to_string(),
        historical,
        forecast,
        insights,
        timestamp: Utc::now(),
    })
}

fn build_insights(
    crop: &str,
    historical: &[PricePoint],
    forecast: &[ForecastPoint],
) -> Vec<String> {
    let mut insights = Vec::new();

    if let (Some(last), Some(end)) = (historical.last(), forecast.last()) {
        let change = (end.predicted_price - last.price) / last.price * 100.0;
        let direction = if change >= 0.0 { "rise" } else { "fall" };
        insights.push(format!(
            "{} prices are projected to {} {:.1}% over the next {} days.",
            crop,
            direction,
            change.abs(),
            FORECAST_DAYS
        ));
    }

    if let Some(peak) = forecast
        .iter()
        .max_by(|a, b| a.predicted_price.total_cmp(&b.predicted_price))
    {
        insights.push(format!(
            "Highest forecast price of ₹{:.0} per quintal expected on {}.",
            peak.predicted_price, peak.date
        ));
    }

    insights.push(
        "Forecast is based on seasonal price patterns; actual mandi prices may vary.".to_string(),
    );
    insights
}
